use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{DocId, DocumentRecord};
use crate::storage::layout::StorageLayout;

/// Frames larger than this are treated as corruption.
const MAX_ENTRY_BYTES: usize = 16 * 1024 * 1024;

/// Write-ahead log of ingested documents. The log is the only durable
/// artifact: replaying it rebuilds the whole index.
///
/// Frame format: `len(u32 le) ‖ crc32(u32 le) ‖ payload`, where payload is
/// the lz4-compressed bincode encoding of a [`WalEntry`] and the checksum
/// covers the payload bytes.
pub struct Wal {
    file: File,
    sync_mode: SyncMode,
    appends: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// fsync after every append.
    Immediate,
    /// fsync every few appends.
    Batch,
    /// Let the OS decide.
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalEntry {
    pub doc_id: DocId,
    pub record: DocumentRecord,
    pub timestamp: DateTime<Utc>,
}

impl WalEntry {
    pub fn new(doc_id: DocId, record: DocumentRecord) -> Self {
        WalEntry {
            doc_id,
            record,
            timestamp: Utc::now(),
        }
    }
}

impl Wal {
    pub fn open(storage: &StorageLayout, sync_mode: SyncMode) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(storage.wal_path())?;

        Ok(Wal {
            file,
            sync_mode,
            appends: 0,
        })
    }

    pub fn append(&mut self, entry: &WalEntry) -> Result<()> {
        let encoded = bincode::serialize(entry)?;
        let payload = lz4_flex::compress_prepend_size(&encoded);
        let crc = crc32fast::hash(&payload);

        self.file.write_all(&(payload.len() as u32).to_le_bytes())?;
        self.file.write_all(&crc.to_le_bytes())?;
        self.file.write_all(&payload)?;

        self.appends += 1;

        match self.sync_mode {
            SyncMode::Immediate => self.file.sync_all()?,
            SyncMode::Batch if self.appends % 64 == 0 => self.file.sync_all()?,
            _ => {}
        }

        Ok(())
    }

    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }

    /// Read every intact entry for recovery. A short or checksum-mismatched
    /// frame marks a torn tail: everything before it is returned and the
    /// file is truncated back to the last intact frame so later appends
    /// land on a clean boundary. A frame that checksums but fails to decode
    /// is real corruption and aborts recovery.
    pub fn read_entries(&mut self) -> Result<Vec<WalEntry>> {
        let mut entries = Vec::new();
        let mut valid_end: u64 = 0;
        self.file.seek(SeekFrom::Start(0))?;

        loop {
            let mut header = [0u8; 8];
            match self.file.read_exact(&mut header) {
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            }

            let len = u32::from_le_bytes(header[0..4].try_into().unwrap()) as usize;
            let crc = u32::from_le_bytes(header[4..8].try_into().unwrap());
            if len > MAX_ENTRY_BYTES {
                warn!(frame = entries.len(), "oversized frame, truncating log");
                break;
            }

            let mut payload = vec![0u8; len];
            match self.file.read_exact(&mut payload) {
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    warn!(frame = entries.len(), "short frame, truncating log");
                    break;
                }
                Err(e) => return Err(e.into()),
            }

            if crc32fast::hash(&payload) != crc {
                warn!(frame = entries.len(), "checksum mismatch, truncating log");
                break;
            }

            let encoded = lz4_flex::decompress_size_prepended(&payload).map_err(|e| {
                Error::new(ErrorKind::Parse, format!("wal decompression failed: {}", e))
            })?;
            entries.push(bincode::deserialize(&encoded)?);
            valid_end += 8 + len as u64;
        }

        // Drop whatever trails the last intact frame. A no-op on clean logs.
        self.file.set_len(valid_end)?;
        self.file.seek(SeekFrom::End(0))?;
        Ok(entries)
    }
}
