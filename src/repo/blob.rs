use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use parking_lot::RwLock;

use crate::core::error::{Error, Result};
use crate::core::types::BlobId;

/// Stores and retrieves the original uploaded bytes by opaque id.
pub trait BlobStore: Send + Sync {
    fn store(&self, bytes: &[u8]) -> Result<BlobId>;

    /// Fails with `NotFound` for an unknown id.
    fn retrieve(&self, id: BlobId) -> Result<Vec<u8>>;
}

/// In-memory blob store for tests and ephemeral setups.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<BlobId, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        MemoryBlobStore::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn store(&self, bytes: &[u8]) -> Result<BlobId> {
        let id = BlobId::generate();
        self.blobs.write().insert(id, bytes.to_vec());
        Ok(id)
    }

    fn retrieve(&self, id: BlobId) -> Result<Vec<u8>> {
        self.blobs
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("blob {}", id.0)))
    }
}

/// Filesystem blob store: one `<uuid>.bin` file per upload.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    dir: PathBuf,
}

impl FsBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(FsBlobStore { dir })
    }

    fn blob_path(&self, id: BlobId) -> PathBuf {
        self.dir.join(format!("{}.bin", id.0))
    }
}

impl BlobStore for FsBlobStore {
    fn store(&self, bytes: &[u8]) -> Result<BlobId> {
        let id = BlobId::generate();
        fs::write(self.blob_path(id), bytes)?;
        Ok(id)
    }

    fn retrieve(&self, id: BlobId) -> Result<Vec<u8>> {
        let path = self.blob_path(id);
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::not_found(format!("blob {}", id.0)))
            }
            Err(e) => Err(e.into()),
        }
    }
}
