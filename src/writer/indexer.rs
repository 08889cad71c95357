use tracing::debug;

use crate::analysis::tokenizer::Tokenizer;
use crate::core::error::Result;
use crate::core::types::{DocId, DocumentRecord, StoredDocument};
use crate::index::inverted::InvertedIndex;
use crate::storage::wal::{Wal, WalEntry};

/// The sole mutation path into the index. Owns id assignment and the
/// write-ahead log; the store serializes access behind a mutex, so only
/// one ingest runs at a time.
pub struct Indexer {
    tokenizer: Box<dyn Tokenizer>,
    next_doc_id: u32,
    wal: Option<Wal>,
}

impl Indexer {
    pub fn new(tokenizer: Box<dyn Tokenizer>, wal: Option<Wal>) -> Self {
        Indexer {
            tokenizer,
            next_doc_id: 0,
            wal,
        }
    }

    /// Turn one extracted record into the next index state. The returned
    /// index contains everything `base` does plus the new document; the
    /// caller publishes it, which is what makes the write visible. On any
    /// failure nothing has been published and `base` is untouched.
    ///
    /// The id is consumed only on success, so a failed ingest does not
    /// leave a hole in the sequence.
    pub fn ingest(
        &mut self,
        base: &InvertedIndex,
        record: DocumentRecord,
    ) -> Result<(InvertedIndex, DocId)> {
        let doc_id = self.assign_id();
        let tokens = self.tokenizer.tokenize(&record.content);

        let mut index = base.clone();
        let (fields, content) = record.clone().split();
        index.add_document(
            doc_id,
            StoredDocument {
                fields,
                content,
                token_count: tokens.len(),
            },
            &tokens,
        )?;

        // Logged before publication; a failed append aborts the ingest and
        // the cloned index is simply dropped.
        if let Some(wal) = &mut self.wal {
            wal.append(&WalEntry::new(doc_id, record))?;
        }

        self.next_doc_id += 1;
        debug!(doc_id = doc_id.0, tokens = tokens.len(), "document indexed");
        Ok((index, doc_id))
    }

    /// Re-apply a recovered log entry. Does not touch the log itself.
    pub fn replay(&mut self, index: &mut InvertedIndex, entry: WalEntry) -> Result<()> {
        let tokens = self.tokenizer.tokenize(&entry.record.content);
        let (fields, content) = entry.record.split();
        index.add_document(
            entry.doc_id,
            StoredDocument {
                fields,
                content,
                token_count: tokens.len(),
            },
            &tokens,
        )?;
        self.next_doc_id = self.next_doc_id.max(entry.doc_id.0 + 1);
        Ok(())
    }

    /// Next unused id, strictly increasing across the store's lifetime.
    fn assign_id(&self) -> DocId {
        DocId(self.next_doc_id)
    }
}
