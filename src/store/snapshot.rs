use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::stats::IndexStats;
use crate::index::inverted::InvertedIndex;

/// Immutable, point-in-time view of the index. Readers hold one for the
/// duration of a query; writers publish a fresh one after every completed
/// ingest, so a snapshot never observes a partially written document.
#[derive(Debug, Clone)]
pub struct Snapshot {
    version: u64,
    created_at: DateTime<Utc>,
    index: Arc<InvertedIndex>,
}

impl Snapshot {
    pub fn new(version: u64, index: Arc<InvertedIndex>) -> Self {
        Snapshot {
            version,
            created_at: Utc::now(),
            index,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn doc_count(&self) -> usize {
        self.index.doc_count()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            total_documents: self.index.doc_count(),
            total_terms: self.index.term_count(),
            total_tokens: self.index.total_tokens(),
            snapshot_version: self.version,
        }
    }
}
