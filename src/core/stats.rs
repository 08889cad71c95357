use serde::{Deserialize, Serialize};

/// Point-in-time index counters, read off a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    pub total_documents: usize,
    pub total_terms: usize,
    pub total_tokens: usize,
    pub snapshot_version: u64,
}
