use crate::index::posting::Posting;

/// Collection-level statistics a scorer needs.
#[derive(Debug, Clone, Copy)]
pub struct CollectionStats {
    pub total_docs: usize,
    /// Documents containing the term being scored.
    pub doc_freq: u32,
}

pub trait Scorer: Send + Sync {
    fn score(&self, posting: &Posting, stats: &CollectionStats) -> f32;

    fn name(&self) -> &str;
}

/// TF-IDF with a smoothed, always-positive idf:
/// `tf * (ln((N + 1) / (df + 1)) + 1)`. Monotonic in term frequency and
/// fully deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfScorer;

impl TfIdfScorer {
    pub fn idf(&self, stats: &CollectionStats) -> f32 {
        ((stats.total_docs as f32 + 1.0) / (stats.doc_freq as f32 + 1.0)).ln() + 1.0
    }
}

impl Scorer for TfIdfScorer {
    fn score(&self, posting: &Posting, stats: &CollectionStats) -> f32 {
        posting.term_freq as f32 * self.idf(stats)
    }

    fn name(&self) -> &str {
        "tfidf"
    }
}
