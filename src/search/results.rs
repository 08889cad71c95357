use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::Serialize;

use crate::core::types::{DocId, DocumentFields};

/// Search results container.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub hits: Vec<ScoredDocument>,
    /// Total matching documents, before the limit was applied.
    pub total_hits: usize,
    pub max_score: f32,
}

/// Document with relevance score.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub doc_id: DocId,
    pub score: f32,
}

// Ranking order: higher score first, ascending doc_id on ties. The heap
// ordering below is reversed so the collector's BinaryHeap keeps the worst
// retained hit on top.
impl ScoredDocument {
    fn ranks_above(&self, other: &Self) -> bool {
        match self.score.partial_cmp(&other.score) {
            Some(Ordering::Greater) => true,
            Some(Ordering::Less) => false,
            _ => self.doc_id < other.doc_id,
        }
    }
}

impl PartialEq for ScoredDocument {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.doc_id == other.doc_id
    }
}

impl Eq for ScoredDocument {}

impl PartialOrd for ScoredDocument {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredDocument {
    fn cmp(&self, other: &Self) -> Ordering {
        if self == other {
            Ordering::Equal
        } else if self.ranks_above(other) {
            // Reversed: better hits sort as "less" so the heap top is the
            // weakest retained hit.
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

/// Bounded collector keeping the best k hits.
pub struct TopKCollector {
    heap: BinaryHeap<ScoredDocument>,
    k: usize,
    pub total_collected: usize,
    max_score: f32,
}

impl TopKCollector {
    pub fn new(k: usize) -> Self {
        TopKCollector {
            heap: BinaryHeap::with_capacity(k + 1),
            k,
            total_collected: 0,
            max_score: 0.0,
        }
    }

    pub fn collect(&mut self, hit: ScoredDocument) {
        self.total_collected += 1;
        if hit.score > self.max_score {
            self.max_score = hit.score;
        }

        if self.k == 0 {
            return;
        }
        if self.heap.len() < self.k {
            self.heap.push(hit);
            return;
        }
        // Heap top is the weakest retained hit.
        if let Some(weakest) = self.heap.peek() {
            if hit.ranks_above(weakest) {
                self.heap.push(hit);
                self.heap.pop();
            }
        }
    }

    pub fn max_score(&self) -> f32 {
        self.max_score
    }

    pub fn into_results(self) -> SearchResults {
        let total_hits = self.total_collected;
        let max_score = self.max_score;
        let mut hits: Vec<_> = self.heap.into_iter().collect();
        hits.sort();
        SearchResults {
            hits,
            total_hits,
            max_score,
        }
    }
}

/// Public search hit: stored fields snapshot plus the highlighted snippet.
/// Serializes in the shape the document-find surface returns.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub id: DocId,
    pub document: DocumentFields,
    pub score: f32,
    pub snipped_html: String,
}
