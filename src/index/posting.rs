use serde::{Deserialize, Serialize};

use crate::core::types::DocId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    /// Occurrences of the term in the document. Always >= 1.
    pub term_freq: u32,
    /// Word positions, ascending. Drives phrase adjacency and stats.
    pub positions: Vec<u32>,
}

/// Posting list for a term, sorted by doc_id for efficient merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostingList {
    pub postings: Vec<Posting>,
}

impl PostingList {
    pub fn new() -> Self {
        PostingList {
            postings: Vec::new(),
        }
    }

    /// Insert keeping doc_id order. Returns false if the document already
    /// has an entry in this list (at most one entry per doc_id).
    pub fn add_posting(&mut self, posting: Posting) -> bool {
        match self
            .postings
            .binary_search_by_key(&posting.doc_id.0, |p| p.doc_id.0)
        {
            Ok(_) => false,
            Err(pos) => {
                self.postings.insert(pos, posting);
                true
            }
        }
    }

    pub fn get(&self, doc_id: DocId) -> Option<&Posting> {
        self.postings
            .binary_search_by_key(&doc_id.0, |p| p.doc_id.0)
            .ok()
            .map(|pos| &self.postings[pos])
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn doc_freq(&self) -> u32 {
        self.postings.len() as u32
    }

    pub fn total_freq(&self) -> u64 {
        self.postings.iter().map(|p| p.term_freq as u64).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Posting> {
        self.postings.iter()
    }
}
