use std::collections::{BTreeMap, HashMap};

use roaring::RoaringBitmap;
use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::core::error::{Error, Result};
use crate::core::types::{DocId, StoredDocument};
use crate::index::posting::{Posting, PostingList};

/// Normalized term as it appears in the index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Term(String);

impl Term {
    pub fn new(text: &str) -> Self {
        Term(text.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The inverted index plus the stored documents it refers to. Keeping both
/// in one structure lets insertion enforce the no-orphans invariant: every
/// posting points at a stored document and every stored document has
/// postings for its terms.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: HashMap<Term, PostingList>,
    documents: BTreeMap<DocId, StoredDocument>,
    live_docs: RoaringBitmap,
    total_tokens: usize,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex::default()
    }

    /// Add one document: all its postings and its stored entry together.
    /// Fails with `IndexCorruption` if the doc_id is already present —
    /// callers assign ids exactly once, so this is unreachable under
    /// correct use.
    pub fn add_document(
        &mut self,
        doc_id: DocId,
        stored: StoredDocument,
        tokens: &[Token],
    ) -> Result<()> {
        if self.documents.contains_key(&doc_id) {
            return Err(Error::corruption(format!(
                "document {} already indexed",
                doc_id.0
            )));
        }

        let mut term_positions: HashMap<Term, Vec<u32>> = HashMap::new();
        for token in tokens {
            term_positions
                .entry(Term::new(&token.text))
                .or_default()
                .push(token.position);
        }

        for (term, positions) in term_positions {
            let posting = Posting {
                doc_id,
                term_freq: positions.len() as u32,
                positions,
            };

            let inserted = self
                .postings
                .entry(term)
                .or_insert_with(PostingList::new)
                .add_posting(posting);
            if !inserted {
                return Err(Error::corruption(format!(
                    "duplicate posting for document {}",
                    doc_id.0
                )));
            }
        }

        self.total_tokens += tokens.len();
        self.live_docs.insert(doc_id.0);
        self.documents.insert(doc_id, stored);

        Ok(())
    }

    pub fn postings(&self, term: &Term) -> Option<&PostingList> {
        self.postings.get(term)
    }

    pub fn document(&self, doc_id: DocId) -> Option<&StoredDocument> {
        self.documents.get(&doc_id)
    }

    /// All stored documents, ascending by doc_id.
    pub fn documents(&self) -> impl Iterator<Item = (DocId, &StoredDocument)> {
        self.documents.iter().map(|(id, doc)| (*id, doc))
    }

    pub fn live_docs(&self) -> &RoaringBitmap {
        &self.live_docs
    }

    pub fn doc_count(&self) -> usize {
        self.documents.len()
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn total_tokens(&self) -> usize {
        self.total_tokens
    }

    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.postings.keys()
    }

    /// Cross-check the no-orphans invariant. Used by tests and recovery.
    pub fn verify(&self) -> Result<()> {
        for (term, list) in &self.postings {
            for posting in list.iter() {
                if posting.term_freq == 0 {
                    return Err(Error::corruption(format!(
                        "zero-frequency posting for term {:?}",
                        term.as_str()
                    )));
                }
                if !self.documents.contains_key(&posting.doc_id) {
                    return Err(Error::corruption(format!(
                        "posting for term {:?} references unknown document {}",
                        term.as_str(),
                        posting.doc_id.0
                    )));
                }
            }
        }
        for (doc_id, _) in self.documents.iter() {
            if !self.live_docs.contains(doc_id.0) {
                return Err(Error::corruption(format!(
                    "document {} missing from live set",
                    doc_id.0
                )));
            }
        }
        Ok(())
    }
}
