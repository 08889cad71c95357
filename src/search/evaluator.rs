use std::collections::BTreeMap;

use crate::core::error::Result;
use crate::core::types::DocId;
use crate::index::inverted::{InvertedIndex, Term};
use crate::query::ast::Query;
use crate::scoring::scorer::{CollectionStats, Scorer, TfIdfScorer};
use crate::search::results::{ScoredDocument, SearchResults, TopKCollector};
use crate::store::snapshot::Snapshot;

/// Executes a query tree against one snapshot. Stateless apart from the
/// scorer; results for a given (snapshot, query) pair are identical across
/// calls.
pub struct QueryEvaluator {
    scorer: Box<dyn Scorer>,
}

impl Default for QueryEvaluator {
    fn default() -> Self {
        QueryEvaluator::new()
    }
}

impl QueryEvaluator {
    pub fn new() -> Self {
        QueryEvaluator {
            scorer: Box::new(TfIdfScorer),
        }
    }

    /// Ranked candidates: score descending, doc_id ascending on ties,
    /// truncated to `limit`.
    pub fn evaluate(
        &self,
        query: &Query,
        snapshot: &Snapshot,
        limit: usize,
    ) -> Result<SearchResults> {
        let candidates = self.eval_node(query, snapshot.index());

        let mut collector = TopKCollector::new(limit);
        for (doc_id, score) in candidates {
            collector.collect(ScoredDocument { doc_id, score });
        }
        Ok(collector.into_results())
    }

    /// Candidate set for one node, doc_id -> accumulated score. BTreeMap
    /// keeps iteration order deterministic.
    fn eval_node(&self, query: &Query, index: &InvertedIndex) -> BTreeMap<DocId, f32> {
        match query {
            Query::Term(term) => self.eval_term(term, index),
            Query::Phrase(terms) => self.eval_phrase(terms, index),
            Query::And(children) => self.eval_and(children, index),
            Query::Or(children) => self.eval_or(children, index),
            Query::Not(child) => self.eval_not(child, index),
            Query::FieldMatch { field, value } => index
                .documents()
                .filter(|(_, doc)| doc.fields.get(*field) == Some(value.as_str()))
                .map(|(id, _)| (id, 0.0))
                .collect(),
            Query::MatchAll => index
                .live_docs()
                .iter()
                .map(|id| (DocId(id), 0.0))
                .collect(),
        }
    }

    fn eval_term(&self, term: &str, index: &InvertedIndex) -> BTreeMap<DocId, f32> {
        let Some(postings) = index.postings(&Term::new(term)) else {
            return BTreeMap::new();
        };
        let stats = CollectionStats {
            total_docs: index.doc_count(),
            doc_freq: postings.doc_freq(),
        };
        postings
            .iter()
            .map(|p| (p.doc_id, self.scorer.score(p, &stats)))
            .collect()
    }

    /// Documents whose position lists contain the terms contiguously and in
    /// order. Scored as the sum of the component term scores.
    fn eval_phrase(&self, terms: &[String], index: &InvertedIndex) -> BTreeMap<DocId, f32> {
        if terms.is_empty() {
            return BTreeMap::new();
        }

        let mut lists = Vec::with_capacity(terms.len());
        for term in terms {
            match index.postings(&Term::new(term)) {
                Some(list) => lists.push(list),
                None => return BTreeMap::new(),
            }
        }

        let stats: Vec<CollectionStats> = lists
            .iter()
            .map(|list| CollectionStats {
                total_docs: index.doc_count(),
                doc_freq: list.doc_freq(),
            })
            .collect();

        let mut matches = BTreeMap::new();
        // Candidate documents must carry every term.
        'docs: for first in lists[0].iter() {
            let doc_id = first.doc_id;
            let mut doc_postings = Vec::with_capacity(lists.len());
            doc_postings.push(first);
            for list in &lists[1..] {
                match list.get(doc_id) {
                    Some(posting) => doc_postings.push(posting),
                    None => continue 'docs,
                }
            }

            let adjacent = first.positions.iter().any(|&start| {
                doc_postings.iter().enumerate().skip(1).all(|(i, posting)| {
                    posting
                        .positions
                        .binary_search(&(start + i as u32))
                        .is_ok()
                })
            });
            if !adjacent {
                continue;
            }

            let score: f32 = doc_postings
                .iter()
                .zip(stats.iter())
                .map(|(posting, stats)| self.scorer.score(posting, stats))
                .sum();
            matches.insert(doc_id, score);
        }

        matches
    }

    /// Intersection of the children's candidate sets; scores sum, so
    /// multi-term matches rank above partial ones.
    fn eval_and(&self, children: &[Query], index: &InvertedIndex) -> BTreeMap<DocId, f32> {
        let mut iter = children.iter();
        let Some(first) = iter.next() else {
            return BTreeMap::new();
        };
        let mut result = self.eval_node(first, index);

        for child in iter {
            let child_set = self.eval_node(child, index);
            result = result
                .into_iter()
                .filter_map(|(doc_id, score)| {
                    child_set
                        .get(&doc_id)
                        .map(|child_score| (doc_id, score + child_score))
                })
                .collect();
            if result.is_empty() {
                break;
            }
        }
        result
    }

    /// Union; non-matching children contribute nothing to a document's score.
    fn eval_or(&self, children: &[Query], index: &InvertedIndex) -> BTreeMap<DocId, f32> {
        let mut result: BTreeMap<DocId, f32> = BTreeMap::new();
        for child in children {
            for (doc_id, score) in self.eval_node(child, index) {
                *result.entry(doc_id).or_insert(0.0) += score;
            }
        }
        result
    }

    /// Complement within the snapshot's live document set. Contributes no
    /// score.
    fn eval_not(&self, child: &Query, index: &InvertedIndex) -> BTreeMap<DocId, f32> {
        let excluded = self.eval_node(child, index);
        index
            .live_docs()
            .iter()
            .map(DocId)
            .filter(|doc_id| !excluded.contains_key(doc_id))
            .map(|doc_id| (doc_id, 0.0))
            .collect()
    }
}
