use serde::{Deserialize, Serialize};

use crate::core::types::FieldKind;

/// Parsed query tree. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Query {
    /// Single normalized term against document content.
    Term(String),
    /// Terms that must appear contiguously, in order.
    Phrase(Vec<String>),
    And(Vec<Query>),
    Or(Vec<Query>),
    Not(Box<Query>),
    /// Exact-match filter on a stored metadata field. Contributes no score.
    FieldMatch { field: FieldKind, value: String },
    /// Every indexed document. What an empty query parses to.
    MatchAll,
}

impl Query {
    /// Content terms that positively select documents — Term and Phrase
    /// leaves outside any `Not`. These are what the highlighter marks.
    pub fn positive_terms(&self) -> Vec<String> {
        let mut terms = Vec::new();
        self.collect_positive_terms(&mut terms);
        terms.dedup();
        terms
    }

    fn collect_positive_terms(&self, out: &mut Vec<String>) {
        match self {
            Query::Term(t) => out.push(t.clone()),
            Query::Phrase(terms) => out.extend(terms.iter().cloned()),
            Query::And(children) | Query::Or(children) => {
                for child in children {
                    child.collect_positive_terms(out);
                }
            }
            Query::Not(_) | Query::FieldMatch { .. } | Query::MatchAll => {}
        }
    }
}
