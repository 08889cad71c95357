use std::collections::HashSet;

use regex::RegexBuilder;

use crate::core::config::HighlightConfig;

/// One candidate excerpt: a byte window over the content plus the term
/// occurrences inside it.
struct Fragment {
    start: usize,
    end: usize,
    distinct_terms: usize,
    occurrences: Vec<(usize, usize)>,
}

/// Selects and marks the best content excerpts for a set of query terms.
///
/// Candidate fragments are windows of roughly `fragment_size` bytes around
/// occurrence clusters, ranked by distinct matched terms, then total
/// occurrences, then position. The best `max_fragments` are rendered in
/// document order, matches wrapped in the configured tags, fragments joined
/// by `" ... "`.
pub struct Highlighter {
    config: HighlightConfig,
}

impl Default for Highlighter {
    fn default() -> Self {
        Highlighter::new(HighlightConfig::default())
    }
}

impl Highlighter {
    pub fn new(config: HighlightConfig) -> Self {
        Highlighter { config }
    }

    /// Empty string when no term occurs in `content` — a non-match is not
    /// an error here, the caller already decided the document is relevant.
    pub fn highlight(&self, terms: &[String], content: &str) -> String {
        if terms.is_empty() || content.is_empty() {
            return String::new();
        }

        let occurrences = self.find_occurrences(terms, content);
        if occurrences.is_empty() {
            return String::new();
        }

        let mut fragments = self.collect_fragments(content, &occurrences);
        fragments.sort_by(|a, b| {
            b.distinct_terms
                .cmp(&a.distinct_terms)
                .then(b.occurrences.len().cmp(&a.occurrences.len()))
                .then(a.start.cmp(&b.start))
        });
        fragments.truncate(self.config.max_fragments);
        fragments.sort_by_key(|f| f.start);

        let rendered: Vec<String> = fragments
            .iter()
            .map(|f| self.render(content, f))
            .collect();
        rendered.join(" ... ")
    }

    /// Case-insensitive whole-word occurrences of any term, in order.
    /// Returns (start, end, matched text lowercased).
    fn find_occurrences(&self, terms: &[String], content: &str) -> Vec<(usize, usize, String)> {
        let alternation = terms
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"\b({})\b", alternation);
        let Ok(matcher) = RegexBuilder::new(&pattern).case_insensitive(true).build() else {
            return Vec::new();
        };

        matcher
            .find_iter(content)
            .map(|m| (m.start(), m.end(), m.as_str().to_lowercase()))
            .collect()
    }

    /// Non-overlapping windows, each anchored a little before its first
    /// occurrence and swallowing every occurrence that fits.
    fn collect_fragments(
        &self,
        content: &str,
        occurrences: &[(usize, usize, String)],
    ) -> Vec<Fragment> {
        let size = self.config.fragment_size.max(1);
        let mut fragments = Vec::new();
        let mut i = 0;

        while i < occurrences.len() {
            let first_start = occurrences[i].0;
            let lead = size / 3;
            let start = prev_boundary(content, first_start.saturating_sub(lead));
            let window_end = first_start.saturating_add(size - lead);

            let mut end = first_start;
            let mut spans = Vec::new();
            let mut distinct = HashSet::new();
            while i < occurrences.len() && occurrences[i].0 < window_end {
                let (s, e, ref text) = occurrences[i];
                spans.push((s, e));
                distinct.insert(text.clone());
                end = e;
                i += 1;
            }

            let end = next_boundary(content, end.max(window_end.min(content.len())));
            fragments.push(Fragment {
                start,
                end,
                distinct_terms: distinct.len(),
                occurrences: spans,
            });
        }

        fragments
    }

    fn render(&self, content: &str, fragment: &Fragment) -> String {
        let mut out = String::with_capacity(fragment.end - fragment.start + 32);
        let mut cursor = fragment.start;
        for &(start, end) in &fragment.occurrences {
            out.push_str(&content[cursor..start]);
            out.push_str(&self.config.pre_tag);
            out.push_str(&content[start..end]);
            out.push_str(&self.config.post_tag);
            cursor = end;
        }
        out.push_str(&content[cursor..fragment.end]);
        out.trim().to_string()
    }
}

fn prev_boundary(content: &str, mut i: usize) -> usize {
    while i > 0 && !content.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn next_boundary(content: &str, mut i: usize) -> usize {
    let len = content.len();
    if i >= len {
        return len;
    }
    while i < len && !content.is_char_boundary(i) {
        i += 1;
    }
    i
}
