use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::Token;

/// Splits text into normalized terms. The same tokenizer instance is used
/// for indexing and for free-text query terms, so normalization always
/// agrees between the two paths.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    fn name(&self) -> &str;
}

/// Unicode word-boundary tokenizer: lowercases every word and drops
/// punctuation. Deterministic and stateless.
#[derive(Debug, Clone)]
pub struct StandardTokenizer {
    pub max_token_length: usize,
}

impl Default for StandardTokenizer {
    fn default() -> Self {
        StandardTokenizer {
            max_token_length: 255,
        }
    }
}

impl Tokenizer for StandardTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut position = 0u32;

        for (offset, word) in text.unicode_word_indices() {
            if word.len() > self.max_token_length {
                continue;
            }
            tokens.push(Token::new(word.to_lowercase(), position, offset));
            position += 1;
        }

        tokens
    }

    fn name(&self) -> &str {
        "standard"
    }
}
