use serde::{Deserialize, Serialize};

/// Normalized term with its location in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// Word index in the document, used for phrase adjacency.
    pub position: u32,
    /// Byte offset of the word in the original text.
    pub offset: usize,
}

impl Token {
    pub fn new(text: String, position: u32, offset: usize) -> Self {
        Token {
            text,
            position,
            offset,
        }
    }
}
