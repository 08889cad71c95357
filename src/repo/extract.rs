use crate::core::error::{Error, ErrorKind, Result};

/// What extraction produces from raw bytes: plain text plus whatever
/// metadata the format carries.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedContent {
    pub mime: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub language: Option<String>,
    pub content: String,
}

/// Converts an uploaded blob into text and metadata. The index never sees
/// raw bytes; this is the seam where format support plugs in.
pub trait ContentExtractor: Send + Sync {
    /// Fails with `UnsupportedFormat` when the bytes are not a format this
    /// extractor understands, `Extraction` when they are but parsing dies.
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedContent>;
}

/// Extractor for UTF-8 text documents. The first non-empty line doubles as
/// the title when it is reasonably short.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

const MAX_TITLE_LEN: usize = 120;

impl ContentExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedContent> {
        let content = std::str::from_utf8(bytes).map_err(|_| {
            Error::new(
                ErrorKind::UnsupportedFormat,
                "document is not valid UTF-8 text",
            )
        })?;

        let title = content
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .filter(|line| line.len() <= MAX_TITLE_LEN)
            .map(str::to_string);

        Ok(ExtractedContent {
            mime: "text/plain".to_string(),
            title,
            author: None,
            date: None,
            language: None,
            content: content.to_string(),
        })
    }
}
