use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Internal document id. Dense, assigned once at ingest, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub u32);

impl DocId {
    pub fn new(id: u32) -> Self {
        DocId(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

/// Opaque handle into the blob store, minted when the raw bytes are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlobId(pub Uuid);

impl BlobId {
    pub fn generate() -> Self {
        BlobId(Uuid::new_v4())
    }
}

/// The closed set of metadata fields a query may filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Mime,
    Title,
    Author,
    Date,
    Language,
}

impl FieldKind {
    /// Field name as it appears in `field:value` query syntax.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mime" => Some(FieldKind::Mime),
            "title" => Some(FieldKind::Title),
            "author" => Some(FieldKind::Author),
            "date" => Some(FieldKind::Date),
            "lang" | "language" => Some(FieldKind::Language),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Mime => "mime",
            FieldKind::Title => "title",
            FieldKind::Author => "author",
            FieldKind::Date => "date",
            FieldKind::Language => "lang",
        }
    }
}

/// Extracted document handed to ingestion. Produced once by the extraction
/// collaborator, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub blob_id: BlobId,
    pub mime: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub language: Option<String>,
    pub content: String,
}

/// Metadata stored per document, returned with every search hit and fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFields {
    pub blob_id: BlobId,
    pub mime: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub language: Option<String>,
}

impl DocumentFields {
    pub fn get(&self, field: FieldKind) -> Option<&str> {
        match field {
            FieldKind::Mime => Some(self.mime.as_str()),
            FieldKind::Title => self.title.as_deref(),
            FieldKind::Author => self.author.as_deref(),
            FieldKind::Date => self.date.as_deref(),
            FieldKind::Language => self.language.as_deref(),
        }
    }
}

/// Per-document entry stored inside the index: display metadata plus the
/// extracted text the highlighter reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    pub fields: DocumentFields,
    pub content: String,
    pub token_count: usize,
}

impl DocumentRecord {
    pub fn split(self) -> (DocumentFields, String) {
        let DocumentRecord {
            blob_id,
            mime,
            title,
            author,
            date,
            language,
            content,
        } = self;
        (
            DocumentFields {
                blob_id,
                mime,
                title,
                author,
                date,
                language,
            },
            content,
        )
    }
}
