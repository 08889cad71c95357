use std::sync::Arc;

use tracing::{debug, info};

use crate::core::error::{Error, Result};
use crate::core::types::{DocId, DocumentFields, DocumentRecord};
use crate::repo::blob::BlobStore;
use crate::repo::extract::ContentExtractor;
use crate::search::highlight::Highlighter;
use crate::search::results::QueryResult;
use crate::store::index_store::IndexStore;

/// Sequential glue over the core: store the raw bytes, extract, ingest;
/// answer lookups and searches. One instance serves any number of
/// concurrent callers.
pub struct Repository {
    store: Arc<IndexStore>,
    extractor: Box<dyn ContentExtractor>,
    blobs: Box<dyn BlobStore>,
    highlighter: Highlighter,
}

/// A fetched document: the original bytes plus the stored metadata
/// (the MIME type callers serve the bytes with).
#[derive(Debug, Clone)]
pub struct GetResult {
    pub bytes: Vec<u8>,
    pub document: DocumentFields,
}

impl Repository {
    pub fn new(
        store: Arc<IndexStore>,
        extractor: Box<dyn ContentExtractor>,
        blobs: Box<dyn BlobStore>,
    ) -> Self {
        let highlighter = Highlighter::new(store.config().highlight.clone());
        Repository {
            store,
            extractor,
            blobs,
            highlighter,
        }
    }

    /// Upload pipeline: blob store, then extraction, then ingest. An
    /// extraction failure aborts before the index is touched.
    pub fn put(&self, bytes: &[u8]) -> Result<DocId> {
        let blob_id = self.blobs.store(bytes)?;
        let extracted = self.extractor.extract(bytes)?;

        let record = DocumentRecord {
            blob_id,
            mime: extracted.mime,
            title: extracted.title,
            author: extracted.author,
            date: extracted.date,
            language: extracted.language,
            content: extracted.content,
        };

        let doc_id = self.store.ingest(record)?;
        info!(doc_id = doc_id.0, bytes = bytes.len(), "document stored");
        Ok(doc_id)
    }

    /// Original bytes and stored fields for a previously ingested document.
    pub fn get(&self, doc_id: DocId) -> Result<GetResult> {
        let stored = self.store.fetch(doc_id)?;
        let bytes = self.blobs.retrieve(stored.fields.blob_id)?;
        Ok(GetResult {
            bytes,
            document: stored.fields,
        })
    }

    /// Parse, evaluate and highlight in one pass over a single snapshot,
    /// so the hits and their snippets always agree.
    pub fn find(&self, input: &str) -> Result<Vec<QueryResult>> {
        let query = self.store.parser().parse(input)?;
        let snapshot = self.store.snapshot();
        let results = self.store.evaluator().evaluate(
            &query,
            &snapshot,
            self.store.config().default_limit,
        )?;

        let terms = query.positive_terms();
        let mut out = Vec::with_capacity(results.hits.len());
        for hit in &results.hits {
            let stored = snapshot.index().document(hit.doc_id).ok_or_else(|| {
                Error::corruption(format!("hit for unknown document {}", hit.doc_id.0))
            })?;
            out.push(QueryResult {
                id: hit.doc_id,
                document: stored.fields.clone(),
                score: hit.score,
                snipped_html: self.highlighter.highlight(&terms, &stored.content),
            });
        }

        debug!(hits = out.len(), total = results.total_hits, "search served");
        Ok(out)
    }

    /// `find`, rendered as the JSON array the document-find surface emits.
    pub fn find_json(&self, input: &str) -> Result<String> {
        let results = self.find(input)?;
        serde_json::to_string(&results)
            .map_err(|e| Error::new(crate::core::error::ErrorKind::Parse, e.to_string()))
    }

    pub fn store(&self) -> &IndexStore {
        &self.store
    }
}
