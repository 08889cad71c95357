use std::sync::Arc;

use docstash::core::error::ErrorKind;
use docstash::core::types::DocId;
use docstash::repo::blob::{BlobStore, FsBlobStore, MemoryBlobStore};
use docstash::repo::extract::{ContentExtractor, PlainTextExtractor};
use docstash::{Config, IndexStore, Repository};
use tempfile::TempDir;

fn memory_repository() -> Repository {
    let store = Arc::new(IndexStore::open_in_memory().unwrap());
    Repository::new(
        store,
        Box::new(PlainTextExtractor),
        Box::new(MemoryBlobStore::new()),
    )
}

#[test]
fn put_then_get_round_trips_bytes_and_mime() {
    let repo = memory_repository();
    let bytes = b"Annual Report\n\nRevenue grew in every quarter.";

    let doc_id = repo.put(bytes).unwrap();
    let result = repo.get(doc_id).unwrap();

    assert_eq!(result.bytes, bytes);
    assert_eq!(result.document.mime, "text/plain");
    assert_eq!(result.document.title.as_deref(), Some("Annual Report"));
}

#[test]
fn put_then_find_returns_highlighted_hit() {
    let repo = memory_repository();
    repo.put(b"The quick brown fox jumps over the lazy dog")
        .unwrap();
    repo.put(b"An entirely unrelated note about pelicans").unwrap();

    let results = repo.find("fox").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, DocId(0));
    assert!(results[0].snipped_html.contains("<b>fox</b>"));
    assert!(results[0].score > 0.0);
}

#[test]
fn find_with_empty_query_lists_everything() {
    let repo = memory_repository();
    repo.put(b"first document").unwrap();
    repo.put(b"second document").unwrap();

    let results = repo.find("").unwrap();
    assert_eq!(results.len(), 2);
    // MatchAll carries no terms, so there is nothing to highlight.
    assert!(results.iter().all(|r| r.snipped_html.is_empty()));
}

#[test]
fn find_json_has_the_expected_shape() {
    let repo = memory_repository();
    repo.put(b"searchable content body").unwrap();

    let json = repo.find_json("searchable").unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let array = value.as_array().unwrap();
    assert_eq!(array.len(), 1);
    let hit = &array[0];
    assert_eq!(hit["id"], 0);
    assert_eq!(hit["document"]["mime"], "text/plain");
    assert!(hit["score"].as_f64().unwrap() > 0.0);
    assert!(hit["snipped_html"]
        .as_str()
        .unwrap()
        .contains("<b>searchable</b>"));
}

#[test]
fn undecodable_bytes_fail_and_leave_index_empty() {
    let repo = memory_repository();

    let err = repo.put(&[0xff, 0xfe, 0x00, 0x80]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnsupportedFormat);
    assert_eq!(repo.store().stats().total_documents, 0);
    assert!(repo.find("anything").unwrap().is_empty());
}

#[test]
fn get_unknown_document_is_not_found() {
    let repo = memory_repository();
    let err = repo.get(DocId(9)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[test]
fn malformed_query_propagates_offset() {
    let repo = memory_repository();
    let err = repo.find("foo AND").unwrap_err();
    assert_eq!(err.offset(), Some(4));
}

#[test]
fn fs_blob_store_round_trips_uploads() {
    let dir = TempDir::new().unwrap();
    let blobs = FsBlobStore::new(dir.path().join("upload")).unwrap();

    let id = blobs.store(b"raw binary payload").unwrap();
    assert_eq!(blobs.retrieve(id).unwrap(), b"raw binary payload");

    let missing = docstash::BlobId::generate();
    assert_eq!(
        blobs.retrieve(missing).unwrap_err().kind,
        ErrorKind::NotFound
    );
}

#[test]
fn repository_over_durable_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let blob_dir = dir.path().join("upload");
    let index_dir = dir.path().join("index");

    {
        let store = Arc::new(IndexStore::open(Config::at_path(&index_dir)).unwrap());
        let repo = Repository::new(
            store,
            Box::new(PlainTextExtractor),
            Box::new(FsBlobStore::new(&blob_dir).unwrap()),
        );
        repo.put(b"durable searchable upload").unwrap();
    }

    let store = Arc::new(IndexStore::open(Config::at_path(&index_dir)).unwrap());
    let repo = Repository::new(
        store,
        Box::new(PlainTextExtractor),
        Box::new(FsBlobStore::new(&blob_dir).unwrap()),
    );

    let results = repo.find("durable").unwrap();
    assert_eq!(results.len(), 1);
    let fetched = repo.get(results[0].id).unwrap();
    assert_eq!(fetched.bytes, b"durable searchable upload");
}

#[test]
fn custom_extractor_plugs_in() {
    struct UppercaseExtractor;

    impl ContentExtractor for UppercaseExtractor {
        fn extract(&self, bytes: &[u8]) -> docstash::Result<docstash::repo::extract::ExtractedContent> {
            let inner = PlainTextExtractor.extract(bytes)?;
            Ok(docstash::repo::extract::ExtractedContent {
                content: inner.content.to_uppercase(),
                ..inner
            })
        }
    }

    let store = Arc::new(IndexStore::open_in_memory().unwrap());
    let repo = Repository::new(
        store,
        Box::new(UppercaseExtractor),
        Box::new(MemoryBlobStore::new()),
    );

    repo.put(b"shouting text").unwrap();
    // Indexing normalizes case again, so the document is still findable.
    assert_eq!(repo.find("shouting").unwrap().len(), 1);
}
