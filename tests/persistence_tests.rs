use std::fs::OpenOptions;
use std::io::Write;

use docstash::core::types::{BlobId, DocumentRecord};
use docstash::{Config, IndexStore};
use tempfile::TempDir;

fn record(content: &str) -> DocumentRecord {
    DocumentRecord {
        blob_id: BlobId::generate(),
        mime: "text/plain".to_string(),
        title: Some("Persisted".to_string()),
        author: None,
        date: None,
        language: Some("en".to_string()),
        content: content.to_string(),
    }
}

#[test]
fn reopened_store_recovers_documents_and_ids() {
    let dir = TempDir::new().unwrap();

    let first_blob;
    {
        let store = IndexStore::open(Config::at_path(dir.path())).unwrap();
        let rec = record("durable alpha content");
        first_blob = rec.blob_id;
        assert_eq!(store.ingest(rec).unwrap().0, 0);
        assert_eq!(store.ingest(record("durable beta content")).unwrap().0, 1);
        assert_eq!(store.ingest(record("durable gamma content")).unwrap().0, 2);
    }

    let store = IndexStore::open(Config::at_path(dir.path())).unwrap();
    assert_eq!(store.stats().total_documents, 3);

    let hits = store.query("alpha").unwrap().hits;
    assert_eq!(hits.len(), 1);
    let stored = store.fetch(hits[0].doc_id).unwrap();
    assert_eq!(stored.fields.blob_id, first_blob);
    assert_eq!(stored.fields.title.as_deref(), Some("Persisted"));

    // Id assignment continues where it left off.
    assert_eq!(store.ingest(record("durable delta content")).unwrap().0, 3);
}

#[test]
fn in_memory_store_persists_nothing() {
    let store = IndexStore::open(Config::in_memory()).unwrap();
    store.ingest(record("ephemeral")).unwrap();
    drop(store);

    let store = IndexStore::open(Config::in_memory()).unwrap();
    assert_eq!(store.stats().total_documents, 0);
}

#[test]
fn torn_wal_tail_is_discarded_on_recovery() {
    let dir = TempDir::new().unwrap();

    {
        let store = IndexStore::open(Config::at_path(dir.path())).unwrap();
        store.ingest(record("intact one")).unwrap();
        store.ingest(record("intact two")).unwrap();
    }

    // Simulate a crash mid-append: garbage after the last intact frame.
    let wal_path = dir.path().join("wal").join("wal.log");
    let mut file = OpenOptions::new().append(true).open(&wal_path).unwrap();
    file.write_all(&[0x5a, 0x5a, 0x5a, 0x5a, 0x5a]).unwrap();
    file.sync_all().unwrap();
    drop(file);

    let store = IndexStore::open(Config::at_path(dir.path())).unwrap();
    assert_eq!(store.stats().total_documents, 2);
    assert_eq!(store.query("intact").unwrap().hits.len(), 2);

    // The log is clean again: new writes survive another reopen.
    store.ingest(record("post recovery")).unwrap();
    drop(store);

    let store = IndexStore::open(Config::at_path(dir.path())).unwrap();
    assert_eq!(store.stats().total_documents, 3);
    assert_eq!(store.query("recovery").unwrap().hits.len(), 1);
}

#[test]
fn corrupted_frame_hides_later_entries_but_keeps_earlier_ones() {
    let dir = TempDir::new().unwrap();

    {
        let store = IndexStore::open(Config::at_path(dir.path())).unwrap();
        store.ingest(record("kept entry")).unwrap();
    }

    let wal_path = dir.path().join("wal").join("wal.log");
    let len = std::fs::metadata(&wal_path).unwrap().len();

    {
        let store = IndexStore::open(Config::at_path(dir.path())).unwrap();
        store.ingest(record("flipped entry")).unwrap();
    }

    // Flip a byte inside the second frame's payload.
    let mut bytes = std::fs::read(&wal_path).unwrap();
    let target = len as usize + 9;
    bytes[target] ^= 0xff;
    std::fs::write(&wal_path, &bytes).unwrap();

    let store = IndexStore::open(Config::at_path(dir.path())).unwrap();
    assert_eq!(store.stats().total_documents, 1);
    assert_eq!(store.query("kept").unwrap().hits.len(), 1);
    assert!(store.query("flipped").unwrap().hits.is_empty());
}
