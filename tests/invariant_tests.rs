use docstash::analysis::tokenizer::{StandardTokenizer, Tokenizer};
use docstash::core::error::ErrorKind;
use docstash::core::types::{BlobId, DocId, DocumentFields, DocumentRecord, StoredDocument};
use docstash::index::inverted::{InvertedIndex, Term};
use docstash::IndexStore;

fn fields() -> DocumentFields {
    DocumentFields {
        blob_id: BlobId::generate(),
        mime: "text/plain".to_string(),
        title: Some("A title".to_string()),
        author: Some("An author".to_string()),
        date: None,
        language: Some("en".to_string()),
    }
}

fn stored(content: &str, token_count: usize) -> StoredDocument {
    StoredDocument {
        fields: fields(),
        content: content.to_string(),
        token_count,
    }
}

fn record(content: &str) -> DocumentRecord {
    DocumentRecord {
        blob_id: BlobId::generate(),
        mime: "text/plain".to_string(),
        title: Some("A title".to_string()),
        author: Some("An author".to_string()),
        date: Some("2024-03-01".to_string()),
        language: Some("en".to_string()),
        content: content.to_string(),
    }
}

#[test]
fn tokenizer_lowercases_and_strips_punctuation() {
    let tokenizer = StandardTokenizer::default();
    let tokens = tokenizer.tokenize("The QUICK, brown... Fox!");

    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["the", "quick", "brown", "fox"]);

    let positions: Vec<u32> = tokens.iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![0, 1, 2, 3]);
}

#[test]
fn tokenizer_is_deterministic() {
    let tokenizer = StandardTokenizer::default();
    assert_eq!(
        tokenizer.tokenize("Sphinx of black quartz"),
        tokenizer.tokenize("Sphinx of black quartz")
    );
}

#[test]
fn tokenizer_records_byte_offsets() {
    let tokenizer = StandardTokenizer::default();
    let text = "one  two";
    let tokens = tokenizer.tokenize(text);
    assert_eq!(tokens[0].offset, 0);
    assert_eq!(tokens[1].offset, 5);
    assert_eq!(&text[tokens[1].offset..tokens[1].offset + 3], "two");
}

#[test]
fn postings_record_frequency_and_positions() {
    let tokenizer = StandardTokenizer::default();
    let mut index = InvertedIndex::new();
    let text = "rose is a rose is a rose";
    let tokens = tokenizer.tokenize(text);
    index
        .add_document(DocId(0), stored(text, tokens.len()), &tokens)
        .unwrap();

    let postings = index.postings(&Term::new("rose")).unwrap();
    assert_eq!(postings.doc_freq(), 1);
    let posting = postings.get(DocId(0)).unwrap();
    assert_eq!(posting.term_freq, 3);
    assert_eq!(posting.positions, vec![0, 3, 6]);
}

#[test]
fn posting_lists_stay_sorted_by_doc_id() {
    let tokenizer = StandardTokenizer::default();
    let mut index = InvertedIndex::new();
    for id in 0..10u32 {
        let tokens = tokenizer.tokenize("common term");
        index
            .add_document(DocId(id), stored("common term", tokens.len()), &tokens)
            .unwrap();
    }

    let postings = index.postings(&Term::new("common")).unwrap();
    let ids: Vec<u32> = postings.iter().map(|p| p.doc_id.0).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert_eq!(postings.doc_freq(), 10);
}

#[test]
fn duplicate_doc_id_is_corruption() {
    let tokenizer = StandardTokenizer::default();
    let mut index = InvertedIndex::new();
    let tokens = tokenizer.tokenize("once");
    index
        .add_document(DocId(7), stored("once", tokens.len()), &tokens)
        .unwrap();

    let err = index
        .add_document(DocId(7), stored("twice", 1), &tokenizer.tokenize("twice"))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::IndexCorruption);
}

#[test]
fn index_passes_its_own_invariant_check() {
    let tokenizer = StandardTokenizer::default();
    let mut index = InvertedIndex::new();
    for (id, text) in ["alpha beta", "beta gamma", "gamma alpha"].iter().enumerate() {
        let tokens = tokenizer.tokenize(text);
        index
            .add_document(DocId(id as u32), stored(text, tokens.len()), &tokens)
            .unwrap();
    }
    index.verify().unwrap();
    assert_eq!(index.doc_count(), 3);
    assert_eq!(index.live_docs().len(), 3);
}

#[test]
fn ingest_assigns_dense_increasing_ids() {
    let store = IndexStore::open_in_memory().unwrap();
    let ids: Vec<u32> = (0..5)
        .map(|_| store.ingest(record("some words")).unwrap().0)
        .collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
}

#[test]
fn fetch_round_trips_stored_fields() {
    let store = IndexStore::open_in_memory().unwrap();
    let rec = record("round trip body");
    let doc_id = store.ingest(rec.clone()).unwrap();

    let stored = store.fetch(doc_id).unwrap();
    assert_eq!(stored.fields.blob_id, rec.blob_id);
    assert_eq!(stored.fields.mime, rec.mime);
    assert_eq!(stored.fields.title, rec.title);
    assert_eq!(stored.fields.author, rec.author);
    assert_eq!(stored.fields.date, rec.date);
    assert_eq!(stored.fields.language, rec.language);
    assert_eq!(stored.content, rec.content);

    // and any of its terms finds it
    let hits = store.query("trip").unwrap().hits;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].doc_id, doc_id);
}

#[test]
fn fetch_unknown_id_is_not_found() {
    let store = IndexStore::open_in_memory().unwrap();
    let err = store.fetch(DocId(42)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[test]
fn stats_track_index_growth() {
    let store = IndexStore::open_in_memory().unwrap();
    assert_eq!(store.stats().total_documents, 0);

    store.ingest(record("one two three")).unwrap();
    store.ingest(record("four five")).unwrap();

    let stats = store.stats();
    assert_eq!(stats.total_documents, 2);
    assert_eq!(stats.total_tokens, 5);
    assert!(stats.total_terms >= 5);
    assert_eq!(stats.snapshot_version, 2);
}
