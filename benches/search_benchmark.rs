use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use docstash::core::types::{BlobId, DocumentRecord};
use docstash::IndexStore;
use rand::Rng;

/// Random prose over a small vocabulary, so terms repeat across documents.
fn synthetic_record(word_count: usize) -> DocumentRecord {
    let mut rng = rand::thread_rng();
    let words = [
        "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "report", "index",
        "search", "document", "archive", "pelican", "quarterly",
    ];
    let content = (0..word_count)
        .map(|_| words[rng.gen_range(0..words.len())])
        .collect::<Vec<_>>()
        .join(" ");

    DocumentRecord {
        blob_id: BlobId::generate(),
        mime: "text/plain".to_string(),
        title: Some("Synthetic".to_string()),
        author: None,
        date: None,
        language: Some("en".to_string()),
        content,
    }
}

fn populated_store(docs: usize) -> IndexStore {
    let store = IndexStore::open_in_memory().unwrap();
    for _ in 0..docs {
        store.ingest(synthetic_record(100)).unwrap();
    }
    store
}

fn bench_ingest(c: &mut Criterion) {
    c.bench_function("ingest_single_document", |b| {
        let store = IndexStore::open_in_memory().unwrap();
        b.iter(|| {
            store.ingest(black_box(synthetic_record(100))).unwrap();
        });
    });
}

fn bench_term_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("term_query");
    for docs in [100, 1000].iter() {
        let store = populated_store(*docs);
        group.bench_with_input(BenchmarkId::from_parameter(docs), docs, |b, _| {
            b.iter(|| black_box(store.query("fox").unwrap()));
        });
    }
    group.finish();
}

fn bench_boolean_query(c: &mut Criterion) {
    let store = populated_store(1000);
    c.bench_function("boolean_query_1000_docs", |b| {
        b.iter(|| black_box(store.query("fox AND dog OR pelican").unwrap()));
    });
}

fn bench_phrase_query(c: &mut Criterion) {
    let store = populated_store(1000);
    c.bench_function("phrase_query_1000_docs", |b| {
        b.iter(|| black_box(store.query("\"quick brown\"").unwrap()));
    });
}

criterion_group!(
    benches,
    bench_ingest,
    bench_term_query,
    bench_boolean_query,
    bench_phrase_query
);
criterion_main!(benches);
