/// Walk-through of the document repository:
/// - upload documents (blob store + extraction + indexing)
/// - keyword, boolean, phrase and field searches with snippets
/// - fetching original bytes back by id
/// - index statistics

use std::sync::Arc;

use docstash::repo::blob::MemoryBlobStore;
use docstash::repo::extract::PlainTextExtractor;
use docstash::{IndexStore, Repository};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docstash=debug".into()),
        )
        .init();

    println!("Opening an in-memory store...");
    let store = Arc::new(IndexStore::open_in_memory()?);
    let repo = Repository::new(
        store,
        Box::new(PlainTextExtractor),
        Box::new(MemoryBlobStore::new()),
    );

    println!("\nUploading documents...");
    let uploads: [&[u8]; 3] = [
        b"Rust in Production\n\nHow teams ship reliable systems software with Rust.",
        b"Database Internals\n\nWrite-ahead logs, snapshots and inverted indexes explained.",
        b"Field Notes\n\nA quick note about pelicans, foxes and other animals.",
    ];
    for bytes in uploads {
        let id = repo.put(bytes)?;
        println!("  stored document {}", id.0);
    }

    println!("\nSearching...");
    for query in ["rust", "snapshots OR pelicans", "\"write ahead\"", "NOT rust"] {
        let results = repo.find(query)?;
        println!("  {:28} -> {} hit(s)", format!("{:?}", query), results.len());
        for result in &results {
            println!(
                "      [{}] {:>5.2}  {}",
                result.id.0, result.score, result.snipped_html
            );
        }
    }

    println!("\nMalformed queries report where they broke:");
    match repo.find("foo AND") {
        Err(e) => println!("  {}", e),
        Ok(_) => unreachable!(),
    }

    println!("\nFetching a document back...");
    let first = repo.find("rust")?.remove(0);
    let fetched = repo.get(first.id)?;
    println!(
        "  {} bytes, mime {}, title {:?}",
        fetched.bytes.len(),
        fetched.document.mime,
        fetched.document.title
    );

    let stats = repo.store().stats();
    println!(
        "\nIndex stats: {} documents, {} distinct terms, {} tokens",
        stats.total_documents, stats.total_terms, stats.total_tokens
    );

    Ok(())
}
