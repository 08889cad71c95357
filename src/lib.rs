pub mod analysis;
pub mod core;
pub mod index;
pub mod query;
pub mod repo;
pub mod scoring;
pub mod search;
pub mod storage;
pub mod store;
pub mod writer;

/*
┌──────────────────────────────────────────────────────────────────────┐
│                        DOCSTASH ARCHITECTURE                         │
└──────────────────────────────────────────────────────────────────────┘

  WRITE PATH
    bytes ──▶ ContentExtractor ──▶ DocumentRecord
                                        │
                                        ▼
    Repository::put ──▶ IndexStore::ingest ──▶ Mutex<Indexer>
                                                   │  tokenize, clone
                                                   │  index, append WAL
                                                   ▼
                                        publish Arc<Snapshot> ──▶ readers

  READ PATH
    query string ──▶ QueryParser ──▶ Query tree
                                        │
                                        ▼
    Snapshot (Arc clone, immutable) ──▶ QueryEvaluator ──▶ ranked hits
                                        │
                                        ▼
            Highlighter over stored content ──▶ QueryResult + snippet

  Writers are serialized; readers are unlimited and never block them.
  A snapshot taken before an ingest never observes it.
*/

pub use crate::core::config::Config;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::types::{BlobId, DocId, DocumentRecord};
pub use crate::repo::repository::Repository;
pub use crate::store::index_store::IndexStore;
