use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use crate::analysis::tokenizer::StandardTokenizer;
use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::core::stats::IndexStats;
use crate::core::types::{DocId, DocumentRecord, StoredDocument};
use crate::index::inverted::InvertedIndex;
use crate::query::parser::QueryParser;
use crate::search::evaluator::QueryEvaluator;
use crate::search::results::SearchResults;
use crate::storage::layout::StorageLayout;
use crate::storage::wal::Wal;
use crate::store::snapshot::Snapshot;
use crate::writer::indexer::Indexer;

/// Owner of all index state for the process lifetime.
///
/// Writes are serialized: one `Indexer` behind a mutex builds the next
/// index state and appends to the log, then the store swaps the published
/// snapshot pointer. Reads are lock-free beyond that pointer: every reader
/// clones the current `Arc<Snapshot>` and works on it for as long as it
/// likes, unaffected by later ingests.
pub struct IndexStore {
    current: RwLock<Arc<Snapshot>>,
    writer: Mutex<Indexer>,
    version: AtomicU64,
    parser: QueryParser,
    evaluator: QueryEvaluator,
    config: Config,
}

impl IndexStore {
    /// Open the store. With a storage path the write-ahead log is replayed
    /// first, so previously ingested documents are searchable again and id
    /// assignment continues where it left off.
    pub fn open(config: Config) -> Result<Self> {
        let (wal, recovered) = match &config.storage_path {
            Some(path) => {
                let layout = StorageLayout::new(path.clone())?;
                let mut wal = Wal::open(&layout, config.sync_mode)?;
                let entries = wal.read_entries()?;
                (Some(wal), entries)
            }
            None => (None, Vec::new()),
        };

        let mut indexer = Indexer::new(Box::new(StandardTokenizer::default()), wal);
        let mut index = InvertedIndex::new();
        let recovered_count = recovered.len();
        for entry in recovered {
            indexer.replay(&mut index, entry)?;
        }
        index.verify()?;
        if recovered_count > 0 {
            info!(documents = recovered_count, "index recovered from write-ahead log");
        }

        Ok(IndexStore {
            current: RwLock::new(Arc::new(Snapshot::new(0, Arc::new(index)))),
            writer: Mutex::new(indexer),
            version: AtomicU64::new(0),
            parser: QueryParser::new(),
            evaluator: QueryEvaluator::new(),
            config,
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        IndexStore::open(Config::in_memory())
    }

    /// Ingest one extracted record. Atomic from any reader's point of view:
    /// the document's postings and stored fields become visible together,
    /// in the snapshot published here, or not at all.
    pub fn ingest(&self, record: DocumentRecord) -> Result<DocId> {
        let mut writer = self.writer.lock();

        // The writer mutex is held, so the published snapshot cannot move
        // underneath us between this read and the publication below.
        let base = self.current.read().clone();
        let (index, doc_id) = writer.ingest(base.index(), record)?;

        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = Arc::new(Snapshot::new(version, Arc::new(index)));
        *self.current.write() = snapshot;

        debug!(doc_id = doc_id.0, version, "snapshot published");
        Ok(doc_id)
    }

    /// Point-in-time view for reads. Cheap: clones an Arc.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.read().clone()
    }

    /// Parse and evaluate a query string against the current snapshot,
    /// with the configured result cap.
    pub fn query(&self, input: &str) -> Result<SearchResults> {
        self.query_with_limit(input, self.config.default_limit)
    }

    pub fn query_with_limit(&self, input: &str, limit: usize) -> Result<SearchResults> {
        let query = self.parser.parse(input)?;
        self.evaluator.evaluate(&query, &self.snapshot(), limit)
    }

    /// Stored entry for a document, or `NotFound`.
    pub fn fetch(&self, doc_id: DocId) -> Result<StoredDocument> {
        self.snapshot()
            .index()
            .document(doc_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("document {}", doc_id.0)))
    }

    pub fn stats(&self) -> IndexStats {
        self.snapshot().stats()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn parser(&self) -> &QueryParser {
        &self.parser
    }

    pub fn evaluator(&self) -> &QueryEvaluator {
        &self.evaluator
    }
}
