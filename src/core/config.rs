use std::path::PathBuf;

use crate::storage::wal::SyncMode;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory for durable state. `None` runs fully in memory.
    pub storage_path: Option<PathBuf>,
    /// Result list cap when the caller does not pass one.
    pub default_limit: usize,
    pub sync_mode: SyncMode,
    pub highlight: HighlightConfig,
}

/// Snippet generation knobs.
#[derive(Debug, Clone)]
pub struct HighlightConfig {
    pub max_fragments: usize,
    /// Target fragment width in bytes around a hit.
    pub fragment_size: usize,
    pub pre_tag: String,
    pub post_tag: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_path: None,
            default_limit: 25,
            sync_mode: SyncMode::Immediate,
            highlight: HighlightConfig::default(),
        }
    }
}

impl Default for HighlightConfig {
    fn default() -> Self {
        HighlightConfig {
            max_fragments: 3,
            fragment_size: 150,
            pre_tag: "<b>".to_string(),
            post_tag: "</b>".to_string(),
        }
    }
}

impl Config {
    pub fn in_memory() -> Self {
        Config::default()
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Config {
            storage_path: Some(path.into()),
            ..Config::default()
        }
    }
}
