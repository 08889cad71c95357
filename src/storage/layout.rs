use std::fs;
use std::path::PathBuf;

use crate::core::error::Result;

/// Directory structure for durable state.
#[derive(Debug, Clone)]
pub struct StorageLayout {
    pub base_dir: PathBuf,
    pub wal_dir: PathBuf,
}

impl StorageLayout {
    pub fn new(base_dir: PathBuf) -> Result<Self> {
        let wal_dir = base_dir.join("wal");
        fs::create_dir_all(&wal_dir)?;

        Ok(StorageLayout { base_dir, wal_dir })
    }

    pub fn wal_path(&self) -> PathBuf {
        self.wal_dir.join("wal.log")
    }
}
