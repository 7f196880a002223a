//! Filesystem storage.
//!
//! JSONL files are the source of truth:
//! - Battle events (kills, blessings) under `battles/`
//! - Roster entries (persons, groups) under `roster/`

mod jsonl;

pub use jsonl::{dedup_by_id, EntityType, JsonlReader, JsonlWriter};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn battles_dir(&self) -> PathBuf {
        self.data_dir.join("battles")
    }

    pub fn roster_dir(&self) -> PathBuf {
        self.data_dir.join("roster")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
