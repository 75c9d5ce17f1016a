//! Error types for Code Vista storage.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the storage layer.
///
/// Only [`StoreError::CreateDir`], [`StoreError::NoConfigDir`] and
/// [`StoreError::Config`] ever reach callers of the defaulting API; the rest
/// are recovered inside `load_data`/`save_data` and reported to the
/// diagnostic sink.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not create storage directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no per-user config directory is available on this platform")]
    NoConfigDir,

    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed storage document {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage document {} has unsupported version {version}", path.display())]
    UnsupportedVersion { path: PathBuf, version: u32 },

    #[error("could not serialize {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config error: {0}")]
    Config(String),
}

impl StoreError {
    /// True for failures that mean the document on disk could not be trusted.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            StoreError::Malformed { .. } | StoreError::UnsupportedVersion { .. }
        )
    }
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;
