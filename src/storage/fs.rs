//! Storage directory handling.
//!
//! Owns the resolved directory and the paths inside it. Document I/O lives
//! in `store.rs`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, StoreError};

/// File name of the document inside the storage directory.
pub const STORAGE_FILE: &str = "storage.json";

/// A storage directory that is known to exist.
#[derive(Debug, Clone)]
pub struct StorageDir {
    /// Root directory (<config-dir>/code-vista/)
    root: PathBuf,
}

impl StorageDir {
    /// Create the directory and any missing parents. Already existing is fine.
    pub fn init(root: &Path) -> Result<Self> {
        fs::create_dir_all(root).map_err(|source| StoreError::CreateDir {
            path: root.to_path_buf(),
            source,
        })?;
        debug!(root = %root.display(), "storage directory ready");
        Ok(Self { root: root.to_path_buf() })
    }

    /// Get root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the storage document.
    pub fn file_path(&self) -> PathBuf {
        self.root.join(STORAGE_FILE)
    }
}

/// Replace `path` with `bytes` atomically.
///
/// Writes a sibling `.tmp` file, syncs it, then renames over the target, so
/// readers see either the old content or the new content.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    let result = (|| {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}
