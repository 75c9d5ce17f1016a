//! # Code Vista storage
//!
//! Persists per-project code-analysis results for Code Vista in a single
//! JSON document under the per-user config directory.
//!
//! ## Key Features
//!
//! - **Self-initializing**: the first load writes a default document
//! - **Forgiving**: unreadable or corrupt files fall back to defaults and are reported, never raised
//! - **Keyed by path**: `update_project` replaces a project in place or appends it
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use codevista::{ProjAnalysis, ProjectStore, StoreConfig};
//!
//! // ~/.config/code-vista/storage.json on Linux
//! let store = ProjectStore::open(&StoreConfig::default())?;
//!
//! let mut analysis = ProjAnalysis::new("vista", "/home/me/vista");
//! analysis.summary.total_files = 42;
//! store.update_project(analysis);
//!
//! let doc = store.load_data();
//! assert!(doc.find_project("/home/me/vista").is_some());
//! # Ok::<(), codevista::StoreError>(())
//! ```

pub mod config;
pub mod error;
pub mod storage;

// Re-exports for convenience
pub use config::{StoreConfig, DEFAULT_APP_NAME, STORAGE_DIR_ENV};
pub use error::{Result, StoreError};
pub use storage::{
    AppStorage, DependencyGraph, DependencyLink, DependencyNode, DiagnosticSink, FileHistory,
    LargestFile, MemorySink, PathResolver, ProjAnalysis, ProjectStore, ProjectSummary, TaskItem,
    Upsert,
};
