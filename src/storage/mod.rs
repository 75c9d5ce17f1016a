//! Storage module — the `storage.json` document and the store around it.
//!
//! ```text
//! PathResolver ──► StorageDir ──► ProjectStore ──► storage.json
//!  (config dir)    (mkdir -p)     (load/save/upsert)
//! ```

pub mod diagnostics;
pub mod fs;
pub mod resolver;
pub mod store;
pub mod types;

pub use diagnostics::{DiagnosticSink, MemorySink, TracingSink};
pub use fs::{StorageDir, STORAGE_FILE};
pub use resolver::{FixedDir, PathResolver, PlatformResolver};
pub use store::ProjectStore;
pub use types::{
    AppStorage, DependencyGraph, DependencyLink, DependencyNode, FileHistory, LargestFile,
    ProjAnalysis, ProjectSummary, TaskItem, Upsert, STORAGE_VERSION,
};
