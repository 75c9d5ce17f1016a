//! ProjectStore — load, save and upsert the `storage.json` document.
//!
//! All I/O is synchronous and whole-file. `update_project` is a plain
//! load-modify-save, so two interleaved callers can lose an update; callers
//! that need more must serialize access themselves.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use super::diagnostics::{DiagnosticSink, TracingSink};
use super::fs::{write_atomic, StorageDir};
use super::resolver::PathResolver;
use super::types::{AppStorage, ProjAnalysis, Upsert};
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};

pub struct ProjectStore {
    dir: StorageDir,
    file_path: PathBuf,
    sink: Arc<dyn DiagnosticSink>,
}

impl ProjectStore {
    /// Open the store described by `config`, creating its directory.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        Self::with_resolver(&config.app_name, config.resolver().as_ref())
    }

    /// Open the store for `app_name` in whatever directory `resolver` picks.
    pub fn with_resolver(app_name: &str, resolver: &dyn PathResolver) -> Result<Self> {
        let root = resolver.resolve_config_dir(app_name)?;
        Self::at(&root)
    }

    /// Open a store rooted directly at `root`.
    pub fn at(root: &Path) -> Result<Self> {
        let dir = StorageDir::init(root)?;
        let file_path = dir.file_path();
        Ok(Self {
            dir,
            file_path,
            sink: Arc::new(TracingSink),
        })
    }

    /// Route recovered failures to `sink` instead of the log.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn storage_dir(&self) -> &Path {
        self.dir.root()
    }

    /// `<storage_dir>/storage.json`
    pub fn storage_path(&self) -> &Path {
        &self.file_path
    }

    /// Read the document. `Ok(None)` when the file does not exist yet.
    pub fn try_load(&self) -> Result<Option<AppStorage>> {
        let text = match fs::read_to_string(&self.file_path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.file_path.clone(),
                    source,
                })
            }
        };

        let doc: AppStorage =
            serde_json::from_str(&text).map_err(|source| StoreError::Malformed {
                path: self.file_path.clone(),
                source,
            })?;

        if doc.version < 1 {
            return Err(StoreError::UnsupportedVersion {
                path: self.file_path.clone(),
                version: doc.version,
            });
        }

        debug!(projects = doc.projects.len(), bytes = text.len(), "storage loaded");
        Ok(Some(doc))
    }

    /// Write the whole document, pretty-printed.
    pub fn try_save(&self, doc: &AppStorage) -> Result<()> {
        let text = serde_json::to_string_pretty(doc).map_err(|source| StoreError::Serialize {
            path: self.file_path.clone(),
            source,
        })?;
        write_atomic(&self.file_path, text.as_bytes()).map_err(|source| StoreError::Write {
            path: self.file_path.clone(),
            source,
        })?;
        debug!(bytes = text.len(), "storage saved");
        Ok(())
    }

    /// Load the document, never failing.
    ///
    /// A missing file is initialized with the default document. An unreadable
    /// or malformed file is reported, left untouched on disk, and the default
    /// document is returned in its place.
    pub fn load_data(&self) -> AppStorage {
        info!(path = %self.file_path.display(), "loading storage");

        match self.try_load() {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                info!(path = %self.file_path.display(), "no storage file, writing defaults");
                let doc = AppStorage::default();
                self.save_data(&doc);
                doc
            }
            Err(e) => {
                self.sink.report(&e);
                AppStorage::default()
            }
        }
    }

    /// Save the document, never failing. A failed write is reported and the
    /// previous file content stays in place.
    pub fn save_data(&self, doc: &AppStorage) {
        info!(path = %self.file_path.display(), "saving storage");

        if let Err(e) = self.try_save(doc) {
            self.sink.report(&e);
        }
    }

    /// Insert or replace the project with `analysis.path`.
    pub fn update_project(&self, analysis: ProjAnalysis) -> Upsert {
        let mut doc = self.load_data();
        let path = analysis.path.clone();
        let outcome = doc.upsert(analysis);
        debug!(project = %path, ?outcome, "project upserted");
        self.save_data(&doc);
        outcome
    }

    pub fn get_project(&self, path: &str) -> Option<ProjAnalysis> {
        self.load_data().find_project(path).cloned()
    }

    pub fn list_projects(&self) -> Vec<ProjAnalysis> {
        self.load_data().projects
    }

    /// Set the root folder projects are discovered under.
    pub fn set_projects_folder(&self, folder: impl Into<String>) {
        let mut doc = self.load_data();
        doc.projects_folder = folder.into();
        self.save_data(&doc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::diagnostics::MemorySink;
    use crate::storage::resolver::FixedDir;
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> (ProjectStore, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let store = ProjectStore::at(dir).unwrap().with_sink(sink.clone());
        (store, sink)
    }

    #[test]
    fn test_storage_path() {
        let dir = tempdir().unwrap();
        let store = ProjectStore::with_resolver("code-vista", &FixedDir::new(dir.path())).unwrap();
        assert_eq!(store.storage_path(), dir.path().join("storage.json"));
        assert_eq!(store.storage_dir(), dir.path());
        // Construction alone does not create the file
        assert!(!store.storage_path().exists());
    }

    #[test]
    fn test_open_with_config_dir() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("nested").join("vista");
        let store = ProjectStore::open(&StoreConfig::in_dir(&root)).unwrap();
        assert!(root.is_dir());
        assert_eq!(store.storage_path(), root.join("storage.json"));
    }

    #[test]
    fn test_open_rejects_invalid_config() {
        let err = ProjectStore::open(&StoreConfig::new("../escape")).err().unwrap();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn test_try_load_missing_is_none() {
        let dir = tempdir().unwrap();
        let (store, _) = store_in(dir.path());
        assert!(store.try_load().unwrap().is_none());
    }

    #[test]
    fn test_try_load_rejects_version_zero() {
        let dir = tempdir().unwrap();
        let (store, sink) = store_in(dir.path());
        let bytes = r#"{"version": 0, "projects_folder": "", "projects": []}"#;
        fs::write(store.storage_path(), bytes).unwrap();

        let err = store.try_load().unwrap_err();
        assert!(err.is_malformed());

        assert_eq!(store.load_data(), AppStorage::default());
        assert_eq!(sink.messages().len(), 1);
        assert_eq!(fs::read_to_string(store.storage_path()).unwrap(), bytes);
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let dir = tempdir().unwrap();
        let (store, sink) = store_in(dir.path());
        fs::write(
            store.storage_path(),
            r#"{"version": 1, "projects_folder": "", "projects": "nope"}"#,
        )
        .unwrap();

        assert!(matches!(store.try_load(), Err(StoreError::Malformed { .. })));
        assert_eq!(store.load_data(), AppStorage::default());
        assert!(sink.messages()[0].contains("storage.json"));
    }

    #[test]
    fn test_unreadable_file_falls_back() {
        let dir = tempdir().unwrap();
        let (store, sink) = store_in(dir.path());
        // A directory where the file should be cannot be read as text
        fs::create_dir(store.storage_path()).unwrap();

        assert!(matches!(store.try_load(), Err(StoreError::Read { .. })));
        assert_eq!(store.load_data(), AppStorage::default());
        assert_eq!(sink.messages().len(), 1);
        assert!(store.storage_path().is_dir());
    }

    #[test]
    fn test_save_failure_is_reported_not_raised() {
        let dir = tempdir().unwrap();
        let (store, sink) = store_in(dir.path());
        fs::create_dir(store.storage_path()).unwrap();

        let mut doc = AppStorage::default();
        doc.projects_folder = "/projects".to_string();
        store.save_data(&doc);

        let messages = sink.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("could not write"));
        assert!(store.storage_path().is_dir());
    }

    #[test]
    fn test_set_projects_folder_persists() {
        let dir = tempdir().unwrap();
        let (store, sink) = store_in(dir.path());

        store.update_project(ProjAnalysis::new("a", "/a"));
        store.set_projects_folder("/home/me/code");

        let doc = store.load_data();
        assert_eq!(doc.projects_folder, "/home/me/code");
        assert_eq!(doc.projects.len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_get_and_list_projects() {
        let dir = tempdir().unwrap();
        let (store, _) = store_in(dir.path());

        assert!(store.get_project("/a").is_none());
        assert_eq!(store.update_project(ProjAnalysis::new("a", "/a")), Upsert::Inserted(0));
        assert_eq!(store.update_project(ProjAnalysis::new("b", "/b")), Upsert::Inserted(1));
        assert_eq!(store.update_project(ProjAnalysis::new("a2", "/a")), Upsert::Replaced(0));

        assert_eq!(store.get_project("/a").unwrap().project_name, "a2");
        let names: Vec<String> = store
            .list_projects()
            .into_iter()
            .map(|p| p.project_name)
            .collect();
        assert_eq!(names, vec!["a2", "b"]);
    }
}
