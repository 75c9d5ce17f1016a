//! Persisted document types.
//!
//! Field names match the on-disk JSON exactly. Deserialization is strict about
//! shape: a missing field or a wrong type fails the whole document. Keys this
//! crate does not know are carried in `extra` and written back unchanged.

use chrono::{SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Current schema tag written into new documents.
pub const STORAGE_VERSION: u32 = 1;

/// Root document stored in `storage.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppStorage {
    pub version: u32,
    pub projects_folder: String,
    pub projects: Vec<ProjAnalysis>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for AppStorage {
    fn default() -> Self {
        Self {
            version: STORAGE_VERSION,
            projects_folder: String::new(),
            projects: Vec::new(),
            extra: Map::new(),
        }
    }
}

/// Whether an upsert replaced an existing record or appended a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Replaced(usize),
    Inserted(usize),
}

impl AppStorage {
    /// Find a project by its `path` key.
    pub fn find_project(&self, path: &str) -> Option<&ProjAnalysis> {
        self.projects.iter().find(|p| p.path == path)
    }

    /// Replace the first project with the same `path` in place, or append.
    pub fn upsert(&mut self, analysis: ProjAnalysis) -> Upsert {
        match self.projects.iter().position(|p| p.path == analysis.path) {
            Some(idx) => {
                self.projects[idx] = analysis;
                Upsert::Replaced(idx)
            }
            None => {
                self.projects.push(analysis);
                Upsert::Inserted(self.projects.len() - 1)
            }
        }
    }
}

/// One project's analysis snapshot, keyed by `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjAnalysis {
    pub project_name: String,
    pub path: String,
    /// ISO-8601 timestamp. Kept as text and never parsed by storage.
    pub last_analyzed: String,
    pub summary: ProjectSummary,
    pub largest_files: Vec<LargestFile>,
    pub task_list: Vec<TaskItem>,
    pub dependency_graph: DependencyGraph,
    pub git_history: Vec<FileHistory>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProjAnalysis {
    /// Empty analysis for `path`, stamped with the current time.
    pub fn new(project_name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            path: path.into(),
            last_analyzed: now_rfc3339(),
            summary: ProjectSummary::default(),
            largest_files: Vec::new(),
            task_list: Vec::new(),
            dependency_graph: DependencyGraph::default(),
            git_history: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Refresh `last_analyzed` to now.
    pub fn touch(&mut self) {
        self.last_analyzed = now_rfc3339();
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub total_files: u64,
    pub total_lines_of_code: u64,
    /// Language name to line count, in file order.
    pub languages: IndexMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LargestFile {
    pub path: String,
    /// Stored as text, e.g. "12.4 KB".
    pub size_bytes: String,
}

/// A TODO/FIXME style marker found in source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    pub comment: String,
    pub file: String,
    pub line: u64,
}

// ─── Dependency Graph ──────────────────────────────────────────────

/// Directed dependency graph. Links reference node ids; storage does not
/// check that the endpoints exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub nodes: Vec<DependencyNode>,
    pub links: Vec<DependencyLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyNode {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyLink {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHistory {
    pub file: String,
    pub last_commit_date: String,
}
