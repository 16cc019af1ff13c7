//! Claude Code's native task system
//!
//! Tasks are JSON files in `~/.claude/tasks/<task_list_id>/<task_id>.json`.
//! The task list id isolates projects: it is configured explicitly or derived
//! from a hash of the project path.

use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{ProviderStatus, TaskTrackerProvider};
use crate::config::TaskTracker;
use crate::plan::Task;

/// Length of the derived task list id (hex chars).
const TASK_LIST_ID_LEN: usize = 12;

/// Configured id, or the first 12 hex chars of SHA-256 of the project path.
pub fn task_list_id(project_dir: &Path, configured: Option<&str>) -> String {
    if let Some(id) = configured.filter(|id| !id.is_empty()) {
        return id.to_string();
    }
    let resolved = project_dir
        .canonicalize()
        .unwrap_or_else(|_| project_dir.to_path_buf());
    let digest = Sha256::digest(resolved.to_string_lossy().as_bytes());
    let mut id = hex::encode(digest);
    id.truncate(TASK_LIST_ID_LEN);
    id
}

/// `~/.claude/tasks/<task_list_id>`, if a home directory exists.
pub fn tasks_dir(task_list_id: &str) -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".claude").join("tasks").join(task_list_id))
}

/// Read every task file in `dir`. Unreadable or malformed files are skipped.
pub fn list_tasks(dir: &Path) -> Vec<Task> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
        .filter(|path| {
            !path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with('.'))
        })
        .collect();
    paths.sort();

    paths
        .into_iter()
        .filter_map(|path| {
            let content = fs::read_to_string(&path).ok()?;
            match serde_json::from_str::<Task>(&content) {
                Ok(task) => Some(task),
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "skipping malformed task file");
                    None
                }
            }
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct BuiltinProvider {
    configured_id: Option<String>,
    tasks_root: Option<PathBuf>,
}

impl BuiltinProvider {
    pub fn new(configured_id: Option<String>) -> Self {
        Self {
            configured_id,
            tasks_root: None,
        }
    }

    /// Read tasks from `dir` instead of the home-directory location.
    pub fn with_tasks_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            configured_id: None,
            tasks_root: Some(dir.into()),
        }
    }

    /// Directory holding this project's task files.
    pub fn resolve_tasks_dir(&self, project_dir: &Path) -> Option<PathBuf> {
        if let Some(root) = &self.tasks_root {
            return Some(root.clone());
        }
        tasks_dir(&task_list_id(project_dir, self.configured_id.as_deref()))
    }

    pub fn tasks(&self, project_dir: &Path) -> Vec<Task> {
        self.resolve_tasks_dir(project_dir)
            .map(|dir| list_tasks(&dir))
            .unwrap_or_default()
    }
}

impl TaskTrackerProvider for BuiltinProvider {
    fn kind(&self) -> TaskTracker {
        TaskTracker::Builtin
    }

    fn check_available(&self, project_dir: &Path) -> ProviderStatus {
        match self.resolve_tasks_dir(project_dir) {
            Some(_) => ProviderStatus::available(),
            None => ProviderStatus::unavailable("home directory not found for builtin tasks"),
        }
    }

    /// Pending tasks with no blockers.
    fn ready_count(&self, project_dir: &Path) -> Option<usize> {
        let count = self
            .tasks(project_dir)
            .iter()
            .filter(|task| task.status.as_deref() == Some("pending") && task.blocked_by.is_empty())
            .count();
        Some(count)
    }

    fn sync(&self, _project_dir: &Path) -> bool {
        true
    }
}
