//! File-based and disabled trackers

use std::fs;
use std::path::Path;

use super::{ProviderStatus, TaskTrackerProvider};
use crate::config::TaskTracker;

/// Tasks as markdown files under `docs/tasks/`.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownProvider;

impl TaskTrackerProvider for MarkdownProvider {
    fn kind(&self) -> TaskTracker {
        TaskTracker::Markdown
    }

    fn check_available(&self, _project_dir: &Path) -> ProviderStatus {
        ProviderStatus::available()
    }

    /// Count task files declaring `status: ready`.
    fn ready_count(&self, project_dir: &Path) -> Option<usize> {
        let tasks_dir = project_dir.join("docs").join("tasks");
        let Ok(entries) = fs::read_dir(&tasks_dir) else {
            return Some(0);
        };

        let count = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("md"))
            .filter_map(|path| fs::read_to_string(path).ok())
            .filter(|content| content.to_lowercase().contains("status: ready"))
            .count();
        Some(count)
    }

    fn sync(&self, _project_dir: &Path) -> bool {
        true
    }
}

/// No tracker configured.
#[derive(Debug, Clone, Copy)]
pub struct NoneProvider;

impl TaskTrackerProvider for NoneProvider {
    fn kind(&self) -> TaskTracker {
        TaskTracker::None
    }

    fn check_available(&self, _project_dir: &Path) -> ProviderStatus {
        ProviderStatus::available()
    }

    fn ready_count(&self, _project_dir: &Path) -> Option<usize> {
        None
    }

    fn sync(&self, _project_dir: &Path) -> bool {
        true
    }
}
