//! Hosted trackers driven through their CLIs

use std::path::Path;

use super::{cli_available, count_json_array, ProviderStatus, TaskTrackerProvider};
use crate::config::TaskTracker;

#[derive(Debug, Clone, Copy)]
pub struct GitHubProvider;

impl TaskTrackerProvider for GitHubProvider {
    fn kind(&self) -> TaskTracker {
        TaskTracker::GitHub
    }

    fn check_available(&self, _project_dir: &Path) -> ProviderStatus {
        if !cli_available("gh") {
            return ProviderStatus::unavailable(
                "'gh' CLI not found. Install GitHub CLI or change provider.",
            );
        }
        ProviderStatus::available()
    }

    fn ready_count(&self, project_dir: &Path) -> Option<usize> {
        count_json_array(
            "gh",
            &["issue", "list", "--label", "ready", "--json", "number"],
            project_dir,
        )
    }

    /// The CLI talks to the service directly; nothing to sync.
    fn sync(&self, _project_dir: &Path) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LinearProvider;

impl TaskTrackerProvider for LinearProvider {
    fn kind(&self) -> TaskTracker {
        TaskTracker::Linear
    }

    fn check_available(&self, _project_dir: &Path) -> ProviderStatus {
        if !cli_available("linear") {
            return ProviderStatus::unavailable(
                "'linear' CLI not found. Install Linear CLI or change provider.",
            );
        }
        ProviderStatus::available()
    }

    fn ready_count(&self, _project_dir: &Path) -> Option<usize> {
        None
    }

    fn sync(&self, _project_dir: &Path) -> bool {
        true
    }
}
