//! Task tracker providers
//!
//! Each tracker kind is one [`TaskTrackerProvider`] implementation. The
//! degradation engine only needs `check_available`, `requires_daemon` and
//! `recover`; hooks additionally use `ready_count` and `sync`.

mod beads;
mod builtin;
mod local;
mod remote;


use serde::Serialize;
use std::path::Path;
use std::time::Duration;

use crate::config::{DpConfig, TaskTracker};
use crate::process::run_with_timeout;

pub use beads::{daemon_status, start_daemon, BeadsProvider, ChainlinkProvider, BEADS_CLI};
pub use builtin::{list_tasks, task_list_id, tasks_dir, BuiltinProvider};
pub use local::{MarkdownProvider, NoneProvider};
pub use remote::{GitHubProvider, LinearProvider};

/// Deadline for tracker queries such as ready counts.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Deadline for sync and initialization commands.
pub const SYNC_TIMEOUT: Duration = Duration::from_secs(30);

/// Availability of a task tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderStatus {
    pub available: bool,
    pub reason: Option<String>,
}

impl ProviderStatus {
    pub fn available() -> Self {
        Self {
            available: true,
            reason: None,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            available: false,
            reason: Some(reason.into()),
        }
    }
}

/// Status queries and maintenance actions for one tracker kind.
pub trait TaskTrackerProvider {
    fn kind(&self) -> TaskTracker;

    /// Whether the tracker's tooling and local store are usable.
    fn check_available(&self, project_dir: &Path) -> ProviderStatus;

    /// Number of tasks ready to work on, if the tracker can report it.
    fn ready_count(&self, project_dir: &Path) -> Option<usize>;

    /// Synchronize the tracker. Returns true if sync succeeded or was not needed.
    fn sync(&self, project_dir: &Path) -> bool;

    /// Whether a background daemon must be running for this tracker.
    fn requires_daemon(&self) -> bool {
        false
    }

    /// One bounded attempt to repair an unavailable tracker.
    fn recover(&self, _project_dir: &Path) -> bool {
        true
    }
}

/// Provider implementation for the configured tracker.
pub fn provider_for(config: &DpConfig) -> Box<dyn TaskTrackerProvider> {
    match config.task_tracker {
        TaskTracker::Beads => Box::new(BeadsProvider::new(config.beads.daemon)),
        TaskTracker::Chainlink => Box::new(ChainlinkProvider::new(config.beads.daemon)),
        TaskTracker::GitHub => Box::new(GitHubProvider),
        TaskTracker::Linear => Box::new(LinearProvider),
        TaskTracker::Markdown => Box::new(MarkdownProvider),
        TaskTracker::Builtin => {
            Box::new(BuiltinProvider::new(config.builtin.task_list_id.clone()))
        }
        TaskTracker::None => Box::new(NoneProvider),
    }
}

/// Whether a CLI command is on `PATH`.
pub fn cli_available(command: &str) -> bool {
    which::which(command).is_ok()
}

/// Run a tracker CLI that prints a JSON array and count its elements.
pub(crate) fn count_json_array(
    program: &str,
    args: &[&str],
    project_dir: &Path,
) -> Option<usize> {
    let outcome = run_with_timeout(program, args, Some(project_dir), QUERY_TIMEOUT).ok()?;
    if !outcome.success {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(&outcome.stdout).ok()? {
        serde_json::Value::Array(items) => Some(items.len()),
        _ => None,
    }
}
