//! Beads and Chainlink providers
//!
//! Chainlink keeps its issues in local files but shares the beads store and
//! daemon when one is present.

use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

use super::{cli_available, count_json_array, ProviderStatus, TaskTrackerProvider, SYNC_TIMEOUT};
use crate::config::TaskTracker;
use crate::process::run_with_timeout;

/// Beads command-line tool.
pub const BEADS_CLI: &str = "bd";

/// Deadline for `bd daemon status`.
const DAEMON_STATUS_TIMEOUT: Duration = Duration::from_secs(5);

/// Deadline for `bd daemon start`.
const DAEMON_START_TIMEOUT: Duration = Duration::from_secs(10);

fn beads_store_present(project_dir: &Path) -> bool {
    project_dir.join(".beads").is_dir()
}

fn beads_sync(project_dir: &Path) -> bool {
    if !cli_available(BEADS_CLI) || !beads_store_present(project_dir) {
        // Nothing to sync against
        return true;
    }
    match run_with_timeout(BEADS_CLI, &["sync"], Some(project_dir), SYNC_TIMEOUT) {
        Ok(outcome) if outcome.success => true,
        Ok(outcome) => {
            warn!(reason = %outcome.failure_summary(SYNC_TIMEOUT), "bd sync failed");
            false
        }
        Err(e) => {
            warn!(error = %e, "bd sync could not start");
            false
        }
    }
}

/// Query the beads daemon. `Ok(true)` when it reports running.
pub fn daemon_status() -> anyhow::Result<bool> {
    if !cli_available(BEADS_CLI) {
        anyhow::bail!("bd CLI not available");
    }
    let outcome = run_with_timeout(BEADS_CLI, &["daemon", "status"], None, DAEMON_STATUS_TIMEOUT)?;
    if outcome.timed_out {
        anyhow::bail!("bd daemon status timed out");
    }
    Ok(outcome.success || outcome.stdout.to_lowercase().contains("running"))
}

/// Try to start the beads daemon once.
pub fn start_daemon() -> bool {
    let started = run_with_timeout(BEADS_CLI, &["daemon", "start"], None, DAEMON_START_TIMEOUT)
        .map(|outcome| outcome.success)
        .unwrap_or(false);
    debug!(started, "bd daemon start");
    started
}

#[derive(Debug, Clone)]
pub struct BeadsProvider {
    daemon: bool,
}

impl BeadsProvider {
    pub fn new(daemon: bool) -> Self {
        Self { daemon }
    }
}

impl TaskTrackerProvider for BeadsProvider {
    fn kind(&self) -> TaskTracker {
        TaskTracker::Beads
    }

    fn check_available(&self, project_dir: &Path) -> ProviderStatus {
        if !cli_available(BEADS_CLI) {
            return ProviderStatus::unavailable(
                "'bd' CLI not found. Install beads or change provider.",
            );
        }
        if !beads_store_present(project_dir) {
            return ProviderStatus::unavailable(
                ".beads/ not initialized. Run 'bd init' in project root.",
            );
        }
        ProviderStatus::available()
    }

    fn ready_count(&self, project_dir: &Path) -> Option<usize> {
        count_json_array(BEADS_CLI, &["ready", "--json"], project_dir)
    }

    fn sync(&self, project_dir: &Path) -> bool {
        beads_sync(project_dir)
    }

    fn requires_daemon(&self) -> bool {
        self.daemon
    }

    /// Initialize the local store when it is missing.
    fn recover(&self, project_dir: &Path) -> bool {
        if beads_store_present(project_dir) {
            return true;
        }
        let ran = run_with_timeout(BEADS_CLI, &["init"], Some(project_dir), SYNC_TIMEOUT).is_ok();
        debug!(ran, "bd init");
        beads_store_present(project_dir)
    }
}

#[derive(Debug, Clone)]
pub struct ChainlinkProvider {
    daemon: bool,
}

impl ChainlinkProvider {
    pub fn new(daemon: bool) -> Self {
        Self { daemon }
    }
}

impl TaskTrackerProvider for ChainlinkProvider {
    fn kind(&self) -> TaskTracker {
        TaskTracker::Chainlink
    }

    fn check_available(&self, _project_dir: &Path) -> ProviderStatus {
        ProviderStatus::available()
    }

    fn ready_count(&self, project_dir: &Path) -> Option<usize> {
        if cli_available(BEADS_CLI) && beads_store_present(project_dir) {
            return count_json_array(BEADS_CLI, &["ready", "--json"], project_dir);
        }
        None
    }

    fn sync(&self, project_dir: &Path) -> bool {
        beads_sync(project_dir)
    }

    fn requires_daemon(&self) -> bool {
        self.daemon
    }
}
