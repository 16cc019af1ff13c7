//! Health probes and their recovery actions
//!
//! A probe checks one component and knows the single bounded action that
//! might repair it. Probes never touch the degradation state themselves.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::state::{ComponentId, HealthStatus};
use crate::config::DpConfig;
use crate::git::runner::{run_git, run_git_bool, GIT_PROBE_TIMEOUT};
use crate::providers::{self, cli_available, TaskTrackerProvider};

pub trait HealthProbe {
    fn component(&self) -> ComponentId;

    /// Check the component. An `Err` means the check itself could not run.
    fn check(&self) -> Result<HealthStatus>;

    /// One bounded repair attempt. Returns whether it succeeded.
    fn recover(&self) -> Result<bool>;
}

/// `git status --porcelain` in the project directory.
#[derive(Debug, Clone)]
pub struct GitProbe {
    project_dir: PathBuf,
}

impl GitProbe {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }
}

impl HealthProbe for GitProbe {
    fn component(&self) -> ComponentId {
        ComponentId::Git
    }

    fn check(&self) -> Result<HealthStatus> {
        if !cli_available("git") {
            return Ok(HealthStatus::unhealthy(ComponentId::Git, "Git not found"));
        }
        let outcome = run_git(&["status", "--porcelain"], &self.project_dir, GIT_PROBE_TIMEOUT)?;
        let status = if outcome.timed_out {
            HealthStatus::unhealthy(ComponentId::Git, "Git command timed out")
        } else if outcome.success {
            HealthStatus::healthy(ComponentId::Git, "Git repository is healthy")
        } else {
            HealthStatus::unhealthy(
                ComponentId::Git,
                format!("Git error: {}", outcome.stderr.trim()),
            )
        };
        Ok(status)
    }

    fn recover(&self) -> Result<bool> {
        Ok(run_git_bool(&["status"], &self.project_dir, GIT_PROBE_TIMEOUT))
    }
}

/// Loads the project configuration from disk.
#[derive(Debug, Clone)]
pub struct ConfigProbe {
    project_dir: PathBuf,
}

impl ConfigProbe {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }
}

impl HealthProbe for ConfigProbe {
    fn component(&self) -> ComponentId {
        ComponentId::Config
    }

    fn check(&self) -> Result<HealthStatus> {
        let status = match DpConfig::load(&self.project_dir) {
            Ok(_) => HealthStatus::healthy(ComponentId::Config, "Configuration loaded successfully"),
            Err(e) => HealthStatus::unhealthy(ComponentId::Config, format!("Config error: {e}")),
        };
        Ok(status)
    }

    /// Reload from disk; succeeds once the file parses again.
    fn recover(&self) -> Result<bool> {
        Ok(DpConfig::load(&self.project_dir).is_ok())
    }
}

/// Asks the configured tracker provider whether it is usable.
pub struct TaskTrackerProbe {
    provider: Box<dyn TaskTrackerProvider>,
    project_dir: PathBuf,
}

impl TaskTrackerProbe {
    pub fn new(provider: Box<dyn TaskTrackerProvider>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            project_dir: project_dir.into(),
        }
    }
}

impl HealthProbe for TaskTrackerProbe {
    fn component(&self) -> ComponentId {
        ComponentId::TaskTracker
    }

    fn check(&self) -> Result<HealthStatus> {
        let status = self.provider.check_available(&self.project_dir);
        let kind = self.provider.kind();
        Ok(if status.available {
            HealthStatus::healthy(
                ComponentId::TaskTracker,
                status.reason.unwrap_or_else(|| format!("{kind} is healthy")),
            )
        } else {
            HealthStatus::unhealthy(
                ComponentId::TaskTracker,
                status.reason.unwrap_or_else(|| format!("{kind} is unavailable")),
            )
        })
    }

    fn recover(&self) -> Result<bool> {
        Ok(self.provider.recover(&self.project_dir))
    }
}

/// Liveness of the beads daemon.
#[derive(Debug, Clone, Default)]
pub struct DaemonProbe;

impl HealthProbe for DaemonProbe {
    fn component(&self) -> ComponentId {
        ComponentId::Daemon
    }

    fn check(&self) -> Result<HealthStatus> {
        let status = if providers::daemon_status()? {
            HealthStatus::healthy(ComponentId::Daemon, "Beads daemon is running")
        } else {
            HealthStatus::unhealthy(ComponentId::Daemon, "Beads daemon not running")
        };
        Ok(status)
    }

    fn recover(&self) -> Result<bool> {
        Ok(providers::start_daemon())
    }
}

/// Probes for a project, in check order: config, git, task tracker, and the
/// daemon when the configured tracker needs one.
pub fn default_probes(project_dir: &Path, config: &DpConfig) -> Vec<Box<dyn HealthProbe>> {
    let provider = providers::provider_for(config);
    let needs_daemon = provider.requires_daemon();

    let mut probes: Vec<Box<dyn HealthProbe>> = vec![
        Box::new(ConfigProbe::new(project_dir)),
        Box::new(GitProbe::new(project_dir)),
        Box::new(TaskTrackerProbe::new(provider, project_dir)),
    ];
    if needs_daemon {
        probes.push(Box::new(DaemonProbe));
    }
    debug!(
        tracker = %config.task_tracker,
        daemon = needs_daemon,
        "assembled health probes"
    );
    probes
}
