//! Persisted degradation state

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::level::DegradationLevel;
use crate::fs::locking::{atomic_write, locked_read};

/// A monitored subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentId {
    Git,
    Config,
    TaskTracker,
    #[serde(alias = "beads_daemon")]
    Daemon,
}

impl ComponentId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentId::Git => "git",
            ComponentId::Config => "config",
            ComponentId::TaskTracker => "task_tracker",
            ComponentId::Daemon => "daemon",
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub component: ComponentId,
    pub message: String,
    #[serde(deserialize_with = "timestamp")]
    pub last_check: DateTime<Utc>,
    #[serde(default)]
    pub recovery_attempted: bool,
    #[serde(default)]
    pub recovery_succeeded: bool,
}

impl HealthStatus {
    pub fn healthy(component: ComponentId, message: impl Into<String>) -> Self {
        Self::new(true, component, message)
    }

    pub fn unhealthy(component: ComponentId, message: impl Into<String>) -> Self {
        Self::new(false, component, message)
    }

    fn new(healthy: bool, component: ComponentId, message: impl Into<String>) -> Self {
        Self {
            healthy,
            component,
            message: message.into(),
            last_check: Utc::now(),
            recovery_attempted: false,
            recovery_succeeded: false,
        }
    }

    /// Carry recovery flags over from `prior` while the problem persists.
    ///
    /// A component that stays unhealthy after a recovery attempt is still in
    /// the same episode and must not be recovered again. A healthy result
    /// ends the episode.
    pub fn continue_episode(mut self, prior: Option<&HealthStatus>) -> Self {
        if let Some(prior) = prior {
            if !self.healthy && !prior.healthy && prior.recovery_attempted {
                self.recovery_attempted = true;
                self.recovery_succeeded = prior.recovery_succeeded;
            }
        }
        self
    }
}

/// Degradation state for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemState {
    pub level: DegradationLevel,
    #[serde(default)]
    pub components: BTreeMap<ComponentId, HealthStatus>,
    #[serde(default = "Utc::now", deserialize_with = "timestamp")]
    pub last_transition: DateTime<Utc>,
    #[serde(default)]
    pub transition_reason: String,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub lock_reason: String,
}

impl Default for SystemState {
    fn default() -> Self {
        Self::new(DegradationLevel::Full)
    }
}

impl SystemState {
    pub fn new(level: DegradationLevel) -> Self {
        Self {
            level,
            components: BTreeMap::new(),
            last_transition: Utc::now(),
            transition_reason: String::new(),
            locked: false,
            lock_reason: String::new(),
        }
    }

    pub fn unhealthy(&self) -> impl Iterator<Item = &HealthStatus> {
        self.components.values().filter(|status| !status.healthy)
    }
}

/// RFC 3339, or a naive ISO timestamp read as UTC.
fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

/// Reads and writes the state file.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored state, or a fresh FULL state if the file is absent or unusable.
    pub fn load(&self) -> SystemState {
        if !self.path.exists() {
            return SystemState::default();
        }
        match self.try_load() {
            Ok(state) => state,
            Err(e) => {
                let error = format!("{e:#}");
                warn!(path = %self.path.display(), %error, "ignoring unreadable degradation state");
                SystemState::default()
            }
        }
    }

    fn try_load(&self) -> Result<SystemState> {
        let content = locked_read(&self.path)?;
        serde_json::from_str(&content).with_context(|| {
            format!("Failed to parse degradation state: {}", self.path.display())
        })
    }

    pub fn save(&self, state: &SystemState) -> Result<()> {
        let content = serde_json::to_string_pretty(state)
            .context("Failed to serialize degradation state")?;
        atomic_write(&self.path, &content)?;
        debug!(path = %self.path.display(), level = %state.level, "saved degradation state");
        Ok(())
    }
}
