//! Project configuration
//!
//! Loaded once by the caller and passed by reference into each engine. There
//! is no process-wide cached copy; reloading means calling [`DpConfig::load`]
//! again.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Config file locations, relative to the project root, in lookup order.
pub const CONFIG_CANDIDATES: &[&str] = &[
    ".claude/dp-config.yaml",
    ".claude/dp-config.yml",
    "dp-config.yaml",
];

/// Default code-line threshold below which a file is suspected to be a stub.
pub const DEFAULT_STUB_THRESHOLD_LINES: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[serde(rename = "1.0")]
    V1,
    #[serde(rename = "2.0")]
    V2,
}

/// Which task tracker backs the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskTracker {
    Chainlink,
    Beads,
    #[serde(rename = "github")]
    GitHub,
    Linear,
    Markdown,
    /// Claude Code's native task system
    Builtin,
    None,
}

impl TaskTracker {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskTracker::Chainlink => "chainlink",
            TaskTracker::Beads => "beads",
            TaskTracker::GitHub => "github",
            TaskTracker::Linear => "linear",
            TaskTracker::Markdown => "markdown",
            TaskTracker::Builtin => "builtin",
            TaskTracker::None => "none",
        }
    }
}

impl fmt::Display for TaskTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskTracker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chainlink" => Ok(TaskTracker::Chainlink),
            "beads" => Ok(TaskTracker::Beads),
            "github" => Ok(TaskTracker::GitHub),
            "linear" => Ok(TaskTracker::Linear),
            "markdown" => Ok(TaskTracker::Markdown),
            "builtin" => Ok(TaskTracker::Builtin),
            "none" => Ok(TaskTracker::None),
            other => Err(format!("unknown task tracker: {other}")),
        }
    }
}

/// What a hook does when an optional dependency is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegradationAction {
    #[default]
    Warn,
    Skip,
    Fail,
}

impl FromStr for DegradationAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warn" => Ok(DegradationAction::Warn),
            "skip" => Ok(DegradationAction::Skip),
            "fail" => Ok(DegradationAction::Fail),
            other => Err(format!("unknown degradation action: {other}")),
        }
    }
}

impl DegradationAction {
    /// Apply the configured action to an unavailable-dependency message.
    ///
    /// Returns whether the caller should continue.
    pub fn handle(&self, message: &str) -> bool {
        match self {
            DegradationAction::Warn => {
                tracing::warn!("{message}");
                true
            }
            DegradationAction::Skip => {
                tracing::debug!("skipping: {message}");
                true
            }
            DegradationAction::Fail => {
                tracing::error!("{message}");
                false
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeadsConfig {
    pub auto_sync: bool,
    pub daemon: bool,
    pub prefix: Option<String>,
}

impl Default for BeadsConfig {
    fn default() -> Self {
        Self {
            auto_sync: true,
            daemon: true,
            prefix: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuiltinConfig {
    /// Explicit task list id; derived from the project path when unset
    pub task_list_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegradationConfig {
    pub on_tracker_unavailable: DegradationAction,
    pub on_rlm_unavailable: DegradationAction,
    pub on_adversary_unavailable: DegradationAction,
}

impl Default for DegradationConfig {
    fn default() -> Self {
        Self {
            on_tracker_unavailable: DegradationAction::Warn,
            on_rlm_unavailable: DegradationAction::Skip,
            on_adversary_unavailable: DegradationAction::Skip,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    pub stub_threshold_lines: usize,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            stub_threshold_lines: DEFAULT_STUB_THRESHOLD_LINES,
        }
    }
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DpConfig {
    pub version: ConfigVersion,
    pub project_name: String,
    pub project_language: String,
    pub task_tracker: TaskTracker,
    pub beads: BeadsConfig,
    pub builtin: BuiltinConfig,
    pub degradation: DegradationConfig,
    pub verification: VerificationConfig,
    /// File the config was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for DpConfig {
    fn default() -> Self {
        Self {
            version: ConfigVersion::V2,
            project_name: String::new(),
            project_language: String::new(),
            task_tracker: TaskTracker::Chainlink,
            beads: BeadsConfig::default(),
            builtin: BuiltinConfig::default(),
            degradation: DegradationConfig::default(),
            verification: VerificationConfig::default(),
            source: None,
        }
    }
}

/// On-disk shape accepted for both schema versions.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    version: Option<serde_yaml::Value>,
    project: RawProject,
    task_tracker: Option<String>,
    tracking: RawTracking,
    beads: BeadsConfig,
    builtin: BuiltinConfig,
    degradation: RawDegradation,
    verification: VerificationConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawProject {
    name: String,
    language: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTracking {
    provider: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDegradation {
    on_tracker_unavailable: Option<String>,
    on_rlm_unavailable: Option<String>,
    on_adversary_unavailable: Option<String>,
}

impl DpConfig {
    /// Find and load the project's config file, or defaults if none exists.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        match Self::find(project_root) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// First existing config file under `project_root`.
    pub fn find(project_root: &Path) -> Option<PathBuf> {
        CONFIG_CANDIDATES
            .iter()
            .map(|candidate| project_root.join(candidate))
            .find(|path| path.is_file())
    }

    /// Load a specific config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse YAML content. A missing `version` key means the 1.0 schema.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::from_raw(RawConfig::default()));
        }
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        if value.is_null() {
            return Ok(Self::from_raw(RawConfig::default()));
        }
        let raw: RawConfig = serde_yaml::from_value(value)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawConfig) -> Self {
        let version = parse_version(raw.version.as_ref());
        let defaults = DegradationConfig::default();

        let task_tracker = match version {
            ConfigVersion::V1 => raw
                .tracking
                .provider
                .as_deref()
                .and_then(|p| p.parse().ok())
                .unwrap_or(TaskTracker::Beads),
            ConfigVersion::V2 => raw
                .task_tracker
                .as_deref()
                .and_then(|t| t.parse().ok())
                .unwrap_or(TaskTracker::Chainlink),
        };

        let action = |value: Option<&str>, fallback: DegradationAction| {
            value.and_then(|v| v.parse().ok()).unwrap_or(fallback)
        };

        Self {
            version,
            project_name: raw.project.name,
            project_language: raw.project.language,
            task_tracker,
            beads: raw.beads,
            builtin: raw.builtin,
            degradation: DegradationConfig {
                on_tracker_unavailable: action(
                    raw.degradation.on_tracker_unavailable.as_deref(),
                    defaults.on_tracker_unavailable,
                ),
                on_rlm_unavailable: action(
                    raw.degradation.on_rlm_unavailable.as_deref(),
                    defaults.on_rlm_unavailable,
                ),
                on_adversary_unavailable: action(
                    raw.degradation.on_adversary_unavailable.as_deref(),
                    defaults.on_adversary_unavailable,
                ),
            },
            verification: raw.verification,
            source: None,
        }
    }
}

fn parse_version(value: Option<&serde_yaml::Value>) -> ConfigVersion {
    let text = match value {
        None => return ConfigVersion::V1,
        Some(serde_yaml::Value::String(s)) => s.trim().to_string(),
        Some(serde_yaml::Value::Number(n)) => n.to_string(),
        Some(_) => return ConfigVersion::V2,
    };
    match text.as_str() {
        "1" | "1.0" => ConfigVersion::V1,
        // Unknown versions are read with the newest schema
        _ => ConfigVersion::V2,
    }
}
