//! Command implementations for the `dp` binary
//!
//! Each command returns whether it succeeded so the binary can map the
//! outcome to an exit code; `Err` is reserved for I/O and parse failures.

pub mod health;
pub mod stub;
pub mod validate;
pub mod verify;

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

use crate::config::DpConfig;
use crate::degradation::DegradationEngine;
use crate::fs::project::ProjectDir;

/// Project directory and configuration shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub project: ProjectDir,
    pub config: DpConfig,
}

impl Context {
    /// Resolve the project (explicit dir, `CLAUDE_PROJECT_DIR`, or cwd) and
    /// load its configuration. A broken config file falls back to defaults;
    /// `dp health` reports it separately.
    pub fn load(project_dir: Option<PathBuf>) -> Self {
        let project = project_dir
            .map(ProjectDir::new)
            .unwrap_or_else(ProjectDir::from_env);
        let config = DpConfig::load(project.root()).unwrap_or_else(|e| {
            warn!(error = %e, "using default configuration");
            DpConfig::default()
        });
        Self { project, config }
    }

    pub fn engine(&self) -> DegradationEngine {
        DegradationEngine::for_project(&self.project, &self.config)
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}
