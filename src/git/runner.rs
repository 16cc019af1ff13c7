//! Git command runner
//!
//! Centralizes how git is invoked: always in the project root, always under a
//! deadline.

use anyhow::Result;
use std::path::Path;
use std::time::Duration;

use crate::process::{run_with_timeout, CommandOutcome};

/// Deadline for quick read-only git commands (status, rev-parse).
pub const GIT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Run a git command and return the raw outcome.
///
/// Spawn failures (git not installed) surface as `Err`; non-zero exits and
/// timeouts are in the returned [`CommandOutcome`].
pub fn run_git(args: &[&str], repo_root: &Path, timeout: Duration) -> Result<CommandOutcome> {
    run_with_timeout("git", args, Some(repo_root), timeout)
}

/// Run a git command and return true if it exited 0 within the deadline.
///
/// Swallows spawn failures, non-zero exits and timeouts alike.
pub fn run_git_bool(args: &[&str], repo_root: &Path, timeout: Duration) -> bool {
    run_git(args, repo_root, timeout)
        .map(|outcome| outcome.success)
        .unwrap_or(false)
}
