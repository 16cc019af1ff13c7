//! Stub check for a single file

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::{print_json, Context};
use crate::verify::check_artifact_substance;

#[derive(Serialize)]
struct StubReport {
    path: PathBuf,
    exists: bool,
    is_stub: bool,
    line_count: usize,
    details: String,
}

/// Classify `file`. Succeeds when it exists and is not a stub.
pub fn execute(ctx: &Context, file: &Path, threshold: Option<usize>, json: bool) -> Result<bool> {
    let threshold = threshold.unwrap_or(ctx.config.verification.stub_threshold_lines);
    let artifact = check_artifact_substance(file, threshold);
    let ok = artifact.exists && artifact.is_substantive;

    if json {
        print_json(&StubReport {
            path: artifact.path,
            exists: artifact.exists,
            is_stub: artifact.is_stub,
            line_count: artifact.line_count,
            details: artifact.details,
        })?;
    } else if !artifact.exists {
        println!("{} {} does not exist", "✗".red().bold(), file.display());
    } else if artifact.is_unreadable() {
        println!("{} {}: {}", "✗".red().bold(), file.display(), artifact.details);
    } else if artifact.is_stub {
        println!(
            "{} {} looks like a stub ({} lines, {})",
            "!".yellow().bold(),
            file.display(),
            artifact.line_count,
            artifact.details
        );
    } else {
        println!(
            "{} {} has a real implementation ({} lines)",
            "✓".green().bold(),
            file.display(),
            artifact.line_count
        );
    }
    Ok(ok)
}
