//! Goal-backward verification command
//!
//! Checks a task's TRUTHS, ARTIFACTS, and KEY LINKS against the project tree.

use anyhow::{Context as _, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use super::{print_json, Context};
use crate::plan::Task;
use crate::verify::{verify_task, VerificationResult, VerificationStatus};

/// Read one task from a JSON file.
pub fn load_task(path: &Path) -> Result<Task> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read task file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse task file: {}", path.display()))
}

/// Verify the task in `task_file`. Succeeds unless the result is FAILED.
pub fn execute(ctx: &Context, task_file: &Path, threshold: Option<usize>, json: bool) -> Result<bool> {
    let task = load_task(task_file)?;
    let threshold = threshold.unwrap_or(ctx.config.verification.stub_threshold_lines);
    let result = verify_task(&task, ctx.project.root(), threshold);

    if json {
        print_json(&result)?;
    } else {
        print_result(&result);
    }
    Ok(result.status != VerificationStatus::Failed)
}

fn print_result(result: &VerificationResult) {
    println!("{} Verifying: {}\n", "→".cyan().bold(), result.task_id.bold());

    if !result.truths.is_empty() {
        println!("{}", "Truths:".bold());
        for truth in &result.truths {
            println!("  {} {}", truth.status.marker().yellow(), truth.description);
        }
        println!();
    }

    if !result.artifacts.is_empty() {
        println!("{}", "Artifacts:".bold());
        for artifact in &result.artifacts {
            let (marker, detail) = if !artifact.exists {
                ("[FAIL]".red().bold(), "missing".to_string())
            } else if artifact.is_unreadable() {
                ("[FAIL]".red().bold(), artifact.details.clone())
            } else if artifact.is_stub {
                (
                    "[STUB]".yellow().bold(),
                    format!("{} lines, {}", artifact.line_count, artifact.details),
                )
            } else {
                ("[ok]".green(), format!("{} lines", artifact.line_count))
            };
            println!("  {marker} {} ({detail})", artifact.path.display());
        }
        println!();
    }

    if !result.links.is_empty() {
        println!("{}", "Links:".bold());
        for link in &result.links {
            let marker = if link.is_connected {
                "[ok]".green()
            } else {
                "[FAIL]".red().bold()
            };
            let name = |p: &Path| {
                p.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            };
            println!(
                "  {marker} {} -> {} ({}) {}",
                name(link.from_path.as_path()),
                name(link.to_path.as_path()),
                link.link_type,
                link.details.dimmed()
            );
        }
        println!();
    }

    if !result.errors.is_empty() {
        println!("{}", "Errors:".red().bold());
        for error in &result.errors {
            println!("  - {error}");
        }
        println!();
    }

    let status = match result.status {
        VerificationStatus::Verified => result.status.as_str().green().bold(),
        VerificationStatus::Incomplete => result.status.as_str().yellow().bold(),
        VerificationStatus::Failed => result.status.as_str().red().bold(),
    };
    println!("{} {status}", "Status:".bold());
}
