//! Plan validation command

use anyhow::{Context as _, Result};
use colored::Colorize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use super::{print_json, Context};
use crate::plan::{validate_plan, PlanValidationResult, Spec, Task, ValidationStatus};
use crate::providers::BuiltinProvider;

fn load_json_list<T: DeserializeOwned>(path: &Path, what: &str) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {what} file: {}", path.display()))
}

/// Validate a plan. Tasks default to the builtin task list for the project;
/// specs default to none. Succeeds unless the plan FAILs.
pub fn execute(
    ctx: &Context,
    tasks_file: Option<&Path>,
    specs_file: Option<&Path>,
    json: bool,
) -> Result<bool> {
    let tasks: Vec<Task> = match tasks_file {
        Some(path) => load_json_list(path, "tasks")?,
        None => BuiltinProvider::new(ctx.config.builtin.task_list_id.clone())
            .tasks(ctx.project.root()),
    };
    let specs: Vec<Spec> = match specs_file {
        Some(path) => load_json_list(path, "specs")?,
        None => Vec::new(),
    };

    let result = validate_plan(&specs, &tasks);
    if json {
        print_json(&result)?;
    } else {
        print_result(&result);
    }
    Ok(result.status != ValidationStatus::Fail)
}

fn print_result(result: &PlanValidationResult) {
    println!("{}", "Plan Validation".bold());

    if !result.coverage.is_empty() {
        println!(
            "  Coverage:     {}/{} specs have an implementing task",
            result.covered_count(),
            result.coverage.len()
        );
    }
    println!(
        "  Completeness: {}/{} tasks state verification criteria",
        result.complete_count(),
        result.completeness.len()
    );
    let deps = &result.dependencies;
    let dep_summary = if deps.is_valid {
        "valid".green()
    } else if deps.has_cycles {
        "circular".red()
    } else {
        "broken references".red()
    };
    println!("  Dependencies: {dep_summary}");

    if !result.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for error in &result.errors {
            println!("  {} {error}", "✗".red());
        }
    }
    if !result.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &result.warnings {
            println!("  {} {warning}", "!".yellow());
        }
    }

    let status = match result.status {
        ValidationStatus::Pass => result.status.as_str().green().bold(),
        ValidationStatus::Warn => result.status.as_str().yellow().bold(),
        ValidationStatus::Fail => result.status.as_str().red().bold(),
    };
    println!("\n{} {status}", "Status:".bold());
}
