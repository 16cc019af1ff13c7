//! Plan validation: coverage, completeness, and dependencies combined

use serde::Serialize;
use std::fmt;

use super::completeness::{check_task_completeness, TaskCompletenessResult};
use super::coverage::{check_requirement_coverage, CoverageResult};
use super::graph::{check_dependencies, DependencyResult};
use super::types::{Spec, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidationStatus {
    Pass,
    Warn,
    Fail,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Pass => "PASS",
            ValidationStatus::Warn => "WARN",
            ValidationStatus::Fail => "FAIL",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanValidationResult {
    pub status: ValidationStatus,
    pub coverage: Vec<CoverageResult>,
    pub completeness: Vec<TaskCompletenessResult>,
    pub dependencies: DependencyResult,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl PlanValidationResult {
    pub fn covered_count(&self) -> usize {
        self.coverage.iter().filter(|c| c.is_covered).count()
    }

    pub fn complete_count(&self) -> usize {
        self.completeness.iter().filter(|c| c.has_criteria).count()
    }
}

/// Run every plan check. Errors come from the dependency graph only;
/// uncovered specs, tasks without criteria, and one-sided links are warnings.
pub fn validate_plan(specs: &[Spec], tasks: &[Task]) -> PlanValidationResult {
    let coverage = check_requirement_coverage(specs, tasks);
    let completeness = check_task_completeness(tasks);
    let dependencies = check_dependencies(tasks);

    let mut warnings: Vec<String> = coverage
        .iter()
        .filter(|c| !c.is_covered)
        .map(|c| format!("{} has no implementing task", c.spec_id))
        .collect();
    warnings.extend(
        completeness
            .iter()
            .filter(|c| !c.has_criteria)
            .map(|c| format!("Task {} missing verification criteria", c.task_id)),
    );
    warnings.extend(dependencies.inconsistencies.iter().cloned());

    let mut errors: Vec<String> = dependencies
        .cycles
        .iter()
        .map(|cycle| format!("Circular dependency: {cycle}"))
        .collect();
    errors.extend(dependencies.missing_refs.iter().map(|missing| {
        let referrers = referrers_of(tasks, missing);
        if referrers.is_empty() {
            format!("Reference to non-existent task: {missing}")
        } else {
            format!(
                "Reference to non-existent task: {missing} (from {})",
                referrers.join(", ")
            )
        }
    }));

    let status = if !errors.is_empty() {
        ValidationStatus::Fail
    } else if !warnings.is_empty() {
        ValidationStatus::Warn
    } else {
        ValidationStatus::Pass
    };

    PlanValidationResult {
        status,
        coverage,
        completeness,
        dependencies,
        warnings,
        errors,
    }
}

fn referrers_of<'a>(tasks: &'a [Task], missing: &str) -> Vec<&'a str> {
    tasks
        .iter()
        .filter(|t| t.blocked_by.iter().chain(&t.blocks).any(|id| id == missing))
        .map(|t| t.id.as_str())
        .collect()
}
