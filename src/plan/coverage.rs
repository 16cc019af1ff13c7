//! Requirement coverage: does every spec have a task?
//!
//! Coverage is a coarse textual match (the spec id appears in a task's title
//! or description), good enough before any code or trace markers exist.

use serde::Serialize;

use super::types::{Spec, Task};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageResult {
    pub spec_id: String,
    pub spec_title: String,
    pub is_covered: bool,
    /// First task that mentions the spec
    pub task_id: Option<String>,
}

/// One result per spec, in input order.
pub fn check_requirement_coverage(specs: &[Spec], tasks: &[Task]) -> Vec<CoverageResult> {
    let task_texts: Vec<(&str, String)> = tasks
        .iter()
        .map(|task| {
            let text = format!("{} {}", task.title, task.description).to_uppercase();
            (task.id.as_str(), text)
        })
        .collect();

    specs
        .iter()
        .map(|spec| {
            let needle = spec.id.to_uppercase();
            let covering = task_texts
                .iter()
                .find(|(_, text)| text.contains(&needle))
                .map(|(id, _)| id.to_string());

            CoverageResult {
                spec_id: spec.id.clone(),
                spec_title: spec.title.clone(),
                is_covered: covering.is_some(),
                task_id: covering,
            }
        })
        .collect()
}
