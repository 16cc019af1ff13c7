//! Task dependency graph checks
//!
//! Edges run from a task to each task in its `blockedBy` list. `blocks` is
//! only used for reference checks and for spotting one-sided declarations.

mod cycle;


use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::types::Task;

pub use cycle::find_cycle;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyResult {
    pub is_valid: bool,
    pub has_cycles: bool,
    /// Referenced task ids that do not exist, first-seen order
    pub missing_refs: Vec<String>,
    /// One entry per detected cycle: a " -> " path, or "<id> references itself"
    pub cycles: Vec<String>,
    /// `blocks`/`blockedBy` pairs declared on one side only
    pub inconsistencies: Vec<String>,
}

impl DependencyResult {
    fn push_missing(&mut self, id: &str) {
        if !self.missing_refs.iter().any(|m| m == id) {
            self.missing_refs.push(id.to_string());
        }
    }
}

/// Validate references and look for circular dependencies.
///
/// Self-references (in either list) are cycles of length one. Beyond those,
/// the search stops at the first cycle found, so `cycles` holds at most one
/// multi-task entry.
pub fn check_dependencies(tasks: &[Task]) -> DependencyResult {
    let mut result = DependencyResult::default();

    let by_id: HashMap<&str, &Task> = tasks
        .iter()
        .rev()
        .map(|task| (task.id.as_str(), task))
        .collect();
    let known: HashSet<&str> = by_id.keys().copied().collect();

    let mut order: Vec<String> = Vec::new();
    let mut edges: HashMap<String, Vec<String>> = HashMap::new();

    for task in tasks {
        if !edges.contains_key(&task.id) {
            order.push(task.id.clone());
        }
        let deps = edges.entry(task.id.clone()).or_default();

        for dep in &task.blocked_by {
            if dep == &task.id {
                result.cycles.push(format!("{} references itself", task.id));
            } else if !known.contains(dep.as_str()) {
                result.push_missing(dep);
            } else {
                deps.push(dep.clone());
            }
        }

        for blocked in &task.blocks {
            if blocked == &task.id {
                result.cycles.push(format!("{} references itself", task.id));
            } else if !known.contains(blocked.as_str()) {
                result.push_missing(blocked);
            }
        }
    }

    if let Some(cycle) = find_cycle(&order, &edges) {
        result.cycles.push(cycle.join(" -> "));
    }

    result.inconsistencies = find_inconsistencies(tasks, &by_id);
    result.has_cycles = !result.cycles.is_empty();
    result.is_valid = !result.has_cycles && result.missing_refs.is_empty();
    result
}

fn find_inconsistencies(tasks: &[Task], by_id: &HashMap<&str, &Task>) -> Vec<String> {
    let mut found = Vec::new();
    let mut push = |message: String| {
        if !found.contains(&message) {
            found.push(message);
        }
    };

    for task in tasks {
        for blocked in task.blocks.iter().filter(|id| **id != task.id) {
            if let Some(other) = by_id.get(blocked.as_str()) {
                if !other.blocked_by.contains(&task.id) {
                    push(format!(
                        "{} blocks {} but {} is not blocked by {}",
                        task.id, blocked, blocked, task.id
                    ));
                }
            }
        }
        for dep in task.blocked_by.iter().filter(|id| **id != task.id) {
            if let Some(other) = by_id.get(dep.as_str()) {
                if !other.blocks.contains(&task.id) {
                    push(format!(
                        "{} is blocked by {} but {} does not block {}",
                        task.id, dep, dep, task.id
                    ));
                }
            }
        }
    }

    found
}
