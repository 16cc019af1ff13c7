//! Task completeness: does every task say how it will be verified?

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::types::Task;

/// Criteria markers in priority order: (label, pattern). First match wins.
pub const CRITERIA_RULES: &[(&str, &str)] = &[
    ("Acceptance Criteria", r"(?i)acceptance\s+criteria:"),
    ("Spec Trace", r"(?i)@trace\s+SPEC-\d+\.\d+"),
    ("Must-Have", r"(?i)@must_have:"),
    ("Success Criteria", r"(?i)success\s+criteria:"),
    ("Done Criteria", r"(?i)done\s+(?:when|criteria):"),
];

static COMPILED_RULES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    CRITERIA_RULES
        .iter()
        .map(|(label, pattern)| (*label, Regex::new(pattern).expect("valid criteria pattern")))
        .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskCompletenessResult {
    pub task_id: String,
    pub task_title: String,
    pub has_criteria: bool,
    /// Label of the first matching criteria marker, empty when none matched
    pub criteria_type: String,
}

/// Label of the first criteria marker found in `description`.
pub fn criteria_type(description: &str) -> Option<&'static str> {
    COMPILED_RULES
        .iter()
        .find(|(_, re)| re.is_match(description))
        .map(|(label, _)| *label)
}

pub fn check_task_completeness(tasks: &[Task]) -> Vec<TaskCompletenessResult> {
    tasks
        .iter()
        .map(|task| {
            let found = criteria_type(&task.description);
            TaskCompletenessResult {
                task_id: task.id.clone(),
                task_title: task.title.clone(),
                has_criteria: found.is_some(),
                criteria_type: found.unwrap_or_default().to_string(),
            }
        })
        .collect()
}
