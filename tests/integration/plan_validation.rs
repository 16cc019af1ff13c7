//! Plan validation over task lists as trackers export them

use disciplined::plan::{validate_plan, Spec, Task, ValidationStatus};
use disciplined::providers::BuiltinProvider;

use super::helpers::{temp_project, write_file};

fn load_tasks(json: &str) -> Vec<Task> {
    serde_json::from_str(json).expect("valid task list")
}

#[test]
fn test_complete_plan_passes() {
    let tasks = load_tasks(
        r#"[
        {"id":"t1","title":"SPEC-01.01 login form",
         "description":"Acceptance Criteria:\n- form renders","blocks":["t2"],"blockedBy":[]},
        {"id":"t2","title":"SPEC-01.02 session",
         "description":"Done when: session cookie is set","blocks":[],"blockedBy":["t1"]}
    ]"#,
    );
    let specs = vec![
        Spec::new("SPEC-01.01", "Login form"),
        Spec::new("SPEC-01.02", "Session"),
    ];

    let result = validate_plan(&specs, &tasks);
    assert_eq!(result.status, ValidationStatus::Pass);
    assert_eq!(result.covered_count(), 2);
    assert_eq!(result.complete_count(), 2);
    assert!(result.dependencies.is_valid);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_gaps_are_warnings() {
    let tasks = load_tasks(
        r#"[
        {"id":"t1","title":"Login form","description":"Acceptance Criteria:\n- renders",
         "blocks":["t2"],"blockedBy":null},
        {"id":"t2","title":"Session handling","description":null}
    ]"#,
    );
    let specs = vec![Spec::new("SPEC-02.01", "Password reset")];

    let result = validate_plan(&specs, &tasks);
    assert_eq!(result.status, ValidationStatus::Warn);
    assert!(result.errors.is_empty());
    assert!(result
        .warnings
        .contains(&"SPEC-02.01 has no implementing task".to_string()));
    assert!(result
        .warnings
        .contains(&"Task t2 missing verification criteria".to_string()));
    assert!(result
        .warnings
        .contains(&"t1 blocks t2 but t2 is not blocked by t1".to_string()));
}

#[test]
fn test_cycle_fails_plan() {
    let tasks = vec![
        Task::new("t1", "One").with_blocked_by(&["t3"]),
        Task::new("t2", "Two").with_blocked_by(&["t1"]),
        Task::new("t3", "Three").with_blocked_by(&["t2"]),
    ];

    let result = validate_plan(&[], &tasks);
    assert_eq!(result.status, ValidationStatus::Fail);
    assert!(result.dependencies.has_cycles);
    assert_eq!(result.dependencies.cycles, vec!["t1 -> t3 -> t2 -> t1"]);
    assert!(result.errors[0].starts_with("Circular dependency:"));
}

#[test]
fn test_missing_reference_names_referrers() {
    let tasks = vec![
        Task::new("t1", "One").with_blocks(&["ghost"]),
        Task::new("t2", "Two").with_blocked_by(&["ghost"]),
    ];

    let result = validate_plan(&[], &tasks);
    assert_eq!(result.status, ValidationStatus::Fail);
    assert_eq!(result.dependencies.missing_refs, vec!["ghost"]);
    assert_eq!(
        result.errors,
        vec!["Reference to non-existent task: ghost (from t1, t2)"]
    );
}

#[test]
fn test_builtin_task_files_feed_validation() {
    let project = temp_project();
    let list = project.path().join("tasks");
    write_file(
        &list,
        "1.json",
        r#"{"id":"1","subject":"SPEC-03.01 export","description":"@trace SPEC-03.01","status":"pending","blocks":[],"blockedBy":[]}"#,
    );
    write_file(
        &list,
        "2.json",
        r#"{"id":2,"subject":"Import","description":"","status":"pending","blocks":[],"blockedBy":["9"]}"#,
    );

    let tasks = BuiltinProvider::with_tasks_dir(&list).tasks(project.path());
    assert_eq!(tasks.len(), 2);

    let result = validate_plan(&[Spec::new("SPEC-03.01", "Export")], &tasks);
    assert_eq!(result.status, ValidationStatus::Fail);
    assert_eq!(result.coverage[0].task_id.as_deref(), Some("1"));
    assert_eq!(result.completeness[0].criteria_type, "Spec Trace");
    assert_eq!(result.dependencies.missing_refs, vec!["9"]);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["status"], "FAIL");
}
