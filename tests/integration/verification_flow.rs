//! Goal-backward verification of tasks against files on disk

use disciplined::plan::Task;
use disciplined::verify::{
    verify_task, TruthStatus, VerificationStatus, DEFAULT_THRESHOLD_LINES,
};
use std::fs;

use super::helpers::{substantive_module, temp_project, write_file};

fn task(description: &str) -> Task {
    Task::new("auth-1", "Password hashing").with_description(description)
}

#[test]
fn test_substantive_artifacts_and_connected_link_verify() {
    let project = temp_project();
    write_file(project.path(), "src/auth.py", &substantive_module());
    let mut app = String::from("from auth import check_password\n\n");
    app.push_str(&substantive_module());
    write_file(project.path(), "src/app.py", &app);

    let description = "Hash passwords before storing them.\n\n\
        Artifacts:\n- src/auth.py\n- src/app.py\n\n\
        Key Links:\n- src/auth.py -> src/app.py : check_password\n";
    let result = verify_task(&task(description), project.path(), DEFAULT_THRESHOLD_LINES);

    assert_eq!(result.status, VerificationStatus::Verified, "{result:?}");
    assert!(result.is_verified());
    assert_eq!(result.artifacts.len(), 2);
    assert!(result.artifacts.iter().all(|a| a.is_substantive));
    assert_eq!(result.links.len(), 1);
    assert!(result.links[0].is_connected);
    assert!(result.errors.is_empty());
}

#[test]
fn test_truths_keep_task_incomplete_until_confirmed() {
    let project = temp_project();
    write_file(project.path(), "src/auth.py", &substantive_module());

    let description = "Acceptance Criteria:\n- hashes are salted\n- wrong passwords are rejected\n\n\
        Artifacts:\n- src/auth.py\n";
    let result = verify_task(&task(description), project.path(), DEFAULT_THRESHOLD_LINES);

    assert_eq!(result.status, VerificationStatus::Incomplete);
    assert_eq!(result.truths.len(), 2);
    assert!(result.truths.iter().all(|t| t.status == TruthStatus::Unknown));
    assert_eq!(result.truths[0].description, "hashes are salted");
}

#[test]
fn test_stub_artifact_is_incomplete() {
    let project = temp_project();
    write_file(project.path(), "src/auth.py", "def hash_password(p):\n    pass\n");

    let result = verify_task(
        &task("Artifacts:\n- src/auth.py\n"),
        project.path(),
        DEFAULT_THRESHOLD_LINES,
    );

    assert_eq!(result.status, VerificationStatus::Incomplete);
    let artifact = &result.artifacts[0];
    assert!(artifact.exists);
    assert!(artifact.is_stub);
    assert!(artifact.details.starts_with("stub detected by"));
}

#[test]
fn test_missing_artifact_fails() {
    let project = temp_project();
    write_file(project.path(), "src/auth.py", &substantive_module());

    let result = verify_task(
        &task("Artifacts:\n- src/auth.py\n- src/session.py\n"),
        project.path(),
        DEFAULT_THRESHOLD_LINES,
    );

    assert_eq!(result.status, VerificationStatus::Failed);
    assert!(!result.is_verified());
    let missing: Vec<_> = result.artifacts.iter().filter(|a| !a.exists).collect();
    assert_eq!(missing.len(), 1);
    assert!(missing[0].path.ends_with("src/session.py"));
}

#[test]
fn test_glob_artifacts_expand_in_sorted_order() {
    let project = temp_project();
    write_file(project.path(), "handlers/b.py", &substantive_module());
    write_file(project.path(), "handlers/a.py", &substantive_module());
    fs::create_dir_all(project.path().join("handlers/sub.py")).unwrap();

    let result = verify_task(
        &task("Artifacts:\n- handlers/*.py\n"),
        project.path(),
        DEFAULT_THRESHOLD_LINES,
    );

    let names: Vec<_> = result
        .artifacts
        .iter()
        .map(|a| a.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.py", "b.py"]);
    assert_eq!(result.status, VerificationStatus::Verified);
}

#[test]
fn test_disconnected_link_is_incomplete() {
    let project = temp_project();
    write_file(project.path(), "src/auth.py", &substantive_module());
    write_file(project.path(), "src/app.py", &substantive_module());

    let description = "Artifacts:\n- src/auth.py\n- src/app.py\n\n\
        Key Links:\n- src/auth.py -> src/app.py\n";
    let result = verify_task(&task(description), project.path(), DEFAULT_THRESHOLD_LINES);

    assert_eq!(result.status, VerificationStatus::Incomplete);
    assert!(!result.links[0].is_connected);
}

#[test]
fn test_malformed_link_is_an_error() {
    let project = temp_project();
    write_file(project.path(), "src/auth.py", &substantive_module());

    let description = "Artifacts:\n- src/auth.py\n\nKey Links:\n- src/auth.py -> src/app.py (telepathy)\n";
    let result = verify_task(&task(description), project.path(), DEFAULT_THRESHOLD_LINES);

    assert_eq!(result.status, VerificationStatus::Failed);
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn test_verification_result_serializes_for_hooks() {
    let project = temp_project();
    let result = verify_task(&task("No criteria here"), project.path(), DEFAULT_THRESHOLD_LINES);

    assert_eq!(result.status, VerificationStatus::Incomplete);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["status"], "INCOMPLETE");
    assert_eq!(json["task_id"], "auth-1");
}
