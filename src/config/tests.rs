//! Tests for config loading

use super::*;
use tempfile::TempDir;

#[test]
fn test_defaults_when_no_file() {
    let dir = TempDir::new().unwrap();
    let config = DpConfig::load(dir.path()).unwrap();
    assert_eq!(config, DpConfig::default());
    assert_eq!(config.task_tracker, TaskTracker::Chainlink);
    assert_eq!(config.verification.stub_threshold_lines, 10);
}

#[test]
fn test_v2_config() {
    let yaml = r#"
version: "2.0"
project:
  name: demo
  language: rust
task_tracker: beads
beads:
  daemon: false
degradation:
  on_tracker_unavailable: fail
verification:
  stub_threshold_lines: 6
"#;
    let config = DpConfig::parse(yaml).unwrap();
    assert_eq!(config.version, ConfigVersion::V2);
    assert_eq!(config.project_name, "demo");
    assert_eq!(config.task_tracker, TaskTracker::Beads);
    assert!(!config.beads.daemon);
    assert!(config.beads.auto_sync);
    assert_eq!(
        config.degradation.on_tracker_unavailable,
        DegradationAction::Fail
    );
    assert_eq!(
        config.degradation.on_rlm_unavailable,
        DegradationAction::Skip
    );
    assert_eq!(config.verification.stub_threshold_lines, 6);
}

#[test]
fn test_numeric_version_is_accepted() {
    let config = DpConfig::parse("version: 2.0\ntask_tracker: github\n").unwrap();
    assert_eq!(config.version, ConfigVersion::V2);
    assert_eq!(config.task_tracker, TaskTracker::GitHub);
}

#[test]
fn test_v1_uses_tracking_provider() {
    let yaml = "version: \"1.0\"\ntracking:\n  provider: markdown\n";
    let config = DpConfig::parse(yaml).unwrap();
    assert_eq!(config.version, ConfigVersion::V1);
    assert_eq!(config.task_tracker, TaskTracker::Markdown);
}

#[test]
fn test_missing_version_means_v1() {
    let config = DpConfig::parse("project:\n  name: legacy\n").unwrap();
    assert_eq!(config.version, ConfigVersion::V1);
    assert_eq!(config.task_tracker, TaskTracker::Beads);
}

#[test]
fn test_unknown_tracker_falls_back() {
    let config = DpConfig::parse("version: \"2.0\"\ntask_tracker: jira\n").unwrap();
    assert_eq!(config.task_tracker, TaskTracker::Chainlink);
}

#[test]
fn test_unknown_action_falls_back() {
    let yaml = "version: \"2.0\"\ndegradation:\n  on_tracker_unavailable: explode\n";
    let config = DpConfig::parse(yaml).unwrap();
    assert_eq!(
        config.degradation.on_tracker_unavailable,
        DegradationAction::Warn
    );
}

#[test]
fn test_empty_file_reads_as_v1() {
    let config = DpConfig::parse("   \n").unwrap();
    assert_eq!(config.version, ConfigVersion::V1);
    assert_eq!(config.task_tracker, TaskTracker::Beads);
}

#[test]
fn test_invalid_yaml_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let claude = dir.path().join(".claude");
    std::fs::create_dir_all(&claude).unwrap();
    std::fs::write(claude.join("dp-config.yaml"), "task_tracker: [unclosed").unwrap();

    let err = DpConfig::load(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("dp-config.yaml"));
}

#[test]
fn test_lookup_order_prefers_claude_dir() {
    let dir = TempDir::new().unwrap();
    let claude = dir.path().join(".claude");
    std::fs::create_dir_all(&claude).unwrap();
    std::fs::write(claude.join("dp-config.yaml"), "version: \"2.0\"\ntask_tracker: linear\n")
        .unwrap();
    std::fs::write(dir.path().join("dp-config.yaml"), "version: \"2.0\"\ntask_tracker: none\n")
        .unwrap();

    let config = DpConfig::load(dir.path()).unwrap();
    assert_eq!(config.task_tracker, TaskTracker::Linear);
    assert_eq!(config.source, Some(claude.join("dp-config.yaml")));
}

#[test]
fn test_degradation_action_handle() {
    assert!(DegradationAction::Warn.handle("tracker missing"));
    assert!(DegradationAction::Skip.handle("tracker missing"));
    assert!(!DegradationAction::Fail.handle("tracker missing"));
}

#[test]
fn test_tracker_round_trips_through_str() {
    for tracker in [
        TaskTracker::Chainlink,
        TaskTracker::Beads,
        TaskTracker::GitHub,
        TaskTracker::Linear,
        TaskTracker::Markdown,
        TaskTracker::Builtin,
        TaskTracker::None,
    ] {
        assert_eq!(tracker.as_str().parse::<TaskTracker>().unwrap(), tracker);
    }
}
