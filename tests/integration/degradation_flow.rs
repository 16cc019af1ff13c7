//! Degradation engine against real probes and a state file on disk

use disciplined::config::DpConfig;
use disciplined::degradation::{
    ComponentId, ConfigProbe, DegradationEngine, DegradationLevel, GitProbe, HealthProbe,
    StateStore,
};
use disciplined::fs::ProjectDir;
use serial_test::serial;
use std::env;
use std::fs;
use std::path::Path;

use super::helpers::{init_test_repo, temp_project, write_config};

const BROKEN_YAML: &str = "version: [2.0\ntask_tracker: {markdown\n";
const MARKDOWN_V2: &str = "version: \"2.0\"\ntask_tracker: markdown\n";

fn config_engine(root: &Path) -> DegradationEngine {
    let probes: Vec<Box<dyn HealthProbe>> = vec![Box::new(ConfigProbe::new(root))];
    DegradationEngine::with_probes(ProjectDir::new(root).degradation_state_file(), probes)
}

#[test]
fn test_broken_config_degrades_to_manual_and_recovers() {
    let project = temp_project();
    write_config(project.path(), BROKEN_YAML);
    let engine = config_engine(project.path());

    let state = engine.run_health_checks();
    assert_eq!(state.level, DegradationLevel::Manual);
    assert!(state.transition_reason.contains("config"));
    let config = &state.components[&ComponentId::Config];
    assert!(!config.healthy);
    assert!(config.recovery_attempted);
    assert!(!config.recovery_succeeded);

    // Persisted for the next hook invocation
    let reloaded = StateStore::new(engine.state_file()).load();
    assert_eq!(reloaded.level, DegradationLevel::Manual);

    write_config(project.path(), MARKDOWN_V2);
    let state = engine.run_health_checks();
    assert_eq!(state.level, DegradationLevel::Full);
    assert_eq!(state.transition_reason, "All components healthy");
    assert!(!state.components[&ComponentId::Config].recovery_attempted);
}

#[test]
fn test_recovery_is_attempted_once_per_episode() {
    let project = temp_project();
    write_config(project.path(), BROKEN_YAML);
    let engine = config_engine(project.path());

    let first = engine.run_health_checks();
    let first_transition = first.last_transition;
    let second = engine.run_health_checks();

    assert_eq!(second.level, DegradationLevel::Manual);
    assert!(second.components[&ComponentId::Config].recovery_attempted);
    assert_eq!(second.last_transition, first_transition);
}

#[test]
fn test_lock_survives_new_engine_instances() {
    let project = temp_project();
    config_engine(project.path()).lock("release freeze").unwrap();

    write_config(project.path(), BROKEN_YAML);
    let state = config_engine(project.path()).run_health_checks();
    assert!(state.locked);
    assert_eq!(state.lock_reason, "release freeze");
    assert_eq!(state.level, DegradationLevel::Full);
    // The component map is still refreshed while locked
    assert!(!state.components[&ComponentId::Config].healthy);

    let engine = config_engine(project.path());
    let unlocked = engine.unlock().unwrap();
    assert!(!unlocked.locked);
    assert!(unlocked.lock_reason.is_empty());
    assert_eq!(engine.run_health_checks().level, DegradationLevel::Manual);
}

#[test]
fn test_reset_discards_lock_and_components() {
    let project = temp_project();
    write_config(project.path(), BROKEN_YAML);
    let engine = config_engine(project.path());
    engine.run_health_checks();
    engine.lock("investigating").unwrap();

    let state = engine.reset_to_full().unwrap();
    assert_eq!(state.level, DegradationLevel::Full);
    assert!(!state.locked);
    assert!(engine.state().components.is_empty());
}

#[test]
fn test_corrupt_state_file_reads_as_full() {
    let project = temp_project();
    let state_file = ProjectDir::new(project.path()).degradation_state_file();
    fs::create_dir_all(state_file.parent().unwrap()).unwrap();
    fs::write(&state_file, "{ this is not json").unwrap();

    let engine = config_engine(project.path());
    assert_eq!(engine.current_level(), DegradationLevel::Full);
    assert!(engine.is_feature_available("task_tracking"));

    // The next check overwrites it with a valid document
    engine.run_health_checks();
    let content = fs::read_to_string(&state_file).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["level"], "FULL");
}

#[test]
fn test_git_probe_outside_repository_means_safe() {
    let project = temp_project();
    let probes: Vec<Box<dyn HealthProbe>> = vec![Box::new(GitProbe::new(project.path()))];
    let engine =
        DegradationEngine::with_probes(ProjectDir::new(project.path()).degradation_state_file(), probes);

    let state = engine.run_health_checks();
    assert_eq!(state.level, DegradationLevel::Safe);
    assert!(engine.is_feature_available("git_operations"));
    assert!(!engine.is_feature_available("pre_commit_checks"));
}

#[test]
fn test_default_probes_in_healthy_repository() {
    let repo = init_test_repo();
    write_config(repo.path(), MARKDOWN_V2);
    let config = DpConfig::load(repo.path()).unwrap();
    let engine = DegradationEngine::for_project(&ProjectDir::new(repo.path()), &config);

    let state = engine.run_health_checks();
    assert_eq!(state.level, DegradationLevel::Full);
    assert!(state.components[&ComponentId::Git].healthy);
    assert!(state.components[&ComponentId::Config].healthy);
    assert!(state.components[&ComponentId::TaskTracker].healthy);
    assert!(!state.components.contains_key(&ComponentId::Daemon));
}

#[test]
fn test_status_report_lists_features_alphabetically() {
    let project = temp_project();
    write_config(project.path(), BROKEN_YAML);
    let engine = config_engine(project.path());
    engine.run_health_checks();

    let report = engine.status_report();
    assert_eq!(report.level, DegradationLevel::Manual);
    let names: Vec<&str> = report.available_features.keys().map(String::as_str).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert!(report.available_features["pre_commit_checks"]);
    assert!(!report.available_features["task_tracking"]);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["level"], "MANUAL");
}

#[test]
#[serial]
fn test_project_dir_from_env_drives_state_location() {
    let project = temp_project();
    env::set_var("CLAUDE_PROJECT_DIR", project.path());
    let resolved = ProjectDir::from_env();
    env::remove_var("CLAUDE_PROJECT_DIR");

    assert_eq!(resolved.root(), project.path());
    let engine = DegradationEngine::with_probes(resolved.degradation_state_file(), Vec::new());
    engine.lock("env").unwrap();
    assert!(project
        .path()
        .join(".claude/.dp-degradation-state.json")
        .is_file());
}
