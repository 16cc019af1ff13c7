//! Shared helpers for integration tests

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Create an empty project directory.
pub fn temp_project() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Create a project that is also a git repository with one commit.
pub fn init_test_repo() -> TempDir {
    let temp_dir = temp_project();
    let repo_root = temp_dir.path();

    for args in [
        vec!["init"],
        vec!["config", "user.email", "test@test.com"],
        vec!["config", "user.name", "Test User"],
    ] {
        Command::new("git")
            .args(&args)
            .current_dir(repo_root)
            .output()
            .expect("Failed to configure git repo");
    }

    fs::write(repo_root.join("README.md"), "# Test Repository\n").expect("Failed to write README.md");

    Command::new("git")
        .args(["add", "."])
        .current_dir(repo_root)
        .output()
        .expect("Failed to git add");
    Command::new("git")
        .args(["commit", "-m", "Initial commit"])
        .current_dir(repo_root)
        .output()
        .expect("Failed to git commit");

    temp_dir
}

/// Write `content` to `relative` under `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&path, content).expect("Failed to write file");
}

/// Write a project config file at the first candidate location.
pub fn write_config(root: &Path, yaml: &str) {
    write_file(root, ".claude/dp-config.yaml", yaml);
}

/// A module long enough to skip the short-file rules, with no stub markers.
pub fn substantive_module() -> String {
    let mut content = String::from("import hashlib\n\n");
    content.push_str("def hash_password(password, salt):\n");
    content.push_str("    digest = hashlib.sha256()\n");
    content.push_str("    digest.update(salt.encode('utf-8'))\n");
    content.push_str("    digest.update(password.encode('utf-8'))\n");
    content.push_str("    return digest.hexdigest()\n\n");
    content.push_str("def check_password(password, salt, expected):\n");
    content.push_str("    candidate = hash_password(password, salt)\n");
    content.push_str("    matches = candidate == expected\n");
    content.push_str("    if not matches:\n");
    content.push_str("        log_failure(password_length=len(password))\n");
    content.push_str("    return matches\n");
    content
}
