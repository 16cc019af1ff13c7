//! Project directory layout
//!
//! Everything this tool persists lives under `<project>/.claude/`.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable hooks use to pass the project root.
pub const PROJECT_DIR_ENV: &str = "CLAUDE_PROJECT_DIR";

/// Tool-state directory name inside the project.
pub const STATE_DIR_NAME: &str = ".claude";

/// File name of the persisted degradation state.
pub const DEGRADATION_STATE_FILE: &str = ".dp-degradation-state.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDir {
    root: PathBuf,
}

impl ProjectDir {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Resolve from `CLAUDE_PROJECT_DIR`, falling back to the current directory.
    pub fn from_env() -> Self {
        match env::var_os(PROJECT_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::new(PathBuf::from(dir)),
            _ => Self::new("."),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn state_dir(&self) -> PathBuf {
        self.root.join(STATE_DIR_NAME)
    }

    pub fn degradation_state_file(&self) -> PathBuf {
        self.state_dir().join(DEGRADATION_STATE_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_state_file_location() {
        let project = ProjectDir::new("/work/repo");
        assert_eq!(
            project.degradation_state_file(),
            PathBuf::from("/work/repo/.claude/.dp-degradation-state.json")
        );
    }

    #[test]
    #[serial]
    fn test_from_env_uses_variable() {
        env::set_var(PROJECT_DIR_ENV, "/tmp/some-project");
        let project = ProjectDir::from_env();
        env::remove_var(PROJECT_DIR_ENV);
        assert_eq!(project.root(), Path::new("/tmp/some-project"));
    }

    #[test]
    #[serial]
    fn test_from_env_falls_back_to_cwd() {
        env::remove_var(PROJECT_DIR_ENV);
        let project = ProjectDir::from_env();
        assert_eq!(project.root(), Path::new("."));
    }
}
