//! Git access for health probes

pub mod runner;

pub use runner::{run_git, run_git_bool, GIT_PROBE_TIMEOUT};
