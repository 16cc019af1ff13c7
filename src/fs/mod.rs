//! Project layout and state-file access

pub mod locking;
pub mod project;

pub use locking::{atomic_write, lock_path, locked_read};
pub use project::ProjectDir;
