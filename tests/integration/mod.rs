//! Integration tests for the process-enforcement engines
//!
//! These exercise the public API end to end against real files in temporary
//! project directories: degradation state on disk, task verification against
//! artifacts, and plan validation over tracker-shaped JSON.

pub mod degradation_flow;
pub mod helpers;
pub mod plan_validation;
pub mod verification_flow;
