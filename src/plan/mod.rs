//! Plan validation before implementation starts
//!
//! This module handles:
//! - Requirement coverage (every spec has a task)
//! - Task completeness (every task states how it will be verified)
//! - Dependency graph checks (missing references and cycles)

pub mod completeness;
pub mod coverage;
pub mod graph;
pub mod types;
pub mod validation;

pub use completeness::{check_task_completeness, TaskCompletenessResult};
pub use coverage::{check_requirement_coverage, CoverageResult};
pub use graph::{check_dependencies, DependencyResult};
pub use types::{Spec, Task};
pub use validation::{validate_plan, PlanValidationResult, ValidationStatus};
