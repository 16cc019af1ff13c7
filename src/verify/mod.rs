//! Goal-backward task verification
//!
//! Validates OUTCOMES, not just task completion:
//! - TRUTHS: observable behaviors listed in the task (confirmed by a human)
//! - ARTIFACTS: files that must exist with a real implementation (not stubs)
//! - LINKS: connections between artifacts (imports)

pub mod artifacts;
pub mod links;
pub mod result;
pub mod stub;
pub mod task;
pub mod truths;

pub use artifacts::{check_artifact_substance, resolve_artifact_paths};
pub use links::check_link;
pub use result::{
    ArtifactResult, LinkResult, LinkType, TruthResult, TruthStatus, VerificationResult,
    VerificationStatus,
};
pub use stub::{classify_stub, detect_stub, StubClassification, DEFAULT_THRESHOLD_LINES, STUB_RULES};
pub use task::{parse_key_link, verify_task, KeyLink};
pub use truths::extract_truths;
