//! Feature availability by degradation level

use super::level::DegradationLevel;

/// Most degraded level at which each feature still works.
pub const FEATURES: &[(&str, DegradationLevel)] = &[
    ("task_tracking", DegradationLevel::Reduced),
    ("adversarial_review", DegradationLevel::Reduced),
    ("auto_sync", DegradationLevel::Reduced),
    ("pre_commit_checks", DegradationLevel::Manual),
    ("trace_markers", DegradationLevel::Manual),
    ("git_operations", DegradationLevel::Safe),
];

/// Threshold for `feature`. Unknown features only work at FULL.
pub fn max_level_for(feature: &str) -> DegradationLevel {
    FEATURES
        .iter()
        .find(|(name, _)| *name == feature)
        .map(|(_, level)| *level)
        .unwrap_or(DegradationLevel::Full)
}

pub fn feature_available(level: DegradationLevel, feature: &str) -> bool {
    level.ordinal() <= max_level_for(feature).ordinal()
}
