//! Degradation levels

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operating level, from most to least capable.
///
/// Declaration order is the strictness order: `Full < Reduced < Manual <
/// Safe < Recovery`. Persisted by name (`"FULL"`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum DegradationLevel {
    #[default]
    Full,
    Reduced,
    Manual,
    Safe,
    Recovery,
}

impl DegradationLevel {
    pub const ALL: [DegradationLevel; 5] = [
        DegradationLevel::Full,
        DegradationLevel::Reduced,
        DegradationLevel::Manual,
        DegradationLevel::Safe,
        DegradationLevel::Recovery,
    ];

    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            DegradationLevel::Full => "FULL",
            DegradationLevel::Reduced => "REDUCED",
            DegradationLevel::Manual => "MANUAL",
            DegradationLevel::Safe => "SAFE",
            DegradationLevel::Recovery => "RECOVERY",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DegradationLevel::Full => "All features working normally",
            DegradationLevel::Reduced => "Non-critical features disabled",
            DegradationLevel::Manual => "Manual intervention required for some operations",
            DegradationLevel::Safe => "Minimal safe operation mode",
            DegradationLevel::Recovery => "Actively attempting to repair issues",
        }
    }
}

impl fmt::Display for DegradationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DegradationLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DegradationLevel::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown degradation level: {s}"))
    }
}
