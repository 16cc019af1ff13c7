//! Result types for task verification

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TruthStatus {
    Ok,
    Fail,
    /// Needs a human to confirm
    Unknown,
}

impl TruthStatus {
    pub fn marker(&self) -> &'static str {
        match self {
            TruthStatus::Ok => "[ok]",
            TruthStatus::Fail => "[FAIL]",
            TruthStatus::Unknown => "[?]",
        }
    }
}

/// An observable behavior the task should produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruthResult {
    pub description: String,
    pub status: TruthStatus,
}

/// Whether a file exists and holds a real implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactResult {
    pub path: PathBuf,
    pub exists: bool,
    pub is_substantive: bool,
    pub is_stub: bool,
    pub line_count: usize,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub details: String,
}

impl ArtifactResult {
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            exists: false,
            is_substantive: false,
            is_stub: false,
            line_count: 0,
            details: String::new(),
        }
    }

    /// Present on disk but could not be read.
    pub fn is_unreadable(&self) -> bool {
        self.exists && !self.is_substantive && !self.is_stub
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Import,
    Call,
    Route,
    Query,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Import => "import",
            LinkType::Call => "call",
            LinkType::Route => "route",
            LinkType::Query => "query",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "import" => Ok(LinkType::Import),
            "call" => Ok(LinkType::Call),
            "route" => Ok(LinkType::Route),
            "query" => Ok(LinkType::Query),
            other => Err(format!("unknown link type: {other}")),
        }
    }
}

/// Whether `to_path` actually uses `from_path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkResult {
    pub from_path: PathBuf,
    pub to_path: PathBuf,
    pub link_type: LinkType,
    pub is_connected: bool,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VerificationStatus {
    /// Every check passed
    Verified,
    /// Nothing is broken, but something still needs work or a human
    Incomplete,
    Failed,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Verified => "VERIFIED",
            VerificationStatus::Incomplete => "INCOMPLETE",
            VerificationStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VerificationResult {
    pub task_id: String,
    pub status: VerificationStatus,
    pub truths: Vec<TruthResult>,
    pub artifacts: Vec<ArtifactResult>,
    pub links: Vec<LinkResult>,
    pub errors: Vec<String>,
}

impl VerificationResult {
    pub fn is_verified(&self) -> bool {
        self.status == VerificationStatus::Verified
    }
}
