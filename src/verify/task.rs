//! Goal-backward verification of a single task

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

use super::artifacts::{check_artifact_substance, resolve_artifact_paths};
use super::links::check_link;
use super::result::{
    ArtifactResult, LinkResult, LinkType, TruthResult, TruthStatus, VerificationResult,
    VerificationStatus,
};
use super::truths::{bullet_block, extract_truths};
use crate::plan::Task;

static ARTIFACT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Artifacts?:\s*\n((?:\s*[-*]\s*.+\n?)+)").expect("valid artifact pattern")
});

static LINK_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Key\s+Links?:\s*\n((?:\s*[-*]\s*.+\n?)+)").expect("valid link block pattern")
});

/// `from -> to [(type)] [: symbol]`
static LINK_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<from>\S+)\s*->\s*(?P<to>\S+?)(?:\s*\((?P<kind>\w+)\))?(?:\s*:\s*(?P<symbol>\S+))?\s*$",
    )
    .expect("valid link entry pattern")
});

/// A parsed "Key Links:" bullet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLink {
    pub from: String,
    pub to: String,
    pub link_type: LinkType,
    pub symbol: Option<String>,
}

/// Parse one link bullet. The link type defaults to `import`.
pub fn parse_key_link(entry: &str) -> Result<KeyLink, String> {
    let caps = LINK_ENTRY
        .captures(entry.trim())
        .ok_or_else(|| format!("Unrecognized key link: {entry}"))?;

    let link_type = match caps.name("kind") {
        Some(kind) => kind.as_str().parse::<LinkType>()?,
        None => LinkType::Import,
    };

    Ok(KeyLink {
        from: caps["from"].to_string(),
        to: caps["to"].to_string(),
        link_type,
        symbol: caps.name("symbol").map(|m| m.as_str().to_string()),
    })
}

/// Verify that a task achieved its goal, not merely that it was closed.
///
/// Truths are listed for a human to confirm. Artifacts and key links named in
/// the description are checked on disk relative to `project_root`. Nothing is
/// written.
pub fn verify_task(task: &Task, project_root: &Path, threshold_lines: usize) -> VerificationResult {
    let description = task.description.as_str();
    let mut errors: Vec<String> = Vec::new();

    let truths: Vec<TruthResult> = extract_truths(description)
        .into_iter()
        .map(|description| TruthResult {
            description,
            status: TruthStatus::Unknown,
        })
        .collect();

    let mut artifacts: Vec<ArtifactResult> = Vec::new();
    for entry in bullet_block(&ARTIFACT_BLOCK, description) {
        let paths = match resolve_artifact_paths(&entry, project_root) {
            Ok(paths) => paths,
            Err(e) => {
                errors.push(e.to_string());
                continue;
            }
        };
        for path in paths {
            let result = check_artifact_substance(&path, threshold_lines);
            if result.is_unreadable() {
                errors.push(format!("{}: {}", path.display(), result.details));
            }
            artifacts.push(result);
        }
    }

    let mut links: Vec<LinkResult> = Vec::new();
    for entry in bullet_block(&LINK_BLOCK, description) {
        match parse_key_link(&entry) {
            Ok(link) => links.push(check_link(
                &project_root.join(&link.from),
                &project_root.join(&link.to),
                link.link_type,
                link.symbol.as_deref(),
            )),
            Err(e) => errors.push(e),
        }
    }

    let status = overall_status(&truths, &artifacts, &links, &errors);
    debug!(
        task = %task.id,
        truths = truths.len(),
        artifacts = artifacts.len(),
        links = links.len(),
        "verification checks complete"
    );
    info!(task = %task.id, status = %status, "task verified");

    VerificationResult {
        task_id: task.id.clone(),
        status,
        truths,
        artifacts,
        links,
        errors,
    }
}

fn overall_status(
    truths: &[TruthResult],
    artifacts: &[ArtifactResult],
    links: &[LinkResult],
    errors: &[String],
) -> VerificationStatus {
    let failed_truth = truths.iter().any(|t| t.status == TruthStatus::Fail);
    let missing_artifact = artifacts.iter().any(|a| !a.exists);

    if !errors.is_empty() || failed_truth || missing_artifact {
        return VerificationStatus::Failed;
    }

    let has_stub = artifacts.iter().any(|a| a.is_stub);
    let unverified_truth = truths.iter().any(|t| t.status == TruthStatus::Unknown);
    let disconnected = links.iter().any(|l| !l.is_connected);
    let nothing_to_check = truths.is_empty() && artifacts.is_empty();

    if has_stub || unverified_truth || disconnected || nothing_to_check {
        VerificationStatus::Incomplete
    } else {
        VerificationStatus::Verified
    }
}
