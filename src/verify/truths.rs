//! Truth extraction - observable behaviors named in a task description

use regex::Regex;
use std::sync::LazyLock;

static ACCEPTANCE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Acceptance\s+Criteria:\s*\n((?:\s*[-*]\s*.+\n?)+)")
        .expect("valid acceptance pattern")
});

static SUCCESS_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Success\s+Criteria:\s*\n((?:\s*[-*]\s*.+\n?)+)")
        .expect("valid success pattern")
});

static TRUTH_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)truth:\s*(.+)").expect("valid truth pattern"));

/// Bullet items of the first block matched by `block`.
///
/// Only the bullet marker itself is removed, so entries such as `- *.rs`
/// keep their glob characters.
pub(crate) fn bullet_block(block: &Regex, text: &str) -> Vec<String> {
    let Some(body) = block.captures(text).and_then(|caps| caps.get(1)) else {
        return Vec::new();
    };

    body.as_str()
        .lines()
        .map(str::trim)
        .filter_map(|line| line.strip_prefix('-').or_else(|| line.strip_prefix('*')))
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Criteria bullets also drop nested markers (`- * foo` reads as `foo`).
fn criteria_bullets(block: &Regex, text: &str) -> Vec<String> {
    bullet_block(block, text)
        .into_iter()
        .map(|item| item.trim_start_matches(['-', '*', ' ']).trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Acceptance criteria bullets, then `truth:` fields, then success criteria
/// bullets. Duplicates keep their first position.
pub fn extract_truths(description: &str) -> Vec<String> {
    let acceptance = criteria_bullets(&ACCEPTANCE_BLOCK, description);
    let fields = TRUTH_FIELD
        .captures_iter(description)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty());
    let success = criteria_bullets(&SUCCESS_BLOCK, description);

    let mut truths: Vec<String> = Vec::new();
    for truth in acceptance.into_iter().chain(fields).chain(success) {
        if !truths.contains(&truth) {
            truths.push(truth);
        }
    }
    truths
}
