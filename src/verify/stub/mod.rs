//! Stub detection
//!
//! Decides whether a file is a placeholder rather than a real implementation.
//! The decision is an ordered chain of named rules; the first rule that
//! returns a verdict wins.


use regex::Regex;
use std::sync::LazyLock;

/// Files with fewer code lines than this get the short-file rules.
pub const DEFAULT_THRESHOLD_LINES: usize = 10;
/// A code line longer than this (and free of todo/pass) counts as content.
pub const MEANINGFUL_LINE_LEN: usize = 15;
/// Lines longer than this count toward the indicator density denominator.
pub const NON_TRIVIAL_LINE_LEN: usize = 5;
/// Indicator matches per non-trivial line above which a file is a stub.
pub const STUB_DENSITY_THRESHOLD: f64 = 0.3;

static DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:def|function|class|const|let|var)\s+\w+.*(?::|=>|\{)")
        .expect("valid definition pattern")
});

static RETURN_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\breturn\b").expect("valid return pattern"));

static RETURN_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"return\s+(.+)").expect("valid return value pattern"));

/// Named stub indicators, all case-insensitive and multi-line.
pub const STUB_INDICATORS: &[(&str, &str)] = &[
    ("bare_pass", r"^\s*pass\s*$"),
    ("ellipsis", r"^\s*\.\.\.\s*$"),
    ("not_implemented_error", r"raise\s+NotImplementedError"),
    ("throw_not_implemented", r#"throw\s+new\s+Error\s*\(\s*["']Not\s+implemented"#),
    ("todo_implement", r"TODO:\s*implement"),
    ("fixme_implement", r"FIXME:\s*implement"),
    ("jsx_todo", r">\s*TODO"),
    ("jsx_todo_tight", r">TODO"),
    ("jsx_placeholder", r">\s*PLACEHOLDER"),
    ("jsx_coming_soon", r">\s*Coming soon"),
];

static INDICATORS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    STUB_INDICATORS
        .iter()
        .map(|(_, pattern)| {
            Regex::new(&format!("(?im){pattern}")).expect("valid stub indicator pattern")
        })
        .collect()
});

static PLACEHOLDER_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^(?:export\s+)?(?:function|const|class)\s+\w+.*\{\s*(?:return\s+)?(?:<div>|<>)?\s*(?:TODO|PLACEHOLDER|Coming soon)",
    )
    .expect("valid placeholder pattern")
});

/// What a single rule concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleVerdict {
    Stub,
    NotStub,
    /// No opinion; ask the next rule
    Continue,
}

/// File content prepared once for every rule.
#[derive(Debug)]
pub struct StubInput<'a> {
    pub content: &'a str,
    /// Trimmed, non-blank lines that are not comments
    pub code_lines: Vec<&'a str>,
    pub threshold_lines: usize,
}

impl<'a> StubInput<'a> {
    pub fn new(content: &'a str, threshold_lines: usize) -> Self {
        let code_lines = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !(line.starts_with('#') || line.starts_with("//") || line.starts_with('*')))
            .collect();
        Self {
            content,
            code_lines,
            threshold_lines,
        }
    }

    pub fn is_short(&self) -> bool {
        self.code_lines.len() < self.threshold_lines
    }
}

pub struct StubRule {
    pub name: &'static str,
    pub check: fn(&StubInput<'_>) -> RuleVerdict,
}

/// The detection chain, in evaluation order.
pub const STUB_RULES: &[StubRule] = &[
    StubRule {
        name: "short_file_meaningful_return",
        check: short_file_meaningful_return,
    },
    StubRule {
        name: "short_file_without_content",
        check: short_file_without_content,
    },
    StubRule {
        name: "indicator_density",
        check: indicator_density,
    },
    StubRule {
        name: "placeholder_body",
        check: placeholder_body,
    },
];

/// Rule name reported when the whole chain passes.
pub const NO_RULE: &str = "no_stub_indicators";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StubClassification {
    pub is_stub: bool,
    /// Name of the rule that decided, or [`NO_RULE`]
    pub rule: &'static str,
}

/// Run the rule chain and report which rule decided.
pub fn classify_stub(content: &str, threshold_lines: usize) -> StubClassification {
    let input = StubInput::new(content, threshold_lines);
    for rule in STUB_RULES {
        match (rule.check)(&input) {
            RuleVerdict::Stub => {
                return StubClassification {
                    is_stub: true,
                    rule: rule.name,
                }
            }
            RuleVerdict::NotStub => {
                return StubClassification {
                    is_stub: false,
                    rule: rule.name,
                }
            }
            RuleVerdict::Continue => {}
        }
    }
    StubClassification {
        is_stub: false,
        rule: NO_RULE,
    }
}

pub fn detect_stub(content: &str, threshold_lines: usize) -> bool {
    classify_stub(content, threshold_lines).is_stub
}

/// Short files that define something and return a real value are fine.
pub fn short_file_meaningful_return(input: &StubInput<'_>) -> RuleVerdict {
    if !input.is_short()
        || !DEFINITION.is_match(input.content)
        || !RETURN_KEYWORD.is_match(input.content)
    {
        return RuleVerdict::Continue;
    }

    let meaningful = RETURN_VALUE
        .captures_iter(input.content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .any(is_meaningful_return);

    if meaningful {
        RuleVerdict::NotStub
    } else {
        RuleVerdict::Continue
    }
}

fn is_meaningful_return(value: &str) -> bool {
    let upper = value.to_uppercase();
    !matches!(value.trim(), "None" | "pass" | "..." | "")
        && !value.contains("NotImplemented")
        && !upper.contains("TODO")
        && !upper.contains("PLACEHOLDER")
}

/// Short files with no substantial line are placeholders.
pub fn short_file_without_content(input: &StubInput<'_>) -> RuleVerdict {
    if !input.is_short() {
        return RuleVerdict::Continue;
    }

    let has_content = input.code_lines.iter().any(|line| {
        let lower = line.to_lowercase();
        line.chars().count() > MEANINGFUL_LINE_LEN && !lower.contains("todo") && !lower.contains("pass")
    });

    if has_content {
        RuleVerdict::Continue
    } else {
        RuleVerdict::Stub
    }
}

/// Too many stub indicators relative to non-trivial lines.
pub fn indicator_density(input: &StubInput<'_>) -> RuleVerdict {
    let non_trivial = input
        .code_lines
        .iter()
        .filter(|line| line.chars().count() > NON_TRIVIAL_LINE_LEN)
        .count();
    if non_trivial == 0 {
        return RuleVerdict::Continue;
    }

    let hits: usize = INDICATORS
        .iter()
        .map(|re| re.find_iter(input.content).count())
        .sum();

    if hits as f64 / non_trivial as f64 > STUB_DENSITY_THRESHOLD {
        RuleVerdict::Stub
    } else {
        RuleVerdict::Continue
    }
}

/// A definition whose body is just a placeholder marker.
pub fn placeholder_body(input: &StubInput<'_>) -> RuleVerdict {
    if PLACEHOLDER_BODY.is_match(input.content) {
        RuleVerdict::Stub
    } else {
        RuleVerdict::Continue
    }
}
