//! Link verification - does one artifact actually use another?

use regex::{Regex, RegexBuilder};
use std::fs;
use std::path::Path;

use super::result::{LinkResult, LinkType};

/// A quoted module specifier naming `stem`: `'auth'`, `"./auth"`, `'../lib/auth.js'`.
fn module_specifier(stem: &str) -> String {
    format!(r#"['"](?:[^'"\n]*/)?{stem}(?:\.\w+)?['"]"#)
}

fn symbol_import_patterns(stem: &str, symbol: &str) -> Vec<String> {
    let module = module_specifier(stem);
    vec![
        format!(r"from\s+{stem}\s+import\s+[^#\n]*\b{symbol}\b"),
        format!(r"import\s+\{{[^}}]*\b{symbol}\b[^}}]*\}}\s+from\s*{module}"),
        format!(r"import\s+{symbol}\s+from\s*{module}"),
    ]
}

fn module_import_patterns(stem: &str) -> Vec<String> {
    let module = module_specifier(stem);
    vec![
        format!(r#"from\s+['"]?\.?/?{stem}['"]?\s+import"#),
        // The stem must end at a quote or word boundary: `import authlib` is not `auth`
        format!(r#"import\s+['"]?\.?/?{stem}(?:['"]|\b)"#),
        format!(r"import\s+.*from\s+{module}"),
        format!(r"import\s+{stem}\s+from"),
        format!(r"require\s*\(\s*{module}"),
    ]
}

fn first_match(patterns: &[String], content: &str) -> Result<bool, regex::Error> {
    for pattern in patterns {
        let re: Regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        if re.is_match(content) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Check whether `to` links to `from`.
///
/// Only `import` links are detected from source text; other link types are
/// reported as not connected.
pub fn check_link(
    from: &Path,
    to: &Path,
    link_type: LinkType,
    expected_symbol: Option<&str>,
) -> LinkResult {
    let result = |is_connected: bool, details: String| LinkResult {
        from_path: from.to_path_buf(),
        to_path: to.to_path_buf(),
        link_type,
        is_connected,
        details,
    };

    if !to.is_file() {
        return result(false, "Target file does not exist".to_string());
    }

    let content = match fs::read(to) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => return result(false, format!("Failed to read target: {e}")),
    };

    let source_name = from
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = regex::escape(&source_name);
    let target_name = to
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    if link_type == LinkType::Import {
        let symbol = expected_symbol.filter(|s| !s.is_empty());
        let (patterns, found) = match symbol {
            Some(symbol) => (
                symbol_import_patterns(&stem, &regex::escape(symbol)),
                symbol.to_string(),
            ),
            None => (module_import_patterns(&stem), source_name.clone()),
        };

        match first_match(&patterns, &content) {
            Ok(true) => return result(true, format!("Found import of {found}")),
            Ok(false) => {
                if let Some(symbol) = symbol {
                    return result(
                        false,
                        format!("Symbol {symbol} not imported from {source_name}"),
                    );
                }
            }
            Err(e) => return result(false, format!("Invalid link pattern: {e}")),
        }
    }

    result(
        false,
        format!("No {link_type} of {source_name} found in {target_name}"),
    )
}
