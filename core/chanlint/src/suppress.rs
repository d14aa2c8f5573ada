//! `//nolint` directives.
//!
//! A directive suppresses findings that start on the line the comment sits on.
//! It applies when it is bare (`//nolint`, optionally followed by an
//! explanation) or when its comma-separated list names `all` or one of
//! [`LINTER_NAMES`] (`//nolint:channelcheck,errcheck`).

use chanlint_analyzer::Finding;
use chanlint_ast::nodes::SourceFile;
use rustc_hash::FxHashSet;

/// Names this linter answers to in a `//nolint:` list.
pub const LINTER_NAMES: &[&str] = &["channelcheck", "chanlint"];

const DIRECTIVE: &str = "//nolint";

/// Whether comment `text` is a `//nolint` directive that covers this linter.
#[must_use]
pub fn is_nolint_directive(text: &str) -> bool {
    let Some(rest) = text.trim_end().strip_prefix(DIRECTIVE) else {
        return false;
    };
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        return true;
    }
    let Some(list) = rest.strip_prefix(':') else {
        return false;
    };
    let list = list.split_once("//").map_or(list, |(names, _)| names);
    list.split(',')
        .filter_map(|entry| entry.split_whitespace().next())
        .any(|name| name == "all" || LINTER_NAMES.contains(&name))
}

/// Lines of `source_file` carrying a directive that covers this linter.
#[must_use]
pub fn suppressed_lines(source_file: &SourceFile) -> FxHashSet<u32> {
    source_file
        .comments
        .iter()
        .filter(|comment| is_nolint_directive(&comment.text))
        .map(|comment| comment.location.start_line)
        .collect()
}

/// Splits `findings` into the kept ones and the number dropped by `lines`.
#[must_use]
pub fn apply_suppressions(findings: Vec<Finding>, lines: &FxHashSet<u32>) -> (Vec<Finding>, usize) {
    if lines.is_empty() {
        return (findings, 0);
    }
    let total = findings.len();
    let kept: Vec<Finding> = findings
        .into_iter()
        .filter(|finding| !lines.contains(&finding.location.start_line))
        .collect();
    let suppressed = total - kept.len();
    (kept, suppressed)
}
