//! Findings and the sink they are reported to.

use std::fmt::{self, Display, Formatter, Write};

use chanlint_ast::nodes::{Location, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    BlockingSend,
    UnbufferedChannel,
    ZeroBuffer,
    BufferLimit,
}

impl Rule {
    pub const ALL: &'static [Rule] = &[
        Rule::BlockingSend,
        Rule::UnbufferedChannel,
        Rule::ZeroBuffer,
        Rule::BufferLimit,
    ];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Rule::BlockingSend => "blocking-send",
            Rule::UnbufferedChannel => "unbuffered-channel",
            Rule::ZeroBuffer => "zero-buffer",
            Rule::BufferLimit => "buffer-limit",
        }
    }

    const fn summary(self) -> &'static str {
        match self {
            Rule::BlockingSend => {
                "channel send without default or timer - consider adding default or timeout case"
            }
            Rule::UnbufferedChannel => {
                "unbuffered channel creation detected - consider specifying buffer size"
            }
            Rule::ZeroBuffer => "channel buffer size set to 0",
            Rule::BufferLimit => "channel buffer size exceeds the specified limit",
        }
    }

    /// The rule's message followed by the offending source text, quoted.
    #[must_use]
    pub fn message(self, source: &str) -> String {
        format!("{} {}", self.summary(), quote(source))
    }
}

/// Renders `text` as a double-quoted Go string literal.
///
/// Printable characters are kept as they are. Control characters use Go's
/// short escapes where one exists, `\xHH` below `0x80` and `\uHHHH` or
/// `\UHHHHHHHH` above.
#[must_use]
pub fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\u{7}' => quoted.push_str("\\a"),
            '\u{8}' => quoted.push_str("\\b"),
            '\u{c}' => quoted.push_str("\\f"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{b}' => quoted.push_str("\\v"),
            c if is_printable(c) => quoted.push(c),
            c if u32::from(c) < 0x80 => {
                let _ = write!(quoted, "\\x{:02x}", u32::from(c));
            }
            c if u32::from(c) < 0x1_0000 => {
                let _ = write!(quoted, "\\u{:04x}", u32::from(c));
            }
            c => {
                let _ = write!(quoted, "\\U{:08x}", u32::from(c));
            }
        }
    }
    quoted.push('"');
    quoted
}

fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !c.is_control()
        && !c.is_whitespace()
        && !matches!(
            c,
            '\u{ad}'
                | '\u{200b}'..='\u{200f}'
                | '\u{2060}'..='\u{2064}'
                | '\u{feff}'
                | '\u{e0001}'..='\u{e007f}'
        )
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    #[default]
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub rule: Rule,
    pub position: Position,
    pub location: Location,
    pub message: String,
    pub severity: Severity,
}

impl Finding {
    /// Builds the finding for `rule` at the node spanning `location`.
    #[must_use]
    pub fn new(rule: Rule, location: &Location, severity: Severity) -> Self {
        Self {
            rule,
            position: location.position(),
            location: location.clone(),
            message: rule.message(&location.source),
            severity,
        }
    }
}

impl Display for Finding {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Append-only sink for findings.
pub trait Reporter {
    fn report(&mut self, finding: Finding);
}

/// Collects findings in the order they are reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    findings: Vec<Finding>,
}

impl Reporter for Diagnostics {
    fn report(&mut self, finding: Finding) {
        self.findings.push(finding);
    }
}

impl Diagnostics {
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    #[must_use]
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_quotes_source_text() {
        assert_eq!(
            Rule::BlockingSend.message("c <- 8"),
            "channel send without default or timer - consider adding default or timeout case \"c <- 8\""
        );
        assert_eq!(
            Rule::ZeroBuffer.message("make(chan int, 0)"),
            "channel buffer size set to 0 \"make(chan int, 0)\""
        );
    }

    #[test]
    fn message_escapes_quotes_in_source() {
        assert_eq!(
            Rule::BlockingSend.message("c <- \"hi\""),
            "channel send without default or timer - consider adding default or timeout case \"c <- \\\"hi\\\"\""
        );
    }

    #[test]
    fn quote_uses_go_escapes() {
        assert_eq!(quote("c <- '\\t'"), "\"c <- '\\\\t'\"");
        assert_eq!(quote("a\tb\nc"), "\"a\\tb\\nc\"");
        assert_eq!(quote("\u{7f}\u{0}\u{7}"), "\"\\x7f\\x00\\a\"");
        assert_eq!(quote("\u{a0}\u{feff}"), "\"\\u00a0\\ufeff\"");
        assert_eq!(quote("\u{e0001}"), "\"\\U000e0001\"");
        assert_eq!(quote("ch <- \"héllo, 世界\""), "\"ch <- \\\"héllo, 世界\\\"\"");
    }

    #[test]
    fn finding_takes_position_from_location() {
        let location = Location::new(12, 18, 3, 2, 3, 8, "c <- 8".to_string());
        let finding = Finding::new(Rule::BlockingSend, &location, Severity::default());
        assert_eq!(finding.position, Position::new(12));
        assert_eq!(finding.severity, Severity::Warning);
        assert_eq!(finding.to_string().split(": ").next(), Some("3:2"));
    }

    #[test]
    fn rule_codes_are_unique() {
        let mut codes: Vec<_> = Rule::ALL.iter().map(|rule| rule.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), Rule::ALL.len());
    }
}
