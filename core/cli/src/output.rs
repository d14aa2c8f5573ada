//! Rendering of lint results to stdout.

use std::{io::Write, path::Path};

use anyhow::Context;
use chanlint::{Rule, Severity, runner::FileReport};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonFinding<'a> {
    path: &'a Path,
    line: u32,
    column: u32,
    end_line: u32,
    end_column: u32,
    rule: Rule,
    severity: Severity,
    message: &'a str,
}

/// Writes `path:line:column: message` lines, reports in the given order.
pub(crate) fn render_text(reports: &[FileReport], out: &mut impl Write) -> anyhow::Result<()> {
    for report in reports {
        for finding in &report.findings {
            writeln!(out, "{}:{finding}", report.path.display())
                .context("failed to write findings")?;
        }
    }
    Ok(())
}

/// Writes every finding as one element of a JSON array.
pub(crate) fn render_json(reports: &[FileReport], out: &mut impl Write) -> anyhow::Result<()> {
    let findings: Vec<JsonFinding> = reports
        .iter()
        .flat_map(|report| {
            report.findings.iter().map(|finding| JsonFinding {
                path: &report.path,
                line: finding.location.start_line,
                column: finding.location.start_column,
                end_line: finding.location.end_line,
                end_column: finding.location.end_column,
                rule: finding.rule,
                severity: finding.severity,
                message: &finding.message,
            })
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &findings).context("failed to serialize findings")?;
    writeln!(out).context("failed to write findings")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chanlint::{config::Config, lint_source};

    use super::*;

    fn report() -> FileReport {
        let source = "package main\n\nfunc f(c chan int) {\n\tc <- 1\n}\n";
        FileReport {
            path: PathBuf::from("pkg/f.go"),
            findings: lint_source(source, &Config::default()).unwrap(),
            suppressed: 0,
        }
    }

    #[test]
    fn test_text_output() {
        let mut out = Vec::new();
        render_text(&[report()], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "pkg/f.go:4:2: channel send without default or timer - consider adding default or timeout case \"c <- 1\"\n"
        );
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        render_json(&[report()], &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let findings = value.as_array().unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0]["path"], "pkg/f.go");
        assert_eq!(findings[0]["line"], 4);
        assert_eq!(findings[0]["column"], 2);
        assert_eq!(findings[0]["rule"], "blocking-send");
        assert_eq!(findings[0]["severity"], "warning");
    }

    #[test]
    fn test_json_output_without_findings_is_an_empty_array() {
        let mut out = Vec::new();
        render_json(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }
}
