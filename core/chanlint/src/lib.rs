#![warn(clippy::pedantic)]
//! Orchestration crate for the chanlint Go channel linter.
//!
//! This crate ties the front end and the rules together and provides what a
//! host needs around them: config files, `//nolint` suppression and parallel
//! multi-file runs.
//!
//! ## Overview
//!
//! ```text
//! .go source → tree-sitter-go → AST arena → name resolution → channel rules → findings
//! ```
//!
//! Each phase is exposed as a standalone function:
//!
//! ```rust,no_run
//! use chanlint::{analyze, config::Config, parse, type_check};
//!
//! fn lint(source_code: &str) -> anyhow::Result<usize> {
//!     let arena = parse(source_code)?;
//!     let typed_context = type_check(arena)?;
//!     let findings = analyze(&typed_context, &Config::default());
//!     Ok(findings.len())
//! }
//! ```
//!
//! For whole directory trees use [`runner::collect_go_files`] followed by
//! [`runner::lint_files`], which lints every file on the rayon thread pool.
//!
//! ## Architecture
//!
//! - [`chanlint_ast`] - tree-sitter-go CST to arena-based AST
//! - [`chanlint_type_checker`] - scopes, name resolution and the few static
//!   types the rules ask about
//! - [`chanlint_analyzer`] - the rules and the traversal that applies them
//!
//! ## Error Handling
//!
//! The phase functions return `anyhow::Result`. Per-file failures in
//! multi-file runs are typed ([`errors::LintError`]) so a host can report them
//! and carry on with the other files.

pub mod config;
pub mod errors;
pub mod runner;
pub mod suppress;

use anyhow::Context;
use chanlint_analyzer::{Diagnostics, Engine, Finding};
use chanlint_ast::{arena::Arena, builder::parse_source};
use chanlint_type_checker::{TypeCheckerBuilder, typed_context::TypedContext};
use crate::config::Config;
use tracing::debug;

pub use chanlint_analyzer::{Rule, Settings, Severity};

/// Parses Go source code into an arena-based AST.
///
/// The source is handed to tree-sitter with the Go grammar and the resulting
/// CST is lowered by [`Builder`]. Syntax errors do not fail the parse: they
/// are recorded on the [`SourceFile`] and the rest of the file is still built,
/// so a file with a typo elsewhere is still linted.
///
/// # Examples
///
/// ```rust,no_run
/// use chanlint::parse;
///
/// let source = r#"
///     package main
///
///     func main() {
///         c := make(chan int)
///         c <- 1
///     }
/// "#;
///
/// let arena = parse(source)?;
/// assert_eq!(arena.source_files().len(), 1);
/// let main = arena.functions()[0].name.clone();
/// assert_eq!(main.map(|name| name.name.clone()).as_deref(), Some("main"));
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if the Go grammar cannot be loaded or tree-sitter gives up
/// on the input.
///
/// [`SourceFile`]: chanlint_ast::nodes::SourceFile
/// [`Builder`]: chanlint_ast::builder::Builder
pub fn parse(source_code: &str) -> anyhow::Result<Arena> {
    let arena = parse_source(source_code).context("failed to parse Go source")?;
    Ok(arena)
}

/// Resolves names and computes the static types the rules depend on.
///
/// Every identifier use is bound to its declaration (universe, file, function
/// or block scope), so a local variable called `make` or a shadowed `time`
/// import is never mistaken for the real thing. Types are only computed for
/// expressions whose type is written down in the source or follows from a
/// builtin or a well-known `time` function; everything else is left untyped.
///
/// # Examples
///
/// ```rust,no_run
/// use chanlint::{parse, type_check};
///
/// let source = "package main\n\nfunc main() { c := make(chan int); c <- 1 }\n";
/// let typed_context = type_check(parse(source)?)?;
/// assert!(typed_context.errors().is_empty());
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if the arena holds no source file. Redeclarations are not
/// fatal and are available through [`TypedContext::errors`].
pub fn type_check(arena: Arena) -> anyhow::Result<TypedContext> {
    let typed_context = TypeCheckerBuilder::build_typed_context(arena)
        .context("name resolution failed")?
        .typed_context();
    Ok(typed_context)
}

/// Runs the channel rules configured in `config` and applies `//nolint`
/// directives. Findings are ordered by position.
#[must_use]
pub fn analyze(typed_context: &TypedContext, config: &Config) -> Vec<Finding> {
    check_context(typed_context, config).0
}

/// Parses, resolves and analyses a single source text.
///
/// # Examples
///
/// ```rust,no_run
/// use chanlint::{config::Config, lint_source};
///
/// let source = "package main\n\nfunc main() {\n\tc := make(chan int, 1)\n\tc <- 8\n}\n";
/// let findings = lint_source(source, &Config::default())?;
/// assert_eq!(findings.len(), 1);
/// assert_eq!(findings[0].to_string(), "5:2: channel send without default or timer - consider adding default or timeout case \"c <- 8\"");
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns the errors of [`parse`] and [`type_check`].
pub fn lint_source(source_code: &str, config: &Config) -> anyhow::Result<Vec<Finding>> {
    let typed_context = type_check(parse(source_code)?)?;
    Ok(analyze(&typed_context, config))
}

/// Findings kept after suppression, with the number that were suppressed.
pub(crate) fn check_context(typed_context: &TypedContext, config: &Config) -> (Vec<Finding>, usize) {
    for error in typed_context.errors() {
        debug!(%error, "name resolution");
    }
    let engine = Engine::new(config.settings).with_severity(config.severity);
    let mut kept = Vec::new();
    let mut suppressed = 0;
    for source_file in typed_context.source_files() {
        let mut diagnostics = Diagnostics::default();
        engine.analyze_file(typed_context, &source_file, &mut diagnostics);
        let lines = suppress::suppressed_lines(&source_file);
        let (findings, dropped) = suppress::apply_suppressions(diagnostics.into_findings(), &lines);
        kept.extend(findings);
        suppressed += dropped;
    }
    kept.sort_by_key(|finding| finding.position);
    (kept, suppressed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lint_source_reports_blocking_send() {
        let source = "package main\n\nfunc main() {\n\tc := make(chan int, 1)\n\tc <- 8\n}\n";
        let findings = lint_source(source, &Config::default()).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, Rule::BlockingSend);
        assert_eq!(
            findings[0].to_string(),
            "5:2: channel send without default or timer - consider adding default or timeout case \"c <- 8\""
        );
    }

    #[test]
    fn test_findings_are_ordered_by_position() {
        let source = r"package main

func main() {
	c := make(chan int, 100)
	c <- 1
	d := make(chan int)
	_ = d
}
";
        let config = Config {
            settings: Settings {
                check_unbuffered_channels: true,
                check_buffer_amount: 10,
                check_blocking_sends: true,
            },
            ..Config::default()
        };
        let findings = lint_source(source, &config).unwrap();
        let rules: Vec<Rule> = findings.iter().map(|finding| finding.rule).collect();
        assert_eq!(
            rules,
            vec![Rule::BufferLimit, Rule::BlockingSend, Rule::UnbufferedChannel]
        );
        assert!(findings.windows(2).all(|pair| pair[0].position <= pair[1].position));
    }

    #[test]
    fn test_config_severity_is_applied() {
        let source = "package main\n\nfunc f(c chan int) {\n\tc <- 1\n}\n";
        let config = Config {
            severity: Severity::Error,
            ..Config::default()
        };
        let findings = lint_source(source, &config).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn test_nolint_suppresses_only_its_line() {
        let source = r"package main

func f(c chan int) {
	c <- 1 //nolint:channelcheck
	c <- 2
}
";
        let typed_context = type_check(parse(source).unwrap()).unwrap();
        let (findings, suppressed) = check_context(&typed_context, &Config::default());
        assert_eq!(suppressed, 1);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].location.start_line, 5);
    }

    #[test]
    fn test_syntax_errors_do_not_stop_linting() {
        let source = "package main\n\nfunc f(c chan int) {\n\tc <- \n}\n\nfunc g(c chan int) { c <- 2 }\n";
        let typed_context = type_check(parse(source).unwrap()).unwrap();
        assert!(!typed_context.source_files()[0].syntax_errors.is_empty());
        assert!(lint_source(source, &Config::default()).is_ok());
    }
}
