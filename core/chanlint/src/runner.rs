//! Multi-file runs: discovering Go files and linting them in parallel.

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, bail};
use chanlint_analyzer::Finding;
use chanlint_ast::builder::parse_source;
use chanlint_type_checker::TypeCheckerBuilder;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{check_context, config::Config, errors::LintError};

/// Findings of one file, after suppression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub findings: Vec<Finding>,
    /// Findings dropped by `//nolint` directives.
    pub suppressed: usize,
}

#[must_use]
pub fn is_go_file(path: &Path) -> bool {
    path.extension().is_some_and(|extension| extension == "go")
}

/// Expands `roots` into the sorted, deduplicated list of Go files to lint.
///
/// Files given explicitly are always kept. Directories are walked
/// recursively; only `.go` files are collected and directories excluded by
/// `config` are not entered.
///
/// # Errors
///
/// Returns an error if a root does not exist or a directory cannot be read.
pub fn collect_go_files(roots: &[PathBuf], config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            if !is_go_file(root) {
                warn!(path = %root.display(), "not a .go file, linting anyway");
            }
            files.push(root.clone());
            continue;
        }
        if !root.exists() {
            bail!("path not found: {}", root.display());
        }
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !config.excludes_dir(&entry.file_name().to_string_lossy())
            });
        for entry in walker {
            let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
            if entry.file_type().is_file() && is_go_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }
    files.sort();
    files.dedup();
    info!(files = files.len(), "collected Go files");
    Ok(files)
}

/// Lints a single file from disk.
///
/// # Errors
///
/// Returns [`LintError`] if the file cannot be read, parsed or resolved.
pub fn lint_file(path: &Path, config: &Config) -> Result<FileReport, LintError> {
    let started = Instant::now();
    let source = std::fs::read_to_string(path).map_err(|source| LintError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let arena = parse_source(&source).map_err(|source| LintError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let ctx = TypeCheckerBuilder::build_typed_context(arena)
        .map_err(|source| LintError::Resolve {
            path: path.to_path_buf(),
            source,
        })?
        .typed_context();
    let (findings, suppressed) = check_context(&ctx, config);
    debug!(
        path = %path.display(),
        findings = findings.len(),
        suppressed,
        elapsed = ?started.elapsed(),
        "linted file"
    );
    Ok(FileReport {
        path: path.to_path_buf(),
        findings,
        suppressed,
    })
}

/// Lints `paths` in parallel. Results are in the order of `paths`.
#[must_use]
pub fn lint_files(paths: &[PathBuf], config: &Config) -> Vec<Result<FileReport, LintError>> {
    paths.par_iter().map(|path| lint_file(path, config)).collect()
}
