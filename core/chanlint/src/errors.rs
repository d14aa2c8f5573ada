//! Error types for loading configuration and linting files.

use std::path::PathBuf;

use chanlint_ast::errors::AstError;
use chanlint_type_checker::errors::TypeCheckError;
use thiserror::Error;

/// Errors raised while reading a `chanlint.toml` file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid exclude pattern {pattern:?} in {}: must be a directory name", .path.display())]
    InvalidExclude { path: PathBuf, pattern: String },
}

/// A file that could not be linted. Other files of the same run are unaffected.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: AstError,
    },

    #[error("failed to resolve names in {}", .path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: TypeCheckError,
    },
}

impl LintError {
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            LintError::Read { path, .. }
            | LintError::Parse { path, .. }
            | LintError::Resolve { path, .. } => path,
        }
    }
}
