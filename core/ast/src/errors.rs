//! Error types for the AST crate.
//!
//! This module defines structured errors for loading the Go grammar and
//! turning a tree-sitter parse into an AST arena.

use thiserror::Error;

/// Errors that can occur while building an AST from Go source code.
#[derive(Debug, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum AstError {
    /// The Go grammar could not be loaded into the parser.
    #[error("failed to load the Go grammar: {0}")]
    LanguageError(#[from] tree_sitter::LanguageError),

    /// tree-sitter gave up on the input without producing a tree.
    #[error("tree-sitter failed to parse the source code")]
    ParseError,

    /// The CST handed to the builder is not a Go source file.
    #[error("expected a root node of type `source_file`, found `{kind}`")]
    UnexpectedRoot { kind: String },
}
