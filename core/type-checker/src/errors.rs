use std::fmt::{self, Display, Formatter};

use chanlint_ast::nodes::Location;
use thiserror::Error;

/// Kind of declaration for redeclaration error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationCategory {
    Import,
    Variable,
    Constant,
    Function,
    Parameter,
}

impl Display for DeclarationCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationCategory::Import => write!(f, "import"),
            DeclarationCategory::Variable => write!(f, "variable"),
            DeclarationCategory::Constant => write!(f, "constant"),
            DeclarationCategory::Function => write!(f, "function"),
            DeclarationCategory::Parameter => write!(f, "parameter"),
        }
    }
}

/// Errors produced while resolving names in Go source files.
///
/// Only [`TypeCheckError::NoSourceFiles`] is fatal. Redeclarations are
/// recorded on the typed context and resolution continues, since a file that
/// does not compile still has channel operations worth checking.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeCheckError {
    #[error("arena contains no source files")]
    NoSourceFiles,

    #[error("{location}: {category} `{name}` redeclared in this block")]
    Redeclared {
        category: DeclarationCategory,
        name: String,
        location: Location,
    },
}
