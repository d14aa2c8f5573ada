#![warn(clippy::pedantic)]
//! Name resolution and shallow type inference for Go sources.
//!
//! This crate answers the two questions the channel rules ask about a file:
//! what does this identifier refer to, and what is the type of this
//! expression. It is not a Go type checker; it knows exactly enough to tell
//! the builtin `make` from a user function, an import of `time` from a local
//! variable named `time`, and a `time.Time` receive from any other receive.
//!
//! ## Quick Start
//!
//! Use [`TypeCheckerBuilder`] to resolve an AST arena:
//!
//! ```ignore
//! use chanlint_ast::builder::parse_source;
//! use chanlint_type_checker::TypeCheckerBuilder;
//!
//! let arena = parse_source(source_code)?;
//! let typed_context = TypeCheckerBuilder::build_typed_context(arena)?
//!     .typed_context();
//!
//! if let Some(type_info) = typed_context.type_of(&expression) {
//!     println!("{type_info}");
//! }
//! ```
//!
//! ## Scopes
//!
//! Scopes nest as universe → file → function → block. The universe holds the
//! predeclared functions (`make`, `new`, `len`, ...) and constants. The file
//! scope holds imports and every top-level declaration, registered before any
//! body is walked so a use may precede its declaration. Functions, blocks,
//! `select` clauses and the implicit blocks of `if`, `for` and `switch` open
//! nested scopes.
//!
//! ## Public Modules
//!
//! - [`errors`] - Error types
//! - [`symbol_table`] - Declarations identifiers resolve to
//! - [`type_info`] - Type representation (`TypeInfo`, `TypeInfoKind`)
//! - [`typed_context`] - Resolution results with query API

use std::marker::PhantomData;

use chanlint_ast::arena::Arena;

use crate::{errors::TypeCheckError, type_checker::TypeChecker, typed_context::TypedContext};

pub mod errors;
pub mod symbol_table;
mod type_checker;
pub mod type_info;
pub mod typed_context;

/// Marker state indicating builder has not yet been initialized with an arena.
pub struct TypeCheckerInitState;

/// Marker state indicating type checking is complete and context is ready.
pub struct TypeCheckerCompleteState;

/// Type alias for a completed type checker builder ready to yield its context.
pub type CompletedTypeCheckerBuilder = TypeCheckerBuilder<TypeCheckerCompleteState>;

/// Builder for running name resolution on an AST arena.
///
/// Uses the typestate pattern to ensure resolution completes before
/// accessing the typed context.
pub struct TypeCheckerBuilder<S> {
    typed_context: TypedContext,
    _state: PhantomData<S>,
}

impl Default for TypeCheckerBuilder<TypeCheckerInitState> {
    fn default() -> Self {
        TypeCheckerBuilder::new()
    }
}

impl TypeCheckerBuilder<TypeCheckerInitState> {
    #[must_use]
    pub fn new() -> Self {
        TypeCheckerBuilder {
            typed_context: TypedContext::default(),
            _state: PhantomData,
        }
    }

    /// Run resolution on the provided arena and return a completed builder.
    ///
    /// # Errors
    ///
    /// Returns [`TypeCheckError::NoSourceFiles`] if the arena holds no source file.
    /// Redeclarations are not fatal; they are available through
    /// [`TypedContext::errors`].
    pub fn build_typed_context(
        arena: Arena,
    ) -> Result<TypeCheckerBuilder<TypeCheckerCompleteState>, TypeCheckError> {
        let mut ctx = TypedContext::new(arena);
        let mut type_checker = TypeChecker::default();
        type_checker.infer_types(&mut ctx)?;
        Ok(TypeCheckerBuilder {
            typed_context: ctx,
            _state: PhantomData,
        })
    }
}

impl TypeCheckerBuilder<TypeCheckerCompleteState> {
    /// Consume the builder and return the typed context.
    #[must_use = "consumes builder and returns the typed context"]
    pub fn typed_context(self) -> TypedContext {
        self.typed_context
    }
}
