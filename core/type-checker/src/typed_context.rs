//! Typed Context - Resolution Results for AST Nodes
//!
//! This module provides [`TypedContext`], the structure that stores what the
//! resolver learned about a file after type checking completes.
//!
//! ## Architecture
//!
//! ```text
//! TypedContext
//! ├─ Arena (original AST)
//! │  └─ Source files with AST nodes
//! ├─ node_types: HashMap<NodeID, TypeInfo>
//! │  └─ Types of the expressions that could be inferred
//! ├─ SymbolTable
//! │  └─ Identifier uses → declarations
//! └─ errors
//!    └─ Non-fatal resolution problems (redeclarations)
//! ```
//!
//! ## Queries
//!
//! - [`resolve`](TypedContext::resolve) - The declaration an identifier refers to
//! - [`type_of`](TypedContext::type_of) - The type of an expression, if inferred
//! - [`source_files`](TypedContext::source_files) - All source files in the arena
//! - [`filter_nodes`](TypedContext::filter_nodes) - Find nodes matching a predicate
//!
//! A missing answer is never an error: the channel rules treat an unresolved
//! identifier or an untyped expression as "unknown" and stay quiet.

use std::rc::Rc;

use crate::{
    errors::TypeCheckError,
    symbol_table::{Declaration, SymbolTable},
    type_info::TypeInfo,
};
use chanlint_ast::{
    arena::Arena,
    nodes::{AstNode, Expression, Identifier, SourceFile},
};
use rustc_hash::FxHashMap;

#[derive(Default)]
pub struct TypedContext {
    pub(crate) symbol_table: SymbolTable,
    pub(crate) node_types: FxHashMap<u32, TypeInfo>,
    pub(crate) errors: Vec<TypeCheckError>,
    arena: Arena,
}

impl TypedContext {
    pub(crate) fn new(arena: Arena) -> Self {
        Self {
            symbol_table: SymbolTable::default(),
            node_types: FxHashMap::default(),
            errors: Vec::new(),
            arena,
        }
    }

    /// Returns all source files in the arena.
    ///
    /// # Example
    ///
    /// ```ignore
    /// for source_file in typed_context.source_files() {
    ///     for declaration in &source_file.declarations {
    ///         // Process each declaration
    ///     }
    /// }
    /// ```
    #[must_use = "returns source files without side effects"]
    pub fn source_files(&self) -> Vec<Rc<SourceFile>> {
        self.arena.source_files()
    }

    #[must_use]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// The declaration an identifier use refers to.
    ///
    /// Returns `None` for declared names (they are not uses), the blank
    /// identifier, selector fields and identifiers the resolver could not find
    /// in any enclosing scope.
    #[must_use]
    pub fn resolve(&self, identifier: &Identifier) -> Option<&Declaration> {
        self.symbol_table.resolve(identifier.id)
    }

    /// The statically inferred type of an expression.
    #[must_use]
    pub fn type_of(&self, expression: &Expression) -> Option<TypeInfo> {
        self.get_node_typeinfo(expression.id())
    }

    #[must_use]
    pub fn get_node_typeinfo(&self, node_id: u32) -> Option<TypeInfo> {
        self.node_types.get(&node_id).cloned()
    }

    /// Non-fatal problems found while resolving names.
    #[must_use]
    pub fn errors(&self) -> &[TypeCheckError] {
        &self.errors
    }

    #[must_use = "returns filtered nodes without side effects"]
    pub fn filter_nodes<T: Fn(&AstNode) -> bool>(&self, fn_predicate: T) -> Vec<AstNode> {
        self.arena.filter_nodes(fn_predicate)
    }
}
