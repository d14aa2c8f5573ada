//! Symbol Table
//!
//! This module implements a tree-based symbol table for Go name resolution. It
//! supports:
//!
//! - Hierarchical scopes with parent links (universe → package → file →
//!   function → block)
//! - Import, variable, constant, function and parameter declarations
//! - The predeclared functions and constants of the universe scope
//! - A use map from identifier node IDs to the declaration they resolve to
//!
//! Symbol lookup walks up the tree from the current scope to the universe until
//! a match is found, so an inner declaration shadows an outer one.

use std::cell::RefCell;
use std::rc::Rc;

use chanlint_ast::nodes::Location;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::{errors::DeclarationCategory, type_info::TypeInfo};

pub(crate) type ScopeRef = Rc<RefCell<Scope>>;

/// Predeclared functions of the universe scope.
const BUILTIN_FUNCTIONS: &[&str] = &[
    "append", "cap", "clear", "close", "complex", "copy", "delete", "imag", "len", "make", "max",
    "min", "new", "panic", "print", "println", "real", "recover",
];

/// Predeclared constants and the zero value `nil`.
const BUILTIN_VALUES: &[&str] = &["false", "iota", "nil", "true"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationKind {
    /// A predeclared identifier of the universe scope such as `make` or `nil`.
    Builtin,
    Import {
        path: String,
    },
    Variable {
        declared_type: Option<TypeInfo>,
    },
    Constant {
        declared_type: Option<TypeInfo>,
    },
    Function,
    Parameter {
        declared_type: Option<TypeInfo>,
    },
}

/// What an identifier refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
    /// `None` for predeclared identifiers.
    pub location: Option<Location>,
}

impl Declaration {
    #[must_use]
    pub fn new(name: &str, kind: DeclarationKind, location: Option<Location>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            location,
        }
    }

    #[must_use]
    pub fn is_builtin(&self) -> bool {
        matches!(self.kind, DeclarationKind::Builtin)
    }

    /// Import path when this declaration is a package name.
    #[must_use]
    pub fn import_path(&self) -> Option<&str> {
        match &self.kind {
            DeclarationKind::Import { path } => Some(path),
            _ => None,
        }
    }

    /// The type written in the declaration, if any.
    #[must_use]
    pub fn declared_type(&self) -> Option<&TypeInfo> {
        match &self.kind {
            DeclarationKind::Variable { declared_type }
            | DeclarationKind::Constant { declared_type }
            | DeclarationKind::Parameter { declared_type } => declared_type.as_ref(),
            DeclarationKind::Builtin | DeclarationKind::Import { .. } | DeclarationKind::Function => {
                None
            }
        }
    }

    pub(crate) fn category(&self) -> Option<DeclarationCategory> {
        match self.kind {
            DeclarationKind::Builtin => None,
            DeclarationKind::Import { .. } => Some(DeclarationCategory::Import),
            DeclarationKind::Variable { .. } => Some(DeclarationCategory::Variable),
            DeclarationKind::Constant { .. } => Some(DeclarationCategory::Constant),
            DeclarationKind::Function => Some(DeclarationCategory::Function),
            DeclarationKind::Parameter { .. } => Some(DeclarationCategory::Parameter),
        }
    }
}

#[derive(Debug)]
pub(crate) struct Scope {
    pub(crate) id: u32,
    pub(crate) name: String,
    pub(crate) parent: Option<ScopeRef>,
    symbols: FxHashMap<String, Rc<Declaration>>,
}

impl Scope {
    fn new(id: u32, name: &str, parent: Option<ScopeRef>) -> ScopeRef {
        Rc::new(RefCell::new(Scope {
            id,
            name: name.to_string(),
            parent,
            symbols: FxHashMap::default(),
        }))
    }

    /// Inserts a declaration, returning the one it replaced in this scope.
    fn insert(&mut self, declaration: Rc<Declaration>) -> Option<Rc<Declaration>> {
        self.symbols.insert(declaration.name.clone(), declaration)
    }

    fn lookup_local(&self, name: &str) -> Option<Rc<Declaration>> {
        self.symbols.get(name).cloned()
    }
}

#[derive(Debug)]
pub(crate) struct SymbolTable {
    universe: ScopeRef,
    current_scope: ScopeRef,
    next_scope_id: u32,
    uses: FxHashMap<u32, Rc<Declaration>>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        let universe = Scope::new(0, "universe", None);
        {
            let mut scope = universe.borrow_mut();
            for name in BUILTIN_FUNCTIONS.iter().chain(BUILTIN_VALUES) {
                scope.insert(Rc::new(Declaration::new(name, DeclarationKind::Builtin, None)));
            }
        }
        SymbolTable {
            current_scope: universe.clone(),
            universe,
            next_scope_id: 1,
            uses: FxHashMap::default(),
        }
    }
}

impl SymbolTable {
    pub(crate) fn push_scope(&mut self, name: &str) {
        let scope = Scope::new(self.next_scope_id, name, Some(self.current_scope.clone()));
        self.next_scope_id += 1;
        self.current_scope = scope;
    }

    /// Returns to the parent scope. The universe scope is never popped.
    pub(crate) fn pop_scope(&mut self) {
        let parent = {
            let scope = self.current_scope.borrow();
            trace!(scope = scope.id, name = %scope.name, "leaving scope");
            scope.parent.clone()
        };
        if let Some(parent) = parent {
            self.current_scope = parent;
        }
    }

    #[cfg(test)]
    pub(crate) fn current_scope_name(&self) -> String {
        self.current_scope.borrow().name.clone()
    }

    #[cfg(test)]
    pub(crate) fn current_scope_id(&self) -> u32 {
        self.current_scope.borrow().id
    }

    /// Declares a name in the current scope.
    ///
    /// Returns the declaration it replaced when the name was already declared
    /// in this same scope; the new declaration wins either way.
    pub(crate) fn declare(&mut self, declaration: Declaration) -> Option<Rc<Declaration>> {
        self.current_scope
            .borrow_mut()
            .insert(Rc::new(declaration))
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<Rc<Declaration>> {
        let mut scope = Some(self.current_scope.clone());
        while let Some(current) = scope {
            if let Some(declaration) = current.borrow().lookup_local(name) {
                return Some(declaration);
            }
            scope = current.borrow().parent.clone();
        }
        None
    }

    pub(crate) fn record_use(&mut self, identifier_id: u32, declaration: Rc<Declaration>) {
        self.uses.insert(identifier_id, declaration);
    }

    pub(crate) fn resolve(&self, identifier_id: u32) -> Option<&Declaration> {
        self.uses.get(&identifier_id).map(Rc::as_ref)
    }

    /// Drops every scope below the universe, keeping the recorded uses.
    pub(crate) fn reset_scopes(&mut self) {
        self.current_scope = self.universe.clone();
    }
}
