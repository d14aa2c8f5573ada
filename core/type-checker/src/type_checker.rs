//! Type Checker Implementation
//!
//! This module resolves identifiers and infers the few expression types the
//! channel rules query. Each source file is processed in three phases:
//!
//! 1. **process_imports** - Bind package names in the file scope
//! 2. **register_package_declarations** - Declare top-level functions,
//!    variables and constants so uses may precede their declaration
//! 3. **check_node** - Walk every declaration in source order, opening scopes
//!    for functions, blocks and clauses, recording identifier uses and
//!    storing inferred types by node ID
//!
//! Inference is deliberately shallow. An expression whose type cannot be read
//! from a declaration, a channel element, `make`/`new` or the table of `time`
//! functions simply has no type.

use std::rc::Rc;

use chanlint_ast::nodes::{
    AstNode, Definition, Expression, FunctionCallExpression, FunctionDefinition, Identifier,
    Location, Misc, ReceiveStatement, SourceFile, Statement, Type, VariableDefinition, VariableKind,
};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::{
    errors::TypeCheckError,
    symbol_table::{Declaration, DeclarationKind, SymbolTable},
    type_info::{TIME_PACKAGE_PATH, TypeInfo, package_name_of},
    typed_context::TypedContext,
};

/// Constructs that open an implicit block in Go.
const SCOPED_KINDS: &[&str] = &[
    "if_statement",
    "for_statement",
    "expression_switch_statement",
    "type_switch_statement",
    "expression_case",
    "type_case",
    "communication_case",
];

const BLANK_IDENTIFIER: &str = "_";

#[derive(Default)]
pub(crate) struct TypeChecker {
    symbol_table: SymbolTable,
    node_types: FxHashMap<u32, TypeInfo>,
    errors: Vec<TypeCheckError>,
    package_variables: FxHashSet<u32>,
}

impl TypeChecker {
    pub fn infer_types(&mut self, ctx: &mut TypedContext) -> Result<(), TypeCheckError> {
        let source_files = ctx.source_files();
        if source_files.is_empty() {
            return Err(TypeCheckError::NoSourceFiles);
        }
        for source_file in &source_files {
            // Package and file scope are merged: a top-level name that
            // collides with an import does not compile.
            self.symbol_table.push_scope("file");
            self.process_imports(source_file);
            self.register_package_declarations(source_file);
            for declaration in &source_file.declarations {
                self.check_node(declaration);
            }
            self.symbol_table.reset_scopes();
        }
        debug!(
            typed_expressions = self.node_types.len(),
            errors = self.errors.len(),
            "resolved source files"
        );
        ctx.symbol_table = std::mem::take(&mut self.symbol_table);
        ctx.node_types = std::mem::take(&mut self.node_types);
        ctx.errors = std::mem::take(&mut self.errors);
        Ok(())
    }

    fn register_package_declarations(&mut self, source_file: &SourceFile) {
        for declaration in &source_file.declarations {
            match declaration {
                AstNode::Definition(Definition::Function(function)) => {
                    if !function.receiver.is_empty() {
                        continue;
                    }
                    if let Some(name) = &function.name {
                        self.declare(
                            &name.name,
                            DeclarationKind::Function,
                            Some(function.location.clone()),
                        );
                    }
                }
                other => {
                    for variable in Self::top_level_variables(other) {
                        self.package_variables.insert(variable.id);
                        let declared_type = variable.ty.as_ref().map(|ty| self.resolve_type(ty));
                        self.declare_variable_names(&variable, declared_type);
                    }
                }
            }
        }
    }

    /// Variable and constant specs below a top-level `var`/`const` declaration.
    fn top_level_variables(node: &AstNode) -> Vec<Rc<VariableDefinition>> {
        match node {
            AstNode::Definition(Definition::Variable(variable)) => vec![variable.clone()],
            AstNode::Misc(Misc::Other(other)) => other
                .children
                .iter()
                .flat_map(Self::top_level_variables)
                .collect(),
            _ => Vec::new(),
        }
    }

    fn process_imports(&mut self, source_file: &SourceFile) {
        for import in &source_file.imports {
            let name = match &import.name {
                Some(name) if name.name == BLANK_IDENTIFIER || name.name == "." => continue,
                Some(name) => name.name.as_str(),
                None => package_name_of(&import.path),
            };
            self.declare(
                name,
                DeclarationKind::Import {
                    path: import.path.clone(),
                },
                Some(import.location.clone()),
            );
        }
    }

    fn check_node(&mut self, node: &AstNode) {
        match node {
            AstNode::Definition(Definition::Function(function)) => self.check_function(function),
            AstNode::Definition(Definition::Variable(variable)) => self.check_variable(variable),
            AstNode::Statement(Statement::Block(block)) => {
                self.symbol_table.push_scope("block");
                for statement in &block.statements {
                    self.check_node(statement);
                }
                self.symbol_table.pop_scope();
            }
            AstNode::Statement(Statement::Receive(receive)) => {
                self.check_receive_statement(receive);
            }
            AstNode::Expression(expression) => {
                self.check_expression(expression);
            }
            AstNode::Misc(Misc::Clause(clause)) => {
                self.symbol_table.push_scope("clause");
                for child in clause.children() {
                    self.check_node(&child);
                }
                self.symbol_table.pop_scope();
            }
            AstNode::Misc(Misc::Other(other)) if SCOPED_KINDS.contains(&other.kind.as_str()) => {
                self.symbol_table.push_scope(&other.kind);
                for child in &other.children {
                    self.check_node(child);
                }
                self.symbol_table.pop_scope();
            }
            AstNode::Misc(Misc::Comment(_)) | AstNode::Directive(_) => {}
            _ => {
                for child in node.children() {
                    self.check_node(&child);
                }
            }
        }
    }

    fn check_function(&mut self, function: &Rc<FunctionDefinition>) {
        self.symbol_table.push_scope("function");
        for parameter in function
            .receiver
            .iter()
            .chain(&function.parameters)
            .chain(&function.results)
        {
            let declared_type = self.resolve_type(&parameter.ty);
            for name in &parameter.names {
                self.declare(
                    &name.name,
                    DeclarationKind::Parameter {
                        declared_type: Some(declared_type.clone()),
                    },
                    Some(name.location.clone()),
                );
            }
        }
        // Parameters and the outermost body statements share one block.
        if let Some(body) = &function.body {
            for statement in &body.statements {
                self.check_node(statement);
            }
        }
        self.symbol_table.pop_scope();
    }

    fn check_variable(&mut self, variable: &Rc<VariableDefinition>) {
        for value in &variable.values {
            self.check_expression(value);
        }
        let declared_type = variable.ty.as_ref().map(|ty| self.resolve_type(ty));
        if !self.package_variables.contains(&variable.id) {
            self.declare_variable_names(variable, declared_type);
        }
    }

    fn declare_variable_names(
        &mut self,
        variable: &VariableDefinition,
        declared_type: Option<TypeInfo>,
    ) {
        for name in &variable.names {
            let kind = match variable.kind {
                VariableKind::Const => DeclarationKind::Constant {
                    declared_type: declared_type.clone(),
                },
                VariableKind::Var => DeclarationKind::Variable {
                    declared_type: declared_type.clone(),
                },
                VariableKind::Short => {
                    // `:=` may redeclare a name of the same block.
                    if name.name != BLANK_IDENTIFIER {
                        self.symbol_table.declare(Declaration::new(
                            &name.name,
                            DeclarationKind::Variable {
                                declared_type: None,
                            },
                            Some(name.location.clone()),
                        ));
                    }
                    continue;
                }
            };
            self.declare(&name.name, kind, Some(name.location.clone()));
        }
    }

    fn check_receive_statement(&mut self, receive: &Rc<ReceiveStatement>) {
        self.check_expression(&receive.right);
        if receive.define {
            for name in receive.left.iter().filter_map(Expression::as_identifier) {
                if name.name != BLANK_IDENTIFIER {
                    self.symbol_table.declare(Declaration::new(
                        &name.name,
                        DeclarationKind::Variable {
                            declared_type: None,
                        },
                        Some(name.location.clone()),
                    ));
                }
            }
        } else {
            for target in &receive.left {
                self.check_expression(target);
            }
        }
    }

    /// Resolves identifiers below `expression` and returns its type when known.
    fn check_expression(&mut self, expression: &Expression) -> Option<TypeInfo> {
        let type_info = match expression {
            Expression::Identifier(identifier) => self
                .resolve_identifier(identifier)
                .and_then(|declaration| declaration.declared_type().cloned()),
            Expression::Literal(_) => None,
            Expression::Receive(receive) => self
                .check_expression(&receive.operand)
                .and_then(|operand| operand.channel_element().cloned()),
            Expression::FunctionCall(call) => self.check_call(call),
            Expression::Selector(selector) => {
                self.check_expression(&selector.operand);
                None
            }
            Expression::Parenthesized(parenthesized) => {
                self.check_expression(&parenthesized.expression)
            }
            Expression::Binary(binary) => {
                self.check_expression(&binary.left);
                self.check_expression(&binary.right);
                None
            }
            Expression::FunctionLiteral(function) => {
                self.check_function(function);
                None
            }
            Expression::Type(ty) => {
                self.resolve_type(ty);
                None
            }
            Expression::Unknown(other) => {
                for child in &other.children {
                    self.check_node(child);
                }
                None
            }
        };
        if let Some(type_info) = &type_info {
            self.node_types.insert(expression.id(), type_info.clone());
        }
        type_info
    }

    fn check_call(&mut self, call: &Rc<FunctionCallExpression>) -> Option<TypeInfo> {
        self.check_expression(&call.function);
        let mut first_type_argument = None;
        for (index, argument) in call.arguments.iter().enumerate() {
            match argument {
                Expression::Type(ty) => {
                    let type_info = self.resolve_type(ty);
                    if index == 0 {
                        first_type_argument = Some(type_info);
                    }
                }
                other => {
                    self.check_expression(other);
                }
            }
        }

        match call.function.strip_parentheses() {
            Expression::Identifier(function) => {
                let declaration = self.symbol_table.resolve(function.id)?;
                if !declaration.is_builtin() {
                    return None;
                }
                match declaration.name.as_str() {
                    "make" => first_type_argument,
                    "new" => first_type_argument.map(TypeInfo::pointer),
                    _ => None,
                }
            }
            Expression::Selector(selector) => {
                let Expression::Identifier(package) = selector.operand.strip_parentheses() else {
                    return None;
                };
                let path = self.symbol_table.resolve(package.id)?.import_path()?;
                if path == TIME_PACKAGE_PATH {
                    TypeInfo::time_function_result(&selector.field.name)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Converts a written type, resolving package qualifiers through imports.
    fn resolve_type(&mut self, ty: &Type) -> TypeInfo {
        match ty {
            Type::Named(name) => TypeInfo::from_type_name(&name.name),
            Type::Qualified(qualified) => {
                let package = self
                    .resolve_identifier(&qualified.package)
                    .and_then(|declaration| {
                        declaration
                            .import_path()
                            .map(|path| package_name_of(path).to_string())
                    })
                    .unwrap_or_else(|| qualified.package.name.clone());
                TypeInfo::named(Some(&package), &qualified.name.name)
            }
            Type::Channel(channel) => {
                let element = self.resolve_type(&channel.element);
                TypeInfo::channel(channel.direction, element)
            }
            Type::Pointer(pointer) => TypeInfo::pointer(self.resolve_type(&pointer.pointee)),
            Type::Unknown(other) => {
                for child in &other.children {
                    self.check_node(child);
                }
                TypeInfo::unknown()
            }
        }
    }

    fn resolve_identifier(&mut self, identifier: &Identifier) -> Option<Rc<Declaration>> {
        if identifier.name == BLANK_IDENTIFIER {
            return None;
        }
        let declaration = self.symbol_table.lookup(&identifier.name)?;
        self.symbol_table
            .record_use(identifier.id, declaration.clone());
        Some(declaration)
    }

    fn declare(&mut self, name: &str, kind: DeclarationKind, location: Option<Location>) {
        if name == BLANK_IDENTIFIER {
            return;
        }
        let declaration = Declaration::new(name, kind, location.clone());
        if let Some(previous) = self.symbol_table.declare(declaration) {
            if let (Some(category), Some(location)) = (previous.category(), location) {
                self.errors.push(TypeCheckError::Redeclared {
                    category,
                    name: name.to_string(),
                    location,
                });
            }
        }
    }
}
