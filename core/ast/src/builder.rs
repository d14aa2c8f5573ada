//! AST builder that converts tree-sitter-go concrete syntax trees (CST) into typed AST nodes.
//!
//! The `Builder` processes tree-sitter parse trees and constructs a typed Abstract Syntax Tree
//! stored in an `Arena`. It handles:
//!
//! - Converting CST nodes to typed AST nodes
//! - Assigning unique sequential IDs to each node
//! - Recording parent-child relationships in the arena
//! - Collecting syntax errors from malformed input
//! - Extracting source location information
//!
//! # Example
//!
//! ```no_run
//! use chanlint_ast::builder::Builder;
//! use tree_sitter::Parser;
//!
//! let source = "package main\n\nfunc main() { c := make(chan int); c <- 1 }\n";
//! let mut parser = Parser::new();
//! parser.set_language(&tree_sitter_go::LANGUAGE.into()).unwrap();
//! let tree = parser.parse(source, None).unwrap();
//!
//! let mut builder = Builder::new();
//! builder.add_source_code(tree.root_node(), source.as_bytes());
//! let arena = builder.build_ast().unwrap();
//! ```
//!
//! # Error Handling
//!
//! Syntax errors do not abort the build. tree-sitter `ERROR` and missing nodes are
//! recorded on the [`SourceFile`] and the surrounding code is still turned into
//! nodes, so a half-written file keeps producing the nodes it does contain. Only a
//! root node that is not a Go `source_file` is rejected.
//!
//! # Node ID Assignment
//!
//! Node IDs are assigned sequentially starting from 1 by each builder:
//!
//! - **Deterministic ordering**: a parent always receives its ID before its
//!   children, so IDs follow a pre-order walk of the source
//! - **Zero is reserved**: ID 0 represents invalid/uninitialized nodes
//! - **Sentinel value**: `u32::MAX` is the parent of every source file
//!
//! # Unknown Constructs
//!
//! Only the Go shapes the channel rules and the resolver care about get a dedicated
//! node. Everything else becomes [`OtherNode`] carrying its tree-sitter kind and its
//! named children, which keeps every send, `select` and call reachable from the root.

use std::rc::Rc;

use tracing::{debug, warn};
use tree_sitter::{Node, Parser};

use crate::{
    arena::Arena,
    errors::AstError,
    nodes::{
        Ast, AstNode, BinaryExpression, Block, ChannelDirection, ChannelType, Comment,
        Communication, Definition, Directive, Expression, FunctionCallExpression,
        FunctionDefinition, Identifier, ImportSpec, Literal, Location, Misc, NumberKind,
        NumberLiteral, OtherNode, Parameter, ParenthesizedExpression, PointerType,
        QualifiedType, ReceiveExpression, ReceiveStatement, SelectClause, SelectStatement,
        SelectorExpression, SendStatement, SourceFile, Statement, StringLiteral, Type,
        VariableDefinition, VariableKind,
    },
};

const EXPRESSION_KINDS: &[&str] = &[
    "identifier",
    "int_literal",
    "float_literal",
    "imaginary_literal",
    "interpreted_string_literal",
    "raw_string_literal",
    "unary_expression",
    "call_expression",
    "selector_expression",
    "parenthesized_expression",
    "binary_expression",
    "func_literal",
];

const TYPE_KINDS: &[&str] = &[
    "type_identifier",
    "qualified_type",
    "channel_type",
    "pointer_type",
    "parenthesized_type",
    "slice_type",
    "array_type",
    "map_type",
    "struct_type",
    "interface_type",
    "function_type",
    "generic_type",
];

/// Parses Go source code and builds its AST arena.
///
/// # Errors
///
/// Returns an error if the Go grammar cannot be loaded or tree-sitter produces no tree.
pub fn parse_source(source: &str) -> Result<Arena, AstError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_go::LANGUAGE.into())?;
    let tree = parser.parse(source, None).ok_or(AstError::ParseError)?;
    let mut builder = Builder::new();
    builder.add_source_code(tree.root_node(), source.as_bytes());
    builder.build_ast()
}

pub struct Builder<'a> {
    arena: Arena,
    source_code: Vec<(Node<'a>, &'a [u8])>,
    next_id: u32,
    comments: Vec<Rc<Comment>>,
}

impl Default for Builder<'_> {
    fn default() -> Self {
        Builder::new()
    }
}

impl<'a> Builder<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            arena: Arena::default(),
            source_code: Vec::new(),
            next_id: 0,
            comments: Vec::new(),
        }
    }

    /// Adds a source code and CST to the builder.
    pub fn add_source_code(&mut self, root: Node<'a>, code: &'a [u8]) {
        self.source_code.push((root, code));
    }

    /// Builds the AST for every added source file.
    ///
    /// # Errors
    ///
    /// Returns [`AstError::UnexpectedRoot`] if a root node is not a `source_file`.
    pub fn build_ast(&mut self) -> Result<Arena, AstError> {
        for (root, code) in self.source_code.clone() {
            if root.kind() != "source_file" {
                return Err(AstError::UnexpectedRoot {
                    kind: root.kind().to_string(),
                });
            }
            let source_file = self.build_source_file(&root, code);
            for error in &source_file.syntax_errors {
                warn!(location = %error, "syntax error in Go source");
            }
            debug!(
                nodes = self.next_id,
                imports = source_file.imports.len(),
                declarations = source_file.declarations.len(),
                "built source file"
            );
            self.arena
                .add_node(AstNode::Ast(Ast::SourceFile(source_file)), u32::MAX);
        }
        Ok(std::mem::take(&mut self.arena))
    }

    fn build_source_file(&mut self, root: &Node, code: &[u8]) -> Rc<SourceFile> {
        let id = self.get_node_id();
        let location = Self::get_location(root, code);
        let syntax_errors = Self::collect_syntax_errors(root, code);
        let mut package_name = None;
        let mut imports = Vec::new();
        let mut declarations = Vec::new();

        for child in Self::named_children(root) {
            match child.kind() {
                "package_clause" => {
                    package_name = Self::named_children(&child)
                        .first()
                        .map(|name| Self::node_text(name, code));
                }
                "import_declaration" => {
                    for spec in Self::import_specs(&child) {
                        if spec.kind() == "comment" {
                            self.build_comment(id, &spec, code);
                        } else {
                            imports.push(self.build_import_spec(id, &spec, code));
                        }
                    }
                }
                "comment" => {
                    self.build_comment(id, &child, code);
                }
                _ => declarations.push(self.build_node(id, &child, code)),
            }
        }

        Rc::new(SourceFile {
            id,
            location,
            package_name,
            imports,
            declarations,
            comments: std::mem::take(&mut self.comments),
            syntax_errors,
        })
    }

    fn build_import_spec(&mut self, parent_id: u32, node: &Node, code: &[u8]) -> Rc<ImportSpec> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let name = node
            .child_by_field_name("name")
            .map(|name| self.build_identifier(id, &name, code));
        let path = node
            .child_by_field_name("path")
            .map(|path| {
                StringLiteral::new(0, Self::node_text(&path, code), Location::default())
                    .unquoted()
                    .to_string()
            })
            .unwrap_or_default();

        let node = Rc::new(ImportSpec {
            id,
            location,
            name,
            path,
        });
        self.arena
            .add_node(AstNode::Directive(Directive::Import(node.clone())), parent_id);
        node
    }

    /// Dispatches a CST node found in a statement list or another untyped position.
    fn build_node(&mut self, parent_id: u32, node: &Node, code: &[u8]) -> AstNode {
        match node.kind() {
            "function_declaration" | "method_declaration" => AstNode::Definition(
                Definition::Function(self.build_function(parent_id, node, code)),
            ),
            "var_spec" | "const_spec" | "short_var_declaration" => AstNode::Definition(
                Definition::Variable(self.build_variable(parent_id, node, code)),
            ),
            "block" => AstNode::Statement(Statement::Block(self.build_block(parent_id, node, code))),
            "select_statement" => {
                AstNode::Statement(Statement::Select(self.build_select(parent_id, node, code)))
            }
            "send_statement" => {
                AstNode::Statement(Statement::Send(self.build_send(parent_id, node, code)))
            }
            "receive_statement" => AstNode::Statement(Statement::Receive(
                self.build_receive_statement(parent_id, node, code),
            )),
            "communication_case" | "default_case" => {
                match self.build_clause(parent_id, node, code) {
                    Some(clause) => AstNode::Misc(Misc::Clause(clause)),
                    None => AstNode::Misc(Misc::Other(self.build_other(parent_id, node, code))),
                }
            }
            "parameter_declaration" | "variadic_parameter_declaration" => {
                AstNode::Misc(Misc::Parameter(self.build_parameter(parent_id, node, code)))
            }
            "comment" => AstNode::Misc(Misc::Comment(self.build_comment(parent_id, node, code))),
            kind if EXPRESSION_KINDS.contains(&kind) || TYPE_KINDS.contains(&kind) => {
                AstNode::Expression(self.build_expression(parent_id, node, code))
            }
            _ => AstNode::Misc(Misc::Other(self.build_other(parent_id, node, code))),
        }
    }

    fn build_function(
        &mut self,
        parent_id: u32,
        node: &Node,
        code: &[u8],
    ) -> Rc<FunctionDefinition> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let name = node
            .child_by_field_name("name")
            .map(|name| self.build_identifier(id, &name, code));
        let receiver = node
            .child_by_field_name("receiver")
            .map(|list| self.build_parameter_list(id, &list, code))
            .unwrap_or_default();
        let parameters = node
            .child_by_field_name("parameters")
            .map(|list| self.build_parameter_list(id, &list, code))
            .unwrap_or_default();
        let results = match node.child_by_field_name("result") {
            Some(result) if result.kind() == "parameter_list" => {
                self.build_parameter_list(id, &result, code)
            }
            Some(result) => vec![self.build_unnamed_result(id, &result, code)],
            None => Vec::new(),
        };
        let body = node
            .child_by_field_name("body")
            .map(|body| self.build_block(id, &body, code));

        let node = Rc::new(FunctionDefinition {
            id,
            location,
            name,
            receiver,
            parameters,
            results,
            body,
        });
        self.arena
            .add_node(AstNode::Definition(Definition::Function(node.clone())), parent_id);
        node
    }

    fn build_parameter_list(&mut self, parent_id: u32, node: &Node, code: &[u8]) -> Vec<Rc<Parameter>> {
        let mut parameters = Vec::new();
        for child in Self::named_children(node) {
            match child.kind() {
                "parameter_declaration" | "variadic_parameter_declaration" => {
                    parameters.push(self.build_parameter(parent_id, &child, code));
                }
                "comment" => {
                    self.build_comment(parent_id, &child, code);
                }
                _ => {}
            }
        }
        parameters
    }

    fn build_parameter(&mut self, parent_id: u32, node: &Node, code: &[u8]) -> Rc<Parameter> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let mut cursor = node.walk();
        let name_nodes: Vec<Node> = node.children_by_field_name("name", &mut cursor).collect();
        let names = name_nodes
            .iter()
            .map(|name| self.build_identifier(id, name, code))
            .collect();
        let ty = match node.child_by_field_name("type") {
            Some(ty) => self.build_type(id, &ty, code),
            None => Type::Unknown(self.build_missing(id, node, code)),
        };

        let node = Rc::new(Parameter {
            id,
            location,
            names,
            ty,
        });
        self.arena
            .add_node(AstNode::Misc(Misc::Parameter(node.clone())), parent_id);
        node
    }

    /// `func f() T` declares a single result without a parameter list.
    fn build_unnamed_result(&mut self, parent_id: u32, node: &Node, code: &[u8]) -> Rc<Parameter> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let ty = self.build_type(id, node, code);
        let node = Rc::new(Parameter {
            id,
            location,
            names: Vec::new(),
            ty,
        });
        self.arena
            .add_node(AstNode::Misc(Misc::Parameter(node.clone())), parent_id);
        node
    }

    fn build_variable(
        &mut self,
        parent_id: u32,
        node: &Node,
        code: &[u8],
    ) -> Rc<VariableDefinition> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let (kind, names, ty, values) = if node.kind() == "short_var_declaration" {
            let names = node
                .child_by_field_name("left")
                .map(|left| {
                    Self::named_children(&left)
                        .iter()
                        .filter(|name| name.kind() == "identifier")
                        .map(|name| self.build_identifier(id, name, code))
                        .collect()
                })
                .unwrap_or_default();
            let values = node
                .child_by_field_name("right")
                .map(|right| self.build_expression_list(id, &right, code))
                .unwrap_or_default();
            (VariableKind::Short, names, None, values)
        } else {
            let kind = if node.kind() == "const_spec" {
                VariableKind::Const
            } else {
                VariableKind::Var
            };
            let mut cursor = node.walk();
            let name_nodes: Vec<Node> = node.children_by_field_name("name", &mut cursor).collect();
            let names = name_nodes
                .iter()
                .map(|name| self.build_identifier(id, name, code))
                .collect();
            let ty = node
                .child_by_field_name("type")
                .map(|ty| self.build_type(id, &ty, code));
            let values = node
                .child_by_field_name("value")
                .map(|value| self.build_expression_list(id, &value, code))
                .unwrap_or_default();
            (kind, names, ty, values)
        };

        let node = Rc::new(VariableDefinition {
            id,
            location,
            kind,
            names,
            ty,
            values,
        });
        self.arena
            .add_node(AstNode::Definition(Definition::Variable(node.clone())), parent_id);
        node
    }

    fn build_block(&mut self, parent_id: u32, node: &Node, code: &[u8]) -> Rc<Block> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let statements = Self::statement_children(node)
            .iter()
            .map(|statement| self.build_node(id, statement, code))
            .collect();

        let node = Rc::new(Block {
            id,
            location,
            statements,
        });
        self.arena
            .add_node(AstNode::Statement(Statement::Block(node.clone())), parent_id);
        node
    }

    fn build_select(&mut self, parent_id: u32, node: &Node, code: &[u8]) -> Rc<SelectStatement> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let clauses = Self::named_children(node)
            .iter()
            .map(|clause| self.build_node(id, clause, code))
            .collect();

        let node = Rc::new(SelectStatement {
            id,
            location,
            clauses,
        });
        self.arena
            .add_node(AstNode::Statement(Statement::Select(node.clone())), parent_id);
        node
    }

    /// Builds a `case`/`default` clause. Returns `None` for a `case` whose
    /// communication could not be parsed; the caller keeps it as an opaque node.
    fn build_clause(
        &mut self,
        parent_id: u32,
        node: &Node,
        code: &[u8],
    ) -> Option<Rc<SelectClause>> {
        let communication_node = if node.kind() == "default_case" {
            None
        } else {
            let communication = node.child_by_field_name("communication")?;
            if !matches!(communication.kind(), "send_statement" | "receive_statement") {
                return None;
            }
            Some(communication)
        };

        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let communication = match communication_node {
            None => Communication::Default,
            Some(ref send) if send.kind() == "send_statement" => {
                Communication::Send(self.build_send(id, send, code))
            }
            Some(ref receive) => {
                Communication::Receive(self.build_receive_statement(id, receive, code))
            }
        };
        let skipped = communication_node.map(|communication| communication.id());
        let body = Self::statement_children(node)
            .iter()
            .filter(|statement| Some(statement.id()) != skipped)
            .map(|statement| self.build_node(id, statement, code))
            .collect();

        let node = Rc::new(SelectClause {
            id,
            location,
            communication,
            body,
        });
        self.arena
            .add_node(AstNode::Misc(Misc::Clause(node.clone())), parent_id);
        Some(node)
    }

    fn build_send(&mut self, parent_id: u32, node: &Node, code: &[u8]) -> Rc<SendStatement> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let channel = self.build_expression_field(id, node, "channel", code);
        let value = self.build_expression_field(id, node, "value", code);

        let node = Rc::new(SendStatement {
            id,
            location,
            channel,
            value,
        });
        self.arena
            .add_node(AstNode::Statement(Statement::Send(node.clone())), parent_id);
        node
    }

    fn build_receive_statement(
        &mut self,
        parent_id: u32,
        node: &Node,
        code: &[u8],
    ) -> Rc<ReceiveStatement> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let left = node
            .child_by_field_name("left")
            .map(|left| self.build_expression_list(id, &left, code))
            .unwrap_or_default();
        let mut cursor = node.walk();
        let define = node.children(&mut cursor).any(|child| child.kind() == ":=");
        let right = self.build_expression_field(id, node, "right", code);

        let node = Rc::new(ReceiveStatement {
            id,
            location,
            left,
            define,
            right,
        });
        self.arena
            .add_node(AstNode::Statement(Statement::Receive(node.clone())), parent_id);
        node
    }

    fn build_expression_list(&mut self, parent_id: u32, node: &Node, code: &[u8]) -> Vec<Expression> {
        let mut expressions = Vec::new();
        for child in Self::named_children(node) {
            if child.kind() == "comment" {
                self.build_comment(parent_id, &child, code);
            } else {
                expressions.push(self.build_expression(parent_id, &child, code));
            }
        }
        expressions
    }

    fn build_expression_field(
        &mut self,
        parent_id: u32,
        node: &Node,
        field_name: &str,
        code: &[u8],
    ) -> Expression {
        match node.child_by_field_name(field_name) {
            Some(child) => self.build_expression(parent_id, &child, code),
            None => Expression::Unknown(self.build_missing(parent_id, node, code)),
        }
    }

    fn build_expression(&mut self, parent_id: u32, node: &Node, code: &[u8]) -> Expression {
        match node.kind() {
            "identifier" => Expression::Identifier(self.build_identifier(parent_id, node, code)),
            "int_literal" => self.build_number_literal(parent_id, node, NumberKind::Int, code),
            "float_literal" => self.build_number_literal(parent_id, node, NumberKind::Float, code),
            "imaginary_literal" => {
                self.build_number_literal(parent_id, node, NumberKind::Imaginary, code)
            }
            "interpreted_string_literal" | "raw_string_literal" => {
                let id = self.get_node_id();
                let literal = Literal::String(Rc::new(StringLiteral::new(
                    id,
                    Self::node_text(node, code),
                    Self::get_location(node, code),
                )));
                self.arena
                    .add_node(AstNode::Expression(Expression::Literal(literal.clone())), parent_id);
                Expression::Literal(literal)
            }
            "unary_expression" if Self::is_receive_operator(node, code) => {
                Expression::Receive(self.build_receive_expression(parent_id, node, code))
            }
            "call_expression" => {
                Expression::FunctionCall(self.build_function_call(parent_id, node, code))
            }
            "selector_expression" if node.child_by_field_name("field").is_some() => {
                Expression::Selector(self.build_selector(parent_id, node, code))
            }
            "parenthesized_expression" => {
                Expression::Parenthesized(self.build_parenthesized(parent_id, node, code))
            }
            "binary_expression" => Expression::Binary(self.build_binary(parent_id, node, code)),
            "func_literal" => {
                Expression::FunctionLiteral(self.build_function(parent_id, node, code))
            }
            kind if TYPE_KINDS.contains(&kind) => {
                Expression::Type(self.build_type(parent_id, node, code))
            }
            _ => Expression::Unknown(self.build_other(parent_id, node, code)),
        }
    }

    fn build_number_literal(
        &mut self,
        parent_id: u32,
        node: &Node,
        kind: NumberKind,
        code: &[u8],
    ) -> Expression {
        let id = self.get_node_id();
        let literal = Literal::Number(Rc::new(NumberLiteral::new(
            id,
            kind,
            Self::node_text(node, code),
            Self::get_location(node, code),
        )));
        self.arena
            .add_node(AstNode::Expression(Expression::Literal(literal.clone())), parent_id);
        Expression::Literal(literal)
    }

    fn build_receive_expression(
        &mut self,
        parent_id: u32,
        node: &Node,
        code: &[u8],
    ) -> Rc<ReceiveExpression> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let operand = self.build_expression_field(id, node, "operand", code);

        let node = Rc::new(ReceiveExpression {
            id,
            location,
            operand,
        });
        self.arena
            .add_node(AstNode::Expression(Expression::Receive(node.clone())), parent_id);
        node
    }

    fn build_function_call(
        &mut self,
        parent_id: u32,
        node: &Node,
        code: &[u8],
    ) -> Rc<FunctionCallExpression> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let function = self.build_expression_field(id, node, "function", code);
        let arguments = node
            .child_by_field_name("arguments")
            .map(|arguments| self.build_expression_list(id, &arguments, code))
            .unwrap_or_default();

        let node = Rc::new(FunctionCallExpression {
            id,
            location,
            function,
            arguments,
        });
        self.arena
            .add_node(AstNode::Expression(Expression::FunctionCall(node.clone())), parent_id);
        node
    }

    fn build_selector(
        &mut self,
        parent_id: u32,
        node: &Node,
        code: &[u8],
    ) -> Rc<SelectorExpression> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let operand = self.build_expression_field(id, node, "operand", code);
        let field = match node.child_by_field_name("field") {
            Some(field) => self.build_identifier(id, &field, code),
            None => self.build_identifier(id, node, code),
        };

        let node = Rc::new(SelectorExpression {
            id,
            location,
            operand,
            field,
        });
        self.arena
            .add_node(AstNode::Expression(Expression::Selector(node.clone())), parent_id);
        node
    }

    fn build_parenthesized(
        &mut self,
        parent_id: u32,
        node: &Node,
        code: &[u8],
    ) -> Rc<ParenthesizedExpression> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let inner = Self::named_children(node)
            .into_iter()
            .find(|child| child.kind() != "comment");
        let expression = match inner {
            Some(inner) => self.build_expression(id, &inner, code),
            None => Expression::Unknown(self.build_missing(id, node, code)),
        };

        let node = Rc::new(ParenthesizedExpression {
            id,
            location,
            expression,
        });
        self.arena.add_node(
            AstNode::Expression(Expression::Parenthesized(node.clone())),
            parent_id,
        );
        node
    }

    fn build_binary(&mut self, parent_id: u32, node: &Node, code: &[u8]) -> Rc<BinaryExpression> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let left = self.build_expression_field(id, node, "left", code);
        let operator = node
            .child_by_field_name("operator")
            .map(|operator| Self::node_text(&operator, code))
            .unwrap_or_default();
        let right = self.build_expression_field(id, node, "right", code);

        let node = Rc::new(BinaryExpression {
            id,
            location,
            left,
            operator,
            right,
        });
        self.arena
            .add_node(AstNode::Expression(Expression::Binary(node.clone())), parent_id);
        node
    }

    fn build_type(&mut self, parent_id: u32, node: &Node, code: &[u8]) -> Type {
        match node.kind() {
            "type_identifier" => Type::Named(self.build_identifier(parent_id, node, code)),
            "qualified_type"
                if node.child_by_field_name("package").is_some()
                    && node.child_by_field_name("name").is_some() =>
            {
                Type::Qualified(self.build_qualified_type(parent_id, node, code))
            }
            "channel_type" if node.child_by_field_name("value").is_some() => {
                Type::Channel(self.build_channel_type(parent_id, node, code))
            }
            "pointer_type" | "parenthesized_type" => {
                let inner = Self::named_children(node)
                    .into_iter()
                    .find(|child| child.kind() != "comment");
                match (node.kind(), inner) {
                    ("pointer_type", Some(pointee)) => {
                        Type::Pointer(self.build_pointer_type(parent_id, node, &pointee, code))
                    }
                    (_, Some(inner)) => self.build_type(parent_id, &inner, code),
                    (_, None) => Type::Unknown(self.build_other(parent_id, node, code)),
                }
            }
            _ => Type::Unknown(self.build_other(parent_id, node, code)),
        }
    }

    fn build_qualified_type(&mut self, parent_id: u32, node: &Node, code: &[u8]) -> Rc<QualifiedType> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let package = match node.child_by_field_name("package") {
            Some(package) => self.build_identifier(id, &package, code),
            None => self.build_identifier(id, node, code),
        };
        let name = match node.child_by_field_name("name") {
            Some(name) => self.build_identifier(id, &name, code),
            None => self.build_identifier(id, node, code),
        };

        let node = Rc::new(QualifiedType {
            id,
            location,
            package,
            name,
        });
        self.arena.add_node(
            AstNode::Expression(Expression::Type(Type::Qualified(node.clone()))),
            parent_id,
        );
        node
    }

    fn build_channel_type(&mut self, parent_id: u32, node: &Node, code: &[u8]) -> Rc<ChannelType> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let mut cursor = node.walk();
        let tokens: Vec<&str> = node
            .children(&mut cursor)
            .map(|child| child.kind())
            .collect();
        let direction = match tokens.as_slice() {
            ["<-", ..] => ChannelDirection::Receive,
            [_, "<-", ..] => ChannelDirection::Send,
            _ => ChannelDirection::Bidirectional,
        };
        let element = match node.child_by_field_name("value") {
            Some(value) => self.build_type(id, &value, code),
            None => Type::Unknown(self.build_missing(id, node, code)),
        };

        let node = Rc::new(ChannelType {
            id,
            location,
            direction,
            element,
        });
        self.arena.add_node(
            AstNode::Expression(Expression::Type(Type::Channel(node.clone()))),
            parent_id,
        );
        node
    }

    fn build_pointer_type(
        &mut self,
        parent_id: u32,
        node: &Node,
        pointee: &Node,
        code: &[u8],
    ) -> Rc<PointerType> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let pointee = self.build_type(id, pointee, code);

        let node = Rc::new(PointerType {
            id,
            location,
            pointee,
        });
        self.arena.add_node(
            AstNode::Expression(Expression::Type(Type::Pointer(node.clone()))),
            parent_id,
        );
        node
    }

    fn build_identifier(&mut self, parent_id: u32, node: &Node, code: &[u8]) -> Rc<Identifier> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let name = Self::node_text(node, code);
        let node = Rc::new(Identifier::new(id, name, location));
        self.arena
            .add_node(AstNode::Expression(Expression::Identifier(node.clone())), parent_id);
        node
    }

    fn build_comment(&mut self, parent_id: u32, node: &Node, code: &[u8]) -> Rc<Comment> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let node = Rc::new(Comment::new(id, Self::node_text(node, code), location));
        self.comments.push(node.clone());
        self.arena
            .add_node(AstNode::Misc(Misc::Comment(node.clone())), parent_id);
        node
    }

    fn build_other(&mut self, parent_id: u32, node: &Node, code: &[u8]) -> Rc<OtherNode> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let children = Self::named_children(node)
            .iter()
            .map(|child| self.build_node(id, child, code))
            .collect();
        let node = Rc::new(OtherNode::new(id, node.kind().to_string(), children, location));
        self.arena
            .add_node(AstNode::Misc(Misc::Other(node.clone())), parent_id);
        node
    }

    /// Placeholder for a required child that tree-sitter could not recover.
    fn build_missing(&mut self, parent_id: u32, node: &Node, code: &[u8]) -> Rc<OtherNode> {
        let id = self.get_node_id();
        let location = Self::get_location(node, code);
        let node = Rc::new(OtherNode::new(id, "MISSING".to_string(), Vec::new(), location));
        self.arena
            .add_node(AstNode::Misc(Misc::Other(node.clone())), parent_id);
        node
    }

    fn is_receive_operator(node: &Node, code: &[u8]) -> bool {
        node.child_by_field_name("operator")
            .is_some_and(|operator| operator.utf8_text(code).is_ok_and(|text| text == "<-"))
    }

    fn import_specs<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
        Self::named_children(node)
            .into_iter()
            .flat_map(|child| {
                if child.kind() == "import_spec_list" {
                    Self::named_children(&child)
                } else {
                    vec![child]
                }
            })
            .collect()
    }

    /// Named children with any `statement_list` wrapper flattened away.
    fn statement_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
        Self::named_children(node)
            .into_iter()
            .flat_map(|child| {
                if child.kind() == "statement_list" {
                    Self::statement_children(&child)
                } else {
                    vec![child]
                }
            })
            .collect()
    }

    fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor).collect()
    }

    fn collect_syntax_errors(root: &Node, code: &[u8]) -> Vec<Location> {
        let mut errors = Vec::new();
        let mut stack = vec![*root];
        while let Some(node) = stack.pop() {
            if node.is_error() || node.is_missing() {
                errors.push(Self::get_location(&node, code));
            } else if node.has_error() {
                let mut cursor = node.walk();
                let children: Vec<Node> = node.children(&mut cursor).collect();
                stack.extend(children.into_iter().rev());
            }
        }
        errors
    }

    fn node_text(node: &Node, code: &[u8]) -> String {
        node.utf8_text(code).unwrap_or_default().to_string()
    }

    fn get_node_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn get_location(node: &Node, code: &[u8]) -> Location {
        let start = node.start_position();
        let end = node.end_position();
        Location::new(
            Self::to_u32(node.start_byte()),
            Self::to_u32(node.end_byte()),
            Self::to_u32(start.row).saturating_add(1),
            Self::to_u32(start.column).saturating_add(1),
            Self::to_u32(end.row).saturating_add(1),
            Self::to_u32(end.column).saturating_add(1),
            Self::node_text(node, code),
        )
    }

    fn to_u32(value: usize) -> u32 {
        u32::try_from(value).unwrap_or(u32::MAX)
    }
}
