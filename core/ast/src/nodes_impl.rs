use std::rc::Rc;

use super::nodes::{
    Ast, AstNode, Comment, Communication, Definition, Directive, Expression, FunctionDefinition,
    Identifier, Literal, Location, Misc, NumberKind, NumberLiteral, OtherNode, SelectClause,
    SourceFile, Statement, StringLiteral, Type,
};

impl AstNode {
    /// Direct children in source order.
    ///
    /// Declared names (function names, variable names, selector fields) are
    /// structural and are not returned; every expression, statement and type
    /// below the node is.
    #[must_use]
    pub fn children(&self) -> Vec<AstNode> {
        match self {
            AstNode::Ast(Ast::SourceFile(source_file)) => source_file.children(),
            AstNode::Directive(Directive::Import(_)) => vec![],
            AstNode::Definition(definition) => definition.children(),
            AstNode::Statement(statement) => statement.children(),
            AstNode::Expression(expression) => expression.children(),
            AstNode::Literal(_) => vec![],
            AstNode::Type(ty) => ty.children(),
            AstNode::Misc(misc) => misc.children(),
        }
    }
}

impl SourceFile {
    #[must_use]
    pub fn source(&self) -> &str {
        &self.location.source
    }

    #[must_use]
    pub fn children(&self) -> Vec<AstNode> {
        self.imports
            .iter()
            .map(|import| AstNode::Directive(Directive::Import(import.clone())))
            .chain(self.declarations.iter().cloned())
            .collect()
    }
}

impl Definition {
    #[must_use]
    pub fn children(&self) -> Vec<AstNode> {
        match self {
            Definition::Function(function) => function.children(),
            Definition::Variable(variable) => variable
                .ty
                .iter()
                .map(|ty| AstNode::Expression(Expression::Type(ty.clone())))
                .chain(variable.values.iter().cloned().map(AstNode::Expression))
                .collect(),
        }
    }
}

impl FunctionDefinition {
    #[must_use]
    pub fn children(&self) -> Vec<AstNode> {
        self.receiver
            .iter()
            .chain(&self.parameters)
            .chain(&self.results)
            .map(|parameter| AstNode::Misc(Misc::Parameter(parameter.clone())))
            .chain(
                self.body
                    .iter()
                    .map(|body| AstNode::Statement(Statement::Block(body.clone()))),
            )
            .collect()
    }
}

impl Statement {
    #[must_use]
    pub fn children(&self) -> Vec<AstNode> {
        match self {
            Statement::Block(block) => block.statements.clone(),
            Statement::Select(select) => select.clauses.clone(),
            Statement::Send(send) => vec![
                AstNode::Expression(send.channel.clone()),
                AstNode::Expression(send.value.clone()),
            ],
            Statement::Receive(receive) => receive
                .left
                .iter()
                .chain(std::iter::once(&receive.right))
                .cloned()
                .map(AstNode::Expression)
                .collect(),
        }
    }
}

impl Expression {
    #[must_use]
    pub fn children(&self) -> Vec<AstNode> {
        match self {
            Expression::Identifier(_) | Expression::Literal(_) => vec![],
            Expression::Receive(receive) => vec![AstNode::Expression(receive.operand.clone())],
            Expression::FunctionCall(call) => std::iter::once(&call.function)
                .chain(&call.arguments)
                .cloned()
                .map(AstNode::Expression)
                .collect(),
            Expression::Selector(selector) => vec![AstNode::Expression(selector.operand.clone())],
            Expression::Parenthesized(parenthesized) => {
                vec![AstNode::Expression(parenthesized.expression.clone())]
            }
            Expression::Binary(binary) => vec![
                AstNode::Expression(binary.left.clone()),
                AstNode::Expression(binary.right.clone()),
            ],
            Expression::FunctionLiteral(function) => function.children(),
            Expression::Type(ty) => ty.children(),
            Expression::Unknown(other) => other.children.clone(),
        }
    }
}

impl Type {
    #[must_use]
    pub fn children(&self) -> Vec<AstNode> {
        match self {
            Type::Named(_) | Type::Qualified(_) => vec![],
            Type::Channel(channel) => vec![AstNode::Expression(Expression::Type(
                channel.element.clone(),
            ))],
            Type::Pointer(pointer) => vec![AstNode::Expression(Expression::Type(
                pointer.pointee.clone(),
            ))],
            Type::Unknown(other) => other.children.clone(),
        }
    }
}

impl Misc {
    #[must_use]
    pub fn children(&self) -> Vec<AstNode> {
        match self {
            Misc::Clause(clause) => clause.children(),
            Misc::Parameter(parameter) => {
                vec![AstNode::Expression(Expression::Type(parameter.ty.clone()))]
            }
            Misc::Comment(_) => vec![],
            Misc::Other(other) => other.children.clone(),
        }
    }
}

impl SelectClause {
    #[must_use]
    pub fn children(&self) -> Vec<AstNode> {
        let communication = match &self.communication {
            Communication::Default => None,
            Communication::Send(send) => Some(AstNode::Statement(Statement::Send(send.clone()))),
            Communication::Receive(receive) => {
                Some(AstNode::Statement(Statement::Receive(receive.clone())))
            }
        };
        communication
            .into_iter()
            .chain(self.body.iter().cloned())
            .collect()
    }
}

impl Identifier {
    #[must_use]
    pub fn new(id: u32, name: String, location: Location) -> Self {
        Identifier { id, location, name }
    }
}

impl NumberLiteral {
    #[must_use]
    pub fn new(id: u32, kind: NumberKind, value: String, location: Location) -> Self {
        NumberLiteral {
            id,
            location,
            kind,
            value,
        }
    }
}

impl StringLiteral {
    #[must_use]
    pub fn new(id: u32, value: String, location: Location) -> Self {
        StringLiteral {
            id,
            location,
            value,
        }
    }

    /// The literal without its surrounding quotes. Escapes are left as written.
    #[must_use]
    pub fn unquoted(&self) -> &str {
        self.value
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .or_else(|| {
                self.value
                    .strip_prefix('`')
                    .and_then(|s| s.strip_suffix('`'))
            })
            .unwrap_or(&self.value)
    }
}

impl Comment {
    #[must_use]
    pub fn new(id: u32, text: String, location: Location) -> Self {
        Comment { id, location, text }
    }
}

impl OtherNode {
    #[must_use]
    pub fn new(id: u32, kind: String, children: Vec<AstNode>, location: Location) -> Self {
        OtherNode {
            id,
            location,
            kind,
            children,
        }
    }
}

impl Literal {
    #[must_use]
    pub fn as_number(&self) -> Option<&Rc<NumberLiteral>> {
        match self {
            Literal::Number(number) => Some(number),
            Literal::String(_) => None,
        }
    }
}
