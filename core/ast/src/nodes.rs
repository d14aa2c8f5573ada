use core::fmt;
use std::{
    fmt::{Display, Formatter},
    rc::Rc,
};

use serde::Serialize;

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
pub struct Location {
    pub offset_start: u32,
    pub offset_end: u32,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
    #[serde(skip)]
    pub source: String,
}

impl Location {
    #[must_use]
    pub fn new(
        offset_start: u32,
        offset_end: u32,
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
        source: String,
    ) -> Self {
        Self {
            offset_start,
            offset_end,
            start_line,
            start_column,
            end_line,
            end_column,
            source,
        }
    }

    /// The identity of the node within its file.
    #[must_use]
    pub fn position(&self) -> Position {
        Position(self.offset_start)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_column)
    }
}

/// Byte offset of a node's first byte within its source file.
///
/// Positions are totally ordered and unique per statement, so they double as
/// deduplication keys when cross-referencing nodes seen at different points of
/// one traversal.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize)]
pub struct Position(u32);

impl Position {
    #[must_use]
    pub const fn new(offset: u32) -> Self {
        Self(offset)
    }

    #[must_use]
    pub const fn offset(self) -> u32 {
        self.0
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

#[macro_export]
macro_rules! ast_node {
    (
        $(#[$outer:meta])*
        $struct_vis:vis struct $name:ident {
            $(
                $(#[$field_attr:meta])*
                $field_vis:vis $field_name:ident : $field_ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Clone, PartialEq, Eq, Debug)]
        $struct_vis struct $name {
            pub id: u32,
            pub location: $crate::nodes::Location,
            $(
                $(#[$field_attr])*
                $field_vis $field_name : $field_ty,
            )*
        }
    };
}

macro_rules! ast_nodes {
    (
        $(
            $(#[$outer:meta])*
            $struct_vis:vis struct $name:ident { $($fields:tt)* }
        )+
    ) => {
        $(
            ast_node! {
                $(#[$outer])*
                $struct_vis struct $name { $($fields)* }
            }
        )+
    };
}

macro_rules! ast_enum {
    (
        $(#[$outer:meta])*
        $enum_vis:vis enum $name:ident {
            $(
                $(#[$arm_attr:meta])*
                $(@$conv:ident)? $arm:ident $( ( $($tuple:tt)* ) )? $( { $($struct:tt)* } )? ,
            )*
        }
    ) => {
        $(#[$outer])*
        #[derive(Clone, PartialEq, Eq, Debug)]
        $enum_vis enum $name {
            $(
                $(#[$arm_attr])*
                $arm $( ( $($tuple)* ) )? $( { $($struct)* } )? ,
            )*
        }

        impl $name {

            #[must_use]
            pub fn id(&self) -> u32 {
                match self {
                    $(
                        $name::$arm(n, ..) => { ast_enum!(@id_arm n, $($conv)?) }
                    )*
                }
            }

            #[must_use]
            pub fn location(&self) -> Location {
                match self {
                    $(
                        $name::$arm(n, ..) => { ast_enum!(@location_arm n, $($conv)?) }
                    )*
                }
            }
        }
    };

    (@id_arm $inner:ident, inner_enum) => {
        $inner.id()
    };

    (@id_arm $inner:ident, ) => {
        $inner.id
    };

    (@location_arm $inner:ident, inner_enum) => {
        $inner.location()
    };

    (@location_arm $inner:ident, ) => {
        $inner.location.clone()
    };
}

macro_rules! ast_enums {
    (
        $(
            $(#[$outer:meta])*
            $enum_vis:vis enum $name:ident { $($arms:tt)* }
        )+
    ) => {
        $(
            ast_enum! {
                $(#[$outer])*
                $enum_vis enum $name { $($arms)* }
            }
        )+

        #[derive(Clone, PartialEq, Eq, Debug)]
        pub enum AstNode {
            $(
                $name($name),
            )+
        }

        impl AstNode {
            #[must_use]
            pub fn id(&self) -> u32 {
                match self {
                    $(
                        AstNode::$name(node) => node.id(),
                    )+
                }
            }

            #[must_use]
            pub fn location(&self) -> Location {
                match self {
                    $(
                        AstNode::$name(node) => node.location(),
                    )+
                }
            }

            #[must_use]
            pub fn start_line(&self) -> u32 {
                match self {
                    $(
                        AstNode::$name(node) => node.location().start_line,
                    )+
                }
            }
        }
    };
}

ast_enums! {

    pub enum Ast {
        SourceFile(Rc<SourceFile>),
    }

    pub enum Directive {
        Import(Rc<ImportSpec>),
    }

    pub enum Definition {
        Function(Rc<FunctionDefinition>),
        Variable(Rc<VariableDefinition>),
    }

    pub enum Statement {
        Block(Rc<Block>),
        Select(Rc<SelectStatement>),
        Send(Rc<SendStatement>),
        Receive(Rc<ReceiveStatement>),
    }

    pub enum Expression {
        Identifier(Rc<Identifier>),
        @inner_enum Literal(Literal),
        Receive(Rc<ReceiveExpression>),
        FunctionCall(Rc<FunctionCallExpression>),
        Selector(Rc<SelectorExpression>),
        Parenthesized(Rc<ParenthesizedExpression>),
        Binary(Rc<BinaryExpression>),
        FunctionLiteral(Rc<FunctionDefinition>),
        @inner_enum Type(Type),
        Unknown(Rc<OtherNode>),
    }

    pub enum Literal {
        Number(Rc<NumberLiteral>),
        String(Rc<StringLiteral>),
    }

    pub enum Type {
        Named(Rc<Identifier>),
        Qualified(Rc<QualifiedType>),
        Channel(Rc<ChannelType>),
        Pointer(Rc<PointerType>),
        Unknown(Rc<OtherNode>),
    }

    pub enum Misc {
        Clause(Rc<SelectClause>),
        Parameter(Rc<Parameter>),
        Comment(Rc<Comment>),
        Other(Rc<OtherNode>),
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize)]
pub enum ChannelDirection {
    /// `chan T`
    Bidirectional,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Receive,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NumberKind {
    Int,
    Float,
    Imaginary,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VariableKind {
    Var,
    Const,
    /// `a, b := ...`
    Short,
}

/// The communication slot of a `select` clause.
///
/// The default clause is its own variant; the builder decides it once from
/// the concrete syntax so no later pass has to infer it from a missing field.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Communication {
    Default,
    Send(Rc<SendStatement>),
    Receive(Rc<ReceiveStatement>),
}

ast_nodes! {

    pub struct SourceFile {
        pub package_name: Option<String>,
        pub imports: Vec<Rc<ImportSpec>>,
        pub declarations: Vec<AstNode>,
        pub comments: Vec<Rc<Comment>>,
        pub syntax_errors: Vec<Location>,
    }

    pub struct ImportSpec {
        pub name: Option<Rc<Identifier>>,
        pub path: String,
    }

    /// Function and method declarations as well as function literals.
    pub struct FunctionDefinition {
        pub name: Option<Rc<Identifier>>,
        pub receiver: Vec<Rc<Parameter>>,
        pub parameters: Vec<Rc<Parameter>>,
        pub results: Vec<Rc<Parameter>>,
        pub body: Option<Rc<Block>>,
    }

    pub struct Parameter {
        pub names: Vec<Rc<Identifier>>,
        pub ty: Type,
    }

    pub struct VariableDefinition {
        pub kind: VariableKind,
        pub names: Vec<Rc<Identifier>>,
        pub ty: Option<Type>,
        pub values: Vec<Expression>,
    }

    pub struct Block {
        pub statements: Vec<AstNode>,
    }

    pub struct SelectStatement {
        pub clauses: Vec<AstNode>,
    }

    pub struct SelectClause {
        pub communication: Communication,
        pub body: Vec<AstNode>,
    }

    pub struct SendStatement {
        pub channel: Expression,
        pub value: Expression,
    }

    /// `v, ok := <-ch` or a bare `<-ch` in a `select` case.
    pub struct ReceiveStatement {
        pub left: Vec<Expression>,
        pub define: bool,
        pub right: Expression,
    }

    pub struct ReceiveExpression {
        pub operand: Expression,
    }

    pub struct FunctionCallExpression {
        pub function: Expression,
        pub arguments: Vec<Expression>,
    }

    pub struct SelectorExpression {
        pub operand: Expression,
        pub field: Rc<Identifier>,
    }

    pub struct ParenthesizedExpression {
        pub expression: Expression,
    }

    pub struct BinaryExpression {
        pub left: Expression,
        pub operator: String,
        pub right: Expression,
    }

    pub struct Identifier {
        pub name: String,
    }

    pub struct NumberLiteral {
        pub kind: NumberKind,
        pub value: String,
    }

    pub struct StringLiteral {
        pub value: String,
    }

    pub struct QualifiedType {
        pub package: Rc<Identifier>,
        pub name: Rc<Identifier>,
    }

    pub struct ChannelType {
        pub direction: ChannelDirection,
        pub element: Type,
    }

    pub struct PointerType {
        pub pointee: Type,
    }

    pub struct Comment {
        pub text: String,
    }

    /// Any construct without a dedicated node. The tree-sitter kind is kept so
    /// consumers can still tell statements apart, and all named children are
    /// built so nothing below it is lost to a traversal.
    pub struct OtherNode {
        pub kind: String,
        pub children: Vec<AstNode>,
    }
}
