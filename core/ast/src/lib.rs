#![warn(clippy::pedantic)]
//! Typed AST for Go source files.
//!
//! [`builder::parse_source`] runs tree-sitter-go over a file and lowers the
//! concrete syntax tree into an [`arena::Arena`] of typed nodes. Only the
//! constructs the channel rules and name resolution need are modelled; the
//! rest is kept as opaque [`nodes::OtherNode`]s so traversals still reach
//! everything below them.

pub mod arena;
pub mod builder;
pub(crate) mod enums_impl;
pub mod errors;
pub mod nodes;
pub(crate) mod nodes_impl;
