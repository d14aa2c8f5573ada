//! Implementation methods for AST enum types.
//!
//! This module provides convenience methods for commonly-used shape checks
//! and queries on AST enum variants.

use std::rc::Rc;

use crate::nodes::{Communication, Expression, FunctionCallExpression, Identifier};

impl Expression {
    /// Looks through any number of enclosing parentheses.
    ///
    /// # Example
    ///
    /// ```ignore
    /// // `((time.After(d)))` and `time.After(d)` strip to the same call
    /// let call = expression.strip_parentheses();
    /// ```
    #[must_use]
    pub fn strip_parentheses(&self) -> &Expression {
        match self {
            Expression::Parenthesized(parenthesized) => parenthesized.expression.strip_parentheses(),
            other => other,
        }
    }

    #[must_use]
    pub fn as_identifier(&self) -> Option<&Rc<Identifier>> {
        match self {
            Expression::Identifier(identifier) => Some(identifier),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_function_call(&self) -> Option<&Rc<FunctionCallExpression>> {
        match self {
            Expression::FunctionCall(call) => Some(call),
            _ => None,
        }
    }
}

impl Communication {
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Communication::Default)
    }
}
