//! Pure predicates over single expressions.
//!
//! Nothing here walks the tree or reports; every function answers one question
//! about the expression it is given, using the typed context only for name
//! resolution and static types.

use chanlint_ast::nodes::{Expression, FunctionCallExpression, Literal, NumberKind, Type};
use chanlint_type_checker::{type_info::TIME_PACKAGE_PATH, typed_context::TypedContext};
use thiserror::Error;

/// Spelling of the instant type of the `time` package.
pub const TIME_TYPE: &str = "time.Time";

/// A channel capacity that is not a constant integer literal.
///
/// Never shown to the user: it only switches off the capacity checks for the
/// call site it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("channel capacity is not a constant integer literal")]
pub struct Unresolvable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelCreation {
    /// `make(chan T)`
    Unbuffered,
    /// `make(chan T, n)`
    Buffered { capacity: Result<u64, Unresolvable> },
}

/// Matches a call to the builtin `make` whose first argument is a channel type.
///
/// A `make` that resolves to anything other than the builtin (a local
/// variable, a package-level function) never matches, and neither does an
/// unresolved one.
#[must_use]
pub fn is_channel_creation(
    ctx: &TypedContext,
    call: &FunctionCallExpression,
) -> Option<ChannelCreation> {
    let Expression::Identifier(function) = call.function.strip_parentheses() else {
        return None;
    };
    let declaration = ctx.resolve(function)?;
    if !declaration.is_builtin() || declaration.name != "make" {
        return None;
    }
    if !matches!(call.arguments.first(), Some(Expression::Type(Type::Channel(_)))) {
        return None;
    }
    match call.arguments.as_slice() {
        [_] => Some(ChannelCreation::Unbuffered),
        [_, capacity] => Some(ChannelCreation::Buffered {
            capacity: eval_capacity(capacity),
        }),
        _ => None,
    }
}

/// Value of a capacity argument written as a non-negative integer literal.
///
/// # Errors
///
/// Returns [`Unresolvable`] for anything but an integer literal (identifiers,
/// constant expressions, calls, negative numbers) and for literals that do not
/// fit in a `u64`.
pub fn eval_capacity(expression: &Expression) -> Result<u64, Unresolvable> {
    match expression.strip_parentheses() {
        Expression::Literal(Literal::Number(number)) if number.kind == NumberKind::Int => {
            parse_int_literal(&number.value)
        }
        _ => Err(Unresolvable),
    }
}

/// Parses a Go integer literal: decimal, `0x`, `0o`, legacy `0` octal and `0b`,
/// with optional `_` digit separators.
///
/// # Errors
///
/// Returns [`Unresolvable`] if the text is not a valid literal or overflows `u64`.
pub fn parse_int_literal(text: &str) -> Result<u64, Unresolvable> {
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    let (radix, digits) = match digits.get(..2) {
        Some("0x" | "0X") => (16, &digits[2..]),
        Some("0o" | "0O") => (8, &digits[2..]),
        Some("0b" | "0B") => (2, &digits[2..]),
        _ if digits.len() > 1 && digits.starts_with('0') => (8, &digits[1..]),
        _ => (10, digits.as_str()),
    };
    // `from_str_radix` accepts a leading `+`, Go literals do not.
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(Unresolvable);
    }
    u64::from_str_radix(digits, radix).map_err(|_| Unresolvable)
}

/// Whether a `select` receive acts as a timeout.
///
/// True when the received value's static type is `time.Time`, or when the
/// operand is a direct `time.After(..)` call. Parentheses are looked through.
/// Timers held in local variables, wrapper functions and `timer.C` fields are
/// not recognised.
#[must_use]
pub fn is_timeout_receive(ctx: &TypedContext, expression: &Expression) -> bool {
    let expression = expression.strip_parentheses();
    let Expression::Receive(receive) = expression else {
        return false;
    };
    ctx.type_of(expression)
        .is_some_and(|type_info| type_info.to_string() == TIME_TYPE)
        || is_time_after(ctx, &receive.operand)
}

/// Matches `X.After(..)` where `X` names an import of the `time` package.
#[must_use]
pub fn is_time_after(ctx: &TypedContext, expression: &Expression) -> bool {
    let Some(call) = expression.strip_parentheses().as_function_call() else {
        return false;
    };
    let Expression::Selector(selector) = call.function.strip_parentheses() else {
        return false;
    };
    if selector.field.name != "After" {
        return false;
    }
    let Expression::Identifier(package) = selector.operand.strip_parentheses() else {
        return false;
    };
    ctx.resolve(package)
        .and_then(|declaration| declaration.import_path())
        .is_some_and(|path| path == TIME_PACKAGE_PATH)
}
