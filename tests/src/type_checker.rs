use chanlint_ast::nodes::{AstNode, Communication, Expression, Misc, SelectClause};
use chanlint_type_checker::{symbol_table::DeclarationKind, typed_context::TypedContext};

use crate::utils::{read_fixture, typed_context};

fn clauses(ctx: &TypedContext) -> Vec<std::rc::Rc<SelectClause>> {
    ctx.filter_nodes(|node| matches!(node, AstNode::Misc(Misc::Clause(_))))
        .into_iter()
        .filter_map(|node| match node {
            AstNode::Misc(Misc::Clause(clause)) => Some(clause),
            _ => None,
        })
        .collect()
}

fn received_type(ctx: &TypedContext, clause: &SelectClause) -> Option<String> {
    let Communication::Receive(receive) = &clause.communication else {
        return None;
    };
    ctx.type_of(&receive.right).map(|type_info| type_info.to_string())
}

fn make_types(ctx: &TypedContext) -> Vec<String> {
    let mut calls: Vec<_> = ctx
        .filter_nodes(|node| matches!(node, AstNode::Expression(Expression::FunctionCall(_))))
        .into_iter()
        .filter_map(|node| match node {
            AstNode::Expression(expression @ Expression::FunctionCall(_)) => Some(expression),
            _ => None,
        })
        .collect();
    calls.sort_by_key(Expression::id);
    calls
        .iter()
        .filter_map(|call| ctx.type_of(call).map(|type_info| type_info.to_string()))
        .filter(|rendered| rendered.starts_with("chan "))
        .collect()
}

#[test]
fn test_fixtures_resolve_without_errors() {
    for name in [
        "guarded_select.go",
        "exotic_clauses.go",
        "time_after.go",
        "timer_heuristics.go",
        "capacities.go",
        "nolint.go",
    ] {
        let ctx = typed_context(&read_fixture(name));
        assert!(ctx.errors().is_empty(), "{name}: {:?}", ctx.errors());
    }
}

#[test]
fn test_parenthesized_time_after_receives_time() {
    let ctx = typed_context(&read_fixture("time_after.go"));
    let clauses = clauses(&ctx);
    assert_eq!(clauses.len(), 2);
    assert_eq!(received_type(&ctx, &clauses[1]).as_deref(), Some("time.Time"));
}

#[test]
fn test_indirect_timers_stay_untyped() {
    let ctx = typed_context(&read_fixture("timer_heuristics.go"));
    let mut clauses = clauses(&ctx);
    clauses.sort_by_key(|clause| clause.id);
    let received: Vec<Option<String>> = clauses
        .iter()
        .filter(|clause| matches!(clause.communication, Communication::Receive(_)))
        .map(|clause| received_type(&ctx, clause))
        .collect();
    assert_eq!(received.len(), 5);
    assert_eq!(received[0].as_deref(), Some("time.Time"));
    for rendered in &received[1..] {
        assert_ne!(rendered.as_deref(), Some("time.Time"));
    }
}

#[test]
fn test_make_calls_are_typed_as_their_channel() {
    let ctx = typed_context(&read_fixture("capacities.go"));
    let types = make_types(&ctx);
    assert_eq!(types[..3], ["chan int", "chan int", "chan string"]);
}

#[test]
fn test_time_import_is_declared_in_file_scope() {
    let ctx = typed_context(&read_fixture("time_after.go"));
    let time_uses: Vec<_> = ctx
        .filter_nodes(|node| {
            matches!(node, AstNode::Expression(Expression::Identifier(identifier)) if identifier.name == "time")
        })
        .into_iter()
        .filter_map(|node| match node {
            AstNode::Expression(Expression::Identifier(identifier)) => Some(identifier),
            _ => None,
        })
        .collect();
    assert!(!time_uses.is_empty());
    for identifier in &time_uses {
        let declaration = ctx.resolve(identifier).unwrap();
        assert!(matches!(
            &declaration.kind,
            DeclarationKind::Import { path } if path == "time"
        ));
    }
}
