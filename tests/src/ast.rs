use chanlint_ast::nodes::{AstNode, Communication, Expression, Misc, Statement, Type};

use crate::utils::{build_ast, get_test_data_path, read_fixture};

fn fixture_names() -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(get_test_data_path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".go"))
        .collect();
    names.sort();
    names
}

fn communications(source: &str) -> Vec<Vec<Communication>> {
    build_ast(source)
        .select_statements()
        .iter()
        .map(|select| {
            select
                .clauses
                .iter()
                .filter_map(|clause| match clause {
                    AstNode::Misc(Misc::Clause(clause)) => Some(clause.communication.clone()),
                    _ => None,
                })
                .collect()
        })
        .collect()
}

#[test]
fn test_fixtures_parse_without_syntax_errors() {
    let names = fixture_names();
    assert!(names.len() >= 6);
    for name in names {
        let arena = build_ast(&read_fixture(&name));
        let source_files = arena.source_files();
        assert_eq!(source_files.len(), 1, "{name}");
        assert!(
            source_files[0].syntax_errors.is_empty(),
            "{name}: {:?}",
            source_files[0].syntax_errors
        );
        assert_eq!(source_files[0].package_name.as_deref(), Some("main"), "{name}");
    }
}

#[test]
fn test_top_level_declarations() {
    let arena = build_ast(&read_fixture("guarded_select.go"));
    let source_file = &arena.source_files()[0];
    assert_eq!(source_file.imports.len(), 1);
    assert_eq!(source_file.imports[0].path, "fmt");

    let names: Vec<String> = arena
        .functions()
        .iter()
        .filter_map(|function| function.name.as_ref().map(|name| name.name.clone()))
        .collect();
    assert_eq!(names, vec!["sum".to_string(), "main".to_string()]);
}

#[test]
fn test_clause_shapes() {
    let selects = communications(&read_fixture("exotic_clauses.go"));
    assert_eq!(selects.len(), 1);
    let kinds: Vec<&str> = selects[0]
        .iter()
        .map(|communication| match communication {
            Communication::Default => "default",
            Communication::Send(_) => "send",
            Communication::Receive(_) => "receive",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["receive", "send", "send", "receive", "send", "default"]
    );
}

#[test]
fn test_send_source_text_is_kept() {
    let selects = communications(&read_fixture("exotic_clauses.go"));
    let sources: Vec<String> = selects[0]
        .iter()
        .filter_map(|communication| match communication {
            Communication::Send(send) => Some(send.location.source.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        sources,
        vec![
            "chInterface.(chan int) <- 3".to_string(),
            "channels[0] <- 4".to_string(),
            "chFunc() <- 5".to_string(),
        ]
    );
}

#[test]
fn test_parenthesized_timeout_operand() {
    let selects = communications(&read_fixture("time_after.go"));
    let Communication::Receive(receive) = &selects[0][1] else {
        panic!("expected a receive clause");
    };
    let Expression::Receive(expression) = &receive.right else {
        panic!("expected a receive expression");
    };
    assert!(matches!(expression.operand, Expression::Parenthesized(_)));
    assert!(expression.operand.strip_parentheses().as_function_call().is_some());
}

#[test]
fn test_every_select_is_reachable_from_its_source_file() {
    let arena = build_ast(&read_fixture("timer_heuristics.go"));
    let source_file = arena.source_files().remove(0);
    let mut stack = source_file.children();
    let mut selects = 0;
    while let Some(node) = stack.pop() {
        if matches!(node, AstNode::Statement(Statement::Select(_))) {
            selects += 1;
        }
        stack.extend(node.children());
    }
    assert_eq!(selects, 5);
    assert_eq!(arena.select_statements().len(), 5);
}

#[test]
fn test_literal_and_type_nodes_expose_children() {
    let arena = build_ast("package main\n\nvar sink = make(chan *int, 4)\n");
    let channel_types = arena.filter_nodes(|node| {
        matches!(node, AstNode::Expression(Expression::Type(Type::Channel(_))))
    });
    assert_eq!(channel_types.len(), 1);
    let AstNode::Expression(Expression::Type(channel)) = &channel_types[0] else {
        panic!("expected a channel type");
    };
    let ids = |nodes: Vec<AstNode>| nodes.iter().map(AstNode::id).collect::<Vec<_>>();
    let as_type = AstNode::Type(channel.clone());
    assert_eq!(ids(as_type.children()), ids(channel_types[0].children()));
    assert_eq!(as_type.children().len(), 1);

    let literals = arena.filter_nodes(|node| {
        matches!(node, AstNode::Expression(Expression::Literal(_)))
    });
    assert_eq!(literals.len(), 1);
    let AstNode::Expression(Expression::Literal(literal)) = &literals[0] else {
        panic!("expected a literal");
    };
    assert!(AstNode::Literal(literal.clone()).children().is_empty());
}
