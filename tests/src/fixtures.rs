use chanlint::Settings;
use chanlint_analyzer::Rule;

use crate::utils::{all_rules, lines, lint_fixture, rules};

#[test]
fn test_guarded_select_fixture() {
    let findings = lint_fixture("guarded_select.go", Settings::default());
    assert_eq!(findings.len(), 1);
    assert_eq!(
        findings[0].to_string(),
        "21:2: channel send without default or timer - consider adding default or timeout case \"c <- 8\""
    );

    let findings = lint_fixture("guarded_select.go", all_rules());
    assert_eq!(rules(&findings), vec![Rule::BlockingSend, Rule::UnbufferedChannel]);
    assert_eq!(
        (findings[1].location.start_line, findings[1].location.start_column),
        (28, 7)
    );
}

#[test]
fn test_exotic_clauses_fixture() {
    assert!(lint_fixture("exotic_clauses.go", Settings::default()).is_empty());
    let findings = lint_fixture("exotic_clauses.go", all_rules());
    assert_eq!(rules(&findings), vec![Rule::UnbufferedChannel]);
    assert_eq!(lines(&findings), vec![10]);
}

#[test]
fn test_time_after_fixture() {
    assert!(lint_fixture("time_after.go", Settings::default()).is_empty());
    let settings = Settings {
        check_buffer_amount: 50,
        ..Settings::default()
    };
    let findings = lint_fixture("time_after.go", settings);
    assert_eq!(rules(&findings), vec![Rule::BufferLimit]);
    assert_eq!(lines(&findings), vec![9]);
}

#[test]
fn test_timer_heuristics_fixture() {
    let findings = lint_fixture("timer_heuristics.go", all_rules());
    assert_eq!(rules(&findings), vec![Rule::BlockingSend; 4]);
    assert_eq!(lines(&findings), vec![24, 30, 35, 41]);
}

#[test]
fn test_capacities_fixture() {
    assert!(lint_fixture("capacities.go", Settings::default()).is_empty());
    let findings = lint_fixture("capacities.go", all_rules());
    assert_eq!(
        rules(&findings),
        vec![Rule::UnbufferedChannel, Rule::ZeroBuffer, Rule::BufferLimit]
    );
    assert_eq!(lines(&findings), vec![6, 7, 9]);
    assert!(findings[2].message.ends_with("\"make(chan struct{}, 0x400)\""));
}

#[test]
fn test_nolint_fixture() {
    let findings = lint_fixture("nolint.go", Settings::default());
    assert_eq!(lines(&findings), vec![5, 7]);
}
