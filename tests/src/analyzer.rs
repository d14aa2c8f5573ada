//! Rule behaviour on complete Go programs.

use chanlint::Settings;
use chanlint_analyzer::{Rule, Severity};

use crate::utils::{all_rules, analyze, lines, rules};

const BLOCKING_SEND: &str =
    "channel send without default or timer - consider adding default or timeout case";

#[cfg(test)]
mod blocking_sends {
    use super::*;

    #[test]
    fn test_default_clause_guards_send() {
        let source = r#"package main

func producer(c chan int, sum int) {
	select {
	case c <- sum:
	default:
	}
}
"#;
        assert!(analyze(source, Settings::default()).is_empty());
    }

    #[test]
    fn test_send_outside_select() {
        let source = "package main\n\nfunc main() {\n\tc := make(chan int, 1)\n\tc <- 8\n}\n";
        let findings = analyze(source, Settings::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, format!("{BLOCKING_SEND} \"c <- 8\""));
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_method_send_reports_full_statement() {
        let source = r#"package main

type worker struct {
	out chan<- int
}

func (w *worker) run(v int) {
	w.out <- v * 2
}
"#;
        let findings = analyze(source, Settings::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].location.source, "w.out <- v * 2");
        assert_eq!((findings[0].location.start_line, findings[0].location.start_column), (8, 2));
    }

    #[test]
    fn test_sends_in_goroutines_and_loops() {
        let source = r#"package main

func fanOut(jobs []int) chan int {
	results := make(chan int, len(jobs))
	for _, job := range jobs {
		go func(j int) {
			results <- j * j
		}(job)
	}
	return results
}
"#;
        let findings = analyze(source, Settings::default());
        assert_eq!(rules(&findings), vec![Rule::BlockingSend]);
        assert_eq!(lines(&findings), vec![7]);
    }

    #[test]
    fn test_aliased_time_after_is_a_timeout() {
        let source = r#"package main

import t "time"

func publish(c chan string) {
	select {
	case c <- "ready":
	case <-t.After(t.Second):
	}
}
"#;
        assert!(analyze(source, Settings::default()).is_empty());
    }

    #[test]
    fn test_time_tick_receive_is_a_timeout() {
        let source = r#"package main

import (
	"time"
)

func heartbeat(c chan struct{}) {
	select {
	case c <- struct{}{}:
	case <-time.Tick(time.Second):
	}
}
"#;
        assert!(analyze(source, Settings::default()).is_empty());
    }

    #[test]
    fn test_assigned_timeout_receive_is_a_timeout() {
        let source = r#"package main

import "time"

func stamp(c chan int) time.Time {
	select {
	case c <- 1:
	case now := <-time.After(time.Minute):
		return now
	}
	return time.Now()
}
"#;
        assert!(analyze(source, Settings::default()).is_empty());
    }

    #[test]
    fn test_context_done_is_not_a_timeout() {
        let source = r#"package main

import "context"

func forward(ctx context.Context, c chan int, v int) error {
	select {
	case c <- v:
		return nil
	case <-ctx.Done():
		return ctx.Err()
	}
}
"#;
        let findings = analyze(source, Settings::default());
        assert_eq!(lines(&findings), vec![7]);
    }

    #[test]
    fn test_timer_field_is_not_a_timeout() {
        let source = r#"package main

import "time"

func wait(c chan int) {
	timer := time.NewTimer(time.Second)
	defer timer.Stop()
	select {
	case c <- 1:
	case <-timer.C:
	}
}
"#;
        assert_eq!(rules(&analyze(source, Settings::default())), vec![Rule::BlockingSend]);
    }

    #[test]
    fn test_guard_applies_to_the_send_not_to_its_text() {
        let source = r#"package main

func twice(c chan int) {
	select {
	case c <- 1:
	default:
	}
	select {
	case c <- 1:
	}
}
"#;
        let findings = analyze(source, Settings::default());
        assert_eq!(lines(&findings), vec![9]);
    }

    #[test]
    fn test_shadowed_time_package() {
        let source = r#"package main

import "time"

type clock struct{}

func (clock) After(int) chan int { return nil }

func tick(c chan int) {
	time := clock{}
	select {
	case c <- 1:
	case <-time.After(1):
	}
}
"#;
        assert_eq!(lines(&analyze(source, Settings::default())), vec![12]);
    }

    #[test]
    fn test_disabled_blocking_check() {
        let source = "package main\n\nfunc f(c chan int) {\n\tc <- 1\n\tselect {\n\tcase c <- 2:\n\t}\n}\n";
        let settings = Settings {
            check_blocking_sends: false,
            ..Settings::default()
        };
        assert!(analyze(source, settings).is_empty());
    }
}

#[cfg(test)]
mod channel_creation {
    use super::*;

    #[test]
    fn test_unbuffered_only_when_enabled() {
        let source = "package main\n\nfunc f() chan bool {\n\treturn make(chan bool)\n}\n";
        assert!(analyze(source, Settings::default()).is_empty());
        let findings = analyze(source, all_rules());
        assert_eq!(rules(&findings), vec![Rule::UnbufferedChannel]);
        assert_eq!(
            findings[0].message,
            "unbuffered channel creation detected - consider specifying buffer size \"make(chan bool)\""
        );
    }

    #[test]
    fn test_directional_and_qualified_element_types() {
        let source = r#"package main

import "time"

var ticks = make(<-chan time.Time)
var sink = make(chan<- *time.Timer, 0)
"#;
        assert_eq!(
            rules(&analyze(source, all_rules())),
            vec![Rule::UnbufferedChannel, Rule::ZeroBuffer]
        );
    }

    #[test]
    fn test_capacity_limits() {
        let source = r#"package main

func f() {
	a := make(chan int, 0)
	b := make(chan int, 100)
	c := make(chan int, 101)
	d := make(chan int, (1_000))
	_, _, _, _ = a, b, c, d
}
"#;
        let findings = analyze(source, all_rules());
        assert_eq!(
            rules(&findings),
            vec![Rule::ZeroBuffer, Rule::BufferLimit, Rule::BufferLimit]
        );
        assert_eq!(lines(&findings), vec![4, 6, 7]);
    }

    #[test]
    fn test_capacity_checks_need_a_limit() {
        let source = "package main\n\nvar c = make(chan int, 0)\nvar d = make(chan int, 1<<20)\n";
        assert!(analyze(source, Settings::default()).is_empty());
    }

    #[test]
    fn test_non_literal_capacities_are_skipped() {
        let source = r#"package main

const size = 1000

func f(n int) {
	a := make(chan int, size)
	b := make(chan int, n*2)
	c := make(chan int, len("abc"))
	_, _, _ = a, b, c
}
"#;
        assert!(analyze(source, all_rules()).is_empty());
    }

    #[test]
    fn test_user_defined_make_is_ignored() {
        let source = r#"package main

func make(v interface{}) chan int { return nil }

func f() {
	_ = make(chan int)
	_ = make(chan int, 0)
}
"#;
        assert!(analyze(source, all_rules()).is_empty());
    }

    #[test]
    fn test_other_make_calls_are_ignored() {
        let source = "package main\n\nfunc f() {\n\t_ = make([]int, 0)\n\t_ = make(map[string]int, 1000)\n}\n";
        assert!(analyze(source, all_rules()).is_empty());
    }
}

#[test]
fn test_runs_are_idempotent() {
    let source = r#"package main

func f(c chan int) {
	d := make(chan int)
	select {
	case c <- 1:
	case d <- 2:
	}
	c <- 3
}
"#;
    let first = analyze(source, all_rules());
    let second = analyze(source, all_rules());
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[test]
fn test_findings_serialize_without_source_text() {
    let source = "package main\n\nfunc f(c chan int) {\n\tc <- 1\n}\n";
    let findings = analyze(source, Settings::default());
    let value = serde_json::to_value(&findings[0]).unwrap();
    assert_eq!(value["rule"], "blocking-send");
    assert_eq!(value["severity"], "warning");
    assert_eq!(value["location"]["start_line"], 4);
    assert!(value["location"].get("source").is_none());
}
