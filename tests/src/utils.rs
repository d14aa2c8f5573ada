use chanlint::{Settings, config::Config};
use chanlint_analyzer::{Diagnostics, Engine, Finding, Rule};
use chanlint_ast::{arena::Arena, builder::parse_source};
use chanlint_type_checker::{TypeCheckerBuilder, typed_context::TypedContext};

pub(crate) fn get_test_data_path() -> std::path::PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::env::current_dir().unwrap());
    manifest_dir.join("test_data").join("go")
}

pub(crate) fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(get_test_data_path().join(name)).unwrap()
}

pub(crate) fn build_ast(source_code: &str) -> Arena {
    parse_source(source_code).unwrap()
}

pub(crate) fn typed_context(source_code: &str) -> TypedContext {
    TypeCheckerBuilder::build_typed_context(build_ast(source_code))
        .unwrap()
        .typed_context()
}

/// Runs the engine alone, without `//nolint` handling.
pub(crate) fn analyze(source_code: &str, settings: Settings) -> Vec<Finding> {
    let ctx = typed_context(source_code);
    let mut diagnostics = Diagnostics::default();
    Engine::new(settings).analyze(&ctx, &mut diagnostics);
    diagnostics.into_findings()
}

/// Lints a fixture the way the command line does.
pub(crate) fn lint_fixture(name: &str, settings: Settings) -> Vec<Finding> {
    let config = Config {
        settings,
        ..Config::default()
    };
    chanlint::lint_source(&read_fixture(name), &config).unwrap()
}

pub(crate) fn all_rules() -> Settings {
    Settings {
        check_unbuffered_channels: true,
        check_buffer_amount: 100,
        check_blocking_sends: true,
    }
}

pub(crate) fn rules(findings: &[Finding]) -> Vec<Rule> {
    findings.iter().map(|finding| finding.rule).collect()
}

pub(crate) fn lines(findings: &[Finding]) -> Vec<u32> {
    findings
        .iter()
        .map(|finding| finding.location.start_line)
        .collect()
}
