#![warn(clippy::pedantic)]

//! Command line host for the chanlint Go channel linter.
//!
//! ```text
//! paths → collect .go files → lint in parallel → render → exit code
//! ```
//!
//! Exit codes: `0` when nothing was found, `3` when findings were reported and
//! `1` for usage, configuration or IO errors. A file that cannot be read or
//! parsed is reported on stderr; the other files are still linted.

mod output;
mod parser;

use std::{
    io::{self, Write},
    process,
};

use chanlint::{
    config::Config,
    runner::{FileReport, collect_go_files, lint_files},
};
use clap::Parser;
use parser::{Cli, Format};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const EXIT_FINDINGS: i32 = 3;
const EXIT_FAILURE: i32 = 1;

/// Entry point for the CLI executable.
///
/// On any failure, including invalid flags, a diagnostic is printed to stderr
/// and the process exits with code `1`.
fn main() {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // `--help` and `--version` also arrive here, on stdout.
            let _ = e.print();
            process::exit(if e.use_stderr() { EXIT_FAILURE } else { 0 });
        }
    };
    init_tracing(args.verbose);
    match run(&args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(EXIT_FAILURE);
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_config(args: &Cli) -> anyhow::Result<Config> {
    let mut config = if args.no_config {
        Config::default()
    } else if let Some(path) = &args.config {
        Config::load(path)?
    } else {
        let cwd = std::env::current_dir()?;
        match Config::discover(&cwd)? {
            Some((path, config)) => {
                info!(path = %path.display(), "using config file");
                config
            }
            None => Config::default(),
        }
    };
    args.apply_overrides(&mut config);
    debug!(?config, "effective configuration");
    Ok(config)
}

fn run(args: &Cli) -> anyhow::Result<i32> {
    let config = load_config(args)?;
    let files = collect_go_files(&args.roots(), &config)?;

    let mut reports: Vec<FileReport> = Vec::with_capacity(files.len());
    let mut failed = false;
    for result in lint_files(&files, &config) {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("Error: {:#}", anyhow::Error::from(e));
                failed = true;
            }
        }
    }

    let mut stdout = io::stdout().lock();
    match args.format {
        Format::Text => output::render_text(&reports, &mut stdout)?,
        Format::Json => output::render_json(&reports, &mut stdout)?,
    }
    stdout.flush()?;

    let findings: usize = reports.iter().map(|report| report.findings.len()).sum();
    let suppressed: usize = reports.iter().map(|report| report.suppressed).sum();
    info!(files = files.len(), findings, suppressed, "lint finished");

    Ok(if failed {
        EXIT_FAILURE
    } else if findings > 0 {
        EXIT_FINDINGS
    } else {
        0
    })
}
