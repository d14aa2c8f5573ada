//! Command line argument parsing for the `chanlint` binary.
//!
//! Flags override the values read from `chanlint.toml`, which in turn
//! override the built-in defaults.

use std::path::PathBuf;

use chanlint::config::Config;
use clap::{Parser, ValueEnum};

/// Command line interface definition for the channel linter.
///
/// ## Examples
///
/// Lint the current module with the default rules:
/// ```bash
/// chanlint
/// ```
///
/// Also report unbuffered channels and capacities above 64:
/// ```bash
/// chanlint ./... --unbuffered --buffer-max 64
/// ```
///
/// Only the capacity rules, as JSON:
/// ```bash
/// chanlint cmd internal --blocking false --buffer-max 128 --format json
/// ```
#[derive(Parser, Debug)]
#[command(
    name = "chanlint",
    author,
    version,
    about = "Reports Go channel sends that may block forever and questionable channel buffers",
    long_about = "chanlint walks the given files and directories for .go files and reports: \
sends that are not inside a select with a default or timeout case, unbuffered make(chan T) calls \
(with --unbuffered) and literal capacities of zero or above --buffer-max. \
Exits with 0 when nothing is found, 3 when findings were reported and 1 on errors."
)]
pub(crate) struct Cli {
    /// Files or directories to lint. A trailing `/...` is accepted and
    /// ignored, since directories are always walked recursively.
    #[arg(default_value = ".")]
    pub(crate) paths: Vec<PathBuf>,

    /// Report `make(chan T)` calls without a capacity.
    #[clap(long = "unbuffered", action = clap::ArgAction::SetTrue)]
    pub(crate) unbuffered: bool,

    /// Report sends that may block forever.
    #[clap(long = "blocking", value_name = "BOOL", action = clap::ArgAction::Set)]
    pub(crate) blocking: Option<bool>,

    /// Largest accepted literal channel capacity. Capacities of zero and above
    /// this value are reported; `0` turns both checks off.
    #[clap(long = "buffer-max", value_name = "N")]
    pub(crate) buffer_max: Option<u64>,

    /// Config file to use instead of the nearest `chanlint.toml`.
    #[clap(long = "config", value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Ignore config files and use only the defaults and flags.
    #[clap(long = "no-config", action = clap::ArgAction::SetTrue, conflicts_with = "config")]
    pub(crate) no_config: bool,

    #[clap(long = "format", value_enum, default_value_t = Format::Text)]
    pub(crate) format: Format,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG`
    /// takes precedence when set.
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// `path:line:column: message`, one finding per line.
    Text,
    /// A JSON array of finding objects.
    Json,
}

impl Cli {
    /// Applies the flags that were given on top of `config`.
    pub(crate) fn apply_overrides(&self, config: &mut Config) {
        if self.unbuffered {
            config.settings.check_unbuffered_channels = true;
        }
        if let Some(blocking) = self.blocking {
            config.settings.check_blocking_sends = blocking;
        }
        if let Some(buffer_max) = self.buffer_max {
            config.settings.check_buffer_amount = buffer_max;
        }
    }

    /// Roots to walk, with Go's `/...` package pattern suffix removed.
    pub(crate) fn roots(&self) -> Vec<PathBuf> {
        self.paths
            .iter()
            .map(|path| match path.to_str().and_then(|p| p.strip_suffix("...")) {
                Some("" | "/" | "./") => PathBuf::from("."),
                Some(prefix) => PathBuf::from(prefix.trim_end_matches('/')),
                None => path.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["chanlint"]).unwrap();
        assert_eq!(cli.paths, vec![PathBuf::from(".")]);
        assert_eq!(cli.format, Format::Text);
        assert_eq!(cli.verbose, 0);

        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "chanlint",
            "--unbuffered",
            "--blocking",
            "false",
            "--buffer-max",
            "64",
            "-vv",
        ])
        .unwrap();
        let mut config = Config::default();
        config.settings.check_buffer_amount = 8;
        cli.apply_overrides(&mut config);
        assert!(config.settings.check_unbuffered_channels);
        assert!(!config.settings.check_blocking_sends);
        assert_eq!(config.settings.check_buffer_amount, 64);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_absent_flags_keep_config_values() {
        let cli = Cli::try_parse_from(["chanlint", "pkg"]).unwrap();
        let mut config = Config::default();
        config.settings.check_blocking_sends = false;
        config.settings.check_buffer_amount = 8;
        cli.apply_overrides(&mut config);
        assert!(!config.settings.check_blocking_sends);
        assert_eq!(config.settings.check_buffer_amount, 8);
    }

    #[test]
    fn test_package_patterns_become_directories() {
        let cli = Cli::try_parse_from(["chanlint", "./...", "internal/...", "cmd", "main.go"]).unwrap();
        assert_eq!(
            cli.roots(),
            vec![
                PathBuf::from("."),
                PathBuf::from("internal"),
                PathBuf::from("cmd"),
                PathBuf::from("main.go"),
            ]
        );
    }

    #[test]
    fn test_config_conflicts_with_no_config() {
        assert!(Cli::try_parse_from(["chanlint", "--config", "a.toml", "--no-config"]).is_err());
    }

    #[test]
    fn test_blocking_requires_a_boolean() {
        assert!(Cli::try_parse_from(["chanlint", "--blocking", "maybe"]).is_err());
    }
}
