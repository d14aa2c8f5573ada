//! `chanlint.toml` loading and discovery.
//!
//! A config file holds a `[settings]` table with the rule options, an
//! optional `severity` and a list of directory names to skip:
//!
//! ```toml
//! severity = "error"
//! exclude = ["generated", "third_party"]
//!
//! [settings]
//! check-unbuffered-channels = true
//! check-buffer-amount = 64
//! check-blocking-sends = true
//! ```

use std::path::{Path, PathBuf};

use chanlint_analyzer::{Settings, Severity};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// File names looked for, in order, in each directory during discovery.
pub const CONFIG_FILE_NAMES: &[&str] = &["chanlint.toml", ".chanlint.toml"];

/// Directory names never walked into, in addition to hidden directories.
pub const DEFAULT_EXCLUDES: &[&str] = &["vendor", "testdata"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub settings: Settings,
    pub severity: Severity,
    pub exclude: Vec<String>,
}

impl Config {
    /// Parses config file content. `path` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::InvalidExclude`] for an exclude entry that is not a
    /// plain directory name.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Reads and parses the config file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, otherwise the
    /// errors of [`Config::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Loads the nearest config file in `start` or any of its ancestors.
    ///
    /// # Errors
    ///
    /// Returns the error of [`Config::load`] for the file that was found.
    pub fn discover(start: &Path) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        let Some(path) = find_config_file(start) else {
            return Ok(None);
        };
        let config = Self::load(&path)?;
        Ok(Some((path, config)))
    }

    /// Whether directory `name` is skipped when walking for Go files.
    #[must_use]
    pub fn excludes_dir(&self, name: &str) -> bool {
        (name.starts_with('.') && name != "." && name != "..")
            || DEFAULT_EXCLUDES.contains(&name)
            || self.exclude.iter().any(|excluded| excluded == name)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(pattern) = self
            .exclude
            .iter()
            .find(|pattern| pattern.is_empty() || pattern.contains(['/', '\\']))
        {
            return Err(ConfigError::InvalidExclude {
                path: path.to_path_buf(),
                pattern: pattern.clone(),
            });
        }
        Ok(())
    }
}

/// Path of the nearest config file in `start` or any of its ancestors.
#[must_use]
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Config, ConfigError> {
        Config::from_toml_str(content, Path::new("chanlint.toml"))
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.settings.check_blocking_sends);
        assert_eq!(config.settings.buffer_limit(), None);
    }

    #[test]
    fn test_settings_table_in_kebab_case() {
        let config = parse(
            r#"
            severity = "error"
            exclude = ["generated"]

            [settings]
            check-unbuffered-channels = true
            check-buffer-amount = 64
            check-blocking-sends = false
            "#,
        )
        .unwrap();
        assert!(config.settings.check_unbuffered_channels);
        assert_eq!(config.settings.buffer_limit(), Some(64));
        assert!(!config.settings.check_blocking_sends);
        assert_eq!(config.severity, Severity::Error);
        assert_eq!(config.exclude, vec!["generated".to_string()]);
    }

    #[test]
    fn test_settings_accept_camel_case_aliases() {
        let config = parse(
            r"
            [settings]
            checkUnbufferedChannels = true
            checkBufferAmount = 5
            ",
        )
        .unwrap();
        assert!(config.settings.check_unbuffered_channels);
        assert_eq!(config.settings.check_buffer_amount, 5);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = parse("[settings]\ncheck-everything = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_negative_buffer_amount_is_rejected() {
        let err = parse("[settings]\ncheck-buffer-amount = -1\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_exclude_must_be_a_directory_name() {
        let err = parse("exclude = [\"a/b\"]\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidExclude { ref pattern, .. } if pattern == "a/b"
        ));
    }

    #[test]
    fn test_excludes_dir() {
        let config = parse("exclude = [\"generated\"]\n").unwrap();
        assert!(config.excludes_dir(".git"));
        assert!(config.excludes_dir("vendor"));
        assert!(config.excludes_dir("testdata"));
        assert!(config.excludes_dir("generated"));
        assert!(!config.excludes_dir("internal"));
        assert!(!config.excludes_dir("."));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/chanlint.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/chanlint.toml"));
    }

    #[test]
    fn test_discover_walks_up_to_nearest_file() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("pkg").join("worker");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            temp.path().join(".chanlint.toml"),
            "[settings]\ncheck-buffer-amount = 8\n",
        )
        .unwrap();

        let (path, config) = Config::discover(&nested).unwrap().unwrap();
        assert_eq!(path, temp.path().join(".chanlint.toml"));
        assert_eq!(config.settings.check_buffer_amount, 8);
    }

    #[test]
    fn test_discover_prefers_visible_file_name() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("chanlint.toml"), "").unwrap();
        std::fs::write(temp.path().join(".chanlint.toml"), "").unwrap();
        assert_eq!(
            find_config_file(temp.path()),
            Some(temp.path().join("chanlint.toml"))
        );
    }
}
