//! Configuration loading and typed config structures for the reset history.
//!
//! The canonical configuration lives in `resetlog-config.yaml`. This module
//! defines strongly-typed structs that mirror the YAML structure, and
//! provides a loader that reads and validates the file.

use std::path::Path;

use serde::Deserialize;

/// Environment variable overriding `history.count_max`.
pub const COUNT_MAX_ENV: &str = "RESETLOG_HISTORY_COUNT_MAX";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but holds an unusable value.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `resetlog-config.yaml`. Every field has a
/// default, so an empty document is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HistoryConfig {
    /// History log and display settings.
    #[serde(default)]
    pub history: HistorySettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HistoryConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `RESETLOG_HISTORY_COUNT_MAX` overrides `history.count_max` when set
    /// to a valid integer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse_with_env(yaml, |key| std::env::var(key).ok())
    }

    /// Parse configuration, resolving overrides through `lookup` instead of
    /// the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`HistoryConfig::parse`].
    pub fn parse_with_env<F>(yaml: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.history.apply_env_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `history.count_max` is 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.count_max == 0 {
            return Err(ConfigError::Invalid {
                reason: "history.count_max must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

/// History log and display settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistorySettings {
    /// Maximum entries kept (and rows shown) per category.
    #[serde(default = "default_count_max")]
    pub count_max: usize,

    /// Whether cube gains start out shown as per-second rates.
    #[serde(default)]
    pub show_per_second: bool,

    /// Durations shorter than this many seconds show milliseconds.
    #[serde(default = "default_ms_max_seconds")]
    pub ms_max_seconds: u32,
}

impl HistorySettings {
    /// Apply environment variable overrides.
    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(count_max) = lookup(COUNT_MAX_ENV).and_then(|v| v.trim().parse().ok())
        {
            self.count_max = count_max;
        }
    }
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            count_max: default_count_max(),
            show_per_second: false,
            ms_max_seconds: default_ms_max_seconds(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------

const fn default_count_max() -> usize {
    20
}

const fn default_ms_max_seconds() -> u32 {
    60
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = HistoryConfig::default();
        assert_eq!(config.history.count_max, 20);
        assert!(!config.history.show_per_second);
        assert_eq!(config.history.ms_max_seconds, 60);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
history:
  count_max: 5
  show_per_second: true
  ms_max_seconds: 10

logging:
  level: "debug"
"#;

        let config = HistoryConfig::parse_with_env(yaml, |_| None);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.history.count_max, 5);
        assert!(config.history.show_per_second);
        assert_eq!(config.history.ms_max_seconds, 10);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "history:\n  show_per_second: true\n";
        let config = HistoryConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert!(config.history.show_per_second);
        // Everything else uses defaults
        assert_eq!(config.history.ms_max_seconds, 60);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_empty_yaml() {
        let config = HistoryConfig::parse("");
        assert!(config.is_ok());
    }

    #[test]
    fn env_overrides_count_max() {
        let env = |key: &str| (key == COUNT_MAX_ENV).then(|| " 7 ".to_owned());
        let config = HistoryConfig::parse_with_env("history:\n  count_max: 5\n", env);
        assert_eq!(config.ok().map(|c| c.history.count_max), Some(7));
    }

    #[test]
    fn unparsable_env_override_is_ignored() {
        let env = |_: &str| Some("lots".to_owned());
        let config = HistoryConfig::parse_with_env("history:\n  count_max: 5\n", env);
        assert_eq!(config.ok().map(|c| c.history.count_max), Some(5));
    }

    #[test]
    fn zero_env_override_is_rejected() {
        let env = |_: &str| Some("0".to_owned());
        assert!(matches!(
            HistoryConfig::parse_with_env("", env),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn zero_cap_is_rejected() {
        let mut config = HistoryConfig::default();
        config.history.count_max = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let config = HistoryConfig::parse("history: [not, a, map]");
        assert!(matches!(config, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("resetlog-config.yaml");
        if path.exists() {
            let config = HistoryConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
