//! Cycle configuration.

use chrono::Duration;
use serde::Deserialize;
use std::path::Path;

use crate::validity::DEFAULT_STALE_AFTER_MINUTES;

/// Configuration of the check cycle for one repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckConfig {
    /// Name the check result is recorded under on the forge.
    #[serde(default = "default_check_name")]
    pub check_name: String,

    /// Minutes a running check may go without completing before it is
    /// presumed crashed and rerun.
    #[serde(default = "default_stale_after_minutes")]
    pub stale_after_minutes: i64,

    /// Disregard approvals cast against superseded revisions during
    /// execution.
    #[serde(default)]
    pub ignore_stale_reviews: bool,
}

fn default_check_name() -> String {
    "revet".to_string()
}

fn default_stale_after_minutes() -> i64 {
    DEFAULT_STALE_AFTER_MINUTES
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            check_name: default_check_name(),
            stale_after_minutes: default_stale_after_minutes(),
            ignore_stale_reviews: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config toml at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl CheckConfig {
    pub fn stale_after(&self) -> Duration {
        Duration::minutes(self.stale_after_minutes)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = CheckConfig::from_toml_str("").expect("empty config should parse");
        assert_eq!(config, CheckConfig::default());
        assert_eq!(config.check_name, "revet");
        assert_eq!(config.stale_after(), Duration::minutes(10));
        assert!(!config.ignore_stale_reviews);
    }

    #[test]
    fn fields_override_defaults() {
        let config = CheckConfig::from_toml_str(
            "check_name = \"jcheck\"\nstale_after_minutes = 20\nignore_stale_reviews = true\n",
        )
        .expect("config should parse");
        assert_eq!(config.check_name, "jcheck");
        assert_eq!(config.stale_after(), Duration::minutes(20));
        assert!(config.ignore_stale_reviews);
    }
}
