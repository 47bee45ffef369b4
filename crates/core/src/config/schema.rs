//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Check values that deserialize fine but make no sense
    pub fn validate(&self) -> Result<()> {
        if self.search.result_limit == 0 {
            return Err(Error::config_validation("search.result_limit must be at least 1")
                .with_suggestion("Remove the setting to use the default of 20"));
        }

        if let Some(user) = self.search.known_users.iter().find(|u| u.trim().is_empty()) {
            return Err(Error::config_validation(format!(
                "search.known_users contains a blank entry: {:?}",
                user
            )));
        }

        Ok(())
    }
}

/// Search behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// User identifiers accepted by `by:` and `from:`
    #[serde(default)]
    pub known_users: Vec<String>,

    /// Maximum results shown
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,

    /// Fuzzy scores at or below this are dropped
    #[serde(default)]
    pub fuzzy_threshold: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            known_users: Vec::new(),
            result_limit: default_result_limit(),
            fuzzy_threshold: 0,
        }
    }
}

fn default_result_limit() -> usize {
    20
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Include the event target in log lines
    #[serde(default)]
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            show_target: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
