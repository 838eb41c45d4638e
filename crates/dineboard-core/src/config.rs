//! Report configuration
//!
//! Loaded from `dineboard.toml`; every key is optional and falls back to the
//! defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::analytics::{WeekStart, DEFAULT_DAYS, DEFAULT_TOP_FOODS, MAX_DAILY_DAYS};
use crate::error::CoreError;

/// Default file name looked up in the data directory
pub const CONFIG_FILE_NAME: &str = "dineboard.toml";

/// Knobs for report computation and data loading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Entries in the top foods list
    pub top_foods_limit: usize,

    /// Cap on category rows, all categories with sales when unset
    pub category_limit: Option<usize>,

    /// Length of the daily revenue series
    pub daily_days: usize,

    /// First day of the week for this/last week buckets
    pub week_start: WeekStart,

    /// Per-collection fetch timeout
    pub fetch_timeout_ms: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_foods_limit: DEFAULT_TOP_FOODS,
            category_limit: None,
            daily_days: DEFAULT_DAYS,
            week_start: WeekStart::Sunday,
            fetch_timeout_ms: 5_000,
        }
    }
}

impl ReportConfig {
    /// Load from a TOML file
    ///
    /// A missing file yields defaults; unreadable or invalid content is an
    /// error.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(CoreError::FileRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Self = toml::from_str(&content).map_err(|e| CoreError::InvalidConfig {
            message: format!("{}: {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.daily_days == 0 {
            return Err(CoreError::InvalidConfig {
                message: "daily_days must be at least 1".to_string(),
            });
        }
        if self.daily_days > MAX_DAILY_DAYS {
            return Err(CoreError::InvalidConfig {
                message: format!(
                    "daily_days must be at most {}, got {}",
                    MAX_DAILY_DAYS, self.daily_days
                ),
            });
        }
        if self.top_foods_limit == 0 {
            return Err(CoreError::InvalidConfig {
                message: "top_foods_limit must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}
