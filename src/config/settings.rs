//! User settings for the allowance tracker
//!
//! Display preferences, category strictness and backup retention.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::paths::TrackerPaths;
use crate::error::{TrackerError, TrackerResult};
use crate::storage::{read_json_opt, write_json_atomic};

/// Backup retention settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRetention {
    /// Number of daily backups to keep
    pub daily_count: u32,
    /// Number of monthly backups to keep
    pub monthly_count: u32,
}

impl Default for BackupRetention {
    fn default() -> Self {
        Self {
            daily_count: 30,
            monthly_count: 12,
        }
    }
}

/// User settings, persisted as `config.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Reject expense categories outside the known set
    #[serde(default)]
    pub strict_categories: bool,

    /// Backup retention policy
    #[serde(default)]
    pub backup_retention: BackupRetention,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            strict_categories: false,
            backup_retention: BackupRetention::default(),
        }
    }
}

impl Settings {
    /// Settings from `config.json`, or the defaults when it does not exist
    ///
    /// Nothing is written here; `init` decides when to persist.
    pub fn load(paths: &TrackerPaths) -> TrackerResult<Self> {
        read_json_opt(paths.settings_file())
            .map(Option::unwrap_or_default)
            .map_err(|e| TrackerError::Config(e.to_string()))
    }

    /// Like [`Settings::load`], but an unreadable file yields the defaults
    /// with a warning so every command keeps working
    pub fn load_or_default(paths: &TrackerPaths) -> Self {
        Self::load(paths).unwrap_or_else(|e| {
            warn!(
                path = %paths.settings_file().display(),
                error = %e,
                "ignoring unreadable settings, using defaults"
            );
            Self::default()
        })
    }

    pub fn save(&self, paths: &TrackerPaths) -> TrackerResult<()> {
        write_json_atomic(paths.settings_file(), self)
    }
}
