use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::version::error::ConfigError;
use crate::version::metadata::MetadataQuery;

// =============================================================================
// Store-related constants
// =============================================================================

/// Base URL of the App Store lookup API
pub const DEFAULT_STORE_BASE_URL: &str = "https://itunes.apple.com";

/// Storefront used when no country is configured
pub const DEFAULT_COUNTRY: &str = "US";

/// Locale used when none is configured
pub const DEFAULT_LOCALE: &str = "en";

/// Timeout for fetch operations in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Update checker configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckerConfig {
    /// Numeric store identifier; takes precedence over `bundle_id`
    pub app_id: Option<String>,
    /// Bundle identifier used when no `app_id` is set
    pub bundle_id: Option<String>,
    /// Version of the running app
    pub installed_version: String,
    /// URL of a `{ "version", "optional" }` document; empty means not configured
    pub requirement_url: String,
    /// Storefront country code
    pub country: String,
    /// Locale for bundled strings
    pub locale: String,
    /// Overrides the localized update prompt title when non-empty
    pub alert_title: String,
    /// Overrides the localized update prompt body when non-empty
    pub alert_body: String,
    pub store_base_url: String,
    pub fetch_timeout_ms: u64,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            bundle_id: None,
            installed_version: String::new(),
            requirement_url: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            alert_title: String::new(),
            alert_body: String::new(),
            store_base_url: DEFAULT_STORE_BASE_URL.to_string(),
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
        }
    }
}

impl CheckerConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Store lookup derived from the configured identifiers
    pub fn metadata_query(&self) -> Result<MetadataQuery, ConfigError> {
        MetadataQuery::select(self.app_id.as_deref(), self.bundle_id.as_deref())
            .ok_or(ConfigError::MissingIdentifier)
    }

    /// Parsed requirement URL, `None` when no requirement source is configured
    pub fn requirement_url(&self) -> Result<Option<Url>, ConfigError> {
        let raw = self.requirement_url.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        Url::parse(raw)
            .map(Some)
            .map_err(|e| ConfigError::InvalidRequirementUrl {
                url: raw.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

/// Returns the path to the data directory for app-version-checker.
/// Uses $XDG_DATA_HOME/app-version-checker if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/app-version-checker,
/// or ./app-version-checker if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the flag database file.
pub fn db_path() -> PathBuf {
    data_dir().join("flags.db")
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("app-version-checker.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("app-version-checker")
}
