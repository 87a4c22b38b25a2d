//! Client configuration.
//!
//! Defaults match the deployed site. A page (or a developer from the console)
//! can override them by writing JSON under the `cardlens-config` localStorage key.

use serde::{Deserialize, Serialize};

use crate::constants::{self, endpoint, progress};
use crate::locale::Locale;

/// Log level setting for the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to log crate's Level.
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Current configuration format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Backend endpoint paths, relative to the page origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub match_all: String,
    pub match_one: String,
    pub get_price: String,
    pub match_choice: String,
    pub upload_choice: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            match_all: endpoint::MATCH_ALL.to_string(),
            match_one: endpoint::MATCH_ONE.to_string(),
            get_price: endpoint::GET_PRICE.to_string(),
            match_choice: endpoint::MATCH_CHOICE.to_string(),
            upload_choice: endpoint::UPLOAD_CHOICE.to_string(),
        }
    }
}

/// Timing of the decorative progress bar shown after a file is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressTiming {
    /// Milliseconds between increments
    pub tick_ms: u32,
    /// Percent added per increment
    pub step_percent: u8,
    /// Milliseconds the full bar stays before fading
    pub hold_ms: u32,
    /// Milliseconds of the fade-out
    pub fade_ms: u32,
}

impl Default for ProgressTiming {
    fn default() -> Self {
        Self {
            tick_ms: progress::TICK_MS,
            step_percent: progress::STEP_PERCENT,
            hold_ms: progress::HOLD_MS,
            fade_ms: progress::FADE_MS,
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Version of the configuration format
    pub version: u32,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Language of alerts and modal copy
    #[serde(default)]
    pub locale: Locale,

    /// Session storage key of the pending image
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default)]
    pub endpoints: Endpoints,

    /// Lowercase extensions accepted at confirmation time
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,

    #[serde(default)]
    pub progress: ProgressTiming,

    /// Scroll offset after which the scroll-to-top button shows
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: f64,
}

fn default_storage_key() -> String {
    constants::STORED_IMAGE_KEY.to_string()
}

fn default_allowed_extensions() -> Vec<String> {
    constants::ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_scroll_threshold() -> f64 {
    constants::SCROLL_TOP_THRESHOLD
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            log_level: LogLevel::default(),
            locale: Locale::default(),
            storage_key: default_storage_key(),
            endpoints: Endpoints::default(),
            allowed_extensions: default_allowed_extensions(),
            progress: ProgressTiming::default(),
            scroll_threshold: default_scroll_threshold(),
        }
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        for ext in &mut config.allowed_extensions {
            *ext = ext.trim_start_matches('.').to_lowercase();
        }
        if config.progress.step_percent == 0 {
            return Err(ConfigError::Invalid(
                "progress.step_percent must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }

    /// Load from localStorage, falling back to defaults.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::load_from_local_storage().unwrap_or_default()
    }

    /// Try to load configuration from localStorage (WASM only).
    /// Returns None if not found or can't be parsed.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Option<Self> {
        let window = web_sys::window()?;
        let storage = window.local_storage().ok()??;

        match storage.get_item(constants::CONFIG_STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from localStorage");
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config from localStorage: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Failed to read from localStorage: {:?}", e);
                None
            }
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// A field holds a value the client cannot use
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trip() {
        let config = ClientConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed = ClientConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_minimal_json_fills_defaults() {
        let config = ClientConfig::from_json(r#"{"version": 1, "locale": "en"}"#).unwrap();
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.storage_key, "uploadedImage");
        assert_eq!(config.endpoints.match_all, "/match_all");
        assert_eq!(config.progress.tick_ms, 100);
        assert_eq!(config.allowed_extensions.len(), 5);
    }

    #[test]
    fn test_partial_endpoints() {
        let config = ClientConfig::from_json(
            r#"{"version": 1, "endpoints": {"match_all": "/api/match_all"}}"#,
        )
        .unwrap();
        assert_eq!(config.endpoints.match_all, "/api/match_all");
        assert_eq!(config.endpoints.upload_choice, "/upload_choice_image");
    }

    #[test]
    fn test_extensions_normalized() {
        let config =
            ClientConfig::from_json(r#"{"version": 1, "allowed_extensions": [".PNG", "Heic"]}"#)
                .unwrap();
        assert_eq!(config.allowed_extensions, vec!["png", "heic"]);
    }

    #[test]
    fn test_version_too_new() {
        let err = ClientConfig::from_json(r#"{"version": 99}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VersionTooNew {
                file_version: 99,
                supported_version: CONFIG_VERSION
            }
        ));
    }

    #[test]
    fn test_zero_step_rejected() {
        let err =
            ClientConfig::from_json(r#"{"version": 1, "progress": {"step_percent": 0}}"#)
                .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ClientConfig::from_json("not json"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Debug.to_level(), log::Level::Debug);
        assert_eq!(LogLevel::default().name(), "Info");
    }
}
