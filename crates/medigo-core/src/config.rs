//! Runtime configuration loaded from TOML.
//!
//! ```toml
//! [catalog]
//! seed = 42
//! pharmacy_count = 150
//!
//! [location]
//! lat = 4.0511
//! lng = 9.7679
//!
//! [ai]
//! enabled = true
//! api_key_env = "GEMINI_API_KEY"
//! model = "gemini-2.5-flash"
//! timeout_secs = 15
//! ```
//!
//! Every section is optional; missing keys take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Coordinates;

pub const DEFAULT_PHARMACY_COUNT: usize = 150;
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config: {0}")]
    Parse(String),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MediGoConfig {
    pub catalog: CatalogConfig,
    pub location: Option<LocationConfig>,
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Generator seed; `None` draws from OS entropy
    pub seed: Option<u64>,
    pub pharmacy_count: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed: None,
            pharmacy_count: DEFAULT_PHARMACY_COUNT,
        }
    }
}

/// Caller position used when none is given on the command line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LocationConfig {
    pub lat: f64,
    pub lng: f64,
}

impl From<LocationConfig> for Coordinates {
    fn from(l: LocationConfig) -> Self {
        Coordinates::new(l.lat, l.lng)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AiConfig {
    pub enabled: bool,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AiConfig {
    /// The API key from the configured environment variable, if set and non-empty.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env).ok().filter(|k| !k.trim().is_empty())
    }
}

impl MediGoConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: MediGoConfig = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load from `path` when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn default_location(&self) -> Option<Coordinates> {
        self.location.map(Coordinates::from)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.ai.timeout_secs == 0 {
            return Err(ConfigError::Invalid("ai.timeout_secs must be at least 1".into()));
        }
        if let Some(loc) = &self.location {
            if !(-90.0..=90.0).contains(&loc.lat) || !(-180.0..=180.0).contains(&loc.lng) {
                return Err(ConfigError::Invalid(format!(
                    "location ({}, {}) is outside valid coordinates",
                    loc.lat, loc.lng
                )));
            }
        }
        Ok(())
    }
}
