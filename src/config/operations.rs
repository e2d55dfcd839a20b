//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{KolmsgError, Result};
use crate::format::MAX_FRACTION_DIGITS_LIMIT;
use std::path::Path;
use tracing::debug;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(KolmsgError::ConfigError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            KolmsgError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from a YAML file, using defaults when the file does not exist.
    ///
    /// A file that exists but is invalid is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading config");
        Self::load(path)
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| {
                KolmsgError::ConfigError(format!("failed to parse config YAML: {}", e))
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            KolmsgError::ConfigError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `format.percent_suffix` must be non-empty
    /// - `format.grouping_separator` must not be a digit or `.`
    /// - `format.max_fraction_digits` must be at most [`MAX_FRACTION_DIGITS_LIMIT`]
    /// - `polish.timeout_secs` must be positive
    /// - `polish.api_key_env` and `polish.model` must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.format.percent_suffix.is_empty() {
            return Err(KolmsgError::ConfigError(
                "format.percent_suffix must not be empty".to_string(),
            ));
        }

        let sep = self.format.grouping_separator;
        if sep.is_ascii_digit() || sep == '.' {
            return Err(KolmsgError::ConfigError(format!(
                "format.grouping_separator must not be a digit or '.' (found '{}')",
                sep
            )));
        }

        if self.format.max_fraction_digits > MAX_FRACTION_DIGITS_LIMIT {
            return Err(KolmsgError::ConfigError(format!(
                "format.max_fraction_digits must be at most {} (found {})",
                MAX_FRACTION_DIGITS_LIMIT, self.format.max_fraction_digits
            )));
        }

        if self.polish.timeout_secs == 0 {
            return Err(KolmsgError::ConfigError(
                "polish.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.polish.api_key_env.trim().is_empty() {
            return Err(KolmsgError::ConfigError(
                "polish.api_key_env must not be empty".to_string(),
            ));
        }

        if self.polish.model.trim().is_empty() {
            return Err(KolmsgError::ConfigError(
                "polish.model must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
