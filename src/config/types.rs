//! Configuration types and defaults for kolmsg.
//!
//! This module defines the nested config sections and the default value
//! functions used by serde.

use serde::{Deserialize, Serialize};

/// Settings for the fan-offer polish call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolishConfig {
    /// Model name passed to the generateContent endpoint.
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Minimum number of characters the offer text must have to be polished.
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

impl Default for PolishConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            min_chars: default_min_chars(),
        }
    }
}

// Default value functions for serde
pub(crate) fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}
pub(crate) fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
pub(crate) fn default_api_key_env() -> String {
    "API_KEY".to_string()
}
pub(crate) fn default_timeout_secs() -> u64 {
    30
}
pub(crate) fn default_min_chars() -> usize {
    5
}
