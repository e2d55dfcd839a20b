//! Google Gemini generateContent client.

use super::{PolishClient, PolishError};
use crate::config::PolishConfig;
use reqwest::blocking::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

/// Blocking Gemini client. One request per call, no retries.
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
    client: Client,
}

impl GeminiClient {
    /// Build a client from config, reading the API key from the configured
    /// environment variable.
    pub fn from_config(config: &PolishConfig) -> Result<Self, PolishError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| PolishError::MissingApiKey(config.api_key_env.clone()))?;

        Self::new(api_key, config)
    }

    /// Build a client with an explicit API key.
    pub fn new(api_key: String, config: &PolishConfig) -> Result<Self, PolishError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PolishError::ApiCallFailed(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

/// Extract `candidates[0].content.parts[0].text` from a response body.
pub(crate) fn extract_text(body: &Value) -> Result<String, PolishError> {
    body["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| PolishError::InvalidResponse("no content in response".to_string()))
}

impl PolishClient for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, PolishError> {
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}]
            }]
        });

        debug!(model = %self.model, "calling Gemini generateContent");

        let resp = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .map_err(|e| PolishError::ApiCallFailed(format!("Gemini API call failed: {}", e)))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| PolishError::ApiCallFailed(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(PolishError::ApiCallFailed(format!(
                "Gemini API error ({}): {}",
                status, text
            )));
        }

        let parsed: Value = serde_json::from_str(&text)
            .map_err(|e| PolishError::InvalidResponse(format!("failed to parse response: {}", e)))?;

        extract_text(&parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_extract_text() {
        let body = json!({
            "candidates": [{
                "content": {"parts": [{"text": "潤飾後的文字"}]},
                "finishReason": "STOP"
            }]
        });
        assert_eq!(extract_text(&body).unwrap(), "潤飾後的文字");
    }

    #[test]
    fn test_extract_text_missing_content() {
        let body = json!({"candidates": []});
        assert!(matches!(
            extract_text(&body),
            Err(PolishError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_endpoint_format() {
        let config = PolishConfig {
            base_url: "http://localhost:8080/v1beta/".to_string(),
            ..PolishConfig::default()
        };
        let client = GeminiClient::new("secret".to_string(), &config).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent?key=secret"
        );
    }

    #[test]
    #[serial]
    fn test_from_config_requires_api_key() {
        let config = PolishConfig {
            api_key_env: "KOLMSG_TEST_MISSING_KEY".to_string(),
            ..PolishConfig::default()
        };
        // SAFETY: serialized with other environment-touching tests.
        unsafe { std::env::remove_var("KOLMSG_TEST_MISSING_KEY") };

        assert!(matches!(
            GeminiClient::from_config(&config),
            Err(PolishError::MissingApiKey(name)) if name == "KOLMSG_TEST_MISSING_KEY"
        ));
    }

    #[test]
    fn test_unreachable_server_is_api_error() {
        let config = PolishConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..PolishConfig::default()
        };
        let client = GeminiClient::new("key".to_string(), &config).unwrap();

        assert!(matches!(
            client.generate("hello"),
            Err(PolishError::ApiCallFailed(_))
        ));
    }
}
