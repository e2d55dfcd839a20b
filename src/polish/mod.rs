//! Fan-offer polishing through an external language model.
//!
//! This is a convenience around the form, not part of rendering: the
//! renderer never calls it. A polish attempt never fails from the caller's
//! point of view. Any client error is logged and replaced by
//! [`fallback_text`].

mod gemini;

pub use gemini::GeminiClient;

use crate::error::{KolmsgError, Result};
use crate::record::NONE_SENTINEL;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from a polish client. These never leave this module's callers.
#[derive(Debug, Error)]
pub enum PolishError {
    /// The API key environment variable is not set.
    #[error("API key environment variable '{0}' not set")]
    MissingApiKey(String),

    /// The HTTP call failed or returned a non-success status.
    #[error("External API call failed: {0}")]
    ApiCallFailed(String),

    /// The response body did not contain generated text.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// A text-generation backend.
pub trait PolishClient {
    /// Send `prompt` and return the generated text.
    fn generate(&self, prompt: &str) -> std::result::Result<String, PolishError>;
}

/// Prompt asking the model to rewrite an offer in a warmer tone.
pub fn polish_prompt(offer: &str) -> String {
    format!(
        "請將以下粉絲優惠活動內容，潤飾成更自然、更吸引人的語氣，直接回傳潤飾後的文字即可，不要包含任何前言或結語。原文：「{}」",
        offer
    )
}

/// Deterministic text used when the model cannot be reached.
pub fn fallback_text(offer: &str) -> String {
    format!("為您的粉絲提供特別優惠：{}", offer)
}

/// Reject offers too short to be worth polishing.
///
/// Blank text, the sentinel, and anything under `min_chars` characters
/// (after trimming) are user errors.
pub fn validate_offer(offer: &str, min_chars: usize) -> Result<()> {
    let trimmed = offer.trim();
    if trimmed.is_empty() || trimmed == NONE_SENTINEL || trimmed.chars().count() < min_chars {
        return Err(KolmsgError::UserError(format!(
            "請至少輸入 {} 個字的粉絲優惠內容才能進行潤飾。",
            min_chars
        )));
    }
    Ok(())
}

/// Polish `offer` with `client`, falling back to [`fallback_text`] on any error.
pub fn polish_offer(client: &dyn PolishClient, offer: &str) -> String {
    match client.generate(&polish_prompt(offer)) {
        Ok(text) if !text.trim().is_empty() => {
            debug!(chars = text.chars().count(), "polished fan offer");
            text.trim().to_string()
        }
        Ok(_) => {
            warn!("polish returned empty text, using fallback");
            fallback_text(offer)
        }
        Err(e) => {
            warn!(error = %e, "polish failed, using fallback");
            fallback_text(offer)
        }
    }
}
