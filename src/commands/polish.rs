//! Implementation of the `kolmsg polish` command.

use super::load_config;
use crate::cli::PolishArgs;
use crate::config::PolishConfig;
use crate::context::AppContext;
use crate::error::Result;
use crate::polish::{GeminiClient, fallback_text, polish_offer, validate_offer};
use tracing::warn;

/// Execute the `kolmsg polish` command.
pub(super) fn cmd_polish(ctx: &AppContext, args: PolishArgs) -> Result<()> {
    let config = load_config(ctx)?;
    let polished = polish_with_config(&config.polish, &args.text)?;
    println!("{}", polished);
    Ok(())
}

/// Validate `text` and polish it with the configured Gemini client.
///
/// Only input validation can fail. An unavailable client (no API key,
/// HTTP client build failure) degrades to the fallback phrasing.
pub(super) fn polish_with_config(config: &PolishConfig, text: &str) -> Result<String> {
    validate_offer(text, config.min_chars)?;
    let text = text.trim();

    match GeminiClient::from_config(config) {
        Ok(client) => Ok(polish_offer(&client, text)),
        Err(e) => {
            warn!(error = %e, "polish client unavailable, using fallback");
            Ok(fallback_text(text))
        }
    }
}
