//! Error types for the kolmsg CLI.
//!
//! Uses thiserror for derive macros. The template renderer itself never
//! fails; these errors come from the surrounding form, store, and config layers.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for kolmsg operations.
///
/// Each variant maps to a specific process exit code.
#[derive(Error, Debug)]
pub enum KolmsgError {
    /// User provided invalid arguments or referenced something that does not exist.
    #[error("{0}")]
    UserError(String),

    /// Required deal fields are missing; rendering was not attempted.
    #[error("{0}")]
    ValidationError(String),

    /// Preset or template storage could not be read or written.
    #[error("Store operation failed: {0}")]
    StoreError(String),

    /// Configuration file could not be read, parsed, or validated.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl KolmsgError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            KolmsgError::UserError(_) => exit_codes::USER_ERROR,
            KolmsgError::ValidationError(_) => exit_codes::VALIDATION_FAILURE,
            KolmsgError::StoreError(_) => exit_codes::STORE_FAILURE,
            KolmsgError::ConfigError(_) => exit_codes::CONFIG_FAILURE,
        }
    }
}

/// Result type alias for kolmsg operations.
pub type Result<T> = std::result::Result<T, KolmsgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = KolmsgError::UserError("unknown preset".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn validation_error_has_correct_exit_code() {
        let err = KolmsgError::ValidationError("missing kolName".to_string());
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_FAILURE);
    }

    #[test]
    fn store_error_has_correct_exit_code() {
        let err = KolmsgError::StoreError("disk full".to_string());
        assert_eq!(err.exit_code(), exit_codes::STORE_FAILURE);
    }

    #[test]
    fn config_error_has_correct_exit_code() {
        let err = KolmsgError::ConfigError("bad yaml".to_string());
        assert_eq!(err.exit_code(), exit_codes::CONFIG_FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = KolmsgError::ValidationError("請填寫所有必填欄位 (聯絡人, KOL)".to_string());
        assert_eq!(err.to_string(), "請填寫所有必填欄位 (聯絡人, KOL)");

        let err = KolmsgError::StoreError("permission denied".to_string());
        assert_eq!(err.to_string(), "Store operation failed: permission denied");

        let err = KolmsgError::ConfigError("timeout_secs must be greater than 0".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: timeout_secs must be greater than 0"
        );
    }
}
