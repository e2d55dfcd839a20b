//! Exit code constants for the kolmsg CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unknown preset/template)
//! - 2: Validation failure (required deal fields missing)
//! - 3: Store failure (preset/template files could not be written)
//! - 4: Config failure (config.yaml unreadable or invalid)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unknown ids, or rejected input.
pub const USER_ERROR: i32 = 1;

/// Validation failure: required deal fields are blank.
pub const VALIDATION_FAILURE: i32 = 2;

/// Store failure: preset or template files could not be persisted.
pub const STORE_FAILURE: i32 = 3;

/// Config failure: config.yaml could not be read or failed validation.
pub const CONFIG_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            USER_ERROR,
            VALIDATION_FAILURE,
            STORE_FAILURE,
            CONFIG_FAILURE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
