//! Configuration model for kolmsg.
//!
//! This module defines the Config struct that represents `<data-dir>/config.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for every field, and validation of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use types::PolishConfig;
