//! Config struct definition.

use super::types::PolishConfig;
use crate::format::DisplayPolicy;
use serde::{Deserialize, Serialize};

/// Configuration for kolmsg.
///
/// This struct represents the contents of `<data-dir>/config.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display formatting applied to record values before substitution.
    pub format: DisplayPolicy,

    /// Fan-offer polish settings.
    pub polish: PolishConfig,
}
