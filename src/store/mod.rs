//! Key-value stores for deal presets and template presets.
//!
//! Both stores are JSON files in the data directory. A missing file means
//! "use the built-in defaults"; an unreadable or corrupt one is a
//! [`KolmsgError::StoreError`] and is never overwritten. Writes go through
//! [`crate::fs::atomic_write_file`].

mod presets;
mod templates;


pub use presets::{PRESET_FIELDS, Preset, PresetStore, default_presets};
pub use templates::{
    DEFAULT_MESSAGE_TEMPLATE, DEFAULT_TEMPLATE_ID, TemplatePreset, TemplateStore,
    default_template_presets,
};

use crate::error::{KolmsgError, Result};
use crate::fs::atomic_write_file;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

/// Read a JSON store file.
///
/// A missing file yields `Ok(None)` and callers use their defaults. A file
/// that exists but cannot be read or parsed is a store error.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "store file missing, using defaults");
            return Ok(None);
        }
        Err(e) => {
            return Err(KolmsgError::StoreError(format!(
                "failed to read '{}': {}",
                path.display(),
                e
            )));
        }
    };

    let value = serde_json::from_str(&content).map_err(|e| {
        KolmsgError::StoreError(format!(
            "failed to parse '{}': {}\n\nFix or remove the file; it was left untouched.",
            path.display(),
            e
        ))
    })?;

    debug!(path = %path.display(), "loaded store file");
    Ok(Some(value))
}

/// Write a JSON store file atomically (pretty-printed, trailing newline).
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value).map_err(|e| {
        KolmsgError::StoreError(format!(
            "failed to serialize '{}': {}",
            path.display(),
            e
        ))
    })?;
    json.push('\n');
    atomic_write_file(path, &json)
}
