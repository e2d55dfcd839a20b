//! Data directory resolution for kolmsg.
//!
//! Every command locates its config and stores through this module, so
//! running kolmsg from a subdirectory still finds the `.kolmsg/` directory of
//! the project it belongs to.
//!
//! Resolution order:
//! 1. An explicit `--data-dir`
//! 2. The `KOLMSG_HOME` environment variable
//! 3. The nearest ancestor of the working directory containing `.kolmsg/`
//! 4. `.kolmsg/` in the working directory (created on first write)

use crate::error::{KolmsgError, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default data directory name.
pub const DATA_DIR_NAME: &str = ".kolmsg";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "KOLMSG_HOME";

/// Resolved paths for kolmsg state.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Directory holding config and store files.
    pub data_dir: PathBuf,
}

impl AppContext {
    /// Resolve the context from an optional explicit directory, the
    /// environment, and the current working directory.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(dir) = explicit {
            debug!(data_dir = %dir.display(), "using explicit data directory");
            return Ok(Self::at(dir));
        }

        if let Ok(dir) = env::var(DATA_DIR_ENV)
            && !dir.trim().is_empty()
        {
            debug!(data_dir = %dir, "using data directory from {}", DATA_DIR_ENV);
            return Ok(Self::at(dir));
        }

        let cwd = env::current_dir().map_err(|e| {
            KolmsgError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Ok(Self::resolve_from(cwd))
    }

    /// Resolve from a specific working directory, ignoring the environment.
    pub fn resolve_from<P: AsRef<Path>>(cwd: P) -> Self {
        let cwd = cwd.as_ref();

        let found = cwd
            .ancestors()
            .map(|dir| dir.join(DATA_DIR_NAME))
            .find(|candidate| candidate.is_dir());

        match found {
            Some(data_dir) => {
                debug!(data_dir = %data_dir.display(), "found data directory");
                Self { data_dir }
            }
            None => Self::at(cwd.join(DATA_DIR_NAME)),
        }
    }

    /// Use exactly the given directory.
    pub fn at<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Check if the data directory exists.
    pub fn exists(&self) -> bool {
        self.data_dir.is_dir()
    }

    /// Create the data directory if needed. Returns true if it was created.
    pub fn ensure_data_dir(&self) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }

        std::fs::create_dir_all(&self.data_dir).map_err(|e| {
            KolmsgError::StoreError(format!(
                "failed to create data directory '{}': {}",
                self.data_dir.display(),
                e
            ))
        })?;
        Ok(true)
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join("config.yaml")
    }

    pub fn presets_path(&self) -> PathBuf {
        self.data_dir.join("presets.json")
    }

    pub fn templates_path(&self) -> PathBuf {
        self.data_dir.join("templates.json")
    }
}
