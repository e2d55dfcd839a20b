//! Implementation of the `kolmsg init` command.
//!
//! Creates the data directory and writes the default `config.yaml`,
//! `presets.json` and `templates.json`. The command is idempotent: files
//! that already exist are never overwritten.

use crate::config::Config;
use crate::context::AppContext;
use crate::error::Result;
use crate::fs::atomic_write_file;
use crate::store::{PresetStore, TemplateStore};
use tracing::info;

/// Execute the `kolmsg init` command.
pub(super) fn cmd_init(ctx: &AppContext) -> Result<()> {
    let created = scaffold(ctx)?;

    println!("Initialized kolmsg data directory.");
    println!();
    println!("Data directory: {}", ctx.data_dir.display());
    println!();
    if created.is_empty() {
        println!("All files already exist; nothing to create.");
    } else {
        println!("Created files:");
        for name in &created {
            println!("  {}", name);
        }
    }
    println!();
    println!("You can now generate a message with `kolmsg generate --contact <name> --kol <name>`.");

    Ok(())
}

/// Create any missing data files. Returns the names of the files created.
pub(super) fn scaffold(ctx: &AppContext) -> Result<Vec<&'static str>> {
    if ctx.ensure_data_dir()? {
        info!(data_dir = %ctx.data_dir.display(), "created data directory");
    }

    let mut created = Vec::new();

    let config_path = ctx.config_path();
    if !config_path.exists() {
        atomic_write_file(&config_path, &Config::default().to_yaml()?)?;
        created.push("config.yaml");
    }

    // Loading a missing store yields the built-in defaults; saving persists them.
    let presets_path = ctx.presets_path();
    if !presets_path.exists() {
        PresetStore::load(&presets_path)?.save()?;
        created.push("presets.json");
    }

    let templates_path = ctx.templates_path();
    if !templates_path.exists() {
        TemplateStore::load(&templates_path)?.save()?;
        created.push("templates.json");
    }

    info!(created = created.len(), "scaffolded data directory");
    Ok(created)
}
