//! Command implementations for kolmsg.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the record-loading helpers shared by commands that
//! accept `--record` and `--set`.

mod generate;
mod init;
mod polish;
mod preset;
mod render;
mod template;


use crate::cli::{Command, PresetAction, PresetCommand, RecordArgs, TemplateAction, TemplateCommand};
use crate::config::Config;
use crate::context::AppContext;
use crate::error::{KolmsgError, Result};
use crate::record::Record;
use std::path::Path;
use tracing::debug;

/// Dispatch a command to its implementation.
///
/// The data directory is resolved once here; every handler receives the
/// same context.
pub fn dispatch(data_dir: Option<&Path>, command: Command) -> Result<()> {
    let ctx = AppContext::resolve(data_dir)?;
    debug!(data_dir = %ctx.data_dir.display(), "resolved data directory");

    match command {
        Command::Init => init::cmd_init(&ctx),
        Command::Generate(args) => generate::cmd_generate(&ctx, args),
        Command::Render(args) => render::cmd_render(&ctx, args),
        Command::Preset(preset_cmd) => dispatch_preset(&ctx, preset_cmd),
        Command::Template(template_cmd) => dispatch_template(&ctx, template_cmd),
        Command::Polish(args) => polish::cmd_polish(&ctx, args),
    }
}

/// Dispatch preset subcommands.
fn dispatch_preset(ctx: &AppContext, preset_cmd: PresetCommand) -> Result<()> {
    match preset_cmd.action {
        PresetAction::List => preset::cmd_preset_list(ctx),
        PresetAction::Show(args) => preset::cmd_preset_show(ctx, args),
        PresetAction::Add(args) => preset::cmd_preset_add(ctx, args),
        PresetAction::Delete(args) => preset::cmd_preset_delete(ctx, args),
    }
}

/// Dispatch template subcommands.
fn dispatch_template(ctx: &AppContext, template_cmd: TemplateCommand) -> Result<()> {
    match template_cmd.action {
        TemplateAction::List => template::cmd_template_list(ctx),
        TemplateAction::Show(args) => template::cmd_template_show(ctx, args),
        TemplateAction::Add(args) => template::cmd_template_add(ctx, args),
        TemplateAction::Update(args) => template::cmd_template_update(ctx, args),
        TemplateAction::Delete(args) => template::cmd_template_delete(ctx, args),
        TemplateAction::Select(args) => template::cmd_template_select(ctx, args),
        TemplateAction::Reset(args) => template::cmd_template_reset(ctx, args),
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Load `config.yaml` from the data directory, defaulting when absent.
fn load_config(ctx: &AppContext) -> Result<Config> {
    Config::load_or_default(ctx.config_path())
}

/// Read a text file named on the command line.
fn read_input_file(path: &Path, what: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        KolmsgError::UserError(format!(
            "failed to read {} file '{}': {}",
            what,
            path.display(),
            e
        ))
    })
}

/// Build a record from `--record FILE` followed by `--set KEY=VALUE` overrides.
fn load_record_args(args: &RecordArgs) -> Result<Record> {
    let mut record = Record::new();

    if let Some(path) = &args.record {
        let text = read_input_file(path, "record")?;
        record.merge(&Record::from_text(&text)?);
        debug!(path = %path.display(), fields = record.len(), "loaded record file");
    }

    for assignment in &args.assignments {
        record.apply_assignment(assignment)?;
    }

    Ok(record)
}
