//! CLI argument parsing for kolmsg.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// kolmsg: generate KOL partnership offer messages from templates.
///
/// Deal terms come from presets, record files, and `--set KEY=VALUE`
/// overrides. Templates use `{field}` placeholders and
/// `[if: field|...]` / `[if: field=value|...]` conditional blocks.
#[derive(Parser, Debug)]
#[command(name = "kolmsg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory holding config.yaml, presets.json and templates.json.
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for kolmsg.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory with default config, presets and templates.
    ///
    /// Existing files are left untouched.
    Init,

    /// Generate an offer message from deal terms.
    ///
    /// Terms are layered: defaults, then --preset, then --record, then
    /// --set, then --contact/--kol. The contact person and KOL name are
    /// required.
    Generate(GenerateArgs),

    /// Render a template file without required-field checks.
    Render(RenderArgs),

    /// Deal preset management.
    Preset(PresetCommand),

    /// Message template management.
    Template(TemplateCommand),

    /// Polish fan-offer text through the configured language model.
    ///
    /// Falls back to a fixed phrasing if the model cannot be reached.
    Polish(PolishArgs),
}

/// Deal-term inputs shared by commands that build a record.
#[derive(Args, Debug, Default)]
pub struct RecordArgs {
    /// YAML or JSON file with field values.
    #[arg(long, value_name = "FILE")]
    pub record: Option<PathBuf>,

    /// Field override, e.g. --set bonusAmount=5000 (repeatable).
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,
}

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Preset to start from.
    #[arg(short, long, value_name = "ID")]
    pub preset: Option<String>,

    /// Template to render (defaults to the active template).
    #[arg(short, long, value_name = "ID")]
    pub template: Option<String>,

    /// Contact person (聯絡人).
    #[arg(long, value_name = "NAME")]
    pub contact: Option<String>,

    /// KOL name.
    #[arg(long, value_name = "NAME")]
    pub kol: Option<String>,

    #[command(flatten)]
    pub record: RecordArgs,

    /// Polish the fan offer before rendering.
    #[arg(long)]
    pub polish: bool,
}

/// Arguments for the `render` command.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Template file to render.
    #[arg(short, long, value_name = "FILE")]
    pub template: PathBuf,

    #[command(flatten)]
    pub record: RecordArgs,
}

/// Preset subcommands.
#[derive(Parser, Debug)]
pub struct PresetCommand {
    #[command(subcommand)]
    pub action: PresetAction,
}

#[derive(Subcommand, Debug)]
pub enum PresetAction {
    /// List presets.
    List,

    /// Show the values stored in a preset.
    Show(PresetIdArgs),

    /// Save deal terms as a new preset.
    Add(PresetAddArgs),

    /// Delete a preset.
    Delete(PresetIdArgs),
}

#[derive(Args, Debug)]
pub struct PresetIdArgs {
    /// Preset ID (e.g., B).
    pub id: String,
}

#[derive(Args, Debug)]
pub struct PresetAddArgs {
    /// Display name for the preset.
    pub name: String,

    #[command(flatten)]
    pub record: RecordArgs,
}

/// Template subcommands.
#[derive(Parser, Debug)]
pub struct TemplateCommand {
    #[command(subcommand)]
    pub action: TemplateAction,
}

#[derive(Subcommand, Debug)]
pub enum TemplateAction {
    /// List templates, marking the active one.
    List,

    /// Print a template (defaults to the active one).
    Show(TemplateShowArgs),

    /// Add a template and make it active.
    ///
    /// Content is read from --from, or copied from the active template.
    Add(TemplateAddArgs),

    /// Replace a template's content from a file.
    Update(TemplateUpdateArgs),

    /// Delete a template. The last template cannot be deleted.
    Delete(TemplateIdArgs),

    /// Make a template active.
    Select(TemplateIdArgs),

    /// Restore the built-in content into a template (defaults to the active one).
    Reset(TemplateShowArgs),
}

#[derive(Args, Debug)]
pub struct TemplateIdArgs {
    /// Template ID.
    pub id: String,
}

#[derive(Args, Debug)]
pub struct TemplateShowArgs {
    /// Template ID.
    pub id: Option<String>,
}

#[derive(Args, Debug)]
pub struct TemplateAddArgs {
    /// Display name for the template.
    pub name: String,

    /// File holding the template content.
    #[arg(long, value_name = "FILE")]
    pub from: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TemplateUpdateArgs {
    /// Template ID.
    pub id: String,

    /// File holding the new template content.
    #[arg(long, value_name = "FILE")]
    pub from: PathBuf,
}

/// Arguments for the `polish` command.
#[derive(Args, Debug)]
pub struct PolishArgs {
    /// Fan-offer text to polish.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = parse(&[
            "kolmsg",
            "generate",
            "--preset",
            "B",
            "--contact",
            "Amy",
            "--kol",
            "小明",
            "--set",
            "bonusAmount=5000",
            "--set",
            "sendHandle=否",
            "--polish",
        ]);

        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.preset.as_deref(), Some("B"));
                assert_eq!(args.contact.as_deref(), Some("Amy"));
                assert_eq!(args.kol.as_deref(), Some("小明"));
                assert_eq!(
                    args.record.assignments,
                    vec!["bonusAmount=5000", "sendHandle=否"]
                );
                assert!(args.polish);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = parse(&["kolmsg", "-vv", "preset", "list", "--data-dir", "/tmp/x"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(
            cli.command,
            Command::Preset(PresetCommand {
                action: PresetAction::List
            })
        ));
    }

    #[test]
    fn test_parse_template_reset_without_id() {
        let cli = parse(&["kolmsg", "template", "reset"]);
        match cli.command {
            Command::Template(TemplateCommand {
                action: TemplateAction::Reset(args),
            }) => assert!(args.id.is_none()),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_render_requires_template() {
        assert!(Cli::try_parse_from(["kolmsg", "render"]).is_err());
    }
}
