//! Implementation of the `kolmsg preset` subcommands.

use super::load_record_args;
use crate::cli::{PresetAddArgs, PresetIdArgs};
use crate::context::AppContext;
use crate::error::Result;
use crate::record::DealTerms;
use crate::store::PresetStore;

pub(super) fn cmd_preset_list(ctx: &AppContext) -> Result<()> {
    let store = PresetStore::load(ctx.presets_path())?;

    if store.presets().is_empty() {
        println!("No presets.");
        return Ok(());
    }

    println!("Presets ({}):", store.presets().len());
    println!();
    for preset in store.presets() {
        println!("  {:<20} {}", preset.id, preset.name);
    }

    Ok(())
}

pub(super) fn cmd_preset_show(ctx: &AppContext, args: PresetIdArgs) -> Result<()> {
    let store = PresetStore::load(ctx.presets_path())?;
    let preset = store.get(&args.id)?;

    println!("{} ({})", preset.name, preset.id);
    println!();
    for (key, value) in preset.data.iter() {
        println!("  {:<22} {}", format!("{}:", key), value);
    }

    Ok(())
}

/// Save the current deal terms under a new name.
///
/// "Current" means the initial terms overlaid with `--record` and `--set`.
pub(super) fn cmd_preset_add(ctx: &AppContext, args: PresetAddArgs) -> Result<()> {
    let initial = DealTerms::default();
    let mut current = initial.to_record();
    current.merge(&load_record_args(&args.record)?);
    // Reject a malformed sendHandle before it is persisted.
    DealTerms::from_record(&current, &initial)?;

    let mut store = PresetStore::load(ctx.presets_path())?;
    let preset = store.add(&args.name, &current)?.clone();
    store.save()?;

    println!("Added preset: {} ({})", preset.name, preset.id);
    Ok(())
}

pub(super) fn cmd_preset_delete(ctx: &AppContext, args: PresetIdArgs) -> Result<()> {
    let mut store = PresetStore::load(ctx.presets_path())?;
    let removed = store.delete(&args.id)?;
    store.save()?;

    println!("Deleted preset: {} ({})", removed.name, removed.id);
    Ok(())
}
