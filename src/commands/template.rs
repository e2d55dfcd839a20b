//! Implementation of the `kolmsg template` subcommands.
//!
//! Every mutating subcommand loads `templates.json`, applies one change, and
//! saves it back, so the active selection always persists with the list.

use super::generate::NO_TEMPLATE_MESSAGE;
use super::read_input_file;
use crate::cli::{TemplateAddArgs, TemplateIdArgs, TemplateShowArgs, TemplateUpdateArgs};
use crate::context::AppContext;
use crate::error::{KolmsgError, Result};
use crate::store::{TemplatePreset, TemplateStore};

pub(super) fn cmd_template_list(ctx: &AppContext) -> Result<()> {
    let store = TemplateStore::load(ctx.templates_path())?;

    if store.templates().is_empty() {
        println!("No templates.");
        return Ok(());
    }

    let active_id = store.active().map(|t| t.id.clone()).unwrap_or_default();

    println!("Templates ({}):", store.templates().len());
    println!();
    for template in store.templates() {
        let marker = if template.id == active_id { "*" } else { " " };
        println!("{} {:<16} {}", marker, template.id, template.name);
    }

    Ok(())
}

pub(super) fn cmd_template_show(ctx: &AppContext, args: TemplateShowArgs) -> Result<()> {
    let store = TemplateStore::load(ctx.templates_path())?;
    let template = resolve(&store, args.id.as_deref())?;

    println!("{}", template.template);
    Ok(())
}

/// Add a template from `--from`, or copy the active template's content.
pub(super) fn cmd_template_add(ctx: &AppContext, args: TemplateAddArgs) -> Result<()> {
    let mut store = TemplateStore::load(ctx.templates_path())?;

    let content = match &args.from {
        Some(path) => read_input_file(path, "template")?,
        None => store
            .active()
            .map(|t| t.template.clone())
            .unwrap_or_default(),
    };

    let added = store.add(&args.name, &content)?.clone();
    store.save()?;

    println!("Added template: {} ({}), now active", added.name, added.id);
    Ok(())
}

pub(super) fn cmd_template_update(ctx: &AppContext, args: TemplateUpdateArgs) -> Result<()> {
    let content = read_input_file(&args.from, "template")?;

    let mut store = TemplateStore::load(ctx.templates_path())?;
    store.update(&args.id, &content)?;
    store.save()?;

    println!("Updated template: {}", args.id);
    Ok(())
}

pub(super) fn cmd_template_delete(ctx: &AppContext, args: TemplateIdArgs) -> Result<()> {
    let mut store = TemplateStore::load(ctx.templates_path())?;
    let removed = store.delete(&args.id)?;
    store.save()?;

    println!("Deleted template: {} ({})", removed.name, removed.id);
    if let Some(active) = store.active() {
        println!("Active template: {} ({})", active.name, active.id);
    }
    Ok(())
}

pub(super) fn cmd_template_select(ctx: &AppContext, args: TemplateIdArgs) -> Result<()> {
    let mut store = TemplateStore::load(ctx.templates_path())?;
    store.select(&args.id)?;
    store.save()?;

    println!("Active template: {}", args.id);
    Ok(())
}

/// Restore the built-in content into the given (or active) template.
pub(super) fn cmd_template_reset(ctx: &AppContext, args: TemplateShowArgs) -> Result<()> {
    let mut store = TemplateStore::load(ctx.templates_path())?;
    let id = resolve(&store, args.id.as_deref())?.id.clone();
    store.reset(&id)?;
    store.save()?;

    println!("Reset template to built-in content: {}", id);
    Ok(())
}

/// The named template, or the active one when no id is given.
fn resolve<'a>(store: &'a TemplateStore, id: Option<&str>) -> Result<&'a TemplatePreset> {
    match id {
        Some(id) => store.get(id),
        None => store
            .active()
            .ok_or_else(|| KolmsgError::UserError(NO_TEMPLATE_MESSAGE.to_string())),
    }
}
