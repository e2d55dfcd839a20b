//! Implementation of the `kolmsg generate` command.
//!
//! Builds the deal record in layers, validates the required fields,
//! optionally polishes the fan offer, and renders the chosen template.
//!
//! Layering order, later wins:
//! 1. Initial deal terms (profit share 15, end date today, ...)
//! 2. The `--preset` data
//! 3. The `--record` file
//! 4. `--set KEY=VALUE` overrides
//! 5. `--contact` / `--kol`

use super::polish::polish_with_config;
use super::{load_config, load_record_args};
use crate::cli::GenerateArgs;
use crate::context::AppContext;
use crate::error::{KolmsgError, Result};
use crate::record::{DealTerms, fields};
use crate::render::Renderer;
use crate::store::{PresetStore, TemplateStore};
use tracing::{debug, info};

/// Message shown when no template is available to render.
pub(super) const NO_TEMPLATE_MESSAGE: &str = "沒有可用的訊息範本。";

/// Execute the `kolmsg generate` command.
pub(super) fn cmd_generate(ctx: &AppContext, args: GenerateArgs) -> Result<()> {
    let message = build_message(ctx, &args)?;
    println!("{}", message);
    Ok(())
}

/// Produce the rendered message for `args` without printing it.
pub(super) fn build_message(ctx: &AppContext, args: &GenerateArgs) -> Result<String> {
    let config = load_config(ctx)?;
    let initial = DealTerms::default();

    let mut record = initial.to_record();

    if let Some(preset_id) = &args.preset {
        let presets = PresetStore::load(ctx.presets_path())?;
        let preset = presets.get(preset_id)?;
        debug!(id = %preset.id, "applying preset");
        record.merge(&preset.data);
    }

    record.merge(&load_record_args(&args.record)?);

    if let Some(contact) = &args.contact {
        record.set(fields::CONTACT_PERSON, contact.as_str());
    }
    if let Some(kol) = &args.kol {
        record.set(fields::KOL_NAME, kol.as_str());
    }

    // Typed view catches a malformed sendHandle and enforces required fields
    // before anything is rendered.
    let terms = DealTerms::from_record(&record, &initial)?;
    terms.validate_required()?;

    if args.polish {
        let polished = polish_with_config(&config.polish, &terms.fan_offer)?;
        record.set(fields::FAN_OFFER, polished);
    }

    let template = select_template(ctx, args.template.as_deref())?;
    info!(kol = %terms.kol_name, "rendering message");

    Ok(Renderer::new(config.format).render(&template, &record))
}

/// Content of the requested template, or of the active one.
fn select_template(ctx: &AppContext, id: Option<&str>) -> Result<String> {
    let templates = TemplateStore::load(ctx.templates_path())?;

    let preset = match id {
        Some(id) => templates.get(id)?,
        None => templates
            .active()
            .ok_or_else(|| KolmsgError::UserError(NO_TEMPLATE_MESSAGE.to_string()))?,
    };

    debug!(id = %preset.id, name = %preset.name, "selected template");
    Ok(preset.template.clone())
}

