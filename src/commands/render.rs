//! Implementation of the `kolmsg render` command.
//!
//! Preview mode: renders any template file against the given record with
//! no preset lookup and no required-field checks. Missing keys render as
//! empty conditionals and leave their placeholders untouched.

use super::{load_config, load_record_args, read_input_file};
use crate::cli::RenderArgs;
use crate::context::AppContext;
use crate::error::Result;
use crate::render::Renderer;

/// Execute the `kolmsg render` command.
pub(super) fn cmd_render(ctx: &AppContext, args: RenderArgs) -> Result<()> {
    println!("{}", render_preview(ctx, &args)?);
    Ok(())
}

pub(super) fn render_preview(ctx: &AppContext, args: &RenderArgs) -> Result<String> {
    let config = load_config(ctx)?;
    let template = read_input_file(&args.template, "template")?;
    let record = load_record_args(&args.record)?;

    Ok(Renderer::new(config.format).render(&template, &record))
}
