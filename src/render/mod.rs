//! Template rendering engine.
//!
//! Rendering runs in two passes over the template:
//!
//! 1. **Conditionals** are resolved against the raw record
//!    (see [`evaluate_conditionals`]).
//! 2. **Placeholders** are substituted from the display-formatted record
//!    (see [`substitute_placeholders`]).
//!
//! The result is trimmed of surrounding whitespace.
//!
//! # Template Syntax
//!
//! ```text
//! HI {contactPerson}，提供方案給 {kolName} 參考
//! 🔹採 {profitShare} 分潤機制[if: guaranteedMinimum|，並提供 {guaranteedMinimum} 保底]
//! [if: sendHandle=是|🔹會再補手把]
//! ```
//!
//! - `{name}` is replaced by the display value of field `name`.
//! - `[if: name|content]` keeps `content` when `name` is neither blank nor `無`.
//! - `[if: name=value|content]` keeps `content` when `name` equals `value`.
//!
//! Conditional blocks do not nest: the first `]` closes the block.
//!
//! Rendering never fails. Unknown fields, unparseable numbers and malformed
//! blocks all pass through as literal text or empty values.

mod conditional;
mod placeholder;

pub use conditional::{collapse_blank_lines, evaluate_conditionals};
pub use placeholder::substitute_placeholders;

use crate::format::{DisplayPolicy, format_for_display};
use crate::record::Record;

/// Renders templates with a specific display policy.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    policy: DisplayPolicy,
}

impl Renderer {
    pub fn new(policy: DisplayPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &DisplayPolicy {
        &self.policy
    }

    /// Render `template` against `record`.
    pub fn render(&self, template: &str, record: &Record) -> String {
        let resolved = evaluate_conditionals(template, record);
        let display = self.policy.format_record(record);
        substitute_placeholders(&resolved, &display)
            .trim()
            .to_string()
    }
}

/// Render `template` against `record` with the default display policy.
///
/// ```
/// use kolmsg::record::Record;
/// use kolmsg::render::render;
///
/// let record = Record::from_iter([("profitShare", "15"), ("guaranteedMinimum", "25000")]);
/// assert_eq!(render("{profitShare}/{guaranteedMinimum}", &record), "15%/25,000");
/// ```
pub fn render(template: &str, record: &Record) -> String {
    let resolved = evaluate_conditionals(template, record);
    substitute_placeholders(&resolved, &format_for_display(record))
        .trim()
        .to_string()
}
