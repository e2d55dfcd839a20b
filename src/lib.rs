//! kolmsg: template-driven outreach messages for KOL partnership offers.
//!
//! The core is [`render`]: a pure function that resolves `[if: ...]`
//! conditional blocks against raw record values, then substitutes `{field}`
//! placeholders with display-formatted values. Everything else (presets,
//! templates, polish, configuration) feeds it a record and a template.
//!
//! ```
//! use kolmsg::record::Record;
//!
//! let record = Record::from_iter([("kolName", "小明"), ("bonusAmount", "無")]);
//! let message = kolmsg::render::render("給 {kolName}[if: bonusAmount|，加碼 {bonusAmount}]", &record);
//! assert_eq!(message, "給 小明");
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod format;
pub mod fs;
pub mod polish;
pub mod record;
pub mod render;
pub mod store;
