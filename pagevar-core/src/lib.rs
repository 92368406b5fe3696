//! Pagevar core library — domain types, settings loading, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes and store domain structs
//! - [`error`] — [`SettingsError`]
//! - [`settings`] — `.env` / `settings.json` loading

pub mod error;
pub mod settings;
pub mod types;

pub use error::SettingsError;
pub use settings::Settings;
pub use types::{
    Block, BlockId, BlockPayload, Page, PageId, ParagraphPayload, Resource, RichTextRun,
    VariableMap,
};
