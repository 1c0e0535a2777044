//! Raw settings layer
//!
//! Sources are merged in a caller-chosen order:
//! 1. Settings files (properties or TOML), in the order given
//! 2. Process environment overrides (optional)
//! 3. Command-line overrides (optional)

mod properties;
mod source;
mod store;

pub use source::{SettingsSource, SourceOrigin, SourceRecord, DEFAULT_ENV_PREFIX};
pub use store::SettingsStore;
