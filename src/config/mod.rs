//! Run configuration resolution
//!
//! Turns a [`SettingsStore`](crate::settings::SettingsStore) snapshot into a
//! [`RunPlan`](crate::plan::RunPlan):
//! 1. Read each recognized key or fall back to its built-in default
//! 2. Parse into the target type (fatal on failure)
//! 3. Normalize (host list splitting, plugin id qualification)
//! 4. Reconcile cross-field contradictions (non-fatal, reported)

pub mod defaults;
pub mod keys;
mod parse;
mod resolver;
mod validate;

pub use parse::{parse_bool, split_list};
pub use resolver::{ConfigResolver, Resolution};
