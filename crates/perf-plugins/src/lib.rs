//! Plugin identities for the perf harness.
//!
//! A run picks one sampler, one reporter and one test list. Each is named by a
//! fully-qualified [`PluginId`]; well-known ids map onto closed enums so the
//! harness bootstrap can match on them, and anything else is carried as a
//! `Custom` id for the bootstrap's own plugin loader.

mod id;
mod reporter;
mod sampler;
mod test_list;

pub use id::{PluginId, PluginIdError, QUALIFIER};
pub use reporter::ReporterKind;
pub use sampler::{SamplerKind, TestType};
pub use test_list::TestListKind;

/// A family of pluggable components sharing one namespace.
pub trait PluginFamily: Sized {
    /// Namespace prepended to short names.
    const NAMESPACE: &'static str;

    /// Map a short name within [`Self::NAMESPACE`] onto a builtin variant.
    fn builtin(short_name: &str) -> Option<Self>;

    /// Wrap an id the family does not know about.
    fn custom(id: PluginId) -> Self;

    /// Fully-qualified id of this component.
    fn id(&self) -> PluginId;

    /// Resolve a user-supplied override, qualifying short names first.
    fn resolve(raw: &str) -> Result<Self, PluginIdError> {
        let id = PluginId::qualify(raw, Self::NAMESPACE)?;
        Ok(Self::from_id(id))
    }

    /// Classify an already-qualified id.
    fn from_id(id: PluginId) -> Self {
        match id.short_name_in(Self::NAMESPACE).and_then(Self::builtin) {
            Some(builtin) => builtin,
            None => Self::custom(id),
        }
    }
}
