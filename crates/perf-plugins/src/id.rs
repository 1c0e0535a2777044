//! Fully-qualified plugin identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between namespace segments.
pub const QUALIFIER: char = '.';

/// A fully-qualified plugin identifier such as `perf.sampler.HttpSampler`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PluginId(String);

/// Errors produced while building a plugin identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PluginIdError {
    #[error("plugin identifier is empty")]
    Empty,

    #[error("plugin identifier {0:?} contains whitespace")]
    Whitespace(String),

    #[error("plugin identifier {0:?} is not qualified")]
    Unqualified(String),

    #[error("plugin identifier {0:?} has an empty segment")]
    EmptySegment(String),
}

impl PluginId {
    /// Accept an identifier that is already fully qualified.
    pub fn new(raw: impl Into<String>) -> Result<Self, PluginIdError> {
        let raw = raw.into();
        check_chars(&raw)?;
        if !raw.contains(QUALIFIER) {
            return Err(PluginIdError::Unqualified(raw));
        }
        if raw.split(QUALIFIER).any(str::is_empty) {
            return Err(PluginIdError::EmptySegment(raw));
        }
        Ok(Self(raw))
    }

    /// Qualify `raw` against `namespace`.
    ///
    /// Names without a qualifier, or starting with one (`.Foo`), are treated
    /// as short names and prefixed with the namespace. Anything else is taken
    /// as already qualified.
    pub fn qualify(raw: &str, namespace: &str) -> Result<Self, PluginIdError> {
        let trimmed = raw.trim();
        check_chars(trimmed)?;

        match trimmed.find(QUALIFIER) {
            Some(pos) if pos > 0 => Self::new(trimmed),
            _ => {
                let short = trimmed.trim_start_matches(QUALIFIER);
                if short.is_empty() {
                    return Err(PluginIdError::Empty);
                }
                Self::new(format!("{namespace}{QUALIFIER}{short}"))
            }
        }
    }

    /// Id of a builtin component; both parts are static and well-formed.
    pub(crate) fn builtin(namespace: &str, short: &str) -> Self {
        Self(format!("{namespace}{QUALIFIER}{short}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last segment of the identifier.
    pub fn short_name(&self) -> &str {
        self.0.rsplit(QUALIFIER).next().unwrap_or(&self.0)
    }

    /// Everything before the last segment.
    pub fn namespace(&self) -> &str {
        match self.0.rfind(QUALIFIER) {
            Some(pos) => &self.0[..pos],
            None => "",
        }
    }

    /// Short name, but only if the id lives directly in `namespace`.
    pub fn short_name_in(&self, namespace: &str) -> Option<&str> {
        (self.namespace() == namespace).then(|| self.short_name())
    }
}

fn check_chars(raw: &str) -> Result<(), PluginIdError> {
    if raw.is_empty() {
        return Err(PluginIdError::Empty);
    }
    if raw.chars().any(char::is_whitespace) {
        return Err(PluginIdError::Whitespace(raw.to_string()));
    }
    Ok(())
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PluginId {
    type Error = PluginIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PluginId> for String {
    fn from(id: PluginId) -> Self {
        id.0
    }
}
