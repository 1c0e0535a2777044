//! Sampler identities and the coarse `testType` selector.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::{PluginFamily, PluginId};

/// Which sampler the harness should instantiate for each worker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SamplerKind {
    /// Binary/XML content-server protocol. Catch-all default.
    #[default]
    Xcc,
    /// Plain HTTP requests.
    Http,
    /// URI fetches.
    Uri,
    /// Anything else; loaded by the harness bootstrap.
    Custom(PluginId),
}

impl PluginFamily for SamplerKind {
    const NAMESPACE: &'static str = "perf.sampler";

    fn builtin(short_name: &str) -> Option<Self> {
        match short_name {
            "XccSampler" => Some(Self::Xcc),
            "HttpSampler" => Some(Self::Http),
            "UriSampler" => Some(Self::Uri),
            _ => None,
        }
    }

    fn custom(id: PluginId) -> Self {
        Self::Custom(id)
    }

    fn id(&self) -> PluginId {
        let short = match self {
            Self::Xcc => "XccSampler",
            Self::Http => "HttpSampler",
            Self::Uri => "UriSampler",
            Self::Custom(id) => return id.clone(),
        };
        PluginId::builtin(Self::NAMESPACE, short)
    }
}

impl fmt::Display for SamplerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl Serialize for SamplerKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id().as_str())
    }
}

/// Coarse sampler selector used when no explicit sampler is configured.
///
/// Matching is case-insensitive. Unknown values are kept verbatim and fall
/// back to the catch-all sampler.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TestType {
    #[default]
    Xcc,
    Http,
    Uri,
    Other(String),
}

impl TestType {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("uri") {
            Self::Uri
        } else if trimmed.eq_ignore_ascii_case("http") {
            Self::Http
        } else if trimmed.eq_ignore_ascii_case("xcc") {
            Self::Xcc
        } else {
            Self::Other(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Xcc => "XCC",
            Self::Http => "HTTP",
            Self::Uri => "URI",
            Self::Other(raw) => raw,
        }
    }

    /// Sampler picked for this test type.
    pub fn default_sampler(&self) -> SamplerKind {
        match self {
            Self::Uri => SamplerKind::Uri,
            Self::Http => SamplerKind::Http,
            Self::Xcc | Self::Other(_) => SamplerKind::Xcc,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TestType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
