//! Reporter identities.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::{PluginFamily, PluginId};

/// Which reporter renders the collected samples.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReporterKind {
    #[default]
    Xml,
    Custom(PluginId),
}

impl PluginFamily for ReporterKind {
    const NAMESPACE: &'static str = "perf.reporter";

    fn builtin(short_name: &str) -> Option<Self> {
        match short_name {
            "XmlReporter" => Some(Self::Xml),
            _ => None,
        }
    }

    fn custom(id: PluginId) -> Self {
        Self::Custom(id)
    }

    fn id(&self) -> PluginId {
        match self {
            Self::Xml => PluginId::builtin(Self::NAMESPACE, "XmlReporter"),
            Self::Custom(id) => id.clone(),
        }
    }
}

impl fmt::Display for ReporterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl Serialize for ReporterKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id().as_str())
    }
}
