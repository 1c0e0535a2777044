//! Test-list identities.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::{PluginFamily, PluginId};

/// Which test list supplies the ordered test definitions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TestListKind {
    /// Test definitions read from an XML file at `inputPath`.
    #[default]
    XmlFile,
    Custom(PluginId),
}

impl PluginFamily for TestListKind {
    const NAMESPACE: &'static str = "perf.testlist";

    fn builtin(short_name: &str) -> Option<Self> {
        match short_name {
            "XmlFileTestList" => Some(Self::XmlFile),
            _ => None,
        }
    }

    fn custom(id: PluginId) -> Self {
        Self::Custom(id)
    }

    fn id(&self) -> PluginId {
        match self {
            Self::XmlFile => PluginId::builtin(Self::NAMESPACE, "XmlFileTestList"),
            Self::Custom(id) => id.clone(),
        }
    }
}

impl fmt::Display for TestListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl Serialize for TestListKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id().as_str())
    }
}
