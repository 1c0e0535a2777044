//! Merged key/value settings.

use std::collections::BTreeMap;
use tracing::debug;

use super::source::{SettingsSource, SourceRecord};
use crate::error::ConfigError;

/// Raw settings accumulated from one or more sources.
///
/// Sources merge in the order they are loaded; a key defined by several
/// sources keeps the value from the last one. No validation happens here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsStore {
    values: BTreeMap<String, String>,
    sources: Vec<SourceRecord>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store directly from literal pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut store = Self::new();
        for (key, value) in pairs {
            store.insert(key, value);
        }
        store
    }

    /// Load every source in order.
    pub fn from_sources(
        sources: impl IntoIterator<Item = SettingsSource>,
    ) -> Result<Self, ConfigError> {
        let mut store = Self::new();
        for source in sources {
            store.load(&source)?;
        }
        Ok(store)
    }

    /// Merge one source over the current contents.
    pub fn load(&mut self, source: &SettingsSource) -> Result<(), ConfigError> {
        let loaded = source.read()?;
        debug!(
            origin = ?loaded.record.origin,
            label = %loaded.record.label,
            entries = loaded.record.entries,
            "loaded settings source"
        );

        for (key, value) in loaded.pairs {
            self.values.insert(key, value);
        }
        self.sources.push(loaded.record);
        Ok(())
    }

    /// Set a single key, overriding any earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Provenance of every loaded source, in load order.
    pub fn sources(&self) -> &[SourceRecord] {
        &self.sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SourceOrigin;

    #[test]
    fn test_last_write_wins() {
        let mut store = SettingsStore::new();
        store
            .load(&SettingsSource::literal("first", [("port", "8003"), ("host", "a")]))
            .unwrap();
        store
            .load(&SettingsSource::literal("second", [("port", "9000")]))
            .unwrap();

        assert_eq!(store.get("port"), Some("9000"));
        assert_eq!(store.get("host"), Some("a"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_sources_recorded_in_order() {
        let store = SettingsStore::from_sources([
            SettingsSource::literal("defaults", [("a", "1")]),
            SettingsSource::literal("cli", [("b", "2"), ("c", "3")]),
        ])
        .unwrap();

        let labels: Vec<_> = store.sources().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["defaults", "cli"]);
        assert_eq!(store.sources()[1].entries, 2);
        assert_eq!(store.sources()[0].origin, SourceOrigin::Literal);
    }

    #[test]
    fn test_from_pairs_has_no_sources() {
        assert!(SettingsStore::new().is_empty());

        let store = SettingsStore::from_pairs([("numThreads", "4")]);
        assert!(!store.is_empty());
        assert_eq!(store.get("numThreads"), Some("4"));
        assert!(store.sources().is_empty());
    }

    #[test]
    fn test_keys_are_sorted() {
        let store = SettingsStore::from_pairs([("b", "1"), ("a", "2"), ("c", "3")]);
        let keys: Vec<_> = store.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_failed_load_leaves_store_untouched() {
        let mut store = SettingsStore::from_pairs([("a", "1")]);
        let result = store.load(&SettingsSource::Properties("/no/such/file".into()));
        assert!(result.is_err());
        assert_eq!(store.len(), 1);
        assert!(store.sources().is_empty());
    }
}
