//! Typed reads of individual settings.
//!
//! Each read falls back to its default when the key is absent and fails with
//! a [`ConfigError`] naming the key when the raw value does not parse.

use perf_plugins::PluginFamily;
use regex_lite::Regex;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::ConfigError;
use crate::settings::SettingsStore;

/// Separator for list-valued settings: commas and/or whitespace.
fn list_separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"[,\s]+").expect("list separator pattern is valid"))
}

/// Parse a boolean flag.
///
/// Accepts `true/false`, `yes/no`, `on/off` and `1/0`, ignoring case.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Split a comma- and/or whitespace-separated list, dropping empty tokens.
pub fn split_list(raw: &str) -> Vec<&str> {
    list_separator()
        .split(raw.trim())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Reads typed values out of a settings snapshot.
pub(crate) struct FieldReader<'a> {
    store: &'a SettingsStore,
}

impl<'a> FieldReader<'a> {
    pub fn new(store: &'a SettingsStore) -> Self {
        Self { store }
    }

    pub fn raw(&self, key: &str) -> Option<&'a str> {
        self.store.get(key)
    }

    pub fn string(&self, key: &str, default: &str) -> String {
        self.raw(key).unwrap_or(default).to_string()
    }

    pub fn optional_string(&self, key: &str) -> Option<String> {
        self.raw(key).map(str::to_string)
    }

    pub fn number<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.raw(key) {
            Some(raw) => parse_number(key, raw),
            None => Ok(default),
        }
    }

    /// A number that must be at least one.
    pub fn positive(&self, key: &str, default: u32) -> Result<u32, ConfigError> {
        let value: u32 = self.number(key, default)?;
        if value == 0 {
            return Err(ConfigError::out_of_range(key, "0", "must be at least 1"));
        }
        Ok(value)
    }

    pub fn boolean(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        match self.raw(key) {
            Some(raw) => parse_bool(raw).ok_or_else(|| {
                ConfigError::parse(key, raw, "expected true/false, yes/no, on/off or 1/0")
            }),
            None => Ok(default),
        }
    }

    /// Boolean read through a chain of keys; the first present key wins.
    pub fn boolean_any(&self, keys: &[&str], default: bool) -> Result<bool, ConfigError> {
        match keys.iter().find(|key| self.store.contains_key(key)) {
            Some(key) => self.boolean(key, default),
            None => Ok(default),
        }
    }

    /// Percentile list; `None` when absent or empty.
    pub fn percentiles(&self, key: &str) -> Result<Option<Vec<u8>>, ConfigError> {
        let Some(raw) = self.raw(key) else {
            return Ok(None);
        };

        let mut percentiles = Vec::new();
        for token in split_list(raw) {
            let value: i64 = parse_number(key, token)?;
            let percentile = u8::try_from(value)
                .ok()
                .filter(|p| *p <= 100)
                .ok_or_else(|| ConfigError::out_of_range(key, token, "percentiles must be in [0, 100]"))?;
            percentiles.push(percentile);
        }

        Ok((!percentiles.is_empty()).then_some(percentiles))
    }

    /// Whitespace-separated host list; never empty.
    pub fn hosts(&self, key: &str, default: &str) -> Vec<String> {
        let hosts: Vec<String> = self
            .raw(key)
            .unwrap_or(default)
            .split_whitespace()
            .map(str::to_string)
            .collect();

        if hosts.is_empty() {
            vec![default.to_string()]
        } else {
            hosts
        }
    }

    /// Explicit plugin override, if one is configured.
    pub fn plugin<F: PluginFamily>(&self, key: &str) -> Result<Option<F>, ConfigError> {
        match self.raw(key) {
            Some(raw) => F::resolve(raw)
                .map(Some)
                .map_err(|e| ConfigError::parse(key, raw, e)),
            None => Ok(None),
        }
    }
}

fn parse_number<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::parse(key, raw, e))
}
