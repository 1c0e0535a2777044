//! External settings sources.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use super::properties;
use crate::error::ConfigError;

/// Default prefix for environment overrides (`PERF_numThreads=8`).
pub const DEFAULT_ENV_PREFIX: &str = "PERF_";

/// One source of raw key/value settings.
#[derive(Debug, Clone)]
pub enum SettingsSource {
    /// Properties text file.
    Properties(PathBuf),

    /// TOML file; nested tables flatten to dotted keys.
    Toml(PathBuf),

    /// TOML for a `.toml` extension, properties otherwise.
    File(PathBuf),

    /// Process environment variables starting with `prefix`.
    Environment { prefix: String },

    /// In-memory pairs (command-line overrides, tests).
    Literal {
        label: String,
        pairs: Vec<(String, String)>,
    },
}

/// Origin of a loaded source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceOrigin {
    File,
    Environment,
    Literal,
}

/// Provenance of one merged source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub origin: SourceOrigin,

    /// File path, environment prefix or literal label
    pub label: String,

    /// SHA-256 of the raw file bytes (files only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,

    /// Number of entries the source contributed
    pub entries: usize,
}

/// Entries read from a source, not yet merged.
#[derive(Debug)]
pub(crate) struct LoadedSource {
    pub pairs: Vec<(String, String)>,
    pub record: SourceRecord,
}

impl SettingsSource {
    /// Environment source with the default prefix.
    pub fn environment() -> Self {
        Self::Environment {
            prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    pub fn literal<K, V>(label: impl Into<String>, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Literal {
            label: label.into(),
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub(crate) fn read(&self) -> Result<LoadedSource, ConfigError> {
        match self {
            Self::Properties(path) => read_file(path, parse_properties),
            Self::Toml(path) => read_file(path, parse_toml),
            Self::File(path) => {
                let is_toml = path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
                if is_toml {
                    read_file(path, parse_toml)
                } else {
                    read_file(path, parse_properties)
                }
            }
            Self::Environment { prefix } => environment_pairs(prefix, std::env::vars_os()),
            Self::Literal { label, pairs } => Ok(LoadedSource {
                pairs: pairs.clone(),
                record: SourceRecord {
                    origin: SourceOrigin::Literal,
                    label: label.clone(),
                    digest: None,
                    entries: pairs.len(),
                },
            }),
        }
    }
}

/// Select and strip prefixed variables.
///
/// Variables outside the prefix are skipped whatever their encoding; a
/// prefixed one that is not valid UTF-8 is a malformed source.
pub(crate) fn environment_pairs(
    prefix: &str,
    vars: impl IntoIterator<Item = (OsString, OsString)>,
) -> Result<LoadedSource, ConfigError> {
    let malformed = |reason: String| ConfigError::MalformedSource {
        path: PathBuf::from(format!("env:{}", prefix)),
        reason,
    };

    let mut pairs = Vec::new();
    for (name, value) in vars {
        if !name.to_string_lossy().starts_with(prefix) {
            continue;
        }
        let name = name
            .into_string()
            .map_err(|raw| malformed(format!("variable name {:?} is not valid UTF-8", raw)))?;
        let value = value
            .into_string()
            .map_err(|_| malformed(format!("value of {} is not valid UTF-8", name)))?;

        if let Some(key) = name.strip_prefix(prefix).filter(|key| !key.is_empty()) {
            pairs.push((key.to_string(), value));
        }
    }
    // Environment iteration order is unspecified.
    pairs.sort();

    Ok(LoadedSource {
        record: SourceRecord {
            origin: SourceOrigin::Environment,
            label: prefix.to_string(),
            digest: None,
            entries: pairs.len(),
        },
        pairs,
    })
}

fn read_file(
    path: &Path,
    parse: fn(&str) -> Result<Vec<(String, String)>, String>,
) -> Result<LoadedSource, ConfigError> {
    let bytes = fs::read(path).map_err(|source| ConfigError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hex::encode(hasher.finalize());

    let malformed = |reason: String| ConfigError::MalformedSource {
        path: path.to_path_buf(),
        reason,
    };

    let contents =
        String::from_utf8(bytes).map_err(|e| malformed(format!("Invalid UTF-8: {}", e)))?;
    let pairs = parse(&contents).map_err(malformed)?;

    Ok(LoadedSource {
        record: SourceRecord {
            origin: SourceOrigin::File,
            label: path.to_string_lossy().to_string(),
            digest: Some(digest),
            entries: pairs.len(),
        },
        pairs,
    })
}

fn parse_properties(contents: &str) -> Result<Vec<(String, String)>, String> {
    properties::parse(contents)
}

fn parse_toml(contents: &str) -> Result<Vec<(String, String)>, String> {
    let table: toml::Table =
        toml::from_str(contents).map_err(|e| format!("TOML parse error: {}", e))?;
    let mut pairs = Vec::new();
    flatten_table("", table, &mut pairs);
    Ok(pairs)
}

fn flatten_table(prefix: &str, table: toml::Table, out: &mut Vec<(String, String)>) {
    for (key, value) in table {
        let full_key = if prefix.is_empty() {
            key
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            toml::Value::Table(nested) => flatten_table(&full_key, nested, out),
            scalar => out.push((full_key, toml_to_string(scalar))),
        }
    }
}

/// Render a TOML value the way it would be written in a properties file.
fn toml_to_string(value: toml::Value) -> String {
    match value {
        toml::Value::String(s) => s,
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(items) => items
            .into_iter()
            .map(toml_to_string)
            .collect::<Vec<_>>()
            .join(" "),
        toml::Value::Table(table) => {
            let mut nested = Vec::new();
            flatten_table("", table, &mut nested);
            nested
                .into_iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(" ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_toml_flattening() {
        let pairs = parse_toml(
            r#"
host = ["db1", "db2"]
port = 8010
shared = true
reportPercentileDuration = [50, 90, 99]

[extra]
name = "x"
"#,
        )
        .unwrap();

        let get = |k: &str| {
            pairs
                .iter()
                .find(|(key, _)| key == k)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("host"), Some("db1 db2"));
        assert_eq!(get("port"), Some("8010"));
        assert_eq!(get("shared"), Some("true"));
        assert_eq!(get("reportPercentileDuration"), Some("50 90 99"));
        assert_eq!(get("extra.name"), Some("x"));
    }

    #[test]
    fn test_toml_parse_error() {
        assert!(parse_toml("port = = 1").is_err());
    }

    #[test]
    fn test_environment_prefix_stripped() {
        let vars = [
            ("PERF_numThreads", "8"),
            ("PERF_", "ignored"),
            ("HOME", "/root"),
            ("PERF_host", "a b"),
        ]
        .map(|(k, v)| (OsString::from(k), OsString::from(v)));
        let loaded = environment_pairs("PERF_", vars).unwrap();
        assert_eq!(
            loaded.pairs,
            vec![
                ("host".to_string(), "a b".to_string()),
                ("numThreads".to_string(), "8".to_string()),
            ]
        );
        assert_eq!(loaded.record.origin, SourceOrigin::Environment);
        assert_eq!(loaded.record.entries, 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_environment_skips_foreign_non_utf8() {
        use std::os::unix::ffi::OsStringExt;

        let vars = vec![
            (OsString::from("LANG_BYTES"), OsString::from_vec(vec![0x66, 0xff, 0x6f])),
            (OsString::from_vec(vec![b'X', 0xfe]), OsString::from("1")),
            (OsString::from("PERF_port"), OsString::from("9000")),
        ];
        let loaded = environment_pairs("PERF_", vars).unwrap();
        assert_eq!(loaded.pairs, vec![("port".to_string(), "9000".to_string())]);
    }

    #[cfg(unix)]
    #[test]
    fn test_environment_prefixed_non_utf8_is_malformed() {
        use std::os::unix::ffi::OsStringExt;

        let vars = vec![(
            OsString::from("PERF_host"),
            OsString::from_vec(vec![b'd', b'b', 0xff]),
        )];
        let err = environment_pairs("PERF_", vars).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedSource { .. }));
        assert!(err.to_string().contains("PERF_host"));
    }

    #[cfg(unix)]
    #[test]
    fn test_environment_source_loads_beside_non_utf8_variable() {
        use std::os::unix::ffi::OsStrExt;

        let prefix = "PERF_SOURCE_BYTES_TEST_";
        let unrelated = std::ffi::OsStr::from_bytes(&[0x66, 0xff, 0x6f]);
        std::env::set_var("PERF_SOURCE_BYTES_UNRELATED", unrelated);
        std::env::set_var(format!("{}numThreads", prefix), "3");

        let loaded = SettingsSource::Environment {
            prefix: prefix.to_string(),
        }
        .read();

        std::env::remove_var("PERF_SOURCE_BYTES_UNRELATED");
        std::env::remove_var(format!("{}numThreads", prefix));

        let loaded = loaded.unwrap();
        assert_eq!(loaded.pairs, vec![("numThreads".to_string(), "3".to_string())]);
    }

    #[test]
    fn test_file_source_records_digest() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "port=8010").unwrap();

        let loaded = SettingsSource::File(temp.path().to_path_buf()).read().unwrap();
        assert_eq!(loaded.pairs, vec![("port".to_string(), "8010".to_string())]);

        let digest = loaded.record.digest.unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_file_source_picks_toml_by_extension() {
        let mut temp = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(temp, "numThreads = 4").unwrap();

        let loaded = SettingsSource::File(temp.path().to_path_buf()).read().unwrap();
        assert_eq!(loaded.pairs, vec![("numThreads".to_string(), "4".to_string())]);
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let err = SettingsSource::Properties(PathBuf::from("/definitely/not/here.properties"))
            .read()
            .unwrap_err();
        assert!(matches!(err, ConfigError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(&[b'a', b'=', 0xff, 0xfe]).unwrap();

        let err = SettingsSource::Properties(temp.path().to_path_buf())
            .read()
            .unwrap_err();
        assert!(matches!(err, ConfigError::MalformedSource { .. }));
    }
}
