//! Fatal configuration errors.
//!
//! Anything that reaches this type stops the run before it starts.
//! Recoverable contradictions are reported as
//! [`Diagnostic`](crate::diagnostics::Diagnostic)s instead.

use std::path::PathBuf;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read settings source {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed settings source {path}: {reason}")]
    MalformedSource { path: PathBuf, reason: String },

    #[error("Invalid value for '{key}': {value:?} ({reason})")]
    Parse {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Value for '{key}' out of range: {value:?} ({reason})")]
    OutOfRange {
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn parse(key: &str, value: &str, reason: impl ToString) -> Self {
        Self::Parse {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn out_of_range(key: &str, value: &str, reason: impl ToString) -> Self {
        Self::OutOfRange {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Settings key this error is about, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Parse { key, .. } | Self::OutOfRange { key, .. } => Some(key),
            Self::SourceUnavailable { .. } | Self::MalformedSource { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_key_and_value() {
        let err = ConfigError::parse("port", "abc", "invalid digit found in string");
        assert_eq!(err.key(), Some("port"));
        let message = err.to_string();
        assert!(message.contains("'port'"));
        assert!(message.contains("\"abc\""));
    }

    #[test]
    fn test_source_error_has_no_key() {
        let err = ConfigError::SourceUnavailable {
            path: PathBuf::from("/missing.properties"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.key(), None);
        assert!(err.to_string().contains("/missing.properties"));
    }
}
