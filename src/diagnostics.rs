//! Non-fatal findings produced while resolving a run plan.
//!
//! Contradictory but recoverable settings are corrected in place and
//! reported here. The caller decides whether to log them, fail on them or
//! ignore them.

use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

/// How loudly a diagnostic should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// What was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// `checkResults=true` without `recordResults=true`; checking was turned off.
    ResultCheckDisabled,

    /// A seed was configured for a run that is not both timed and random; it was dropped.
    SeedIgnored { seed: i64, timed: bool, random: bool },

    /// The configured seed will drive randomized test selection.
    SeedInUse { seed: i64 },

    /// A key no part of the harness reads.
    UnknownKey { key: String },
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResultCheckDisabled => {
                write!(f, "checkResults=true, recordResults=false: turning off checkResults")
            }
            Self::SeedIgnored {
                seed,
                timed,
                random,
            } => write!(
                f,
                "randomSeed={} set with timedTest={}, randomTest={}: turning off randomSeed",
                seed, timed, random
            ),
            Self::SeedInUse { seed } => write!(f, "using base random seed: {}", seed),
            Self::UnknownKey { key } => write!(f, "unrecognized setting '{}'", key),
        }
    }
}

/// A single non-fatal finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(kind: DiagnosticKind) -> Self {
        Self::new(Severity::Warning, kind)
    }

    pub fn info(kind: DiagnosticKind) -> Self {
        Self::new(Severity::Info, kind)
    }

    fn new(severity: Severity, kind: DiagnosticKind) -> Self {
        let message = kind.to_string();
        Self {
            severity,
            kind,
            message,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    /// Write this diagnostic to the tracing subscriber.
    pub fn emit(&self) {
        match self.severity {
            Severity::Warning => warn!(kind = ?self.kind, "{}", self.message),
            Severity::Info => info!("{}", self.message),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Info => "info",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", label, self.message)
    }
}
