//! Run plan audit record with full provenance
//!
//! Captures the resolved plan together with the sources it was merged from
//! and the diagnostics raised while resolving it, so a finished run can be
//! traced back to its exact configuration.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;

use crate::config::Resolution;
use crate::diagnostics::Diagnostic;
use crate::settings::{SettingsStore, SourceRecord};

/// Schema version for the audit record
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "perf-harness/run_plan@1";

/// Plan fields whose values never leave the process in clear text.
const SECRET_FIELDS: &[&str] = &["password"];

/// Placeholder written over secret values.
const REDACTED: &str = "[REDACTED]";

/// Audit record of one resolution
#[derive(Debug, Clone, Serialize)]
pub struct PlanAudit {
    pub schema_version: u32,
    pub schema_id: String,

    /// When the plan was resolved
    pub created_at: DateTime<Utc>,

    /// Contributing sources in precedence order
    pub sources: Vec<SourceRecord>,

    /// The resolved plan, secrets redacted
    pub plan: Value,

    /// Everything corrected or flagged during resolution
    pub diagnostics: Vec<Diagnostic>,

    /// Redacted key paths
    pub redactions: Vec<String>,
}

impl PlanAudit {
    pub fn new(store: &SettingsStore, resolution: &Resolution) -> Result<Self, serde_json::Error> {
        let mut plan = serde_json::to_value(&resolution.plan)?;
        let redactions = redact_secrets(&mut plan);

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            sources: store.sources().to_vec(),
            plan,
            diagnostics: resolution.diagnostics.clone(),
            redactions,
        })
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write to file
    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("JSON serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)
    }
}

/// Redact secret plan fields in place, returning their dotted paths.
pub fn redact_secrets(value: &mut Value) -> Vec<String> {
    let mut redactions = Vec::new();
    redact_at(value, &mut Vec::new(), &mut redactions);
    redactions
}

fn redact_at(value: &mut Value, path: &mut Vec<String>, redactions: &mut Vec<String>) {
    match value {
        Value::Object(fields) => {
            for (name, field) in fields.iter_mut() {
                path.push(name.clone());
                if is_secret_field(name) && is_scalar(field) {
                    *field = Value::String(REDACTED.to_string());
                    redactions.push(path.join("."));
                } else {
                    redact_at(field, path, redactions);
                }
                path.pop();
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter_mut().enumerate() {
                path.push(index.to_string());
                redact_at(item, path, redactions);
                path.pop();
            }
        }
        _ => {}
    }
}

fn is_secret_field(name: &str) -> bool {
    SECRET_FIELDS.iter().any(|secret| name.eq_ignore_ascii_case(secret))
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}
