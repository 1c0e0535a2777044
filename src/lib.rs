//! Perf Harness - run configuration for a multi-threaded load tester
//!
//! This crate turns layered key/value settings into the validated run plan
//! a load-testing harness needs to start its workers: how many there are,
//! how they share the test list, when the run stops, which hosts they hit
//! and which sampler, reporter and test list plugins to load.

pub mod audit;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod plan;
pub mod settings;

pub use audit::PlanAudit;
pub use config::{ConfigResolver, Resolution};
pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use error::ConfigError;
pub use perf_plugins::{PluginFamily, PluginId, ReporterKind, SamplerKind, TestListKind, TestType};
pub use plan::{
    HostRotation, Protocol, RandomnessMode, RunPlan, TerminationMode, WorkPartitioning,
};
pub use settings::{SettingsSource, SettingsStore};
