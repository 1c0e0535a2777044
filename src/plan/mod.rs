//! Resolved run plan
//!
//! The typed, validated parameters the harness bootstrap uses to build its
//! workers, samplers, reporter and test list. A plan is produced once by
//! [`ConfigResolver`](crate::config::ConfigResolver) and never changes
//! afterwards; the host rotation cursor is the only shared mutable state.

mod hosts;
mod summary;

pub use hosts::HostRotation;

use perf_plugins::{ReporterKind, SamplerKind, TestListKind, TestType};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const NANOS_PER_SECOND: u64 = 1000 * 1000 * 1000;

/// Worker threads are named `sampler-<index>`.
pub const THREAD_NAME_PREFIX: &str = "sampler-";

/// URI scheme used by network samplers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
    Other(String),
}

impl Protocol {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("http") {
            Self::Http
        } else if trimmed.eq_ignore_ascii_case("https") {
            Self::Https
        } else {
            Self::Other(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_secure(&self) -> bool {
        matches!(self, Self::Https)
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Protocol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// How workers divide the test list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkPartitioning {
    /// All workers draw from one common queue.
    Shared,
    /// Each worker runs the whole list, starting at its own offset.
    Partitioned,
}

impl WorkPartitioning {
    pub fn from_shared(shared: bool) -> Self {
        if shared {
            Self::Shared
        } else {
            Self::Partitioned
        }
    }
}

/// When a run stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationMode {
    /// Stop when the test list is exhausted.
    Counted,
    /// Stop when the configured wall-clock duration elapses.
    Timed,
}

impl TerminationMode {
    /// Timed iff the duration is strictly positive; zero and negative values count.
    pub fn from_test_time(seconds: i64) -> Self {
        if seconds > 0 {
            Self::Timed
        } else {
            Self::Counted
        }
    }
}

/// Whether test selection is randomized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomnessMode {
    Disabled,
    Enabled,
}

impl RandomnessMode {
    pub fn from_flag(random: bool) -> Self {
        if random {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

/// Login used by samplers.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Immutable execution parameters for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunPlan {
    pub(crate) protocol: Protocol,
    pub(crate) hosts: HostRotation,
    pub(crate) port: u16,
    pub(crate) credentials: Credentials,
    pub(crate) input_path: Option<PathBuf>,
    pub(crate) output_path: PathBuf,
    pub(crate) num_workers: u32,
    pub(crate) work_partitioning: WorkPartitioning,
    pub(crate) termination: TerminationMode,
    pub(crate) test_time_seconds: i64,
    pub(crate) randomness: RandomnessMode,
    pub(crate) random_seed: i64,
    pub(crate) record_results: bool,
    pub(crate) check_results: bool,
    pub(crate) report_time: bool,
    pub(crate) report_standard_deviation: bool,
    pub(crate) report_percentiles: Option<Vec<u8>>,
    pub(crate) think_millis: u64,
    pub(crate) read_size: u32,
    pub(crate) test_type: TestType,
    pub(crate) sampler: SamplerKind,
    pub(crate) reporter: ReporterKind,
    pub(crate) test_list: TestListKind,
    pub(crate) element_selector: Option<String>,
}

impl RunPlan {
    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    /// Next target host, round-robin across all configured hosts.
    ///
    /// Safe to call from any number of worker threads.
    pub fn next_host(&self) -> &str {
        self.hosts.next_host()
    }

    pub fn host_rotation(&self) -> &HostRotation {
        &self.hosts
    }

    pub fn hosts(&self) -> &[String] {
        self.hosts.hosts()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn user(&self) -> &str {
        &self.credentials.user
    }

    pub fn password(&self) -> &str {
        &self.credentials.password
    }

    pub fn input_path(&self) -> Option<&Path> {
        self.input_path.as_deref()
    }

    /// Report destination; empty means the current directory.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn num_workers(&self) -> u32 {
        self.num_workers
    }

    pub fn work_partitioning(&self) -> WorkPartitioning {
        self.work_partitioning
    }

    pub fn is_shared(&self) -> bool {
        self.work_partitioning == WorkPartitioning::Shared
    }

    pub fn termination(&self) -> TerminationMode {
        self.termination
    }

    pub fn is_timed(&self) -> bool {
        self.termination == TerminationMode::Timed
    }

    /// Configured test time in seconds, as given.
    pub fn test_time_seconds(&self) -> i64 {
        self.test_time_seconds
    }

    /// Run duration in nanoseconds; zero for counted runs.
    pub fn test_duration_nanos(&self) -> u64 {
        match self.test_duration() {
            Some(duration) => duration.as_secs() * NANOS_PER_SECOND,
            None => 0,
        }
    }

    pub fn test_duration(&self) -> Option<Duration> {
        match self.termination {
            TerminationMode::Timed => Some(Duration::from_secs(self.test_time_seconds.unsigned_abs())),
            TerminationMode::Counted => None,
        }
    }

    pub fn randomness(&self) -> RandomnessMode {
        self.randomness
    }

    pub fn is_random(&self) -> bool {
        self.randomness == RandomnessMode::Enabled
    }

    /// Raw seed value; zero means disabled.
    pub fn random_seed(&self) -> i64 {
        self.random_seed
    }

    /// The seed, if one survived validation.
    pub fn seed(&self) -> Option<i64> {
        (self.random_seed != crate::config::defaults::DISABLED_SEED).then_some(self.random_seed)
    }

    /// Deterministic generator for randomized test selection.
    pub fn seeded_rng(&self) -> Option<StdRng> {
        // Negative seeds keep their bit pattern.
        self.seed().map(|seed| StdRng::seed_from_u64(seed as u64))
    }

    pub fn record_results(&self) -> bool {
        self.record_results
    }

    pub fn check_results(&self) -> bool {
        self.check_results
    }

    pub fn report_time(&self) -> bool {
        self.report_time
    }

    pub fn report_standard_deviation(&self) -> bool {
        self.report_standard_deviation
    }

    pub fn report_percentiles(&self) -> Option<&[u8]> {
        self.report_percentiles.as_deref()
    }

    pub fn has_report_percentiles(&self) -> bool {
        self.report_percentiles
            .as_ref()
            .is_some_and(|p| !p.is_empty())
    }

    pub fn think_millis(&self) -> u64 {
        self.think_millis
    }

    pub fn think_time(&self) -> Duration {
        Duration::from_millis(self.think_millis)
    }

    pub fn read_size(&self) -> u32 {
        self.read_size
    }

    pub fn test_type(&self) -> &TestType {
        &self.test_type
    }

    pub fn sampler(&self) -> &SamplerKind {
        &self.sampler
    }

    pub fn reporter(&self) -> &ReporterKind {
        &self.reporter
    }

    pub fn test_list(&self) -> &TestListKind {
        &self.test_list
    }

    pub fn element_selector(&self) -> Option<&str> {
        self.element_selector.as_deref()
    }

    /// Thread name for worker `index`.
    pub fn worker_thread_name(index: usize) -> String {
        format!("{}{}", THREAD_NAME_PREFIX, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_parse() {
        assert_eq!(Protocol::parse("HTTP"), Protocol::Http);
        assert_eq!(Protocol::parse("https"), Protocol::Https);
        assert!(Protocol::parse("https").is_secure());
        assert_eq!(Protocol::parse("xdbc"), Protocol::Other("xdbc".to_string()));
        assert_eq!(Protocol::parse("xdbc").as_str(), "xdbc");
    }

    #[test]
    fn test_termination_from_test_time() {
        assert_eq!(TerminationMode::from_test_time(1), TerminationMode::Timed);
        assert_eq!(TerminationMode::from_test_time(0), TerminationMode::Counted);
        assert_eq!(TerminationMode::from_test_time(-5), TerminationMode::Counted);
    }

    #[test]
    fn test_partitioning_from_shared() {
        assert_eq!(WorkPartitioning::from_shared(true), WorkPartitioning::Shared);
        assert_eq!(
            WorkPartitioning::from_shared(false),
            WorkPartitioning::Partitioned
        );
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials {
            user: "admin".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{:?}", creds);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_worker_thread_name() {
        assert_eq!(RunPlan::worker_thread_name(3), "sampler-3");
    }
}
