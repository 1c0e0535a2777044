//! Settings snapshot to run plan.

use perf_plugins::{ReporterKind, SamplerKind, TestListKind, TestType};
use std::path::PathBuf;
use tracing::debug;

use super::parse::FieldReader;
use super::{defaults, keys, validate};
use crate::diagnostics::Diagnostic;
use crate::error::ConfigError;
use crate::plan::{
    Credentials, HostRotation, Protocol, RandomnessMode, RunPlan, TerminationMode,
    WorkPartitioning, NANOS_PER_SECOND,
};
use crate::settings::SettingsStore;

/// A resolved plan plus everything that was corrected along the way.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub plan: RunPlan,
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    /// Log every diagnostic through `tracing`.
    pub fn emit_diagnostics(&self) {
        for diagnostic in &self.diagnostics {
            diagnostic.emit();
        }
    }

    pub fn into_plan(self) -> RunPlan {
        self.plan
    }
}

/// Turns a settings snapshot into a validated [`RunPlan`].
///
/// Resolution is a single pass: every field is read (or defaulted) and
/// parsed, failing on the first value that does not parse; then the
/// cross-field checks correct any contradictions and report them as
/// diagnostics.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    warn_unknown_keys: bool,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self {
            warn_unknown_keys: true,
        }
    }
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report keys outside the recognized set (default: on).
    pub fn warn_unknown_keys(mut self, enabled: bool) -> Self {
        self.warn_unknown_keys = enabled;
        self
    }

    pub fn resolve(&self, store: &SettingsStore) -> Result<Resolution, ConfigError> {
        let fields = FieldReader::new(store);

        let host_list = fields.hosts(keys::HOST, defaults::HOST);
        let hosts = HostRotation::new(host_list).ok_or_else(|| {
            ConfigError::out_of_range(keys::HOST, fields.raw(keys::HOST).unwrap_or(""), "no hosts")
        })?;

        let test_time_seconds: i64 = fields.number(keys::TEST_TIME, defaults::TEST_TIME)?;
        let termination = TerminationMode::from_test_time(test_time_seconds);
        if termination == TerminationMode::Timed {
            let fits = u64::try_from(test_time_seconds)
                .ok()
                .and_then(|secs| secs.checked_mul(NANOS_PER_SECOND))
                .is_some();
            if !fits {
                return Err(ConfigError::out_of_range(
                    keys::TEST_TIME,
                    &test_time_seconds.to_string(),
                    "duration overflows a nanosecond counter",
                ));
            }
        }

        let test_type = TestType::parse(&fields.string(keys::TEST_TYPE, defaults::TEST_TYPE));
        let sampler = match fields.plugin::<SamplerKind>(keys::SAMPLER_CLASS)? {
            Some(sampler) => sampler,
            None => test_type.default_sampler(),
        };
        let reporter = fields
            .plugin::<ReporterKind>(keys::REPORTER)?
            .unwrap_or_default();
        let test_list = fields
            .plugin::<TestListKind>(keys::TEST_LIST_CLASS)?
            .unwrap_or_default();

        let mut plan = RunPlan {
            protocol: Protocol::parse(&fields.string(keys::PROTOCOL, defaults::PROTOCOL)),
            hosts,
            port: fields.number(keys::PORT, defaults::PORT)?,
            credentials: Credentials {
                user: fields.string(keys::USER, defaults::USER),
                password: fields.string(keys::PASSWORD, defaults::PASSWORD),
            },
            input_path: fields
                .optional_string(keys::INPUT_PATH)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            output_path: PathBuf::from(fields.string(keys::OUTPUT_PATH, defaults::OUTPUT_PATH)),
            num_workers: fields.positive(keys::NUM_THREADS, defaults::NUM_THREADS)?,
            work_partitioning: WorkPartitioning::from_shared(
                fields.boolean(keys::SHARED, defaults::SHARED)?,
            ),
            termination,
            test_time_seconds,
            randomness: RandomnessMode::from_flag(
                fields.boolean(keys::IS_RANDOM_TEST, defaults::IS_RANDOM_TEST)?,
            ),
            random_seed: fields.number(keys::RANDOM_SEED, defaults::DISABLED_SEED)?,
            record_results: fields.boolean_any(
                &[keys::RECORD_RESULTS, keys::FORCE_RESULTS],
                defaults::RECORD_RESULTS,
            )?,
            check_results: fields.boolean(keys::CHECK_RESULTS, defaults::CHECK_RESULTS)?,
            report_time: fields.boolean(keys::REPORT_TIME, defaults::REPORT_TIME)?,
            report_standard_deviation: fields.boolean(
                keys::REPORT_STANDARD_DEVIATION,
                defaults::REPORT_STANDARD_DEVIATION,
            )?,
            report_percentiles: fields.percentiles(keys::REPORT_PERCENTILE_DURATION)?,
            think_millis: fields.number(keys::THINK_MILLIS, defaults::THINK_MILLIS)?,
            read_size: fields.positive(keys::READ_SIZE, defaults::READ_SIZE)?,
            test_type,
            sampler,
            reporter,
            test_list,
            element_selector: fields.optional_string(keys::ELEMENT_QNAME),
        };

        let mut diagnostics = validate::reconcile(&mut plan);
        if self.warn_unknown_keys {
            diagnostics.extend(validate::unknown_keys(store));
        }

        debug!(
            plan = %plan,
            diagnostics = diagnostics.len(),
            "resolved run plan"
        );

        Ok(Resolution { plan, diagnostics })
    }
}
