//! Run plan invariants
//!
//! Auto-corrections, termination mode, host rotation under concurrency,
//! percentile parsing, plugin identity resolution and fatal parse errors.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use perf_harness::{
    ConfigError, ConfigResolver, DiagnosticKind, PluginFamily, Resolution, RunPlan, SamplerKind,
    SettingsStore, TerminationMode,
};

fn resolve(pairs: &[(&str, &str)]) -> Resolution {
    let store = SettingsStore::from_pairs(pairs.iter().copied());
    ConfigResolver::new().resolve(&store).unwrap()
}

fn plan(pairs: &[(&str, &str)]) -> RunPlan {
    resolve(pairs).into_plan()
}

// === Auto-corrections ===

#[test]
fn test_check_results_requires_record_results() {
    let downgraded = resolve(&[("checkResults", "true"), ("recordResults", "false")]);
    assert!(!downgraded.plan.check_results());
    assert!(downgraded
        .warnings()
        .any(|d| d.kind == DiagnosticKind::ResultCheckDisabled));

    let kept = resolve(&[("checkResults", "true"), ("recordResults", "true")]);
    assert!(kept.plan.check_results());
    assert!(!kept.has_warnings());
}

#[test]
fn test_seed_requires_timed_and_random() {
    let cases = [
        ("0", "false", false),
        ("0", "true", false),
        ("60", "false", false),
        ("60", "true", true),
    ];

    for (test_time, random, kept) in cases {
        let resolution = resolve(&[
            ("randomSeed", "987654321"),
            ("testTime", test_time),
            ("isRandomTest", random),
        ]);
        if kept {
            assert_eq!(resolution.plan.seed(), Some(987654321), "{test_time}/{random}");
            assert!(!resolution.has_warnings());
        } else {
            assert_eq!(resolution.plan.seed(), None, "{test_time}/{random}");
            assert!(resolution.warnings().any(|d| matches!(
                d.kind,
                DiagnosticKind::SeedIgnored { seed: 987654321, .. }
            )));
        }
    }
}

#[test]
fn test_seeded_rng_is_reproducible() {
    use rand::Rng;

    let pairs = [("randomSeed", "7"), ("testTime", "10"), ("isRandomTest", "true")];
    let mut a = plan(&pairs).seeded_rng().unwrap();
    let mut b = plan(&pairs).seeded_rng().unwrap();

    let draws_a: Vec<u32> = (0..16).map(|_| a.gen()).collect();
    let draws_b: Vec<u32> = (0..16).map(|_| b.gen()).collect();
    assert_eq!(draws_a, draws_b);
}

// === Termination mode ===

#[test]
fn test_timed_iff_positive_test_time() {
    for seconds in [-3600i64, -1, 0, 1, 2, 3600] {
        let raw = seconds.to_string();
        let resolved = plan(&[("testTime", raw.as_str())]);
        let expected = if seconds > 0 {
            TerminationMode::Timed
        } else {
            TerminationMode::Counted
        };
        assert_eq!(resolved.termination(), expected, "testTime={seconds}");
        let expected_nanos = if seconds > 0 { seconds as u64 * 1_000_000_000 } else { 0 };
        assert_eq!(resolved.test_duration_nanos(), expected_nanos);
    }
}

// === Host rotation ===

#[test]
fn test_round_robin_order() {
    let plan = plan(&[("host", "h1 h2 h3")]);
    let seen: Vec<String> = (0..4).map(|_| plan.next_host().to_string()).collect();
    assert_eq!(seen, vec!["h1", "h2", "h3", "h1"]);
}

#[test]
fn test_round_robin_under_concurrency() {
    let plan = Arc::new(plan(&[("host", "h1 h2 h3"), ("numThreads", "6")]));
    let workers = plan.num_workers() as usize;
    let calls = 300;

    let handles: Vec<_> = (0..workers)
        .map(|i| {
            let plan = Arc::clone(&plan);
            thread::Builder::new()
                .name(RunPlan::worker_thread_name(i))
                .spawn(move || {
                    (0..calls)
                        .map(|_| plan.next_host().to_string())
                        .collect::<Vec<_>>()
                })
                .unwrap()
        })
        .collect();

    let mut per_host: HashMap<String, usize> = HashMap::new();
    for handle in handles {
        for host in handle.join().expect("worker panicked") {
            *per_host.entry(host).or_default() += 1;
        }
    }

    assert_eq!(plan.host_rotation().cursor(), workers * calls);
    assert_eq!(per_host.len(), 3);
    assert!(per_host.values().all(|&count| count == workers * calls / 3));
}

// === Percentiles ===

#[test]
fn test_percentile_parsing() {
    assert_eq!(
        plan(&[("reportPercentileDuration", "50,90,99")]).report_percentiles(),
        Some(&[50u8, 90, 99][..])
    );
    assert_eq!(
        plan(&[("reportPercentileDuration", "50 90\t99")]).report_percentiles(),
        Some(&[50u8, 90, 99][..])
    );

    let absent = plan(&[]);
    assert_eq!(absent.report_percentiles(), None);
    assert!(!absent.has_report_percentiles());

    let empty = plan(&[("reportPercentileDuration", "")]);
    assert_eq!(empty.report_percentiles(), None);
}

// === Plugin identities ===

#[test]
fn test_sampler_identity_resolution() {
    assert_eq!(
        plan(&[("testType", "URI")]).sampler().id().as_str(),
        "perf.sampler.UriSampler"
    );
    assert_eq!(
        plan(&[("testType", "bogus")]).sampler().id().as_str(),
        "perf.sampler.XccSampler"
    );
    assert_eq!(
        plan(&[("samplerClass", "ReplaySampler")]).sampler().id().as_str(),
        "perf.sampler.ReplaySampler"
    );
    assert_eq!(
        plan(&[("samplerClass", "UriSampler")]).sampler(),
        &SamplerKind::Uri
    );
}

#[test]
fn test_test_list_identity_resolution() {
    assert_eq!(
        plan(&[]).test_list().id().as_str(),
        "perf.testlist.XmlFileTestList"
    );
    assert_eq!(
        plan(&[("testListClass", "com.acme.CsvList")]).test_list().id().as_str(),
        "com.acme.CsvList"
    );
}

// === Fatal errors ===

#[test]
fn test_malformed_port_is_fatal() {
    let store = SettingsStore::from_pairs([("port", "abc")]);
    match ConfigResolver::new().resolve(&store) {
        Err(ConfigError::Parse { key, value, .. }) => {
            assert_eq!(key, "port");
            assert_eq!(value, "abc");
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_malformed_numbers_name_their_key() {
    for key in ["numThreads", "readSize", "testTime", "thinkMillis", "randomSeed"] {
        let store = SettingsStore::from_pairs([(key, "lots")]);
        let err = ConfigResolver::new().resolve(&store).unwrap_err();
        assert_eq!(err.key(), Some(key));
    }
}
