//! Recognized settings keys.

pub const PROTOCOL: &str = "protocol";
pub const HOST: &str = "host";
pub const PORT: &str = "port";
pub const USER: &str = "user";
pub const PASSWORD: &str = "password";
pub const READ_SIZE: &str = "readSize";
pub const INPUT_PATH: &str = "inputPath";
pub const OUTPUT_PATH: &str = "outputPath";
pub const NUM_THREADS: &str = "numThreads";
pub const REPORT_TIME: &str = "reportTime";
pub const REPORT_PERCENTILE_DURATION: &str = "reportPercentileDuration";
pub const REPORT_STANDARD_DEVIATION: &str = "reportStandardDeviation";
pub const TEST_TIME: &str = "testTime";
pub const IS_RANDOM_TEST: &str = "isRandomTest";
pub const THINK_MILLIS: &str = "thinkMillis";
pub const RECORD_RESULTS: &str = "recordResults";
/// Legacy spelling of [`RECORD_RESULTS`], consulted only when it is absent.
pub const FORCE_RESULTS: &str = "forceResults";
pub const CHECK_RESULTS: &str = "checkResults";
pub const SHARED: &str = "shared";
pub const TEST_TYPE: &str = "testType";
pub const SAMPLER_CLASS: &str = "samplerClass";
pub const REPORTER: &str = "reporter";
pub const TEST_LIST_CLASS: &str = "testListClass";
pub const ELEMENT_QNAME: &str = "elementQName";
pub const RANDOM_SEED: &str = "randomSeed";

/// Every key the resolver reads.
pub const KNOWN_KEYS: &[&str] = &[
    PROTOCOL,
    HOST,
    PORT,
    USER,
    PASSWORD,
    READ_SIZE,
    INPUT_PATH,
    OUTPUT_PATH,
    NUM_THREADS,
    REPORT_TIME,
    REPORT_PERCENTILE_DURATION,
    REPORT_STANDARD_DEVIATION,
    TEST_TIME,
    IS_RANDOM_TEST,
    THINK_MILLIS,
    RECORD_RESULTS,
    FORCE_RESULTS,
    CHECK_RESULTS,
    SHARED,
    TEST_TYPE,
    SAMPLER_CLASS,
    REPORTER,
    TEST_LIST_CLASS,
    ELEMENT_QNAME,
    RANDOM_SEED,
];

pub fn is_known(key: &str) -> bool {
    KNOWN_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_known_keys_unique() {
        let unique: HashSet<_> = KNOWN_KEYS.iter().collect();
        assert_eq!(unique.len(), KNOWN_KEYS.len());
    }

    #[test]
    fn test_is_known_is_case_sensitive() {
        assert!(is_known("numThreads"));
        assert!(!is_known("numthreads"));
        assert!(is_known("forceResults"));
    }
}
