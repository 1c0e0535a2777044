//! Built-in defaults
//!
//! Values used when no source defines a key.

pub const PROTOCOL: &str = "http";
pub const HOST: &str = "localhost";
pub const PORT: u16 = 8003;
pub const USER: &str = "admin";
pub const PASSWORD: &str = "admin";

/// Sampler read buffer hint (32 KiB)
pub const READ_SIZE: u32 = 32 * 1024;

/// Empty output path means the current directory
pub const OUTPUT_PATH: &str = "";

pub const NUM_THREADS: u32 = 1;
pub const REPORT_TIME: bool = true;
pub const REPORT_STANDARD_DEVIATION: bool = false;

/// Seconds; zero keeps the run counted
pub const TEST_TIME: i64 = 0;

pub const IS_RANDOM_TEST: bool = false;
pub const THINK_MILLIS: u64 = 0;
pub const RECORD_RESULTS: bool = false;
pub const CHECK_RESULTS: bool = false;
pub const SHARED: bool = false;
pub const TEST_TYPE: &str = "XCC";

/// Seed value meaning "no fixed seed"
pub const DISABLED_SEED: i64 = 0;
