//! Test fixtures for settings sources
//!
//! - `bench.properties`: a complete properties-format run definition
//! - `overrides.toml`: operator overrides layered on top of it

use std::path::{Path, PathBuf};

/// Path to the baseline properties fixture
pub fn bench_properties_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/bench.properties")
}

/// Path to the TOML overrides fixture
pub fn overrides_toml_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/overrides.toml")
}
