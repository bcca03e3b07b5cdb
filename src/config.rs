//! Harness configuration.
//!
//! Every entry point receives an explicit [`HarnessConfig`]; the defaults
//! live here as named constants instead of being scattered over call sites.

use std::path::PathBuf;

/// Parameters for one measurement batch.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Binary or script to measure.
    pub target: String,

    /// Number of generations the target simulates.
    pub generations: u32,

    /// Starting-configuration file fed to the target on stdin.
    pub input_file: PathBuf,

    /// Number of profiled runs. Must be at least 1.
    pub runs: u32,

    /// Directory receiving the per-run csv files. The aggregate table is
    /// written to an `aggregates/` sub-directory underneath it.
    pub output_dir: PathBuf,
}

impl HarnessConfig {
    pub const DEFAULT_TARGET: &'static str = "life-hash_table";
    pub const DEFAULT_GENERATIONS: u32 = 100;
    pub const DEFAULT_INPUT: &'static str = "f0.l";
    pub const DEFAULT_RUNS: u32 = 5;
    pub const DEFAULT_OUTPUT_DIR: &'static str = "measurements/perf/stats";
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            target: Self::DEFAULT_TARGET.to_string(),
            generations: Self::DEFAULT_GENERATIONS,
            input_file: PathBuf::from(Self::DEFAULT_INPUT),
            runs: Self::DEFAULT_RUNS,
            output_dir: PathBuf::from(Self::DEFAULT_OUTPUT_DIR),
        }
    }
}
