//! Run execution: drives the external profiler once per requested run.

use crate::config::HarnessConfig;
use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Hardware counters requested from the profiler. The set is fixed so that
/// per-run files stay comparable across batches.
pub const EVENTS: [&str; 9] = [
    "cycles:u",
    "cycles:k",
    "instructions:u",
    "branch-misses",
    "L1-dcache-load-misses:u",
    "LLC-loads:u",
    "LLC-stores:u",
    "LLC-load-misses:u",
    "LLC-store-misses:u",
];

/// One profiled invocation of the target.
///
/// Implementations must leave the output file behind even when the child
/// fails, so that a damaged run surfaces as a parse failure at collection
/// time instead of the batch silently shrinking. Tests substitute a stub
/// that writes canned csv.
pub trait Profiler {
    /// Profile `target generations` with `input` on stdin, writing the
    /// measurement stream to `output`.
    fn profile(&self, target: &str, generations: u32, input: &Path, output: &Path) -> Result<()>;
}

/// `perf stat` with the fixed event set in csv mode.
///
/// The target's own stdout is discarded; perf writes its measurements to
/// stderr, which is redirected into the per-run file. Arguments are passed
/// as a vector, never through a shell.
pub struct PerfStat;

impl Profiler for PerfStat {
    fn profile(&self, target: &str, generations: u32, input: &Path, output: &Path) -> Result<()> {
        // Created before the spawn so the file exists even if perf is
        // missing entirely.
        let measurements = File::create(output)?;
        let stdin = File::open(input)?;

        let mut cmd = Command::new("perf");
        cmd.arg("stat");
        for event in EVENTS {
            cmd.args(["-e", event]);
        }
        cmd.arg("-x,");
        cmd.arg(target);
        cmd.arg(generations.to_string());
        cmd.stdin(Stdio::from(stdin));
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::from(measurements));

        let status = cmd
            .status()
            .map_err(|e| Error::Process(format!("failed to launch perf: {e}")))?;
        if !status.success() {
            return Err(Error::Process(format!("perf stat exited with {status}")));
        }
        Ok(())
    }
}

/// Execute `cfg.runs` profiled runs, one at a time, each writing
/// `run_<i>.csv` under `cfg.output_dir`. Returns the file paths in run
/// order.
///
/// A run whose child could not be launched or exited non-zero is reported
/// on stderr and the batch continues; its output file still exists and is
/// dealt with at collection time.
pub fn execute_runs(profiler: &dyn Profiler, cfg: &HarnessConfig) -> Result<Vec<PathBuf>> {
    if cfg.runs < 1 {
        return Err(Error::Config(format!(
            "run count must be at least 1, got {}",
            cfg.runs
        )));
    }

    fs::create_dir_all(&cfg.output_dir)?;

    let target = resolve_target(&cfg.target, Path::new("."));

    println!(
        "Collecting metrics for `{} {} < {}`",
        target,
        cfg.generations,
        cfg.input_file.display()
    );
    println!(
        "{} runs, writing output to '{}'\n",
        cfg.runs,
        cfg.output_dir.display()
    );

    let mut files = Vec::with_capacity(cfg.runs as usize);
    for i in 1..=cfg.runs {
        println!("Run {i}...");
        let output = cfg.output_dir.join(format!("run_{i}.csv"));
        if let Err(e) = profiler.profile(&target, cfg.generations, &cfg.input_file, &output) {
            eprintln!("WARN: run {i} failed: {e}");
        }
        files.push(output);
    }

    println!("\nDone.\n");
    Ok(files)
}

/// A bare name that resolves to a file in `search_dir` is launched as
/// `./<name>`, so the invocation never depends on search-path resolution.
fn resolve_target(target: &str, search_dir: &Path) -> String {
    let bare_name = Path::new(target).file_name() == Some(OsStr::new(target));
    if bare_name && search_dir.join(target).exists() {
        format!("./{target}")
    } else {
        target.to_string()
    }
}
