use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod collect;
mod config;
mod error;
mod prebuild;
mod record;
mod report;
mod runner;
mod stats;

use config::HarnessConfig;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "perf-harness")]
#[command(about = "Hardware counter benchmarking harness", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Profile a target repeatedly and aggregate the collected counters.
    Run {
        /// Binary or script to measure.
        #[arg(short = 'p', long, default_value = HarnessConfig::DEFAULT_TARGET)]
        target: String,

        /// Number of generations the target simulates.
        #[arg(short, long, default_value_t = HarnessConfig::DEFAULT_GENERATIONS)]
        generations: u32,

        /// Input file fed to the target on stdin.
        #[arg(short, long, default_value = HarnessConfig::DEFAULT_INPUT)]
        input: PathBuf,

        /// Number of profiled runs.
        #[arg(short, long, default_value_t = HarnessConfig::DEFAULT_RUNS)]
        runs: u32,

        /// Directory receiving the per-run csv files.
        #[arg(short = 'o', long, default_value = HarnessConfig::DEFAULT_OUTPUT_DIR)]
        out: PathBuf,

        /// Make target to clean-rebuild before measuring.
        #[arg(long)]
        build: Option<String>,
    },

    /// Aggregate an existing directory of run files without profiling.
    Aggregate {
        /// Directory containing per-run csv files.
        #[arg(long)]
        source: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Run {
            target,
            generations,
            input,
            runs,
            out,
            build,
        } => {
            // 1) Optional pre-flight rebuild of the target.
            if let Some(make_target) = &build {
                prebuild::rebuild(make_target)?;
            }

            let cfg = HarnessConfig {
                target,
                generations,
                input_file: input,
                runs,
                output_dir: out,
            };

            // 2) Execute the profiled runs.
            runner::execute_runs(&runner::PerfStat, &cfg)?;

            // 3) Collect, aggregate, persist, print.
            aggregate_directory(&cfg.output_dir)?;
        }
        Commands::Aggregate { source } => {
            aggregate_directory(&source)?;
        }
    }

    Ok(())
}

/// Collect the run files under `dir`, reduce them to per-counter summary
/// statistics, write the table to `dir/aggregates/aggregates.csv` and print
/// it.
fn aggregate_directory(dir: &Path) -> Result<()> {
    let samples = collect::collect_samples(dir)?;
    let table = stats::aggregate(&samples);

    let out_dir = dir.join("aggregates");
    report::write_aggregates(&table, &out_dir, "aggregates.csv")?;
    report::print_aggregates(&table);
    println!("\nWrote {}", out_dir.join("aggregates.csv").display());

    Ok(())
}
