//! Parsing for per-run profiler output files.

pub mod parse;
pub mod row;

pub use parse::parse_run_file;
pub use row::{NOT_COUNTED, NOT_SUPPORTED, RunResult, numeric_value};
