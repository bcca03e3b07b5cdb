//! Sample collection: folds a directory of per-run files into per-counter
//! sample lists.

use crate::error::{Error, Result};
use crate::record::{self, parse_run_file};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Counter name -> one numeric sample per run that reported the counter.
///
/// A counter absent from some runs simply has a shorter list; lists are
/// never padded.
pub type SampleSet = BTreeMap<String, Vec<u64>>;

/// Read every regular file directly under `source_dir` and merge the parsed
/// per-run values into per-counter sample lists.
///
/// Sub-directories are skipped, so an `aggregates/` directory written by an
/// earlier invocation is never re-ingested as run data. A single corrupt
/// file aborts the whole collection with the underlying parse error.
pub fn collect_samples(source_dir: &Path) -> Result<SampleSet> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(source_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        paths.push(entry.path());
    }
    // Enumeration order is filesystem-dependent; sort so failures reproduce.
    paths.sort();

    let mut samples = SampleSet::new();
    for path in &paths {
        let run = parse_run_file(path)?;
        for (metric, raw) in run.iter() {
            let value = record::numeric_value(raw).ok_or_else(|| Error::Parse {
                file: path.clone(),
                detail: format!("counter {metric}: non-numeric value {raw:?}"),
            })?;
            samples.entry(metric.to_string()).or_default().push(value);
        }
    }

    Ok(samples)
}
