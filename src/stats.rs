//! Descriptive statistics over collected counter samples.

use crate::collect::SampleSet;
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary statistics for one hardware counter across a batch of runs.
///
/// Field order doubles as the csv column order.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateRecord {
    pub metric: String,
    pub avg: f64,
    pub median: f64,
    pub sd: f64,
    pub min: u64,
    pub max: u64,
}

/// Reduce every counter's sample list to its summary statistics.
///
/// The result iterates in counter-name order, covering every counter of the
/// input exactly once.
pub fn aggregate(samples: &SampleSet) -> BTreeMap<String, AggregateRecord> {
    let mut out = BTreeMap::new();
    for (metric, values) in samples {
        out.insert(
            metric.clone(),
            AggregateRecord {
                metric: metric.clone(),
                avg: avg(values),
                median: median(values),
                sd: sd(values),
                min: values.iter().copied().min().unwrap_or(0),
                max: values.iter().copied().max().unwrap_or(0),
            },
        );
    }
    out
}

fn avg(values: &[u64]) -> f64 {
    values.iter().sum::<u64>() as f64 / values.len() as f64
}

/// Upper median: a sorted copy indexed at `len / 2`. For even-length lists
/// this selects the greater of the two middle elements, never their
/// average.
fn median(values: &[u64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted[sorted.len() / 2] as f64
}

/// Bessel-corrected sample standard deviation. A single sample has no
/// defined spread; the result is NaN in that case rather than a division
/// fault.
fn sd(values: &[u64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let mean = avg(values);
    let var = values
        .iter()
        .map(|&x| (x as f64 - mean).powi(2))
        .sum::<f64>()
        / (values.len() - 1) as f64;
    var.sqrt()
}
