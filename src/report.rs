//! Aggregate table output: csv file plus a stdout rendering.

use crate::error::Result;
use crate::stats::AggregateRecord;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Serialize the aggregate table to `output_dir/file_name`, creating the
/// directory if needed and overwriting any previous file.
///
/// The header row is derived from [`AggregateRecord`]'s fields:
/// `metric,avg,median,sd,min,max`. NaN standard deviations are written as
/// the literal `NaN`.
pub fn write_aggregates(
    table: &BTreeMap<String, AggregateRecord>,
    output_dir: &Path,
    file_name: &str,
) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    let mut writer = csv::Writer::from_path(output_dir.join(file_name))?;
    for record in table.values() {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Print the aggregate table as an aligned text table.
pub fn print_aggregates(table: &BTreeMap<String, AggregateRecord>) {
    let width = table
        .keys()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max("metric".len());

    println!(
        "{:<width$}  {:>18} {:>15} {:>18} {:>15} {:>15}",
        "metric", "avg", "median", "sd", "min", "max"
    );
    for r in table.values() {
        println!(
            "{:<width$}  {:>18.2} {:>15.0} {:>18.2} {:>15} {:>15}",
            r.metric, r.avg, r.median, r.sd, r.min, r.max
        );
    }
}
