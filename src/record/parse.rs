use crate::error::{Error, Result};
use crate::record::row::RunResult;
use std::path::Path;

/// Parse one run's profiler output file into a per-counter value map.
///
/// Expected columns (comma-separated):
/// value,unit,counter,...
///
/// Example:
/// 669099,,cycles:u,...
///
/// The first row is preamble and is discarded unconditionally; of the
/// remaining rows only columns 0 (raw value, possibly a sentinel) and 2
/// (counter name) are consumed. Trailing columns vary between profiler
/// versions, hence the flexible reader.
pub fn parse_run_file(path: &Path) -> Result<RunResult> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::Parse {
            file: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    let mut out = RunResult::new();
    let mut rows = 0usize;
    for (idx, record) in reader.records().enumerate() {
        let row = idx + 1;
        let record = record.map_err(|e| Error::Parse {
            file: path.to_path_buf(),
            detail: format!("row {row}: {e}"),
        })?;
        rows += 1;

        // Row 1 is header/preamble, discarded unconditionally.
        if idx == 0 {
            continue;
        }

        if record.len() < 3 {
            return Err(Error::Parse {
                file: path.to_path_buf(),
                detail: format!("row {row}: expected at least 3 columns, got {}", record.len()),
            });
        }

        out.insert_raw(&record[2], &record[0]);
    }

    // An empty file has no preamble row to skip; a run that failed to
    // launch leaves exactly such a file behind.
    if rows == 0 {
        return Err(Error::Parse {
            file: path.to_path_buf(),
            detail: "file contains no rows".to_string(),
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::row::{NOT_COUNTED, NOT_SUPPORTED};
    use std::fs;

    fn write_run(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn parses_values_and_counters() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_run(
            dir.path(),
            "run_1.csv",
            "# started on Wed Aug 6\n\
             669099,,cycles:u,669099,100.00\n\
             12345,,cycles:k,12345,100.00\n\
             98,,branch-misses,98,100.00\n",
        );

        let run = parse_run_file(&path).unwrap();
        assert_eq!(run.len(), 3);
        assert_eq!(run.get("cycles:u"), Some("669099"));
        assert_eq!(run.get("cycles:k"), Some("12345"));
        assert_eq!(run.get("branch-misses"), Some("98"));
    }

    #[test]
    fn first_row_is_always_discarded() {
        let dir = tempfile::tempdir().unwrap();
        // Even a well-formed first row is preamble.
        let path = write_run(
            dir.path(),
            "run_1.csv",
            "111,,cycles:u,111,100.00\n\
             222,,cycles:k,222,100.00\n",
        );

        let run = parse_run_file(&path).unwrap();
        assert_eq!(run.len(), 1);
        assert_eq!(run.get("cycles:u"), None);
        assert_eq!(run.get("cycles:k"), Some("222"));
    }

    #[test]
    fn sentinels_pass_through_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_run(
            dir.path(),
            "run_1.csv",
            "# preamble\n\
             <not supported>,,LLC-load-misses:u,0,100.00\n\
             <not counted>,,LLC-stores:u,0,100.00\n",
        );

        let run = parse_run_file(&path).unwrap();
        assert_eq!(run.get("LLC-load-misses:u"), Some(NOT_SUPPORTED));
        assert_eq!(run.get("LLC-stores:u"), Some(NOT_COUNTED));
    }

    #[test]
    fn duplicate_counter_keeps_last_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_run(
            dir.path(),
            "run_1.csv",
            "# preamble\n\
             100,,cycles:u,100,50.00\n\
             200,,cycles:u,200,50.00\n",
        );

        let run = parse_run_file(&path).unwrap();
        assert_eq!(run.get("cycles:u"), Some("200"));
    }

    #[test]
    fn short_row_names_file_and_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_run(
            dir.path(),
            "run_2.csv",
            "# preamble\n\
             669099,,cycles:u,669099,100.00\n\
             garbage\n",
        );

        let err = parse_run_file(&path).unwrap_err();
        match err {
            Error::Parse { file, detail } => {
                assert_eq!(file, path);
                assert!(detail.contains("row 3"), "detail: {detail}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn empty_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_run(dir.path(), "run_3.csv", "");

        let err = parse_run_file(&path).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_run_file(&dir.path().join("no_such_run.csv")).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn preamble_only_file_yields_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_run(dir.path(), "run_4.csv", "# started, then nothing\n");

        let run = parse_run_file(&path).unwrap();
        assert!(run.is_empty());
    }
}
