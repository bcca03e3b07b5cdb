use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Invalid invocation parameters, reported before any side effect.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Malformed or unreadable run-output file. Fatal for the whole batch:
    /// dropping a file would bias every affected counter's sample list
    /// without signaling it.
    #[error("parse error in {}: {detail}", .file.display())]
    Parse { file: PathBuf, detail: String },

    /// A subprocess could not be launched or exited non-zero.
    #[error("process failed: {0}")]
    Process(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
