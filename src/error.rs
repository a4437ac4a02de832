//! Fatal error type for table access.
//!
//! Cell-level parse failures never surface here; they degrade to null inside
//! the cleaning rules. Only failures to read the input table or to write the
//! output table are reported as [`DataAccessError`].

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataAccessError {
    #[error("input file {path:?} does not exist")]
    MissingInput { path: PathBuf },

    #[error("failed to open input file {path:?}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("input file {path:?} is empty (no header row)")]
    EmptyInput { path: PathBuf },

    #[error("input file {path:?} is not a valid delimited table: {reason}")]
    MalformedTable { path: PathBuf, reason: String },

    #[error("failed to read row {row} of {path:?}")]
    ReadRow {
        path: PathBuf,
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("row {row} of {path:?} is not valid UTF-8")]
    Decode { path: PathBuf, row: usize },

    #[error("failed to create directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create output file {path:?}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output file {path:?}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to flush output file {path:?}")]
    FlushOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type DataAccessResult<T> = Result<T, DataAccessError>;
