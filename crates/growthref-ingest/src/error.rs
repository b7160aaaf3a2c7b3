use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("column '{column}' not found in dataset")]
    MissingColumn { column: String },

    #[error("output column '{column}' already exists in dataset")]
    OutputColumnExists { column: String },

    #[error("failed to read CSV {path}: {message}")]
    CsvRead { path: PathBuf, message: String },

    #[error("failed to write CSV {path}: {message}")]
    CsvWrite { path: PathBuf, message: String },

    #[error("io error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
