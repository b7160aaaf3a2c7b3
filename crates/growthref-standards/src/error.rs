#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("missing required column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("invalid row {row} in {path}: {message}")]
    InvalidRow {
        path: PathBuf,
        row: usize,
        message: String,
    },

    #[error("duplicate reference row for sex {sex}, age {age_months} in {path}")]
    DuplicateKey {
        path: PathBuf,
        sex: u8,
        age_months: u16,
    },

    #[error("reference table {path} has no rows inside 61-228 months")]
    EmptyTable { path: PathBuf },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_row(path: impl Into<PathBuf>, row: usize, message: String) -> Self {
        Self::InvalidRow {
            path: path.into(),
            row,
            message,
        }
    }
}
