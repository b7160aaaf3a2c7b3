//! Dataset CSV input and output.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Rows sampled when inferring column types.
const INFER_SCHEMA_ROWS: usize = 100;

/// Reads a dataset with a header row into a `DataFrame`.
pub fn read_dataset_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|error| IngestError::CsvRead {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?
        .finish()
        .map_err(|error| IngestError::CsvRead {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read dataset"
    );
    Ok(df)
}

/// Writes `df` as CSV with a header row. Nulls are written as empty cells.
pub fn write_dataset_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| IngestError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let mut file = File::create(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|error| IngestError::CsvWrite {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
    info!(path = %path.display(), rows = df.height(), "wrote dataset");
    Ok(())
}
