//! Tabular batch scoring over Polars data frames.
//!
//! Reads a measurement table, appends `zbmi` and `zhfa` columns scored
//! against an injected reference, and writes the result back out.

pub mod csv;
pub mod derive;
pub mod error;
pub mod polars_utils;

pub use csv::{read_dataset_csv, write_dataset_csv};
pub use derive::{DerivedFrame, ZScoreColumns, derive_zscore_columns};
pub use error::{IngestError, Result};
