use std::path::PathBuf;

use growthref_core::UndefinedTally;
use growthref_model::{Indicator, LmsEntry};

/// What `batch` produced.
#[derive(Debug)]
pub struct BatchResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
    pub bmi: UndefinedTally,
    pub height: UndefinedTally,
}

/// A resolved reference row for `lookup`.
#[derive(Debug)]
pub struct LookupResult {
    pub indicator: Indicator,
    pub sex: i64,
    pub age_months: f64,
    pub lms: LmsEntry,
}
