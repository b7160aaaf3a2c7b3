//! Output naming and machine-readable renderings.

use std::path::{Path, PathBuf};

use growthref_model::{Indicator, Measurement, UndefinedReason, ZScore};
use serde::Serialize;

/// `<dir>/<stem>_zscores.csv` next to `input`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    input.with_file_name(format!("{stem}_zscores.csv"))
}

/// Body of `score --json`. `zscore` is null exactly when `reason` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub indicator: Indicator,
    pub value: Option<f64>,
    pub age_months: Option<f64>,
    pub sex: Option<i64>,
    pub zscore: ZScore,
    pub reason: Option<UndefinedReason>,
}

impl ScoreReport {
    pub fn new(measurement: &Measurement, zscore: ZScore) -> Self {
        Self {
            indicator: measurement.indicator,
            value: measurement.value,
            age_months: measurement.age_months,
            sex: measurement.sex,
            zscore,
            reason: zscore.reason(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_sits_next_to_input() {
        assert_eq!(
            default_output_path(Path::new("data/cohort.csv")),
            PathBuf::from("data/cohort_zscores.csv")
        );
        assert_eq!(
            default_output_path(Path::new("cohort")),
            PathBuf::from("cohort_zscores.csv")
        );
    }
}
