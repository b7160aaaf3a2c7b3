//! Appends z-score columns to a measurement table.
//!
//! Each row is scored independently. Undefined results become nulls in the
//! output column; the reason is kept only in the per-indicator tally.

use growthref_core::{UndefinedTally, score_all};
use growthref_model::{Indicator, LmsSource, Measurement, ZScore};
use polars::prelude::*;
use tracing::{info, warn};

use crate::error::{IngestError, Result};
use crate::polars_utils::{numeric_column_f64, sex_code_column};

/// Input and output column names for [`derive_zscore_columns`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZScoreColumns {
    pub bmi: String,
    pub height: String,
    pub age: String,
    pub sex: String,
    pub bmi_output: String,
    pub height_output: String,
}

impl ZScoreColumns {
    pub fn new(
        bmi: impl Into<String>,
        height: impl Into<String>,
        age: impl Into<String>,
        sex: impl Into<String>,
    ) -> Self {
        Self {
            bmi: bmi.into(),
            height: height.into(),
            age: age.into(),
            sex: sex.into(),
            bmi_output: Indicator::BmiForAge.column_name().to_string(),
            height_output: Indicator::HeightForAge.column_name().to_string(),
        }
    }

    pub fn with_output_names(
        mut self,
        bmi_output: impl Into<String>,
        height_output: impl Into<String>,
    ) -> Self {
        self.bmi_output = bmi_output.into();
        self.height_output = height_output.into();
        self
    }

    fn inputs(&self) -> [&str; 4] {
        [&self.bmi, &self.height, &self.age, &self.sex]
    }
}

/// Result of [`derive_zscore_columns`].
#[derive(Debug, Clone)]
pub struct DerivedFrame {
    /// Copy of the input with the two z-score columns appended.
    pub frame: DataFrame,
    pub bmi: UndefinedTally,
    pub height: UndefinedTally,
}

fn to_column_values(scores: &[ZScore]) -> Vec<Option<f64>> {
    scores.iter().map(ZScore::value).collect()
}

fn score_column<S>(
    source: &S,
    values: &[Option<f64>],
    ages: &[Option<f64>],
    sexes: &[Option<i64>],
    indicator: Indicator,
) -> Vec<ZScore>
where
    S: LmsSource + ?Sized,
{
    let measurements: Vec<Measurement> = values
        .iter()
        .zip(ages)
        .zip(sexes)
        .map(|((value, age), sex)| Measurement {
            value: *value,
            age_months: *age,
            sex: *sex,
            indicator,
        })
        .collect();
    score_all(source, &measurements)
}

/// Scores every row of `df` for both indicators.
///
/// The input frame is left untouched. Output columns are `Float64` with nulls
/// for undefined results. Fails if an input column is absent or an output
/// name collides with an existing column.
pub fn derive_zscore_columns<S>(
    df: &DataFrame,
    columns: &ZScoreColumns,
    source: &S,
) -> Result<DerivedFrame>
where
    S: LmsSource + ?Sized,
{
    for name in columns.inputs() {
        if df.get_column_index(name).is_none() {
            return Err(IngestError::MissingColumn {
                column: name.to_string(),
            });
        }
    }
    for name in [&columns.bmi_output, &columns.height_output] {
        if df.get_column_index(name).is_some() {
            return Err(IngestError::OutputColumnExists {
                column: name.clone(),
            });
        }
    }

    let ages = numeric_column_f64(df, &columns.age)?;
    let sexes = sex_code_column(df, &columns.sex)?;
    let bmi_values = numeric_column_f64(df, &columns.bmi)?;
    let height_values = numeric_column_f64(df, &columns.height)?;

    let bmi_scores = score_column(source, &bmi_values, &ages, &sexes, Indicator::BmiForAge);
    let height_scores = score_column(
        source,
        &height_values,
        &ages,
        &sexes,
        Indicator::HeightForAge,
    );

    let bmi: UndefinedTally = bmi_scores.iter().collect();
    let height: UndefinedTally = height_scores.iter().collect();
    if df.height() > 0 && bmi.defined == 0 && height.defined == 0 {
        warn!(
            rows = df.height(),
            "no row produced a z-score; check column names and reference coverage"
        );
    }

    let mut frame = df.clone();
    frame.with_column(Series::new(
        columns.bmi_output.as_str().into(),
        to_column_values(&bmi_scores),
    ))?;
    frame.with_column(Series::new(
        columns.height_output.as_str().into(),
        to_column_values(&height_scores),
    ))?;

    info!(
        rows = frame.height(),
        bmi_defined = bmi.defined,
        height_defined = height.defined,
        "derived z-score columns"
    );
    Ok(DerivedFrame {
        frame,
        bmi,
        height,
    })
}
