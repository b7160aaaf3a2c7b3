use serde::{Deserialize, Serialize};

use crate::enums::Indicator;

/// One raw measurement row as it arrives from a dataset.
///
/// Fields stay optional because source data is allowed to be incomplete;
/// the calculator turns gaps into an undefined result instead of an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// BMI in kg/m² or height in cm, matching `indicator`.
    pub value: Option<f64>,
    pub age_months: Option<f64>,
    /// Raw sex code; only 1 and 2 are valid.
    pub sex: Option<i64>,
    pub indicator: Indicator,
}

impl Measurement {
    pub fn new(value: f64, age_months: f64, sex: i64, indicator: Indicator) -> Self {
        Self {
            value: Some(value),
            age_months: Some(age_months),
            sex: Some(sex),
            indicator,
        }
    }

    pub fn bmi_for_age(bmi: f64, age_months: f64, sex: i64) -> Self {
        Self::new(bmi, age_months, sex, Indicator::BmiForAge)
    }

    pub fn height_for_age(height_cm: f64, age_months: f64, sex: i64) -> Self {
        Self::new(height_cm, age_months, sex, Indicator::HeightForAge)
    }
}
