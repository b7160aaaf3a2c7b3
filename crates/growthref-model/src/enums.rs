//! Type-safe enumerations for the WHO 2007 reference.
//!
//! The reference tables and input datasets code these concepts as integers
//! or short strings; the enums below are the only place those codes are
//! interpreted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Sex as coded in the WHO reference tables (1 = male, 2 = female).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Maps a numeric sex code to `Sex`. Only 1 and 2 are valid.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Sex::Male),
            2 => Some(Sex::Female),
            _ => None,
        }
    }

    /// Returns the numeric code used in the reference tables.
    pub fn code(&self) -> u8 {
        match self {
            Sex::Male => 1,
            Sex::Female => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ModelError;

    /// Accepts numeric codes as well as `male`/`female` and `m`/`f`
    /// (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "1" | "m" | "male" => Ok(Sex::Male),
            "2" | "f" | "female" => Ok(Sex::Female),
            _ => Err(ModelError::UnknownSex(s.to_string())),
        }
    }
}

/// Anthropometric indicator backed by one LMS reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// BMI-for-age, measurement in kg/m².
    BmiForAge,
    /// Height-for-age, measurement in cm.
    HeightForAge,
}

impl Indicator {
    pub const ALL: [Indicator; 2] = [Indicator::BmiForAge, Indicator::HeightForAge];

    /// Short code used on the command line and in the reference literature.
    pub fn code(&self) -> &'static str {
        match self {
            Indicator::BmiForAge => "bfa",
            Indicator::HeightForAge => "hfa",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Indicator::BmiForAge => "BMI-for-age",
            Indicator::HeightForAge => "Height-for-age",
        }
    }

    /// Default name of the derived z-score column.
    pub fn column_name(&self) -> &'static str {
        match self {
            Indicator::BmiForAge => "zbmi",
            Indicator::HeightForAge => "zhfa",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Indicator::BmiForAge => "kg/m²",
            Indicator::HeightForAge => "cm",
        }
    }

    /// Weight-based indicators use the restricted linear extrapolation
    /// beyond ±3 SD; height keeps the plain LMS value.
    pub fn applies_extreme_correction(&self) -> bool {
        matches!(self, Indicator::BmiForAge)
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Indicator {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "bfa" | "bmi_for_age" | "bmi" => Ok(Indicator::BmiForAge),
            "hfa" | "height_for_age" | "height" => Ok(Indicator::HeightForAge),
            _ => Err(ModelError::UnknownIndicator(s.to_string())),
        }
    }
}
