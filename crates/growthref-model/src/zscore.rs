//! Z-score results and the reasons a result can be undefined.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Why a measurement has no z-score.
///
/// These are expected outcomes for individual rows, not failures of the
/// run: a batch keeps going and reports them per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedReason {
    /// Measurement, age or sex is absent (or NaN).
    MissingInput,
    /// Measurement is zero or negative.
    InvalidMeasurement,
    /// Age rounds outside 61..=228 months.
    OutOfRange,
    /// Sex code is neither 1 nor 2.
    InvalidSex,
    /// No usable reference row for a valid sex/age.
    ReferenceMiss,
    /// The LMS parameters produce no finite z-score for this measurement.
    NonFiniteResult,
}

impl UndefinedReason {
    pub const ALL: [UndefinedReason; 6] = [
        UndefinedReason::MissingInput,
        UndefinedReason::InvalidMeasurement,
        UndefinedReason::OutOfRange,
        UndefinedReason::InvalidSex,
        UndefinedReason::ReferenceMiss,
        UndefinedReason::NonFiniteResult,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            UndefinedReason::MissingInput => "missing_input",
            UndefinedReason::InvalidMeasurement => "invalid_measurement",
            UndefinedReason::OutOfRange => "out_of_range",
            UndefinedReason::InvalidSex => "invalid_sex",
            UndefinedReason::ReferenceMiss => "reference_miss",
            UndefinedReason::NonFiniteResult => "non_finite_result",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            UndefinedReason::MissingInput => "measurement, age or sex is missing",
            UndefinedReason::InvalidMeasurement => "measurement must be greater than zero",
            UndefinedReason::OutOfRange => "age is outside 61-228 months",
            UndefinedReason::InvalidSex => "sex must be 1 (male) or 2 (female)",
            UndefinedReason::ReferenceMiss => "no usable reference row",
            UndefinedReason::NonFiniteResult => "reference parameters give no finite z-score",
        }
    }
}

impl fmt::Display for UndefinedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Outcome of a z-score calculation.
///
/// `Value` always holds a finite number rounded to two decimals. An
/// undefined result is never represented as NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZScore {
    Value(f64),
    Undefined(UndefinedReason),
}

impl ZScore {
    pub fn value(&self) -> Option<f64> {
        match self {
            ZScore::Value(v) => Some(*v),
            ZScore::Undefined(_) => None,
        }
    }

    pub fn reason(&self) -> Option<UndefinedReason> {
        match self {
            ZScore::Value(_) => None,
            ZScore::Undefined(reason) => Some(*reason),
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, ZScore::Value(_))
    }

    pub fn is_undefined(&self) -> bool {
        !self.is_defined()
    }
}

impl fmt::Display for ZScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZScore::Value(v) => write!(f, "{v:.2}"),
            ZScore::Undefined(reason) => write!(f, "undefined ({reason})"),
        }
    }
}

/// Serialises as a plain number, or `null` when undefined.
impl Serialize for ZScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ZScore::Value(v) => serializer.serialize_f64(*v),
            ZScore::Undefined(_) => serializer.serialize_none(),
        }
    }
}
