//! Published WHO AnthroPlus values used to check a set of loaded tables.

use growthref_core::compute_zscore;
use growthref_model::{Indicator, LmsSource, UndefinedReason, ZScore};

/// Largest accepted difference from a published z-score.
pub const TOLERANCE: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expectation {
    /// Published value, within [`TOLERANCE`].
    Value(f64),
    /// Any defined z-score.
    Defined,
    Undefined(UndefinedReason),
}

impl Expectation {
    pub fn matches(self, actual: ZScore) -> bool {
        match (self, actual) {
            (Expectation::Value(expected), ZScore::Value(v)) => (v - expected).abs() <= TOLERANCE,
            (Expectation::Defined, ZScore::Value(_)) => true,
            (Expectation::Undefined(expected), ZScore::Undefined(reason)) => expected == reason,
            _ => false,
        }
    }
}

impl std::fmt::Display for Expectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expectation::Value(v) => write!(f, "{v:.2} ± {TOLERANCE}"),
            Expectation::Defined => f.write_str("defined"),
            Expectation::Undefined(reason) => write!(f, "undefined ({})", reason.code()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationCase {
    pub label: &'static str,
    pub indicator: Indicator,
    pub value: f64,
    pub age_months: f64,
    pub sex: i64,
    pub expected: Expectation,
}

const fn case(
    label: &'static str,
    indicator: Indicator,
    value: f64,
    age_months: f64,
    sex: i64,
    expected: Expectation,
) -> ValidationCase {
    ValidationCase {
        label,
        indicator,
        value,
        age_months,
        sex,
        expected,
    }
}

pub const VALIDATION_CASES: [ValidationCase; 9] = [
    case(
        "boy 100 mo, BMI 30",
        Indicator::BmiForAge,
        30.0,
        100.0,
        1,
        Expectation::Value(5.03),
    ),
    case(
        "boy 100 mo, height 100 cm",
        Indicator::HeightForAge,
        100.0,
        100.0,
        1,
        Expectation::Value(-5.04),
    ),
    case(
        "girl 110 mo, height 90 cm",
        Indicator::HeightForAge,
        90.0,
        110.0,
        2,
        Expectation::Value(-7.06),
    ),
    case(
        "boy 61 mo, first month",
        Indicator::BmiForAge,
        16.0,
        61.0,
        1,
        Expectation::Defined,
    ),
    case(
        "girl 228 mo, last month",
        Indicator::HeightForAge,
        160.0,
        228.0,
        2,
        Expectation::Defined,
    ),
    case(
        "boy 60 mo, below window",
        Indicator::BmiForAge,
        16.0,
        60.0,
        1,
        Expectation::Undefined(UndefinedReason::OutOfRange),
    ),
    case(
        "girl 229 mo, above window",
        Indicator::HeightForAge,
        160.0,
        229.0,
        2,
        Expectation::Undefined(UndefinedReason::OutOfRange),
    ),
    case(
        "boy 100 mo, BMI -1",
        Indicator::BmiForAge,
        -1.0,
        100.0,
        1,
        Expectation::Undefined(UndefinedReason::InvalidMeasurement),
    ),
    case(
        "sex code 3",
        Indicator::BmiForAge,
        16.0,
        100.0,
        3,
        Expectation::Undefined(UndefinedReason::InvalidSex),
    ),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaseOutcome {
    pub case: ValidationCase,
    pub actual: ZScore,
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        self.case.expected.matches(self.actual)
    }
}

pub fn run_cases<S>(source: &S, cases: &[ValidationCase]) -> Vec<CaseOutcome>
where
    S: LmsSource + ?Sized,
{
    cases
        .iter()
        .map(|case| CaseOutcome {
            case: *case,
            actual: compute_zscore(
                source,
                Some(case.value),
                Some(case.age_months),
                Some(case.sex),
                case.indicator,
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_expectations_use_the_tolerance() {
        let expected = Expectation::Value(5.03);
        assert!(expected.matches(ZScore::Value(5.03)));
        assert!(expected.matches(ZScore::Value(5.05)));
        assert!(!expected.matches(ZScore::Value(5.06)));
        assert!(!expected.matches(ZScore::Undefined(UndefinedReason::ReferenceMiss)));
    }

    #[test]
    fn undefined_expectations_compare_reasons() {
        let expected = Expectation::Undefined(UndefinedReason::OutOfRange);
        assert!(expected.matches(ZScore::Undefined(UndefinedReason::OutOfRange)));
        assert!(!expected.matches(ZScore::Undefined(UndefinedReason::InvalidSex)));
        assert!(!expected.matches(ZScore::Value(0.0)));
    }
}
