//! LMS z-score transform with the WHO restricted approach for BMI-for-age.
//!
//! For a measurement `X` and reference cell `(L, M, S)`:
//!
//! ```text
//! z = ((X / M)^L - 1) / (L * S)    when L != 0
//! z = ln(X / M) / S                when L == 0
//! ```
//!
//! Beyond ±3 SD the LMS tail is not trusted for weight-based indicators, so
//! BMI-for-age replaces the value with a linear extrapolation anchored at
//! the 2 SD and 3 SD cutoffs of the same cell. Height-for-age keeps the
//! plain LMS value at any magnitude.

use growthref_model::{Indicator, LmsEntry, LmsSource, UndefinedReason, ZScore};
use tracing::trace;

use crate::lookup::lookup;

/// |z| above which BMI-for-age is extrapolated linearly.
pub const EXTREME_Z: f64 = 3.0;

/// Decimal places of a reported z-score.
pub const ZSCORE_DECIMALS: i32 = 2;

/// Plain LMS z-score, no correction or rounding.
pub fn lms_zscore(x: f64, lms: &LmsEntry) -> f64 {
    let LmsEntry { l, m, s } = *lms;
    if l == 0.0 {
        (x / m).ln() / s
    } else {
        ((x / m).powf(l) - 1.0) / (l * s)
    }
}

/// Measurement value at `k` standard deviations from the median.
pub fn sd_cutoff(lms: &LmsEntry, k: f64) -> f64 {
    let LmsEntry { l, m, s } = *lms;
    if l == 0.0 {
        m * (s * k).exp()
    } else {
        m * (1.0 + l * s * k).powf(1.0 / l)
    }
}

/// Applies the restricted approach to a raw z-score.
///
/// Values within ±3 pass through. Above 3 the distance past the 3 SD cutoff
/// is measured in units of the 2-3 SD interval, and symmetrically below -3.
/// The result is continuous at the ±3 boundary.
pub fn restrict_extreme(x: f64, lms: &LmsEntry, z: f64) -> f64 {
    if z > EXTREME_Z {
        let sd3 = sd_cutoff(lms, 3.0);
        let sd2 = sd_cutoff(lms, 2.0);
        EXTREME_Z + (x - sd3) / (sd3 - sd2)
    } else if z < -EXTREME_Z {
        let sd3 = sd_cutoff(lms, -3.0);
        let sd2 = sd_cutoff(lms, -2.0);
        -EXTREME_Z + (x - sd3) / (sd2 - sd3)
    } else {
        z
    }
}

/// Rounds half away from zero to `decimals` places. Never returns `-0.0`.
///
/// Ties are judged on the binary value after scaling, not on the decimal
/// literal: `1.005` and `1.015` both scale to just below the tie and round
/// down to `1.00` and `1.01`. Exactly representable ties such as `0.125`
/// round away from zero.
pub fn round_half_away(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Unrounded z-score for a validated measurement, including the BMI
/// correction.
pub fn raw_zscore(x: f64, lms: &LmsEntry, indicator: Indicator) -> f64 {
    let z = lms_zscore(x, lms);
    if indicator.applies_extreme_correction() && z.abs() > EXTREME_Z {
        restrict_extreme(x, lms, z)
    } else {
        z
    }
}

/// Computes the z-score of `value` against an already resolved cell.
///
/// `lms` is the outcome of [`lookup`]; a failed lookup passes its reason
/// through unchanged.
pub fn compute(
    value: Option<f64>,
    lms: Result<LmsEntry, UndefinedReason>,
    indicator: Indicator,
) -> ZScore {
    let x = match value {
        Some(x) if !x.is_nan() => x,
        _ => return ZScore::Undefined(UndefinedReason::MissingInput),
    };
    if x <= 0.0 {
        return ZScore::Undefined(UndefinedReason::InvalidMeasurement);
    }
    let lms = match lms {
        Ok(lms) if lms.is_usable() => lms,
        Ok(_) => return ZScore::Undefined(UndefinedReason::ReferenceMiss),
        Err(reason) => return ZScore::Undefined(reason),
    };

    let z = raw_zscore(x, &lms, indicator);
    if !z.is_finite() {
        trace!(indicator = indicator.code(), "LMS transform produced a non-finite value");
        return ZScore::Undefined(UndefinedReason::NonFiniteResult);
    }
    ZScore::Value(round_half_away(z, ZSCORE_DECIMALS))
}

/// Looks up the reference cell and computes the z-score in one step.
///
/// Missing inputs are reported before a non-positive measurement, which is
/// reported before any lookup failure.
pub fn compute_zscore<S>(
    source: &S,
    value: Option<f64>,
    age_months: Option<f64>,
    sex: Option<i64>,
    indicator: Indicator,
) -> ZScore
where
    S: LmsSource + ?Sized,
{
    let missing = |v: Option<f64>| v.is_none_or(f64::is_nan);
    if missing(value) || missing(age_months) || sex.is_none() {
        return ZScore::Undefined(UndefinedReason::MissingInput);
    }
    if value.is_some_and(|x| x <= 0.0) {
        return ZScore::Undefined(UndefinedReason::InvalidMeasurement);
    }
    compute(value, lookup(source, sex, age_months, indicator), indicator)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BMI: LmsEntry = LmsEntry {
        l: -1.0,
        m: 16.0,
        s: 0.1,
    };

    const LOG_NORMAL: LmsEntry = LmsEntry {
        l: 0.0,
        m: 20.0,
        s: 0.1,
    };

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn lms_zscore_at_median_is_zero() {
        assert!(close(lms_zscore(16.0, &BMI), 0.0));
        assert!(close(lms_zscore(20.0, &LOG_NORMAL), 0.0));
    }

    #[test]
    fn lms_zscore_box_cox_and_log_branches() {
        // (1 - 16/20) / 0.1
        assert!(close(lms_zscore(20.0, &BMI), 2.0));
        assert!(close(lms_zscore(20.0 * 0.1f64.exp(), &LOG_NORMAL), 1.0));
    }

    #[test]
    fn sd_cutoffs_invert_the_transform() {
        for k in [-3.0, -2.0, 2.0, 3.0] {
            assert!(close(lms_zscore(sd_cutoff(&BMI, k), &BMI), k));
            assert!(close(lms_zscore(sd_cutoff(&LOG_NORMAL, k), &LOG_NORMAL), k));
        }
        assert!(close(sd_cutoff(&BMI, 3.0), 16.0 / 0.7));
        assert!(close(sd_cutoff(&BMI, -2.0), 16.0 / 1.2));
    }

    #[test]
    fn restrict_extreme_upper_and_lower() {
        // SD3pos = 22.857.., SD2pos = 20 -> 3 + 7.142857 / 2.857143
        assert!(close(restrict_extreme(30.0, &BMI, 4.67), 5.5));
        // SD3neg = 12.3077, SD2neg = 13.3333 -> -3 - 2.307692 / 1.025641
        assert!(close(restrict_extreme(10.0, &BMI, -6.0), -5.25));
        assert!(close(restrict_extreme(18.0, &BMI, 1.1), 1.1));
    }

    #[test]
    fn restrict_extreme_is_continuous_at_three() {
        let at_sd3 = sd_cutoff(&BMI, 3.0);
        assert!(close(restrict_extreme(at_sd3, &BMI, 3.0 + 1e-12), 3.0));
        let at_sd3_neg = sd_cutoff(&BMI, -3.0);
        assert!(close(restrict_extreme(at_sd3_neg, &BMI, -3.0 - 1e-12), -3.0));
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_half_away(1.234, 2), 1.23);
        assert_eq!(round_half_away(-1.236, 2), -1.24);
        assert_eq!(round_half_away(2.5, 0), 3.0);
        assert_eq!(round_half_away(-2.5, 0), -3.0);
        assert_eq!(round_half_away(-0.001, 2), 0.0);
        assert!(round_half_away(-0.001, 2).is_sign_positive());
    }

    #[test]
    fn decimal_ties_follow_the_binary_value() {
        // 1.005 * 100 = 100.49999999999999, 1.015 * 100 = 101.49999999999999
        assert_eq!(round_half_away(1.005, 2), 1.0);
        assert_eq!(round_half_away(1.015, 2), 1.01);
        assert_eq!(round_half_away(-1.005, 2), -1.0);
        // Exactly representable ties still go away from zero.
        assert_eq!(round_half_away(0.125, 2), 0.13);
        assert_eq!(round_half_away(-0.125, 2), -0.13);
    }

    #[test]
    fn compute_preconditions() {
        assert_eq!(
            compute(None, Ok(BMI), Indicator::BmiForAge),
            ZScore::Undefined(UndefinedReason::MissingInput)
        );
        assert_eq!(
            compute(Some(f64::NAN), Ok(BMI), Indicator::BmiForAge),
            ZScore::Undefined(UndefinedReason::MissingInput)
        );
        assert_eq!(
            compute(Some(0.0), Ok(BMI), Indicator::BmiForAge),
            ZScore::Undefined(UndefinedReason::InvalidMeasurement)
        );
        assert_eq!(
            compute(
                Some(18.0),
                Err(UndefinedReason::OutOfRange),
                Indicator::BmiForAge
            ),
            ZScore::Undefined(UndefinedReason::OutOfRange)
        );
        assert_eq!(
            compute(
                Some(18.0),
                Ok(LmsEntry::new(1.0, -5.0, 0.1)),
                Indicator::BmiForAge
            ),
            ZScore::Undefined(UndefinedReason::ReferenceMiss)
        );
    }

    #[test]
    fn compute_flags_non_finite_results() {
        // (10 / 1)^400 overflows, so the plain LMS value is infinite.
        let steep = LmsEntry::new(400.0, 1.0, 0.1);
        assert_eq!(
            compute(Some(10.0), Ok(steep), Indicator::HeightForAge),
            ZScore::Undefined(UndefinedReason::NonFiniteResult)
        );
        // BMI replaces the infinite tail with the finite linear extrapolation.
        assert!(compute(Some(10.0), Ok(steep), Indicator::BmiForAge).is_defined());
    }
}
