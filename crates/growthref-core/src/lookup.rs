//! Reference cell lookup for a raw (sex, age) pair.

use growthref_model::{
    Indicator, LmsEntry, LmsSource, ReferenceKey, Sex, UndefinedReason, age_key,
};
use tracing::trace;

/// Resolves the LMS cell for a sex code and fractional age.
///
/// The age is rounded half away from zero to the integer month grid; there
/// is no interpolation between months. The age window is checked before the
/// sex code. Entries with non-positive or non-finite parameters are treated
/// as absent.
pub fn lookup<S>(
    source: &S,
    sex: Option<i64>,
    age_months: Option<f64>,
    indicator: Indicator,
) -> Result<LmsEntry, UndefinedReason>
where
    S: LmsSource + ?Sized,
{
    let (Some(sex_code), Some(age)) = (sex, age_months) else {
        return Err(UndefinedReason::MissingInput);
    };
    if age.is_nan() {
        return Err(UndefinedReason::MissingInput);
    }
    let month = age_key(age).ok_or(UndefinedReason::OutOfRange)?;
    let sex = Sex::from_code(sex_code).ok_or(UndefinedReason::InvalidSex)?;
    let key = ReferenceKey::new(sex, month);

    match source.lms(indicator, key) {
        Some(entry) if entry.is_usable() => Ok(entry),
        Some(_) => {
            trace!(indicator = indicator.code(), sex = sex.code(), month, "unusable LMS row");
            Err(UndefinedReason::ReferenceMiss)
        }
        None => {
            trace!(indicator = indicator.code(), sex = sex.code(), month, "no LMS row");
            Err(UndefinedReason::ReferenceMiss)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn source() -> BTreeMap<(Indicator, ReferenceKey), LmsEntry> {
        let mut map = BTreeMap::new();
        for age in [61, 100, 101, 228] {
            map.insert(
                (Indicator::BmiForAge, ReferenceKey::new(Sex::Male, age)),
                LmsEntry::new(-1.0, 16.0, 0.1),
            );
        }
        map.insert(
            (Indicator::BmiForAge, ReferenceKey::new(Sex::Female, 100)),
            LmsEntry::new(-1.0, 0.0, 0.1),
        );
        map
    }

    #[test]
    fn rounds_age_to_nearest_month() {
        let src = source();
        assert!(lookup(&src, Some(1), Some(99.6), Indicator::BmiForAge).is_ok());
        assert!(lookup(&src, Some(1), Some(100.5), Indicator::BmiForAge).is_ok());
        assert_eq!(
            lookup(&src, Some(1), Some(102.2), Indicator::BmiForAge),
            Err(UndefinedReason::ReferenceMiss)
        );
    }

    #[test]
    fn window_edges() {
        let src = source();
        assert!(lookup(&src, Some(1), Some(61.0), Indicator::BmiForAge).is_ok());
        assert!(lookup(&src, Some(1), Some(228.0), Indicator::BmiForAge).is_ok());
        assert_eq!(
            lookup(&src, Some(1), Some(60.0), Indicator::BmiForAge),
            Err(UndefinedReason::OutOfRange)
        );
        assert_eq!(
            lookup(&src, Some(1), Some(229.0), Indicator::BmiForAge),
            Err(UndefinedReason::OutOfRange)
        );
    }

    #[test]
    fn invalid_and_missing_inputs() {
        let src = source();
        assert_eq!(
            lookup(&src, Some(0), Some(100.0), Indicator::BmiForAge),
            Err(UndefinedReason::InvalidSex)
        );
        assert_eq!(
            lookup(&src, None, Some(100.0), Indicator::BmiForAge),
            Err(UndefinedReason::MissingInput)
        );
        assert_eq!(
            lookup(&src, Some(1), None, Indicator::BmiForAge),
            Err(UndefinedReason::MissingInput)
        );
        assert_eq!(
            lookup(&src, Some(1), Some(f64::NAN), Indicator::BmiForAge),
            Err(UndefinedReason::MissingInput)
        );
    }

    #[test]
    fn age_window_is_checked_before_sex() {
        let src = source();
        assert_eq!(
            lookup(&src, Some(3), Some(30.0), Indicator::BmiForAge),
            Err(UndefinedReason::OutOfRange)
        );
        assert_eq!(
            lookup(&src, Some(3), Some(100.0), Indicator::BmiForAge),
            Err(UndefinedReason::InvalidSex)
        );
    }

    #[test]
    fn indicator_selects_table() {
        let src = source();
        assert_eq!(
            lookup(&src, Some(1), Some(100.0), Indicator::HeightForAge),
            Err(UndefinedReason::ReferenceMiss)
        );
    }

    #[test]
    fn unusable_row_is_a_miss() {
        let src = source();
        assert_eq!(
            lookup(&src, Some(2), Some(100.0), Indicator::BmiForAge),
            Err(UndefinedReason::ReferenceMiss)
        );
    }
}
