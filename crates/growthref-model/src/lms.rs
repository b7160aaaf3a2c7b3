//! LMS reference cells and the lookup capability the calculator consumes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::{Indicator, Sex};

/// First month covered by the 5-19 year reference. Month 60 belongs to the
/// WHO Child Growth Standards and is excluded.
pub const AGE_MIN_MONTHS: u16 = 61;

/// Last month covered by the reference (19 years 0 months).
pub const AGE_MAX_MONTHS: u16 = 228;

/// Rounds a fractional age to the integer month grid of the reference.
///
/// Ties round away from zero (100.5 -> 101). Returns `None` for non-finite
/// ages and for ages that round outside 61..=228.
pub fn age_key(age_months: f64) -> Option<u16> {
    if !age_months.is_finite() {
        return None;
    }
    let rounded = age_months.round();
    if rounded < f64::from(AGE_MIN_MONTHS) || rounded > f64::from(AGE_MAX_MONTHS) {
        return None;
    }
    Some(rounded as u16)
}

/// Composite key of a reference cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReferenceKey {
    pub sex: Sex,
    pub age_months: u16,
}

impl ReferenceKey {
    pub fn new(sex: Sex, age_months: u16) -> Self {
        Self { sex, age_months }
    }

    /// True when the key falls inside the supported age window.
    pub fn in_window(&self) -> bool {
        (AGE_MIN_MONTHS..=AGE_MAX_MONTHS).contains(&self.age_months)
    }
}

/// Box-Cox power (L), median (M) and coefficient of variation (S) of one
/// reference cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LmsEntry {
    pub l: f64,
    pub m: f64,
    pub s: f64,
}

impl LmsEntry {
    pub fn new(l: f64, m: f64, s: f64) -> Self {
        Self { l, m, s }
    }

    /// A cell can only be used when all parameters are finite and the
    /// median and coefficient of variation are strictly positive.
    pub fn is_usable(&self) -> bool {
        self.l.is_finite()
            && self.m.is_finite()
            && self.s.is_finite()
            && self.m > 0.0
            && self.s > 0.0
    }
}

/// Read-only source of LMS cells, injected into the calculator.
pub trait LmsSource {
    fn lms(&self, indicator: Indicator, key: ReferenceKey) -> Option<LmsEntry>;
}

impl LmsSource for BTreeMap<(Indicator, ReferenceKey), LmsEntry> {
    fn lms(&self, indicator: Indicator, key: ReferenceKey) -> Option<LmsEntry> {
        self.get(&(indicator, key)).copied()
    }
}

impl<S: LmsSource + ?Sized> LmsSource for &S {
    fn lms(&self, indicator: Indicator, key: ReferenceKey) -> Option<LmsEntry> {
        (**self).lms(indicator, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_key_window() {
        assert_eq!(age_key(60.0), None);
        assert_eq!(age_key(60.4), None);
        assert_eq!(age_key(60.5), Some(61));
        assert_eq!(age_key(61.0), Some(61));
        assert_eq!(age_key(228.0), Some(228));
        assert_eq!(age_key(228.49), Some(228));
        assert_eq!(age_key(228.5), None);
        assert_eq!(age_key(229.0), None);
    }

    #[test]
    fn test_age_key_ties_round_away_from_zero() {
        assert_eq!(age_key(100.5), Some(101));
        assert_eq!(age_key(100.49), Some(100));
    }

    #[test]
    fn test_age_key_non_finite() {
        assert_eq!(age_key(f64::NAN), None);
        assert_eq!(age_key(f64::INFINITY), None);
    }

    #[test]
    fn test_lms_usable() {
        assert!(LmsEntry::new(-1.0, 16.0, 0.1).is_usable());
        assert!(LmsEntry::new(0.0, 16.0, 0.1).is_usable());
        assert!(!LmsEntry::new(1.0, 0.0, 0.1).is_usable());
        assert!(!LmsEntry::new(1.0, -3.0, 0.1).is_usable());
        assert!(!LmsEntry::new(1.0, 120.0, 0.0).is_usable());
        assert!(!LmsEntry::new(f64::NAN, 120.0, 0.04).is_usable());
    }

    #[test]
    fn test_map_source() {
        let key = ReferenceKey::new(Sex::Female, 100);
        let mut map = BTreeMap::new();
        map.insert(
            (Indicator::HeightForAge, key),
            LmsEntry::new(1.0, 130.0, 0.04),
        );
        assert!(map.lms(Indicator::HeightForAge, key).is_some());
        assert!(map.lms(Indicator::BmiForAge, key).is_none());
    }
}
