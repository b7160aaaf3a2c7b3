#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use growthref_model::{
    AGE_MAX_MONTHS, AGE_MIN_MONTHS, Indicator, LmsEntry, LmsSource, ReferenceKey, Sex,
};
use serde::Serialize;

/// LMS cells of one indicator keyed by (sex, age in months).
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    indicator: Indicator,
    entries: BTreeMap<ReferenceKey, LmsEntry>,
}

/// Age span covered for one sex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SexCoverage {
    pub sex: Sex,
    pub rows: usize,
    pub min_age_months: u16,
    pub max_age_months: u16,
}

impl ReferenceTable {
    pub fn new(indicator: Indicator) -> Self {
        Self {
            indicator,
            entries: BTreeMap::new(),
        }
    }

    pub fn from_entries<I>(indicator: Indicator, entries: I) -> Self
    where
        I: IntoIterator<Item = (ReferenceKey, LmsEntry)>,
    {
        Self {
            indicator,
            entries: entries.into_iter().collect(),
        }
    }

    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    /// Inserts a cell, returning the previous one for the same key.
    pub fn insert(&mut self, key: ReferenceKey, entry: LmsEntry) -> Option<LmsEntry> {
        self.entries.insert(key, entry)
    }

    pub fn get(&self, key: ReferenceKey) -> Option<&LmsEntry> {
        self.entries.get(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn coverage(&self) -> Vec<SexCoverage> {
        [Sex::Male, Sex::Female]
            .into_iter()
            .filter_map(|sex| {
                let mut ages = self
                    .entries
                    .keys()
                    .filter(|key| key.sex == sex)
                    .map(|key| key.age_months);
                let first = ages.next()?;
                let (rows, last) = ages.fold((1usize, first), |(n, _), age| (n + 1, age));
                Some(SexCoverage {
                    sex,
                    rows,
                    min_age_months: first,
                    max_age_months: last,
                })
            })
            .collect()
    }

    /// Keys inside the supported window that have no row.
    pub fn missing_keys(&self) -> Vec<ReferenceKey> {
        [Sex::Male, Sex::Female]
            .into_iter()
            .flat_map(|sex| {
                (AGE_MIN_MONTHS..=AGE_MAX_MONTHS).map(move |age| ReferenceKey::new(sex, age))
            })
            .filter(|key| !self.entries.contains_key(key))
            .collect()
    }

    /// Keys whose parameters cannot produce a z-score (non-positive M or S).
    pub fn unusable_keys(&self) -> Vec<ReferenceKey> {
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.is_usable())
            .map(|(key, _)| *key)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceFile {
    pub indicator: Indicator,
    pub path: PathBuf,
    pub sha256: String,
}

/// Where a reference set was loaded from.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceProvenance {
    pub dir: PathBuf,
    pub files: Vec<SourceFile>,
}

/// The two LMS tables of the WHO 2007 reference.
#[derive(Debug, Clone)]
pub struct ReferenceSet {
    bmi_for_age: ReferenceTable,
    height_for_age: ReferenceTable,
    provenance: Option<ReferenceProvenance>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub indicator: Indicator,
    pub rows: usize,
    pub coverage: Vec<SexCoverage>,
    pub missing_keys: usize,
    pub unusable_keys: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferenceSummary {
    pub tables: Vec<TableSummary>,
    pub provenance: Option<ReferenceProvenance>,
}

impl ReferenceSet {
    pub fn new(bmi_for_age: ReferenceTable, height_for_age: ReferenceTable) -> Self {
        debug_assert_eq!(bmi_for_age.indicator(), Indicator::BmiForAge);
        debug_assert_eq!(height_for_age.indicator(), Indicator::HeightForAge);
        Self {
            bmi_for_age,
            height_for_age,
            provenance: None,
        }
    }

    #[must_use]
    pub fn with_provenance(mut self, provenance: ReferenceProvenance) -> Self {
        self.provenance = Some(provenance);
        self
    }

    pub fn table(&self, indicator: Indicator) -> &ReferenceTable {
        match indicator {
            Indicator::BmiForAge => &self.bmi_for_age,
            Indicator::HeightForAge => &self.height_for_age,
        }
    }

    pub fn provenance(&self) -> Option<&ReferenceProvenance> {
        self.provenance.as_ref()
    }

    pub fn summary(&self) -> ReferenceSummary {
        let tables = Indicator::ALL
            .into_iter()
            .map(|indicator| {
                let table = self.table(indicator);
                TableSummary {
                    indicator,
                    rows: table.len(),
                    coverage: table.coverage(),
                    missing_keys: table.missing_keys().len(),
                    unusable_keys: table.unusable_keys().len(),
                }
            })
            .collect();
        ReferenceSummary {
            tables,
            provenance: self.provenance.clone(),
        }
    }
}

impl LmsSource for ReferenceSet {
    fn lms(&self, indicator: Indicator, key: ReferenceKey) -> Option<LmsEntry> {
        self.table(indicator).get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_table(indicator: Indicator) -> ReferenceTable {
        ReferenceTable::from_entries(
            indicator,
            [
                (
                    ReferenceKey::new(Sex::Male, 61),
                    LmsEntry::new(1.0, 110.0, 0.04),
                ),
                (
                    ReferenceKey::new(Sex::Male, 62),
                    LmsEntry::new(1.0, 110.6, 0.04),
                ),
                (
                    ReferenceKey::new(Sex::Female, 228),
                    LmsEntry::new(1.0, 163.0, 0.0),
                ),
            ],
        )
    }

    #[test]
    fn coverage_reports_span_per_sex() {
        let table = tiny_table(Indicator::HeightForAge);
        let coverage = table.coverage();
        assert_eq!(
            coverage,
            vec![
                SexCoverage {
                    sex: Sex::Male,
                    rows: 2,
                    min_age_months: 61,
                    max_age_months: 62,
                },
                SexCoverage {
                    sex: Sex::Female,
                    rows: 1,
                    min_age_months: 228,
                    max_age_months: 228,
                },
            ]
        );
    }

    #[test]
    fn missing_and_unusable_keys() {
        let table = tiny_table(Indicator::HeightForAge);
        // 2 sexes x 168 months, 3 present.
        assert_eq!(table.missing_keys().len(), 2 * 168 - 3);
        assert_eq!(
            table.unusable_keys(),
            vec![ReferenceKey::new(Sex::Female, 228)]
        );
    }

    #[test]
    fn reference_set_dispatches_by_indicator() {
        let bfa = ReferenceTable::from_entries(
            Indicator::BmiForAge,
            [(
                ReferenceKey::new(Sex::Male, 61),
                LmsEntry::new(-0.7, 15.3, 0.08),
            )],
        );
        let set = ReferenceSet::new(bfa, tiny_table(Indicator::HeightForAge));
        let key = ReferenceKey::new(Sex::Male, 61);
        assert_eq!(set.lms(Indicator::BmiForAge, key).map(|e| e.m), Some(15.3));
        assert_eq!(
            set.lms(Indicator::HeightForAge, key).map(|e| e.m),
            Some(110.0)
        );
        assert!(
            set.lms(Indicator::BmiForAge, ReferenceKey::new(Sex::Male, 62))
                .is_none()
        );
    }
}
