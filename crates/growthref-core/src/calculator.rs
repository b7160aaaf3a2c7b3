use growthref_model::{Indicator, LmsEntry, LmsSource, Measurement, UndefinedReason, ZScore};

use crate::batch::score_all;
use crate::lookup::lookup;
use crate::zscore::compute_zscore;

/// Z-score calculator bound to one reference source.
///
/// The source is captured at construction; nothing is read from global
/// state. Any `&S` where `S: LmsSource` also works as a source.
#[derive(Debug, Clone)]
pub struct ZScoreCalculator<S> {
    source: S,
}

impl<S: LmsSource> ZScoreCalculator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn lookup(
        &self,
        sex: Option<i64>,
        age_months: Option<f64>,
        indicator: Indicator,
    ) -> Result<LmsEntry, UndefinedReason> {
        lookup(&self.source, sex, age_months, indicator)
    }

    pub fn score(&self, measurement: &Measurement) -> ZScore {
        compute_zscore(
            &self.source,
            measurement.value,
            measurement.age_months,
            measurement.sex,
            measurement.indicator,
        )
    }

    pub fn bmi_for_age(&self, bmi: f64, age_months: f64, sex: i64) -> ZScore {
        self.score(&Measurement::bmi_for_age(bmi, age_months, sex))
    }

    pub fn height_for_age(&self, height_cm: f64, age_months: f64, sex: i64) -> ZScore {
        self.score(&Measurement::height_for_age(height_cm, age_months, sex))
    }

    pub fn score_all(&self, measurements: &[Measurement]) -> Vec<ZScore> {
        score_all(&self.source, measurements)
    }
}
