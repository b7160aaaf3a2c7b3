//! Scoring many independent measurements.

use std::collections::BTreeMap;

use growthref_model::{LmsSource, Measurement, UndefinedReason, ZScore};
use serde::Serialize;
use tracing::debug;

use crate::zscore::compute_zscore;

/// Scores every measurement, preserving input order.
pub fn score_all<S>(source: &S, measurements: &[Measurement]) -> Vec<ZScore>
where
    S: LmsSource + ?Sized,
{
    let scores: Vec<ZScore> = measurements
        .iter()
        .map(|m| compute_zscore(source, m.value, m.age_months, m.sex, m.indicator))
        .collect();
    debug!(
        rows = scores.len(),
        undefined = scores.iter().filter(|z| z.is_undefined()).count(),
        "scored measurements"
    );
    scores
}

/// Counts of defined results and of each undefined reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UndefinedTally {
    pub total: usize,
    pub defined: usize,
    pub by_reason: BTreeMap<UndefinedReason, usize>,
}

impl UndefinedTally {
    pub fn record(&mut self, score: &ZScore) {
        self.total += 1;
        match score {
            ZScore::Value(_) => self.defined += 1,
            ZScore::Undefined(reason) => *self.by_reason.entry(*reason).or_default() += 1,
        }
    }

    pub fn undefined(&self) -> usize {
        self.total - self.defined
    }

    pub fn count(&self, reason: UndefinedReason) -> usize {
        self.by_reason.get(&reason).copied().unwrap_or(0)
    }
}

impl<'a> FromIterator<&'a ZScore> for UndefinedTally {
    fn from_iter<I: IntoIterator<Item = &'a ZScore>>(iter: I) -> Self {
        let mut tally = Self::default();
        for score in iter {
            tally.record(score);
        }
        tally
    }
}

impl FromIterator<ZScore> for UndefinedTally {
    fn from_iter<I: IntoIterator<Item = ZScore>>(iter: I) -> Self {
        let mut tally = Self::default();
        for score in iter {
            tally.record(&score);
        }
        tally
    }
}
