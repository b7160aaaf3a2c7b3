//! WHO Growth Reference 2007 z-scores for ages 5-19 years.
//!
//! - **lookup**: (sex, age) to LMS cell, exact integer month, 61-228 only
//! - **zscore**: LMS transform, ±3 SD restriction for BMI-for-age, rounding
//! - **calculator**: the two steps bound to an injected reference source
//! - **batch**: order-preserving scoring of many rows and outcome tallies
//!
//! Every function is pure over an immutable reference; callers may score
//! rows from as many threads as they like.

#![deny(unsafe_code)]

pub mod batch;
pub mod calculator;
pub mod lookup;
pub mod zscore;

pub use batch::{UndefinedTally, score_all};
pub use calculator::ZScoreCalculator;
pub use lookup::lookup;
pub use zscore::{
    EXTREME_Z, ZSCORE_DECIMALS, compute, compute_zscore, lms_zscore, raw_zscore,
    restrict_extreme, round_half_away, sd_cutoff,
};
