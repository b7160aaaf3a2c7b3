#![deny(unsafe_code)]

pub mod enums;
pub mod error;
pub mod lms;
pub mod measurement;
pub mod zscore;

pub use enums::{Indicator, Sex};
pub use error::ModelError;
pub use lms::{AGE_MAX_MONTHS, AGE_MIN_MONTHS, LmsEntry, LmsSource, ReferenceKey, age_key};
pub use measurement::Measurement;
pub use zscore::{UndefinedReason, ZScore};
