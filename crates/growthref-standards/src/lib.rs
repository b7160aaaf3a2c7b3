//! WHO Growth Reference 2007 LMS tables.
//!
//! The tables are read once from CSV (`sex,age,l,m,s`) and then only read.
//! [`ReferenceSet`] is the lookup capability handed to the calculator.

#![deny(unsafe_code)]

pub mod csv;
pub mod error;
pub mod hash;
pub mod loaders;
pub mod paths;
pub mod table;

pub use crate::csv::parse_lms_bytes;
pub use crate::error::StandardsError;
pub use crate::loaders::{load_default_reference_set, load_reference_set, load_table};
pub use crate::paths::{
    BMI_FOR_AGE_FILE, HEIGHT_FOR_AGE_FILE, REFERENCE_ENV_VAR, reference_root, table_path,
};
pub use crate::table::{
    ReferenceProvenance, ReferenceSet, ReferenceSummary, ReferenceTable, SexCoverage, SourceFile,
    TableSummary,
};
