use std::path::Path;

use growthref_model::Indicator;
use tracing::{info, warn};

use crate::csv::parse_lms_bytes;
use crate::error::StandardsError;
use crate::hash::sha256_hex;
use crate::paths::{reference_root, table_path};
use crate::table::{ReferenceProvenance, ReferenceSet, ReferenceTable, SourceFile};

/// Loads one indicator table and records its fingerprint.
pub fn load_table(
    path: &Path,
    indicator: Indicator,
) -> Result<(ReferenceTable, SourceFile), StandardsError> {
    let bytes = std::fs::read(path).map_err(|e| StandardsError::io(path, e))?;
    let table = parse_lms_bytes(&bytes, path, indicator)?;
    let source = SourceFile {
        indicator,
        path: path.to_path_buf(),
        sha256: sha256_hex(&bytes),
    };

    let missing = table.missing_keys();
    if !missing.is_empty() {
        warn!(
            indicator = indicator.code(),
            path = %path.display(),
            missing = missing.len(),
            "reference table does not cover every month of 61-228"
        );
    }
    let unusable = table.unusable_keys();
    if !unusable.is_empty() {
        warn!(
            indicator = indicator.code(),
            path = %path.display(),
            unusable = unusable.len(),
            "reference table has rows with non-positive M or S; lookups for them will be undefined"
        );
    }
    info!(
        indicator = indicator.code(),
        rows = table.len(),
        sha256 = %source.sha256,
        "loaded reference table"
    );
    Ok((table, source))
}

/// Loads both LMS tables from `dir`.
pub fn load_reference_set(dir: &Path) -> Result<ReferenceSet, StandardsError> {
    let (bmi_for_age, bfa_source) =
        load_table(&table_path(dir, Indicator::BmiForAge), Indicator::BmiForAge)?;
    let (height_for_age, hfa_source) = load_table(
        &table_path(dir, Indicator::HeightForAge),
        Indicator::HeightForAge,
    )?;
    let provenance = ReferenceProvenance {
        dir: dir.to_path_buf(),
        files: vec![bfa_source, hfa_source],
    };
    Ok(ReferenceSet::new(bmi_for_age, height_for_age).with_provenance(provenance))
}

pub fn load_default_reference_set() -> Result<ReferenceSet, StandardsError> {
    load_reference_set(&reference_root())
}
