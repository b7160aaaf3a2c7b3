//! Reference directory path resolution.

use std::path::{Path, PathBuf};

use growthref_model::Indicator;

/// Environment variable for overriding the reference directory.
pub const REFERENCE_ENV_VAR: &str = "GROWTHREF_REFERENCE_DIR";

/// File name of the BMI-for-age LMS table.
pub const BMI_FOR_AGE_FILE: &str = "who_bmi_for_age_lms.csv";

/// File name of the height-for-age LMS table.
pub const HEIGHT_FOR_AGE_FILE: &str = "who_height_for_age_lms.csv";

/// Get the reference root directory.
///
/// Resolution order:
/// 1. `GROWTHREF_REFERENCE_DIR` environment variable
/// 2. `reference/` directory relative to workspace root
pub fn reference_root() -> PathBuf {
    if let Ok(root) = std::env::var(REFERENCE_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../reference")
}

pub fn table_file_name(indicator: Indicator) -> &'static str {
    match indicator {
        Indicator::BmiForAge => BMI_FOR_AGE_FILE,
        Indicator::HeightForAge => HEIGHT_FOR_AGE_FILE,
    }
}

/// Path of the LMS table for `indicator` inside `dir`.
pub fn table_path(dir: &Path, indicator: Indicator) -> PathBuf {
    dir.join(table_file_name(indicator))
}
