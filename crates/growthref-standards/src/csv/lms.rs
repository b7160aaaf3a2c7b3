#![deny(unsafe_code)]

use std::path::Path;

use growthref_model::{Indicator, LmsEntry, ReferenceKey, Sex};
use tracing::debug;

use crate::error::StandardsError;
use crate::table::ReferenceTable;

const COL_SEX: &str = "sex";
const COL_AGE: &str = "age";
const COL_L: &str = "l";
const COL_M: &str = "m";
const COL_S: &str = "s";

fn header_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().trim_matches('\u{feff}').eq_ignore_ascii_case(name))
}

fn require_index(
    headers: &csv::StringRecord,
    name: &str,
    path: &Path,
) -> Result<usize, StandardsError> {
    header_index(headers, name).ok_or_else(|| StandardsError::MissingColumn {
        path: path.to_path_buf(),
        column: name.to_string(),
    })
}

fn get_str(row: &csv::StringRecord, idx: usize) -> &str {
    row.get(idx).map(str::trim).unwrap_or("")
}

/// Parses an integral cell; tolerates a `.0` suffix from spreadsheet exports.
fn parse_whole(raw: &str) -> Option<i64> {
    if let Ok(v) = raw.parse::<i64>() {
        return Some(v);
    }
    let v = raw.parse::<f64>().ok()?;
    (v.is_finite() && v.fract() == 0.0).then_some(v as i64)
}

fn parse_number(raw: &str, column: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .map_err(|_| format!("column '{column}' is not a number: '{raw}'"))
}

/// Parses an LMS table with columns `sex,age,l,m,s`.
///
/// Rows outside 61..=228 months are dropped. Unknown sex codes, unparseable
/// numbers and duplicate keys are fatal since they mean the reference file
/// itself is broken.
pub fn parse_lms_bytes(
    bytes: &[u8],
    path: &Path,
    indicator: Indicator,
) -> Result<ReferenceTable, StandardsError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| StandardsError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .clone();

    let idx_sex = require_index(&headers, COL_SEX, path)?;
    let idx_age = require_index(&headers, COL_AGE, path)?;
    let idx_l = require_index(&headers, COL_L, path)?;
    let idx_m = require_index(&headers, COL_M, path)?;
    let idx_s = require_index(&headers, COL_S, path)?;

    let mut table = ReferenceTable::new(indicator);
    let mut skipped = 0usize;
    for (idx, row) in reader.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        let row = row.map_err(|e| StandardsError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let raw_sex = get_str(&row, idx_sex);
        let sex = parse_whole(raw_sex)
            .and_then(Sex::from_code)
            .ok_or_else(|| {
                StandardsError::invalid_row(path, line, format!("unknown sex code '{raw_sex}'"))
            })?;

        let raw_age = get_str(&row, idx_age);
        let age = parse_whole(raw_age).ok_or_else(|| {
            StandardsError::invalid_row(path, line, format!("age is not a whole month: '{raw_age}'"))
        })?;

        let entry = LmsEntry::new(
            parse_number(get_str(&row, idx_l), COL_L)
                .map_err(|message| StandardsError::invalid_row(path, line, message))?,
            parse_number(get_str(&row, idx_m), COL_M)
                .map_err(|message| StandardsError::invalid_row(path, line, message))?,
            parse_number(get_str(&row, idx_s), COL_S)
                .map_err(|message| StandardsError::invalid_row(path, line, message))?,
        );

        let Ok(age_months) = u16::try_from(age) else {
            skipped += 1;
            continue;
        };
        let key = ReferenceKey::new(sex, age_months);
        if !key.in_window() {
            skipped += 1;
            continue;
        }
        if table.insert(key, entry).is_some() {
            return Err(StandardsError::DuplicateKey {
                path: path.to_path_buf(),
                sex: sex.code(),
                age_months,
            });
        }
    }

    debug!(
        path = %path.display(),
        indicator = indicator.code(),
        rows = table.len(),
        skipped,
        "parsed LMS table"
    );

    if table.is_empty() {
        return Err(StandardsError::EmptyTable {
            path: path.to_path_buf(),
        });
    }
    Ok(table)
}
