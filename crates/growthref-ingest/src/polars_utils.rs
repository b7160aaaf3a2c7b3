//! Polars `AnyValue` coercions for measurement columns.
//!
//! Dataset columns arrive with whatever dtype CSV inference picked, so every
//! cell is coerced individually. Nulls, NaN and unparseable text all become
//! `None`, which the calculator reports as missing input.

use growthref_model::Sex;
use polars::prelude::*;

/// Sex code passed on for values that can never be 1 or 2 (e.g. `1.5`).
pub const INVALID_SEX_CODE: i64 = 0;

/// Parses a string as `f64`, returning `None` for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Converts an `AnyValue` to `f64`, returning `None` for non-numeric or null values.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)).filter(|v| !v.is_nan()),
        AnyValue::Float64(v) => Some(v).filter(|v| !v.is_nan()),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

fn whole_to_code(v: f64) -> Option<i64> {
    if v.is_nan() {
        None
    } else if v.fract() == 0.0 && v.abs() < 1e9 {
        Some(v as i64)
    } else {
        Some(INVALID_SEX_CODE)
    }
}

fn text_to_sex_code(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(sex) = trimmed.parse::<Sex>() {
        return Some(i64::from(sex.code()));
    }
    match trimmed.parse::<f64>() {
        Ok(v) => whole_to_code(v),
        Err(_) => Some(INVALID_SEX_CODE),
    }
}

/// Converts a sex cell to a raw code.
///
/// Integers pass through unchanged so the calculator can reject codes other
/// than 1 and 2. Text accepts `1`/`2`, `male`/`female` and `m`/`f`.
pub fn any_to_sex_code(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(i64::from(v)),
        AnyValue::Int16(v) => Some(i64::from(v)),
        AnyValue::Int32(v) => Some(i64::from(v)),
        AnyValue::Int64(v) => Some(v),
        AnyValue::UInt8(v) => Some(i64::from(v)),
        AnyValue::UInt16(v) => Some(i64::from(v)),
        AnyValue::UInt32(v) => Some(i64::from(v)),
        AnyValue::UInt64(v) => Some(i64::try_from(v).unwrap_or(INVALID_SEX_CODE)),
        AnyValue::Float32(v) => whole_to_code(f64::from(v)),
        AnyValue::Float64(v) => whole_to_code(v),
        AnyValue::String(s) => text_to_sex_code(s),
        AnyValue::StringOwned(s) => text_to_sex_code(&s),
        _ => Some(INVALID_SEX_CODE),
    }
}

pub fn numeric_column_f64(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}

pub fn sex_code_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<i64>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_sex_code(column.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}
