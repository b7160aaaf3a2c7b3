use std::path::Path;

use anyhow::{Context, Result};
use growthref_core::ZScoreCalculator;
use growthref_ingest::{
    ZScoreColumns, derive_zscore_columns, read_dataset_csv, write_dataset_csv,
};
use growthref_model::{Indicator, Measurement, UndefinedReason};
use growthref_standards::{REFERENCE_ENV_VAR, ReferenceSet, load_reference_set, reference_root};
use tracing::{info, info_span, trace};

use growthref_cli::logging::redact_value;
use growthref_cli::outputs::{ScoreReport, default_output_path};
use growthref_cli::selftest::{CaseOutcome, VALIDATION_CASES, run_cases};

use crate::cli::{BatchArgs, LookupArgs, ScoreArgs};
use crate::types::{BatchResult, LookupResult};

/// Loads both tables from `dir`, or from the default location.
pub fn load_reference(dir: Option<&Path>) -> Result<ReferenceSet> {
    let dir = dir.map_or_else(reference_root, Path::to_path_buf);
    load_reference_set(&dir).with_context(|| {
        format!(
            "failed to load WHO reference tables from {} (use --reference-dir or {REFERENCE_ENV_VAR})",
            dir.display()
        )
    })
}

pub fn run_score(args: &ScoreArgs, reference: &ReferenceSet) -> Result<()> {
    let indicator = Indicator::from(args.indicator);
    trace!(
        indicator = indicator.code(),
        value = %redact_value(args.value),
        age_months = %redact_value(args.age_months),
        sex = args.sex,
        "scoring measurement"
    );
    let measurement = Measurement::new(args.value, args.age_months, args.sex, indicator);
    let score = ZScoreCalculator::new(reference).score(&measurement);
    if args.json {
        let report = ScoreReport::new(&measurement, score);
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serialize score")?
        );
    } else {
        println!("{score}");
        if let Some(reason) = score.reason() {
            eprintln!("note: {}", reason.description());
        }
    }
    Ok(())
}

pub fn run_batch(args: &BatchArgs, reference: &ReferenceSet) -> Result<BatchResult> {
    let span = info_span!("batch", input = %args.input.display());
    let _guard = span.enter();

    let df = read_dataset_csv(&args.input)
        .with_context(|| format!("read dataset {}", args.input.display()))?;
    let columns = ZScoreColumns::new(
        args.bmi_col.as_str(),
        args.height_col.as_str(),
        args.age_col.as_str(),
        args.sex_col.as_str(),
    );
    let mut derived = derive_zscore_columns(&df, &columns, reference)
        .with_context(|| format!("score dataset {}", args.input.display()))?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    write_dataset_csv(&mut derived.frame, &output)
        .with_context(|| format!("write {}", output.display()))?;
    info!(output = %output.display(), rows = df.height(), "batch complete");

    Ok(BatchResult {
        input: args.input.clone(),
        output,
        rows: df.height(),
        bmi: derived.bmi,
        height: derived.height,
    })
}

pub fn run_lookup(
    args: &LookupArgs,
    reference: &ReferenceSet,
) -> std::result::Result<LookupResult, UndefinedReason> {
    let indicator = Indicator::from(args.indicator);
    let lms = ZScoreCalculator::new(reference).lookup(
        Some(args.sex),
        Some(args.age_months),
        indicator,
    )?;
    Ok(LookupResult {
        indicator,
        sex: args.sex,
        age_months: args.age_months,
        lms,
    })
}

pub fn run_selftest(reference: &ReferenceSet) -> Vec<CaseOutcome> {
    let outcomes = run_cases(reference, &VALIDATION_CASES);
    for outcome in outcomes.iter().filter(|o| !o.passed()) {
        tracing::error!(
            case = outcome.case.label,
            expected = %outcome.case.expected,
            actual = %outcome.actual,
            "validation case failed"
        );
    }
    outcomes
}

/// Exit status for a self-test run.
pub fn selftest_exit_code(outcomes: &[CaseOutcome]) -> i32 {
    i32::from(!outcomes.iter().all(CaseOutcome::passed))
}
