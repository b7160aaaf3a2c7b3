//! CLI argument definitions for the growth reference scorer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use growthref_model::{Indicator, Sex};

#[derive(Parser)]
#[command(
    name = "growthref",
    version,
    about = "WHO Growth Reference 2007 z-scores for ages 5-19 years",
    long_about = "Compute BMI-for-age and height-for-age z-scores against the\n\
                  WHO Growth Reference 2007 LMS tables (61-228 months).\n\
                  BMI-for-age beyond +/-3 SD uses the WHO restricted approach."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the WHO LMS tables (default: $GROWTHREF_REFERENCE_DIR or ./reference).
    #[arg(long = "reference-dir", value_name = "DIR", global = true)]
    pub reference_dir: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix log lines with a timestamp (JSON output always has one).
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Show the emitting module in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,

    /// Allow measurement values in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score a single measurement.
    Score(ScoreArgs),

    /// Append zbmi/zhfa columns to a CSV dataset.
    Batch(BatchArgs),

    /// Print the L, M and S values for a sex and age.
    Lookup(LookupArgs),

    /// Show coverage and fingerprints of the loaded reference tables.
    Reference(ReferenceArgs),

    /// Check the loaded tables against published WHO validation values.
    Selftest,
}

#[derive(Parser)]
pub struct ScoreArgs {
    /// Indicator to score.
    #[arg(long = "indicator", value_enum)]
    pub indicator: IndicatorArg,

    /// Measurement: BMI in kg/m² or height in cm.
    #[arg(long = "value", allow_negative_numbers = true)]
    pub value: f64,

    /// Age in months (rounded to the nearest whole month).
    #[arg(long = "age", value_name = "MONTHS", allow_negative_numbers = true)]
    pub age_months: f64,

    /// Sex code: 1 (male) or 2 (female); m/f/male/female also accepted.
    #[arg(long = "sex", value_parser = parse_sex_code, allow_negative_numbers = true)]
    pub sex: i64,

    /// Print the result as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct BatchArgs {
    /// CSV file with one measurement row per child.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV (default: <INPUT stem>_zscores.csv next to the input).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[arg(long = "bmi-col", default_value = "bmi")]
    pub bmi_col: String,

    #[arg(long = "height-col", default_value = "height")]
    pub height_col: String,

    #[arg(long = "age-col", default_value = "agemos")]
    pub age_col: String,

    #[arg(long = "sex-col", default_value = "sex")]
    pub sex_col: String,
}

#[derive(Parser)]
pub struct LookupArgs {
    #[arg(long = "indicator", value_enum)]
    pub indicator: IndicatorArg,

    /// Age in months (rounded to the nearest whole month).
    #[arg(long = "age", value_name = "MONTHS", allow_negative_numbers = true)]
    pub age_months: f64,

    #[arg(long = "sex", value_parser = parse_sex_code, allow_negative_numbers = true)]
    pub sex: i64,
}

#[derive(Parser)]
pub struct ReferenceArgs {
    /// Print the summary as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum IndicatorArg {
    /// BMI-for-age.
    Bfa,
    /// Height-for-age.
    Hfa,
}

impl From<IndicatorArg> for Indicator {
    fn from(value: IndicatorArg) -> Self {
        match value {
            IndicatorArg::Bfa => Indicator::BmiForAge,
            IndicatorArg::Hfa => Indicator::HeightForAge,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// Accepts any integer so unknown codes reach the calculator as `InvalidSex`.
fn parse_sex_code(raw: &str) -> Result<i64, String> {
    if let Ok(code) = raw.trim().parse::<i64>() {
        return Ok(code);
    }
    raw.parse::<Sex>()
        .map(|sex| i64::from(sex.code()))
        .map_err(|error| error.to_string())
}
