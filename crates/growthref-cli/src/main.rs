//! `growthref` command-line entry point.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use growthref_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    load_reference, run_batch, run_lookup, run_score, run_selftest, selftest_exit_code,
};
use crate::summary::{print_batch_summary, print_lookup, print_reference, print_selftest};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let reference = load_reference(cli.reference_dir.as_deref())?;
    let code = match &cli.command {
        Command::Score(args) => {
            run_score(args, &reference)?;
            0
        }
        Command::Batch(args) => {
            let result = run_batch(args, &reference)?;
            print_batch_summary(&result);
            0
        }
        Command::Lookup(args) => match run_lookup(args, &reference) {
            Ok(result) => {
                print_lookup(&result);
                0
            }
            Err(reason) => {
                eprintln!("no reference row: {}", reason.description());
                1
            }
        },
        Command::Reference(args) => {
            let summary = reference.summary();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print_reference(&summary);
            }
            0
        }
        Command::Selftest => {
            let outcomes = run_selftest(&reference);
            print_selftest(&outcomes);
            selftest_exit_code(&outcomes)
        }
    };
    Ok(code)
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_timestamps = cli.log_timestamps;
    config.with_target = cli.log_target;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
