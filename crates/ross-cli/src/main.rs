//! ROSS 1000 validator CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use ross_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg, ValidateArgs};
use ross_cli::commands::{run_export, run_fields, run_import_xml, run_validate, run_xml};
use ross_cli::logging::{LogConfig, LogFormat, init_logging};
use ross_cli::summary::{print_export, print_import, print_xml, render_report};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(2);
    }
    let exit_code = match cli.command {
        Command::Validate(args) => match validate(&args) {
            Ok((rendered, valid)) => {
                print!("{rendered}");
                if valid { 0 } else { 1 }
            }
            Err(error) => fail(&error),
        },
        Command::Export(args) => match run_export(&args) {
            Ok(result) => {
                print_export(&result);
                0
            }
            Err(error) => fail(&error),
        },
        Command::Xml(args) => match run_xml(&args) {
            Ok(result) => {
                print_xml(&result);
                0
            }
            Err(error) => fail(&error),
        },
        Command::ImportXml(args) => match run_import_xml(&args) {
            Ok(result) => {
                print_import(&result);
                0
            }
            Err(error) => fail(&error),
        },
        Command::Fields => match run_fields() {
            Ok(()) => 0,
            Err(error) => fail(&error),
        },
    };
    std::process::exit(exit_code);
}

fn validate(args: &ValidateArgs) -> anyhow::Result<(String, bool)> {
    let validated = run_validate(args)?;
    let rendered = render_report(&validated.report, args.format)?;
    Ok((rendered, validated.report.is_valid()))
}

fn fail(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    2
}

/// Logging configuration from the global flags.
///
/// `--log-level` beats `-v/-q`; when neither is given `RUST_LOG` may
/// decide.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level = cli.log_level.map_or_else(
        || cli.verbosity.tracing_level_filter(),
        |level| match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        },
    );
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        use_env_filter: !(cli.verbosity.is_present() || cli.log_level.is_some()),
        ..LogConfig::default()
    }
    .with_level_filter(level)
    .with_format(format)
    .with_log_file(cli.log_file.clone())
    .with_ansi(ansi)
}
