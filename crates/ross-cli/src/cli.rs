//! CLI argument definitions for `ross`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use ross_model::{CalendarCheck, ParseOptions, ValidationOptions};
use ross_validate::Selection;

#[derive(Parser)]
#[command(
    name = "ross",
    version,
    about = "ROSS 1000 validator - check tourism movement records and build the ISTAT XML",
    long_about = "Validate ROSS 1000 fixed-width guest records (328 bytes, 26 fields).\n\n\
                  Reports issues by severity, exports accepted or rejected records and\n\
                  generates the movement XML from the accepted ones."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a fixed-width file and report its issues.
    Validate(ValidateArgs),

    /// Write the accepted or rejected records of a file.
    Export(ExportArgs),

    /// Generate the movement XML from the accepted records of a file.
    Xml(XmlArgs),

    /// Convert a movement XML document into fixed-width records.
    ImportXml(ImportXmlArgs),

    /// Print the field layout.
    Fields,
}

/// Input file plus the switches that shape parsing and validation.
#[derive(Args)]
pub struct InputArgs {
    /// Fixed-width ROSS 1000 file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Fill empty tourism type and transport mode with "Non Specificato".
    #[arg(long = "fill-defaults")]
    pub fill_defaults: bool,

    /// Reject dates whose day does not exist in the month (e.g. 31/02).
    #[arg(long = "strict-dates")]
    pub strict_dates: bool,

    /// Do not add informational notes about unusual travel combinations.
    #[arg(long = "no-travel-notes")]
    pub no_travel_notes: bool,
}

impl InputArgs {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::default().with_fill_unspecified_defaults(self.fill_defaults)
    }

    pub fn validation_options(&self) -> ValidationOptions {
        let calendar = if self.strict_dates {
            CalendarCheck::Strict
        } else {
            CalendarCheck::Loose
        };
        ValidationOptions::default()
            .with_calendar(calendar)
            .with_travel_heuristics(!self.no_travel_notes)
    }
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Report format written to stdout.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Which records to write.
    #[arg(long = "select", value_enum, default_value = "accepted")]
    pub select: SelectionArg,

    /// Output file (CRLF-terminated fixed-width records).
    #[arg(short = 'o', long = "output", value_name = "OUT")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct XmlArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Facility code (default: leading letters and digits of the file name).
    #[arg(long = "facility-code", value_name = "CODE")]
    pub facility_code: Option<String>,

    /// Product identifier written into the document.
    #[arg(long = "product", value_name = "ID")]
    pub product: Option<String>,

    /// Output XML file.
    #[arg(short = 'o', long = "output", value_name = "OUT")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct ImportXmlArgs {
    /// Movement XML document.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output file (CRLF-terminated fixed-width records).
    #[arg(short = 'o', long = "output", value_name = "OUT")]
    pub output: PathBuf,
}

/// Validation report formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Text,
    Json,
    Csv,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SelectionArg {
    Accepted,
    Rejected,
}

impl From<SelectionArg> for Selection {
    fn from(value: SelectionArg) -> Self {
        match value {
            SelectionArg::Accepted => Selection::Accepted,
            SelectionArg::Rejected => Selection::Rejected,
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
