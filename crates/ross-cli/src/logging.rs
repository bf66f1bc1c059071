//! Logging setup on top of `tracing` and `tracing-subscriber`.
//!
//! The libraries only emit events; this module installs the subscriber.
//!
//! # Log Levels
//!
//! - `error`: failures that abort a command
//! - `warn`: file-level problems (line endings, charset)
//! - `info`: command progress and summary counts
//! - `debug`: per-record decisions
//! - `trace`: everything else

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Crates whose events pass the level filter; others stay at `warn`.
const CRATES: [&str; 6] = [
    "ross_cli",
    "ross_codec",
    "ross_ingest",
    "ross_model",
    "ross_output",
    "ross_validate",
];

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` decide the filter when it is set.
    pub use_env_filter: bool,
    pub with_timestamps: bool,
    /// Include the module path in each line.
    pub with_target: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// When set, logs go to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, multi-field lines.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// One JSON object per event.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level_filter(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Install the global subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            init_logging_with_writer(&config.clone().with_ansi(false), Mutex::new(file));
        }
        None => init_logging_with_writer(config, io::stderr),
    }
    Ok(())
}

/// Install the global subscriber writing through `writer`.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = format_layer(config, writer).with_filter(build_env_filter(config));
    tracing_subscriber::registry().with(layer).init();
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

fn format_layer<W>(config: &LogConfig, writer: W) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let base = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target);
    match (config.format, config.with_timestamps) {
        (LogFormat::Json, _) => base.json().with_span_events(FmtSpan::CLOSE).boxed(),
        (LogFormat::Compact, true) => base.compact().with_ansi(config.with_ansi).boxed(),
        (LogFormat::Compact, false) => base
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        (LogFormat::Pretty, true) => base.with_ansi(config.with_ansi).boxed(),
        (LogFormat::Pretty, false) => base.with_ansi(config.with_ansi).without_time().boxed(),
    }
}

/// Default directives: our crates at the configured level, the rest at `warn`.
pub fn default_directives(level_filter: LevelFilter) -> String {
    let level = level_filter.to_string().to_lowercase();
    let mut directives = vec!["warn".to_string()];
    directives.extend(CRATES.iter().map(|krate| format!("{krate}={level}")));
    directives.join(",")
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let fallback = || EnvFilter::new(default_directives(config.level_filter));
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}
