//! CLI argument definitions for the Tableau dimension mapper.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;
use twb_cli::logging::{LogConfig, LogFormat};

#[derive(Parser)]
#[command(
    name = "twb-mapper",
    version,
    about = "Rename dimensions in Tableau workbooks and inspect their structure",
    long_about = "Rename dimensions in Tableau workbooks (.twb) from a two-column CSV mapping.\n\n\
                  Rules are applied in file order as plain text substitutions, so a later\n\
                  rule sees the output of earlier ones."
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
}

impl Cli {
    /// Logging setup for this invocation.
    ///
    /// `--log-level` wins over `-v`/`-q`; `RUST_LOG` applies only when neither
    /// is given.
    pub fn log_config(&self) -> LogConfig {
        let level = self
            .log_level
            .map_or_else(|| self.verbosity.tracing_level_filter(), LevelFilter::from);
        let ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        let mut config = LogConfig::default()
            .with_level(level)
            .with_format(self.log_format.into())
            .with_ansi(ansi)
            .with_log_file(self.log_file.clone());
        config.use_env_filter = !(self.verbosity.is_present() || self.log_level.is_some());
        config
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply a mapping CSV to a workbook and write the remapped copy.
    Remap(RemapArgs),

    /// Print a TOML mapping definition as-is.
    PreviewToml {
        /// Path to the TOML file holding the renames.
        #[arg(value_name = "TOML")]
        toml: PathBuf,
    },

    /// Check that every mapping row has at least two columns.
    ValidateMapping(MappingArgs),

    /// Check that a file is a Tableau workbook and count its parts.
    ValidateWorkbook(WorkbookArgs),

    /// List fields, formulas, worksheets and naming patterns of a workbook.
    Analyze(WorkbookArgs),

    /// Write standard input to a file, creating parent directories.
    Write {
        /// Destination file.
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

#[derive(Args)]
pub struct RemapArgs {
    /// Two-column CSV of original and replacement names.
    #[arg(value_name = "MAPPING")]
    pub mapping: PathBuf,

    /// Workbook to remap.
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,

    /// Where to write the remapped workbook
    /// (default: <WORKBOOK_STEM>_remapped_<TIMESTAMP>.twb next to the input).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the result as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct MappingArgs {
    /// Two-column CSV of original and replacement names.
    #[arg(value_name = "MAPPING")]
    pub path: PathBuf,

    /// Print the result as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct WorkbookArgs {
    /// Tableau workbook (.twb).
    #[arg(value_name = "WORKBOOK")]
    pub path: PathBuf,

    /// Print the result as JSON.
    #[arg(long = "json")]
    pub json: bool,
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
