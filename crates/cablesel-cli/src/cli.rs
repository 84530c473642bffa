use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::common::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "cablesel",
    author,
    version,
    about = "Select power cables for a three-phase load and evaluate losses, regulation and lifecycle cost"
)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: tracing::Level,

    /// Configuration file (defaults to ~/.cablesel/config.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Cable catalog file (.csv or .json) instead of the built-in table
    #[arg(long = "catalog", global = true, value_hint = ValueHint::FilePath)]
    pub catalog_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect, validate and export the cable catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// List the cables able to carry a load, cheapest marked with *
    Select {
        #[command(flatten)]
        load: LoadArgs,
        /// Sort column (catalog order when omitted)
        #[arg(long, value_enum)]
        sort: Option<SortColumn>,
        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Capacity check and circuit analysis of one cable
    Check {
        /// Catalog id of the cable
        #[arg(long)]
        cable: u32,
        #[command(flatten)]
        load: LoadArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Full losses, regulation and 10-year cost report for one cable
    Report {
        /// Catalog id of the cable
        #[arg(long)]
        cable: u32,
        #[command(flatten)]
        load: LoadArgs,
        /// Write the report to a file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: Option<PathBuf>,
        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List catalog records
    List {
        /// Only list one topology (single-core, three-core)
        #[arg(long)]
        topology: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Show one record with its tabulated properties
    Show {
        /// Catalog id
        id: u32,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Check the catalog against its invariants
    Validate,
    /// Write the catalog to a .csv or .json file
    Export {
        /// Destination file
        #[arg(value_hint = ValueHint::FilePath)]
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Write a configuration file with the default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Load and installation inputs; omitted flags take the configured defaults.
///
/// Values are read as text so that a decimal comma (`0,4`) is accepted.
#[derive(Args, Debug, Clone, Default)]
pub struct LoadArgs {
    /// Active power (MW)
    #[arg(short = 'p', long = "power")]
    pub active_power: Option<String>,
    /// Reactive power (MVar)
    #[arg(short = 'q', long = "reactive")]
    pub reactive_power: Option<String>,
    /// Line-to-line system voltage (kV)
    #[arg(short = 'v', long = "voltage")]
    pub system_voltage: Option<String>,
    /// Parallel circuits (1-2 single-core, 1-6 three-core)
    #[arg(short = 'n', long = "circuits")]
    pub parallel_circuits: Option<String>,
    /// Route length of one circuit (km)
    #[arg(short = 'l', long = "length")]
    pub cable_length: Option<String>,
    /// Ambient ground temperature (°C, 5-40)
    #[arg(short = 't', long = "ambient", allow_negative_numbers = true)]
    pub ambient_temp: Option<String>,
    /// single-core or three-core
    #[arg(long)]
    pub topology: Option<String>,
    /// flat or trefoil (single-core only)
    #[arg(long)]
    pub arrangement: Option<String>,
    /// industrial, residential, commercial or municipal
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Designation,
    Voltage,
    Price,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Formatted text report
    #[default]
    Text,
    /// Structured analysis and cost figures plus the text
    Json,
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
