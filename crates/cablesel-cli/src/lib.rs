pub mod cli;
pub mod common;
pub mod config;

pub use cli::{
    build_cli_command, CatalogCommands, Cli, Commands, ConfigCommands, LoadArgs, ReportFormat,
    SortColumn,
};
pub use config::CableselConfig;
