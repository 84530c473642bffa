//! Subcommand handlers.
//!
//! Every handler loads the configuration, resolves the catalog and works
//! through a [`Session`] the way an interactive front end would.

use std::sync::Arc;

use anyhow::{Context, Result};
use cablesel_algo::Session;
use cablesel_cli::cli::{Cli, LoadArgs};
use cablesel_cli::config::CableselConfig;
use cablesel_core::{Catalog, RawLoadInput};
use cablesel_io::importers::import_catalog;
use tracing::{debug, info, warn};

pub mod catalog;
pub mod check;
pub mod completions;
pub mod config;
pub mod report;
pub mod select;

pub(crate) fn load_config(cli: &Cli) -> Result<CableselConfig> {
    let config = CableselConfig::load(cli.config.as_deref())?;
    debug!(?config, "configuration loaded");
    Ok(config)
}

/// The `--catalog` file, else the configured one, else the built-in table.
pub(crate) fn load_catalog(cli: &Cli, config: &CableselConfig) -> Result<Catalog> {
    let Some(path) = cli.catalog_path.as_ref().or(config.catalog.path.as_ref()) else {
        debug!("using built-in catalog");
        return Ok(Catalog::builtin());
    };
    let imported = import_catalog(path)
        .with_context(|| format!("loading catalog {}", path.display()))?;
    let diagnostics = &imported.diagnostics;
    if !diagnostics.is_empty() {
        for issue in &diagnostics.issues {
            warn!("{issue}");
        }
        warn!(path = %path.display(), "catalog has {}", diagnostics.summary());
    }
    info!(path = %path.display(), cables = imported.catalog.len(), "catalog loaded");
    Ok(imported.catalog)
}

pub(crate) fn open_session(cli: &Cli, config: &CableselConfig) -> Result<Session> {
    let catalog = load_catalog(cli, config)?;
    Ok(Session::with_params(Arc::new(catalog), config.economics.clone()))
}

/// Configured defaults with the command-line load flags laid over them.
pub(crate) fn load_input(config: &CableselConfig, load: &LoadArgs) -> RawLoadInput {
    config.defaults.overlay(load)
}
