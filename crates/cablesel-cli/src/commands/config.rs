//! `cablesel config` - inspect and create the configuration file.

use std::io::{self, Write};

use anyhow::{bail, Result};
use cablesel_cli::cli::{Cli, ConfigCommands};
use cablesel_cli::config::{default_config_path, CableselConfig};
use tracing::info;

pub fn handle(cli: &Cli, command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => handle_show(cli),
        ConfigCommands::Init { force } => handle_init(cli, *force),
    }
}

fn handle_show(cli: &Cli) -> Result<()> {
    let config = super::load_config(cli)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(config.to_toml()?.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn handle_init(cli: &Cli, force: bool) -> Result<()> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    CableselConfig::default().save_to(&path)?;
    info!(path = %path.display(), "configuration written");
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
