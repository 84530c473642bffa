//! `cablesel report` - full calculation report for one cable.

use std::path::Path;

use anyhow::Result;
use cablesel_cli::cli::{Cli, LoadArgs, ReportFormat};
use cablesel_cli::common::emit_text;
use cablesel_core::CableId;
use tracing::info;

pub fn handle(
    cli: &Cli,
    cable: u32,
    load: &LoadArgs,
    out: Option<&Path>,
    format: ReportFormat,
) -> Result<()> {
    let config = super::load_config(cli)?;
    let mut session = super::open_session(cli, &config)?;
    let spec = super::load_input(&config, load).parse()?;

    session.refilter(spec)?;
    session.select(CableId::new(cable))?;
    let report = session.calculate()?;

    let text = match format {
        ReportFormat::Text => {
            let mut text = report.text.clone();
            if !text.ends_with('\n') {
                text.push('\n');
            }
            text
        }
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(report)?;
            json.push('\n');
            json
        }
    };
    emit_text(&text, out)?;
    if let Some(path) = out {
        info!(path = %path.display(), "report written");
        println!("Wrote report to {}", path.display());
    }
    Ok(())
}
