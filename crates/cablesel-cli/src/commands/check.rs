//! `cablesel check` - live capacity check of one cable.

use std::io::{self, Write};

use anyhow::Result;
use cablesel_algo::{CableDetails, CircuitAnalysis};
use cablesel_cli::cli::{Cli, LoadArgs};
use cablesel_cli::common::{write_json, write_structured, OutputFormat};
use cablesel_core::CableId;
use serde::Serialize;

#[derive(Serialize)]
struct CheckOutput {
    details: CableDetails,
    analysis: CircuitAnalysis,
}

/// Flat subset for CSV.
#[derive(Serialize)]
struct CheckRow {
    id: u32,
    designation: String,
    current_per_circuit: f64,
    derated_ampacity: f64,
    safety_margin_pct: f64,
    status: &'static str,
    active_loss_total_kw: f64,
    voltage_regulation_pct: f64,
}

pub fn handle(cli: &Cli, cable: u32, load: &LoadArgs, format: OutputFormat) -> Result<()> {
    let config = super::load_config(cli)?;
    let mut session = super::open_session(cli, &config)?;
    let spec = super::load_input(&config, load).parse()?;

    session.refilter(spec)?;
    session.select(CableId::new(cable))?;
    let output = CheckOutput {
        details: session.details()?,
        analysis: session.capacity_check()?,
    };

    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Table => print_check(&output, &mut stdout)?,
        OutputFormat::Json => write_json(&output, &mut stdout, true)?,
        OutputFormat::Jsonl => write_json(&output, &mut stdout, false)?,
        OutputFormat::Csv => {
            let analysis = &output.analysis;
            let row = CheckRow {
                id: output.details.id.value(),
                designation: output.details.designation.clone(),
                current_per_circuit: analysis.current_per_circuit,
                derated_ampacity: analysis.derated_ampacity,
                safety_margin_pct: analysis.safety_margin_pct,
                status: analysis.status.verdict(),
                active_loss_total_kw: analysis.active_loss_total_kw,
                voltage_regulation_pct: analysis.voltage_regulation_pct,
            };
            write_structured(&[row], format, &mut stdout)?;
        }
    }
    Ok(())
}

fn print_check<W: Write>(output: &CheckOutput, out: &mut W) -> Result<()> {
    let a = &output.analysis;
    writeln!(out, "{}", output.details)?;
    writeln!(out)?;
    writeln!(out, "Capacity Check:")?;
    writeln!(out, "├─ Temperature factor: {:.2}", a.temperature_factor)?;
    writeln!(
        out,
        "├─ Trench factor: {:.2} ({} cables in trench)",
        a.trench_factor, a.cables_in_trench
    )?;
    writeln!(out, "├─ Derated capacity: {:.1} A", a.derated_ampacity)?;
    writeln!(out, "├─ Current per circuit: {:.1} A", a.current_per_circuit)?;
    writeln!(out, "├─ Safety margin: {:.1}%", a.safety_margin_pct)?;
    writeln!(out, "└─ Status: {}", a.status.verdict())?;
    writeln!(out)?;
    writeln!(
        out,
        "Losses: {:.2} kW, {:.2} kVar | Voltage regulation: {:.2}%",
        a.active_loss_total_kw, a.reactive_loss_total_kvar, a.voltage_regulation_pct
    )?;
    Ok(())
}
