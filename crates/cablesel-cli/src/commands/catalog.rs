//! `cablesel catalog` - list, show, validate and export cable records.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Result};
use cablesel_algo::format::format_amount;
use cablesel_algo::CableDetails;
use cablesel_cli::cli::{CatalogCommands, Cli};
use cablesel_cli::common::{fmt_opt, write_json, write_structured, OutputFormat};
use cablesel_core::{Arrangement, CableError, CableId, CableRecord, Catalog, Topology};
use cablesel_io::write_catalog;
use serde::Serialize;
use tabwriter::TabWriter;

pub fn handle(cli: &Cli, command: &CatalogCommands) -> Result<()> {
    let config = super::load_config(cli)?;
    let catalog = super::load_catalog(cli, &config)?;
    match command {
        CatalogCommands::List { topology, format } => {
            handle_list(&catalog, topology.as_deref(), *format)
        }
        CatalogCommands::Show { id, format } => handle_show(&catalog, CableId::new(*id), *format),
        CatalogCommands::Validate => handle_validate(&catalog),
        CatalogCommands::Export { path } => handle_export(&catalog, path),
    }
}

#[derive(Serialize)]
struct CatalogRow<'a> {
    id: u32,
    designation: &'a str,
    rated_voltage: &'a str,
    topology: &'static str,
    flat_ampacity: Option<f64>,
    trefoil_ampacity: Option<f64>,
    resistance_per_km: f64,
    price_per_km: f64,
}

impl<'a> From<&'a CableRecord> for CatalogRow<'a> {
    fn from(cable: &'a CableRecord) -> Self {
        Self {
            id: cable.id.value(),
            designation: &cable.designation,
            rated_voltage: &cable.rated_voltage,
            topology: cable.topology().label(),
            flat_ampacity: cable.flat_ampacity,
            trefoil_ampacity: cable.trefoil_ampacity,
            resistance_per_km: cable.resistance_per_km,
            price_per_km: cable.price_per_km,
        }
    }
}

fn handle_list(catalog: &Catalog, topology: Option<&str>, format: OutputFormat) -> Result<()> {
    let topology: Option<Topology> = topology.map(str::parse).transpose()?;
    let rows: Vec<CatalogRow> = catalog
        .iter()
        .filter(|cable| topology.map_or(true, |t| cable.topology() == t))
        .map(CatalogRow::from)
        .collect();

    let mut stdout = io::stdout().lock();
    if write_structured(&rows, format, &mut stdout)? {
        return Ok(());
    }

    let mut writer = TabWriter::new(stdout);
    writeln!(
        writer,
        "ID\tDESIGNATION\tVOLTAGE\tTOPOLOGY\tFLAT (A)\tTREFOIL (A)\tR (Ω/km)\tPRICE/km"
    )?;
    for row in &rows {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.id,
            row.designation,
            row.rated_voltage,
            row.topology,
            fmt_opt(row.flat_ampacity, 0),
            fmt_opt(row.trefoil_ampacity, 0),
            row.resistance_per_km,
            format_amount(row.price_per_km),
        )?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct RecordView<'a> {
    #[serde(flatten)]
    cable: &'a CableRecord,
    topology: Topology,
    qualifying_kv: f64,
}

fn handle_show(catalog: &Catalog, id: CableId, format: OutputFormat) -> Result<()> {
    let cable = catalog.get(id).ok_or(CableError::UnknownCable(id))?;
    let view = RecordView {
        cable,
        topology: cable.topology(),
        qualifying_kv: cable.voltage_class()?.qualifying_kv(),
    };

    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Table => {
            writeln!(stdout, "Cable {} ({})", cable.id, view.topology)?;
            writeln!(
                stdout,
                "Rated voltage: {} (qualifies up to {} kV)",
                cable.rated_voltage, view.qualifying_kv
            )?;
            writeln!(stdout, "Price: {} per km", format_amount(cable.price_per_km))?;
            let arrangements: &[Arrangement] = if cable.is_single_core() {
                &[Arrangement::Flat, Arrangement::Trefoil]
            } else {
                &[Arrangement::Trefoil]
            };
            for arrangement in arrangements {
                writeln!(stdout)?;
                writeln!(stdout, "[{arrangement}]")?;
                writeln!(stdout, "{}", CableDetails::for_cable(cable, *arrangement))?;
            }
        }
        OutputFormat::Json => write_json(&view, &mut stdout, true)?,
        OutputFormat::Jsonl => write_json(&view, &mut stdout, false)?,
        OutputFormat::Csv => {
            write_structured(&[CatalogRow::from(cable)], format, &mut stdout)?;
        }
    }
    Ok(())
}

fn handle_validate(catalog: &Catalog) -> Result<()> {
    let diagnostics = catalog.validate();
    let mut stdout = io::stdout().lock();
    for issue in &diagnostics.issues {
        writeln!(stdout, "{issue}")?;
    }
    let errors = diagnostics.error_count();
    writeln!(
        stdout,
        "{} cables checked: {}",
        catalog.len(),
        diagnostics.summary()
    )?;
    if errors > 0 {
        bail!("catalog has {errors} invalid record(s)");
    }
    Ok(())
}

fn handle_export(catalog: &Catalog, path: &Path) -> Result<()> {
    let format = write_catalog(catalog, path)?;
    println!(
        "Exported {} cables to {} ({})",
        catalog.len(),
        path.display(),
        format
    );
    Ok(())
}
