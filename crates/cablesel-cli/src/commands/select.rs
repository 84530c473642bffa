//! `cablesel select` - cables able to carry the load, best value marked.

use std::io::{self, Write};

use anyhow::Result;
use cablesel_algo::format::format_amount;
use cablesel_algo::{SelectionEntry, SelectionResult, SortKey};
use cablesel_cli::cli::{Cli, LoadArgs, SortColumn};
use cablesel_cli::common::{fmt_opt, write_structured, OutputFormat};
use serde::Serialize;
use tabwriter::TabWriter;
use tracing::warn;

pub fn handle(
    cli: &Cli,
    load: &LoadArgs,
    sort: Option<SortColumn>,
    descending: bool,
    format: OutputFormat,
) -> Result<()> {
    let config = super::load_config(cli)?;
    let mut session = super::open_session(cli, &config)?;
    let raw = super::load_input(&config, load);

    let result = session.refilter_raw(&raw)?;
    let result = match sort {
        Some(column) => result.sorted_by(sort_key(column), descending),
        None => result,
    };
    if !result.is_filtered() {
        warn!("load inputs are incomplete or invalid; listing the whole catalog");
    }

    let rows: Vec<SelectRow> = result.entries.iter().map(SelectRow::from).collect();
    let mut stdout = io::stdout().lock();
    if write_structured(&rows, format, &mut stdout)? {
        return Ok(());
    }
    print_table(&result, &rows, stdout)
}

fn sort_key(column: SortColumn) -> SortKey {
    match column {
        SortColumn::Id => SortKey::Id,
        SortColumn::Designation => SortKey::Designation,
        SortColumn::Voltage => SortKey::RatedVoltage,
        SortColumn::Price => SortKey::Price,
    }
}

#[derive(Serialize)]
struct SelectRow<'a> {
    best: bool,
    id: u32,
    designation: &'a str,
    rated_voltage: &'a str,
    base_ampacity: Option<f64>,
    derated_ampacity: Option<f64>,
    price_per_km: f64,
}

impl<'a> From<&SelectionEntry<'a>> for SelectRow<'a> {
    fn from(entry: &SelectionEntry<'a>) -> Self {
        let cable = entry.cable;
        Self {
            best: entry.best,
            id: cable.id.value(),
            designation: &cable.designation,
            rated_voltage: &cable.rated_voltage,
            base_ampacity: entry.base_ampacity,
            derated_ampacity: entry.derated_ampacity,
            price_per_km: cable.price_per_km,
        }
    }
}

fn print_table<W: Write>(result: &SelectionResult<'_>, rows: &[SelectRow], out: W) -> Result<()> {
    let mut writer = TabWriter::new(out);
    if result.is_filtered() {
        writeln!(
            writer,
            "Required current per circuit: {:.2} A",
            result.required_current
        )?;
        if rows.is_empty() {
            writeln!(writer, "No cable in the catalog can carry this load.")?;
            writer.flush()?;
            return Ok(());
        }
    }
    writeln!(
        writer,
        " \tID\tDESIGNATION\tVOLTAGE\tBASE (A)\tDERATED (A)\tPRICE/km"
    )?;
    for row in rows {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            if row.best { "*" } else { " " },
            row.id,
            row.designation,
            row.rated_voltage,
            fmt_opt(row.base_ampacity, 0),
            fmt_opt(row.derated_ampacity, 1),
            format_amount(row.price_per_km),
        )?;
    }
    writer.flush()?;
    Ok(())
}
