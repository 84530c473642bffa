//! Text report for a full calculation.
//!
//! [`build_report`] runs the analyzer and the cost estimator for one cable
//! and keeps the structured results next to the rendered text, so callers
//! can emit either.

use std::fmt;

use cablesel_core::{CableRecord, CableResult, LoadSpec};
use serde::Serialize;

use crate::circuit::{analyze_circuit, CircuitAnalysis, SYSTEM_FREQUENCY_HZ};
use crate::cost::{estimate_cost_with, CostEstimate, EconomicParams};
use crate::format::{format_amount, format_currency};

const RULE: &str = "════════════════════════════════════════════════════════════";

/// Structured results of one calculation plus their text rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationReport {
    pub cable: CableRecord,
    pub load: LoadSpec,
    pub analysis: CircuitAnalysis,
    pub cost: CostEstimate,
    pub text: String,
}

/// Analyze `cable` under `spec`, cost it with `params` and render the report.
pub fn build_report(
    cable: &CableRecord,
    spec: &LoadSpec,
    params: &EconomicParams,
) -> CableResult<CalculationReport> {
    let load = LoadSpec {
        topology: cable.topology(),
        ..spec.clone()
    }
    .normalized();
    let analysis = analyze_circuit(cable, &load)?;
    let cost = estimate_cost_with(cable, &load, &analysis, params);
    let text = render_report(&cost, &analysis, cable, &load, params);
    Ok(CalculationReport {
        cable: cable.clone(),
        load,
        analysis,
        cost,
        text,
    })
}

/// Loss as a percentage of the matching load component, `N/A` without load.
fn share_of_load(loss: f64, load: f64) -> String {
    if load > 0.0 {
        format!("{:.2}%", loss / load * 100.0)
    } else {
        "N/A".to_string()
    }
}

/// Render the multi-section calculation report.
pub fn render_report(
    cost: &CostEstimate,
    analysis: &CircuitAnalysis,
    cable: &CableRecord,
    spec: &LoadSpec,
    params: &EconomicParams,
) -> String {
    ReportView {
        cost,
        analysis,
        cable,
        spec,
        currency: &params.currency,
    }
    .to_string()
}

struct ReportView<'a> {
    cost: &'a CostEstimate,
    analysis: &'a CircuitAnalysis,
    cable: &'a CableRecord,
    spec: &'a LoadSpec,
    currency: &'a str,
}

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ReportView {
            cost,
            analysis,
            cable,
            spec,
            currency,
        } = self;
        let p = spec.active_power.value();
        let q = spec.reactive_power.value();

        writeln!(out, "{RULE}")?;
        writeln!(out, "{:^60}", "CABLE ANALYSIS RESULTS")?;
        writeln!(out, "{RULE}")?;
        writeln!(out)?;
        writeln!(out, "SELECTED CABLE: {} - {}", cable.designation, cable.rated_voltage)?;
        writeln!(
            out,
            "Cable Length: {} km | Parallel Circuits: {} | Arrangement: {} | Load Type: {}",
            spec.cable_length.value(),
            spec.parallel_circuits,
            spec.arrangement,
            spec.load_category
        )?;
        writeln!(out)?;

        writeln!(out, "ELECTRICAL PARAMETERS:")?;
        writeln!(out, "├─ Resistance (R): {} Ω/km", analysis.resistance_per_km)?;
        writeln!(out, "├─ Inductance (L): {} mH/km", analysis.inductance_per_km)?;
        writeln!(
            out,
            "└─ Reactance (X): {:.4} Ω/km (at {SYSTEM_FREQUENCY_HZ}Hz)",
            analysis.reactance_per_km
        )?;
        writeln!(out)?;

        writeln!(out, "LOAD CONDITIONS:")?;
        writeln!(out, "├─ Active Power (P): {p} MW")?;
        writeln!(out, "├─ Reactive Power (Q): {q} MVar")?;
        writeln!(out, "├─ Apparent Power: {:.3} MVA", analysis.apparent_power_mva)?;
        writeln!(out, "├─ Power Factor: {:.3}", analysis.power_factor)?;
        writeln!(out, "├─ Total Current: {:.1} A", analysis.total_current)?;
        writeln!(out, "└─ Current per Circuit: {:.1} A", analysis.current_per_circuit)?;
        writeln!(out)?;

        writeln!(out, "LINE LOSSES:")?;
        writeln!(
            out,
            "├─ Active Power Loss: {:.3} kW ({} of load)",
            analysis.active_loss_total_kw,
            share_of_load(analysis.active_loss_total_mw(), p)
        )?;
        writeln!(
            out,
            "└─ Reactive Power Loss: {:.3} kVar ({} of load)",
            analysis.reactive_loss_total_kvar,
            share_of_load(analysis.reactive_loss_total_mvar(), q)
        )?;
        writeln!(out)?;

        writeln!(out, "CAPACITY CHECK:")?;
        writeln!(out, "├─ Base Capacity: {} A", analysis.base_ampacity)?;
        writeln!(out, "├─ Temperature Factor: {:.2}", analysis.temperature_factor)?;
        writeln!(out, "├─ Trench Factor: {:.2}", analysis.trench_factor)?;
        writeln!(out, "├─ Derated Capacity: {:.1} A", analysis.derated_ampacity)?;
        writeln!(out, "├─ Current per Circuit: {:.1} A", analysis.current_per_circuit)?;
        writeln!(out, "├─ Status: {}", analysis.status.verdict())?;
        writeln!(out, "└─ Safety Margin: {:.1}%", analysis.safety_margin_pct)?;
        writeln!(out)?;

        writeln!(
            out,
            "VOLTAGE REGULATION (VR = (I×R×cos φ + I×X×sin φ)×L / VLN×100%):"
        )?;
        writeln!(
            out,
            "├─ Power Factor Angle (θ): {:.2}°",
            analysis.power_factor_angle_degrees().value()
        )?;
        writeln!(out, "├─ Voltage Drop (L-N): {:.1} V", analysis.voltage_drop_v)?;
        writeln!(out, "├─ Voltage Regulation: {:.3}%", analysis.voltage_regulation_pct)?;
        writeln!(out, "└─ Terminal Voltage (L-L): {:.1} V", analysis.terminal_voltage_ll_v)?;
        writeln!(out)?;

        writeln!(out, "ECONOMIC ANALYSIS ({}-Year Period):", cost.horizon_years)?;
        writeln!(
            out,
            "├─ Operating Hours: {} hours/day ({} hours/year)",
            cost.daily_hours, cost.annual_hours
        )?;
        writeln!(out, "├─ Annual Energy Loss: {:.2} MWh", cost.annual_energy_loss_mwh)?;
        writeln!(
            out,
            "├─ Electricity Price: {} {currency}/MWh",
            format_amount(cost.electricity_price_per_mwh)
        )?;
        writeln!(
            out,
            "├─ {}-Year Energy Loss Cost: {}",
            cost.horizon_years,
            format_currency(cost.energy_cost, currency)
        )?;
        writeln!(
            out,
            "├─ Cable Installation Cost: {}",
            format_currency(cost.installation_cost, currency)
        )?;
        writeln!(
            out,
            "└─ TOTAL {}-YEAR COST: {}",
            cost.horizon_years,
            format_currency(cost.total_cost, currency)
        )?;
        writeln!(out)?;

        writeln!(out, "COST BREAKDOWN:")?;
        writeln!(out, "├─ Cable Cost: {:.1}%", cost.installation_share_pct)?;
        writeln!(out, "└─ Energy Loss Cost: {:.1}%", cost.energy_share_pct)?;
        writeln!(out)?;
        writeln!(out, "{RULE}")
    }
}
