//! Lifecycle cost of a cable run: purchase plus the energy lost over the
//! evaluation horizon.

use std::collections::BTreeMap;

use cablesel_core::{CableRecord, LoadCategory, LoadSpec};
use serde::{Deserialize, Serialize};

use crate::circuit::CircuitAnalysis;

/// Operating hours per day assumed for a category missing from the table.
pub const DEFAULT_DAILY_HOURS: f64 = 8.0;

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Economic assumptions for cost estimation.
///
/// The defaults are 2500 per MWh over ten years with the standard operating
/// hours per load category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomicParams {
    pub electricity_price_per_mwh: f64,
    pub horizon_years: f64,
    pub currency: String,
    /// Operating hours per day keyed by lowercase category name
    pub daily_hours: BTreeMap<String, f64>,
}

impl Default for EconomicParams {
    fn default() -> Self {
        let daily_hours = [
            (LoadCategory::Industrial, 10.0),
            (LoadCategory::Residential, 5.0),
            (LoadCategory::Municipal, 12.0),
            (LoadCategory::Commercial, 8.0),
        ]
        .into_iter()
        .map(|(category, hours)| (category_key(category), hours))
        .collect();

        Self {
            electricity_price_per_mwh: 2500.0,
            horizon_years: 10.0,
            currency: "TL".to_string(),
            daily_hours,
        }
    }
}

fn category_key(category: LoadCategory) -> String {
    category.to_string().to_lowercase()
}

impl EconomicParams {
    pub fn daily_hours_for(&self, category: LoadCategory) -> f64 {
        self.daily_hours
            .get(&category_key(category))
            .copied()
            .unwrap_or(DEFAULT_DAILY_HOURS)
    }

    pub fn annual_hours_for(&self, category: LoadCategory) -> f64 {
        self.daily_hours_for(category) * DAYS_PER_YEAR
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostEstimate {
    pub daily_hours: f64,
    pub annual_hours: f64,
    pub annual_energy_loss_mwh: f64,
    pub annual_energy_cost: f64,
    /// Energy cost over the whole horizon
    pub energy_cost: f64,
    /// Physical cable length bought (km)
    pub total_cable_length_km: f64,
    pub installation_cost: f64,
    pub total_cost: f64,
    pub installation_share_pct: f64,
    pub energy_share_pct: f64,
    pub horizon_years: f64,
    pub electricity_price_per_mwh: f64,
}

/// [`estimate_cost_with`] under the default economics.
pub fn estimate_cost(cable: &CableRecord, spec: &LoadSpec, analysis: &CircuitAnalysis) -> CostEstimate {
    estimate_cost_with(cable, spec, analysis, &EconomicParams::default())
}

/// Energy and installation cost over `params.horizon_years`.
///
/// Single-core circuits buy three cables per circuit, three-core circuits
/// one. Shares are 0 when the total is 0.
pub fn estimate_cost_with(
    cable: &CableRecord,
    spec: &LoadSpec,
    analysis: &CircuitAnalysis,
    params: &EconomicParams,
) -> CostEstimate {
    let topology = cable.topology();
    let circuits = spec
        .parallel_circuits
        .clamp(1, topology.max_parallel_circuits());

    let daily_hours = params.daily_hours_for(spec.load_category);
    let annual_hours = daily_hours * DAYS_PER_YEAR;
    let annual_energy_loss_mwh = analysis.active_loss_total_mw() * annual_hours;
    let annual_energy_cost = annual_energy_loss_mwh * params.electricity_price_per_mwh;
    let energy_cost = annual_energy_loss_mwh * params.horizon_years * params.electricity_price_per_mwh;

    let total_cable_length_km = spec.cable_length.value()
        * f64::from(circuits)
        * f64::from(topology.cables_per_circuit());
    let installation_cost = total_cable_length_km * cable.price_per_km;
    let total_cost = energy_cost + installation_cost;

    let (installation_share_pct, energy_share_pct) = if total_cost > 0.0 {
        (
            installation_cost / total_cost * 100.0,
            energy_cost / total_cost * 100.0,
        )
    } else {
        (0.0, 0.0)
    };

    CostEstimate {
        daily_hours,
        annual_hours,
        annual_energy_loss_mwh,
        annual_energy_cost,
        energy_cost,
        total_cable_length_km,
        installation_cost,
        total_cost,
        installation_share_pct,
        energy_share_pct,
        horizon_years: params.horizon_years,
        electricity_price_per_mwh: params.electricity_price_per_mwh,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::analyze_circuit;
    use cablesel_core::{CableId, Catalog};

    fn scenario() -> (CableRecord, LoadSpec, CircuitAnalysis) {
        let cable = Catalog::builtin().get(CableId::new(6)).cloned().unwrap();
        let spec = LoadSpec::default();
        let analysis = analyze_circuit(&cable, &spec).unwrap();
        (cable, spec, analysis)
    }

    #[test]
    fn test_default_hours() {
        let params = EconomicParams::default();
        assert_eq!(params.daily_hours_for(LoadCategory::Industrial), 10.0);
        assert_eq!(params.daily_hours_for(LoadCategory::Residential), 5.0);
        assert_eq!(params.daily_hours_for(LoadCategory::Municipal), 12.0);
        assert_eq!(params.daily_hours_for(LoadCategory::Commercial), 8.0);
        assert_eq!(params.annual_hours_for(LoadCategory::Industrial), 3650.0);
    }

    #[test]
    fn test_missing_category_defaults_to_eight() {
        let mut params = EconomicParams::default();
        params.daily_hours.remove("municipal");
        assert_eq!(params.daily_hours_for(LoadCategory::Municipal), DEFAULT_DAILY_HOURS);
    }

    #[test]
    fn test_default_scenario_cost() {
        let (cable, spec, analysis) = scenario();
        let cost = estimate_cost(&cable, &spec, &analysis);

        let expected_energy = analysis.active_loss_total_mw() * 3650.0 * 10.0 * 2500.0;
        assert!((cost.energy_cost - expected_energy).abs() < 1e-6);
        assert!((cost.total_cable_length_km - 2.4).abs() < 1e-12);
        assert!((cost.installation_cost - 2.4 * 623_000.0).abs() < 1e-6);
        assert_eq!(cost.total_cost, cost.energy_cost + cost.installation_cost);
        assert!((cost.installation_share_pct + cost.energy_share_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_three_core_buys_one_cable_per_circuit() {
        let catalog = Catalog::builtin();
        let cable = catalog
            .iter()
            .find(|c| !c.is_single_core())
            .cloned()
            .unwrap();
        let spec = LoadSpec {
            parallel_circuits: 3,
            topology: cable.topology(),
            ..LoadSpec::default()
        };
        let analysis = analyze_circuit(&cable, &spec).unwrap();
        let cost = estimate_cost(&cable, &spec, &analysis);
        assert!((cost.total_cable_length_km - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_zero_total_has_zero_shares() {
        let (mut cable, _, _) = scenario();
        cable.price_per_km = 0.0;
        let spec = LoadSpec {
            active_power: cablesel_core::Megawatts(0.0),
            reactive_power: cablesel_core::Megavars(0.0),
            ..LoadSpec::default()
        };
        let analysis = analyze_circuit(&cable, &spec).unwrap();
        let cost = estimate_cost(&cable, &spec, &analysis);
        assert_eq!(cost.total_cost, 0.0);
        assert_eq!(cost.installation_share_pct, 0.0);
        assert_eq!(cost.energy_share_pct, 0.0);
    }

    #[test]
    fn test_custom_economics() {
        let (cable, spec, analysis) = scenario();
        let params = EconomicParams {
            electricity_price_per_mwh: 5000.0,
            horizon_years: 20.0,
            ..EconomicParams::default()
        };
        let base = estimate_cost(&cable, &spec, &analysis);
        let custom = estimate_cost_with(&cable, &spec, &analysis, &params);
        assert!((custom.energy_cost - 4.0 * base.energy_cost).abs() < 1e-6);
        assert_eq!(custom.installation_cost, base.installation_cost);
    }

    #[test]
    fn test_params_from_partial_toml() {
        let params: EconomicParams = toml::from_str("horizon_years = 5.0\n").unwrap();
        assert_eq!(params.horizon_years, 5.0);
        assert_eq!(params.electricity_price_per_mwh, 2500.0);
        assert_eq!(params.daily_hours_for(LoadCategory::Industrial), 10.0);
    }
}
