//! Evaluation context for an interactive caller.
//!
//! A [`Session`] holds what a front end would otherwise keep in globals: the
//! current load inputs, the cables the last filter showed, the selected cable
//! and the most recent calculation. The catalog itself is shared read-only.

use std::sync::Arc;

use cablesel_core::{CableError, CableId, CableRecord, CableResult, Catalog, LoadSpec, RawLoadInput};
use tracing::{debug, info, warn};

use crate::circuit::{analyze_selection, CircuitAnalysis};
use crate::cost::EconomicParams;
use crate::details::CableDetails;
use crate::report::{build_report, CalculationReport};
use crate::selector::{filter_cables, filter_raw, SelectionResult};

#[derive(Debug, Clone)]
pub struct Session {
    catalog: Arc<Catalog>,
    params: EconomicParams,
    spec: LoadSpec,
    visible: Vec<CableId>,
    selected: Option<CableId>,
    last_report: Option<CalculationReport>,
}

impl Session {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_params(catalog, EconomicParams::default())
    }

    pub fn with_params(catalog: Arc<Catalog>, params: EconomicParams) -> Self {
        let visible = catalog.iter().map(|c| c.id).collect();
        Self {
            catalog,
            params,
            spec: LoadSpec::default(),
            visible,
            selected: None,
            last_report: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn params(&self) -> &EconomicParams {
        &self.params
    }

    pub fn spec(&self) -> &LoadSpec {
        &self.spec
    }

    /// Ids shown by the most recent filter, in display order.
    pub fn visible(&self) -> &[CableId] {
        &self.visible
    }

    pub fn selected(&self) -> Option<CableId> {
        self.selected
    }

    pub fn selected_cable(&self) -> Option<&CableRecord> {
        self.selected.and_then(|id| self.catalog.get(id))
    }

    /// Replace the load inputs and filter again.
    ///
    /// The inputs are stored as given; each evaluation clamps them against
    /// the topology it uses. Any selection is dropped; the last report is
    /// kept.
    pub fn refilter(&mut self, spec: LoadSpec) -> CableResult<SelectionResult<'_>> {
        self.spec = spec;
        self.clear_selection();
        match filter_cables(&self.catalog, &self.spec) {
            Ok(result) => {
                debug!(mode = ?result.mode, shown = result.len(), "refiltered catalog");
                self.visible = result.ids();
                Ok(result)
            }
            Err(err) => {
                self.visible.clear();
                Err(err)
            }
        }
    }

    /// Refilter from text inputs, showing the whole catalog if they don't parse.
    ///
    /// The stored load inputs only change when parsing succeeds.
    pub fn refilter_raw(&mut self, raw: &RawLoadInput) -> CableResult<SelectionResult<'_>> {
        match raw.parse() {
            Ok(spec) => self.refilter(spec),
            Err(err) => {
                debug!(error = %err, "unparseable load input, showing full catalog");
                self.clear_selection();
                let result = filter_raw(&self.catalog, raw)?;
                self.visible = result.ids();
                Ok(result)
            }
        }
    }

    /// Select a catalog cable.
    ///
    /// Any catalog id is accepted; one outside the current results is logged.
    pub fn select(&mut self, id: CableId) -> CableResult<&CableRecord> {
        let cable = self.catalog.get(id).ok_or(CableError::UnknownCable(id))?;
        if !self.visible.contains(&id) {
            warn!(cable = %id, "selected cable is not in the current results");
        }
        info!(cable = %id, designation = %cable.designation, "cable selected");
        self.selected = Some(id);
        Ok(cable)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Tabulated properties of the selected cable.
    pub fn details(&self) -> CableResult<CableDetails> {
        let cable = self.selected_cable().ok_or(CableError::NoSelection)?;
        Ok(CableDetails::for_cable(cable, self.spec.arrangement))
    }

    /// Live capacity check of the selected cable.
    pub fn capacity_check(&self) -> CableResult<CircuitAnalysis> {
        analyze_selection(self.selected_cable(), &self.spec)
    }

    /// Full calculation for the selected cable; the report replaces the
    /// previous one.
    pub fn calculate(&mut self) -> CableResult<&CalculationReport> {
        let cable = self.selected_cable().ok_or(CableError::NoSelection)?;
        let report = build_report(cable, &self.spec, &self.params)?;
        info!(
            cable = %report.cable.id,
            total_cost = report.cost.total_cost,
            status = %report.analysis.status,
            "calculation complete"
        );
        Ok(self.last_report.insert(report))
    }

    pub fn last_report(&self) -> CableResult<&CalculationReport> {
        self.last_report.as_ref().ok_or(CableError::NoReport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::analyze_circuit;
    use cablesel_core::units::Megawatts;

    fn session() -> Session {
        Session::new(Arc::new(Catalog::builtin()))
    }

    #[test]
    fn test_new_session_shows_everything() {
        let s = session();
        assert_eq!(s.visible().len(), 67);
        assert!(s.selected().is_none());
        assert!(matches!(s.last_report(), Err(CableError::NoReport)));
    }

    #[test]
    fn test_refilter_clears_selection() {
        let mut s = session();
        s.select(CableId::new(6)).unwrap();
        let shown = s.refilter(LoadSpec::default()).unwrap().len();
        assert!(shown > 0);
        assert!(s.selected().is_none());
        assert!(s.visible().contains(&CableId::new(6)));
    }

    #[test]
    fn test_select_unknown_cable() {
        let mut s = session();
        let err = s.select(CableId::new(999)).unwrap_err();
        assert!(matches!(err, CableError::UnknownCable(id) if id == CableId::new(999)));
        assert!(s.selected().is_none());
    }

    #[test]
    fn test_capacity_check_needs_selection() {
        let mut s = session();
        assert!(matches!(s.capacity_check(), Err(CableError::NoSelection)));
        assert!(matches!(s.calculate(), Err(CableError::NoSelection)));
        s.select(CableId::new(6)).unwrap();
        assert!(s.capacity_check().unwrap().status.is_valid());
    }

    #[test]
    fn test_calculate_stores_last_report() {
        let mut s = session();
        s.refilter(LoadSpec::default()).unwrap();
        s.select(CableId::new(6)).unwrap();
        let total = s.calculate().unwrap().cost.total_cost;
        assert_eq!(s.last_report().unwrap().cost.total_cost, total);

        // refiltering drops the selection but not the history
        s.refilter(LoadSpec {
            active_power: Megawatts(0.2),
            ..LoadSpec::default()
        })
        .unwrap();
        assert!(s.selected().is_none());
        assert!(s.last_report().is_ok());
    }

    #[test]
    fn test_refilter_raw_fails_open_and_keeps_spec() {
        let mut s = session();
        s.refilter(LoadSpec::default()).unwrap();
        let raw = RawLoadInput {
            system_voltage: "?".into(),
            ..RawLoadInput::from_spec(&LoadSpec::default())
        };
        let result = s.refilter_raw(&raw).unwrap();
        assert!(!result.is_filtered());
        assert_eq!(s.visible().len(), 67);
        assert_eq!(s.spec(), &LoadSpec::default());
    }

    #[test]
    fn test_cross_topology_check_matches_direct_analysis() {
        // three-core cable under single-core inputs: four circuits stay four
        let spec = LoadSpec {
            parallel_circuits: 4,
            ..LoadSpec::default()
        };
        let catalog = Catalog::builtin();
        let direct = analyze_circuit(catalog.get(CableId::new(13)).unwrap(), &spec).unwrap();
        assert_eq!(direct.cables_in_trench, 4);

        let mut s = session();
        s.refilter(spec.clone()).unwrap();
        s.select(CableId::new(13)).unwrap();
        assert_eq!(s.capacity_check().unwrap(), direct);

        let raw = RawLoadInput::from_spec(&spec);
        s.refilter_raw(&raw).unwrap();
        s.select(CableId::new(13)).unwrap();
        let checked = s.capacity_check().unwrap();
        assert_eq!(checked, direct);
        assert!((checked.current_per_circuit - direct.total_current / 4.0).abs() < 1e-9);

        let report = s.calculate().unwrap();
        assert_eq!(report.analysis, direct);
        assert_eq!(report.load.parallel_circuits, 4);
    }

    #[test]
    fn test_details_follow_arrangement() {
        let mut s = session();
        s.select(CableId::new(6)).unwrap();
        assert_eq!(s.details().unwrap().base_ampacity, Some(279.0));
    }
}
