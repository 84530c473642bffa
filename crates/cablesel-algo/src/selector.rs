//! Catalog filtering and ranking.
//!
//! [`filter_cables`] admits the records that match the requested topology,
//! are rated for the system voltage and can carry the per-circuit current
//! after derating. Survivors are narrowed to the lowest adequate voltage
//! class, and the cheapest of those are flagged as best value.
//!
//! Without a usable load (active power or voltage not positive) the selector
//! fails open and returns the whole catalog unranked, so a caller always has
//! something to show.

use std::cmp::Ordering;

use cablesel_core::{
    CableError, CableId, CableRecord, CableResult, Catalog, LoadSpec, RawLoadInput,
};
use serde::Serialize;

use crate::derating::DeratingFactors;

/// Whether the entries in a result were filtered against a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Filtered,
    /// Whole catalog, no ratings evaluated
    Unfiltered,
}

/// One admitted cable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionEntry<'a> {
    pub cable: &'a CableRecord,
    /// Tabulated rating for the requested arrangement (absent when unfiltered)
    pub base_ampacity: Option<f64>,
    /// Rating after temperature and trench corrections (absent when unfiltered)
    pub derated_ampacity: Option<f64>,
    /// Qualifying value of the rated-voltage class (kV)
    pub rated_kv: Option<f64>,
    pub best: bool,
}

impl SelectionEntry<'_> {
    pub fn id(&self) -> CableId {
        self.cable.id
    }
}

/// Ordered selector output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionResult<'a> {
    pub mode: SelectionMode,
    /// Current each circuit must carry (A); zero when unfiltered
    pub required_current: f64,
    pub entries: Vec<SelectionEntry<'a>>,
}

/// Column a selection can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Designation,
    RatedVoltage,
    Price,
}

impl<'a> SelectionResult<'a> {
    /// Every catalog record in catalog order, nothing flagged.
    pub fn unfiltered(catalog: &'a Catalog) -> Self {
        let entries = catalog
            .iter()
            .map(|cable| SelectionEntry {
                cable,
                base_ampacity: None,
                derated_ampacity: None,
                rated_kv: None,
                best: false,
            })
            .collect();
        Self {
            mode: SelectionMode::Unfiltered,
            required_current: 0.0,
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_filtered(&self) -> bool {
        self.mode == SelectionMode::Filtered
    }

    /// Entries flagged as best value.
    pub fn best(&self) -> impl Iterator<Item = &SelectionEntry<'a>> {
        self.entries.iter().filter(|entry| entry.best)
    }

    pub fn contains(&self, id: CableId) -> bool {
        self.entries.iter().any(|entry| entry.cable.id == id)
    }

    pub fn ids(&self) -> Vec<CableId> {
        self.entries.iter().map(SelectionEntry::id).collect()
    }

    /// Copy ordered by `key`; best flags are left as they are.
    ///
    /// The sort is stable, so equal keys keep catalog order.
    pub fn sorted_by(&self, key: SortKey, descending: bool) -> Self {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| {
            let ordering = compare_entries(a, b, key);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        Self {
            entries,
            ..self.clone()
        }
    }
}

fn compare_entries(a: &SelectionEntry<'_>, b: &SelectionEntry<'_>, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.cable.id.cmp(&b.cable.id),
        SortKey::Designation => a.cable.designation.cmp(&b.cable.designation),
        SortKey::RatedVoltage => sort_kv(a).total_cmp(&sort_kv(b)),
        SortKey::Price => a.cable.price_per_km.total_cmp(&b.cable.price_per_km),
    }
}

/// Qualifying voltage used for sorting; unparseable classes sort first.
fn sort_kv(entry: &SelectionEntry<'_>) -> f64 {
    entry.rated_kv.unwrap_or_else(|| {
        entry
            .cable
            .voltage_class()
            .map(|class| class.qualifying_kv())
            .unwrap_or(0.0)
    })
}

/// Filter and rank the catalog for `spec`.
///
/// Returns [`CableError::Parse`] when a record of the requested topology has
/// a malformed voltage class.
pub fn filter_cables<'a>(catalog: &'a Catalog, spec: &LoadSpec) -> CableResult<SelectionResult<'a>> {
    let spec = spec.normalized();
    if !spec.has_usable_load() {
        return Ok(SelectionResult::unfiltered(catalog));
    }

    let required = spec.current_per_circuit().value();
    let factors = DeratingFactors::for_spec(&spec);
    let system_kv = spec.system_voltage.value();

    let mut admitted = Vec::new();
    for cable in catalog.by_topology(spec.topology) {
        let rated_kv = cable.voltage_class()?.qualifying_kv();
        if rated_kv < system_kv {
            continue;
        }
        let Some(base) = cable.base_ampacity(spec.arrangement) else {
            continue;
        };
        let derated = factors.apply(base);
        if derated >= required {
            admitted.push(SelectionEntry {
                cable,
                base_ampacity: Some(base),
                derated_ampacity: Some(derated),
                rated_kv: Some(rated_kv),
                best: false,
            });
        }
    }

    let min_kv = admitted
        .iter()
        .filter_map(|entry| entry.rated_kv)
        .min_by(f64::total_cmp);
    if let Some(min_kv) = min_kv {
        admitted.retain(|entry| entry.rated_kv == Some(min_kv));
    }

    let min_price = admitted
        .iter()
        .map(|entry| entry.cable.price_per_km)
        .min_by(f64::total_cmp);
    if let Some(min_price) = min_price {
        for entry in &mut admitted {
            entry.best = entry.cable.price_per_km == min_price;
        }
    }

    Ok(SelectionResult {
        mode: SelectionMode::Filtered,
        required_current: required,
        entries: admitted,
    })
}

/// Parse `raw` and filter; any parse failure yields the unfiltered catalog.
pub fn filter_raw<'a>(catalog: &'a Catalog, raw: &RawLoadInput) -> CableResult<SelectionResult<'a>> {
    match raw.parse() {
        Ok(spec) => filter_cables(catalog, &spec),
        Err(CableError::InvalidInput(_)) => Ok(SelectionResult::unfiltered(catalog)),
        Err(err) => Err(err),
    }
}
