//! Invariants of the derating tables, the selector and the cost model,
//! checked over sweeps of inputs against the built-in catalog.

use cablesel_algo::derating::{temperature_factor, trench_factor, TEMPERATURE_TABLE, TRENCH_TABLE};
use cablesel_algo::{analyze_circuit, estimate_cost, filter_cables, CapacityStatus, SelectionMode};
use cablesel_core::units::{Celsius, Kilometers, Kilovolts, Megavars, Megawatts};
use cablesel_core::{Arrangement, Catalog, LoadCategory, LoadSpec, Topology};

fn sweep(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    let n = ((end - start) / step).round() as usize;
    (0..=n).map(move |i| start + i as f64 * step)
}

/// Temperature factor never increases with temperature and stays in range.
#[test]
fn test_temperature_factor_monotone_and_bounded() {
    let mut previous = f64::INFINITY;
    for t in sweep(-10.0, 60.0, 0.25) {
        let f = temperature_factor(Celsius(t));
        assert!((0.80..=1.15).contains(&f), "factor {f} at {t} °C");
        assert!(f <= previous, "factor rose at {t} °C");
        previous = f;
    }
    for (t, f) in TEMPERATURE_TABLE {
        assert_eq!(temperature_factor(Celsius(t)), f);
    }
}

/// Trench factor matches the table and saturates outside [1, 6].
#[test]
fn test_trench_factor_table_and_saturation() {
    for (i, f) in TRENCH_TABLE.iter().enumerate() {
        assert_eq!(trench_factor(i as u32 + 1), *f);
    }
    assert_eq!(trench_factor(0), trench_factor(1));
    for n in 7..40 {
        assert_eq!(trench_factor(n), trench_factor(6));
    }
}

/// Without usable power or voltage the selector returns the catalog as is.
#[test]
fn test_unusable_load_returns_full_catalog_in_order() {
    let catalog = Catalog::builtin();
    let zero_power = LoadSpec {
        active_power: Megawatts(0.0),
        ..LoadSpec::default()
    };
    let zero_voltage = LoadSpec {
        system_voltage: Kilovolts(0.0),
        ..LoadSpec::default()
    };
    for spec in [zero_power, zero_voltage] {
        let result = filter_cables(&catalog, &spec).unwrap();
        assert_eq!(result.mode, SelectionMode::Unfiltered);
        let ids: Vec<_> = catalog.iter().map(|c| c.id).collect();
        assert_eq!(result.ids(), ids);
        assert!(result.entries.iter().all(|e| !e.best));
    }
}

/// Raising the system voltage past a cable's class removes it for good.
#[test]
fn test_voltage_monotonicity() {
    let catalog = Catalog::builtin();
    for topology in [Topology::SingleCore, Topology::ThreeCore] {
        for cable in catalog.by_topology(topology) {
            let rated = cable.voltage_class().unwrap().qualifying_kv();
            let mut excluded = false;
            for v in sweep(0.5, 40.0, 0.5) {
                let spec = LoadSpec {
                    active_power: Megawatts(0.05),
                    reactive_power: Megavars(0.0),
                    system_voltage: Kilovolts(v),
                    parallel_circuits: 1,
                    topology,
                    arrangement: Arrangement::Trefoil,
                    ..LoadSpec::default()
                };
                let result = filter_cables(&catalog, &spec).unwrap();
                let entry = result.entries.iter().find(|e| e.cable.id == cable.id);
                if v > rated {
                    assert!(entry.is_none(), "{} admitted at {v} kV", cable.designation);
                    excluded = true;
                } else if excluded {
                    panic!("{} re-admitted at {v} kV", cable.designation);
                }
            }
        }
    }
}

/// Only the lowest admitted voltage class survives.
#[test]
fn test_single_voltage_class_survives() {
    let catalog = Catalog::builtin();
    for v in [0.4, 0.8, 3.0, 6.0, 10.0, 15.0, 30.0] {
        for circuits in 1..=6 {
            let spec = LoadSpec {
                active_power: Megawatts(v * 0.4),
                reactive_power: Megavars(v * 0.1),
                system_voltage: Kilovolts(v),
                parallel_circuits: circuits,
                topology: Topology::ThreeCore,
                ..LoadSpec::default()
            };
            let result = filter_cables(&catalog, &spec).unwrap();
            let mut classes: Vec<f64> = result.entries.iter().filter_map(|e| e.rated_kv).collect();
            classes.dedup();
            assert!(classes.len() <= 1, "mixed classes {classes:?} at {v} kV");
            if let Some(kv) = classes.first() {
                assert!(*kv >= v);
                assert!(result.best().count() >= 1);
            }
        }
    }
}

/// Every admitted entry is able to carry the required current.
#[test]
fn test_admitted_entries_carry_current() {
    let catalog = Catalog::builtin();
    for arrangement in [Arrangement::Flat, Arrangement::Trefoil] {
        for p in [0.1, 0.3, 0.6, 1.0] {
            let spec = LoadSpec {
                active_power: Megawatts(p),
                arrangement,
                ..LoadSpec::default()
            };
            let result = filter_cables(&catalog, &spec).unwrap();
            for entry in &result.entries {
                let analysis = analyze_circuit(entry.cable, &spec).unwrap();
                assert_eq!(analysis.status, CapacityStatus::Valid);
                assert!((analysis.derated_ampacity - entry.derated_ampacity.unwrap()).abs() < 1e-9);
            }
        }
    }
}

/// Total cost is exactly energy plus installation.
#[test]
fn test_cost_additivity() {
    let catalog = Catalog::builtin();
    let categories = LoadCategory::ALL;
    for (i, cable) in catalog.iter().enumerate() {
        let spec = LoadSpec {
            active_power: Megawatts(0.1 + i as f64 * 0.05),
            reactive_power: Megavars(0.05),
            system_voltage: Kilovolts(0.4),
            cable_length: Kilometers(0.2 + i as f64 * 0.01),
            topology: cable.topology(),
            arrangement: Arrangement::Trefoil,
            load_category: categories[i % categories.len()],
            ..LoadSpec::default()
        };
        let analysis = analyze_circuit(cable, &spec).unwrap();
        let cost = estimate_cost(cable, &spec, &analysis);
        assert_eq!(cost.total_cost, cost.energy_cost + cost.installation_cost);
        assert!(cost.total_cost > 0.0);
    }
}
