//! The immutable cable reference table.
//!
//! A [`Catalog`] is built once (from the built-in table or a loader) and
//! shared read-only by every evaluation. It preserves record order, which is
//! the order selection results are reported in.

use std::collections::HashSet;

use serde::Serialize;

use crate::diagnostics::Diagnostics;
use crate::{CableId, CableRecord, Topology};

/// Ordered, read-only collection of cable records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    records: Vec<CableRecord>,
}

impl Catalog {
    pub fn new(records: Vec<CableRecord>) -> Self {
        Self { records }
    }

    /// The 67-record reference table (0.6/1 kV up to 20.3/35 kV).
    pub fn builtin() -> Self {
        Self::new(builtin_records())
    }

    pub fn records(&self) -> &[CableRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CableRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: CableId) -> Option<&CableRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records of one topology, in catalog order.
    pub fn by_topology(&self, topology: Topology) -> impl Iterator<Item = &CableRecord> {
        self.records.iter().filter(move |r| r.topology() == topology)
    }

    /// Check every record against the catalog invariants.
    pub fn validate(&self) -> Diagnostics {
        let mut diag = Diagnostics::new();
        let mut seen = HashSet::new();

        if self.records.is_empty() {
            diag.add_warning_with_entity("catalog", "catalog has no records", "Catalog");
        }

        for record in &self.records {
            let entity = format!("Cable {}", record.id);

            if record.id.value() == 0 {
                diag.add_error_with_entity("identity", "cable id must be positive", &entity);
            }
            if !seen.insert(record.id) {
                diag.add_error_with_entity("identity", "duplicate cable id", &entity);
            }
            if let Err(err) = record.voltage_class() {
                diag.add_error_with_entity("voltage", &err.to_string(), &entity);
            }
            if record.resistance_per_km.is_nan() || record.resistance_per_km <= 0.0 {
                diag.add_error_with_entity("electrical", "resistance must be positive", &entity);
            }
            if record.price_per_km.is_nan() || record.price_per_km <= 0.0 {
                diag.add_error_with_entity("economics", "price must be positive", &entity);
            }

            match record.topology() {
                Topology::ThreeCore => {
                    if record.flat_ampacity.is_some() {
                        diag.add_error_with_entity(
                            "rating",
                            "three-core cable carries a flat rating",
                            &entity,
                        );
                    }
                    if record.inductance_flat_per_km.is_some() {
                        diag.add_error_with_entity(
                            "electrical",
                            "three-core cable carries a flat inductance",
                            &entity,
                        );
                    }
                    if record.trefoil_ampacity.is_none() {
                        diag.add_error_with_entity("rating", "no usable current rating", &entity);
                    }
                }
                Topology::SingleCore => {
                    if record.flat_ampacity.is_none() && record.trefoil_ampacity.is_none() {
                        diag.add_error_with_entity("rating", "no usable current rating", &entity);
                    } else if record.flat_ampacity.is_none() {
                        diag.add_warning_with_entity(
                            "rating",
                            "single-core cable has no flat rating",
                            &entity,
                        );
                    }
                }
            }
        }

        diag
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CableRecord;
    type IntoIter = std::slice::Iter<'a, CableRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<CableRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = CableRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[allow(clippy::too_many_arguments)]
fn cable(
    id: u32,
    designation: &str,
    rated_voltage: &str,
    flat_ampacity: Option<f64>,
    trefoil_ampacity: Option<f64>,
    resistance_per_km: f64,
    inductance_flat_per_km: Option<f64>,
    inductance_trefoil_per_km: Option<f64>,
    capacitance_per_km: Option<f64>,
    price_per_km: f64,
) -> CableRecord {
    CableRecord {
        id: CableId::new(id),
        designation: designation.to_string(),
        rated_voltage: rated_voltage.to_string(),
        flat_ampacity,
        trefoil_ampacity,
        resistance_per_km,
        inductance_flat_per_km,
        inductance_trefoil_per_km,
        capacitance_per_km,
        price_per_km,
    }
}

// Columns: id, designation, class, flat A, trefoil A, Ω/km, flat mH/km,
// trefoil mH/km, μF/km, price/km
#[rustfmt::skip]
fn builtin_records() -> Vec<CableRecord> {
    vec![
        cable(1, "1x10 mm2", "0.6/1 kV", Some(81.0), Some(69.0), 1.83, Some(0.34), Some(0.41), None, 102300.0),
        cable(2, "1x16 mm2", "0.6/1 kV", Some(108.0), Some(92.0), 1.15, Some(0.317), Some(0.387), None, 156600.0),
        cable(3, "1x25 mm2", "0.6/1 kV", Some(146.0), Some(124.0), 0.727, Some(0.304), Some(0.374), None, 241400.0),
        cable(4, "1x35 mm2", "0.6/1 kV", Some(180.0), Some(153.0), 0.524, Some(0.291), Some(0.36), None, 328300.0),
        cable(5, "1x50 mm2", "0.6/1 kV", Some(220.0), Some(187.0), 0.387, Some(0.281), Some(0.351), None, 434000.0),
        cable(6, "1x70 mm2", "0.6/1 kV", Some(279.0), Some(237.0), 0.268, Some(0.272), Some(0.341), None, 623000.0),
        cable(7, "1x95 mm2", "0.6/1 kV", Some(347.0), Some(294.0), 0.193, Some(0.264), Some(0.333), None, 847000.0),
        cable(8, "1x120 mm2", "0.6/1 kV", Some(405.0), Some(343.0), 0.153, Some(0.259), Some(0.329), None, 1080000.0),
        cable(9, "3x16+10 mm2", "0.6/1 kV", None, Some(89.0), 1.15, None, Some(0.264), None, 640000.0),
        cable(10, "3x25+16 mm2", "0.6/1 kV", None, Some(120.0), 0.727, None, Some(0.265), None, 990000.0),
        cable(11, "3x35+16 mm2", "0.6/1 kV", None, Some(147.0), 0.524, None, Some(0.258), None, 1300000.0),
        cable(12, "3x50+25 mm2", "0.6/1 kV", None, Some(179.0), 0.387, None, Some(0.256), None, 1750000.0),
        cable(13, "3x70+35 mm2", "0.6/1 kV", None, Some(224.0), 0.268, None, Some(0.253), None, 2520000.0),
        cable(14, "3x95+50 mm2", "0.6/1 kV", None, Some(277.0), 0.193, None, Some(0.247), None, 3400000.0),
        cable(15, "3x120+70 mm2", "0.6/1 kV", None, Some(323.0), 0.153, None, Some(0.246), None, 4400000.0),
        cable(16, "3x150+70 mm2", "0.6/1 kV", None, Some(368.0), 0.124, None, Some(0.248), None, 5200000.0),
        cable(17, "1x25 mm2", "3.6/6 kV", Some(196.0), Some(163.0), 0.727, Some(0.77), Some(0.43), Some(0.25), 351000.0),
        cable(18, "1x35 mm2", "3.6/6 kV", Some(238.0), Some(198.0), 0.524, Some(0.75), Some(0.41), Some(0.28), 532000.0),
        cable(19, "1x50 mm2", "3.6/6 kV", Some(286.0), Some(238.0), 0.387, Some(0.72), Some(0.39), Some(0.31), 638000.0),
        cable(20, "1x70 mm2", "3.6/6 kV", Some(356.0), Some(296.0), 0.268, Some(0.68), Some(0.37), Some(0.36), 825000.0),
        cable(21, "1x95 mm2", "3.6/6 kV", Some(434.0), Some(361.0), 0.193, Some(0.65), Some(0.36), Some(0.4), 1070000.0),
        cable(22, "1x120 mm2", "3.6/6 kV", Some(600.0), Some(417.0), 0.153, Some(0.63), Some(0.34), Some(0.44), 1300000.0),
        cable(23, "1x150 mm2", "3.6/6 kV", Some(559.0), Some(473.0), 0.124, Some(0.62), Some(0.33), Some(0.48), 1640000.0),
        cable(24, "1x185 mm2", "3.6/6 kV", Some(637.0), Some(543.0), 0.0991, Some(0.6), Some(0.32), Some(0.52), 1950000.0),
        cable(25, "3x25+16 mm2", "3.6/6 kV", None, Some(143.0), 0.727, None, Some(0.37), Some(0.25), 1647000.0),
        cable(26, "3x35+16 mm2", "3.6/6 kV", None, Some(172.0), 0.524, None, Some(0.35), Some(0.28), 2002000.0),
        cable(27, "3x50+16 mm2", "3.6/6 kV", None, Some(205.0), 0.387, None, Some(0.34), Some(0.3), 2594000.0),
        cable(28, "3x70+16 mm2", "3.6/6 kV", None, Some(253.0), 0.268, None, Some(0.32), Some(0.35), 3450000.0),
        cable(29, "3x95+16 mm2", "3.6/6 kV", None, Some(307.0), 0.193, None, Some(0.31), Some(0.39), 4727000.0),
        cable(30, "3x120+16 mm2", "3.6/6 kV", None, Some(352.0), 0.153, None, Some(0.3), Some(0.43), 5784000.0),
        cable(31, "3x150+25 mm2", "3.6/6 kV", None, Some(397.0), 0.124, None, Some(0.29), Some(0.47), 6963000.0),
        cable(32, "3x185+25 mm2", "3.6/6 kV", None, Some(453.0), 0.0991, None, Some(0.28), Some(0.5), 8481000.0),
        cable(33, "1x35 mm2", "6/10 kV", Some(231.0), Some(195.0), 0.524, Some(0.661), Some(0.383), Some(0.223), 785100.0),
        cable(34, "1x50 mm2", "6/10 kV", Some(277.0), Some(234.0), 0.387, Some(0.636), Some(0.366), Some(0.248), 944900.0),
        cable(35, "1x70 mm2", "6/10 kV", Some(345.0), Some(292.0), 0.268, Some(0.606), Some(0.349), Some(0.285), 1226000.0),
        cable(36, "1x95 mm2", "6/10 kV", Some(418.0), Some(354.0), 0.193, Some(0.582), Some(0.334), Some(0.32), 1533000.0),
        cable(37, "1x120 mm2", "6/10 kV", Some(481.0), Some(407.0), 0.153, Some(0.563), Some(0.323), Some(0.35), 1872000.0),
        cable(38, "1x150 mm2", "6/10 kV", Some(537.0), Some(460.0), 0.124, Some(0.546), Some(0.313), Some(0.382), 2362000.0),
        cable(39, "1x185 mm2", "6/10 kV", Some(612.0), Some(527.0), 0.0991, Some(0.529), Some(0.304), Some(0.415), 2838000.0),
        cable(40, "3x35 mm2", "6/10 kV", None, Some(173.0), 0.524, None, Some(0.374), Some(0.189), 2127000.0),
        cable(41, "3x50 mm2", "6/10 kV", None, Some(206.0), 0.387, None, Some(0.355), Some(0.209), 2716000.0),
        cable(42, "3x70 mm2", "6/10 kV", None, Some(257.0), 0.268, None, Some(0.336), Some(0.236), 3603000.0),
        cable(43, "3x95 mm2", "6/10 kV", None, Some(313.0), 0.193, None, Some(0.32), Some(0.263), 4901000.0),
        cable(44, "3x120 mm2", "6/10 kV", None, Some(360.0), 0.153, None, Some(0.308), Some(0.291), 5934000.0),
        cable(45, "3x150 mm2", "6/10 kV", None, Some(410.0), 0.124, None, Some(0.299), Some(0.314), 7125000.0),
        cable(46, "3x185 mm2", "6/10 kV", None, Some(469.0), 0.0991, None, Some(0.29), Some(0.341), 8659000.0),
        cable(47, "1x95 mm2", "12/20 kV", Some(420.0), Some(358.0), 0.193, Some(0.59), Some(0.36), Some(0.218), 1560000.0),
        cable(48, "1x120 mm2", "12/20 kV", Some(483.0), Some(412.0), 0.153, Some(0.571), Some(0.349), Some(0.238), 1906000.0),
        cable(49, "1x150 mm2", "12/20 kV", Some(540.0), Some(466.0), 0.124, Some(0.554), Some(0.338), Some(0.258), 2393000.0),
        cable(50, "1x185 mm2", "12/20 kV", Some(614.0), Some(534.0), 0.0991, Some(0.538), Some(0.329), Some(0.278), 2877000.0),
        cable(51, "1x240 mm2", "12/20 kV", Some(718.0), Some(627.0), 0.0754, Some(0.518), Some(0.317), Some(0.308), 3543000.0),
        cable(52, "1x300 mm2", "12/20 kV", Some(813.0), Some(715.0), 0.0601, Some(0.501), Some(0.308), Some(0.336), 4455000.0),
        cable(53, "1x400 mm2", "12/20 kV", Some(904.0), Some(819.0), 0.047, Some(0.48), Some(0.298), Some(0.377), 5669000.0),
        cable(54, "1x150 mm2", "20.3/35 kV", Some(559.0), Some(473.0), 0.124, Some(0.64), Some(0.41), Some(0.17), 1720000.0),
        cable(55, "1x185 mm2", "20.3/35 kV", Some(637.0), Some(543.0), 0.0991, Some(0.63), Some(0.39), Some(0.18), 2020000.0),
        cable(56, "1x240 mm2", "20.3/35 kV", Some(745.0), Some(641.0), 0.0754, Some(0.6), Some(0.38), Some(0.2), 2530000.0),
        cable(57, "1x300 mm2", "20.3/35 kV", Some(846.0), Some(735.0), 0.0601, Some(0.59), Some(0.37), Some(0.21), 3150000.0),
        cable(58, "1x400 mm2", "20.3/35 kV", Some(938.0), Some(845.0), 0.047, Some(0.57), Some(0.35), Some(0.23), 4100000.0),
        cable(59, "1x500 mm2", "20.3/35 kV", Some(1010.0), Some(950.0), 0.0366, Some(0.55), Some(0.34), Some(0.26), 5150000.0),
        cable(60, "1x630 mm2", "20.3/35 kV", Some(1120.0), Some(1040.0), 0.0283, Some(0.52), Some(0.33), Some(0.29), 6550000.0),
        cable(61, "3x95 mm2", "20.3/35 kV", None, Some(307.0), 0.193, None, Some(0.4), Some(0.15), 4600000.0),
        cable(62, "3x120 mm2", "20.3/35 kV", None, Some(352.0), 0.153, None, Some(0.39), Some(0.16), 5500000.0),
        cable(63, "3x150 mm2", "20.3/35 kV", None, Some(397.0), 0.124, None, Some(0.37), Some(0.17), 6400000.0),
        cable(64, "3x185 mm2", "20.3/35 kV", None, Some(453.0), 0.0991, None, Some(0.36), Some(0.18), 7500000.0),
        cable(65, "3x240 mm2", "20.3/35 kV", None, Some(529.0), 0.0754, None, Some(0.35), Some(0.2), 9400000.0),
        cable(66, "3x300 mm2", "20.3/35 kV", None, Some(626.0), 0.0601, None, Some(0.29), Some(0.22), 11300000.0),
        cable(67, "3x400 mm2", "20.3/35 kV", None, Some(720.0), 0.047, None, Some(0.28), Some(0.24), 14300000.0),
    ]
}
