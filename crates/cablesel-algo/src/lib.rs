//! # cablesel-algo: Cable Selection and Performance Engine
//!
//! This crate turns a [`LoadSpec`](cablesel_core::LoadSpec) and the cable
//! [`Catalog`](cablesel_core::Catalog) into a recommendation and a full
//! performance and cost evaluation.
//!
//! ## Pipeline
//!
//! | Stage | Entry point | Output |
//! |-------|-------------|--------|
//! | Derating | [`derating::derated_ampacity`] | corrected rating (A) |
//! | Selection | [`filter_cables`] | [`SelectionResult`] |
//! | Circuit analysis | [`analyze_circuit`] | [`CircuitAnalysis`] |
//! | Cost estimation | [`estimate_cost`] | [`CostEstimate`] |
//! | Reporting | [`build_report`] | [`CalculationReport`] |
//!
//! Every stage is a pure function of its inputs. [`Session`] wraps them for
//! callers that need to remember a selection and the last calculation.
//!
//! ## Example
//!
//! ```
//! use cablesel_algo::{analyze_circuit, estimate_cost, filter_cables};
//! use cablesel_core::{Catalog, LoadSpec};
//!
//! let catalog = Catalog::builtin();
//! let spec = LoadSpec::default();
//!
//! let result = filter_cables(&catalog, &spec).unwrap();
//! let best = result.best().next().unwrap();
//!
//! let analysis = analyze_circuit(best.cable, &spec).unwrap();
//! assert!(analysis.status.is_valid());
//!
//! let cost = estimate_cost(best.cable, &spec, &analysis);
//! assert_eq!(cost.total_cost, cost.energy_cost + cost.installation_cost);
//! ```

pub mod circuit;
pub mod cost;
pub mod derating;
pub mod details;
pub mod format;
pub mod report;
pub mod selector;
pub mod session;

pub use circuit::{analyze_circuit, analyze_selection, CapacityStatus, CircuitAnalysis};
pub use cost::{estimate_cost, estimate_cost_with, CostEstimate, EconomicParams};
pub use derating::DeratingFactors;
pub use details::CableDetails;
pub use report::{build_report, render_report, CalculationReport};
pub use selector::{
    filter_cables, filter_raw, SelectionEntry, SelectionMode, SelectionResult, SortKey,
};
pub use session::Session;
