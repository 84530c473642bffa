//! Unified error types for cable selection.
//!
//! [`CableError`] covers every recoverable failure of the selection engine:
//! malformed user input, corrupt catalog entries, and precondition violations
//! such as analyzing without a selected cable. Nothing here is fatal; callers
//! decide how to surface each variant.
//!
//! # Example
//!
//! ```
//! use cablesel_core::{CableError, CableResult, VoltageClass};
//!
//! fn qualifying_kv(text: &str) -> CableResult<f64> {
//!     let class: VoltageClass = text.parse()?;
//!     Ok(class.qualifying_kv())
//! }
//!
//! assert_eq!(qualifying_kv("6/10 kV").unwrap(), 10.0);
//! assert!(matches!(qualifying_kv("ten kV"), Err(CableError::Parse(_))));
//! ```

use thiserror::Error;

use crate::CableId;

/// Unified error type for cable selection operations.
#[derive(Error, Debug)]
pub enum CableError {
    /// Non-numeric or unusable input field
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Malformed catalog data (e.g. a voltage class string)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Analysis or costing requested without a chosen cable
    #[error("No cable selected")]
    NoSelection,

    /// Report requested before any calculation was run
    #[error("No calculation has been run yet")]
    NoReport,

    /// Cable id not present in the catalog
    #[error("Unknown cable id {0}")]
    UnknownCable(CableId),
}

/// Convenience type alias for Results using CableError.
pub type CableResult<T> = Result<T, CableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CableError::Parse("bad voltage class '10'".into());
        assert!(err.to_string().contains("Parse error"));
        assert!(err.to_string().contains("bad voltage class"));
    }

    #[test]
    fn test_unknown_cable_display() {
        let err = CableError::UnknownCable(CableId::new(99));
        assert_eq!(err.to_string(), "Unknown cable id 99");
    }

    #[test]
    fn test_boxes_as_send_sync_error() {
        let boxed: Box<dyn std::error::Error + Send + Sync> = CableError::NoReport.into();
        assert_eq!(boxed.to_string(), "No calculation has been run yet");
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> CableResult<()> {
            Err(CableError::NoSelection)
        }

        fn outer() -> CableResult<()> {
            inner()?;
            Ok(())
        }

        assert!(matches!(outer(), Err(CableError::NoSelection)));
    }
}
