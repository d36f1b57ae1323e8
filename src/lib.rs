#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod classify;
pub mod error;
pub mod extract;
pub mod wafer;

// Adapter/reporting layers around the core pipeline.
pub mod adapter;
pub mod config;
pub mod report;
pub mod stdf;

// --- High-level re-exports -------------------------------------------------

// Main entry points: grid model + classifier.
pub use crate::classify::{classify, ThresholdTable};
pub use crate::error::WaferError;
pub use crate::extract::{extract_wafer_text, WaferTemplate};
pub use crate::wafer::{Die, DieState, WaferGrid};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use die_cluster::prelude::*;
///
/// # fn main() -> Result<(), die_cluster::WaferError> {
/// let grid = WaferGrid::parse("XXX\nX1X\nXXX")?;
/// let table = ThresholdTable::from_pairs([(8, 6)]);
/// let classified = classify(&grid, &table)?;
/// assert_eq!(classified.to_string(), "XXX\nXYX\nXXX");
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::classify::{classify, ThresholdTable};
    pub use crate::extract::{extract_wafer_text, WaferTemplate};
    pub use crate::wafer::{Die, DieState, WaferGrid};
}
