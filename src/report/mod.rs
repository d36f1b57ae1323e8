//! Human-facing reporting on classification results.
//!
//! - [`summary`] – pass/fail tallies and the list of flipped dies.
//! - [`render`] – color PNG renderings of a wafer map.

pub mod render;
pub mod summary;

pub use render::save_wafer_png;
pub use summary::{summarize, WaferSummary};
