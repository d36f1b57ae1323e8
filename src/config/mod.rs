//! Configuration loaders for the CLI pipeline.
//!
//! - [`thresholds`] – neighbor threshold table from JSON.
//! - [`run`] – command-line arguments for the `die_cluster` binary.

pub mod run;
pub mod thresholds;

pub use run::RunConfig;
pub use thresholds::load_thresholds;
