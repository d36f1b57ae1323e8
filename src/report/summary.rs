//! Classification summary: what the wafer looked like before and after.

use crate::wafer::{DieState, WaferGrid};
use serde::Serialize;
use std::fmt::Write as _;

/// Tallies over an input/output grid pair plus the coordinates flipped to
/// fail-by-prediction.
#[derive(Clone, Debug, Serialize)]
pub struct WaferSummary {
    /// Dies that were actually tested (pass + fail in the input).
    pub tested_dies: usize,
    pub failed: usize,
    pub passed: usize,
    /// Dies flipped from pass to fail-by-prediction.
    pub predicted_failures: usize,
    pub final_passed: usize,
    pub final_failed: usize,
    /// (row, column) of every flipped die, row-major.
    pub flipped: Vec<(usize, usize)>,
}

/// Compare the grid before and after classification.
///
/// Both grids must have the same shape; the classifier guarantees this.
pub fn summarize(input: &WaferGrid, output: &WaferGrid) -> WaferSummary {
    let failed = input.count(DieState::Fail);
    let passed = input.count(DieState::Pass);
    let predicted_failures = output.count(DieState::FailByPrediction)
        - input.count(DieState::FailByPrediction);
    let flipped = input
        .dies()
        .zip(output.dies())
        .filter(|(before, after)| before.state != after.state)
        .map(|(before, _)| (before.row, before.column))
        .collect();
    WaferSummary {
        tested_dies: failed + passed,
        failed,
        passed,
        predicted_failures,
        final_passed: output.count(DieState::Pass),
        final_failed: output.count(DieState::Fail) + output.count(DieState::FailByPrediction),
        flipped,
    }
}

impl WaferSummary {
    /// The human-readable summary written next to the result file.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "The wafer contains {} tested dies.", self.tested_dies);
        let _ = writeln!(text, "Of them {} failed and {} passed.", self.failed, self.passed);
        let _ = writeln!(
            text,
            "The neighbor rule marked {} more dies as failed.",
            self.predicted_failures
        );
        let _ = writeln!(
            text,
            "Final tally: {} failed, {} passed.",
            self.final_failed, self.final_passed
        );
        if !self.flipped.is_empty() {
            let coordinates: Vec<String> = self
                .flipped
                .iter()
                .map(|(row, column)| format!("({row},{column})"))
                .collect();
            let _ = writeln!(
                text,
                "Dies newly marked as failed: {}",
                coordinates.join(",")
            );
        }
        text
    }
}
