//! Neighbor-threshold fail prediction.
//!
//! A passing die surrounded by enough failing dies is very likely to fail
//! in the field even though it passed testing. The rule is a plain lookup:
//! for a die with `n` present neighbors, at least `table[n]` failing
//! neighbors flip it to fail-by-prediction. No model, no randomness.
//!
//! Classification reads the input grid only and writes a freshly
//! allocated copy, so neighbor counts are always taken against the
//! original map and the iteration order cannot influence the result.

use crate::error::WaferError;
use crate::wafer::{DieState, WaferGrid};
use log::debug;
use std::collections::BTreeMap;

/// Immutable mapping from present-neighbor count (0..=8) to the minimum
/// number of failing neighbors required to flip a passing die.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThresholdTable {
    thresholds: BTreeMap<usize, usize>,
}

impl ThresholdTable {
    /// Build a table from (present-neighbor count, minimum fails) pairs.
    pub fn from_pairs<I>(pairs: I) -> ThresholdTable
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        ThresholdTable {
            thresholds: pairs.into_iter().collect(),
        }
    }

    /// Minimum failing-neighbor count for the given present-neighbor
    /// count, if configured.
    pub fn get(&self, present_neighbors: usize) -> Option<usize> {
        self.thresholds.get(&present_neighbors).copied()
    }

    /// Number of configured entries.
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}

/// Apply the neighbor-threshold rule to every passing die.
///
/// Returns a new grid of the same shape: `Pass` dies with at least
/// `table[present]` failing neighbors become `FailByPrediction`, all
/// other dies are carried over unchanged. Fails with
/// [`WaferError::MissingThresholdEntry`] when a passing die's
/// present-neighbor count has no table entry.
pub fn classify(grid: &WaferGrid, table: &ThresholdTable) -> Result<WaferGrid, WaferError> {
    debug!(
        "classify start {}x{} dies, {} threshold entries",
        grid.height(),
        grid.width(),
        table.len()
    );
    let mut result = grid.clone();
    let mut flipped = 0usize;
    for die in grid.dies() {
        if die.state != DieState::Pass {
            continue;
        }
        let present = grid.present_neighbors(die.row, die.column);
        let failing = grid.fail_neighbors(die.row, die.column);
        let threshold = table.get(present).ok_or(WaferError::MissingThresholdEntry {
            present_neighbors: present,
        })?;
        if failing >= threshold {
            result.set_state(die.row, die.column, DieState::FailByPrediction);
            flipped += 1;
        }
    }
    debug!("classify finish, {flipped} dies flipped to fail-by-prediction");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_table(threshold: usize) -> ThresholdTable {
        ThresholdTable::from_pairs((0..=8).map(|n| (n, threshold)))
    }

    #[test]
    fn surrounded_die_is_flipped() {
        let grid = WaferGrid::parse("XXX\nX1X\nXXX").unwrap();
        let table = ThresholdTable::from_pairs([(8, 6), (3, 9), (5, 9)]);
        let result = classify(&grid, &table).unwrap();
        assert_eq!(result.to_string(), "XXX\nXYX\nXXX");
    }

    #[test]
    fn all_pass_grid_is_untouched_by_positive_thresholds() {
        let grid = WaferGrid::parse("111\n111\n111").unwrap();
        let result = classify(&grid, &full_table(1)).unwrap();
        assert_eq!(result, grid);
    }

    #[test]
    fn unreachable_thresholds_are_a_no_op() {
        let grid = WaferGrid::parse(".X1\nX1X\n1X.").unwrap();
        let result = classify(&grid, &full_table(9)).unwrap();
        assert_eq!(result.to_string(), grid.to_string());
    }

    #[test]
    fn counts_are_taken_against_the_input_grid() {
        // With threshold 2 everywhere, the middle row flips only where two
        // original fails are adjacent; freshly flipped dies must not count.
        let grid = WaferGrid::parse("X1X\n111\nX1X").unwrap();
        let result = classify(&grid, &full_table(2)).unwrap();
        // every pass die here touches at least two X dies of the original
        assert_eq!(result.to_string(), "XYX\nYYY\nXYX");
    }

    #[test]
    fn missing_entry_is_reported() {
        let grid = WaferGrid::parse("11\n11").unwrap();
        let err = classify(&grid, &ThresholdTable::from_pairs([(8, 2)])).unwrap_err();
        assert_eq!(
            err,
            WaferError::MissingThresholdEntry {
                present_neighbors: 3
            }
        );
    }

    #[test]
    fn conservation_laws_hold() {
        let grid = WaferGrid::parse(".X1X.\nX111X\n.1X1.\nX111X").unwrap();
        let result = classify(&grid, &full_table(2)).unwrap();
        assert_eq!(result.count(DieState::Fail), grid.count(DieState::Fail));
        assert_eq!(
            result.count(DieState::NotPresent),
            grid.count(DieState::NotPresent)
        );
        assert_eq!(
            result.count(DieState::Pass) + result.count(DieState::FailByPrediction),
            grid.count(DieState::Pass)
        );
    }

    #[test]
    fn existing_predictions_are_left_alone() {
        let grid = WaferGrid::parse("XYX\nX1X\nXXX").unwrap();
        let table = ThresholdTable::from_pairs([(8, 7)]);
        let result = classify(&grid, &table).unwrap();
        // center die sees 7 fails (Y is present but not a fail), flips at 7
        assert_eq!(result.to_string(), "XYX\nXYX\nXXX");
    }
}
