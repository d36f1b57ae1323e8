//! Reduction of part records into a canonical wafer grid.
//!
//! Records arrive in test order and may revisit a coordinate when a die is
//! retested; the last outcome for a coordinate is authoritative. Surviving
//! coordinates are partitioned into rows, each row is padded with `.` on
//! both flanks up to the common grid width. A gap strictly inside a row's
//! tested span means the source data is broken and is rejected rather
//! than guessed at.

use super::records::PartRecord;
use crate::error::WaferError;
use crate::wafer::{DieState, WaferGrid};
use log::debug;
use std::collections::BTreeMap;

/// Collapse a record stream into a rectangular wafer grid.
///
/// Wafer row is the record's Y coordinate, wafer column its X coordinate.
/// Fails with [`WaferError::MalformedRecordStream`] on negative
/// coordinates, on a row without any tested die below the maximum row, or
/// on an internal column gap.
pub fn reduce_records(records: &[PartRecord]) -> Result<WaferGrid, WaferError> {
    // Last write wins. The map is ordered by (row, column), so rows come
    // out partitioned and column-sorted for free.
    let mut survivors: BTreeMap<(usize, usize), DieState> = BTreeMap::new();
    for record in records {
        if record.x_coord < 0 || record.y_coord < 0 {
            return Err(WaferError::MalformedRecordStream(format!(
                "negative die coordinate (x={}, y={})",
                record.x_coord, record.y_coord
            )));
        }
        let key = (record.y_coord as usize, record.x_coord as usize);
        let state = if record.failed {
            DieState::Fail
        } else {
            DieState::Pass
        };
        survivors.insert(key, state);
    }
    if survivors.is_empty() {
        return Err(WaferError::MalformedRecordStream(
            "no part records with wafer coordinates".to_string(),
        ));
    }

    let row_count = survivors.keys().map(|&(row, _)| row).max().unwrap() + 1;
    let mut rows: Vec<Vec<(usize, DieState)>> = vec![Vec::new(); row_count];
    for (&(row, column), &state) in &survivors {
        rows[row].push((column, state));
    }

    let width = rows
        .iter()
        .filter_map(|row| row.last())
        .map(|&(column, _)| column + 1)
        .max()
        .unwrap();
    debug!("reducing {} tested dies into {row_count}x{width} grid", survivors.len());

    let mut padded = Vec::with_capacity(row_count);
    for (row_index, row) in rows.iter().enumerate() {
        if row.is_empty() {
            return Err(WaferError::MalformedRecordStream(format!(
                "row {row_index} has no tested dies"
            )));
        }
        let first_column = row[0].0;
        let last_column = row[row.len() - 1].0;
        if last_column - first_column + 1 != row.len() {
            return Err(WaferError::MalformedRecordStream(format!(
                "row {row_index} has a gap inside its tested span"
            )));
        }
        let mut cells = vec![DieState::NotPresent; width];
        for &(column, state) in row {
            cells[column] = state;
        }
        padded.push(cells);
    }

    WaferGrid::from_rows(padded)
}
