use super::{Die, DieState};
use crate::error::WaferError;
use std::fmt;

/// Row-major deltas of the 8-connected Moore neighborhood.
const NEIGHBOR_DELTAS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Rectangular wafer map: die states in a row-major flat buffer.
///
/// The grid is non-empty and every row has the same length. Each pipeline
/// stage borrows the grid read-only and produces a fresh one, so a grid
/// never sees shared mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaferGrid {
    width: usize,
    cells: Vec<DieState>,
}

impl WaferGrid {
    /// Parse a wafer map from newline-separated rows, one die per
    /// character.
    ///
    /// Fails with [`WaferError::InvalidCharacter`] on the first character
    /// outside the `.1XY` alphabet, [`WaferError::RaggedGrid`] when rows
    /// differ in length and [`WaferError::NoWaferFound`] on empty input.
    pub fn parse(text: &str) -> Result<WaferGrid, WaferError> {
        if text.is_empty() {
            return Err(WaferError::NoWaferFound);
        }
        let mut width = None;
        let mut cells = Vec::with_capacity(text.len());
        for (row, line) in text.split('\n').enumerate() {
            let expected = *width.get_or_insert(line.chars().count());
            if line.chars().count() != expected {
                return Err(WaferError::RaggedGrid { row });
            }
            for (column, character) in line.chars().enumerate() {
                let state = DieState::from_char(character).ok_or(WaferError::InvalidCharacter {
                    row,
                    column,
                    character,
                })?;
                cells.push(state);
            }
        }
        let width = width.unwrap_or(0);
        if width == 0 {
            return Err(WaferError::NoWaferFound);
        }
        Ok(WaferGrid { width, cells })
    }

    /// Assemble a grid from already-shaped rows (used by the record
    /// reducer). Rows must be non-empty and of equal length.
    pub fn from_rows(rows: Vec<Vec<DieState>>) -> Result<WaferGrid, WaferError> {
        let width = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(WaferError::NoWaferFound),
        };
        let mut cells = Vec::with_capacity(rows.len() * width);
        for (row, states) in rows.into_iter().enumerate() {
            if states.len() != width {
                return Err(WaferError::RaggedGrid { row });
            }
            cells.extend(states);
        }
        Ok(WaferGrid { width, cells })
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.cells.len() / self.width
        }
    }

    /// State at (row, column). Panics when out of bounds, like slice
    /// indexing.
    #[inline]
    pub fn state(&self, row: usize, column: usize) -> DieState {
        assert!(row < self.height() && column < self.width);
        self.cells[row * self.width + column]
    }

    /// The die value at (row, column).
    #[inline]
    pub fn die(&self, row: usize, column: usize) -> Die {
        Die {
            row,
            column,
            state: self.state(row, column),
        }
    }

    pub(crate) fn set_state(&mut self, row: usize, column: usize, state: DieState) {
        assert!(row < self.height() && column < self.width);
        self.cells[row * self.width + column] = state;
    }

    /// Iterate all dies in row-major order.
    pub fn dies(&self) -> impl Iterator<Item = Die> + '_ {
        self.cells.iter().enumerate().map(move |(index, &state)| Die {
            row: index / self.width,
            column: index % self.width,
            state,
        })
    }

    /// Up to 8 grid-adjacent neighbors of (row, column), clipped at the
    /// boundary. The order follows the fixed delta table, so results are
    /// deterministic.
    pub fn neighbors(&self, row: usize, column: usize) -> impl Iterator<Item = Die> + '_ {
        let height = self.height();
        NEIGHBOR_DELTAS.iter().filter_map(move |&(delta_row, delta_column)| {
            let neighbor_row = row.checked_add_signed(delta_row)?;
            let neighbor_column = column.checked_add_signed(delta_column)?;
            if neighbor_row >= height || neighbor_column >= self.width {
                return None;
            }
            Some(self.die(neighbor_row, neighbor_column))
        })
    }

    /// How many neighbors correspond to an actual die (state != `.`).
    pub fn present_neighbors(&self, row: usize, column: usize) -> usize {
        self.neighbors(row, column)
            .filter(|die| die.state.is_present())
            .count()
    }

    /// How many neighbors failed testing (state `X`).
    pub fn fail_neighbors(&self, row: usize, column: usize) -> usize {
        self.neighbors(row, column)
            .filter(|die| die.state == DieState::Fail)
            .count()
    }

    /// Count dies in a given state across the whole grid.
    pub fn count(&self, state: DieState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }
}

impl fmt::Display for WaferGrid {
    /// Serialize back to the textual map; inverse of [`WaferGrid::parse`].
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height() {
            if row > 0 {
                formatter.write_str("\n")?;
            }
            for column in 0..self.width {
                write!(formatter, "{}", self.state(row, column).to_char())?;
            }
        }
        Ok(())
    }
}
