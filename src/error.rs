//! Error taxonomy shared across the wafer pipeline.
//!
//! Every variant aborts processing of the current input file; no partial
//! result is ever written. I/O wrappers at the adapter boundary attach
//! path context and flatten these into strings for the CLI.

use thiserror::Error;

/// Errors produced while parsing, reducing or classifying a wafer map.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WaferError {
    /// A character inside the grid region is outside the `.1XY` alphabet.
    #[error("invalid wafer character '{character}' at row {row}, column {column}")]
    InvalidCharacter {
        row: usize,
        column: usize,
        character: char,
    },

    /// No line of the input qualifies as part of a wafer map.
    #[error("the file contains no wafer map")]
    NoWaferFound,

    /// Two non-adjacent blocks of identical width both look like wafer
    /// maps; the input is ambiguous and is rejected rather than guessed.
    #[error("found two wafer maps of the same width in one file")]
    MultipleWaferRegions,

    /// Grid rows of unequal length were handed to the grid model.
    #[error("wafer rows have unequal lengths starting at row {row}")]
    RaggedGrid { row: usize },

    /// A die's present-neighbor count has no entry in the threshold table.
    #[error("no threshold entry for dies with {present_neighbors} present neighbors")]
    MissingThresholdEntry { present_neighbors: usize },

    /// The test-record stream cannot be shaped into a rectangular grid:
    /// truncated framing, negative coordinates, a row without any tested
    /// die, or a column gap strictly inside a row's tested span.
    #[error("malformed test record stream: {0}")]
    MalformedRecordStream(String),
}
