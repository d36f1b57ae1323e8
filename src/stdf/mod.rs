//! STDF V4 test-data-log input path.
//!
//! Overview
//! - Wafer probers log one part-result record (PRR) per tested die, with
//!   the die's wafer coordinates and a pass/fail flag. Retested dies show
//!   up as repeated records for the same coordinate.
//! - [`records`] walks the binary record framing and decodes the PRR
//!   fields this crate needs.
//! - [`reduce`] collapses the record sequence into a canonical
//!   [`WaferGrid`](crate::wafer::WaferGrid): last outcome per coordinate
//!   wins, rows are padded with `.` up to the common width.

pub mod records;
pub mod reduce;

pub use records::{read_part_records, PartRecord};
pub use reduce::reduce_records;
