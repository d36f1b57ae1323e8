//! Canonical wafer grid model.
//!
//! Overview
//! - A wafer map is a non-empty rectangular grid of dies, one per
//!   character of the `.1XY` alphabet (`.` no die, `1` pass, `X` fail,
//!   `Y` fail by prediction).
//! - [`WaferGrid`] stores states in a row-major flat buffer plus a width,
//!   so rectangularity is structural and neighbor lookups are index
//!   arithmetic rather than pointer chasing.
//! - Moore-neighborhood queries ([`WaferGrid::neighbors`] and the derived
//!   present/fail counts) clip at the grid boundary and never wrap.
//!
//! Modules
//! - `die` – die states, the character alphabet and the [`Die`] value.
//! - `grid` – the [`WaferGrid`] container and its parsing/serialization.

mod die;
mod grid;

pub use die::{Die, DieState};
pub use grid::WaferGrid;
