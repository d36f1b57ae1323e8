//! PNG rendering of wafer maps for visual inspection.
//!
//! One filled square per die: white for no die, green pass, red fail,
//! yellow fail-by-prediction. Before/after pairs make the effect of the
//! neighbor rule visible at a glance.

use crate::wafer::{DieState, WaferGrid};
use image::{Rgb, RgbImage};
use std::fs;
use std::path::Path;

/// Side length of one die square in pixels.
const CELL_PX: u32 = 12;
/// Width of the grid line drawn between die squares.
const GRID_PX: u32 = 1;

fn state_color(state: DieState) -> Rgb<u8> {
    match state {
        DieState::NotPresent => Rgb([255, 255, 255]),
        DieState::Pass => Rgb([64, 160, 64]),
        DieState::Fail => Rgb([200, 48, 48]),
        DieState::FailByPrediction => Rgb([230, 200, 48]),
    }
}

/// Draw the wafer map into an RGB raster.
pub fn render_wafer(grid: &WaferGrid) -> RgbImage {
    let cell_span = CELL_PX + GRID_PX;
    let width = grid.width() as u32 * cell_span + GRID_PX;
    let height = grid.height() as u32 * cell_span + GRID_PX;
    let mut image = RgbImage::from_pixel(width, height, Rgb([180, 180, 180]));
    for die in grid.dies() {
        let origin_x = die.column as u32 * cell_span + GRID_PX;
        let origin_y = die.row as u32 * cell_span + GRID_PX;
        let color = state_color(die.state);
        for y in origin_y..origin_y + CELL_PX {
            for x in origin_x..origin_x + CELL_PX {
                image.put_pixel(x, y, color);
            }
        }
    }
    image
}

/// Render the wafer map and save it as a PNG, creating parent
/// directories.
pub fn save_wafer_png(grid: &WaferGrid, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    render_wafer(grid)
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}
