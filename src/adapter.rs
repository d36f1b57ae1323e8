//! File adapters around the wafer pipeline.
//!
//! - `parse_file`: suffix-dispatched input path returning a grid plus the
//!   template needed to rebuild the file around it.
//! - `write_result`: output sink naming results `result_of_<stem>.txt`.
//! - `write_json_file`: pretty-printed JSON sidecars.

use crate::extract::{extract_wafer_text, WaferTemplate};
use crate::stdf::{read_part_records, reduce_records};
use crate::wafer::WaferGrid;
use log::info;
use serde::Serialize;
use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Supported input formats, keyed by file suffix and resolved once at the
/// adapter boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// Plain-text wafer map, possibly surrounded by commentary.
    Text,
    /// STDF V4 test-data log.
    Stdf,
}

impl InputKind {
    /// Resolve the input kind from a file suffix.
    pub fn from_path(path: &Path) -> Result<InputKind, String> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("txt") => Ok(InputKind::Text),
            Some("stdf") => Ok(InputKind::Stdf),
            _ => Err(format!(
                "Unsupported input file {}; only .txt and .stdf are supported",
                path.display()
            )),
        }
    }
}

/// Parse an input file into a wafer grid and its reconstruction template.
pub fn parse_file(path: &Path) -> Result<(WaferGrid, WaferTemplate), String> {
    match InputKind::from_path(path)? {
        InputKind::Text => parse_text_file(path),
        InputKind::Stdf => parse_stdf_file(path),
    }
}

fn parse_text_file(path: &Path) -> Result<(WaferGrid, WaferTemplate), String> {
    info!("reading wafer text file {}", path.display());
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let (wafer_text, template) =
        extract_wafer_text(&content).map_err(|e| format!("{}: {e}", path.display()))?;
    let grid = WaferGrid::parse(&wafer_text).map_err(|e| format!("{}: {e}", path.display()))?;
    Ok((grid, template))
}

fn parse_stdf_file(path: &Path) -> Result<(WaferGrid, WaferTemplate), String> {
    info!("reading STDF file {}", path.display());
    let file =
        fs::File::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    let records = read_part_records(BufReader::new(file))
        .map_err(|e| format!("{}: {e}", path.display()))?;
    let grid = reduce_records(&records).map_err(|e| format!("{}: {e}", path.display()))?;
    // an STDF log has no surrounding text, the whole output is the map
    Ok((grid, WaferTemplate::passthrough()))
}

/// Name the result file after the input file's stem.
pub fn result_file_name(input_path: &Path) -> String {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("wafer");
    format!("result_of_{stem}.txt")
}

/// Write the reconstructed output next to the other artifacts, returning
/// the path written.
pub fn write_result(
    output_dir: &Path,
    input_path: &Path,
    text: &str,
) -> Result<PathBuf, String> {
    fs::create_dir_all(output_dir)
        .map_err(|e| format!("Failed to create {}: {e}", output_dir.display()))?;
    let path = output_dir.join(result_file_name(input_path));
    fs::write(&path, text).map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
    Ok(path)
}

/// Serialize a value as pretty JSON to `path`, creating parent
/// directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}
