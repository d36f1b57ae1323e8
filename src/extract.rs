//! Wafer region extraction from free-form text.
//!
//! Wafer map files usually carry commentary around the map itself: lot
//! numbers, operator notes, equipment headers. This module isolates the
//! one contiguous block of map lines and keeps everything else as a
//! [`WaferTemplate`] so the classified map can be written back into its
//! original surroundings.
//!
//! The extraction is width-driven: among lines made only of the `.1XY`
//! alphabet, the most common length wins and defines the wafer width;
//! exactly the lines of that width form the wafer block. Two such blocks
//! separated by other text are ambiguous and rejected.

use crate::error::WaferError;
use log::debug;
use std::collections::HashMap;

/// Marker substituted for the wafer block inside a template.
const WAFER_PLACEHOLDER: &str = "$wafer";

/// The non-wafer remainder of an input file, with a single placeholder
/// where the wafer block used to be.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaferTemplate {
    text: String,
}

impl WaferTemplate {
    /// Template for sources without surrounding text (the STDF path):
    /// rendering returns the wafer text alone.
    pub fn passthrough() -> WaferTemplate {
        WaferTemplate {
            text: WAFER_PLACEHOLDER.to_string(),
        }
    }

    /// Substitute the wafer text back into its surroundings. The template
    /// holds exactly one placeholder, so a single replacement suffices.
    pub fn render(&self, wafer_text: &str) -> String {
        self.text.replacen(WAFER_PLACEHOLDER, wafer_text, 1)
    }
}

/// Split an input file into the wafer map text and the surrounding
/// template.
///
/// Fails with [`WaferError::NoWaferFound`] when no line qualifies as map
/// content and with [`WaferError::MultipleWaferRegions`] when qualifying
/// lines do not form one unbroken run.
pub fn extract_wafer_text(input: &str) -> Result<(String, WaferTemplate), WaferError> {
    let lines: Vec<&str> = input.trim().split('\n').map(str::trim).collect();
    let width = most_common_wafer_line_length(&lines)?;
    debug!("wafer width resolved to {width} columns");

    let relevant: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_wafer_line(line, width))
        .map(|(index, _)| index)
        .collect();

    // `width` came from a qualifying line, so `relevant` is non-empty.
    let first = relevant[0];
    let last = *relevant.last().unwrap();
    if last - first + 1 != relevant.len() {
        return Err(WaferError::MultipleWaferRegions);
    }

    let wafer_text = lines[first..=last].join("\n");
    let template = WaferTemplate {
        text: input.replacen(&wafer_text, WAFER_PLACEHOLDER, 1),
    };
    debug!(
        "extracted wafer block of {} lines (file lines {first}..={last})",
        last - first + 1
    );
    Ok((wafer_text, template))
}

/// Whether every character of the line belongs to the map alphabet.
fn is_wafer_alphabet(line: &str) -> bool {
    line.chars().all(|c| matches!(c, '.' | '1' | 'X' | 'Y'))
}

/// A line is part of THE wafer iff it is alphabet-only, non-empty and as
/// wide as the resolved wafer width.
fn is_wafer_line(line: &str, width: usize) -> bool {
    !line.is_empty() && line.len() == width && is_wafer_alphabet(line)
}

/// The most common length among alphabet-only non-empty lines; ties go to
/// the length encountered first.
fn most_common_wafer_line_length(lines: &[&str]) -> Result<usize, WaferError> {
    let lengths: Vec<usize> = lines
        .iter()
        .filter(|line| !line.is_empty() && is_wafer_alphabet(line))
        .map(|line| line.len())
        .collect();
    if lengths.is_empty() {
        return Err(WaferError::NoWaferFound);
    }
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for &length in &lengths {
        *counts.entry(length).or_insert(0) += 1;
    }
    let best = *counts.values().max().unwrap();
    Ok(lengths
        .iter()
        .copied()
        .find(|length| counts[length] == best)
        .unwrap())
}
