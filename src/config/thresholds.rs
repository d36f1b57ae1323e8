//! Neighbor threshold table loading.
//!
//! The table ships as a JSON object whose keys are stringified
//! present-neighbor counts and whose values are the minimum number of
//! failing neighbors required to flip a passing die:
//!
//! ```json
//! { "8": 6, "7": 5, "6": 5, "5": 4, "4": 3, "3": 3, "2": 2, "1": 1, "0": 9 }
//! ```
//!
//! Every key must parse as an integer in 0..=8; the table is validated in
//! full before any classification starts.

use crate::classify::ThresholdTable;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Load and validate a threshold table from a JSON file.
pub fn load_thresholds(path: &Path) -> Result<ThresholdTable, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read thresholds {}: {e}", path.display()))?;
    parse_thresholds(&data)
        .map_err(|e| format!("Failed to parse thresholds {}: {e}", path.display()))
}

/// Parse a threshold table from JSON text.
pub fn parse_thresholds(json: &str) -> Result<ThresholdTable, String> {
    let raw: BTreeMap<String, usize> = serde_json::from_str(json).map_err(|e| e.to_string())?;
    let mut pairs = Vec::with_capacity(raw.len());
    for (key, minimum_fails) in raw {
        let present_neighbors: usize = key
            .trim()
            .parse()
            .map_err(|_| format!("threshold key '{key}' is not an integer"))?;
        if present_neighbors > 8 {
            return Err(format!(
                "threshold key '{key}' is outside the neighbor range 0..=8"
            ));
        }
        pairs.push((present_neighbors, minimum_fails));
    }
    Ok(ThresholdTable::from_pairs(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_keyed_object() {
        let table =
            parse_thresholds(r#"{"8": 6, "7": 5, "0": 9}"#).unwrap();
        assert_eq!(table.get(8), Some(6));
        assert_eq!(table.get(7), Some(5));
        assert_eq!(table.get(0), Some(9));
        assert_eq!(table.get(4), None);
    }

    #[test]
    fn rejects_non_integer_key() {
        let err = parse_thresholds(r#"{"many": 6}"#).unwrap_err();
        assert!(err.contains("not an integer"));
    }

    #[test]
    fn rejects_key_beyond_neighborhood() {
        let err = parse_thresholds(r#"{"9": 6}"#).unwrap_err();
        assert!(err.contains("0..=8"));
    }

    #[test]
    fn rejects_non_object_json() {
        assert!(parse_thresholds("[1, 2, 3]").is_err());
    }
}
