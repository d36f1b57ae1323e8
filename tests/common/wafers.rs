//! Shared builders for wafer pipeline tests.

use die_cluster::ThresholdTable;

/// A table with the same threshold for every neighbor count 0..=8.
pub fn uniform_table(threshold: usize) -> ThresholdTable {
    ThresholdTable::from_pairs((0..=8).map(|n| (n, threshold)))
}

/// A table no die can ever reach (more fails required than neighbors
/// exist).
pub fn unreachable_table() -> ThresholdTable {
    uniform_table(9)
}

/// Frame one synthetic STDF record.
pub fn stdf_frame(rec_typ: u8, rec_sub: u8, payload: &[u8]) -> Vec<u8> {
    let mut bytes = (payload.len() as u16).to_le_bytes().to_vec();
    bytes.push(rec_typ);
    bytes.push(rec_sub);
    bytes.extend_from_slice(payload);
    bytes
}

/// One part-result record (PRR) with wafer coordinates and outcome.
pub fn stdf_prr(x_coord: i16, y_coord: i16, failed: bool) -> Vec<u8> {
    let mut payload = vec![1u8, 1, if failed { 0x08 } else { 0 }];
    payload.extend_from_slice(&0u16.to_le_bytes()); // NUM_TEST
    payload.extend_from_slice(&0u16.to_le_bytes()); // HARD_BIN
    payload.extend_from_slice(&0u16.to_le_bytes()); // SOFT_BIN
    payload.extend_from_slice(&x_coord.to_le_bytes());
    payload.extend_from_slice(&y_coord.to_le_bytes());
    stdf_frame(5, 20, &payload)
}

/// A full synthetic STDF stream from (x, y, failed) triples, with some
/// non-part records sprinkled in the way real logs have them.
pub fn stdf_stream(parts: &[(i16, i16, bool)]) -> Vec<u8> {
    let mut stream = stdf_frame(0, 10, &[2u8, 4]); // FAR
    stream.extend(stdf_frame(1, 10, &[0u8; 8])); // MIR-like filler
    for &(x_coord, y_coord, failed) in parts {
        stream.extend(stdf_prr(x_coord, y_coord, failed));
    }
    stream.extend(stdf_frame(1, 20, &[0u8; 4])); // MRR-like filler
    stream
}
