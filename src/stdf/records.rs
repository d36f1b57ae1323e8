//! Minimal STDF V4 record reader.
//!
//! STDF frames every record as a 4-byte header (REC_LEN as little-endian
//! u16, then REC_TYP and REC_SUB) followed by REC_LEN payload bytes. Only
//! the part-result record (PRR, type 5 sub 20) matters here; everything
//! else is skipped by length. The PRR fields used are X_COORD/Y_COORD
//! (signed, -32768 meaning "no coordinate") and PART_FLG, whose bit 3
//! carries the pass/fail outcome.

use crate::error::WaferError;
use log::debug;
use std::io::Read;

const REC_TYP_PER_PART: u8 = 5;
const REC_SUB_PRR: u8 = 20;

/// PRR coordinate value marking a part without a wafer position.
const MISSING_COORD: i16 = -32768;

/// PART_FLG bit 3: part failed.
const PART_FAIL_BIT: u8 = 0x08;

/// Byte offset of PART_FLG within a PRR payload (after HEAD_NUM and
/// SITE_NUM), and of the coordinate pair (after NUM_TEST, HARD_BIN and
/// SOFT_BIN).
const PART_FLG_OFFSET: usize = 2;
const X_COORD_OFFSET: usize = 9;
const Y_COORD_OFFSET: usize = 11;
const PRR_MIN_LEN: usize = 13;

/// One tested part: wafer coordinates plus outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartRecord {
    pub x_coord: i16,
    pub y_coord: i16,
    pub failed: bool,
}

/// Read every PRR from an STDF stream in arrival order.
///
/// Parts without wafer coordinates (value -32768) are skipped; truncated
/// framing fails with [`WaferError::MalformedRecordStream`].
pub fn read_part_records<R: Read>(mut reader: R) -> Result<Vec<PartRecord>, WaferError> {
    let mut records = Vec::new();
    let mut skipped = 0usize;
    loop {
        let mut header = [0u8; 4];
        match fill_buffer(&mut reader, &mut header)? {
            0 => break,
            4 => {}
            n => {
                return Err(WaferError::MalformedRecordStream(format!(
                    "truncated record header ({n} of 4 bytes)"
                )))
            }
        }
        let rec_len = u16::from_le_bytes([header[0], header[1]]) as usize;
        let (rec_typ, rec_sub) = (header[2], header[3]);
        let mut payload = vec![0u8; rec_len];
        if fill_buffer(&mut reader, &mut payload)? != rec_len {
            return Err(WaferError::MalformedRecordStream(format!(
                "truncated record payload (type {rec_typ} sub {rec_sub}, expected {rec_len} bytes)"
            )));
        }
        if rec_typ == REC_TYP_PER_PART && rec_sub == REC_SUB_PRR {
            match decode_prr(&payload)? {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }
    }
    debug!(
        "read {} part records ({} without wafer coordinates skipped)",
        records.len(),
        skipped
    );
    Ok(records)
}

/// Decode the PRR fields this crate needs; `None` for parts without a
/// wafer position.
fn decode_prr(payload: &[u8]) -> Result<Option<PartRecord>, WaferError> {
    if payload.len() < PRR_MIN_LEN {
        return Err(WaferError::MalformedRecordStream(format!(
            "part result record too short ({} of {PRR_MIN_LEN} bytes)",
            payload.len()
        )));
    }
    let part_flg = payload[PART_FLG_OFFSET];
    let x_coord = i16::from_le_bytes([payload[X_COORD_OFFSET], payload[X_COORD_OFFSET + 1]]);
    let y_coord = i16::from_le_bytes([payload[Y_COORD_OFFSET], payload[Y_COORD_OFFSET + 1]]);
    if x_coord == MISSING_COORD || y_coord == MISSING_COORD {
        return Ok(None);
    }
    Ok(Some(PartRecord {
        x_coord,
        y_coord,
        failed: part_flg & PART_FAIL_BIT != 0,
    }))
}

/// Read until `buffer` is full or the stream ends; returns bytes read.
fn fill_buffer<R: Read>(reader: &mut R, buffer: &mut [u8]) -> Result<usize, WaferError> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(WaferError::MalformedRecordStream(format!(
                    "read failure: {e}"
                )))
            }
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Frame a synthetic record for tests.
    fn frame(rec_typ: u8, rec_sub: u8, payload: &[u8]) -> Vec<u8> {
        let mut bytes = (payload.len() as u16).to_le_bytes().to_vec();
        bytes.push(rec_typ);
        bytes.push(rec_sub);
        bytes.extend_from_slice(payload);
        bytes
    }

    /// Build a PRR payload for the given coordinates and outcome.
    fn prr(x_coord: i16, y_coord: i16, failed: bool) -> Vec<u8> {
        let mut payload = vec![
            1,                                  // HEAD_NUM
            1,                                  // SITE_NUM
            if failed { PART_FAIL_BIT } else { 0 }, // PART_FLG
        ];
        payload.extend_from_slice(&0u16.to_le_bytes()); // NUM_TEST
        payload.extend_from_slice(&0u16.to_le_bytes()); // HARD_BIN
        payload.extend_from_slice(&0u16.to_le_bytes()); // SOFT_BIN
        payload.extend_from_slice(&x_coord.to_le_bytes());
        payload.extend_from_slice(&y_coord.to_le_bytes());
        frame(REC_TYP_PER_PART, REC_SUB_PRR, &payload)
    }

    #[test]
    fn decodes_pass_and_fail_parts() {
        let mut stream = prr(2, 0, false);
        stream.extend(prr(3, 0, true));
        let records = read_part_records(stream.as_slice()).unwrap();
        assert_eq!(
            records,
            vec![
                PartRecord {
                    x_coord: 2,
                    y_coord: 0,
                    failed: false
                },
                PartRecord {
                    x_coord: 3,
                    y_coord: 0,
                    failed: true
                },
            ]
        );
    }

    #[test]
    fn skips_unrelated_records() {
        let mut stream = frame(1, 10, &[0u8; 6]); // MIR-like filler
        stream.extend(prr(0, 0, false));
        stream.extend(frame(2, 20, &[0u8; 3]));
        let records = read_part_records(stream.as_slice()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn skips_parts_without_coordinates() {
        let mut stream = prr(MISSING_COORD, 0, true);
        stream.extend(prr(1, 1, true));
        let records = read_part_records(stream.as_slice()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].x_coord, 1);
    }

    #[test]
    fn truncated_payload_is_rejected() {
        let mut stream = prr(0, 0, false);
        stream.truncate(stream.len() - 2);
        let err = read_part_records(stream.as_slice()).unwrap_err();
        assert!(matches!(err, WaferError::MalformedRecordStream(_)));
    }

    #[test]
    fn short_prr_is_rejected() {
        let stream = frame(REC_TYP_PER_PART, REC_SUB_PRR, &[0u8; 5]);
        let err = read_part_records(stream.as_slice()).unwrap_err();
        assert!(matches!(err, WaferError::MalformedRecordStream(_)));
    }
}
