//! Frame decoding.
//!
//! Decoding runs in three stages: [`parse_envelope`] strips the command byte
//! and the length-prefixed outer payload, [`walk_sub_records`] splits the
//! payload into its TLV sub-records, and [`decode_frame`] dispatches each
//! sub-record to its key-specific interpreter and merges the results into a
//! single [`DecodedFrame`].
//!
//! All stages borrow the input buffer; nothing is copied until a decoded
//! value is produced. On any failure the whole decode fails and no partial
//! aggregate is returned.

use crate::constants::*;
use crate::error::FrameError;
use crate::types::{DecodedFrame, Envelope, Sample, SensorReading, SubRecord};

/// Decode a little-endian unsigned integer from a byte slice.
///
/// Byte `i` contributes `byte[i] << (8 * i)`; there is no sign extension
/// regardless of width. Callers supply exactly the width of the field being
/// decoded, never an empty slice. Slices longer than 8 bytes yield the low
/// 64 bits.
pub fn read_uint_le(bytes: &[u8]) -> u64 {
    debug_assert!(!bytes.is_empty(), "read_uint_le needs at least one byte");
    bytes
        .iter()
        .rev()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}

/// Parse the outer envelope of a frame.
///
/// The frame must hold at least the 5-byte header (marker, command, length);
/// the 2-byte marker itself is not validated here. A declared payload length
/// that runs past the end of the buffer is a [`FrameError::Truncated`] decode
/// failure, never a short read.
pub fn parse_envelope(frame: &[u8]) -> Result<Envelope<'_>, FrameError> {
    if frame.len() < ENVELOPE_HEADER_LEN {
        return Err(FrameError::FrameTooShort {
            expected: ENVELOPE_HEADER_LEN,
            actual: frame.len(),
        });
    }

    let command = frame[2];
    let length = u16::from_le_bytes([frame[3], frame[4]]) as usize;

    let available = frame.len() - ENVELOPE_HEADER_LEN;
    if length > available {
        return Err(FrameError::Truncated {
            offset: 3,
            declared: length,
            available,
        });
    }

    Ok(Envelope {
        command,
        payload: &frame[ENVELOPE_HEADER_LEN..ENVELOPE_HEADER_LEN + length],
    })
}

/// Split the outer payload into its sequence of TLV sub-records.
///
/// Sub-records must tile the payload exactly: the walk terminates with the
/// cursor landing on the declared length, with no gaps and no leftover
/// bytes. A header straddling the end is [`FrameError::MalformedStream`]; a
/// declared sub-length overrunning the remainder is [`FrameError::Truncated`].
/// Offsets in either error are relative to the start of the outer payload.
pub fn walk_sub_records(payload: &[u8]) -> Result<Vec<SubRecord<'_>>, FrameError> {
    let declared = payload.len();
    let mut records = Vec::new();
    let mut cursor = 0;

    while cursor < declared {
        if cursor + SUB_RECORD_HEADER_LEN > declared {
            return Err(FrameError::MalformedStream {
                offset: cursor,
                declared,
            });
        }

        let key = payload[cursor];
        let len = u16::from_le_bytes([payload[cursor + 1], payload[cursor + 2]]) as usize;
        let start = cursor + SUB_RECORD_HEADER_LEN;

        if len > declared - start {
            return Err(FrameError::Truncated {
                offset: cursor + 1,
                declared: len,
                available: declared - start,
            });
        }

        records.push(SubRecord {
            key,
            payload: &payload[start..start + len],
        });
        cursor = start + len;
    }

    Ok(records)
}

/// Decode one packed 6-byte sample block.
///
/// The first 3 bytes are a little-endian packed TH field: the high 12 bits
/// are temperature in tenths of a degree offset by 500 (so sub-zero readings
/// go negative after the subtraction, not wrap), the low 12 bits humidity in
/// tenths of a percent. Bytes 3..5 are the raw pressure, byte 5 the battery.
pub fn decode_sample(block: &[u8; SAMPLE_BLOCK_LEN]) -> Sample {
    let th = read_uint_le(&block[0..3]) as u32;
    let temperature = ((th >> 12) as i32 - 500) as f32 / 10.0;
    let humidity = (th & 0xFFF) as f32 / 10.0;
    let pressure = u16::from_le_bytes([block[3], block[4]]);
    let battery = block[5];

    Sample {
        temperature,
        humidity,
        pressure,
        battery,
    }
}

/// Decode a real-time event payload (key `14`).
///
/// Layout: timestamp (4, little-endian Unix seconds) + packed sample block
/// (6) + RSSI (1, two's-complement signed byte). Firmware may append further
/// bytes; anything past the RSSI is ignored.
pub fn decode_realtime(payload: &[u8]) -> Result<SensorReading, FrameError> {
    if payload.len() < REALTIME_MIN_LEN {
        return Err(FrameError::PayloadTooShort {
            key: KEY_REALTIME_DATA,
            expected: REALTIME_MIN_LEN,
            actual: payload.len(),
        });
    }

    let timestamp = u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);

    let mut block = [0u8; SAMPLE_BLOCK_LEN];
    block.copy_from_slice(&payload[4..4 + SAMPLE_BLOCK_LEN]);
    let sample = decode_sample(&block);

    let rssi = payload[10] as i8;

    Ok(SensorReading::from_sample(
        sample,
        u64::from(timestamp),
        Some(rssi),
    ))
}

/// Decode a history batch payload (key `03`).
///
/// Layout: base timestamp (4) + sample interval in seconds (2) + a run of
/// 6-byte sample blocks. Block `i` is assigned the absolute timestamp
/// `base + interval * i`. A trailing partial block is dropped, not decoded.
pub fn decode_history(payload: &[u8]) -> Result<Vec<SensorReading>, FrameError> {
    if payload.len() < HISTORY_HEADER_LEN {
        return Err(FrameError::PayloadTooShort {
            key: KEY_HISTORY_DATA,
            expected: HISTORY_HEADER_LEN,
            actual: payload.len(),
        });
    }

    let base = u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);
    let interval = u16::from_le_bytes([payload[4], payload[5]]);

    let mut readings = Vec::new();
    for (i, chunk) in payload[HISTORY_HEADER_LEN..]
        .chunks_exact(SAMPLE_BLOCK_LEN)
        .enumerate()
    {
        let mut block = [0u8; SAMPLE_BLOCK_LEN];
        block.copy_from_slice(chunk);
        let sample = decode_sample(&block);

        let timestamp = u64::from(base) + u64::from(interval) * i as u64;
        readings.push(SensorReading::from_sample(sample, timestamp, None));
    }

    Ok(readings)
}

/// Decode a UTF-8 version-string payload.
fn decode_version(key: u8, payload: &[u8]) -> Result<String, FrameError> {
    std::str::from_utf8(payload)
        .map(str::to_owned)
        .map_err(|_| FrameError::InvalidUtf8 { key })
}

/// Decode a little-endian integer setting payload.
fn decode_le_integer(key: u8, payload: &[u8]) -> Result<u32, FrameError> {
    if payload.is_empty() {
        return Err(FrameError::PayloadTooShort {
            key,
            expected: 1,
            actual: 0,
        });
    }
    Ok(read_uint_le(payload) as u32)
}

/// Decode a complete telemetry frame into a [`DecodedFrame`].
///
/// Drives the envelope parser and sub-record walker, then dispatches each
/// sub-record by key. Unrecognized keys are skipped (forward compatibility);
/// if both a real-time and a history sub-record appear, the later one in
/// sub-record order provides the readings.
pub fn decode_frame(frame: &[u8]) -> Result<DecodedFrame, FrameError> {
    let envelope = parse_envelope(frame)?;
    let records = walk_sub_records(envelope.payload)?;

    let mut decoded = DecodedFrame {
        command: envelope.command,
        ..Default::default()
    };

    for record in &records {
        match record.key {
            KEY_PRODUCT_ID => {
                let &id = record
                    .payload
                    .first()
                    .ok_or(FrameError::PayloadTooShort {
                        key: record.key,
                        expected: 1,
                        actual: 0,
                    })?;
                decoded.product_id = id;
            }

            KEY_REALTIME_DATA => {
                decoded.readings = vec![decode_realtime(record.payload)?];
            }

            KEY_HISTORY_DATA => {
                decoded.readings = decode_history(record.payload)?;
            }

            KEY_FIRMWARE_VERSION => {
                decoded.firmware_version = Some(decode_version(record.key, record.payload)?);
            }

            KEY_MODEL_VERSION => {
                decoded.model_version = Some(decode_version(record.key, record.payload)?);
            }

            KEY_MCU_VERSION => {
                decoded.mcu_version = Some(decode_version(record.key, record.payload)?);
            }

            KEY_REPORT_INTERVAL => {
                decoded.report_interval = Some(decode_le_integer(record.key, record.payload)?);
            }

            KEY_COLLECT_INTERVAL => {
                decoded.collect_interval = Some(decode_le_integer(record.key, record.payload)?);
            }

            KEY_END_FLAG => {
                decoded.end_flag = Some(decode_le_integer(record.key, record.payload)?);
            }

            KEY_USB_STATE => {
                decoded.usb_state = Some(decode_le_integer(record.key, record.payload)?);
            }

            key => {
                log::trace!(
                    "skipping unknown sub-record 0x{:02x} ({} bytes)",
                    key,
                    record.payload.len()
                );
            }
        }
    }

    Ok(decoded)
}

/// Verify the trailing byte-sum checksum of a frame.
///
/// The device appends a little-endian 16-bit sum of every envelope byte
/// (marker through the end of the outer payload). Callers that receive raw
/// frames can run this before [`decode_frame`]; the decode itself ignores
/// anything past the declared payload.
pub fn verify_checksum(frame: &[u8]) -> Result<(), FrameError> {
    let envelope = parse_envelope(frame)?;
    let end = ENVELOPE_HEADER_LEN + envelope.payload.len();

    if frame.len() < end + CHECKSUM_LEN {
        return Err(FrameError::Truncated {
            offset: end,
            declared: CHECKSUM_LEN,
            available: frame.len() - end,
        });
    }

    let expected = u16::from_le_bytes([frame[end], frame[end + 1]]);
    let actual = frame[..end]
        .iter()
        .fold(0u16, |sum, &b| sum.wrapping_add(u16::from(b)));

    if actual != expected {
        return Err(FrameError::ChecksumMismatch { expected, actual });
    }

    Ok(())
}
