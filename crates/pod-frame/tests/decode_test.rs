//! End-to-end decode tests against a frame captured from a real device.

use pod_frame::{decode_frame, parse_envelope, verify_checksum, walk_sub_records, DecodedFrame};

/// Uplink captured from a sensor pod: product id, firmware/model/MCU
/// versions, USB state, end flag and one real-time event, followed by the
/// 2-byte checksum trailer.
const CAPTURED_FRAME: &str = "43473442003802002900110500322e302e36220400303030302c0100006704\
                              0004000000340500312e392e35350500322e302e361d010001140c00a82b0f67\
                              07332e00003ae6006109";

fn captured_frame() -> Vec<u8> {
    hex::decode(CAPTURED_FRAME).unwrap()
}

#[test]
fn decodes_captured_frame() {
    let frame = captured_frame();
    let decoded = decode_frame(&frame).unwrap();

    assert_eq!(decoded.command, 0x34);
    assert_eq!(decoded.command_hex(), "34");
    assert_eq!(decoded.product_id, 0x29);
    assert_eq!(decoded.firmware_version.as_deref(), Some("2.0.6"));
    assert_eq!(decoded.model_version.as_deref(), Some("1.9.5"));
    assert_eq!(decoded.mcu_version.as_deref(), Some("2.0.6"));
    assert_eq!(decoded.end_flag, Some(1));
    assert_eq!(decoded.usb_state, Some(0));

    // This frame carries no interval settings.
    assert_eq!(decoded.report_interval, None);
    assert_eq!(decoded.collect_interval, None);

    // One real-time event: timestamp a82b0f67 LE, th 0x2e3307, RSSI 0xe6.
    assert_eq!(decoded.readings.len(), 1);
    let reading = &decoded.readings[0];
    assert_eq!(reading.timestamp, 1_729_047_464);
    assert!((reading.temperature - 23.9).abs() < 1e-5);
    assert!((reading.humidity - 77.5).abs() < 1e-5);
    assert_eq!(reading.pressure, 0);
    assert_eq!(reading.battery, 58);
    assert_eq!(reading.rssi, Some(-26));
}

#[test]
fn captured_frame_walk_covers_payload_exactly() {
    let frame = captured_frame();
    let envelope = parse_envelope(&frame).unwrap();
    assert_eq!(envelope.payload.len(), 66);

    let records = walk_sub_records(envelope.payload).unwrap();
    let keys: Vec<u8> = records.iter().map(|r| r.key).collect();
    assert_eq!(
        keys,
        [0x38, 0x11, 0x22, 0x2C, 0x67, 0x34, 0x35, 0x1D, 0x14]
    );

    let consumed: usize = records.iter().map(|r| 3 + r.payload.len()).sum();
    assert_eq!(consumed, envelope.payload.len());
}

#[test]
fn captured_frame_checksum_verifies() {
    let frame = captured_frame();
    assert_eq!(verify_checksum(&frame), Ok(()));

    let mut corrupted = frame.clone();
    corrupted[10] ^= 0xFF;
    assert!(verify_checksum(&corrupted).is_err());
}

#[test]
fn decoded_frame_serializes() {
    let decoded = decode_frame(&captured_frame()).unwrap();

    let json = serde_json::to_string(&decoded).unwrap();
    assert!(json.contains("\"firmware_version\":\"2.0.6\""));

    let back: DecodedFrame = serde_json::from_str(&json).unwrap();
    assert_eq!(back, decoded);
}
