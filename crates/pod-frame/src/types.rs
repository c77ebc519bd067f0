//! Decoded record types and views into the raw frame.

use serde::{Deserialize, Serialize};

/// The outer envelope of a frame: command byte plus the length-delimited
/// payload. The payload borrows the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope<'a> {
    /// Command identifier at offset 2.
    pub command: u8,
    /// Outer payload, exactly as many bytes as the envelope declared.
    pub payload: &'a [u8],
}

impl Envelope<'_> {
    /// The command in its conventional lowercase 2-hex-digit form.
    pub fn command_hex(&self) -> String {
        hex::encode([self.command])
    }
}

/// One TLV sub-record inside the outer payload. The payload is a view into
/// the original frame buffer and is never copied during the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubRecord<'a> {
    /// Key byte identifying the payload schema.
    pub key: u8,
    /// Exactly `len` payload bytes.
    pub payload: &'a [u8],
}

impl SubRecord<'_> {
    /// The key in its conventional lowercase 2-hex-digit form.
    pub fn key_hex(&self) -> String {
        hex::encode([self.key])
    }
}

/// One decoded 6-byte sample block.
///
/// Temperature and humidity share a 24-bit packed field on the wire: the
/// high 12 bits are temperature in tenths of a degree offset by 500, the low
/// 12 bits humidity in tenths of a percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Temperature in degrees Celsius (tenths resolution, may be negative).
    pub temperature: f32,
    /// Relative humidity in percent (tenths resolution).
    pub humidity: f32,
    /// Pressure in raw device units, unscaled.
    pub pressure: u16,
    /// Battery level, raw byte.
    pub battery: u8,
}

/// A timestamped sensor reading.
///
/// Real-time events carry the radio signal strength; readings reconstructed
/// from a history batch do not.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Unix timestamp in seconds. Wire timestamps are 32-bit; this is kept
    /// wide so history reconstruction (`base + interval * i`) cannot wrap.
    pub timestamp: u64,
    /// Temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub humidity: f32,
    /// Pressure in raw device units.
    pub pressure: u16,
    /// Battery level, raw byte.
    pub battery: u8,
    /// Received signal strength in dBm, real-time events only.
    pub rssi: Option<i8>,
}

impl SensorReading {
    /// Build a reading from a decoded sample block.
    pub fn from_sample(sample: Sample, timestamp: u64, rssi: Option<i8>) -> Self {
        SensorReading {
            timestamp,
            temperature: sample.temperature,
            humidity: sample.humidity,
            pressure: sample.pressure,
            battery: sample.battery,
            rssi,
        }
    }
}

/// The aggregate result of decoding one frame.
///
/// Metadata fields are populated only if the corresponding sub-record key
/// was present; unrecognized keys are skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodedFrame {
    /// Command byte from the envelope.
    pub command: u8,
    /// Numeric product identifier, 0 if the frame did not carry one.
    pub product_id: u8,
    /// Sensor readings from the real-time or history sub-record. If a frame
    /// carries both, the later one in sub-record order wins.
    pub readings: Vec<SensorReading>,
    /// Firmware version string.
    pub firmware_version: Option<String>,
    /// Radio module version string.
    pub model_version: Option<String>,
    /// MCU firmware version string.
    pub mcu_version: Option<String>,
    /// Report interval setting.
    pub report_interval: Option<u32>,
    /// Collect interval setting.
    pub collect_interval: Option<u32>,
    /// Session-end flag.
    pub end_flag: Option<u32>,
    /// USB plugged/unplugged state.
    pub usb_state: Option<u32>,
}

impl DecodedFrame {
    /// The command in its conventional lowercase 2-hex-digit form.
    pub fn command_hex(&self) -> String {
        hex::encode([self.command])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_presentation() {
        let sub = SubRecord {
            key: 0x03,
            payload: &[],
        };
        assert_eq!(sub.key_hex(), "03");

        let frame = DecodedFrame {
            command: 0x34,
            ..Default::default()
        };
        assert_eq!(frame.command_hex(), "34");
    }

    #[test]
    fn test_default_frame_has_no_metadata() {
        let frame = DecodedFrame::default();
        assert_eq!(frame.product_id, 0);
        assert!(frame.readings.is_empty());
        assert!(frame.firmware_version.is_none());
        assert!(frame.report_interval.is_none());
        assert!(frame.end_flag.is_none());
    }
}
