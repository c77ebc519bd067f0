//! Protocol constants
//!
//! These constants define the frame layout sizes and the sub-record key
//! bytes used in the sensor pod TLV uplink protocol. Keys are matched as raw
//! bytes; their conventional 2-hex-digit rendering is presentation only.

// ============================================================================
// Frame Layout
// ============================================================================

/// Fixed 2-byte marker at the start of a plaintext frame (`"CG"`).
pub const FRAME_MARKER: [u8; 2] = [0x43, 0x47];

/// Envelope header size: marker (2) + command (1) + length (2).
pub const ENVELOPE_HEADER_LEN: usize = 5;

/// Sub-record header size: key (1) + length (2).
pub const SUB_RECORD_HEADER_LEN: usize = 3;

/// Trailing checksum size (little-endian byte sum).
pub const CHECKSUM_LEN: usize = 2;

/// One packed sample block: TH (3) + pressure (2) + battery (1).
pub const SAMPLE_BLOCK_LEN: usize = 6;

/// Minimum real-time event payload: timestamp (4) + sample (6) + RSSI (1).
pub const REALTIME_MIN_LEN: usize = 11;

/// History batch header: base timestamp (4) + interval (2).
pub const HISTORY_HEADER_LEN: usize = 6;

// ============================================================================
// Sub-Record Keys
// ============================================================================

/// Historical sample batch: base timestamp + interval + 6-byte sample blocks.
pub const KEY_HISTORY_DATA: u8 = 0x03;
/// Report interval setting, little-endian integer.
pub const KEY_REPORT_INTERVAL: u8 = 0x04;
/// Collect interval setting, little-endian integer.
pub const KEY_COLLECT_INTERVAL: u8 = 0x05;
/// Firmware version, UTF-8 string.
pub const KEY_FIRMWARE_VERSION: u8 = 0x11;
/// Real-time event: timestamp + packed sample + signed RSSI.
pub const KEY_REALTIME_DATA: u8 = 0x14;
/// Session-end flag, little-endian integer.
pub const KEY_END_FLAG: u8 = 0x1D;
/// USB plugged/unplugged state, little-endian integer.
pub const KEY_USB_STATE: u8 = 0x2C;
/// Radio module version, UTF-8 string.
pub const KEY_MODEL_VERSION: u8 = 0x34;
/// MCU firmware version, UTF-8 string.
pub const KEY_MCU_VERSION: u8 = 0x35;
/// Product identifier; the first payload byte is the numeric id.
pub const KEY_PRODUCT_ID: u8 = 0x38;
