//! Sensor Pod TLV Telemetry Protocol
//!
//! This crate decodes the binary telemetry frames emitted by LoRa
//! environmental sensor pods (temperature, humidity, pressure, battery,
//! RF signal strength) into structured records.
//!
//! # Frame Format
//!
//! Each uplink frame is a nested Type-Length-Value encoding: an outer
//! envelope carries a command byte and a length-prefixed payload, and the
//! payload is itself a sequence of TLV sub-records keyed by a single byte.
//!
//! | Field      | Size (bytes)    | Description                                  |
//! |------------|-----------------|----------------------------------------------|
//! | marker     | 2               | Fixed `43 47` frame marker (not validated).  |
//! | command    | 1               | Command identifier for the whole frame.      |
//! | length     | 2               | Outer payload length, little-endian.         |
//! | payload    | `length`        | Sequence of sub-records (below).             |
//! | checksum   | 2 (optional)    | Little-endian sum of all preceding bytes.    |
//!
//! Each sub-record inside the payload:
//!
//! | Field   | Size (bytes) | Description                        |
//! |---------|--------------|------------------------------------|
//! | key     | 1            | Identifies the payload schema.     |
//! | len     | 2            | Payload length, little-endian.     |
//! | payload | `len`        | Key-specific content.              |
//!
//! Sub-records tile the outer payload exactly; a walk that overruns the
//! declared outer length is a decode error. Unrecognized keys are skipped so
//! that newer firmware can add sub-records without breaking older hosts.
//!
//! # Example
//!
//! ```rust,ignore
//! use pod_frame::decode_frame;
//!
//! let frame = hex::decode("434734420038...")?;
//! let decoded = decode_frame(&frame)?;
//! for reading in &decoded.readings {
//!     println!("{} {:.1} C", reading.timestamp, reading.temperature);
//! }
//! ```

mod codec;
mod constants;
mod error;
mod types;

pub use codec::*;
pub use constants::*;
pub use error::*;
pub use types::*;
