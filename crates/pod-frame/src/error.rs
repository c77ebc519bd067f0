//! Frame error types.

use thiserror::Error;

/// Errors that can occur while decoding a telemetry frame.
///
/// Decoding is a pure function of its input, so every error is deterministic
/// and reproducible from the same bytes. Offsets are relative to the buffer
/// the failing stage was given (the full frame for envelope errors, the outer
/// payload for sub-record errors).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Frame is too short to hold the envelope header.
    #[error("frame too short: expected at least {expected} bytes, got {actual}")]
    FrameTooShort {
        /// Expected minimum length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// A declared length runs past the end of the available bytes.
    #[error("truncated frame: {declared} bytes declared at offset {offset}, only {available} available")]
    Truncated {
        /// Offset of the length field that overruns.
        offset: usize,
        /// Length the frame declared.
        declared: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// A sub-record header straddles the end of the declared outer length.
    #[error("malformed sub-record stream: header at offset {offset} overruns declared length {declared}")]
    MalformedStream {
        /// Offset of the partial sub-record header.
        offset: usize,
        /// Declared outer payload length.
        declared: usize,
    },

    /// A sub-record payload is below the fixed minimum its key requires.
    #[error("sub-record 0x{key:02x} payload too short: expected at least {expected} bytes, got {actual}")]
    PayloadTooShort {
        /// Sub-record key.
        key: u8,
        /// Minimum payload length for this key.
        expected: usize,
        /// Actual payload length.
        actual: usize,
    },

    /// A version-string payload is not valid UTF-8.
    #[error("invalid UTF-8 in sub-record 0x{key:02x}")]
    InvalidUtf8 {
        /// Sub-record key.
        key: u8,
    },

    /// The trailing byte-sum checksum does not match.
    #[error("checksum mismatch: frame carries 0x{expected:04x}, computed 0x{actual:04x}")]
    ChecksumMismatch {
        /// Checksum carried by the frame.
        expected: u16,
        /// Checksum computed over the envelope bytes.
        actual: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FrameError::Truncated {
            offset: 3,
            declared: 120,
            available: 40,
        };
        assert!(err.to_string().contains("offset 3"));
        assert!(err.to_string().contains("120"));

        let err = FrameError::InvalidUtf8 { key: 0x11 };
        assert!(err.to_string().contains("0x11"));
    }
}
