//! Protocol error types.

use thiserror::Error;

/// Errors that can occur when building protocol frames.
///
/// Note that malformed *inbound* data is not an `Err`: the frame parser
/// reports rejects through [`crate::ParseEvent`] and the command decoder
/// reports malformed payloads as [`crate::Command::Unknown`] or
/// [`crate::Command::BadChecksum`], so a bad peer can never poison the
/// device-side call path with an error it must unwind through.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// Frame payload exceeds the one-byte length prefix.
    #[error("frame payload too long: maximum {max} bytes, got {actual}")]
    PayloadTooLong {
        /// Maximum allowed payload length.
        max: usize,
        /// Actual payload length.
        actual: usize,
    },

    /// A string field exceeds its one-byte length prefix.
    #[error("string field too long: maximum {max} bytes, got {actual}")]
    StringTooLong {
        /// Maximum allowed string length.
        max: usize,
        /// Actual string length.
        actual: usize,
    },
}
