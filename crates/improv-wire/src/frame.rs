//! Frame grammar: byte-at-a-time parsing and frame assembly.
//!
//! Every frame on the wire has the same fixed structure:
//!
//! ```text
//! +---+---+---+---+---+---+---------+------+--------+---------------+----------+
//! | I | M | P | R | O | V | version | type | len    | payload[0..len] | checksum |
//! +---+---+---+---+---+---+---------+------+--------+---------------+----------+
//! ```
//!
//! The checksum is the 8-bit truncated sum of every byte that precedes it.

use log::trace;

use crate::constants::*;
use crate::error::WireError;

/// 8-bit additive checksum over a byte slice.
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |sum, &b| sum.wrapping_add(b))
}

/// A complete, checksum-verified frame lifted off the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Raw frame type byte (`TYPE_*`).
    pub frame_type: u8,
    /// Payload bytes, checksum excluded.
    pub payload: Vec<u8>,
}

/// Outcome of feeding one byte to the [`FrameParser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    /// Byte accepted; the frame is still incomplete.
    Accepted,
    /// Byte did not fit the grammar at the current position. The byte is
    /// discarded and the cursor returns to 0; it is *not* retried as the
    /// start of a new frame.
    Rejected,
    /// The checksum trailer did not match the accumulated sum. The frame is
    /// dropped and the cursor returns to 0.
    BadChecksum,
    /// A complete, checksum-valid frame. The cursor has returned to 0.
    Frame(Frame),
}

/// Incremental parser for the frame grammar.
///
/// Owns a fixed-capacity buffer and a cursor. Bytes are fed one at a time
/// (typically one per transport poll) and validated against the grammar rule
/// for the current cursor position. Any validation failure resets the cursor,
/// so a malformed frame never corrupts the parse of the frames that follow.
#[derive(Debug)]
pub struct FrameParser {
    buffer: [u8; MAX_FRAME_SIZE],
    position: usize,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new parser with an empty buffer.
    pub fn new() -> Self {
        FrameParser {
            buffer: [0u8; MAX_FRAME_SIZE],
            position: 0,
        }
    }

    /// Current cursor position (number of accepted bytes in the frame so far).
    pub fn position(&self) -> usize {
        self.position
    }

    /// Discard any partial frame and return the cursor to 0.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Feed one byte from the transport.
    ///
    /// Position grammar: bytes 0-5 must spell the preamble, byte 6 must be
    /// the supported protocol version, bytes 7 (type) and 8 (length) are
    /// unconditional, payload bytes are unconditional, and the byte after
    /// the payload must equal the running checksum.
    pub fn feed(&mut self, byte: u8) -> ParseEvent {
        let position = self.position;

        let accept = match position {
            0..=5 => byte == PREAMBLE[position],
            6 => byte == SERIAL_VERSION,
            7 | 8 => true,
            _ => {
                let data_len = self.buffer[OFFSET_LENGTH] as usize;
                if position <= OFFSET_LENGTH + data_len {
                    true
                } else {
                    // Checksum trailer; the frame ends here whether it is
                    // valid or not.
                    self.position = 0;

                    let expected = checksum(&self.buffer[..position]);
                    if expected != byte {
                        trace!(
                            "frame checksum mismatch: expected 0x{:02X}, got 0x{:02X}",
                            expected,
                            byte
                        );
                        return ParseEvent::BadChecksum;
                    }

                    let frame = Frame {
                        frame_type: self.buffer[OFFSET_TYPE],
                        payload: self.buffer[OFFSET_PAYLOAD..OFFSET_PAYLOAD + data_len].to_vec(),
                    };
                    trace!(
                        "frame complete: type=0x{:02X} payload_len={}",
                        frame.frame_type,
                        data_len
                    );
                    return ParseEvent::Frame(frame);
                }
            }
        };

        if accept {
            self.buffer[self.position] = byte;
            self.position += 1;
            ParseEvent::Accepted
        } else {
            self.position = 0;
            ParseEvent::Rejected
        }
    }
}

/// Assemble a full frame around a payload: preamble, version, type, length,
/// payload, checksum trailer.
pub fn encode_frame(frame_type: u8, payload: &[u8]) -> Result<Vec<u8>, WireError> {
    if payload.len() > u8::MAX as usize {
        return Err(WireError::PayloadTooLong {
            max: u8::MAX as usize,
            actual: payload.len(),
        });
    }

    let mut buf = Vec::with_capacity(OFFSET_PAYLOAD + payload.len() + 1);
    buf.extend_from_slice(PREAMBLE);
    buf.push(SERIAL_VERSION);
    buf.push(frame_type);
    buf.push(payload.len() as u8);
    buf.extend_from_slice(payload);
    buf.push(checksum(&buf));
    Ok(buf)
}
