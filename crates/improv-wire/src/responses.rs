//! Builders for the device → host frames.
//!
//! The encoders only produce bytes; writing them to the transport is the
//! caller's job.

use bytes::BufMut;

use crate::constants::*;
use crate::error::WireError;
use crate::frame::{checksum, encode_frame};
use crate::types::{ErrorCode, State};

/// Build a current-state broadcast frame. Payload is the single state byte.
pub fn state_frame(state: State) -> Vec<u8> {
    broadcast_frame(TYPE_CURRENT_STATE, state.into())
}

/// Build an error-state broadcast frame. Payload is the single error byte.
pub fn error_frame(error: ErrorCode) -> Vec<u8> {
    broadcast_frame(TYPE_ERROR_STATE, error.into())
}

/// One-byte-payload broadcast frames share a fixed 11-byte shape, so they
/// are assembled inline and cannot fail.
fn broadcast_frame(frame_type: u8, value: u8) -> Vec<u8> {
    let mut buf = Vec::with_capacity(OFFSET_PAYLOAD + 2);
    buf.extend_from_slice(PREAMBLE);
    buf.put_u8(SERIAL_VERSION);
    buf.put_u8(frame_type);
    buf.put_u8(1);
    buf.put_u8(value);
    buf.put_u8(checksum(&buf));
    buf
}

/// Build an RPC-response frame.
///
/// The payload is the answered command code followed by each string as a
/// one-byte length prefix plus its raw bytes, in order. An empty string list
/// is valid and encodes a bare `[code][0]` payload (used to terminate the
/// multi-part network-list reply).
pub fn rpc_response_frame<S: AsRef<str>>(
    command_code: u8,
    strings: &[S],
) -> Result<Vec<u8>, WireError> {
    let mut data = Vec::new();
    for s in strings {
        let bytes = s.as_ref().as_bytes();
        if bytes.len() > u8::MAX as usize {
            return Err(WireError::StringTooLong {
                max: u8::MAX as usize,
                actual: bytes.len(),
            });
        }
        data.put_u8(bytes.len() as u8);
        data.extend_from_slice(bytes);
    }

    let mut payload = Vec::with_capacity(2 + data.len());
    payload.put_u8(command_code);
    payload.put_u8(u8::try_from(data.len()).map_err(|_| WireError::PayloadTooLong {
        max: u8::MAX as usize,
        actual: data.len(),
    })?);
    payload.extend_from_slice(&data);

    encode_frame(TYPE_RPC_RESPONSE, &payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FrameParser, ParseEvent};

    /// Parse an encoded frame back into (type, payload) via the byte-at-a-time
    /// parser, asserting it round-trips cleanly.
    fn reparse(frame: &[u8]) -> (u8, Vec<u8>) {
        let mut parser = FrameParser::new();
        for &b in &frame[..frame.len() - 1] {
            assert_eq!(parser.feed(b), ParseEvent::Accepted);
        }
        match parser.feed(frame[frame.len() - 1]) {
            ParseEvent::Frame(f) => (f.frame_type, f.payload),
            other => panic!("expected complete frame, got {:?}", other),
        }
    }

    #[test]
    fn test_state_frame_layout() {
        let frame = state_frame(State::Provisioning);
        assert_eq!(frame.len(), 11);
        assert_eq!(&frame[..6], b"IMPROV");
        assert_eq!(frame[6], SERIAL_VERSION);
        assert_eq!(frame[7], TYPE_CURRENT_STATE);
        assert_eq!(frame[8], 1);
        assert_eq!(frame[9], State::Provisioning.into());
        assert_eq!(frame[10], checksum(&frame[..10]));
    }

    #[test]
    fn test_error_frame_layout() {
        let frame = error_frame(ErrorCode::UnableToConnect);
        let (frame_type, payload) = reparse(&frame);
        assert_eq!(frame_type, TYPE_ERROR_STATE);
        assert_eq!(payload, vec![ErrorCode::UnableToConnect.into()]);
    }

    #[test]
    fn test_rpc_response_strings_in_order() {
        let frame =
            rpc_response_frame(CMD_GET_DEVICE_INFO, &["fw", "1.2.3", "ESP32", "kitchen"]).unwrap();
        let (frame_type, payload) = reparse(&frame);
        assert_eq!(frame_type, TYPE_RPC_RESPONSE);
        assert_eq!(payload[0], CMD_GET_DEVICE_INFO);
        assert_eq!(payload[1] as usize, payload.len() - 2);

        let mut strings = Vec::new();
        let mut rest = &payload[2..];
        while !rest.is_empty() {
            let len = rest[0] as usize;
            strings.push(String::from_utf8(rest[1..1 + len].to_vec()).unwrap());
            rest = &rest[1 + len..];
        }
        assert_eq!(strings, vec!["fw", "1.2.3", "ESP32", "kitchen"]);
    }

    #[test]
    fn test_rpc_response_empty_list() {
        let frame = rpc_response_frame::<&str>(CMD_GET_WIFI_NETWORKS, &[]).unwrap();
        let (frame_type, payload) = reparse(&frame);
        assert_eq!(frame_type, TYPE_RPC_RESPONSE);
        assert_eq!(payload, vec![CMD_GET_WIFI_NETWORKS, 0]);
    }

    #[test]
    fn test_rpc_response_oversized_string_refused() {
        let long = "x".repeat(300);
        assert!(matches!(
            rpc_response_frame(CMD_GET_DEVICE_INFO, &[long.as_str()]),
            Err(WireError::StringTooLong { .. })
        ));
    }

    #[test]
    fn test_rpc_response_oversized_total_refused() {
        // Three 100-byte strings overflow the one-byte payload length.
        let s = "y".repeat(100);
        let strings = [s.as_str(), s.as_str(), s.as_str()];
        assert!(matches!(
            rpc_response_frame(CMD_GET_WIFI_NETWORKS, &strings),
            Err(WireError::PayloadTooLong { .. })
        ));
    }
}
