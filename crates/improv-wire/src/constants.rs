//! Protocol constants
//!
//! These constants define the frame grammar, command codes, and state/error
//! codes used by the Improv serial provisioning protocol.

// ============================================================================
// Framing
// ============================================================================

/// The 6-byte literal that opens every frame.
pub const PREAMBLE: &[u8; 6] = b"IMPROV";

/// Protocol version carried in byte 6 of every frame.
pub const SERIAL_VERSION: u8 = 1;

/// Byte offset of the frame type within a frame.
pub const OFFSET_TYPE: usize = 7;

/// Byte offset of the payload length within a frame.
pub const OFFSET_LENGTH: usize = 8;

/// Byte offset of the first payload byte within a frame.
pub const OFFSET_PAYLOAD: usize = 9;

/// Largest possible frame: preamble + version + type + length + 255 payload
/// bytes + checksum.
pub const MAX_FRAME_SIZE: usize = OFFSET_PAYLOAD + u8::MAX as usize + 1;

// ============================================================================
// Frame Types
// ============================================================================

/// Device → host broadcast of the current provisioning state.
pub const TYPE_CURRENT_STATE: u8 = 0x01;
/// Device → host broadcast of an error code.
pub const TYPE_ERROR_STATE: u8 = 0x02;
/// Host → device RPC command.
pub const TYPE_RPC_COMMAND: u8 = 0x03;
/// Device → host RPC response.
pub const TYPE_RPC_RESPONSE: u8 = 0x04;

// ============================================================================
// RPC Command Codes
// ============================================================================

/// Submit network credentials and start provisioning.
pub const CMD_WIFI_SETTINGS: u8 = 0x01;
/// Query the current provisioning state.
pub const CMD_GET_CURRENT_STATE: u8 = 0x02;
/// Query firmware/device metadata.
pub const CMD_GET_DEVICE_INFO: u8 = 0x03;
/// Request a scan of nearby networks.
pub const CMD_GET_WIFI_NETWORKS: u8 = 0x04;
