//! RPC commands carried inside RPC-command frames.

use log::trace;

use crate::constants::*;
use crate::error::WireError;
use crate::frame::{checksum, encode_frame};

/// A decoded RPC command.
///
/// Malformed payloads decode to [`Command::Unknown`] (structure/length
/// problems) or [`Command::BadChecksum`] (payload trailer mismatch) rather
/// than an error, so the dispatcher can answer them with the appropriate
/// error-state broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit network credentials and start provisioning.
    WifiSettings {
        /// Network SSID. Must be non-empty to be actionable.
        ssid: String,
        /// Network password; may be empty for open networks.
        password: String,
    },

    /// Query the current provisioning state.
    GetCurrentState,

    /// Query firmware/device metadata.
    GetDeviceInfo,

    /// Request a scan of nearby networks.
    GetWifiNetworks,

    /// Structurally invalid payload, or a recognized structure with an
    /// unrecognized command code (carried through for dispatch-level
    /// rejection).
    Unknown(u8),

    /// Payload checksum trailer did not match.
    BadChecksum,
}

impl Command {
    /// Get the wire code for this command.
    ///
    /// `Unknown` yields the raw code it carries; `BadChecksum` has no wire
    /// code of its own and yields 0.
    pub fn code(&self) -> u8 {
        match self {
            Command::WifiSettings { .. } => CMD_WIFI_SETTINGS,
            Command::GetCurrentState => CMD_GET_CURRENT_STATE,
            Command::GetDeviceInfo => CMD_GET_DEVICE_INFO,
            Command::GetWifiNetworks => CMD_GET_WIFI_NETWORKS,
            Command::Unknown(code) => *code,
            Command::BadChecksum => 0,
        }
    }

    /// Decode an RPC payload (`[code][data_len][data...]`).
    ///
    /// When `verify_checksum` is set the final payload byte is an 8-bit
    /// additive checksum over the preceding bytes; this is used by carriers
    /// that do not have their own frame trailer. The serial frame parser
    /// already verifies the frame checksum, so it decodes with
    /// `verify_checksum = false`.
    pub fn decode(payload: &[u8], verify_checksum: bool) -> Command {
        let overhead = 2 + usize::from(verify_checksum);
        if payload.len() < overhead {
            return Command::Unknown(payload.first().copied().unwrap_or(0));
        }

        let code = payload[0];
        let declared_len = payload[1] as usize;
        if declared_len != payload.len() - overhead {
            trace!(
                "rpc length mismatch: declared {}, actual {}",
                declared_len,
                payload.len() - overhead
            );
            return Command::Unknown(code);
        }

        if verify_checksum {
            let trailer = payload[payload.len() - 1];
            if checksum(&payload[..payload.len() - 1]) != trailer {
                return Command::BadChecksum;
            }
        }

        match code {
            CMD_WIFI_SETTINGS => Self::decode_wifi_settings(code, &payload[2..2 + declared_len]),
            CMD_GET_CURRENT_STATE => Command::GetCurrentState,
            CMD_GET_DEVICE_INFO => Command::GetDeviceInfo,
            CMD_GET_WIFI_NETWORKS => Command::GetWifiNetworks,
            other => Command::Unknown(other),
        }
    }

    /// Decode the `[ssid_len][ssid][pass_len][password]` credential layout.
    ///
    /// The declared string lengths are untrusted; any overrun of the payload
    /// extent decodes to `Unknown` instead of reading out of bounds.
    fn decode_wifi_settings(code: u8, data: &[u8]) -> Command {
        let Some(&ssid_len) = data.first() else {
            return Command::Unknown(code);
        };
        let ssid_end = 1 + ssid_len as usize;
        let Some(&pass_len) = data.get(ssid_end) else {
            return Command::Unknown(code);
        };
        let pass_start = ssid_end + 1;
        let pass_end = pass_start + pass_len as usize;
        if pass_end > data.len() {
            return Command::Unknown(code);
        }

        Command::WifiSettings {
            ssid: String::from_utf8_lossy(&data[1..ssid_end]).into_owned(),
            password: String::from_utf8_lossy(&data[pass_start..pass_end]).into_owned(),
        }
    }

    /// Encode the command as an RPC payload (`[code][data_len][data...]`,
    /// no trailing payload checksum).
    pub fn encode(&self) -> Result<Vec<u8>, WireError> {
        match self {
            Command::WifiSettings { ssid, password } => {
                for field in [ssid, password] {
                    if field.len() > u8::MAX as usize {
                        return Err(WireError::StringTooLong {
                            max: u8::MAX as usize,
                            actual: field.len(),
                        });
                    }
                }
                let data_len = 2 + ssid.len() + password.len();
                if data_len > u8::MAX as usize {
                    return Err(WireError::PayloadTooLong {
                        max: u8::MAX as usize,
                        actual: data_len,
                    });
                }

                let mut buf = Vec::with_capacity(2 + data_len);
                buf.push(CMD_WIFI_SETTINGS);
                buf.push(data_len as u8);
                buf.push(ssid.len() as u8);
                buf.extend_from_slice(ssid.as_bytes());
                buf.push(password.len() as u8);
                buf.extend_from_slice(password.as_bytes());
                Ok(buf)
            }
            other => Ok(vec![other.code(), 0]),
        }
    }

    /// Encode the command as a complete RPC-command frame ready for the
    /// transport.
    pub fn to_frame(&self) -> Result<Vec<u8>, WireError> {
        encode_frame(TYPE_RPC_COMMAND, &self.encode()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bare_commands() {
        assert_eq!(
            Command::decode(&[CMD_GET_CURRENT_STATE, 0], false),
            Command::GetCurrentState
        );
        assert_eq!(
            Command::decode(&[CMD_GET_DEVICE_INFO, 0], false),
            Command::GetDeviceInfo
        );
        assert_eq!(
            Command::decode(&[CMD_GET_WIFI_NETWORKS, 0], false),
            Command::GetWifiNetworks
        );
    }

    #[test]
    fn test_decode_wifi_settings() {
        let payload = Command::WifiSettings {
            ssid: "home".to_string(),
            password: "secret".to_string(),
        }
        .encode()
        .unwrap();

        assert_eq!(payload[0], CMD_WIFI_SETTINGS);
        assert_eq!(payload[1] as usize, payload.len() - 2);
        assert_eq!(
            Command::decode(&payload, false),
            Command::WifiSettings {
                ssid: "home".to_string(),
                password: "secret".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_wifi_settings_empty_password() {
        let payload = Command::WifiSettings {
            ssid: "open-net".to_string(),
            password: String::new(),
        }
        .encode()
        .unwrap();

        assert_eq!(
            Command::decode(&payload, false),
            Command::WifiSettings {
                ssid: "open-net".to_string(),
                password: String::new(),
            }
        );
    }

    #[test]
    fn test_decode_length_mismatch_is_unknown() {
        // Declared data length does not match the actual payload extent.
        assert_eq!(
            Command::decode(&[CMD_GET_DEVICE_INFO, 3], false),
            Command::Unknown(CMD_GET_DEVICE_INFO)
        );
        assert_eq!(
            Command::decode(&[CMD_GET_DEVICE_INFO, 0, 0xAA], false),
            Command::Unknown(CMD_GET_DEVICE_INFO)
        );
    }

    #[test]
    fn test_decode_truncated_payload_is_unknown() {
        assert_eq!(Command::decode(&[], false), Command::Unknown(0));
        assert_eq!(
            Command::decode(&[CMD_WIFI_SETTINGS], false),
            Command::Unknown(CMD_WIFI_SETTINGS)
        );
    }

    #[test]
    fn test_decode_unrecognized_code_carries_raw_value() {
        assert_eq!(Command::decode(&[0x7E, 0], false), Command::Unknown(0x7E));
        assert_eq!(Command::decode(&[0x7E, 0], false).code(), 0x7E);
    }

    #[test]
    fn test_decode_wifi_settings_overrun_is_unknown() {
        // SSID length claims more bytes than the payload carries.
        let payload = [CMD_WIFI_SETTINGS, 3, 200, b'a', b'b'];
        assert_eq!(
            Command::decode(&payload, false),
            Command::Unknown(CMD_WIFI_SETTINGS)
        );

        // Password length overruns past the payload end.
        let payload = [CMD_WIFI_SETTINGS, 4, 1, b'x', 9, b'y'];
        assert_eq!(
            Command::decode(&payload, false),
            Command::Unknown(CMD_WIFI_SETTINGS)
        );
    }

    #[test]
    fn test_decode_with_payload_checksum() {
        let mut payload = vec![CMD_GET_CURRENT_STATE, 0];
        payload.push(checksum(&payload));
        assert_eq!(Command::decode(&payload, true), Command::GetCurrentState);

        let last = payload.len() - 1;
        payload[last] = payload[last].wrapping_add(1);
        assert_eq!(Command::decode(&payload, true), Command::BadChecksum);
    }

    #[test]
    fn test_encode_oversized_ssid_refused() {
        let cmd = Command::WifiSettings {
            ssid: "s".repeat(300),
            password: String::new(),
        };
        assert!(matches!(
            cmd.encode(),
            Err(WireError::StringTooLong { .. })
        ));
    }

    #[test]
    fn test_frame_round_trip() {
        use crate::frame::{FrameParser, ParseEvent};

        let cmd = Command::WifiSettings {
            ssid: "home".to_string(),
            password: "secret".to_string(),
        };
        let frame = cmd.to_frame().unwrap();

        let mut parser = FrameParser::new();
        let mut decoded = None;
        for &b in &frame {
            if let ParseEvent::Frame(f) = parser.feed(b) {
                assert_eq!(f.frame_type, TYPE_RPC_COMMAND);
                decoded = Some(Command::decode(&f.payload, false));
            }
        }

        // Re-encoding the decoded command reproduces the original bytes.
        let decoded = decoded.expect("frame should complete");
        assert_eq!(decoded, cmd);
        assert_eq!(decoded.to_frame().unwrap(), frame);
    }
}
