//! Provisioning state and error codes carried in broadcast frames.

/// Provisioning state of the device, broadcast in current-state frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum State {
    /// Provisioning failed or was halted; a fresh WifiSettings command is
    /// required to leave this state.
    Stopped = 0x00,
    /// The device requires user authorization before accepting credentials.
    AwaitingAuthorization = 0x01,
    /// Ready to accept credentials.
    Authorized = 0x02,
    /// Credentials received, connection attempt in flight.
    Provisioning = 0x03,
    /// Connected to a network.
    Provisioned = 0x04,
}

impl From<State> for u8 {
    fn from(state: State) -> Self {
        state as u8
    }
}

impl State {
    /// Decode a state byte. Returns `None` for codes outside the protocol.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(State::Stopped),
            0x01 => Some(State::AwaitingAuthorization),
            0x02 => Some(State::Authorized),
            0x03 => Some(State::Provisioning),
            0x04 => Some(State::Provisioned),
            _ => None,
        }
    }
}

/// Error codes broadcast in error-state frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorCode {
    /// No error; broadcast to clear a previous error.
    None = 0x00,
    /// Malformed command or frame checksum mismatch.
    InvalidRpc = 0x01,
    /// Unrecognized command code.
    UnknownRpc = 0x02,
    /// Connection attempt exhausted its retry bound.
    UnableToConnect = 0x03,
    /// Command received while the device was not authorized.
    NotAuthorized = 0x04,
    /// RPC payload checksum mismatch.
    BadChecksum = 0x05,
    /// Unclassified failure.
    Unknown = 0xFF,
}

impl From<ErrorCode> for u8 {
    fn from(error: ErrorCode) -> Self {
        error as u8
    }
}

impl ErrorCode {
    /// Decode an error byte. Unrecognized codes map to `Unknown`.
    pub fn from_code(code: u8) -> Self {
        match code {
            0x00 => ErrorCode::None,
            0x01 => ErrorCode::InvalidRpc,
            0x02 => ErrorCode::UnknownRpc,
            0x03 => ErrorCode::UnableToConnect,
            0x04 => ErrorCode::NotAuthorized,
            0x05 => ErrorCode::BadChecksum,
            _ => ErrorCode::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_round_trip() {
        for state in [
            State::Stopped,
            State::AwaitingAuthorization,
            State::Authorized,
            State::Provisioning,
            State::Provisioned,
        ] {
            assert_eq!(State::from_code(state.into()), Some(state));
        }
        assert_eq!(State::from_code(0x05), None);
    }

    #[test]
    fn test_error_code_round_trip() {
        for error in [
            ErrorCode::None,
            ErrorCode::InvalidRpc,
            ErrorCode::UnknownRpc,
            ErrorCode::UnableToConnect,
            ErrorCode::NotAuthorized,
            ErrorCode::BadChecksum,
            ErrorCode::Unknown,
        ] {
            assert_eq!(ErrorCode::from_code(error.into()), error);
        }
        assert_eq!(ErrorCode::from_code(0x42), ErrorCode::Unknown);
    }
}
