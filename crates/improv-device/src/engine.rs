//! The provisioning engine: frame intake, command dispatch, and the
//! provisioning state machine.

use tracing::{debug, trace, warn};

use improv_wire::{
    error_frame, rpc_response_frame, state_frame, Command, ErrorCode, FrameParser, ParseEvent,
    State, CMD_WIFI_SETTINGS, TYPE_RPC_COMMAND,
};

use crate::config::DeviceConfig;
use crate::connector::{Connector, PollingConnector};
use crate::network::NetworkInterface;
use crate::transport::SerialTransport;

/// Observer for provisioning outcomes. Both hooks default to no-ops so an
/// embedding only implements what it cares about.
pub trait ProvisioningListener {
    /// Called after a connection attempt succeeds, with the credentials that
    /// were used.
    fn on_connected(&mut self, _ssid: &str, _password: &str) {}

    /// Called whenever an error is surfaced to the host.
    fn on_error(&mut self, _error: ErrorCode) {}
}

/// The protocol core. Owns the parse buffer, the provisioning state, and the
/// last error code; everything else is reached through the injected
/// collaborators.
///
/// Drive it by calling [`ProvisioningEngine::poll`] from the embedding's
/// main loop; each call consumes at most one transport byte.
pub struct ProvisioningEngine<T, N> {
    transport: T,
    network: N,
    config: DeviceConfig,
    parser: FrameParser,
    state: State,
    error: ErrorCode,
    connector: Box<dyn Connector>,
    listener: Option<Box<dyn ProvisioningListener>>,
}

impl<T: SerialTransport, N: NetworkInterface> ProvisioningEngine<T, N> {
    /// Create an engine with the default bounded-poll connector and no
    /// listener.
    pub fn new(transport: T, network: N, config: DeviceConfig) -> Self {
        ProvisioningEngine {
            transport,
            network,
            config,
            parser: FrameParser::new(),
            state: State::Authorized,
            error: ErrorCode::None,
            connector: Box::new(PollingConnector::default()),
            listener: None,
        }
    }

    /// Replace the connection strategy.
    pub fn set_connector(&mut self, connector: Box<dyn Connector>) {
        self.connector = connector;
    }

    /// Register a listener for connection/error notifications.
    pub fn set_listener(&mut self, listener: Box<dyn ProvisioningListener>) {
        self.listener = Some(listener);
    }

    /// Current provisioning state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Last error surfaced to the host.
    pub fn last_error(&self) -> ErrorCode {
        self.error
    }

    /// Access the transport collaborator.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Access the network collaborator.
    pub fn network_mut(&mut self) -> &mut N {
        &mut self.network
    }

    /// One poll cycle: read at most one byte from the transport and run it
    /// through the frame grammar, dispatching if it completes an RPC frame.
    pub fn poll(&mut self) {
        let Some(byte) = self.transport.read_byte() else {
            return;
        };

        match self.parser.feed(byte) {
            ParseEvent::Accepted | ParseEvent::Rejected => {}
            ParseEvent::BadChecksum => {
                self.report_error(ErrorCode::InvalidRpc);
            }
            ParseEvent::Frame(frame) => {
                if frame.frame_type == TYPE_RPC_COMMAND {
                    let command = Command::decode(&frame.payload, false);
                    self.dispatch(command);
                } else {
                    // Inbound frames of other types carry nothing for a
                    // device to act on.
                    trace!(frame_type = frame.frame_type, "ignoring non-RPC frame");
                }
            }
        }
    }

    /// Dispatch one decoded command. Returns whether the command was
    /// recognized and handled.
    pub fn dispatch(&mut self, command: Command) -> bool {
        debug!(?command, "dispatching");
        match command {
            Command::GetCurrentState => {
                if self.network.is_connected() {
                    self.set_state(State::Provisioned);
                    self.send_device_url(Command::GetCurrentState.code());
                } else {
                    self.set_state(State::Authorized);
                }
                true
            }

            Command::WifiSettings { ssid, password } => {
                if ssid.is_empty() {
                    self.report_error(ErrorCode::InvalidRpc);
                    return true;
                }
                self.provision(&ssid, &password);
                true
            }

            Command::GetDeviceInfo => {
                let fields = [
                    self.config.firmware_name.clone(),
                    self.config.firmware_version.clone(),
                    self.config.chip_family.descriptor().to_string(),
                    self.config.device_name.clone(),
                ];
                self.send_rpc_response(Command::GetDeviceInfo.code(), &fields);
                true
            }

            Command::GetWifiNetworks => {
                self.send_wifi_networks();
                true
            }

            Command::BadChecksum => {
                self.report_error(ErrorCode::BadChecksum);
                false
            }

            Command::Unknown(code) => {
                debug!(code, "unknown rpc command");
                self.report_error(ErrorCode::UnknownRpc);
                false
            }
        }
    }

    /// Run a connection attempt for the given credentials, walking the state
    /// machine `Provisioning` → `Provisioned` or `Stopped`.
    fn provision(&mut self, ssid: &str, password: &str) {
        self.set_state(State::Provisioning);

        let success = self.connector.connect(&mut self.network, ssid, password);

        if success {
            self.set_error(ErrorCode::None);
            self.set_state(State::Provisioned);
            self.send_device_url(CMD_WIFI_SETTINGS);
            if let Some(listener) = self.listener.as_mut() {
                listener.on_connected(ssid, password);
            }
        } else {
            self.set_state(State::Stopped);
            self.report_error(ErrorCode::UnableToConnect);
        }
    }

    /// Scan and reply with one RPC response per network, then the empty
    /// terminator response.
    fn send_wifi_networks(&mut self) {
        let networks = self.network.scan();
        debug!(count = networks.len(), "scan complete");

        let code = Command::GetWifiNetworks.code();
        for network in networks {
            let fields = [
                network.ssid,
                network.rssi.to_string(),
                if network.requires_auth { "YES" } else { "NO" }.to_string(),
            ];
            self.send_rpc_response(code, &fields);
        }
        self.send_rpc_response::<String>(code, &[]);
    }

    /// Send the device URL (template resolved against the live local
    /// address) as an RPC response to the given command code.
    fn send_device_url(&mut self, command_code: u8) {
        let url = self.config.resolve_device_url(&self.network.local_address());
        self.send_rpc_response(command_code, &[url]);
    }

    /// Transition the state machine and broadcast the new state.
    fn set_state(&mut self, state: State) {
        trace!(from = ?self.state, to = ?state, "state transition");
        self.state = state;
        let frame = state_frame(state);
        self.transport.write(&frame);
    }

    /// Record and broadcast an error code without invoking the listener
    /// (used for the `None` clear on success).
    fn set_error(&mut self, error: ErrorCode) {
        self.error = error;
        let frame = error_frame(error);
        self.transport.write(&frame);
    }

    /// Record and broadcast an error code and notify the listener.
    fn report_error(&mut self, error: ErrorCode) {
        warn!(?error, "protocol error");
        self.set_error(error);
        if let Some(listener) = self.listener.as_mut() {
            listener.on_error(error);
        }
    }

    fn send_rpc_response<S: AsRef<str>>(&mut self, command_code: u8, strings: &[S]) {
        match rpc_response_frame(command_code, strings) {
            Ok(frame) => self.transport.write(&frame),
            // Only reachable with oversized configured metadata.
            Err(e) => warn!(error = %e, "dropping unencodable rpc response"),
        }
    }
}
