//! Network stack boundary.

/// One network discovered by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedNetwork {
    /// Network SSID.
    pub ssid: String,
    /// Signal strength in dBm.
    pub rssi: i32,
    /// Whether the network requires authentication.
    pub requires_auth: bool,
}

/// The network stack the engine drives. Radio drivers, DHCP and the rest of
/// the stack live behind this boundary.
pub trait NetworkInterface {
    /// Whether the device currently holds a connection.
    fn is_connected(&self) -> bool;

    /// Begin connecting with the given credentials. Completion is observed
    /// through [`NetworkInterface::is_connected`].
    fn connect(&mut self, ssid: &str, password: &str);

    /// Drop the current connection, if any.
    fn disconnect(&mut self);

    /// Scan for nearby networks. Result order is preserved in the protocol
    /// reply; no de-duplication or sorting is applied.
    fn scan(&mut self) -> Vec<ScannedNetwork>;

    /// The device's local network address, as a displayable string.
    fn local_address(&self) -> String;
}
