//! Connection attempt strategies.

use std::thread;
use std::time::Duration;

use tracing::{debug, trace};

use crate::network::NetworkInterface;

/// Interval between connectivity polls during an attempt.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Number of polls before an attempt is declared failed.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;

/// Strategy for turning credentials into a connection.
///
/// The engine ships with [`PollingConnector`]; an embedding that cannot
/// afford to block (a cooperative scheduler, an async runtime) can register
/// its own implementation instead.
pub trait Connector {
    /// Attempt to connect. Returns `true` once the network reports
    /// connectivity, `false` when the attempt is abandoned.
    fn connect(&mut self, network: &mut dyn NetworkInterface, ssid: &str, password: &str) -> bool;
}

/// The default blocking strategy: drop any existing connection, start a new
/// one, then poll connectivity at a fixed interval up to a bounded attempt
/// count.
///
/// While an attempt is in flight no protocol bytes are processed; that
/// trade-off is inherent to this strategy, not to the state machine, which
/// sequences `Provisioning` → `Provisioned`/`Stopped` identically for a
/// non-blocking connector.
#[derive(Debug, Clone)]
pub struct PollingConnector {
    poll_interval: Duration,
    max_attempts: u32,
}

impl Default for PollingConnector {
    fn default() -> Self {
        PollingConnector {
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl PollingConnector {
    /// Create a connector with a custom poll interval and attempt bound.
    pub fn new(poll_interval: Duration, max_attempts: u32) -> Self {
        PollingConnector {
            poll_interval,
            max_attempts,
        }
    }
}

impl Connector for PollingConnector {
    fn connect(&mut self, network: &mut dyn NetworkInterface, ssid: &str, password: &str) -> bool {
        if network.is_connected() {
            debug!("dropping existing connection before provisioning");
            network.disconnect();
        }

        debug!(ssid, "starting connection attempt");
        network.connect(ssid, password);

        let mut attempts = 0;
        while !network.is_connected() {
            if attempts >= self.max_attempts {
                debug!(ssid, attempts, "connection attempt exhausted");
                network.disconnect();
                return false;
            }
            thread::sleep(self.poll_interval);
            attempts += 1;
            trace!(ssid, attempts, "connectivity poll");
        }

        debug!(ssid, "connected");
        true
    }
}
