//! Device-side Improv provisioning engine.
//!
//! This crate hosts the protocol core that runs on the device: it pulls
//! bytes off a serial transport, feeds them through the
//! [`improv_wire`] frame grammar, and dispatches decoded RPC commands into
//! the provisioning state machine, driving the network stack and answering
//! the host with state broadcasts and RPC responses.
//!
//! The embedding supplies the collaborators at the boundary:
//!
//! - [`SerialTransport`] — the byte stream
//! - [`NetworkInterface`] — connect/disconnect/scan/address
//! - [`Connector`] — the connection attempt strategy (defaults to a
//!   bounded blocking poll)
//! - [`ProvisioningListener`] — optional connected/error hooks
//!
//! # Example
//!
//! ```rust,ignore
//! use improv_device::{ChipFamily, DeviceConfig, ProvisioningEngine};
//!
//! let config = DeviceConfig::new(ChipFamily::Esp32, "my-fw", "1.4.0", "kitchen-lamp")
//!     .with_device_url("http://{LOCAL_IPV4}/setup");
//! let mut engine = ProvisioningEngine::new(serial, wifi, config);
//!
//! loop {
//!     engine.poll();
//!     // ... the rest of the firmware main loop
//! }
//! ```

mod config;
mod connector;
mod engine;
mod network;
mod transport;

pub use config::*;
pub use connector::*;
pub use engine::*;
pub use network::*;
pub use transport::*;

// The wire types appear throughout this crate's API surface.
pub use improv_wire::{Command, ErrorCode, State};
