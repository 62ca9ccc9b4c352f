//! Device metadata reported through the protocol.

use serde::{Deserialize, Serialize};

/// Placeholder token replaced with the live local address when the device
/// URL is sent.
pub const LOCAL_IPV4_TOKEN: &str = "{LOCAL_IPV4}";

/// Hardware family the firmware runs on, reported as the third device-info
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChipFamily {
    Esp32,
    Esp32C3,
    Esp32S2,
    Esp32S3,
    Esp8266,
}

impl ChipFamily {
    /// Human-readable descriptor sent over the wire.
    pub fn descriptor(&self) -> &'static str {
        match self {
            ChipFamily::Esp32 => "ESP32",
            ChipFamily::Esp32C3 => "ESP32-C3",
            ChipFamily::Esp32S2 => "ESP32-S2",
            ChipFamily::Esp32S3 => "ESP32-S3",
            ChipFamily::Esp8266 => "ESP8266",
        }
    }
}

/// Device metadata for the engine. Configured once by the owning
/// application; the protocol core only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Firmware name (first device-info field).
    pub firmware_name: String,
    /// Firmware version (second device-info field).
    pub firmware_version: String,
    /// Hardware family (third device-info field, as its descriptor string).
    pub chip_family: ChipFamily,
    /// Device name (fourth device-info field).
    pub device_name: String,
    /// Optional URL template sent after a successful provision. Any
    /// `{LOCAL_IPV4}` token is substituted with the live local address at
    /// send time. `None` falls back to `http://<local-address>`.
    pub device_url: Option<String>,
}

impl DeviceConfig {
    /// Create a config without a device URL template.
    pub fn new(
        chip_family: ChipFamily,
        firmware_name: impl Into<String>,
        firmware_version: impl Into<String>,
        device_name: impl Into<String>,
    ) -> Self {
        DeviceConfig {
            firmware_name: firmware_name.into(),
            firmware_version: firmware_version.into(),
            chip_family,
            device_name: device_name.into(),
            device_url: None,
        }
    }

    /// Set the device URL template.
    pub fn with_device_url(mut self, url: impl Into<String>) -> Self {
        self.device_url = Some(url.into());
        self
    }

    /// Resolve the URL to advertise for the given local address.
    pub fn resolve_device_url(&self, local_address: &str) -> String {
        match &self.device_url {
            Some(template) => template.replace(LOCAL_IPV4_TOKEN, local_address),
            None => format!("http://{}", local_address),
        }
    }
}
