//! Discovered devices and connection state

use serde::{Deserialize, Serialize};

/// A device seen during discovery or recalled from the bond list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Advertised name, when the device reported one
    pub name: Option<String>,
    /// Radio address, e.g. "AA:BB:CC:DD:EE:FF"
    pub address: String,
    /// Raw class-of-device bitfield as reported by the radio
    pub class: u32,
    /// Whether the device is already bonded with this host
    pub bonded: bool,
}

impl Device {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.address)
    }

    /// Whether this device could plausibly be a receipt printer.
    ///
    /// The class-of-device field is unreliable across vendors, so the filter
    /// is permissive: only major classes that are definitely not printers
    /// (phones, computers, audio, wearables, toys, health) are dropped.
    /// Unclassified and imaging devices pass through.
    pub fn is_printer_candidate(&self) -> bool {
        let major = (self.class >> 8) & 0x1F;
        !matches!(major, 0x01 | 0x02 | 0x04 | 0x07 | 0x08 | 0x09)
    }
}

/// Current state of the printer connection, broadcast to subscribers on
/// every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    /// No connection and nothing in progress
    Idle,
    /// Radio is off; no operation can proceed
    PoweredOff,
    /// Power-on request issued, waiting for the radio to come up
    PoweringOn,
    /// A discovery scan is running
    Discovering,
    /// Pairing with a device
    Pairing { device: Device },
    /// Opening a connection
    Connecting { device: Device },
    /// Connected and ready to print
    Connected { device: Device },
    /// The last operation failed; terminal until the next operation
    Failed { reason: String },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected { .. })
    }
}
