//! Radio adapter seam
//!
//! The connection manager drives everything through this trait so the same
//! state machine runs against the platform radio in production and against
//! an in-memory fake in tests. Implementations wrap whatever the host OS
//! exposes (a Bluetooth stack, a serial bridge) behind async calls.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::device::Device;
use crate::error::{ConnectError, DiscoveryError, PairError, PowerError};

/// Power state of the underlying radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerState {
    On,
    #[default]
    Off,
}

#[async_trait]
pub trait RadioAdapter: Send + Sync + 'static {
    /// Current radio power state.
    async fn power_state(&self) -> PowerState;

    /// Ask the platform to power the radio on. Returns once the request is
    /// accepted; the radio may still take time to come up.
    async fn request_power(&self) -> Result<(), PowerError>;

    /// Push channel of power-state changes, if the platform supports one.
    /// May only be taken once; callers fall back to polling when this
    /// returns `None`.
    fn power_events(&self) -> Option<mpsc::Receiver<PowerState>>;

    /// Devices already bonded with this host.
    async fn bonded_devices(&self) -> Vec<Device>;

    /// Start a discovery scan. Found devices arrive on the returned channel
    /// until `stop_discovery` is called or the scan window closes.
    async fn start_discovery(&self) -> Result<mpsc::Receiver<Device>, DiscoveryError>;

    /// Stop a running discovery scan. Idempotent.
    async fn stop_discovery(&self);

    /// Bond with a device.
    async fn pair(&self, address: &str) -> Result<(), PairError>;

    /// Open a data connection to a device.
    async fn open(&self, address: &str) -> Result<(), ConnectError>;

    /// Close the current data connection, if any. Idempotent.
    async fn close(&self) -> std::io::Result<()>;

    /// Write bytes to the open connection.
    async fn write(&self, bytes: &[u8]) -> std::io::Result<()>;
}
