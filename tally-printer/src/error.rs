//! Error types for the connection and transport layer

use thiserror::Error;

/// Powering the radio on failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PowerError {
    #[error("Power-on request denied by the platform")]
    Denied,

    #[error("Radio did not power on within the expected window")]
    Timeout,
}

/// Starting a discovery scan failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error("Scan permission denied by the platform")]
    PermissionDenied,

    #[error("Radio is powered off")]
    AdapterOff,

    #[error("Another connection operation is in progress")]
    Busy,
}

/// Pairing with a device failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairError {
    #[error("Pairing rejected by the device")]
    Rejected,

    #[error("Pairing did not complete within the expected window")]
    Timeout,
}

/// Opening a connection failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("Invalid device address: {0}")]
    AddressInvalid(String),

    #[error("Radio is powered off")]
    AdapterOff,

    #[error("Another connection operation is in progress")]
    Busy,

    #[error("Connection I/O failure: {0}")]
    IoFailure(String),
}

/// Sending bytes to the connected device failed.
#[derive(Debug, Error)]
pub enum PrintError {
    #[error("No device is connected")]
    NotConnected,

    #[error("Print I/O failure: {0}")]
    IoFailure(#[from] std::io::Error),
}

pub type PrintResult<T> = Result<T, PrintError>;
