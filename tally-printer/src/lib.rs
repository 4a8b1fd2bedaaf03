//! # tally-printer
//!
//! Connection management and transport encodings for receipt printers.
//!
//! ## Scope
//!
//! - [`ConnectionManager`]: the radio connection state machine (power,
//!   discovery, pairing, connect/disconnect), with broadcast state updates
//! - [`RadioAdapter`]: the seam a host platform implements to expose its
//!   radio stack
//! - [`TransportEncoder`]: ESC/POS device bytes and on-screen preview text
//!   from the same rendered document
//!
//! ## Example
//!
//! ```ignore
//! use tally_printer::{ConnectionManager, ManagerConfig, TransportEncoder};
//!
//! let mgr = ConnectionManager::new(adapter, ManagerConfig::default()).await;
//! let mut devices = mgr.discover().await?;
//! while let Some(dev) = devices.next().await {
//!     // show the device in a picker
//! }
//! mgr.connect(&chosen).await?;
//!
//! let enc = TransportEncoder::new(profile);
//! mgr.transmit(&enc.encode_for_device(&doc)).await?;
//! ```

pub mod adapter;
pub mod device;
pub mod error;
pub mod manager;
pub mod transport;

// Re-exports
pub use adapter::{PowerState, RadioAdapter};
pub use device::{ConnectionState, Device};
pub use error::{
    ConnectError, DiscoveryError, PairError, PowerError, PrintError, PrintResult,
};
pub use manager::{ConnectionManager, ManagerConfig};
pub use transport::TransportEncoder;
