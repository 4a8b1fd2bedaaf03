//! # tally-core
//!
//! Pure business logic for the receipt-printing subsystem - no I/O.
//!
//! ## Scope
//!
//! This crate handles WHAT gets printed:
//! - Tax aggregation (per-rate buckets, round-off reconciliation)
//! - Fixed-width receipt/report layout for 58mm and 80mm paper
//! - The styled document model shared by device and preview output
//! - The settings-store seam for host persistence
//!
//! HOW it gets printed (device connection, ESC/POS bytes, preview markup)
//! lives in `tally-printer`.
//!
//! ## Example
//!
//! ```ignore
//! use tally_core::{ReceiptEncoder, profile::PROFILE_58MM, tax};
//!
//! let summary = tax::compute(&sale.lines, &rates)?;
//! let doc = ReceiptEncoder::new(PROFILE_58MM).encode(&sale, &summary);
//! // hand `doc` to tally-printer for device bytes or an on-screen preview
//! ```

pub mod document;
pub mod error;
pub mod layout;
pub mod model;
pub mod profile;
pub mod receipt;
pub mod report;
pub mod settings;
pub mod tax;

// Re-exports
pub use document::{Align, DocumentBuilder, FontVariant, RenderedDocument, Segment};
pub use error::{TaxComputeError, TaxResult};
pub use model::{LineItem, PaymentMode, Sale, SalesReport, StoreIdentity, TaxRate};
pub use profile::{PROFILE_58MM, PROFILE_80MM, PaperProfile, PaperWidth};
pub use receipt::ReceiptEncoder;
pub use report::ReportEncoder;
pub use settings::{MemorySettings, SettingsStore};
pub use tax::{TaxBucket, TaxSummary};
