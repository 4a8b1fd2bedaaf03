//! Error types for the core crate

use thiserror::Error;

/// Tax computation error.
///
/// The current engine is total: it never fails, even on negative or zero
/// quantities, which it propagates arithmetically. The type exists so the
/// `compute` signature can grow validation without breaking callers.
#[derive(Debug, Error)]
pub enum TaxComputeError {}

/// Result type for tax computation
pub type TaxResult<T> = Result<T, TaxComputeError>;
