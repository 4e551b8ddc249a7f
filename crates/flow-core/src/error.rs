//! Error types for the pure dashboard logic.
//!
//! Nothing here is fatal: every error degrades to "keep the previous
//! value" or "drop the input" at the call site.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    /// A filter bound that does not parse as a number (after suffix stripping).
    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    /// An expiration date in none of the accepted formats.
    #[error("invalid expiration date: {0:?}")]
    InvalidDate(String),
}
