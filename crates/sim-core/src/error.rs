//! Error types for the matching core.

use std::fmt;
use types::Price;

/// Errors that can occur in matching operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimCoreError {
    /// Order has zero quantity.
    ZeroQuantity,
    /// Limit price is zero or negative.
    InvalidPrice(Price),
}

impl fmt::Display for SimCoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimCoreError::ZeroQuantity => write!(f, "Order has zero quantity"),
            SimCoreError::InvalidPrice(price) => {
                write!(f, "Invalid limit price: {}", price)
            }
        }
    }
}

impl std::error::Error for SimCoreError {}

/// Result type for matching operations.
pub type Result<T> = std::result::Result<T, SimCoreError>;
