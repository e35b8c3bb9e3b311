//! Order book snapshot types.

use crate::money::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// A single resting order as reported in a book snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookEntry {
    /// Resting limit price.
    pub price: Price,
    /// Unfilled quantity.
    pub quantity: Quantity,
}

/// Snapshot of the top of the order book.
///
/// Entries are individual resting orders in priority order, not
/// aggregated levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BookSnapshot {
    /// Bid orders, best (highest price) first.
    pub bids: Vec<BookEntry>,
    /// Ask orders, best (lowest price) first.
    pub asks: Vec<BookEntry>,
}

impl BookSnapshot {
    /// Get the best bid price.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.first().map(|e| e.price)
    }

    /// Get the best ask price.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.first().map(|e| e.price)
    }
}
