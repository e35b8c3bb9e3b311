//! Order types.

use crate::ids::{OrderId, Tick, TraderId};
use crate::money::{Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the market the order is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Returns the opposite side.
    pub fn opposite(self) -> Self {
        match self {
            OrderSide::Buy => OrderSide::Sell,
            OrderSide::Sell => OrderSide::Buy,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

/// Type of order determining execution rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderKind {
    /// Execute immediately against the best available levels; any
    /// unfilled remainder is discarded, never rested.
    Market,
    /// Execute at the specified price or better; the remainder rests.
    Limit { price: Price },
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderKind::Market => write!(f, "MARKET"),
            OrderKind::Limit { price } => write!(f, "LIMIT@{}", price),
        }
    }
}

/// A trading order submitted by a trader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier (assigned at submission, 0 as placeholder).
    pub id: OrderId,
    /// Trader who submitted the order.
    pub trader_id: TraderId,
    /// Buy or Sell.
    pub side: OrderSide,
    /// Market or Limit order.
    pub kind: OrderKind,
    /// Unfilled shares; mutated downward as the order fills.
    pub quantity: Quantity,
    /// Step at which the order was submitted.
    pub tick: Tick,
}

impl Order {
    /// Create a new limit order.
    pub fn limit(trader_id: TraderId, side: OrderSide, price: Price, quantity: Quantity) -> Self {
        Self {
            id: OrderId(0),
            trader_id,
            side,
            kind: OrderKind::Limit { price },
            quantity,
            tick: 0,
        }
    }

    /// Create a new market order.
    pub fn market(trader_id: TraderId, side: OrderSide, quantity: Quantity) -> Self {
        Self {
            id: OrderId(0),
            trader_id,
            side,
            kind: OrderKind::Market,
            quantity,
            tick: 0,
        }
    }

    /// Get the limit price if this is a limit order.
    pub fn limit_price(&self) -> Option<Price> {
        match self.kind {
            OrderKind::Limit { price } => Some(price),
            OrderKind::Market => None,
        }
    }

    /// Check if order is fully filled.
    pub fn is_filled(&self) -> bool {
        self.quantity.is_zero()
    }

    /// Check if order is a buy order.
    pub fn is_buy(&self) -> bool {
        self.side == OrderSide::Buy
    }

    /// Check if order is a sell order.
    pub fn is_sell(&self) -> bool {
        self.side == OrderSide::Sell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::TraderKind;

    #[test]
    fn limit_order_creation() {
        let order = Order::limit(
            TraderId::new(TraderKind::Random, 1),
            OrderSide::Buy,
            Price::from_float(99.5),
            Quantity(25),
        );
        assert_eq!(order.limit_price(), Some(Price::from_float(99.5)));
        assert_eq!(order.quantity, 25);
        assert!(order.is_buy());
        assert!(!order.is_filled());
    }

    #[test]
    fn market_order_has_no_price() {
        let order = Order::market(
            TraderId::new(TraderKind::Random, 2),
            OrderSide::Sell,
            Quantity(10),
        );
        assert_eq!(order.limit_price(), None);
        assert!(order.is_sell());
    }
}
