//! Trade types.

use crate::ids::{Tick, TradeId, TraderId};
use crate::money::{Cash, Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A completed trade between two traders.
///
/// The price is always the resting order's limit price, rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Unique trade identifier (monotonic, survives log eviction).
    pub id: TradeId,
    /// Execution price.
    pub price: Price,
    /// Number of shares traded.
    pub quantity: Quantity,
    /// Trader who bought.
    pub buyer_id: TraderId,
    /// Trader who sold.
    pub seller_id: TraderId,
    /// Step at which the trade occurred.
    pub tick: Tick,
}

impl Trade {
    /// Calculate the total value of this trade.
    pub fn value(&self) -> Cash {
        self.price * self.quantity
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trade[{}]: {} shares @ {} (buyer: {}, seller: {})",
            self.id.0, self.quantity, self.price, self.buyer_id, self.seller_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::TraderKind;

    #[test]
    fn trade_value() {
        let trade = Trade {
            id: TradeId(1),
            price: Price::from_float(100.0),
            quantity: Quantity(50),
            buyer_id: TraderId::new(TraderKind::Random, 0),
            seller_id: TraderId::new(TraderKind::MeanReverting, 1),
            tick: 0,
        };
        assert_eq!(trade.value().to_float(), 5000.0);
    }
}
