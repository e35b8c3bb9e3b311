//! Market context handed to strategies each step.

use types::Price;

/// What a trader sees when asked for an order: the current market
/// price and the top of book captured at step start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketView {
    /// Current market price (last trade, or the initial price).
    pub last_price: Price,
    /// Best bid at step start, if any.
    pub best_bid: Option<Price>,
    /// Best ask at step start, if any.
    pub best_ask: Option<Price>,
}

impl MarketView {
    pub fn new(last_price: Price, best_bid: Option<Price>, best_ask: Option<Price>) -> Self {
        Self {
            last_price,
            best_bid,
            best_ask,
        }
    }

    /// Current market price as a float.
    #[inline]
    pub fn last(&self) -> f64 {
        self.last_price.to_float()
    }

    /// Observed price for fair-value updates: the bid-ask midpoint when
    /// both sides are quoted, otherwise the current market price.
    pub fn mid_or_last(&self) -> f64 {
        match (self.best_bid, self.best_ask) {
            (Some(bid), Some(ask)) => crate::fair_value::mid(bid.to_float(), ask.to_float()),
            _ => self.last(),
        }
    }
}
