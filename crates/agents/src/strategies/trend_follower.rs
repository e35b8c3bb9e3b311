//! Trend-following trader.
//!
//! Evaluates every step: when the price has moved more than a threshold
//! fraction since the last observation, it chases the move with an
//! aggressively priced limit order. The previous-price anchor is
//! updated on every call, including abstentions.

use crate::account::Account;
use crate::context::MarketView;
use crate::strategies::clamp_limit_price;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use types::{Order, OrderSide, Quantity, TraderId};

/// Configuration for [`TrendFollower`].
#[derive(Debug, Clone)]
pub struct TrendFollowerConfig {
    /// Fractional price move that counts as a trend.
    pub trend_threshold: f64,
    /// Order sizes are uniform in `1..=max_order_size`, capped by what
    /// the account can cover.
    pub max_order_size: u64,
}

impl Default for TrendFollowerConfig {
    fn default() -> Self {
        Self {
            trend_threshold: 0.02,
            max_order_size: 20,
        }
    }
}

/// Momentum trader chasing recent price moves.
#[derive(Debug, Clone)]
pub struct TrendFollower {
    config: TrendFollowerConfig,
    /// Price seen on the previous call; `None` until first observed.
    previous_price: Option<f64>,
    rng: StdRng,
}

impl TrendFollower {
    /// Create a trader with OS entropy.
    pub fn new(config: TrendFollowerConfig) -> Self {
        Self::from_rng(config, StdRng::from_os_rng())
    }

    /// Create a trader with a fixed seed for reproducible tests.
    pub fn with_seed(config: TrendFollowerConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: TrendFollowerConfig, rng: StdRng) -> Self {
        Self {
            config,
            previous_price: None,
            rng,
        }
    }

    pub fn decide(
        &mut self,
        id: TraderId,
        account: &Account,
        view: &MarketView,
    ) -> Option<Order> {
        let last = view.last();
        // Anchor moves forward unconditionally.
        let prev = self.previous_price.replace(last)?;
        if prev <= 0.0 {
            return None;
        }

        let change = (last - prev) / prev;
        if change.abs() < self.config.trend_threshold {
            return None;
        }

        let side = if change > 0.0 {
            OrderSide::Buy
        } else {
            OrderSide::Sell
        };
        let cap = match side {
            OrderSide::Buy => account.cash.affordable_at(view.last_price),
            OrderSide::Sell => Quantity(account.shares.max(0) as u64),
        };
        let quantity = Quantity(self.rng.random_range(1..=self.config.max_order_size)).min(cap);
        if quantity.is_zero() {
            return None;
        }

        // Priced 0.1% through the market so it executes.
        let price = match side {
            OrderSide::Buy => last * 1.001,
            OrderSide::Sell => last * 0.999,
        };
        Some(Order::limit(id, side, clamp_limit_price(price), quantity))
    }
}
