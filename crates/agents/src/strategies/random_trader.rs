//! Random (noise) trader.
//!
//! Provides liquidity and volatility: occasionally wakes up, compares
//! the market price against its fair-value model, and leans toward
//! buying what looks cheap and selling what looks rich.

use crate::account::Account;
use crate::context::MarketView;
use crate::fair_value::FairValueModel;
use crate::strategies::{can_cover, clamp_limit_price};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use types::{Order, OrderSide, Price, Quantity, TraderId};

/// Price looks cheap below this ratio of price to fair value.
const CHEAP_RATIO: f64 = 0.95;
/// Price looks rich above this ratio.
const RICH_RATIO: f64 = 1.05;
/// Side bias applied when the price looks cheap or rich.
const BIASED_PROB: f64 = 0.7;

/// Configuration for [`RandomTrader`].
#[derive(Debug, Clone)]
pub struct RandomTraderConfig {
    /// Chance of placing an order on any given step.
    pub activation_prob: f64,
    /// Chance of a limit order (otherwise market).
    pub limit_order_prob: f64,
    /// Order sizes are uniform in `1..=max_order_size`.
    pub max_order_size: u64,
    /// Chance of a private smoothing fair-value model (otherwise mid).
    pub private_model_odds: f64,
    /// Alpha range for the private model.
    pub alpha_range: (f64, f64),
    /// Gaussian sigma on the initial private estimate.
    pub fair_value_jitter: f64,
    /// Per-trader limit-band width drawn from this range at creation.
    pub aggressiveness_range: (f64, f64),
}

impl Default for RandomTraderConfig {
    fn default() -> Self {
        Self {
            activation_prob: 0.1,
            limit_order_prob: 0.8,
            max_order_size: 50,
            private_model_odds: 0.5,
            alpha_range: (0.1, 0.5),
            fair_value_jitter: 2.0,
            aggressiveness_range: (0.1, 0.3),
        }
    }
}

/// Noise trader with a per-instance fair-value model and band width.
#[derive(Debug, Clone)]
pub struct RandomTrader {
    config: RandomTraderConfig,
    model: FairValueModel,
    /// How far from the current price this trader will quote.
    aggressiveness: f64,
    rng: StdRng,
}

impl RandomTrader {
    /// Create a trader with OS entropy, anchoring the fair-value model
    /// at the given initial price.
    pub fn new(config: RandomTraderConfig, initial_price: Price) -> Self {
        Self::from_rng(config, initial_price, StdRng::from_os_rng())
    }

    /// Create a trader with a fixed seed for reproducible tests.
    pub fn with_seed(config: RandomTraderConfig, initial_price: Price, seed: u64) -> Self {
        Self::from_rng(config, initial_price, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: RandomTraderConfig, initial_price: Price, mut rng: StdRng) -> Self {
        let model = FairValueModel::sample(
            &mut rng,
            config.private_model_odds,
            config.alpha_range,
            initial_price.to_float(),
            config.fair_value_jitter,
        );
        let aggressiveness =
            rng.random_range(config.aggressiveness_range.0..config.aggressiveness_range.1);
        Self {
            config,
            model,
            aggressiveness,
            rng,
        }
    }

    pub fn decide(
        &mut self,
        id: TraderId,
        account: &Account,
        view: &MarketView,
    ) -> Option<Order> {
        if !self.rng.random_bool(self.config.activation_prob) {
            return None;
        }

        let fair = self.model.current(view);
        let last = view.last();
        let ratio = if fair > 0.0 { last / fair } else { 1.0 };

        // Lean toward buying below fair value and selling above it.
        let buy_prob = if ratio < CHEAP_RATIO {
            BIASED_PROB
        } else if ratio > RICH_RATIO {
            1.0 - BIASED_PROB
        } else {
            0.5
        };
        let side = if self.rng.random_bool(buy_prob) {
            OrderSide::Buy
        } else {
            OrderSide::Sell
        };

        let quantity = Quantity(self.rng.random_range(1..=self.config.max_order_size));
        if !can_cover(account, side, view.last_price, quantity) {
            return None;
        }

        if self.rng.random_bool(self.config.limit_order_prob) {
            // Quote inside a band between the current price and the
            // fair-value estimate: bids below the market, asks above.
            let (lo, hi) = match side {
                OrderSide::Buy => (
                    last * (1.0 - self.aggressiveness),
                    (last * 0.999).min(fair * (1.0 + self.aggressiveness)),
                ),
                OrderSide::Sell => (
                    (last * 1.001).max(fair * (1.0 - self.aggressiveness)),
                    last * (1.0 + self.aggressiveness),
                ),
            };
            // Interpolated draw; the bounds may invert when the fair
            // value sits far from the current price.
            let price = lo + self.rng.random::<f64>() * (hi - lo);
            Some(Order::limit(id, side, clamp_limit_price(price), quantity))
        } else {
            Some(Order::market(id, side, quantity))
        }
    }
}
