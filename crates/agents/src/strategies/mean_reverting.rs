//! Mean-reverting trader.
//!
//! Acts as a stabilizing force: sells when the price runs above its
//! target, buys when it falls below, and prices orders off its private
//! fair-value estimate so fills stay close to fundamentals.

use crate::account::Account;
use crate::context::MarketView;
use crate::fair_value::{smoothed, FairValueModel};
use crate::strategies::{can_cover, clamp_limit_price};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use types::{Order, OrderSide, Price, Quantity, TraderId};

/// Configuration for [`MeanRevertingTrader`].
#[derive(Debug, Clone)]
pub struct MeanRevertingConfig {
    /// Chance of evaluating the market on any given step.
    pub activation_prob: f64,
    /// Smoothing alpha range; mean reverters learn conservatively.
    pub alpha_range: (f64, f64),
    /// Deviation from target (as a fraction) that triggers action.
    pub reversion_strength_range: (f64, f64),
    /// Order sizes are uniform in `1..=max_order_size`.
    pub max_order_size: u64,
    /// Gaussian sigma on the initial private estimate.
    pub fair_value_jitter: f64,
}

impl Default for MeanRevertingConfig {
    fn default() -> Self {
        Self {
            activation_prob: 0.05,
            alpha_range: (0.05, 0.3),
            reversion_strength_range: (0.015, 0.03),
            max_order_size: 20,
            fair_value_jitter: 1.0,
        }
    }
}

/// Trader that pushes the price back toward a fixed target.
#[derive(Debug, Clone)]
pub struct MeanRevertingTrader {
    config: MeanRevertingConfig,
    /// Smoothing factor for the private estimate.
    alpha: f64,
    /// Private fair-value estimate used for execution pricing.
    estimate: f64,
    /// The anchor the trader reverts the market toward.
    target: f64,
    /// Fractional deviation from target that triggers an order.
    reversion_strength: f64,
    rng: StdRng,
}

impl MeanRevertingTrader {
    /// Create a trader targeting the given price, with OS entropy.
    pub fn new(config: MeanRevertingConfig, target_price: Price) -> Self {
        Self::from_rng(config, target_price, StdRng::from_os_rng())
    }

    /// Create a trader with a fixed seed for reproducible tests.
    pub fn with_seed(config: MeanRevertingConfig, target_price: Price, seed: u64) -> Self {
        Self::from_rng(config, target_price, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: MeanRevertingConfig, target_price: Price, mut rng: StdRng) -> Self {
        let target = target_price.to_float();
        let alpha = rng.random_range(config.alpha_range.0..config.alpha_range.1);
        let jitter: f64 = rng.sample(StandardNormal);
        let estimate = target + jitter * config.fair_value_jitter;
        let reversion_strength = rng
            .random_range(config.reversion_strength_range.0..config.reversion_strength_range.1);
        Self {
            config,
            alpha,
            estimate,
            target,
            reversion_strength,
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

        // Refresh the private estimate from the observed market.
        self.estimate = smoothed(self.estimate, view.mid_or_last(), self.alpha);
        let last = view.last();

        // Compare against the fixed target; execution prices use the
        // updated estimate instead.
        let side = if last > self.target * (1.0 + self.reversion_strength) {
            OrderSide::Sell
        } else if last < self.target * (1.0 - self.reversion_strength) {
            OrderSide::Buy
        } else {
            return None;
        };

        let quantity = Quantity(self.rng.random_range(1..=self.config.max_order_size));
        if !can_cover(account, side, view.last_price, quantity) {
            return None;
        }

        let price = match side {
            // Pay up to the estimate, slightly aggressive.
            OrderSide::Buy => (self.estimate * 1.002).min(last * 1.001),
            // Sell down to the estimate, slightly aggressive.
            OrderSide::Sell => (self.estimate * 0.998).max(last * 0.999),
        };
        Some(Order::limit(id, side, clamp_limit_price(price), quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Cash, TraderKind};

    fn rich_account() -> Account {
        Account::new(Cash::from_float(1_000_000.0), 10_000, Price::from_float(100.0))
    }

    fn view(last: f64) -> MarketView {
        MarketView::new(Price::from_float(last), None, None)
    }

    fn tid() -> TraderId {
        TraderId::new(TraderKind::MeanReverting, 0)
    }

    fn trader(seed: u64) -> MeanRevertingTrader {
        MeanRevertingTrader::with_seed(
            MeanRevertingConfig::default(),
            Price::from_float(100.0),
            seed,
        )
    }

    #[test]
    fn abstains_inside_the_reversion_band() {
        let mut t = trader(1);
        let account = rich_account();
        // At the target there is never a strong opinion.
        for _ in 0..1_000 {
            assert!(t.decide(tid(), &account, &view(100.0)).is_none());
        }
    }

    #[test]
    fn sells_above_target_buys_below() {
        let account = rich_account();

        let mut t = trader(2);
        let mut saw_sell = false;
        for _ in 0..1_000 {
            if let Some(order) = t.decide(tid(), &account, &view(110.0)) {
                assert_eq!(order.side, OrderSide::Sell);
                assert!((1..=20).contains(&order.quantity.raw()));
                saw_sell = true;
            }
        }
        assert!(saw_sell);

        let mut t = trader(3);
        let mut saw_buy = false;
        for _ in 0..1_000 {
            if let Some(order) = t.decide(tid(), &account, &view(90.0)) {
                assert_eq!(order.side, OrderSide::Buy);
                saw_buy = true;
            }
        }
        assert!(saw_buy);
    }

    #[test]
    fn buy_price_never_chases_far_above_market() {
        let mut t = trader(4);
        let account = rich_account();
        for _ in 0..2_000 {
            if let Some(order) = t.decide(tid(), &account, &view(90.0)) {
                let price = order.limit_price().expect("mean reverter only posts limits");
                // Capped at 0.1% through the current price.
                assert!(price <= Price::from_float_cents(90.0 * 1.001));
                assert!(price >= Price::TICK);
            }
        }
    }
}
