//! Simulation configuration.

use serde::{Deserialize, Serialize};
use types::{Price, TraderId, TraderKind};

/// Population and endowments for one trader type.
///
/// Ranges are inclusive bounds in whole dollars/shares; each trader
/// samples its own endowment from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraderClassConfig {
    /// How many traders of this type to create.
    pub count: usize,
    /// Starting cash range (whole dollars).
    pub cash_range: (u64, u64),
    /// Starting inventory range (shares).
    pub shares_range: (u64, u64),
}

impl TraderClassConfig {
    pub fn new(count: usize, cash_range: (u64, u64), shares_range: (u64, u64)) -> Self {
        Self {
            count,
            cash_range,
            shares_range,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

/// Which traders get full reporting in `get_all_traders_data`.
///
/// Per type, the tracked head-count is `all_traders + <type count>`;
/// when that sum is zero the type falls back to its entries in
/// `explicit_ids`. When nothing at all is configured, the first 10
/// traders overall are tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TrackingConfig {
    /// Head-count applied to every trader type.
    pub all_traders: usize,
    /// Additional head-count for random traders.
    pub random: usize,
    /// Additional head-count for mean-reverting traders.
    pub mean_reverting: usize,
    /// Additional head-count for trend-following traders.
    pub trend_following: usize,
    /// Explicit ids, consulted for a type only when its combined
    /// head-count is zero.
    pub explicit_ids: Vec<TraderId>,
}

impl TrackingConfig {
    /// Combined head-count for one trader type.
    pub fn count_for(&self, kind: TraderKind) -> usize {
        let specific = match kind {
            TraderKind::Random => self.random,
            TraderKind::MeanReverting => self.mean_reverting,
            TraderKind::TrendFollowing => self.trend_following,
        };
        self.all_traders + specific
    }

    /// True when no tracking has been configured at all.
    pub fn is_unset(&self) -> bool {
        self.all_traders == 0
            && self.random == 0
            && self.mean_reverting == 0
            && self.trend_following == 0
            && self.explicit_ids.is_empty()
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Price the market opens at; also the mean reverters' target.
    pub initial_price: Price,
    /// Noise traders: liquidity and volatility.
    pub random: TraderClassConfig,
    /// Stabilizing force: fewer but well-capitalized.
    pub mean_reverting: TraderClassConfig,
    /// Momentum traders; disabled by default.
    pub trend_following: TraderClassConfig,
    /// Reporting selection.
    pub tracking: TrackingConfig,
    /// Master seed for reproducible runs; OS entropy when unset.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_price: Price::from_float(100.0),
            random: TraderClassConfig::new(1500, (10_000, 100_000), (0, 550)),
            mean_reverting: TraderClassConfig::new(500, (30_000, 300_000), (1350, 1950)),
            trend_following: TraderClassConfig::new(0, (10_000, 100_000), (0, 600)),
            tracking: TrackingConfig::default(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn with_initial_price(mut self, price: Price) -> Self {
        self.initial_price = price;
        self
    }

    /// Set the population counts for all three trader types.
    pub fn with_counts(mut self, random: usize, mean_reverting: usize, trend: usize) -> Self {
        self.random.count = random;
        self.mean_reverting.count = mean_reverting;
        self.trend_following.count = trend;
        self
    }

    pub fn with_tracking(mut self, tracking: TrackingConfig) -> Self {
        self.tracking = tracking;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Total number of traders across all types.
    pub fn total_traders(&self) -> usize {
        self.random.count + self.mean_reverting.count + self.trend_following.count
    }
}
