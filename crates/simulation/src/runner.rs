//! The market simulation orchestrator.

use crate::config::SimulationConfig;
use crate::scheduler::EventScheduler;
use crate::snapshot::{MarketData, OpenOrder, TraderData};
use agents::{
    Account, MarketView, MeanRevertingConfig, MeanRevertingTrader, RandomTrader,
    RandomTraderConfig, Strategy, TrendFollower, TrendFollowerConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sim_core::OrderBook;
use std::collections::{BTreeSet, HashMap, VecDeque};
use tracing::{debug, info, warn};
use types::{Cash, OrderId, Price, Tick, Trade, TraderId, TraderKind};

/// Capacity of the bounded price and volume histories.
pub const HISTORY_CAPACITY: usize = 1000;

/// Number of traders tracked when no tracking is configured.
const DEFAULT_TRACKED: usize = 10;

/// Timed simulation events. No kinds are scheduled yet; the variant
/// space is the extension point for price shocks and similar.
#[derive(Debug, Clone)]
pub enum SimEvent {}

/// One trader: identity, holdings, and decision model.
struct TraderSlot {
    id: TraderId,
    account: Account,
    strategy: Strategy,
}

/// The whole market: order book, trader population, histories, clock.
///
/// Synchronous core; concurrency lives in
/// [`SimulationHandle`](crate::bridge::SimulationHandle).
pub struct MarketSimulation {
    config: SimulationConfig,
    current_price: Price,
    book: OrderBook,
    scheduler: EventScheduler<SimEvent>,
    traders: Vec<TraderSlot>,
    index: HashMap<TraderId, usize>,
    /// Sorted ids of traders with full reporting.
    tracked: Vec<TraderId>,
    /// Step-close prices, seeded with the initial price.
    price_history: VecDeque<Price>,
    /// Per-step traded volume, seeded with zero.
    volume_history: VecDeque<u64>,
    next_order_id: u64,
}

impl MarketSimulation {
    pub fn new(config: SimulationConfig) -> Self {
        let mut master = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let initial_price = config.initial_price;
        let mut traders = Vec::with_capacity(config.total_traders());
        for kind in TraderKind::ALL {
            let class = match kind {
                TraderKind::Random => &config.random,
                TraderKind::MeanReverting => &config.mean_reverting,
                TraderKind::TrendFollowing => &config.trend_following,
            };
            for i in 0..class.count {
                let id = TraderId::new(kind, i as u32);
                let cash =
                    Cash::from_float(master.random_range(class.cash_range.0..=class.cash_range.1)
                        as f64);
                let shares =
                    master.random_range(class.shares_range.0..=class.shares_range.1) as i64;
                let strategy = match kind {
                    TraderKind::Random => Strategy::Random(RandomTrader::with_seed(
                        RandomTraderConfig::default(),
                        initial_price,
                        master.random(),
                    )),
                    TraderKind::MeanReverting => {
                        Strategy::MeanReverting(MeanRevertingTrader::with_seed(
                            MeanRevertingConfig::default(),
                            initial_price,
                            master.random(),
                        ))
                    }
                    TraderKind::TrendFollowing => Strategy::TrendFollowing(
                        TrendFollower::with_seed(TrendFollowerConfig::default(), master.random()),
                    ),
                };
                traders.push(TraderSlot {
                    id,
                    account: Account::new(cash, shares, initial_price),
                    strategy,
                });
            }
        }

        let index = traders
            .iter()
            .enumerate()
            .map(|(i, slot)| (slot.id, i))
            .collect();
        let tracked = determine_tracked(&traders, &config);

        info!(
            traders = traders.len(),
            tracked = tracked.len(),
            price = %initial_price,
            "market initialized"
        );

        Self {
            config,
            current_price: initial_price,
            book: OrderBook::new(),
            scheduler: EventScheduler::new(),
            traders,
            index,
            tracked,
            price_history: VecDeque::from([initial_price]),
            volume_history: VecDeque::from([0]),
            next_order_id: 0,
        }
    }

    /// Run one simulation step; returns the trades it produced.
    ///
    /// The top of book is captured once at step start and shown to
    /// every trader; the current price moves live as trades execute.
    pub fn step(&mut self) -> Vec<Trade> {
        let tick = self.scheduler.now();
        let best_bid = self.book.best_bid();
        let best_ask = self.book.best_ask();

        let mut step_volume = 0u64;
        let mut step_trades = Vec::new();

        for i in 0..self.traders.len() {
            let view = MarketView::new(self.current_price, best_bid, best_ask);
            let decision = {
                let slot = &mut self.traders[i];
                slot.strategy.decide(slot.id, &slot.account, &view)
            };
            let Some(mut order) = decision else { continue };

            self.next_order_id += 1;
            order.id = OrderId(self.next_order_id);
            order.tick = tick;
            self.traders[i].account.record_order();

            let trades = match self.book.add_order(order) {
                Ok(trades) => trades,
                Err(e) => {
                    warn!(trader = %self.traders[i].id, error = %e, "order rejected");
                    continue;
                }
            };
            for trade in trades {
                self.current_price = trade.price;
                step_volume += trade.quantity.raw();
                self.settle(&trade);
                step_trades.push(trade);
            }
        }

        push_bounded(&mut self.price_history, self.current_price);
        push_bounded(&mut self.volume_history, step_volume);
        for event in self.scheduler.drain_due() {
            match event {}
        }
        self.scheduler.advance();

        if !step_trades.is_empty() {
            debug!(
                tick,
                trades = step_trades.len(),
                volume = step_volume,
                price = %self.current_price,
                "step complete"
            );
        }
        step_trades
    }

    /// Apply a trade to both parties. Each side settles independently:
    /// a trade naming an unknown trader still applies to the known side.
    fn settle(&mut self, trade: &Trade) {
        if let Some(&i) = self.index.get(&trade.buyer_id) {
            self.traders[i].account.apply_buy(trade);
        }
        if let Some(&i) = self.index.get(&trade.seller_id) {
            self.traders[i].account.apply_sell(trade);
        }
    }

    /// Market-level snapshot for reporting.
    pub fn get_market_data(&self) -> MarketData {
        let (change, change_percent) = if self.price_history.len() > 1 {
            let previous = self.price_history[self.price_history.len() - 2];
            let change = (self.current_price - previous).round_to_cents();
            let percent = if previous.is_positive() {
                let raw = change.to_float() / previous.to_float() * 100.0;
                (raw * 100.0).round() / 100.0
            } else {
                0.0
            };
            (change, percent)
        } else {
            (Price::ZERO, 0.0)
        };

        MarketData {
            current_price: self.current_price,
            change,
            change_percent,
            volume: self.volume_history.back().copied().unwrap_or(0),
            best_bid: self.book.best_bid(),
            best_ask: self.book.best_ask(),
            spread: self.book.spread(),
            price_history: self.price_history.iter().copied().collect(),
            order_book: self.book.snapshot(),
            recent_trades: self.book.recent_trades(10),
        }
    }

    /// Per-trader snapshots for the tracked traders, sorted by id.
    pub fn get_all_traders_data(&self) -> Vec<TraderData> {
        self.tracked
            .iter()
            .filter_map(|id| self.index.get(id))
            .map(|&i| {
                let slot = &self.traders[i];
                let account = &slot.account;
                let open_orders = self
                    .book
                    .orders_for(slot.id)
                    .into_iter()
                    .filter_map(|o| {
                        Some(OpenOrder {
                            side: o.side,
                            price: o.limit_price()?,
                            quantity: o.quantity,
                        })
                    })
                    .collect();
                TraderData {
                    id: slot.id,
                    cash: account.cash,
                    shares: account.shares,
                    portfolio_value: account.portfolio_value(self.current_price),
                    pnl: account.pnl(self.current_price),
                    pnl_percent: account.pnl_percent(self.current_price),
                    orders_placed: account.orders_placed,
                    total_volume: account.total_volume,
                    trade_history: account.trade_history().iter().cloned().collect(),
                    open_orders,
                }
            })
            .collect()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn current_price(&self) -> Price {
        self.current_price
    }

    /// Completed steps so far.
    pub fn tick(&self) -> Tick {
        self.scheduler.now()
    }

    pub fn trader_count(&self) -> usize {
        self.traders.len()
    }

    pub fn tracked_ids(&self) -> &[TraderId] {
        &self.tracked
    }

    /// Trades executed since construction.
    pub fn total_trades(&self) -> u64 {
        self.book.total_trades()
    }

    /// Sum of all trader cash and shares, for conservation checks.
    pub fn aggregate_holdings(&self) -> (Cash, i64) {
        self.traders.iter().fold(
            (Cash::ZERO, 0i64),
            |(cash, shares), slot| (cash + slot.account.cash, shares + slot.account.shares),
        )
    }
}

fn push_bounded<T>(history: &mut VecDeque<T>, value: T) {
    if history.len() == HISTORY_CAPACITY {
        history.pop_front();
    }
    history.push_back(value);
}

/// Resolve which traders get full reporting.
fn determine_tracked(traders: &[TraderSlot], config: &SimulationConfig) -> Vec<TraderId> {
    let mut tracked = BTreeSet::new();
    let tracking = &config.tracking;

    if tracking.is_unset() {
        for slot in traders.iter().take(DEFAULT_TRACKED) {
            tracked.insert(slot.id);
        }
        return tracked.into_iter().collect();
    }

    for kind in TraderKind::ALL {
        let count = tracking.count_for(kind);
        if count > 0 {
            // Head-count wins over explicit ids for this type.
            for slot in traders.iter().filter(|s| s.id.kind == kind).take(count) {
                tracked.insert(slot.id);
            }
        } else {
            for &id in &tracking.explicit_ids {
                if id.kind == kind && traders.iter().any(|s| s.id == id) {
                    tracked.insert(id);
                }
            }
        }
    }
    tracked.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackingConfig;

    fn quiet_config() -> SimulationConfig {
        SimulationConfig::default()
            .with_counts(12, 6, 3)
            .with_seed(1)
    }

    #[test]
    fn population_is_built_in_fixed_order() {
        let sim = MarketSimulation::new(quiet_config());
        assert_eq!(sim.trader_count(), 21);
        assert_eq!(sim.traders[0].id.to_string(), "rt_0");
        assert_eq!(sim.traders[11].id.to_string(), "rt_11");
        assert_eq!(sim.traders[12].id.to_string(), "mrt_0");
        assert_eq!(sim.traders[18].id.to_string(), "tft_0");
    }

    #[test]
    fn endowments_fall_in_configured_ranges() {
        let sim = MarketSimulation::new(quiet_config());
        for slot in &sim.traders {
            let class = match slot.id.kind {
                TraderKind::Random => &sim.config.random,
                TraderKind::MeanReverting => &sim.config.mean_reverting,
                TraderKind::TrendFollowing => &sim.config.trend_following,
            };
            let cash = slot.account.cash.to_float();
            assert!(cash >= class.cash_range.0 as f64 && cash <= class.cash_range.1 as f64);
            let shares = slot.account.shares;
            assert!(
                shares >= class.shares_range.0 as i64 && shares <= class.shares_range.1 as i64
            );
        }
    }

    #[test]
    fn default_tracking_takes_first_ten_overall() {
        let sim = MarketSimulation::new(quiet_config());
        let tracked = sim.tracked_ids();
        assert_eq!(tracked.len(), 10);
        assert!(tracked.iter().all(|id| id.kind == TraderKind::Random));
    }

    #[test]
    fn tracking_counts_are_additive_per_type() {
        let config = quiet_config().with_tracking(TrackingConfig {
            all_traders: 2,
            mean_reverting: 1,
            ..TrackingConfig::default()
        });
        let sim = MarketSimulation::new(config);
        let tracked: Vec<String> = sim.tracked_ids().iter().map(|id| id.to_string()).collect();
        assert_eq!(
            tracked,
            vec!["rt_0", "rt_1", "mrt_0", "mrt_1", "mrt_2", "tft_0", "tft_1"]
        );
    }

    #[test]
    fn explicit_ids_used_when_type_count_is_zero() {
        let config = quiet_config().with_tracking(TrackingConfig {
            random: 1,
            explicit_ids: vec![
                "mrt_3".parse().expect("valid id"),
                "mrt_5".parse().expect("valid id"),
                // Unknown ids are ignored.
                "tft_99".parse().expect("valid id"),
            ],
            ..TrackingConfig::default()
        });
        let sim = MarketSimulation::new(config);
        let tracked: Vec<String> = sim.tracked_ids().iter().map(|id| id.to_string()).collect();
        assert_eq!(tracked, vec!["rt_0", "mrt_3", "mrt_5"]);
    }

    #[test]
    fn histories_are_seeded_and_bounded() {
        let mut sim = MarketSimulation::new(SimulationConfig::default().with_counts(0, 0, 0));
        assert_eq!(sim.price_history.len(), 1);
        assert_eq!(sim.volume_history.front(), Some(&0));

        for _ in 0..(HISTORY_CAPACITY + 50) {
            sim.step();
        }
        assert_eq!(sim.price_history.len(), HISTORY_CAPACITY);
        assert_eq!(sim.volume_history.len(), HISTORY_CAPACITY);
        assert_eq!(sim.tick(), (HISTORY_CAPACITY + 50) as u64);
    }

    #[test]
    fn settlement_applies_to_known_side_when_counterparty_is_missing() {
        use types::{Quantity, TradeId};

        let mut sim = MarketSimulation::new(quiet_config());
        let buyer: TraderId = "rt_0".parse().expect("valid id");
        let stranger: TraderId = "mrt_99".parse().expect("valid id");
        let before = sim.traders[0].account.clone();

        let trade = Trade {
            id: TradeId(1),
            price: Price::from_float(100.0),
            quantity: Quantity(5),
            buyer_id: buyer,
            seller_id: stranger,
            tick: 0,
        };
        sim.settle(&trade);

        // The known buyer settles in full; the unknown seller is skipped.
        let after = &sim.traders[0].account;
        assert_eq!(after.cash, before.cash - trade.value());
        assert_eq!(after.shares, before.shares + 5);

        let reversed = Trade {
            id: TradeId(2),
            buyer_id: stranger,
            seller_id: buyer,
            ..trade
        };
        sim.settle(&reversed);
        let after = &sim.traders[0].account;
        assert_eq!(after.cash, before.cash);
        assert_eq!(after.shares, before.shares);
    }

    #[test]
    fn market_data_reports_no_change_on_first_look() {
        let sim = MarketSimulation::new(quiet_config());
        let data = sim.get_market_data();
        assert_eq!(data.current_price, Price::from_float(100.0));
        assert_eq!(data.change, Price::ZERO);
        assert_eq!(data.change_percent, 0.0);
        assert_eq!(data.volume, 0);
        assert_eq!(data.price_history.len(), 1);
    }
}
