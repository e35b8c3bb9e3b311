//! End-to-end behavior of the assembled market.

use parking_lot::Mutex;
use simulation::{
    Broadcaster, MarketSimulation, NullBroadcaster, SimulationConfig, SimulationHandle,
};
use std::sync::Arc;
use std::time::Duration;
use types::Price;

fn active_config(seed: u64) -> SimulationConfig {
    // Small but busy population so trades happen within a few steps.
    SimulationConfig::default().with_counts(200, 60, 10).with_seed(seed)
}

#[test]
fn market_trades_and_stays_coherent() {
    let mut sim = MarketSimulation::new(active_config(11));

    for _ in 0..300 {
        sim.step();
        let data = sim.get_market_data();

        // Price floor: trader-generated prices never go below one cent.
        assert!(data.current_price >= Price::TICK);
        // A crossed book cannot survive matching.
        if let (Some(bid), Some(ask)) = (data.best_bid, data.best_ask) {
            assert!(bid < ask, "crossed book: {bid:?} >= {ask:?}");
            assert_eq!(data.spread, Some((ask - bid).round_to_cents()));
        }
        assert!(data.order_book.bids.len() <= 10);
        assert!(data.order_book.asks.len() <= 10);
        assert!(data.recent_trades.len() <= 10);
    }

    assert!(sim.total_trades() > 0, "no trades in 300 busy steps");
}

#[test]
fn cash_and_shares_are_conserved() {
    let mut sim = MarketSimulation::new(active_config(12));
    let (cash_before, shares_before) = sim.aggregate_holdings();

    for _ in 0..200 {
        sim.step();
    }
    assert!(sim.total_trades() > 0);

    // Every trade moves value between two known accounts; totals hold.
    let (cash_after, shares_after) = sim.aggregate_holdings();
    assert_eq!(cash_before, cash_after);
    assert_eq!(shares_before, shares_after);
}

#[test]
fn seeded_runs_are_reproducible() {
    let mut a = MarketSimulation::new(active_config(42));
    let mut b = MarketSimulation::new(active_config(42));

    for _ in 0..100 {
        a.step();
        b.step();
    }

    assert_eq!(a.current_price(), b.current_price());
    assert_eq!(a.total_trades(), b.total_trades());
    assert_eq!(a.get_market_data(), b.get_market_data());
}

#[test]
fn tracked_reports_carry_full_detail() {
    let mut sim = MarketSimulation::new(active_config(13));
    for _ in 0..200 {
        sim.step();
    }

    let reports = sim.get_all_traders_data();
    assert_eq!(reports.len(), 10); // default tracking

    let price = sim.current_price();
    for report in &reports {
        assert_eq!(
            report.portfolio_value,
            report.cash + types::Cash(report.shares * price.raw())
        );
        assert!(!report.pnl_percent.is_nan());
        assert!(report.trade_history.len() <= 100);
        for open in &report.open_orders {
            assert!(open.price >= Price::TICK);
            assert!(!open.quantity.is_zero());
        }
    }

    // Reports come back sorted by id.
    let ids: Vec<_> = reports.iter().map(|r| r.id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[test]
fn reset_returns_the_market_to_its_initial_state() {
    let mut handle = SimulationHandle::new(active_config(14), Arc::new(NullBroadcaster));
    for _ in 0..50 {
        handle.step();
    }
    assert!(handle.market_data().price_history.len() > 1);

    handle.reset();

    let data = handle.market_data();
    assert_eq!(data.current_price, Price::from_float(100.0));
    assert_eq!(data.change, Price::ZERO);
    assert_eq!(data.change_percent, 0.0);
    assert_eq!(data.volume, 0);
    assert_eq!(data.price_history.len(), 1);
    assert!(data.order_book.bids.is_empty());
    assert!(data.order_book.asks.is_empty());
    assert!(data.recent_trades.is_empty());
}

/// Test transport capturing event names.
#[derive(Default)]
struct CollectingBroadcaster {
    events: Mutex<Vec<String>>,
}

impl Broadcaster for CollectingBroadcaster {
    fn publish(&self, event: &str, _payload: serde_json::Value) {
        self.events.lock().push(event.to_string());
    }
}

#[test]
fn live_loop_publishes_named_events_and_stops_cleanly() {
    let broadcaster = Arc::new(CollectingBroadcaster::default());
    let mut handle = SimulationHandle::new(active_config(15), broadcaster.clone())
        .with_step_interval(Duration::from_millis(1));

    handle.start();
    handle.start(); // idempotent
    assert!(handle.is_running());
    std::thread::sleep(Duration::from_millis(100));
    handle.stop();
    assert!(!handle.is_running());

    let events = broadcaster.events.lock();
    let updates = events.iter().filter(|e| *e == "market_update").count();
    let traders = events.iter().filter(|e| *e == "traders_update").count();
    assert!(updates > 0, "no market updates published");
    assert_eq!(updates, traders, "every iteration publishes both");

    // Stopped at an iteration boundary: no further events arrive.
    drop(events);
    let count = broadcaster.events.lock().len();
    std::thread::sleep(Duration::from_millis(20));
    assert_eq!(broadcaster.events.lock().len(), count);
}
