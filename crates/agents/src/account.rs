//! Trader account record.
//!
//! Owned by the simulation, mutated as trades settle, passed to
//! strategies by reference for resource checks.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use types::{Cash, Price, Trade};

/// Bounded per-account trade history kept for reporting.
pub const TRADE_HISTORY_CAPACITY: usize = 100;

/// Cash, inventory, and activity counters for one trader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Available cash; can go negative only through stale resting
    /// orders filling after inventory was committed elsewhere.
    pub cash: Cash,
    /// Shares held (signed for the same reason).
    pub shares: i64,
    /// Orders submitted by this trader.
    pub orders_placed: u64,
    /// Cumulative shares traded on either side.
    pub total_volume: u64,
    /// Portfolio value at construction, the P&L baseline.
    pub initial_value: Cash,
    /// Most recent trades this account took part in.
    trade_history: VecDeque<Trade>,
}

impl Account {
    /// Create an account, capturing the initial portfolio value at the
    /// given reference price.
    pub fn new(cash: Cash, shares: i64, reference_price: Price) -> Self {
        let initial_value = cash + Cash(shares * reference_price.raw());
        Self {
            cash,
            shares,
            orders_placed: 0,
            total_volume: 0,
            initial_value,
            trade_history: VecDeque::with_capacity(TRADE_HISTORY_CAPACITY),
        }
    }

    /// Settle this account's buy side of a trade.
    pub fn apply_buy(&mut self, trade: &Trade) {
        self.cash -= trade.value();
        self.shares += trade.quantity.raw() as i64;
        self.total_volume += trade.quantity.raw();
        self.push_history(trade.clone());
    }

    /// Settle this account's sell side of a trade.
    pub fn apply_sell(&mut self, trade: &Trade) {
        self.cash += trade.value();
        self.shares -= trade.quantity.raw() as i64;
        self.total_volume += trade.quantity.raw();
        self.push_history(trade.clone());
    }

    /// Count a submitted order.
    pub fn record_order(&mut self) {
        self.orders_placed += 1;
    }

    /// Mark-to-market portfolio value at the given price.
    pub fn portfolio_value(&self, price: Price) -> Cash {
        self.cash + Cash(self.shares * price.raw())
    }

    /// Absolute P&L versus the initial portfolio value.
    pub fn pnl(&self, price: Price) -> Cash {
        self.portfolio_value(price) - self.initial_value
    }

    /// P&L as a percentage of the initial portfolio value; 0 when the
    /// baseline is not positive.
    pub fn pnl_percent(&self, price: Price) -> f64 {
        if self.initial_value.is_positive() {
            self.pnl(price).to_float() / self.initial_value.to_float() * 100.0
        } else {
            0.0
        }
    }

    /// Recent trades, oldest first.
    pub fn trade_history(&self) -> &VecDeque<Trade> {
        &self.trade_history
    }

    fn push_history(&mut self, trade: Trade) {
        if self.trade_history.len() == TRADE_HISTORY_CAPACITY {
            self.trade_history.pop_front();
        }
        self.trade_history.push_back(trade);
    }
}
