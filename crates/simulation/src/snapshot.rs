//! Owned reporting snapshots.
//!
//! Snapshots are built under the simulation lock and handed out by
//! value, so delivery layers never hold references into live state.

use serde::{Deserialize, Serialize};
use types::{BookSnapshot, Cash, OrderSide, Price, Quantity, Trade, TraderId};

/// Market-level state published every step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    /// Last traded price (or the initial price before any trade).
    pub current_price: Price,
    /// Price change versus the previous step.
    pub change: Price,
    /// Change as a percentage of the previous step's price, rounded to
    /// two decimals.
    pub change_percent: f64,
    /// Shares traded during the last completed step.
    pub volume: u64,
    /// Best bid, if any.
    pub best_bid: Option<Price>,
    /// Best ask, if any.
    pub best_ask: Option<Price>,
    /// Bid-ask spread, if both sides are quoted.
    pub spread: Option<Price>,
    /// Bounded step-close price history, oldest first.
    pub price_history: Vec<Price>,
    /// Top of book, up to ten resting orders per side.
    pub order_book: BookSnapshot,
    /// The ten most recent trades, oldest first.
    pub recent_trades: Vec<Trade>,
}

/// One resting order in a trader report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenOrder {
    pub side: OrderSide,
    pub price: Price,
    pub quantity: Quantity,
}

/// Per-trader report published for tracked traders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraderData {
    pub id: TraderId,
    pub cash: Cash,
    pub shares: i64,
    /// Mark-to-market value at the current price.
    pub portfolio_value: Cash,
    /// P&L versus the initial portfolio value.
    pub pnl: Cash,
    /// P&L percentage; 0 when the initial value was not positive.
    pub pnl_percent: f64,
    pub orders_placed: u64,
    pub total_volume: u64,
    /// Up to the last 100 trades this trader took part in.
    pub trade_history: Vec<Trade>,
    /// Orders currently resting in the book.
    pub open_orders: Vec<OpenOrder>,
}
