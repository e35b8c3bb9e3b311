//! Continuous double-auction order book with price-time priority.
//!
//! Each side keeps an ordered map of price levels, each level a FIFO
//! queue of resting limit orders. Incoming orders match against the
//! best opposite levels; trades always execute at the resting order's
//! limit price. Market orders never rest: any unfilled remainder is
//! discarded.

use crate::error::{Result, SimCoreError};
use std::collections::{BTreeMap, VecDeque};
use types::{BookEntry, BookSnapshot, Order, OrderSide, Price, Quantity, Trade, TradeId, TraderId};

/// Maximum number of resting orders reported per side in a snapshot.
pub const SNAPSHOT_DEPTH: usize = 10;

/// Capacity of the bounded trade log (FIFO eviction).
pub const TRADE_LOG_CAPACITY: usize = 1000;

/// Price-time priority order book.
#[derive(Debug, Default)]
pub struct OrderBook {
    /// Buy side: best bid is the highest key.
    bids: BTreeMap<Price, VecDeque<Order>>,
    /// Sell side: best ask is the lowest key.
    asks: BTreeMap<Price, VecDeque<Order>>,
    /// Bounded log of executed trades, oldest first.
    trades: VecDeque<Trade>,
    /// Monotonic trade id counter; ids stay unique after log eviction.
    next_trade_id: u64,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit an order: match what crosses, rest the remainder (limit
    /// orders only). Returns the trades executed, in order.
    ///
    /// Malformed orders (zero quantity, non-positive limit price) are
    /// rejected; they are a caller defect, never silently coerced.
    pub fn add_order(&mut self, mut order: Order) -> Result<Vec<Trade>> {
        if order.quantity.is_zero() {
            return Err(SimCoreError::ZeroQuantity);
        }
        if let Some(price) = order.limit_price() {
            if !price.is_positive() {
                return Err(SimCoreError::InvalidPrice(price));
            }
        }

        let mut trades = Vec::new();
        match order.side {
            OrderSide::Buy => self.match_buy(&mut order, &mut trades),
            OrderSide::Sell => self.match_sell(&mut order, &mut trades),
        }

        if !order.quantity.is_zero() {
            if let Some(price) = order.limit_price() {
                let side = match order.side {
                    OrderSide::Buy => &mut self.bids,
                    OrderSide::Sell => &mut self.asks,
                };
                side.entry(price).or_default().push_back(order);
            }
            // Market-order remainder is discarded.
        }

        Ok(trades)
    }

    /// Match an incoming buy against the ask side, best (lowest) first.
    fn match_buy(&mut self, order: &mut Order, trades: &mut Vec<Trade>) {
        while !order.quantity.is_zero() {
            let (level_price, maker_id, fill_qty, level_exhausted) = {
                let Some((&level_price, level)) = self.asks.iter_mut().next() else {
                    break;
                };
                if let Some(limit) = order.limit_price() {
                    if level_price > limit {
                        break;
                    }
                }
                let Some(resting) = level.front_mut() else {
                    break;
                };
                let fill_qty = order.quantity.min(resting.quantity);
                resting.quantity -= fill_qty;
                let maker_id = resting.trader_id;
                if resting.is_filled() {
                    level.pop_front();
                }
                (level_price, maker_id, fill_qty, level.is_empty())
            };
            order.quantity -= fill_qty;
            if level_exhausted {
                self.asks.remove(&level_price);
            }
            let trade =
                self.record_trade(level_price, fill_qty, order.trader_id, maker_id, order.tick);
            trades.push(trade);
        }
    }

    /// Match an incoming sell against the bid side, best (highest) first.
    fn match_sell(&mut self, order: &mut Order, trades: &mut Vec<Trade>) {
        while !order.quantity.is_zero() {
            let (level_price, maker_id, fill_qty, level_exhausted) = {
                let Some((&level_price, level)) = self.bids.iter_mut().next_back() else {
                    break;
                };
                if let Some(limit) = order.limit_price() {
                    if level_price < limit {
                        break;
                    }
                }
                let Some(resting) = level.front_mut() else {
                    break;
                };
                let fill_qty = order.quantity.min(resting.quantity);
                resting.quantity -= fill_qty;
                let maker_id = resting.trader_id;
                if resting.is_filled() {
                    level.pop_front();
                }
                (level_price, maker_id, fill_qty, level.is_empty())
            };
            order.quantity -= fill_qty;
            if level_exhausted {
                self.bids.remove(&level_price);
            }
            let trade =
                self.record_trade(level_price, fill_qty, maker_id, order.trader_id, order.tick);
            trades.push(trade);
        }
    }

    /// Record a trade at the resting (maker) price and append it to the
    /// bounded log.
    fn record_trade(
        &mut self,
        price: Price,
        quantity: Quantity,
        buyer_id: TraderId,
        seller_id: TraderId,
        tick: u64,
    ) -> Trade {
        self.next_trade_id += 1;
        let trade = Trade {
            id: TradeId(self.next_trade_id),
            price: price.round_to_cents(),
            quantity,
            buyer_id,
            seller_id,
            tick,
        };
        if self.trades.len() == TRADE_LOG_CAPACITY {
            self.trades.pop_front();
        }
        self.trades.push_back(trade.clone());
        trade
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Highest resting bid price.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next_back().copied()
    }

    /// Lowest resting ask price.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    /// Bid-ask spread rounded to cents; `None` when either side is empty.
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((ask - bid).round_to_cents()),
            _ => None,
        }
    }

    /// Top of book: up to [`SNAPSHOT_DEPTH`] individual resting orders
    /// per side, best first.
    pub fn snapshot(&self) -> BookSnapshot {
        let bids = self
            .bids
            .iter()
            .rev()
            .flat_map(|(&price, level)| {
                level.iter().map(move |o| BookEntry {
                    price,
                    quantity: o.quantity,
                })
            })
            .take(SNAPSHOT_DEPTH)
            .collect();
        let asks = self
            .asks
            .iter()
            .flat_map(|(&price, level)| {
                level.iter().map(move |o| BookEntry {
                    price,
                    quantity: o.quantity,
                })
            })
            .take(SNAPSHOT_DEPTH)
            .collect();
        BookSnapshot { bids, asks }
    }

    /// Last `n` trades, oldest first.
    pub fn recent_trades(&self, n: usize) -> Vec<Trade> {
        let skip = self.trades.len().saturating_sub(n);
        self.trades.iter().skip(skip).cloned().collect()
    }

    /// All resting orders belonging to one trader, bids then asks,
    /// best first on each side.
    pub fn orders_for(&self, trader_id: TraderId) -> Vec<Order> {
        self.bids
            .values()
            .rev()
            .chain(self.asks.values())
            .flatten()
            .filter(|o| o.trader_id == trader_id)
            .cloned()
            .collect()
    }

    /// Total number of resting orders on both sides.
    pub fn resting_order_count(&self) -> usize {
        self.bids.values().map(VecDeque::len).sum::<usize>()
            + self.asks.values().map(VecDeque::len).sum::<usize>()
    }

    /// Total trades ever executed (not just those still in the log).
    pub fn total_trades(&self) -> u64 {
        self.next_trade_id
    }
}

// =============================================================================
// Tests
// =============================================================================
