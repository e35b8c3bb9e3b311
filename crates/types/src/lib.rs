//! Shared data types for the market simulator.
//!
//! This crate provides the types used across the simulation: typed
//! identifiers, fixed-point monetary values, orders, trades, and order
//! book snapshots.

pub mod ids;
pub mod market_data;
pub mod money;
pub mod order;
pub mod trade;

pub use ids::{OrderId, Tick, TradeId, TraderId, TraderKind};
pub use market_data::{BookEntry, BookSnapshot};
pub use money::{Cash, Price, Quantity, PRICE_SCALE};
pub use order::{Order, OrderKind, OrderSide};
pub use trade::Trade;
