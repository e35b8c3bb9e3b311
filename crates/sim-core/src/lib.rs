//! Core matching machinery for the market simulator.
//!
//! This crate provides the continuous double-auction order book with
//! price-time priority matching and its error types.

pub mod error;
pub mod order_book;

pub use error::{Result, SimCoreError};
pub use order_book::{OrderBook, SNAPSHOT_DEPTH, TRADE_LOG_CAPACITY};
