//! Trader models for the market simulator.
//!
//! This crate provides the trader account record, fair-value models,
//! and the three decision strategies (random, mean-reverting,
//! trend-following) unified in a closed [`Strategy`] enum.
//!
//! Strategies never own market state: the simulation owns each
//! trader's [`Account`] and passes it by reference together with a
//! [`MarketView`] of the current quote.

pub mod account;
pub mod context;
pub mod fair_value;
pub mod strategies;

pub use account::{Account, TRADE_HISTORY_CAPACITY};
pub use context::MarketView;
pub use fair_value::FairValueModel;
pub use strategies::{
    MeanRevertingConfig, MeanRevertingTrader, RandomTraderConfig, RandomTrader, Strategy,
    TrendFollowerConfig, TrendFollower,
};
