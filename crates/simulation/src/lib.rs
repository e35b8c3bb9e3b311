//! Simulation crate: the event loop for the market simulator.
//!
//! This crate coordinates:
//! - Trader population construction from a [`SimulationConfig`]
//! - The per-step decision/match/settle cycle ([`MarketSimulation::step`])
//! - Bounded price/volume histories and reporting snapshots
//! - The background stepping loop and broadcast seam ([`SimulationHandle`])
//!
//! # Architecture
//!
//! The simulation runs in discrete steps:
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │            MarketSimulation.step()            │
//! │                                               │
//! │  1. Capture best bid/ask (once per step)      │
//! │  2. For each trader, in fixed order:          │
//! │     - strategy decides on at most one order   │
//! │     - order is matched through the book       │
//! │     - each trade settles both accounts and    │
//! │       moves the current price                 │
//! │  3. Append price/volume history (bounded)     │
//! │  4. Drain due events, advance the clock       │
//! │                                               │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Delivery layers observe through the [`Broadcaster`] trait; the core
//! publishes named events but never implements transport.

pub mod bridge;
pub mod config;
pub mod runner;
pub mod scheduler;
pub mod snapshot;

pub use bridge::{Broadcaster, NullBroadcaster, SimulationHandle, STEP_INTERVAL};
pub use config::{SimulationConfig, TraderClassConfig, TrackingConfig};
pub use runner::{MarketSimulation, HISTORY_CAPACITY};
pub use scheduler::EventScheduler;
pub use snapshot::{MarketData, OpenOrder, TraderData};
