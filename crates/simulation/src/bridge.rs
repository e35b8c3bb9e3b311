//! Lifecycle handle and broadcast seam.
//!
//! The simulation core is synchronous; this module owns the bridge to
//! the outside world: a background stepping thread, an atomic running
//! flag honored at iteration boundaries, and the [`Broadcaster`] trait
//! through which snapshots leave the core. Delivery layers implement
//! `Broadcaster`; the core never implements transport.

use crate::config::SimulationConfig;
use crate::runner::MarketSimulation;
use crate::snapshot::{MarketData, TraderData};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{error, info};

/// Pause between live iterations.
pub const STEP_INTERVAL: Duration = Duration::from_millis(100);

/// Outbound event sink. Implementations are transports (channels,
/// sockets, logs); payloads are already-serialized JSON values.
pub trait Broadcaster: Send + Sync {
    fn publish(&self, event: &str, payload: serde_json::Value);
}

/// Broadcaster that drops everything; for headless runs and tests.
#[derive(Debug, Default)]
pub struct NullBroadcaster;

impl Broadcaster for NullBroadcaster {
    fn publish(&self, _event: &str, _payload: serde_json::Value) {}
}

/// Thread-safe owner of a [`MarketSimulation`].
///
/// All state sits behind one lock; snapshot getters lock, copy, and
/// release, so readers never observe a half-applied step. `reset`
/// swaps in a freshly built simulation under the same lock, which
/// makes it atomic to readers.
pub struct SimulationHandle {
    sim: Arc<Mutex<MarketSimulation>>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    broadcaster: Arc<dyn Broadcaster>,
    config: SimulationConfig,
    step_interval: Duration,
}

impl SimulationHandle {
    pub fn new(config: SimulationConfig, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            sim: Arc::new(Mutex::new(MarketSimulation::new(config.clone()))),
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
            broadcaster,
            config,
            step_interval: STEP_INTERVAL,
        }
    }

    /// Override the live-loop pause (tests use a short one).
    pub fn with_step_interval(mut self, interval: Duration) -> Self {
        self.step_interval = interval;
        self
    }

    /// Spawn the background stepping loop. Idempotent: a second call
    /// while running does nothing.
    pub fn start(&mut self) {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }
        let sim = Arc::clone(&self.sim);
        let running = Arc::clone(&self.running);
        let broadcaster = Arc::clone(&self.broadcaster);
        let interval = self.step_interval;

        self.worker = Some(thread::spawn(move || {
            info!("simulation loop started");
            while running.load(Ordering::SeqCst) {
                let (market, traders, trades) = {
                    let mut sim = sim.lock();
                    let trades = sim.step();
                    (sim.get_market_data(), sim.get_all_traders_data(), trades)
                };
                publish(broadcaster.as_ref(), "market_update", &market);
                publish(broadcaster.as_ref(), "traders_update", &traders);
                if !trades.is_empty() {
                    publish(broadcaster.as_ref(), "new_trades", &trades);
                }
                thread::sleep(interval);
            }
            info!("simulation loop stopped");
        }));
    }

    /// Signal the loop to stop and wait for the current iteration to
    /// finish.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }

    /// Stop the loop and rebuild the simulation from its config.
    pub fn reset(&mut self) {
        self.stop();
        *self.sim.lock() = MarketSimulation::new(self.config.clone());
        info!("simulation reset");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Run a single step synchronously; returns the number of trades.
    pub fn step(&self) -> usize {
        self.sim.lock().step().len()
    }

    pub fn market_data(&self) -> MarketData {
        self.sim.lock().get_market_data()
    }

    pub fn traders_data(&self) -> Vec<TraderData> {
        self.sim.lock().get_all_traders_data()
    }
}

impl Drop for SimulationHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

fn publish<T: Serialize>(broadcaster: &dyn Broadcaster, event: &str, payload: &T) {
    match serde_json::to_value(payload) {
        Ok(value) => broadcaster.publish(event, value),
        Err(e) => error!(event, error = %e, "failed to serialize broadcast payload"),
    }
}
