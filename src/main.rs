//! Headless CLI runner for the market simulator.
//!
//! Two modes:
//! - default: step the simulation flat out for `--steps` iterations and
//!   log a summary
//! - `--live`: run the background loop at the standard cadence, with
//!   broadcast events fanned out over a channel and logged

use clap::Parser;
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use simulation::{
    Broadcaster, MarketData, MarketSimulation, SimulationConfig, SimulationHandle, TrackingConfig,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;
use types::Price;

#[derive(Parser, Debug)]
#[command(name = "market-sim")]
#[command(about = "Continuous double-auction market simulator")]
struct Args {
    /// Steps to run in headless mode.
    #[arg(long, default_value_t = 1000)]
    steps: u64,

    /// Number of random (noise) traders.
    #[arg(long, default_value_t = 1500)]
    random_traders: usize,

    /// Number of mean-reverting traders.
    #[arg(long, default_value_t = 500)]
    mean_reverting_traders: usize,

    /// Number of trend-following traders.
    #[arg(long, default_value_t = 0)]
    trend_following_traders: usize,

    /// Opening price.
    #[arg(long, default_value_t = 100.0)]
    initial_price: f64,

    /// Master seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Track the first N traders of every type (default: first 10 overall).
    #[arg(long, default_value_t = 0)]
    track: usize,

    /// Run the live background loop instead of stepping flat out.
    #[arg(long)]
    live: bool,

    /// Seconds to keep the live loop running.
    #[arg(long, default_value_t = 10)]
    live_secs: u64,
}

impl Args {
    fn to_config(&self) -> SimulationConfig {
        let mut config = SimulationConfig::default()
            .with_initial_price(Price::from_float(self.initial_price))
            .with_counts(
                self.random_traders,
                self.mean_reverting_traders,
                self.trend_following_traders,
            )
            .with_tracking(TrackingConfig {
                all_traders: self.track,
                ..TrackingConfig::default()
            });
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

/// Broadcaster that fans events out over a channel; drops on backpressure
/// so the simulation loop never stalls on a slow consumer.
struct ChannelBroadcaster {
    tx: Sender<(String, serde_json::Value)>,
}

impl Broadcaster for ChannelBroadcaster {
    fn publish(&self, event: &str, payload: serde_json::Value) {
        let _ = self.tx.try_send((event.to_string(), payload));
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.to_config();

    if args.live {
        run_live(&args, config);
    } else {
        run_headless(&args, config);
    }
}

fn run_headless(args: &Args, config: SimulationConfig) {
    let mut sim = MarketSimulation::new(config);
    let started = Instant::now();

    for step in 1..=args.steps {
        sim.step();
        if step % 100 == 0 {
            let data = sim.get_market_data();
            info!(
                step,
                price = %data.current_price,
                volume = data.volume,
                trades = sim.total_trades(),
                "progress"
            );
        }
    }

    let data = sim.get_market_data();
    info!(
        steps = args.steps,
        elapsed_ms = started.elapsed().as_millis() as u64,
        final_price = %data.current_price,
        total_trades = sim.total_trades(),
        "run complete"
    );
    for trader in sim.get_all_traders_data() {
        info!(
            id = %trader.id,
            cash = %trader.cash,
            shares = trader.shares,
            pnl = %trader.pnl,
            pnl_percent = trader.pnl_percent,
            "tracked trader"
        );
    }
}

fn run_live(args: &Args, config: SimulationConfig) {
    let (tx, rx) = bounded(256);
    let mut handle = SimulationHandle::new(config, Arc::new(ChannelBroadcaster { tx }));
    handle.start();

    let deadline = Instant::now() + Duration::from_secs(args.live_secs);
    while Instant::now() < deadline {
        match rx.recv_timeout(Duration::from_millis(250)) {
            Ok((event, payload)) if event == "market_update" => {
                if let Ok(data) = serde_json::from_value::<MarketData>(payload) {
                    info!(
                        price = %data.current_price,
                        change = %data.change,
                        volume = data.volume,
                        "market update"
                    );
                }
            }
            Ok((event, _)) => {
                tracing::debug!(event, "broadcast");
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    handle.stop();

    let data = handle.market_data();
    info!(final_price = %data.current_price, "live run complete");
}
