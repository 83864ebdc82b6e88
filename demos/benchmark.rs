//! # Example: benchmark
//!
//! Compares drain time across concurrency caps with a synthetic workload.
//!
//! For every cap in `CAPS`, runs `ROUNDS` rounds of `ITEMS` items, each item
//! sleeping for `WORK`, and prints the per-round and mean drain durations.
//!
//! ## Flow
//! ```text
//! for cap in CAPS:
//!   for round in 0..ROUNDS:
//!     Runner::builder(sleep WORK)
//!       ├─► with_config(max_concurrent = cap, drain_mode = Notify)
//!       ├─► submit(0..ITEMS)
//!       └─► wait() ─► elapsed
//!   mean(elapsed)
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=info cargo run --example benchmark --features logging
//! RUST_LOG=flowgate::events=info cargo run --example benchmark --features logging  # per-event lines
//! ```

use std::sync::Arc;
use std::time::Duration;

use flowgate::{Config, DrainMode, ExecFn, LogWriter, Runner, Subscribe};
use tokio::time::Instant;
use tracing_subscriber::EnvFilter;

const CAPS: [usize; 4] = [10, 100, 200, 300];
const ROUNDS: u32 = 5;
const ITEMS: u64 = 10_000;
const WORK: Duration = Duration::from_millis(20);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let started = Instant::now();
    println!("{:>8} | {:>10} | durations (ms)", "cap", "mean (ms)");

    for cap in CAPS {
        let mut durations = Vec::with_capacity(ROUNDS as usize);

        for _ in 0..ROUNDS {
            let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
            let runner = Runner::builder(ExecFn::arc(|_: u64| async move {
                tokio::time::sleep(WORK).await;
                Ok::<_, anyhow::Error>(())
            }))
            .with_config(
                Config::default()
                    .with_max_concurrent(cap)
                    .with_drain_mode(DrainMode::Notify),
            )
            .with_subscribers(subs)
            .build()?;

            for n in 0..ITEMS {
                runner.submit(n);
            }
            durations.push(runner.wait().await);
        }

        let mean = durations.iter().sum::<Duration>() / ROUNDS;
        let rendered: Vec<String> = durations
            .iter()
            .map(|d| d.as_millis().to_string())
            .collect();
        println!(
            "{cap:>8} | {:>10} | {}",
            mean.as_millis(),
            rendered.join(", ")
        );
    }

    println!("benchmark duration: {:?}", started.elapsed());
    Ok(())
}
