//! # flowgate
//!
//! **flowgate** is a bounded-concurrency task runner for tokio.
//!
//! Callers submit items one at a time; the runner applies one async callback to
//! each item, keeps at most `max_concurrent` callbacks in flight, queues the
//! overflow in submission order, and lets the caller wait until everything
//! submitted has finished.
//!
//! ## Architecture
//! ```text
//!   submit(item) ──► Admission ──► in_flight <= limit ? ──yes──► Engine task
//!                       │                                          │
//!                       │ no                                       │ execute(item)
//!                       ▼                                          │ record completion
//!                 ┌────────────┐          pop head (FIFO)          │
//!                 │   Queue    │ ◄─────────────────────────────────┘
//!                 └────────────┘          while queue non-empty
//!
//!   wait() ──► Waiter ──► Poll: sleep(poll_interval) until drained
//!                         Notify: woken by the engine on the last completion
//!
//!   Engine / submit ──► Bus (broadcast) ──► SubscriberSet ──► Subscribe::on_event
//! ```
//!
//! ## Lifecycle
//! ```text
//! per item:  Pending (queued) ──► Running ──► Done | Failed
//! runner:    Idle ──► Active ──► Drained ──► Active ...
//! ```
//!
//! ## Features
//! | Area              | Description                                               | Key types / traits                       |
//! |-------------------|-----------------------------------------------------------|------------------------------------------|
//! | **Runner**        | Submit, wait for drain, inspect counters.                 | [`Runner`], [`RunnerBuilder`], [`Stats`] |
//! | **Callbacks**     | The operation per item and the failure sink.              | [`Execute`], [`ExecFn`], [`HandleError`] |
//! | **Configuration** | Concurrency cap, poll interval, drain mode.               | [`Config`], [`DrainMode`]                |
//! | **Events**        | Admission/execution/drain events for monitoring.          | [`Event`], [`EventKind`], [`Subscribe`]  |
//! | **Errors**        | Typed errors for the runner and for executions.           | [`RuntimeError`], [`ExecutionError`]     |
//!
//! ## Optional features
//! - `logging`: exports a built-in [`LogWriter`] subscriber that logs events via `tracing`.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use flowgate::{Config, ErrorFn, ExecFn, ExecutionError, Runner};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = Config::default()
//!         .with_max_concurrent(2)
//!         .with_poll_interval(Duration::from_millis(20));
//!
//!     let runner = Runner::builder(ExecFn::arc(|url: &'static str| async move {
//!         anyhow::ensure!(url.starts_with("https://"), "refusing {url}");
//!         tokio::time::sleep(Duration::from_millis(10)).await;
//!         Ok(())
//!     }))
//!     .with_config(cfg)
//!     .with_error_handler(ErrorFn::arc(|err: ExecutionError| async move {
//!         eprintln!("failed: {err}");
//!     }))
//!     .build()?;
//!
//!     for url in ["https://a.example", "http://b.example", "https://c.example"] {
//!         runner.submit(url);
//!     }
//!
//!     let elapsed = runner.wait().await;
//!     assert_eq!(runner.stats().completed, 3);
//!     println!("drained in {elapsed:?}");
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod error;
mod events;
mod exec;
mod subscribers;

// ---- Public re-exports ----

pub use config::{Config, DEFAULT_MAX_CONCURRENT, DEFAULT_POLL_INTERVAL, DrainMode};
pub use crate::core::{Runner, RunnerBuilder, RunnerState, Stats, Ticket};
pub use error::{ExecutionError, RuntimeError};
pub use events::{Bus, Event, EventKind};
pub use exec::{ErrorFn, ErrorHandlerRef, ExecFn, ExecRef, Execute, HandleError};
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a built-in logging subscriber.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
