//! # Runner: admission, queueing and drain waiting behind one handle.
//!
//! [`Runner`] owns the counters, the pending queue and the callbacks. Every
//! admitted item gets its own engine task; that task keeps pulling from the
//! queue after its item finishes (see [`engine`](super::engine)).
//!
//! ## Submission path
//! ```text
//! submit(item)
//!   ├─► lock state
//!   │     ├─► started_at.get_or_insert(now)
//!   │     ├─► ticket = counters.record_submitted()
//!   │     └─► admission::decide(in_flight, limit)
//!   │            ├─ Run     ─► (unlock) spawn engine::drive(ticket, item)
//!   │            └─ Enqueue ─► queue.push(ticket, item), publish ItemQueued
//!   └─► return (never fails, never waits)
//! ```
//!
//! ## Rules
//! - Counters, queue and start time live under a single mutex, so admission,
//!   completion and dequeue are atomic with respect to each other.
//! - The mutex is never held across an `.await`.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::{Notify, broadcast};
use tokio::time::{self, Instant};

use crate::{
    config::Config,
    error::RuntimeError,
    events::{Bus, Event, EventKind},
    exec::{ErrorHandlerRef, ExecRef},
};

use super::{
    admission::{self, Admission},
    builder::RunnerBuilder,
    counters::{Counters, Stats},
    engine,
    queue::PendingQueue,
    waiter,
};

/// Lifecycle of a runner as a whole.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunnerState {
    /// Nothing submitted yet.
    Idle,
    /// At least one item is running or queued.
    Active,
    /// Every submitted item completed; further submissions return to `Active`.
    Drained,
}

/// Mutable state guarded by [`Shared::state`].
pub(super) struct State<T> {
    pub counters: Counters,
    pub queue: PendingQueue<T>,
    pub started_at: Option<Instant>,
}

impl<T> State<T> {
    fn new() -> Self {
        Self {
            counters: Counters::default(),
            queue: PendingQueue::new(),
            started_at: None,
        }
    }

    pub fn stats(&self) -> Stats {
        self.counters.stats(self.queue.len())
    }
}

/// Everything the engine tasks and the runner handles share.
pub(super) struct Shared<T: Send + 'static> {
    pub cfg: Config,
    pub state: Mutex<State<T>>,
    pub exec: ExecRef<T>,
    pub on_error: Option<ErrorHandlerRef>,
    pub bus: Bus,
    /// Woken by the engine when the last in-flight item completes.
    pub drained: Notify,
    pub handle: Handle,
}

impl<T: Send + 'static> Shared<T> {
    pub fn is_in_progress(&self) -> bool {
        self.state.lock().counters.is_in_progress()
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.state.lock().started_at.map(|t| t.elapsed())
    }
}

/// Bounded-concurrency runner.
///
/// Applies one [`Execute`](crate::Execute) callback to every submitted item,
/// running at most [`Config::concurrency_limit`] items at once and queueing the
/// rest in submission order.
///
/// Cloning is cheap; all clones drive the same counters and queue.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use flowgate::{Config, DrainMode, ExecFn, Runner};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let cfg = Config::default()
///         .with_max_concurrent(4)
///         .with_drain_mode(DrainMode::Notify);
///
///     let runner = Runner::new(
///         ExecFn::arc(|n: u64| async move {
///             tokio::time::sleep(Duration::from_millis(n)).await;
///             Ok::<_, anyhow::Error>(())
///         }),
///         cfg,
///     )?;
///
///     for n in 0..16 {
///         runner.submit(n);
///     }
///     let elapsed = runner.wait().await;
///     assert_eq!(runner.stats().completed, 16);
///     println!("drained in {elapsed:?}");
///     Ok(())
/// }
/// ```
pub struct Runner<T: Send + 'static> {
    shared: Arc<Shared<T>>,
}

impl<T: Send + 'static> Clone for Runner<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Send + 'static> Runner<T> {
    /// Starts building a runner around the given execution callback.
    pub fn builder(exec: ExecRef<T>) -> RunnerBuilder<T> {
        RunnerBuilder::new(exec)
    }

    /// Builds a runner with no error handler and no subscribers.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(exec: ExecRef<T>, cfg: Config) -> Result<Self, RuntimeError> {
        Self::builder(exec).with_config(cfg).build()
    }

    pub(super) fn from_parts(
        cfg: Config,
        exec: ExecRef<T>,
        on_error: Option<ErrorHandlerRef>,
        bus: Bus,
        handle: Handle,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                cfg,
                state: Mutex::new(State::new()),
                exec,
                on_error,
                bus,
                drained: Notify::new(),
                handle,
            }),
        }
    }

    /// Submits one item.
    ///
    /// Runs it right away when the in-flight count (this item included) is within
    /// the limit, otherwise appends it to the queue. Returns immediately.
    pub fn submit(&self, item: T) {
        let shared = &self.shared;
        let limit = shared.cfg.concurrency_limit();

        let (ticket, admitted, stats) = {
            let mut state = shared.state.lock();
            state.started_at.get_or_insert_with(Instant::now);
            let ticket = state.counters.record_submitted();

            let admitted = match admission::decide(state.counters.in_flight(), limit) {
                Admission::Run => Some(item),
                Admission::Enqueue => {
                    state.queue.push(ticket, item);
                    None
                }
            };
            (ticket, admitted, state.stats())
        };

        match admitted {
            Some(item) => {
                tracing::debug!(%ticket, running = stats.running, limit, "item admitted");
                shared
                    .handle
                    .spawn(engine::drive(Arc::clone(shared), ticket, item));
            }
            None => {
                tracing::debug!(%ticket, queued = stats.queued, limit, "item queued");
                shared.bus.publish(
                    Event::new(EventKind::ItemQueued)
                        .with_ticket(ticket)
                        .with_progress(stats.completed, stats.submitted),
                );
            }
        }
    }

    /// Waits until every submitted item has completed.
    ///
    /// Returns the time elapsed since the first submission, or `Duration::ZERO`
    /// when nothing was ever submitted. How completion is detected depends on
    /// [`Config::drain_mode`].
    pub async fn wait(&self) -> Duration {
        waiter::wait_drained(&self.shared).await
    }

    /// Like [`Runner::wait`], but gives up after `limit`.
    ///
    /// Timing out does not cancel anything; the caller may wait again.
    pub async fn wait_timeout(&self, limit: Duration) -> Result<Duration, RuntimeError> {
        match time::timeout(limit, self.wait()).await {
            Ok(elapsed) => Ok(elapsed),
            Err(_elapsed) => Err(RuntimeError::DrainTimeout {
                limit,
                stats: self.stats(),
            }),
        }
    }

    /// Returns a snapshot of the counters.
    pub fn stats(&self) -> Stats {
        self.shared.state.lock().stats()
    }

    /// Returns the runner lifecycle state.
    pub fn state(&self) -> RunnerState {
        let state = self.shared.state.lock();
        if state.started_at.is_none() {
            RunnerState::Idle
        } else if state.counters.is_in_progress() {
            RunnerState::Active
        } else {
            RunnerState::Drained
        }
    }

    /// True when nothing is running or queued.
    pub fn is_drained(&self) -> bool {
        !self.shared.is_in_progress()
    }

    /// Time since the first submission, if any.
    pub fn elapsed(&self) -> Option<Duration> {
        self.shared.elapsed()
    }

    /// Returns the configuration the runner was built with.
    pub fn config(&self) -> &Config {
        &self.shared.cfg
    }

    /// Subscribes to runner events published from now on.
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.shared.bus.subscribe()
    }
}
