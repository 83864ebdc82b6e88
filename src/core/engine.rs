//! # Execution engine: run one item, record its completion, chain the next.
//!
//! Every admitted item gets an engine task. The task runs its item, counts the
//! completion, then takes the queue head (if any) and runs that too, until the
//! queue is empty. Completions are the only thing that drains the queue.
//!
//! ## Flow
//! ```text
//! drive(ticket, item)
//! loop {
//!   ├─► publish ItemStarting
//!   ├─► exec.execute(item)             (panics caught)
//!   │       ├─ Ok  ─► nothing
//!   │       └─ Err ─► publish ItemFailed
//!   │                 ├─ handler set ─► handler.handle(err)   (panics caught)
//!   │                 └─ no handler  ─► tracing::error!
//!   ├─► lock state
//!   │     ├─► counters.record_completed()
//!   │     └─► next = queue.pop()
//!   ├─► publish ItemCompleted { completed, submitted }
//!   ├─► drained? ─► notify waiters, publish Drained
//!   └─► next? continue : exit
//! }
//! ```
//!
//! ## Rules
//! - `completed` is incremented exactly once per item, whatever the outcome.
//! - Dequeue happens under the same lock as the completion count, so queued
//!   items leave the queue in submission order and are never handed out twice.
//! - On a `current_thread` runtime callbacks also start in that order. On a
//!   `multi_thread` runtime each engine task runs its next item on whatever
//!   worker it lands on, so only dequeue order is guaranteed, not start order.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::{
    error::ExecutionError,
    events::{Event, EventKind},
};

use super::{counters::Ticket, runner::Shared};

/// Runs `item` and then keeps draining the queue.
pub(super) async fn drive<T: Send + 'static>(shared: Arc<Shared<T>>, ticket: Ticket, item: T) {
    let mut next = Some((ticket, item));
    while let Some((ticket, item)) = next {
        execute_one(&shared, ticket, item).await;
        next = complete(&shared, ticket);
    }
}

/// Runs the callback for one item and routes its failure, if any.
async fn execute_one<T: Send + 'static>(shared: &Shared<T>, ticket: Ticket, item: T) {
    shared
        .bus
        .publish(Event::new(EventKind::ItemStarting).with_ticket(ticket));

    let err = match AssertUnwindSafe(shared.exec.execute(item))
        .catch_unwind()
        .await
    {
        Ok(Ok(())) => return,
        Ok(Err(source)) => ExecutionError::Failed { source },
        Err(payload) => ExecutionError::from_panic(&*payload),
    };

    shared.bus.publish(
        Event::new(EventKind::ItemFailed)
            .with_ticket(ticket)
            .with_reason(err.as_message()),
    );

    match &shared.on_error {
        Some(handler) => {
            if let Err(payload) = AssertUnwindSafe(handler.handle(err)).catch_unwind().await {
                let panic = ExecutionError::from_panic(&*payload);
                tracing::warn!(%ticket, reason = %panic.as_message(), "error handler panicked");
            }
        }
        None => {
            tracing::error!(%ticket, label = err.as_label(), error = %err, "unhandled execution error");
        }
    }
}

/// Counts the completion of `ticket` and pops the next queued item.
fn complete<T: Send + 'static>(shared: &Shared<T>, ticket: Ticket) -> Option<(Ticket, T)> {
    let (stats, next, elapsed) = {
        let mut state = shared.state.lock();
        state.counters.record_completed();
        let next = state.queue.pop();
        let elapsed = state.started_at.map(|t| t.elapsed());
        (state.stats(), next, elapsed)
    };

    tracing::debug!(
        %ticket,
        "finished {} of {} items",
        stats.completed,
        stats.submitted
    );
    shared.bus.publish(
        Event::new(EventKind::ItemCompleted)
            .with_ticket(ticket)
            .with_progress(stats.completed, stats.submitted),
    );

    if stats.in_flight == 0 {
        shared.drained.notify_waiters();
        let mut ev = Event::new(EventKind::Drained).with_progress(stats.completed, stats.submitted);
        if let Some(elapsed) = elapsed {
            ev = ev.with_elapsed(elapsed);
        }
        shared.bus.publish(ev);
    }

    next
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::{Config, DrainMode, ErrorFn, EventKind, ExecFn, ExecutionError, Runner};

    fn notify_cfg(max_concurrent: usize) -> Config {
        Config::default()
            .with_max_concurrent(max_concurrent)
            .with_drain_mode(DrainMode::Notify)
    }

    #[tokio::test(start_paused = true)]
    async fn panicking_execution_still_completes() {
        let handled = std::sync::Arc::new(AtomicUsize::new(0));
        let seen = handled.clone();

        let runner = Runner::builder(ExecFn::arc(|n: u32| async move {
            if n == 0 {
                panic!("exploded on {n}");
            }
            Ok::<_, anyhow::Error>(())
        }))
        .with_config(notify_cfg(1))
        .with_error_handler(ErrorFn::arc(move |err: ExecutionError| {
            let seen = seen.clone();
            async move {
                if let ExecutionError::Panicked { reason } = &err {
                    assert_eq!(reason, "exploded on 0");
                    seen.fetch_add(1, Ordering::SeqCst);
                }
            }
        }))
        .build()
        .expect("runtime");

        runner.submit(0);
        runner.submit(1);
        runner.wait().await;

        assert_eq!(handled.load(Ordering::SeqCst), 1);
        assert_eq!(runner.stats().completed, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn panicking_handler_does_not_stall_the_queue() {
        let runner = Runner::builder(ExecFn::arc(|_: u32| async move {
            Err::<(), _>(anyhow::anyhow!("always fails"))
        }))
        .with_config(notify_cfg(1))
        .with_error_handler(ErrorFn::arc(|_err: ExecutionError| async move {
            panic!("handler bug");
        }))
        .build()
        .expect("runtime");

        for n in 0..3 {
            runner.submit(n);
        }
        let res = runner.wait_timeout(Duration::from_secs(5)).await;
        assert!(res.is_ok());
        assert_eq!(runner.stats().completed, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn events_follow_item_lifecycle() {
        let runner = Runner::new(
            ExecFn::arc(|fail: bool| async move {
                anyhow::ensure!(!fail, "requested failure");
                Ok(())
            }),
            notify_cfg(1),
        )
        .expect("runtime");
        let mut events = runner.events();

        runner.submit(true);
        runner.submit(false);
        runner.wait().await;

        let mut kinds = Vec::new();
        while let Ok(ev) = events.try_recv() {
            kinds.push(ev.kind);
        }
        assert_eq!(
            kinds,
            vec![
                EventKind::ItemQueued,
                EventKind::ItemStarting,
                EventKind::ItemFailed,
                EventKind::ItemCompleted,
                EventKind::ItemStarting,
                EventKind::ItemCompleted,
                EventKind::Drained,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn drained_event_reports_elapsed() {
        let runner = Runner::new(
            ExecFn::arc(|d: Duration| async move {
                tokio::time::sleep(d).await;
                Ok::<_, anyhow::Error>(())
            }),
            notify_cfg(2),
        )
        .expect("runtime");
        let mut events = runner.events();

        runner.submit(Duration::from_millis(40));
        runner.submit(Duration::from_millis(60));
        let elapsed = runner.wait().await;
        assert_eq!(elapsed, Duration::from_millis(60));

        let mut drained = None;
        while let Ok(ev) = events.try_recv() {
            if ev.kind == EventKind::Drained {
                drained = Some(ev);
            }
        }
        let drained = drained.expect("drained event");
        assert_eq!(drained.elapsed_ms, Some(60));
        assert_eq!(drained.completed, Some(2));
    }
}
