//! # Logging subscriber.
//!
//! [`LogWriter`] renders runner events as `tracing` records under the
//! `flowgate::events` target.
//!
//! ## Output format
//! ```text
//! [queued] ticket=#12 completed=0 submitted=12
//! [starting] ticket=#3
//! [failed] ticket=#3 reason="error: connection refused"
//! [completed] ticket=#3 completed=1 submitted=12
//! [drained] items=12 elapsed_ms=2140
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Subscriber that logs every runner event.
///
/// Enabled via the `logging` feature. Progress goes to `info`, failures to `warn`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogWriter;

impl LogWriter {
    /// Creates a new log writer.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let ticket = e.ticket.map(|t| t.to_string()).unwrap_or_default();
        let completed = e.completed.unwrap_or(0);
        let submitted = e.submitted.unwrap_or(0);

        match e.kind {
            EventKind::ItemQueued => {
                tracing::info!(target: "flowgate::events", "[queued] ticket={ticket} completed={completed} submitted={submitted}");
            }
            EventKind::ItemStarting => {
                tracing::info!(target: "flowgate::events", "[starting] ticket={ticket}");
            }
            EventKind::ItemFailed => {
                tracing::warn!(
                    target: "flowgate::events",
                    "[failed] ticket={ticket} reason={:?}",
                    e.reason.as_deref().unwrap_or("<none>")
                );
            }
            EventKind::ItemCompleted => {
                tracing::info!(target: "flowgate::events", "[completed] ticket={ticket} completed={completed} submitted={submitted}");
            }
            EventKind::Drained => {
                tracing::info!(
                    target: "flowgate::events",
                    "[drained] items={submitted} elapsed_ms={}",
                    e.elapsed_ms.unwrap_or(0)
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}
