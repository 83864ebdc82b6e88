//! Error types used by the flowgate runner and its callbacks.
//!
//! This module defines two main error enums:
//!
//! - [`RuntimeError`]: errors raised by the runner itself.
//! - [`ExecutionError`]: the outcome of a failed execution callback.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use std::time::Duration;
use thiserror::Error;

use crate::core::Stats;

/// # Errors produced by the runner.
///
/// These represent failures of the runner itself, never of a single item.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The runner was built outside of a tokio runtime.
    #[error("no tokio runtime available to spawn executions")]
    NoRuntime,

    /// The runner did not drain within the requested limit.
    ///
    /// Nothing is cancelled; submitted items keep running.
    #[error("not drained after {limit:?}; {} of {} items completed", .stats.completed, .stats.submitted)]
    DrainTimeout {
        /// The limit passed to `wait_timeout`.
        limit: Duration,
        /// Counters observed when the limit was hit.
        stats: Stats,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use flowgate::RuntimeError;
    ///
    /// assert_eq!(RuntimeError::NoRuntime.as_label(), "runtime_unavailable");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::NoRuntime => "runtime_unavailable",
            RuntimeError::DrainTimeout { .. } => "runtime_drain_timeout",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::NoRuntime => "no tokio runtime".to_string(),
            RuntimeError::DrainTimeout { limit, stats } => format!(
                "drain timeout after {limit:?}; in_flight={} queued={}",
                stats.in_flight, stats.queued
            ),
        }
    }
}

/// # Failure of a single execution.
///
/// The runner does not classify errors returned by the execution callback:
/// they are carried untouched in [`ExecutionError::Failed`]. A panic inside the
/// callback is caught and reported as [`ExecutionError::Panicked`].
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The execution callback returned an error.
    #[error("execution failed: {source}")]
    Failed {
        /// The error returned by the callback.
        #[source]
        source: anyhow::Error,
    },

    /// The execution callback panicked.
    #[error("execution panicked: {reason}")]
    Panicked {
        /// Panic payload rendered as text (if it was a string).
        reason: String,
    },
}

impl ExecutionError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use flowgate::ExecutionError;
    ///
    /// let err = ExecutionError::from(anyhow::anyhow!("boom"));
    /// assert_eq!(err.as_label(), "execution_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ExecutionError::Failed { .. } => "execution_failed",
            ExecutionError::Panicked { .. } => "execution_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ExecutionError::Failed { source } => format!("error: {source:#}"),
            ExecutionError::Panicked { reason } => format!("panic: {reason}"),
        }
    }

    /// Returns the callback's own error, if the callback returned one.
    pub fn callback_error(&self) -> Option<&anyhow::Error> {
        match self {
            ExecutionError::Failed { source } => Some(source),
            ExecutionError::Panicked { .. } => None,
        }
    }

    /// Builds a [`ExecutionError::Panicked`] from a `catch_unwind` payload.
    pub(crate) fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let reason = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "<non-string panic payload>".to_string()
        };
        ExecutionError::Panicked { reason }
    }
}

impl From<anyhow::Error> for ExecutionError {
    fn from(source: anyhow::Error) -> Self {
        ExecutionError::Failed { source }
    }
}
