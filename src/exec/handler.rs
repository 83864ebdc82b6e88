//! # Error handler callback.
//!
//! A runner routes every [`ExecutionError`] to its [`HandleError`] (when one is
//! configured) exactly once. Without a handler, failures are logged with
//! `tracing::error!` and otherwise ignored.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ExecutionError;

/// Shared handle to an error handler.
pub type ErrorHandlerRef = Arc<dyn HandleError>;

/// Async sink for failed executions.
///
/// Called from the engine task of the failed item, before the item counts as
/// completed. A panic inside the handler is caught and logged; the item still
/// completes.
#[async_trait]
pub trait HandleError: Send + Sync + 'static {
    /// Handles one failed execution.
    async fn handle(&self, error: ExecutionError);
}

/// Closure-backed error handler.
#[derive(Debug)]
pub struct ErrorFn<F> {
    f: F,
}

impl<F> ErrorFn<F> {
    /// Creates a new closure-backed handler.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the handler and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> HandleError for ErrorFn<F>
where
    F: Fn(ExecutionError) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn handle(&self, error: ExecutionError) {
        (self.f)(error).await;
    }
}
