//! # Execution callback and its closure-backed implementation.
//!
//! [`Execute`] is the operation a runner applies to every item. The common handle
//! type is [`ExecRef`], an `Arc<dyn Execute<T>>` shared by every engine task.
//!
//! [`ExecFn`] wraps a closure `F: Fn(T) -> Fut`, producing a fresh future per item.
//! No state is shared between calls unless the closure captures an `Arc<...>` itself.
//!
//! ## Example
//! ```rust
//! use flowgate::{ExecFn, ExecRef};
//!
//! let exec: ExecRef<u32> = ExecFn::arc(|n: u32| async move {
//!     anyhow::ensure!(n < 100, "item {n} out of range");
//!     Ok(())
//! });
//! # let _ = exec;
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

/// Shared handle to an execution callback.
pub type ExecRef<T> = Arc<dyn Execute<T>>;

/// # Asynchronous operation applied to each submitted item.
///
/// The runner awaits `execute` once per item and never retries it. Returning
/// `Err` marks the item as failed; the error is routed to the configured
/// [`HandleError`](crate::HandleError) or logged.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use flowgate::Execute;
///
/// struct Upload;
///
/// #[async_trait]
/// impl Execute<String> for Upload {
///     async fn execute(&self, path: String) -> anyhow::Result<()> {
///         anyhow::ensure!(!path.is_empty(), "empty path");
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Execute<T: Send + 'static>: Send + Sync + 'static {
    /// Runs the operation for one item.
    async fn execute(&self, item: T) -> anyhow::Result<()>;
}

/// Closure-backed execution callback.
#[derive(Debug)]
pub struct ExecFn<F> {
    f: F,
}

impl<F> ExecFn<F> {
    /// Creates a new closure-backed callback.
    ///
    /// Prefer [`ExecFn::arc`] when you immediately need an [`ExecRef`].
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the callback and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<T, F, Fut> Execute<T> for ExecFn<F>
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn execute(&self, item: T) -> anyhow::Result<()> {
        (self.f)(item).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn exec_fn_creates_a_future_per_item() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let exec: ExecRef<usize> = ExecFn::arc(move |n: usize| {
            let seen = seen.clone();
            async move {
                seen.fetch_add(n, Ordering::SeqCst);
                Ok::<_, anyhow::Error>(())
            }
        });

        exec.execute(2).await.expect("first call");
        exec.execute(3).await.expect("second call");
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn exec_fn_passes_errors_through() {
        let exec: ExecRef<&'static str> =
            ExecFn::arc(|s: &'static str| async move {
                Err::<(), _>(anyhow::anyhow!("bad item {s}"))
            });

        let err = exec.execute("x").await.expect_err("must fail");
        assert_eq!(err.to_string(), "bad item x");
    }
}
