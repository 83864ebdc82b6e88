use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::broadcast::error::RecvError;

use crate::{
    config::Config,
    error::RuntimeError,
    events::Bus,
    exec::{ErrorHandlerRef, ExecRef},
    subscribers::{Subscribe, SubscriberSet},
};

use super::runner::Runner;

/// Builder for constructing a [`Runner`] with optional features.
pub struct RunnerBuilder<T: Send + 'static> {
    exec: ExecRef<T>,
    cfg: Config,
    on_error: Option<ErrorHandlerRef>,
    subscribers: Vec<Arc<dyn Subscribe>>,
    handle: Option<Handle>,
}

impl<T: Send + 'static> RunnerBuilder<T> {
    /// Creates a new builder around the execution callback, with default config.
    pub fn new(exec: ExecRef<T>) -> Self {
        Self {
            exec,
            cfg: Config::default(),
            on_error: None,
            subscribers: Vec::new(),
            handle: None,
        }
    }

    /// Sets the runner configuration.
    pub fn with_config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Routes failed executions to `handler` instead of the log.
    pub fn with_error_handler(mut self, handler: ErrorHandlerRef) -> Self {
        self.on_error = Some(handler);
        self
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive runner events through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Spawns executions on `handle` instead of the runtime current at `build` time.
    pub fn with_runtime(mut self, handle: Handle) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Builds the runner.
    ///
    /// Fails with [`RuntimeError::NoRuntime`] when no runtime handle was given and
    /// `build` runs outside a tokio runtime.
    pub fn build(self) -> Result<Runner<T>, RuntimeError> {
        let handle = match self.handle {
            Some(handle) => handle,
            None => Handle::try_current().map_err(|_| RuntimeError::NoRuntime)?,
        };
        let bus = Bus::new(self.cfg.bus_capacity_clamped());

        let subs = SubscriberSet::new(self.subscribers, &handle);
        if !subs.is_empty() {
            spawn_subscriber_listener(&bus, subs, &handle);
        }

        Ok(Runner::from_parts(
            self.cfg,
            self.exec,
            self.on_error,
            bus,
            handle,
        ))
    }
}

/// Forwards bus events to the subscriber set until the bus closes.
///
/// The bus closes once the runner and every engine task are gone.
fn spawn_subscriber_listener(bus: &Bus, subs: SubscriberSet, handle: &Handle) {
    let mut rx = bus.subscribe();
    handle.spawn(async move {
        loop {
            match rx.recv().await {
                Ok(ev) => subs.emit(&ev),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "subscriber listener lagged behind the event bus");
                }
                Err(RecvError::Closed) => break,
            }
        }
        subs.shutdown().await;
    });
}
