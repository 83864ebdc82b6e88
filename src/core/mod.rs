//! Runner core: admission, execution and drain waiting.
//!
//! The only public API from this module is [`Runner`] (with its builder and
//! introspection types).
//!
//! Internal modules:
//! - [`counters`]: submitted/completed counts and derived stats;
//! - [`queue`]: FIFO buffer of deferred items;
//! - [`admission`]: run-now vs enqueue decision;
//! - [`engine`]: runs items, records completions, chains queued work;
//! - [`waiter`]: poll or notify based drain detection;
//! - [`runner`]: the facade owning all of the above;
//! - [`builder`]: wires config, callbacks and subscribers.

mod admission;
mod builder;
mod counters;
mod engine;
mod queue;
mod runner;
mod waiter;

pub use builder::RunnerBuilder;
pub use counters::{Stats, Ticket};
pub use runner::{Runner, RunnerState};
