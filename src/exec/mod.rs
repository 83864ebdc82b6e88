//! # Caller-supplied callbacks.
//!
//! This module provides the two seams a caller plugs into a runner:
//! - [`Execute`] - the async operation run against each submitted item
//! - [`ExecFn`] - closure-backed [`Execute`] implementation
//! - [`HandleError`] - optional async sink for failed executions
//! - [`ErrorFn`] - closure-backed [`HandleError`] implementation

mod execute;
mod handler;

pub use execute::{ExecFn, ExecRef, Execute};
pub use handler::{ErrorFn, ErrorHandlerRef, HandleError};
