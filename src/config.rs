//! # Runner configuration.
//!
//! Provides [`Config`] centralized settings for a [`Runner`](crate::Runner).
//!
//! ## Sentinel values
//! - `max_concurrent = 0` → default cap (10)
//! - `poll_interval = 0s` → default interval (3s)
//! - `bus_capacity = 0` → clamped to 1

use std::time::Duration;

/// Default cap on concurrently running executions.
pub const DEFAULT_MAX_CONCURRENT: usize = 10;

/// Default interval between drain checks in [`DrainMode::Poll`].
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// How [`Runner::wait`](crate::Runner::wait) detects that every item completed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrainMode {
    /// Sleep `poll_interval`, then re-check the counters; repeat until drained.
    ///
    /// Completion is observed up to one interval late.
    #[default]
    Poll,

    /// Wake as soon as the last in-flight item completes.
    Notify,
}

/// Configuration for a runner.
///
/// ## Field semantics
/// - `max_concurrent`: Cap on executions running at once (`0` = default)
/// - `poll_interval`: Sleep between drain checks in poll mode (`0s` = default)
/// - `drain_mode`: Poll (default) or notify based waiting
/// - `bus_capacity`: Event bus ring buffer size (min 1)
///
/// Prefer the accessors over reading fields directly; they resolve the sentinels.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum number of executions in flight.
    pub max_concurrent: usize,

    /// Interval between drain checks when `drain_mode` is [`DrainMode::Poll`].
    pub poll_interval: Duration,

    /// Drain detection strategy.
    pub drain_mode: DrainMode,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` events skip older items.
    pub bus_capacity: usize,
}

impl Config {
    /// Returns the effective concurrency cap (never zero).
    #[inline]
    pub fn concurrency_limit(&self) -> usize {
        if self.max_concurrent == 0 {
            DEFAULT_MAX_CONCURRENT
        } else {
            self.max_concurrent
        }
    }

    /// Returns the effective poll interval (never zero).
    #[inline]
    pub fn poll_interval(&self) -> Duration {
        if self.poll_interval.is_zero() {
            DEFAULT_POLL_INTERVAL
        } else {
            self.poll_interval
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns a config with the given concurrency cap.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    /// Returns a config with the given poll interval.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Returns a config with the given drain mode.
    pub fn with_drain_mode(mut self, drain_mode: DrainMode) -> Self {
        self.drain_mode = drain_mode;
        self
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `max_concurrent = 10`
    /// - `poll_interval = 3s`
    /// - `drain_mode = DrainMode::Poll`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            drain_mode: DrainMode::Poll,
            bus_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sentinels_resolve_to_defaults() {
        let cfg = Config {
            max_concurrent: 0,
            poll_interval: Duration::ZERO,
            drain_mode: DrainMode::Notify,
            bus_capacity: 0,
        };
        assert_eq!(cfg.concurrency_limit(), 10);
        assert_eq!(cfg.poll_interval(), Duration::from_secs(3));
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }

    #[test]
    fn explicit_values_are_kept() {
        let cfg = Config::default()
            .with_max_concurrent(2)
            .with_poll_interval(Duration::from_millis(50))
            .with_drain_mode(DrainMode::Notify);
        assert_eq!(cfg.concurrency_limit(), 2);
        assert_eq!(cfg.poll_interval(), Duration::from_millis(50));
        assert_eq!(cfg.drain_mode, DrainMode::Notify);
    }

    #[test]
    fn defaults_match_documented_values() {
        let cfg = Config::default();
        assert_eq!(cfg.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(cfg.poll_interval, DEFAULT_POLL_INTERVAL);
        assert_eq!(cfg.drain_mode, DrainMode::Poll);
    }
}
