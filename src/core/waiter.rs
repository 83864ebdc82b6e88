//! # Completion waiter.
//!
//! Blocks the caller until `completed == submitted`, then reports the time
//! elapsed since the first submission.
//!
//! ## Modes
//! - [`DrainMode::Poll`]: `do { sleep(poll_interval) } while in_progress`.
//!   A real timer sleep; completion is observed up to one interval late.
//! - [`DrainMode::Notify`]: parks on the engine's drain notification and
//!   re-checks the counters on every wake-up.
//!
//! A runner that never received a submission is reported drained at once
//! with `Duration::ZERO`.

use std::time::Duration;

use tokio::time;

use crate::config::DrainMode;

use super::runner::Shared;

pub(super) async fn wait_drained<T: Send + 'static>(shared: &Shared<T>) -> Duration {
    if shared.elapsed().is_none() {
        return Duration::ZERO;
    }

    match shared.cfg.drain_mode {
        DrainMode::Poll => poll(shared).await,
        DrainMode::Notify => notified(shared).await,
    }

    shared.elapsed().unwrap_or(Duration::ZERO)
}

async fn poll<T: Send + 'static>(shared: &Shared<T>) {
    let interval = shared.cfg.poll_interval();
    loop {
        time::sleep(interval).await;
        if !shared.is_in_progress() {
            break;
        }
    }
}

async fn notified<T: Send + 'static>(shared: &Shared<T>) {
    loop {
        let notified = shared.drained.notified();
        tokio::pin!(notified);
        // Register before checking so a completion in between is not missed.
        notified.as_mut().enable();

        if !shared.is_in_progress() {
            return;
        }
        notified.await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::{self, Instant};

    use crate::{Config, DrainMode, ExecFn, Runner};

    fn runner(mode: DrainMode) -> Runner<Duration> {
        Runner::new(
            ExecFn::arc(|d: Duration| async move {
                time::sleep(d).await;
                Ok::<_, anyhow::Error>(())
            }),
            Config::default()
                .with_max_concurrent(2)
                .with_poll_interval(Duration::from_millis(100))
                .with_drain_mode(mode),
        )
        .expect("runtime")
    }

    #[tokio::test(start_paused = true)]
    async fn poll_mode_observes_on_interval_boundaries() {
        let runner = runner(DrainMode::Poll);
        runner.submit(Duration::from_millis(250));

        let elapsed = runner.wait().await;
        assert_eq!(elapsed, Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn poll_mode_sleeps_at_least_once() {
        let runner = runner(DrainMode::Poll);
        runner.submit(Duration::ZERO);

        let before = Instant::now();
        runner.wait().await;
        assert_eq!(before.elapsed(), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn notify_mode_wakes_on_last_completion() {
        let runner = runner(DrainMode::Notify);
        runner.submit(Duration::from_millis(250));
        runner.submit(Duration::from_millis(120));
        runner.submit(Duration::from_millis(50));

        // Third item queues behind the 120ms one: done at 170ms; first at 250ms.
        let elapsed = runner.wait().await;
        assert_eq!(elapsed, Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn notify_mode_returns_at_once_when_already_drained() {
        let runner = runner(DrainMode::Notify);
        runner.submit(Duration::from_millis(10));
        time::sleep(Duration::from_millis(50)).await;

        let before = Instant::now();
        let elapsed = runner.wait().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
        assert_eq!(elapsed, Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn idle_runner_returns_zero_in_both_modes() {
        for mode in [DrainMode::Poll, DrainMode::Notify] {
            let runner = runner(mode);
            let before = Instant::now();
            assert_eq!(runner.wait().await, Duration::ZERO);
            assert_eq!(before.elapsed(), Duration::ZERO);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_waiters_all_return() {
        let runner = runner(DrainMode::Notify);
        runner.submit(Duration::from_millis(30));

        let other = runner.clone();
        let (a, b) = tokio::join!(runner.wait(), other.wait());
        assert_eq!(a, Duration::from_millis(30));
        assert_eq!(b, Duration::from_millis(30));
    }
}
