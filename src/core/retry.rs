//! Bounded retry with a fixed delay.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Evaluate `predicate` until it returns true or `max_attempts` run out.
///
/// Sleeps `delay` between failed attempts, never after the last one, so an
/// exhausted wait sleeps exactly `max_attempts - 1` times.
pub async fn wait_until_ready<F, Fut>(mut predicate: F, max_attempts: u32, delay: Duration) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for attempt in 1..=max_attempts {
        if predicate().await {
            info!(attempt, "Service is ready");
            return true;
        }

        let remaining = max_attempts - attempt;
        if remaining == 0 {
            break;
        }

        info!(
            remaining,
            "Service not ready yet, retrying in {}s",
            delay.as_secs_f64()
        );
        sleep(delay).await;
    }

    warn!(max_attempts, "Service did not become ready");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    const DELAY: Duration = Duration::from_secs(2);

    /// Paused time only moves at sleeps, so elapsed time counts them.
    fn assert_slept(start: Instant, sleeps: u32) {
        let elapsed = start.elapsed();
        assert!(elapsed >= DELAY * sleeps, "slept less than {} times", sleeps);
        assert!(elapsed < DELAY * sleeps + DELAY / 2, "slept more than {} times", sleeps);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_on_first_attempt() {
        let start = Instant::now();
        let mut calls = 0;

        let ready = wait_until_ready(
            || {
                calls += 1;
                async { true }
            },
            5,
            DELAY,
        )
        .await;

        assert!(ready);
        assert_eq!(calls, 1);
        assert_slept(start, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_on_nth_attempt() {
        for n in 1..=4u32 {
            let start = Instant::now();
            let mut calls = 0u32;

            let ready = wait_until_ready(
                || {
                    calls += 1;
                    let ok = calls == n;
                    async move { ok }
                },
                4,
                DELAY,
            )
            .await;

            assert!(ready);
            assert_eq!(calls, n);
            assert_slept(start, n - 1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_sleeps_max_minus_one() {
        let start = Instant::now();
        let mut calls = 0u32;

        let ready = wait_until_ready(
            || {
                calls += 1;
                async { false }
            },
            3,
            DELAY,
        )
        .await;

        assert!(!ready);
        assert_eq!(calls, 3);
        assert_slept(start, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_never_calls() {
        let mut calls = 0u32;

        let ready = wait_until_ready(
            || {
                calls += 1;
                async { true }
            },
            0,
            DELAY,
        )
        .await;

        assert!(!ready);
        assert_eq!(calls, 0);
    }
}
