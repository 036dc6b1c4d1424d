//! Bounded retry with exponential backoff for store writes.
//!
//! Only [`OrderError::Conflict`] and [`OrderError::PersistenceUnavailable`] are retried.
//! Validation and transition failures are returned on the first attempt. Each sleep is drawn
//! from the upper half of the backoff window so writers that lost the same race spread out.

use crate::config::RetryConfig;
use crate::order_actor::OrderError;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub backoff_multiplier: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_delay_ms: config.initial_delay_ms,
            backoff_multiplier: config.backoff_multiplier,
            max_delay_ms: config.max_delay_ms,
        }
    }
}

impl RetryPolicy {
    /// Delay before the retry that follows failed attempt number `attempt` (1-based).
    pub fn delay_ms(&self, attempt: u32) -> u64 {
        let mut delay = self.initial_delay_ms;
        for _ in 1..attempt {
            delay = delay.saturating_mul(self.backoff_multiplier);
        }
        delay.min(self.max_delay_ms)
    }

    /// `delay_ms(attempt)` with jitter, uniform in `[delay / 2, delay]`.
    pub fn jittered_delay_ms(&self, attempt: u32) -> u64 {
        let delay = self.delay_ms(attempt);
        if delay < 2 {
            return delay;
        }
        rand::thread_rng().gen_range(delay / 2..=delay)
    }

    /// Runs `op` until it succeeds, fails with a non-retryable error, or attempts run out.
    ///
    /// `op` receives the 1-based attempt number and must re-read whatever it depends on, since
    /// a conflict means its previous snapshot is stale.
    pub async fn run<T, F, Fut>(&self, operation: &'static str, mut op: F) -> Result<T, OrderError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, OrderError>>,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.max_attempts => {
                    let delay_ms = self.jittered_delay_ms(attempt);
                    warn!(
                        operation,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms,
                        "Attempt failed, retrying: {e}"
                    );
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::TransitionError;
    use crate::model::CookStatus;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            initial_delay_ms: 1,
            backoff_multiplier: 2,
            max_delay_ms: 5,
        }
    }

    fn conflict() -> OrderError {
        OrderError::Conflict {
            id: "order_1".into(),
            expected: 1,
            actual: 2,
        }
    }

    #[test]
    fn delay_grows_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 10,
            initial_delay_ms: 10,
            backoff_multiplier: 2,
            max_delay_ms: 50,
        };
        assert_eq!(policy.delay_ms(1), 10);
        assert_eq!(policy.delay_ms(2), 20);
        assert_eq!(policy.delay_ms(3), 40);
        assert_eq!(policy.delay_ms(4), 50);
        assert_eq!(policy.delay_ms(30), 50);
    }

    #[test]
    fn jitter_stays_in_upper_half_of_window() {
        let policy = RetryPolicy {
            max_attempts: 10,
            initial_delay_ms: 40,
            backoff_multiplier: 2,
            max_delay_ms: 100,
        };
        for attempt in 1..=4 {
            let ceiling = policy.delay_ms(attempt);
            for _ in 0..50 {
                let delay = policy.jittered_delay_ms(attempt);
                assert!(delay >= ceiling / 2 && delay <= ceiling, "{delay} outside {ceiling}");
            }
        }
        assert_eq!(fast().jittered_delay_ms(1), 1);
    }

    #[tokio::test]
    async fn retries_conflicts_until_success() {
        let calls = AtomicU32::new(0);
        let result = fast()
            .run("test", |attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt < 3 {
                        Err(conflict())
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;
        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = fast()
            .run("test", |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(OrderError::PersistenceUnavailable("down".into())) }
            })
            .await;
        assert!(matches!(result, Err(OrderError::PersistenceUnavailable(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn transition_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = fast()
            .run("test", |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(OrderError::InvalidTransition(TransitionError::Cook {
                        from: CookStatus::Pending,
                        to: CookStatus::Completed,
                    }))
                }
            })
            .await;
        assert!(matches!(result, Err(OrderError::InvalidTransition(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
