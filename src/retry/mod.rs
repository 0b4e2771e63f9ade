// ABOUTME: Bounded fixed-interval polling primitive.
// ABOUTME: Retries an async check until it reports ready or attempts run out.

use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// How often and how many times a poll loop runs before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RetryPolicy {
    #[serde(with = "humantime_serde")]
    pub sleep_interval: Duration,
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub const fn new(sleep_interval: Duration, max_attempts: u32) -> Self {
        Self {
            sleep_interval,
            max_attempts,
        }
    }
}

/// Result of one poll attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// The awaited condition holds; the loop stops and yields the value.
    Ready(T),
    /// Not yet; sleep and try again.
    Pending,
}

/// Errors from [`poll_until`].
#[derive(Debug, Error)]
pub enum PollError<E>
where
    E: std::error::Error,
{
    /// The attempt budget ran out without the condition being satisfied.
    #[error("gave up waiting for {what} after {attempts} attempts")]
    Exhausted { what: String, attempts: u32 },

    /// The check itself failed. Checks that want to keep polling through
    /// a failure must map it to `Pending` themselves; anything returned
    /// as `Err` stops the loop immediately.
    #[error(transparent)]
    Check(#[from] E),
}

/// Run `check` until it yields [`PollOutcome::Ready`], sleeping
/// `policy.sleep_interval` between attempts, at most `policy.max_attempts`
/// times. Fixed interval, no backoff, no jitter; no sleep after the final
/// attempt. `what` names the wait in the exhaustion error.
///
/// The check receives the 1-based attempt number, mainly for logging.
pub async fn poll_until<T, E, F, Fut>(
    what: &str,
    policy: RetryPolicy,
    mut check: F,
) -> Result<T, PollError<E>>
where
    E: std::error::Error,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<PollOutcome<T>, E>>,
{
    for attempt in 1..=policy.max_attempts {
        match check(attempt).await? {
            PollOutcome::Ready(value) => {
                tracing::debug!(what, attempt, "condition satisfied");
                return Ok(value);
            }
            PollOutcome::Pending => {
                tracing::trace!(what, attempt, max = policy.max_attempts, "not ready yet");
            }
        }
        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.sleep_interval).await;
        }
    }

    Err(PollError::Exhausted {
        what: what.to_string(),
        attempts: policy.max_attempts,
    })
}
