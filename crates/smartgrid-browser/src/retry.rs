//! Backoff retry for the HTTP gateway adapter.
//!
//! Only the transport retries, and only when configured to: the browser core
//! itself never re-issues a request. A 429 is retried no sooner than the
//! shop's `Retry-After`; timeouts, connect failures and 5xx responses are
//! retried on the plain backoff schedule. Everything else is propagated on
//! the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::GatewayError;

/// Upper bound for the exponential part of the schedule. A server-supplied
/// `Retry-After` is honoured even when it is longer.
const MAX_BACKOFF_SECS: u64 = 60;

/// Returns `true` if `err` is a transient condition worth retrying.
///
/// Not retried: auth failures, 4xx other than 429, unparseable bodies, a bad
/// endpoint, and adapter-reported transport failures.
pub(crate) fn is_retriable(err: &GatewayError) -> bool {
    match err {
        GatewayError::Throttled { .. } => true,
        GatewayError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        GatewayError::UnexpectedStatus { status, .. } => *status >= 500,
        GatewayError::Unauthorized { .. }
        | GatewayError::Deserialize { .. }
        | GatewayError::InvalidEndpoint { .. }
        | GatewayError::Transport(_) => false,
    }
}

/// Wait before retry number `retry` (0-based) after `err`.
///
/// `backoff_base_secs * 2^retry`, capped at [`MAX_BACKOFF_SECS`], and never
/// shorter than the `Retry-After` of a throttled response.
pub(crate) fn retry_delay(err: &GatewayError, retry: u32, backoff_base_secs: u64) -> Duration {
    let backoff = 2u64
        .checked_pow(retry)
        .map_or(u64::MAX, |factor| backoff_base_secs.saturating_mul(factor))
        .min(MAX_BACKOFF_SECS);
    let secs = match err {
        GatewayError::Throttled {
            retry_after_secs, ..
        } => backoff.max(*retry_after_secs),
        _ => backoff,
    };
    Duration::from_secs(secs)
}

/// Executes `operation`, retrying transient errors up to `max_retries` times.
///
/// With `max_retries = 0` the operation runs exactly once.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, GatewayError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GatewayError>>,
{
    for retry in 0..max_retries {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if is_retriable(&err) => {
                let delay = retry_delay(&err, retry, backoff_base_secs);
                tracing::warn!(
                    retry = retry + 1,
                    max_retries,
                    delay_secs = delay.as_secs(),
                    error = %err,
                    "transient gateway error, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
    operation().await
}
