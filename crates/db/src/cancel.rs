//! Cancellation for in-flight queries.

use std::future::Future;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("operation cancelled")]
pub struct Cancelled;

/// Drive `fut` to completion unless `cancel` fires first, in which case the
/// future is dropped (aborting the query) and `Cancelled` is returned.
pub async fn cancellable<F>(cancel: &CancellationToken, fut: F) -> Result<F::Output, Cancelled>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Cancelled),
        out = fut => Ok(out),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn completes_when_not_cancelled() {
        let cancel = CancellationToken::new();
        assert_eq!(cancellable(&cancel, async { 7 }).await, Ok(7));
    }

    #[tokio::test]
    async fn already_cancelled_token_short_circuits() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert_eq!(cancellable(&cancel, async { 7 }).await, Err(Cancelled));
    }

    #[tokio::test]
    async fn cancelling_mid_flight_aborts_the_future() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });
        let result = cancellable(&cancel, tokio::time::sleep(Duration::from_secs(30))).await;
        assert_eq!(result, Err(Cancelled));
    }
}
