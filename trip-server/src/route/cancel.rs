//! Cancellation of in-flight route requests.
//!
//! A `CancelHandle` is held by whoever owns the request (e.g. a screen the
//! user may navigate away from); the paired `CancelToken` is passed into
//! the pipeline. Cancelling drops every outstanding lookup future.

use tokio::sync::watch;
use tracing::debug;

/// Returned when a request is cancelled before it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("request cancelled")]
pub struct Cancelled;

/// Create a connected handle/token pair.
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

/// Owner side of a cancellation pair.
///
/// Dropping the handle without calling `cancel` leaves the token live
/// forever; it does not cancel.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Cancel every pipeline holding the paired token.
    pub fn cancel(&self) {
        debug!("cancelling route request");
        self.tx.send_replace(true);
    }
}

/// Pipeline side of a cancellation pair. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// A token that is never cancelled.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    /// Completes once the paired handle cancels. Never completes otherwise.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            // Handle dropped without cancelling.
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn cancel_wakes_waiter() {
        let (handle, token) = cancel_pair();
        let waiter = tokio::spawn({
            let token = token.clone();
            async move { token.cancelled().await }
        });
        handle.cancel();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should finish")
            .unwrap();
    }

    #[tokio::test]
    async fn already_cancelled_returns_immediately() {
        let (handle, token) = cancel_pair();
        handle.cancel();
        drop(handle);

        tokio::time::timeout(Duration::from_millis(100), token.cancelled())
            .await
            .expect("cancelled token should complete");
    }

    #[tokio::test]
    async fn never_token_does_not_fire() {
        let token = CancelToken::never();
        let result = tokio::time::timeout(Duration::from_millis(20), token.cancelled()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn dropped_handle_does_not_cancel() {
        let (handle, token) = cancel_pair();
        drop(handle);
        let result = tokio::time::timeout(Duration::from_millis(20), token.cancelled()).await;
        assert!(result.is_err());
    }
}
