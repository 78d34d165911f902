use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

/// Token handed out for each issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Freshness and lifetime bookkeeping shared by every fetch of one hook instance.
///
/// Only the most recently issued ticket may apply its result, and nothing may be
/// applied once the owner has been torn down.
#[derive(Debug, Clone, Default)]
pub struct RequestGuard {
    latest: Arc<AtomicU64>,
    lifetime: CancellationToken,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        !self.lifetime.is_cancelled() && self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Awaits `fut` unless the owner goes away first, in which case `None`.
    pub async fn run<F>(&self, fut: F) -> Option<F::Output>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            _ = self.lifetime.cancelled() => None,
            out = fut => Some(out),
        }
    }

    pub fn teardown(&self) {
        self.lifetime.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.lifetime.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let guard = RequestGuard::new();

        let first = guard.issue();
        let second = guard.issue();

        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn test_teardown_invalidates_latest_ticket() {
        let guard = RequestGuard::new();
        let ticket = guard.issue();

        guard.teardown();

        assert!(guard.is_torn_down());
        assert!(!guard.is_current(ticket));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_waiting_after_teardown() {
        let guard = RequestGuard::new();
        let remote = guard.clone();

        let handle = tokio::spawn(async move {
            remote
                .run(async {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    42
                })
                .await
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        guard.teardown();

        assert_eq!(handle.await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_run_returns_output_while_alive() {
        let guard = RequestGuard::new();
        assert_eq!(guard.run(async { 7 }).await, Some(7));
    }
}
