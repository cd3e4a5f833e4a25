use std::sync::Arc;

use tokio::sync::{Semaphore, SemaphorePermit};

pub const DEFAULT_CONCURRENCY_LIMIT: usize = 5;

/// Caps the number of subtree fetches in flight. Waiters are admitted in FIFO
/// order and released one-for-one as permits drop.
///
/// Each build makes its own limiter unless one is passed in through
/// [`super::BuildOptions::limiter`]; cloning shares the same permits.
#[derive(Clone, Debug)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    limit: usize,
}

impl ConcurrencyLimiter {
    /// A limit of 0 is treated as 1.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Wait for a slot. The semaphore is never closed, so `None` does not
    /// occur in practice; callers proceed unthrottled if it does.
    pub(crate) async fn admit(&self) -> Option<SemaphorePermit<'_>> {
        self.semaphore.acquire().await.ok()
    }
}

impl Default for ConcurrencyLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY_LIMIT)
    }
}
