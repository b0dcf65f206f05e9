//! Deadline racing for provider and enrichment calls
//!
//! [`TimeoutGuard::race`] returns whichever finishes first: the operation or
//! its deadline. A late operation is not awaited and not cancelled at the
//! deadline; it keeps running detached until the guard that launched it is
//! dropped, which cancels every task the guard still owns.
//!
//! ## Usage
//!
//! ```ignore
//! let guard = TimeoutGuard::new();
//! let result = guard
//!     .race(adapter.invoke(query), Duration::from_secs(6), ProviderResult::timeout(id))
//!     .await;
//! // dropping `guard` at the end of the request cancels any stragglers
//! ```

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Request-scoped deadline racer
///
/// One guard per request. Operations raced through it are spawned as tasks
/// tied to the guard's cancellation token.
#[derive(Debug, Default)]
pub struct TimeoutGuard {
    token: CancellationToken,
}

impl TimeoutGuard {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Race `operation` against `timeout`, substituting `fallback` if the
    /// deadline wins
    ///
    /// Total over `T`: a panicking operation also yields `fallback`.
    pub async fn race<T, F>(&self, operation: F, timeout: Duration, fallback: T) -> T
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let token = self.token.child_token();
        let mut task = tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => None,
                output = operation => Some(output),
            }
        });

        match tokio::time::timeout(timeout, &mut task).await {
            Ok(Ok(Some(output))) => output,
            Ok(Ok(None)) => fallback,
            Ok(Err(join_error)) => {
                warn!(error = %join_error, "Raced operation aborted");
                fallback
            }
            Err(_) => {
                debug!(timeout_ms = timeout.as_millis() as u64, "Deadline elapsed, using fallback");
                fallback
            }
        }
    }

    /// Cancel every operation still running under this guard
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl Drop for TimeoutGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// One-shot race without a surrounding request scope
///
/// The straggler, if any, is cancelled as soon as this call returns.
pub async fn race<T, F>(operation: F, timeout: Duration, fallback: T) -> T
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    TimeoutGuard::new().race(operation, timeout, fallback).await
}
