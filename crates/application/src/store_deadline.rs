use std::future::Future;
use std::time::Duration;

use gestorq_core::{AppError, AppResult};

/// Default upper bound for one call to the external record store.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout policy applied to every call into the external record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreDeadline {
    timeout: Duration,
}

impl StoreDeadline {
    /// Creates a policy bounding each store call by `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout: timeout.max(Duration::from_millis(1)),
        }
    }

    /// Returns the configured bound.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs `call`, failing with [`AppError::Timeout`] if it does not finish in time.
    pub async fn run<T, F>(&self, operation: &str, call: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| {
                AppError::Timeout(format!(
                    "{operation} did not complete within {} ms",
                    self.timeout.as_millis()
                ))
            })?
    }
}

impl Default for StoreDeadline {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_TIMEOUT)
    }
}
