use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

use crate::api::{ApiError, CategorySource};
use crate::cache::CategoryCache;
use crate::models::Category;

use super::{CategoriesState, RetryPolicy, StoreError};

/// Published when a manual refresh fails without a server message.
const REFRESH_FAILED_MESSAGE: &str = "Failed to refresh categories";

/// How a failed initial load ended.
struct RetryFailure {
    attempts: u32,
    last: Option<ApiError>,
}

impl RetryFailure {
    /// Server message if there is one, otherwise a generic message naming
    /// the configured attempt count.
    fn message(&self, max_attempts: usize) -> String {
        self.last
            .as_ref()
            .and_then(ApiError::server_message)
            .map(str::to_string)
            .unwrap_or_else(|| {
                format!("Failed to load categories after {} attempt(s)", max_attempts)
            })
    }
}

/// Clears `loading` when dropped, so an abandoned fetch never leaves it set.
struct LoadingGuard<'a> {
    state_tx: &'a watch::Sender<CategoriesState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state_tx.send_modify(|state| state.loading = false);
    }
}

/// Owner of the category list, its cache, and the loading/error status.
///
/// At most one fetch sequence runs at a time; a second one is turned away
/// instead of racing the first on the shared state.
pub struct CategoryStore {
    source: Arc<dyn CategorySource>,
    cache: CategoryCache,
    policy: RetryPolicy,
    state_tx: watch::Sender<CategoriesState>,
    in_flight: Mutex<()>,
}

impl CategoryStore {
    pub fn new(source: Arc<dyn CategorySource>, cache: CategoryCache, policy: RetryPolicy) -> Self {
        let (state_tx, _) = watch::channel(CategoriesState::default());
        Self {
            source,
            cache,
            policy,
            state_tx,
            in_flight: Mutex::new(()),
        }
    }

    /// Current state snapshot.
    pub(crate) fn state(&self) -> CategoriesState {
        self.state_tx.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub(crate) fn subscribe(&self) -> watch::Receiver<CategoriesState> {
        self.state_tx.subscribe()
    }

    /// Flag a fetch sequence as pending before it gets to run.
    pub(crate) fn mark_loading(&self) {
        self.publish(|state| state.loading = true);
    }

    fn publish(&self, update: impl FnOnce(&mut CategoriesState)) {
        self.state_tx.send_modify(update);
    }

    /// Initial load: publish the cached list, then fetch with retries.
    ///
    /// Fetch failures end up in `state.error`; nothing is returned to the
    /// caller.
    pub async fn initialize(&self) {
        let Ok(_flight) = self.in_flight.try_lock() else {
            warn!("Category fetch already in progress, skipping initial load");
            return;
        };

        self.publish(|state| {
            state.loading = true;
            state.error = None;
        });
        let _loading = LoadingGuard {
            state_tx: &self.state_tx,
        };

        let had_cache = self.publish_cached();

        match self.fetch_with_retry().await {
            Ok(categories) => self.apply_fetched(&categories),
            Err(failure) => {
                let message = failure.message(self.policy.max_attempts());
                match &failure.last {
                    Some(last) => {
                        error!(attempts = failure.attempts, error = %last, "Failed to load categories")
                    }
                    None => error!("No category fetch attempts configured"),
                }
                self.publish(|state| {
                    state.error = Some(message);
                    if !had_cache {
                        state.categories.clear();
                    }
                });
            }
        }
    }

    /// Single fetch with the refresh timeout.
    ///
    /// The error is published and also returned so the caller can react.
    pub async fn refresh(&self) -> Result<Vec<Category>, StoreError> {
        let _flight = self
            .in_flight
            .try_lock()
            .map_err(|_| StoreError::FetchInFlight)?;

        self.publish(|state| state.loading = true);
        let _loading = LoadingGuard {
            state_tx: &self.state_tx,
        };

        let timeout = self.policy.refresh_timeout;
        match self.source.fetch_categories(timeout).await {
            Ok(categories) => {
                self.apply_fetched(&categories);
                Ok(categories)
            }
            Err(err) => {
                warn!(timeout_ms = timeout.as_millis() as u64, error = %err, "Category refresh failed");
                let message = err
                    .server_message()
                    .unwrap_or(REFRESH_FAILED_MESSAGE)
                    .to_string();
                self.publish(|state| state.error = Some(message));
                Err(err.into())
            }
        }
    }

    /// Publish the cached list if there is a readable one.
    fn publish_cached(&self) -> bool {
        match self.cache.load() {
            Ok(Some(categories)) => {
                debug!(count = categories.len(), "Publishing cached categories");
                self.publish(|state| state.categories = categories);
                true
            }
            Ok(None) => false,
            Err(e) => {
                debug!(error = %e, "Ignoring unreadable category cache");
                false
            }
        }
    }

    async fn fetch_with_retry(&self) -> Result<Vec<Category>, RetryFailure> {
        let max_attempts = self.policy.max_attempts();
        let mut failure = RetryFailure {
            attempts: 0,
            last: None,
        };

        for (index, timeout) in self.policy.attempt_timeouts.iter().enumerate() {
            let attempt = index as u32 + 1;
            match self.source.fetch_categories(*timeout).await {
                Ok(categories) => {
                    if attempt > 1 {
                        info!(attempt, "Categories loaded after retrying");
                    }
                    return Ok(categories);
                }
                Err(err) => {
                    warn!(
                        attempt,
                        max_attempts,
                        timeout_ms = timeout.as_millis() as u64,
                        error = %err,
                        "Category fetch attempt failed"
                    );
                    let retry = (attempt as usize) < max_attempts && err.is_retryable();
                    failure = RetryFailure {
                        attempts: attempt,
                        last: Some(err),
                    };
                    if !retry {
                        break;
                    }

                    let backoff = self.policy.backoff_after(attempt);
                    debug!(attempt, backoff_ms = backoff.as_millis() as u64, "Backing off");
                    tokio::time::sleep(backoff).await;
                }
            }
        }

        Err(failure)
    }

    /// Publish a freshly fetched list and write it through to the cache.
    fn apply_fetched(&self, categories: &[Category]) {
        info!(count = categories.len(), "Categories fetched");
        if let Err(e) = self.cache.save(categories) {
            warn!(error = %e, "Failed to cache categories");
        }
        self.publish(|state| {
            state.categories = categories.to_vec();
            state.error = None;
            state.fetched_at = Some(Utc::now());
        });
    }
}

// ============================================================================
// Tests
// ============================================================================
