use std::sync::{Arc, Weak};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::models::Category;

use super::{CategoriesState, CategoryStore, StoreError};

/// Mounts a `CategoryStore` and defines the scope its state is readable in.
///
/// Mounting starts the initial load in the background. Handles obtained from
/// the provider stop working once it is dropped.
pub struct CategoriesProvider {
    store: Arc<CategoryStore>,
    scope: Arc<()>,
    init_task: Option<JoinHandle<()>>,
}

impl CategoriesProvider {
    /// Mount the store and spawn its initial load. Must be called from
    /// within a tokio runtime.
    pub fn mount(store: CategoryStore) -> Self {
        let store = Arc::new(store);
        store.mark_loading();
        let init_store = Arc::clone(&store);
        let init_task = tokio::spawn(async move {
            init_store.initialize().await;
        });
        debug!("Categories provider mounted");

        Self {
            store,
            scope: Arc::new(()),
            init_task: Some(init_task),
        }
    }

    pub fn handle(&self) -> CategoriesHandle {
        CategoriesHandle {
            store: Arc::clone(&self.store),
            scope: Arc::downgrade(&self.scope),
        }
    }

    /// Wait for the initial load to finish.
    pub async fn initialized(&mut self) {
        if let Some(task) = self.init_task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "Initial category load did not complete");
            }
        }
    }
}

impl Drop for CategoriesProvider {
    fn drop(&mut self) {
        if let Some(task) = self.init_task.take() {
            task.abort();
        }
        debug!("Categories provider unmounted");
    }
}

/// Read access to the category state from inside a provider's scope.
#[derive(Clone)]
pub struct CategoriesHandle {
    store: Arc<CategoryStore>,
    scope: Weak<()>,
}

impl CategoriesHandle {
    fn store(&self) -> Result<&CategoryStore, StoreError> {
        if self.scope.strong_count() == 0 {
            return Err(StoreError::OutOfScope);
        }
        Ok(&self.store)
    }

    pub fn state(&self) -> Result<CategoriesState, StoreError> {
        Ok(self.store()?.state())
    }

    pub fn categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.state()?.categories)
    }

    pub fn subscribe(&self) -> Result<watch::Receiver<CategoriesState>, StoreError> {
        Ok(self.store()?.subscribe())
    }

    /// Manually re-fetch the list, returning it or the failure.
    pub async fn refresh_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.store()?.refresh().await
    }
}

// ============================================================================
// Tests
// ============================================================================
