use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::Category;

use super::KeyValueStore;

/// Storage key the category list is cached under.
pub const CATEGORIES_CACHE_KEY: &str = "marketplace_categories";

/// Placeholder older web clients wrote when they had nothing to cache.
const UNDEFINED_SENTINEL: &str = "undefined";

/// Read-through copy of the category list in local storage.
#[derive(Clone)]
pub struct CategoryCache {
    storage: Arc<dyn KeyValueStore>,
}

impl CategoryCache {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Load the cached list.
    ///
    /// `Ok(None)` when nothing usable is stored, `Err` when the entry exists
    /// but is not a JSON array of categories.
    pub fn load(&self) -> Result<Option<Vec<Category>>> {
        let raw = match self.storage.get(CATEGORIES_CACHE_KEY)? {
            Some(raw) => raw,
            None => return Ok(None),
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == UNDEFINED_SENTINEL {
            return Ok(None);
        }

        let categories: Vec<Category> = serde_json::from_str(trimmed)
            .with_context(|| format!("Failed to parse cache entry: {}", CATEGORIES_CACHE_KEY))?;
        debug!(count = categories.len(), "Loaded categories from cache");
        Ok(Some(categories))
    }

    /// Overwrite the cached list.
    pub fn save(&self, categories: &[Category]) -> Result<()> {
        let contents = serde_json::to_string(categories)?;
        self.storage.set(CATEGORIES_CACHE_KEY, &contents)?;
        debug!(count = categories.len(), "Saved categories to cache");
        Ok(())
    }

    /// Raw stored value, for diagnostics.
    pub fn raw(&self) -> Result<Option<String>> {
        self.storage.get(CATEGORIES_CACHE_KEY)
    }
}

// ============================================================================
// Tests
// ============================================================================
