//! Core library for categorycache.
//!
//! Loads the marketplace category list from the remote API, keeps a
//! read-through copy in local storage, and exposes it with loading/error
//! status to UI code through a scoped provider.

pub mod api;
pub mod cache;
pub mod config;
pub mod models;
pub mod store;

pub use api::{ApiClient, ApiError, CategorySource, FailureKind};
pub use cache::{CategoryCache, FileStore, KeyValueStore, MemoryStore};
pub use config::Config;
pub use models::Category;
pub use store::{
    CategoriesHandle, CategoriesProvider, CategoriesState, CategoryStore, RetryPolicy, StoreError,
};

#[cfg(test)]
pub(crate) mod testing;
