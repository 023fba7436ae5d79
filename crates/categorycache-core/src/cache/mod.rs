//! Local caching module for offline access to the category list.
//!
//! `KeyValueStore` is the persistent string storage the cache sits on
//! (`FileStore` on disk, `MemoryStore` for ephemeral use). `CategoryCache`
//! reads and writes the category list under its fixed key.

pub mod manager;
pub mod storage;

pub use manager::{CategoryCache, CATEGORIES_CACHE_KEY};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
