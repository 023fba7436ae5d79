//! Category state store.
//!
//! `CategoryStore` owns the published `CategoriesState`, runs the initial
//! cache-then-network sequence with bounded retries, and performs manual
//! refreshes. `CategoriesProvider` scopes a store and hands out
//! `CategoriesHandle`s, which are the only way UI code reads the state.

pub mod category_store;
pub mod error;
pub mod provider;
pub mod retry;
pub mod state;

pub use category_store::CategoryStore;
pub use error::StoreError;
pub use provider::{CategoriesHandle, CategoriesProvider};
pub use retry::RetryPolicy;
pub use state::CategoriesState;
