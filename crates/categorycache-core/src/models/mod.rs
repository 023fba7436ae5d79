//! Data models for marketplace categories.
//!
//! Categories are opaque to this crate beyond being JSON values; the
//! accessors on `Category` only help with display.

pub mod category;

pub use category::{CategoriesResponse, Category};
