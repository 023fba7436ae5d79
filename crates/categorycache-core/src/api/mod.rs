//! REST API client module for the marketplace backend.
//!
//! This module provides the `ApiClient` for fetching the category list from
//! `GET /categoria`, the `CategorySource` trait the store fetches through,
//! and the `ApiError` taxonomy used to decide whether a failure is retried.

pub mod client;
pub mod error;

pub use client::{ApiClient, CategorySource};
pub use error::{ApiError, FailureKind};
