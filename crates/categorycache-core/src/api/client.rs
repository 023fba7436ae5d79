//! API client for the marketplace category endpoint.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::debug;

use crate::models::{CategoriesResponse, Category};

use super::ApiError;

/// Path of the category listing endpoint, relative to the API base URL.
const CATEGORIES_PATH: &str = "categoria";

/// Anything the store can fetch the authoritative category list from.
#[async_trait]
pub trait CategorySource: Send + Sync {
    /// Fetch the full category list, giving up after `timeout`.
    async fn fetch_categories(&self, timeout: Duration) -> Result<Vec<Category>, ApiError>;
}

/// API client for the marketplace backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client for the given base URL (e.g. `https://host/api`).
    ///
    /// No client-wide timeout is set; every request carries its own.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Create a client around an already configured reqwest client, sharing
    /// its connection pool.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn categories_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), CATEGORIES_PATH)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(
        response: reqwest::Response,
        timeout: Duration,
    ) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| ApiError::from_reqwest(e, timeout))?;
            debug!(%status, body = %ApiError::truncate_body(&body), "Category request rejected");
            Err(ApiError::from_status(status, &body))
        }
    }
}

#[async_trait]
impl CategorySource for ApiClient {
    async fn fetch_categories(&self, timeout: Duration) -> Result<Vec<Category>, ApiError> {
        let url = self.categories_url();
        debug!(url = %url, timeout_ms = timeout.as_millis() as u64, "Fetching categories");

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, timeout))?;

        let response = Self::check_response(response, timeout).await?;

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::from_reqwest(e, timeout))?;
        let parsed: CategoriesResponse = serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("categories body: {}", e)))?;

        Ok(parsed.into_categories())
    }
}

// ============================================================================
// Tests
// ============================================================================
