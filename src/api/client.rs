//! PokeAPI HTTP client
//!
//! Fetches location areas and pokemon from PokeAPI. Every request goes through
//! the response cache: the fully-qualified URL is the cache key, cached bodies
//! are decoded without touching the network, and a fresh body is stored only
//! after it decoded successfully.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use super::{LocationArea, LocationAreaPage, Pokemon};
use crate::cache::ExpiringCache;

/// Base URL for the public PokeAPI
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors that can occur when fetching from PokeAPI
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The server answered with an error status
    #[error("HTTP error {status} for {url}")]
    Status { status: u16, url: String },

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Client for fetching PokeAPI resources through a response cache
#[derive(Debug)]
pub struct PokeApiClient {
    http_client: Client,
    cache: ExpiringCache,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl PokeApiClient {
    /// Creates a client for the public PokeAPI that stores responses in `cache`
    pub fn new(cache: ExpiringCache) -> Result<Self, ApiError> {
        Self::with_base_url(cache, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL (mirrors, tests)
    pub fn with_base_url(cache: ExpiringCache, base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http_client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http_client,
            cache,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// The response cache backing this client
    pub fn cache(&self) -> &ExpiringCache {
        &self.cache
    }

    /// The base URL requests are made against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches one page of the location-area listing
    ///
    /// # Arguments
    /// * `cursor` - A `next`/`previous` URL from an earlier page, or `None`
    ///   for the first page
    pub async fn list_location_areas(
        &self,
        cursor: Option<&str>,
    ) -> Result<LocationAreaPage, ApiError> {
        let url = match cursor {
            Some(url) => url.to_string(),
            None => format!("{}/location-area", self.base_url),
        };
        self.get_json(&url).await
    }

    /// Fetches a single location area by name or id
    pub async fn location_area(&self, name: &str) -> Result<LocationArea, ApiError> {
        let url = format!("{}/location-area/{}", self.base_url, name);
        self.get_json(&url).await
    }

    /// Fetches a single pokemon by name or id
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon, ApiError> {
        let url = format!("{}/pokemon/{}", self.base_url, name);
        self.get_json(&url).await
    }

    /// Returns the decoded body for `url`, from the cache when possible
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        if let Some(cached) = self.cache.get_entry(url) {
            debug!(url, cached_at = %cached.cached_at, "Cache hit");
            return Ok(serde_json::from_slice(&cached.data)?);
        }

        debug!(url, "Cache miss, fetching");
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        let decoded = serde_json::from_slice(&body)?;
        self.cache.add(url, body.to_vec());

        Ok(decoded)
    }
}
