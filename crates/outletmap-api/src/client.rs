//! HTTP client for the outlet backend.
//!
//! Wraps `reqwest` with typed response deserialization for the two endpoints
//! the viewer consumes. Requests are single-shot: a failure is returned to
//! the caller as-is and never retried.

use std::time::Duration;

use outletmap_core::{AppConfig, RawOutlet, SearchResponse};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Client for the outlet listing and search endpoints.
///
/// Use [`OutletApiClient::from_config`] in the binary or
/// [`OutletApiClient::new`] to point at a mock server in tests.
pub struct OutletApiClient {
    client: Client,
    base_url: Url,
    outlets_path: String,
}

impl OutletApiClient {
    /// Creates a client for the backend rooted at `base_url`.
    ///
    /// `outlets_path` is the listing endpoint's path relative to the base
    /// (`"outlets"` by default; older deployments serve `"kl-outlets"`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn new(
        base_url: &str,
        outlets_path: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Trailing slash so `Url::join` appends to the base path instead of
        // replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            outlets_path: outlets_path.trim_matches('/').to_owned(),
        })
    }

    /// Creates a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// See [`OutletApiClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(
            &config.api_base_url,
            &config.outlets_path,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Fetches every outlet from the listing endpoint.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or timeout.
    /// - [`ApiError::UnexpectedStatus`] on a non-2xx status.
    /// - [`ApiError::Deserialize`] if the body is not an array of outlets.
    pub async fn fetch_outlets(&self) -> Result<Vec<RawOutlet>, ApiError> {
        let url = self.endpoint_url(&self.outlets_path, None)?;
        let outlets: Vec<RawOutlet> = self.get_json(&url, "outlet listing").await?;
        tracing::info!(count = outlets.len(), "fetched outlets");
        Ok(outlets)
    }

    /// Runs a free-text search. An empty `query` is sent as-is.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or timeout.
    /// - [`ApiError::UnexpectedStatus`] on a non-2xx status.
    /// - [`ApiError::Deserialize`] if the body is not a search response.
    pub async fn search(&self, query: &str) -> Result<SearchResponse, ApiError> {
        let url = self.endpoint_url("search", Some(query))?;
        let response: SearchResponse = self
            .get_json(&url, &format!("search(query={query})"))
            .await?;
        tracing::info!(
            query,
            kind = %response.kind,
            count = response.data.len(),
            "search completed"
        );
        Ok(response)
    }

    /// Builds an endpoint URL under the base, with the `query` parameter
    /// percent-encoded when present.
    fn endpoint_url(&self, path: &str, query: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })?;
        if let Some(q) = query {
            url.query_pairs_mut().append_pair("query", q);
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx status, and deserializes the body.
    async fn get_json<T: DeserializeOwned>(&self, url: &Url, context: &str) -> Result<T, ApiError> {
        tracing::debug!(url = %url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
