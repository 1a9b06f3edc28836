//! HTTP client for the option chain API.

use crate::error::Error;
use crate::types::*;
use reqwest::Client;
use std::time::Duration;
use url::Url;


/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "http://localhost:8080").
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the Nifty Option Chain API.
#[derive(Debug, Clone)]
pub struct NiftyClient {
    client: Client,
    base_url: Url,
}

impl NiftyClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be
    /// built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidRequest(format!(
                "base URL cannot hold a path: {}",
                config.base_url
            )));
        }
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, base_url })
    }

    /// Creates a new client with default configuration.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be
    /// built.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(ClientConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    // ========================================================================
    // Health
    // ========================================================================

    /// Performs a health check.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn health_check(&self) -> Result<HealthResponse, Error> {
        self.get(&self.endpoint(&["health"])).await
    }

    // ========================================================================
    // Option Chain
    // ========================================================================

    /// Gets today's calls and puts.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn refresh(
        &self,
        sort_by: &str,
        order: Option<SortOrder>,
    ) -> Result<RefreshResponse, Error> {
        self.get(&self.sorted_endpoint("refresh", sort_by, order))
            .await
    }

    /// Gets the compartment analysis for today.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn refresh_analysis(
        &self,
        sort_by: &str,
        order: Option<SortOrder>,
    ) -> Result<AnalysisResponse, Error> {
        self.get(&self.sorted_endpoint("refreshAnalysis", sort_by, order))
            .await
    }

    // ========================================================================
    // Indexes
    // ========================================================================

    /// Gets today's index price series.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn refresh_indexes(&self) -> Result<IndexesResponse, Error> {
        self.get(&self.endpoint(&["nifty", "refreshIndexes"])).await
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// URL of `segments` below the base URL. Segments are percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) fn sorted_endpoint(
        &self,
        action: &str,
        sort_by: &str,
        order: Option<SortOrder>,
    ) -> Url {
        match order {
            Some(order) => self.endpoint(&["nifty", action, sort_by, order.as_str()]),
            None => self.endpoint(&["nifty", action, sort_by]),
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &Url) -> Result<T, Error> {
        let resp = self.client.get(url.clone()).send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if status.is_success() {
            Ok(resp.json().await?)
        } else if status.as_u16() == 404 {
            let text = resp.text().await.unwrap_or_default();
            Err(Error::NotFound(text))
        } else {
            let text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|body| body.error)
                .unwrap_or(text);
            if status.as_u16() == 400 {
                Err(Error::InvalidRequest(message))
            } else {
                Err(Error::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}
