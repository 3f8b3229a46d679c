//! HTTP client for the astrology API.

use crate::error::Error;
use crate::types::*;
use reqwest::Client;
use std::time::Duration;
use url::Url;


/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "http://localhost:8080").
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Value sent in the `X-API-Key` header, if any.
    pub api_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(30),
            api_key: None,
        }
    }
}

/// HTTP client for the Astrology API.
#[derive(Debug, Clone)]
pub struct AstrologyClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl AstrologyClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the base URL is malformed or the HTTP client cannot
    /// be built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Url::parse(&config.base_url)?;
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Creates a new client with default configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(ClientConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    /// Returns a copy of this client that sends `api_key`.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Health
    // ========================================================================

    /// Performs a health check.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn health_check(&self) -> Result<HealthResponse, Error> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    /// Fetches the root endpoint, which reports the same status as
    /// [`AstrologyClient::health_check`].
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn root(&self) -> Result<HealthResponse, Error> {
        let url = format!("{}/", self.base_url);
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    // ========================================================================
    // Charts
    // ========================================================================

    /// Casts a birth chart.
    ///
    /// # Errors
    /// Returns error if the request fails or the API rejects it.
    pub async fn birth_chart(&self, request: &BirthRequest) -> Result<NatalChart, Error> {
        let url = format!("{}/birth-chart", self.base_url);
        let resp = self.authorized(self.client.post(&url)).json(request).send().await?;
        self.handle_response(resp).await
    }

    /// Computes transits against a birth chart.
    ///
    /// # Errors
    /// Returns error if the request fails or the API rejects it.
    pub async fn transits(&self, request: &TransitRequest) -> Result<TransitChart, Error> {
        let url = format!("{}/transits", self.base_url);
        let resp = self.authorized(self.client.post(&url)).json(request).send().await?;
        self.handle_response(resp).await
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if status.is_success() {
            Ok(resp.json().await?)
        } else {
            let text = resp.text().await.unwrap_or_default();
            let message = error_message(&text);
            if status.as_u16() == 404 {
                Err(Error::NotFound(message))
            } else {
                Err(Error::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

/// Extracts `detail` from an error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|error| error.detail)
        .unwrap_or_else(|_| body.to_string())
}
