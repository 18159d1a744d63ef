use crate::transport::error::TransportError;
use crate::transport::{DEFAULT_RETRY_LIMIT, DEFAULT_TIMEOUT, RETRY_BASE_DELAY};
use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Error body the provider sends with 4xx responses.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    reason: String,
}

/// A reusable HTTP client bound to one base URL.
///
/// Holds a single `reqwest::Client`, so connections are pooled across every
/// call made through the same transport. Cloning is cheap and shares the pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
    retry_limit: u32,
}

impl HttpTransport {
    /// Creates a transport for `base_url`.
    ///
    /// When `client` is `None`, a new client with gzip support is built.
    pub fn new(
        base_url: String,
        timeout: Option<Duration>,
        retry_limit: Option<u32>,
        client: Option<Client>,
    ) -> Result<Self, TransportError> {
        let client = match client {
            Some(client) => client,
            None => Client::builder()
                .gzip(true)
                .build()
                .map_err(TransportError::ClientBuild)?,
        };
        Ok(HttpTransport {
            client,
            base_url,
            timeout: timeout.unwrap_or(DEFAULT_TIMEOUT),
            retry_limit: retry_limit.unwrap_or(DEFAULT_RETRY_LIMIT),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GETs `path` below the base URL and decodes the body as JSON.
    ///
    /// Timeouts, connection errors and the statuses 408, 413, 429, 500, 502,
    /// 503 and 504 are retried up to the retry limit with exponential backoff.
    /// Any other failure is returned immediately.
    pub async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, TransportError> {
        let url = format!("{}/{}", self.base_url, path);
        let mut attempt: u32 = 0;
        loop {
            match self.try_get(&url, query).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < self.retry_limit && e.is_transient() => {
                    let delay = RETRY_BASE_DELAY * 2u32.pow(attempt);
                    attempt += 1;
                    warn!(
                        "Attempt {} for {} failed ({}); retrying in {:?}",
                        attempt, url, e, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn try_get(&self, url: &str, query: &[(&str, String)]) -> Result<Value, TransportError> {
        debug!("Requesting {}", url);
        let response = self
            .client
            .get(url)
            .query(query)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| TransportError::NetworkRequest(url.to_string(), e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<ProviderErrorBody>(&body)
                .ok()
                .map(|b| b.reason);
            warn!("HTTP {} for {}: {:?}", status, url, reason);
            return Err(TransportError::HttpStatus {
                url: url.to_string(),
                status,
                body,
                reason,
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::Decode(url.to_string(), e.without_url()))?;
        info!("Received forecast payload from {}", url);
        Ok(body)
    }
}
