/// Birdeye public API client
///
/// One pooled HTTP client per process. Every request carries the API credential
/// and chain headers, goes through the shared rate limiter, and is retried on
/// transient faults. Transport and HTTP errors come back as `IngestError`.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use hawkeye_core::{FailureCause, IngestError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use super::failsafe::{with_retry, RateLimiter, RetryPolicy};
use crate::config::Config;

const CHAIN_HEADER: &str = "x-chain";
const API_KEY_HEADER: &str = "X-API-KEY";

/// Read access to the market data provider
#[async_trait]
pub trait MarketData: Send + Sync {
    /// GET `path` with `query` and return the decoded JSON body
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, IngestError>;
}

#[derive(Clone)]
pub struct BirdeyeClient {
    http: Client,
    base_url: Url,
    retry: RetryPolicy,
    limiter: Arc<RateLimiter>,
}

impl BirdeyeClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            CHAIN_HEADER,
            HeaderValue::from_str(&config.birdeye.chain).context("Invalid chain identifier")?,
        );
        let mut api_key =
            HeaderValue::from_str(&config.birdeye.api_key).context("API key is not a valid header value")?;
        api_key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, api_key);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()
            .context("Failed to create Birdeye HTTP client")?;

        let base_url = Url::parse(&config.birdeye.base_url)
            .with_context(|| format!("Invalid Birdeye base URL: {}", config.birdeye.base_url))?;

        Ok(Self {
            http,
            base_url,
            retry: RetryPolicy::new(&config.retry),
            limiter: Arc::new(RateLimiter::new(&config.rate_limit)),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether outgoing requests pass through the client-side rate limiter
    pub fn is_throttled(&self) -> bool {
        self.limiter.is_enabled()
    }

    fn endpoint(&self, path: &str) -> Result<Url, IngestError> {
        self.base_url
            .join(path)
            .map_err(|e| IngestError::failure(FailureCause::Transport(format!("bad endpoint {}: {}", path, e))))
    }

    async fn get_once(&self, url: &Url, query: &[(&str, String)]) -> Result<Value, IngestError> {
        self.limiter.acquire().await;

        let response = self
            .http
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(translate_error)?;

        let status = response.status();
        if !status.is_success() {
            debug!(url = %url, status = status.as_u16(), "Birdeye returned error status");
            return Err(IngestError::failure(FailureCause::Status(status.as_u16())));
        }

        let body = response.text().await.map_err(translate_error)?;
        serde_json::from_str(&body).map_err(|e| IngestError::failure(FailureCause::Decode(e.to_string())))
    }
}

#[async_trait]
impl MarketData for BirdeyeClient {
    #[instrument(skip(self, query))]
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, IngestError> {
        let url = self.endpoint(path)?;
        let url = &url;
        with_retry(&self.retry, path, move || self.get_once(url, query)).await
    }
}

fn translate_error(err: reqwest::Error) -> IngestError {
    let cause = if err.is_timeout() {
        FailureCause::Timeout
    } else if err.is_connect() {
        FailureCause::Connect(err.to_string())
    } else if let Some(status) = err.status() {
        FailureCause::Status(status.as_u16())
    } else if err.is_decode() || err.is_body() {
        FailureCause::Decode(err.to_string())
    } else {
        FailureCause::Transport(err.to_string())
    };
    IngestError::failure(cause)
}
