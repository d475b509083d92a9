// Gemini API client
// Author: kelexine (https://github.com/kelexine)

use crate::config::GeminiConfig;
use crate::error::{RelayError, Result};
use crate::metrics;
use crate::models::gemini::GenerateContentRequest;
use crate::utils::logging::sanitize;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};
use zeroize::Zeroizing;

/// Client for the public Gemini `generateContent` endpoint.
///
/// Sends exactly one request per call. There is no retry, and no timeout
/// unless `timeout_seconds` is configured.
pub struct GeminiClient {
    http_client: Client,
    api_url: String,
    api_key: Option<Zeroizing<String>>,
}

impl GeminiClient {
    /// Create a new Gemini client from configuration.
    ///
    /// A missing API key is only logged; the upstream reports the auth
    /// failure and that failure is mirrored back to callers.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .tcp_nodelay(true)
            .use_rustls_tls();

        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        let http_client = builder
            .build()
            .map_err(|e| RelayError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Url::parse(&config.api_url).map_err(|e| {
            RelayError::Config(format!("Invalid gemini.api_url {:?}: {}", config.api_url, e))
        })?;

        let api_key = config
            .api_key
            .as_ref()
            .filter(|key| !key.is_empty())
            .map(|key| Zeroizing::new(key.clone()));

        if api_key.is_none() {
            warn!("No Gemini API key configured; upstream calls will be rejected by the API");
        }

        debug!(
            "Created Gemini client for {} (timeout: {:?})",
            config.api_url, config.timeout_seconds
        );

        Ok(Self {
            http_client,
            api_url: config.api_url.clone(),
            api_key,
        })
    }

    /// Get the configured endpoint URL
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Host part of the endpoint, for health reporting
    pub fn api_host(&self) -> Option<String> {
        Url::parse(&self.api_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Call Gemini `generateContent` and return the response body untouched.
    ///
    /// A 200 yields the JSON body. Any other status yields
    /// [`RelayError::Upstream`] carrying that status and the upstream JSON
    /// body. A body that is not JSON, on either path, is an unhandled failure.
    pub async fn generate_content(&self, request: &GenerateContentRequest) -> Result<Value> {
        let mut builder = self
            .http_client
            .post(&self.api_url)
            .header(CONTENT_TYPE, "application/json")
            .json(request);

        if let Some(key) = &self.api_key {
            builder = builder.query(&[("key", key.as_str())]);
        }

        debug!("Calling generateContent at {}", self.api_url);
        let start = Instant::now();

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let e = e.without_url();
                error!("Gemini API request failed: {}", sanitize(&e.to_string()));
                metrics::record_upstream_call(None, start.elapsed().as_secs_f64());
                return Err(e.into());
            }
        };

        let status = response.status();
        metrics::record_upstream_call(Some(status.as_u16()), start.elapsed().as_secs_f64());

        let body: Value = response.json().await.map_err(|e| {
            error!("Gemini API returned HTTP {} with a non-JSON body", status);
            RelayError::from(e)
        })?;

        if status != StatusCode::OK {
            error!(
                "Gemini API error: HTTP {} - Response body: {}",
                status,
                sanitize(&body.to_string())
            );
            return Err(RelayError::Upstream {
                status,
                details: body,
            });
        }

        debug!("Successfully received Gemini response");
        Ok(body)
    }
}
