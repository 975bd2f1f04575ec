// # IONOS DynDNS Provider
//
// This crate provides the IONOS dynamic-DNS provider for the updater.
//
// ## Behaviour
//
// - ✅ Makes exactly one HTTP request per scheduler tick
// - ✅ Full error propagation to the scheduler (which logs and waits for the next tick)
// - ✅ HTTP timeout configured (30 seconds by default)
// - ✅ Status-specific error messages (401/403, 429, 5xx)
// - ✅ Endpoint override for substitute servers
// - ❌ NO retry logic (the next tick is the retry)
// - ❌ NO background tasks
//
// ## Security Requirements
//
// - API key NEVER appears in logs or Debug output
// - Provider MUST fail fast if the key is empty
//
// ## API Reference
//
// - IONOS DNS API: https://developer.hosting.ionos.com/docs/dns
// - Dynamic DNS: POST `/dns/v1/dyndns` with header `X-API-Key: <prefix>.<secret>`

use async_trait::async_trait;
use dyndns_core::config::ProviderSettings;
use dyndns_core::traits::{DnsProvider, UpdateResult};
use dyndns_core::{Error, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// IONOS dynamic-DNS endpoint
pub const DEFAULT_API_URL: &str = "https://api.hosting.ionos.com/dns/v1/dyndns";

/// Header carrying the IONOS API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Description sent with every update request
pub const UPDATE_DESCRIPTION: &str = "IONOS DynDNS Updater";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Body of a dynamic-DNS update request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynDnsRequest {
    /// Domains to update, in the configured order
    pub domains: Vec<String>,
    /// Free-form description shown by IONOS
    pub description: String,
}

impl DynDnsRequest {
    /// Build a request for `domains` with the fixed description
    pub fn new(domains: &[String]) -> Self {
        Self {
            domains: domains.to_vec(),
            description: UPDATE_DESCRIPTION.to_string(),
        }
    }
}

/// IONOS dynamic-DNS provider
///
/// Isolated, stateless, and single-shot. Scheduling and retrying are owned
/// by `UpdateScheduler`.
pub struct IonosProvider {
    /// IONOS API key
    /// ⚠️ NEVER log this value
    api_key: String,

    /// Update endpoint URL
    endpoint: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for IonosProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IonosProvider")
            .field("api_key", &"<REDACTED>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl IonosProvider {
    /// Create a new IONOS provider against the real endpoint
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the key is empty or the HTTP
    /// client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a new IONOS provider with a custom request timeout
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_key = api_key.into();

        if api_key.is_empty() {
            return Err(Error::config("IONOS API key cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            endpoint: DEFAULT_API_URL.to_string(),
            client,
        })
    }

    /// Create a provider from the updater's provider settings
    pub fn from_settings(api_key: impl Into<String>, settings: &ProviderSettings) -> Result<Self> {
        let provider = Self::with_timeout(api_key, settings.http_timeout())?;

        Ok(match &settings.endpoint {
            Some(endpoint) => provider.with_endpoint(endpoint.clone()),
            None => provider,
        })
    }

    /// Send updates to `endpoint` instead of the real IONOS API
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// The endpoint updates are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Describe a non-2xx status from the dyndns endpoint
fn status_error(status: reqwest::StatusCode, body: &str) -> Error {
    let message = match status.as_u16() {
        401 | 403 => "Authentication failed: invalid API key or insufficient permissions".to_string(),
        429 => "Rate limit exceeded".to_string(),
        500..=599 => format!("IONOS server error (transient): {}", body),
        _ => format!("IONOS API rejected the update: {}", body),
    };

    Error::http(status.as_u16(), message)
}

#[async_trait]
impl DnsProvider for IonosProvider {
    /// Notify IONOS that `domains` should point at this host
    ///
    /// # API Call
    ///
    /// ```http
    /// POST /dns/v1/dyndns
    /// Accept: application/json
    /// Content-Type: application/json
    /// X-API-Key: <key>
    ///
    /// {"domains": ["example.com"], "description": "IONOS DynDNS Updater"}
    /// ```
    async fn update_domains(&self, domains: &[String]) -> Result<UpdateResult> {
        let body = serde_json::to_vec(&DynDnsRequest::new(domains))?;

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .body(body)
            .send()
            .await
            .map_err(|e| Error::transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        // Always drain the body so the connection can be reused
        let text = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("Failed to read response: {}", e)))?;

        tracing::debug!(status = status.as_u16(), body = %text, "API response received");

        if !status.is_success() {
            return Err(status_error(status, &text));
        }

        tracing::debug!(domains = ?domains, status = status.as_u16(), "IONOS accepted the update");
        Ok(UpdateResult {
            status: status.as_u16(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "ionos"
    }
}
