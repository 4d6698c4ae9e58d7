// # Pi-hole Transport
//
// This crate delivers customdns requests to the Pi-hole admin API.
//
// ## Behavior
//
// - ✅ One HTTP GET per `execute` call
// - ✅ HTTP timeout configured (default 30 seconds)
// - ✅ Status codes mapped to protocol errors (401/403 as auth failures)
// - ❌ NO retry or backoff (the caller decides whether to run again)
// - ❌ NO caching (every enumeration hits the server)
//
// ## Security Requirements
//
// - API key NEVER appears in logs or error messages
// - Request URLs are logged without their query string
//
// ## API Reference
//
// Every operation is a GET on `<url>/admin/api` with the operation in the
// query string:
//
// - List entries: `?auth=<key>&customdns&action=get`
// - Add entry: `?auth=<key>&customdns&action=add&domain=<d>&ip=<ip>&reload=True`
// - Delete entry: `?auth=<key>&customdns&action=delete&domain=<d>&ip=<ip>&reload=True`

use async_trait::async_trait;
use customdns_core::{ApiRequest, ApiTransport, ConnectionConfig, Error, Result};
use std::time::Duration;

/// Pi-hole admin API transport
pub struct PiholeTransport {
    /// Endpoint URL without query string
    endpoint: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation; the transport never holds the key, but keep
// the client internals out of logs
impl std::fmt::Debug for PiholeTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PiholeTransport")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PiholeTransport {
    /// Create a transport for an endpoint URL (e.g., "http://pi.hole/admin/api")
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.into();
        if endpoint.is_empty() {
            return Err(Error::config("Pi-hole endpoint cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { endpoint, client })
    }

    /// Create a transport from connection configuration
    pub fn from_config(config: &ConnectionConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.endpoint(), Duration::from_secs(config.timeout_secs))
    }

    /// Endpoint URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}?{}", self.endpoint, request.to_query_string())
    }
}

#[async_trait]
impl ApiTransport for PiholeTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<String> {
        tracing::debug!(
            "Sending custom DNS request: action={} endpoint={}",
            request.action(),
            self.endpoint
        );

        // reqwest errors can embed the full URL, which carries the key
        let response = self
            .client
            .get(self.url_for(request))
            .send()
            .await
            .map_err(|e| {
                Error::transport(format!(
                    "HTTP request to {} failed: {}",
                    self.endpoint,
                    e.without_url()
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            return match status.as_u16() {
                401 | 403 => Err(Error::protocol(format!(
                    "Authentication failed: invalid API key or insufficient permissions. Status: {}",
                    status
                ))),
                404 => Err(Error::protocol(format!(
                    "API endpoint not found: {}. Status: {}",
                    self.endpoint, status
                ))),
                500..=599 => Err(Error::protocol(format!(
                    "Pi-hole server error: {}",
                    status
                ))),
                _ => Err(Error::protocol(format!(
                    "Unexpected response status: {}",
                    status
                ))),
            };
        }

        response.text().await.map_err(|e| {
            Error::transport(format!("Failed to read response body: {}", e.without_url()))
        })
    }

    fn transport_name(&self) -> &'static str {
        "pihole"
    }
}
