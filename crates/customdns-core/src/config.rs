//! Configuration types for customdns
//!
//! Connection parameters and the desired entry are passed explicitly; there
//! is no process-wide configuration state.

use crate::model::{DesiredState, Entry, Presence};
use serde::{Deserialize, Serialize};

/// Top-level configuration for one reconciliation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomDnsConfig {
    /// Where the service lives and how to authenticate
    pub connection: ConnectionConfig,

    /// The entry to converge
    pub entry: EntryConfig,

    /// Report what would change without changing it
    #[serde(default)]
    pub dry_run: bool,
}

impl CustomDnsConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.connection.validate()?;
        self.entry.validate()?;
        Ok(())
    }
}

/// Connection to the custom DNS API
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the Pi-hole server (e.g., "http://pi.hole")
    pub url: String,

    /// API key sent as the `auth` parameter
    /// ⚠️ NEVER log this value
    pub api_key: String,

    /// Path of the API endpoint below `url`
    #[serde(default = "default_api_path")]
    pub api_path: String,

    /// HTTP request timeout (in seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ConnectionConfig {
    /// Create a connection config with default path and timeout
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            api_path: default_api_path(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Override the API path
    pub fn with_api_path(mut self, api_path: impl Into<String>) -> Self {
        self.api_path = api_path.into();
        self
    }

    /// Override the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Full endpoint URL: `url` without trailing slash, then `api_path`
    pub fn endpoint(&self) -> String {
        let base = self.url.trim_end_matches('/');
        if self.api_path.starts_with('/') {
            format!("{}{}", base, self.api_path)
        } else {
            format!("{}/{}", base, self.api_path)
        }
    }

    /// Validate the connection configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.url.is_empty() {
            return Err(crate::Error::config("URL cannot be empty"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(crate::Error::config(format!(
                "URL must use HTTP or HTTPS scheme. Got: {}",
                self.url
            )));
        }
        if self.api_key.is_empty() {
            return Err(crate::Error::config("API key cannot be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(crate::Error::config("Timeout must be > 0"));
        }
        Ok(())
    }
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("url", &self.url)
            .field("api_key", &"<REDACTED>")
            .field("api_path", &self.api_path)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// The custom DNS entry to manage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryConfig {
    /// Domain to map
    pub domain: String,

    /// IP the domain should resolve to
    pub ip: String,

    /// Whether the entry should exist
    #[serde(default)]
    pub state: Presence,

    /// Reload the DNS service after a change
    #[serde(default = "default_reload")]
    pub reload: bool,
}

impl EntryConfig {
    /// Create an entry config that should be present, with reload
    pub fn new(domain: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ip: ip.into(),
            state: Presence::default(),
            reload: default_reload(),
        }
    }

    /// Set the desired presence
    pub fn with_state(mut self, state: Presence) -> Self {
        self.state = state;
        self
    }

    /// Set the reload directive
    pub fn with_reload(mut self, reload: bool) -> Self {
        self.reload = reload;
        self
    }

    /// Desired state handed to the reconciler
    pub fn desired_state(&self) -> DesiredState {
        DesiredState {
            entry: Entry::new(self.domain.clone(), self.ip.clone()),
            presence: self.state,
            reload: self.reload,
        }
    }

    /// Validate the entry configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.desired_state().validate()
    }
}

fn default_api_path() -> String {
    "/admin/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_reload() -> bool {
    true
}
