//! Configuration types for the dynamic DNS updater
//!
//! [`DyndnsConfig`] is built once at startup, validated, and then shared
//! read-only by the scheduler and the provider.

use serde::Serialize;
use std::time::Duration;

/// Longest accepted update or heartbeat interval (one year)
pub const MAX_INTERVAL_SECS: u64 = 365 * 24 * 60 * 60;

/// Main updater configuration
#[derive(Clone, Serialize)]
pub struct DyndnsConfig {
    /// Provider API key
    /// ⚠️ NEVER log this value
    #[serde(skip_serializing)]
    pub api_key: String,

    /// Domains to keep pointed at this host, in the order sent to the provider
    pub domains: Vec<String>,

    /// Seconds between two update attempts
    pub update_interval_secs: u64,

    /// Seconds between two heartbeat summaries
    pub heartbeat_interval_secs: u64,

    /// Port of the liveness endpoint
    pub health_port: u16,

    /// Provider settings
    pub provider: ProviderSettings,

    /// Optional engine settings
    pub engine: EngineConfig,
}

// Custom Debug implementation that hides the API key
impl std::fmt::Debug for DyndnsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DyndnsConfig")
            .field("api_key", &"<REDACTED>")
            .field("domains", &self.domains)
            .field("update_interval_secs", &self.update_interval_secs)
            .field("heartbeat_interval_secs", &self.heartbeat_interval_secs)
            .field("health_port", &self.health_port)
            .field("provider", &self.provider)
            .field("engine", &self.engine)
            .finish()
    }
}

impl DyndnsConfig {
    /// Create a new configuration with default intervals and port
    pub fn new(api_key: impl Into<String>, domains: Vec<String>) -> Self {
        Self {
            api_key: api_key.into(),
            domains,
            update_interval_secs: default_update_interval_secs(),
            heartbeat_interval_secs: default_heartbeat_interval_secs(),
            health_port: default_health_port(),
            provider: ProviderSettings::default(),
            engine: EngineConfig::default(),
        }
    }

    /// Set the update interval
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval_secs = interval.as_secs();
        self
    }

    /// Set the heartbeat interval
    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval_secs = interval.as_secs();
        self
    }

    /// Set the liveness port
    pub fn with_health_port(mut self, port: u16) -> Self {
        self.health_port = port;
        self
    }

    /// Set the provider settings
    pub fn with_provider(mut self, provider: ProviderSettings) -> Self {
        self.provider = provider;
        self
    }

    /// Interval between update attempts
    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs)
    }

    /// Interval between heartbeat summaries
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_interval_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.api_key.is_empty() {
            return Err(crate::Error::config("API key cannot be empty"));
        }

        if self.domains.is_empty() {
            return Err(crate::Error::config("No domains configured"));
        }

        if let Some(position) = self.domains.iter().position(|d| d.trim().is_empty()) {
            return Err(crate::Error::config(format!(
                "Domain at position {} is empty",
                position
            )));
        }

        if self.update_interval_secs == 0 {
            return Err(crate::Error::config("Update interval must be > 0"));
        }

        if self.update_interval_secs > MAX_INTERVAL_SECS {
            return Err(crate::Error::config(format!(
                "Update interval must be at most {} seconds",
                MAX_INTERVAL_SECS
            )));
        }

        if self.heartbeat_interval_secs == 0 {
            return Err(crate::Error::config("Heartbeat interval must be > 0"));
        }

        if self.heartbeat_interval_secs > MAX_INTERVAL_SECS {
            return Err(crate::Error::config(format!(
                "Heartbeat interval must be at most {} seconds",
                MAX_INTERVAL_SECS
            )));
        }

        if self.health_port == 0 {
            return Err(crate::Error::config("Health port must be > 0"));
        }

        if self.engine.event_channel_capacity == 0 {
            return Err(crate::Error::config("Event channel capacity must be > 0"));
        }

        self.provider.validate()
    }
}

/// Settings for the outbound provider call
#[derive(Debug, Clone, Serialize)]
pub struct ProviderSettings {
    /// Endpoint override; `None` uses the provider's own default
    pub endpoint: Option<String>,

    /// Timeout applied to each update request (in seconds)
    pub http_timeout_secs: u64,
}

impl ProviderSettings {
    /// Validate the provider settings
    pub fn validate(&self) -> Result<(), crate::Error> {
        if let Some(endpoint) = &self.endpoint {
            if endpoint.is_empty() {
                return Err(crate::Error::config("Provider endpoint cannot be empty"));
            }
            if !endpoint.starts_with("https://") && !endpoint.starts_with("http://") {
                return Err(crate::Error::config(format!(
                    "Provider endpoint must use HTTP or HTTPS scheme. Got: {}",
                    endpoint
                )));
            }
        }

        if self.http_timeout_secs == 0 {
            return Err(crate::Error::config("HTTP timeout must be > 0"));
        }

        Ok(())
    }

    /// Timeout applied to each update request
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize)]
pub struct EngineConfig {
    /// Capacity of the engine event channel
    ///
    /// When full, new events are dropped (with a warning log).
    pub event_channel_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            event_channel_capacity: default_event_channel_capacity(),
        }
    }
}

fn default_update_interval_secs() -> u64 {
    300
}

fn default_heartbeat_interval_secs() -> u64 {
    6 * 60 * 60
}

fn default_health_port() -> u16 {
    8080
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_event_channel_capacity() -> usize {
    1000
}
