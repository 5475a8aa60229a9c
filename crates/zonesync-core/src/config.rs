//! Configuration types for zonesync
//!
//! Providers are configured with a [`ProviderConfig`], which deserializes
//! from any serde format with a `type` tag selecting the provider.

use serde::{Deserialize, Serialize};

/// Default LiveDNS API endpoint
pub const DEFAULT_LIVEDNS_ENDPOINT: &str = "https://api.gandi.net/v5";

/// Default page size for LiveDNS listings
pub const DEFAULT_LIVEDNS_PER_PAGE: u32 = 500;

/// DNS provider configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// LiveDNS REST provider
    #[serde(rename = "livedns")]
    LiveDns {
        /// Bearer token for the API
        token: String,
        /// Page size used when listing domains and records
        #[serde(default = "default_per_page")]
        per_page: u32,
        /// API base URL
        #[serde(default = "default_endpoint")]
        endpoint: String,
        /// Per-request HTTP timeout (in seconds)
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },

    /// Custom provider
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl ProviderConfig {
    /// LiveDNS configuration with default settings
    pub fn livedns(token: impl Into<String>) -> Self {
        ProviderConfig::LiveDns {
            token: token.into(),
            per_page: default_per_page(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::LiveDns {
                token,
                per_page,
                endpoint,
                ..
            } => {
                if token.is_empty() {
                    return Err(crate::Error::config("LiveDNS API token cannot be empty"));
                }
                if *per_page == 0 {
                    return Err(crate::Error::config("LiveDNS per_page must be > 0"));
                }
                if !endpoint.starts_with("https://") && !endpoint.starts_with("http://") {
                    return Err(crate::Error::config(format!(
                        "LiveDNS endpoint must be an http(s) URL: {}",
                        endpoint
                    )));
                }
                Ok(())
            }
            ProviderConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom provider factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "Custom provider config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::LiveDns { .. } => "livedns",
            ProviderConfig::Custom { factory, .. } => factory,
        }
    }
}

// Keeps the token out of logs
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::LiveDns {
                per_page,
                endpoint,
                timeout_secs,
                ..
            } => f
                .debug_struct("LiveDns")
                .field("token", &"<REDACTED>")
                .field("per_page", per_page)
                .field("endpoint", endpoint)
                .field("timeout_secs", timeout_secs)
                .finish(),
            ProviderConfig::Custom { factory, config } => f
                .debug_struct("Custom")
                .field("factory", factory)
                .field("config", config)
                .finish(),
        }
    }
}

fn default_per_page() -> u32 {
    DEFAULT_LIVEDNS_PER_PAGE
}

fn default_endpoint() -> String {
    DEFAULT_LIVEDNS_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
