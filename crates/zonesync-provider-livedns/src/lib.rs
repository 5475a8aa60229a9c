// # LiveDNS Provider
//
// This crate provides a zonesync provider for LiveDNS-style REST APIs
// (Gandi LiveDNS v5 by default).
//
// ## Layers
//
// - `transport`: one HTTP exchange per call (`reqwest`), bearer auth
// - `client`: status → error mapping, pagination, read-time normalization
// - `convert`: per-type translation between wire values and the zone model
// - `provider`: `ZoneProvider` implementation with per-zone caching
//
// ## Security Requirements
//
// - API token NEVER appears in logs or `Debug` output
// - Provider construction fails if the token is empty
//
// ## Declared capabilities
//
// A, AAAA, ALIAS, CAA, CNAME, DNAME, MX, NS, PTR, SRV, SSHFP, TLSA, TXT.
// No geo-routing, no dynamic records.

pub mod client;
pub mod convert;
pub mod provider;
pub mod transport;
pub mod wire;

pub use client::LiveDnsClient;
pub use provider::{LiveDnsProvider, UNKNOWN_DOMAIN_MESSAGE};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
pub use wire::WireRecord;

use zonesync_core::{
    Error, ProviderConfig, ProviderRegistry, Result, ZoneProvider, ZoneProviderFactory,
};

/// Factory for creating LiveDNS providers
pub struct LiveDnsFactory;

impl ZoneProviderFactory for LiveDnsFactory {
    fn create(&self, id: &str, config: &ProviderConfig) -> Result<Box<dyn ZoneProvider>> {
        match config {
            ProviderConfig::LiveDns { .. } => {
                Ok(Box::new(LiveDnsProvider::from_config(id, config)?))
            }
            _ => Err(Error::config("Invalid config for LiveDNS provider")),
        }
    }
}

/// Register the LiveDNS provider with a registry
///
/// # Example
///
/// ```rust
/// use zonesync_core::ProviderRegistry;
///
/// let mut registry = ProviderRegistry::new();
/// zonesync_provider_livedns::register(&mut registry);
/// assert!(registry.has_provider("livedns"));
/// ```
pub fn register(registry: &mut ProviderRegistry) {
    registry.register_provider("livedns", Box::new(LiveDnsFactory));
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonesync_core::RecordType;

    #[test]
    fn test_factory_creation() {
        let provider = LiveDnsFactory
            .create("test_id", &ProviderConfig::livedns("test_token"))
            .unwrap_or_else(|e| panic!("factory failed: {}", e));

        assert_eq!(provider.id(), "test_id");
        assert_eq!(provider.provider_name(), "livedns");
        assert!(!provider.supports_geo());
        assert!(!provider.supports_dynamic());
        for t in RecordType::ALL {
            assert!(provider.supports(t));
        }
    }

    #[test]
    fn test_factory_missing_token() {
        let result = LiveDnsFactory.create("test_id", &ProviderConfig::livedns(""));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_factory_rejects_foreign_config() {
        let config = ProviderConfig::Custom {
            factory: "other".into(),
            config: serde_json::json!({}),
        };
        assert!(LiveDnsFactory.create("test_id", &config).is_err());
    }

    #[test]
    fn test_registry_creates_provider() {
        let mut registry = ProviderRegistry::new();
        register(&mut registry);

        let provider = registry.create_provider("primary", &ProviderConfig::livedns("test_token"));
        assert!(provider.is_ok());
    }

    #[test]
    fn test_api_token_not_exposed_in_debug() {
        let provider =
            LiveDnsProvider::from_config("test_id", &ProviderConfig::livedns("secret_token_12345"))
                .unwrap();

        let debug_str = format!("{:?}", provider);
        assert!(!debug_str.contains("secret_token"));
        assert!(debug_str.contains("LiveDnsProvider"));
    }
}
