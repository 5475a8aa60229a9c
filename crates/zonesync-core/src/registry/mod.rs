//! Plugin-based provider registry
//!
//! The registry allows zone providers to be registered by name at runtime,
//! avoiding hardcoded if-else chains over provider types.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use zonesync_core::registry::ProviderRegistry;
//! use zonesync_core::config::ProviderConfig;
//!
//! let mut registry = ProviderRegistry::new();
//! zonesync_provider_livedns::register(&mut registry);
//!
//! let config = ProviderConfig::livedns(token);
//! let provider = registry.create_provider("primary", &config)?;
//! ```

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::traits::{ZoneProvider, ZoneProviderFactory};
use std::collections::HashMap;

/// Provider registry for plugin-based provider creation
///
/// Maps provider type names (as returned by
/// [`ProviderConfig::type_name`]) to factories.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Box<dyn ZoneProviderFactory>>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider factory
    ///
    /// Registering a name twice replaces the earlier factory.
    pub fn register_provider(
        &mut self,
        name: impl Into<String>,
        factory: Box<dyn ZoneProviderFactory>,
    ) {
        self.providers.insert(name.into(), factory);
    }

    /// Validate `config` and create a provider from it
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn ZoneProvider>)`: Created provider instance
    /// - `Err(Error)`: If the config is invalid, the provider type is not
    ///   registered, or creation fails
    pub fn create_provider(
        &self,
        id: &str,
        config: &ProviderConfig,
    ) -> Result<Box<dyn ZoneProvider>> {
        config.validate()?;

        let provider_type = config.type_name();
        let factory = self
            .providers
            .get(provider_type)
            .ok_or_else(|| Error::config(format!("Unknown provider type: {}", provider_type)))?;

        factory.create(id, config)
    }

    /// List all registered provider types
    pub fn list_providers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a provider type is registered
    pub fn has_provider(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }
}
