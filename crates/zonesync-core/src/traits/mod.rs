//! Core traits for zonesync
//!
//! - [`ZoneProvider`]: Read and reconcile zones at a DNS provider
//! - [`ZoneProviderFactory`]: Build providers from configuration

pub mod zone_provider;

pub use zone_provider::{ZoneProvider, ZoneProviderFactory};
