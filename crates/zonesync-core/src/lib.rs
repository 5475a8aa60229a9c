// # zonesync-core
//
// Core library for zonesync: reconciling a desired DNS zone against a
// provider's live records.
//
// ## Architecture Overview
//
// - **Zone / Record**: Normalized record-set model, keyed by `(name, type)`
// - **Change / Plan**: Diff of a desired zone against an existing one
// - **ZoneProvider**: Trait for reading and reconciling zones at a provider
// - **ProviderRegistry**: Plugin-based registry for provider factories
//
// ## Flow
//
// 1. A provider populates the existing zone from its API
// 2. The desired zone is diffed against it, producing a plan
// 3. The provider applies the plan, change by change, in order

pub mod config;
pub mod error;
pub mod registry;
pub mod traits;
pub mod zone;

/// Version of this crate, reported in provider user agents
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export core types for convenience
pub use config::ProviderConfig;
pub use error::{Error, Result};
pub use registry::ProviderRegistry;
pub use traits::{ZoneProvider, ZoneProviderFactory};
pub use zone::{Change, Plan, Record, RecordData, RecordType, Zone};
