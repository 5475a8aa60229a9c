//! LiveDNS wire types
//!
//! One [`WireRecord`] is one record-set as the API transmits it: every value
//! of a `(name, type)` pair travels in `rrset_values`.

use serde::{Deserialize, Serialize};

/// Name the API uses for the zone apex
pub const APEX: &str = "@";

/// TTL the API applies when a record-set omits one
const DEFAULT_TTL: u32 = 10800;

/// A record-set in the provider's representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRecord {
    pub rrset_name: String,
    #[serde(default = "default_ttl")]
    pub rrset_ttl: u32,
    pub rrset_type: String,
    #[serde(default)]
    pub rrset_values: Vec<String>,
}

/// An entry of the domain listing
#[derive(Debug, Clone, Deserialize)]
pub struct DomainEntry {
    pub fqdn: String,
}

/// Map a model name to the API's apex convention (empty → `@`)
pub fn apex_name(name: &str) -> &str {
    if name.is_empty() { APEX } else { name }
}

fn default_ttl() -> u32 {
    DEFAULT_TTL
}
