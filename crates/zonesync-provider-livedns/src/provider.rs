// # LiveDNS Provider
//
// Bridges the zone model and the LiveDNS client.
//
// ## Caching
//
// - Record-sets are cached per zone on first `populate`/`plan` and dropped
//   after a successful `apply` of that zone, so the next read is fresh
// - A zone the API does not know is never cached
// - The domain listing is fetched once per instance and never invalidated;
//   it only serves zone discovery
//
// ## Apply
//
// 1. Make sure the zone exists, creating it when absent
// 2. Issue each change in plan order: create, delete, or delete-then-create
//    for updates (the API has no in-place record-set update)
// 3. Drop the zone's cached record-sets

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use zonesync_core::{
    Change, Error, Plan, ProviderConfig, Record, RecordType, Result, Zone, ZoneProvider,
};

use crate::client::LiveDnsClient;
use crate::convert;
use crate::transport::{HttpTransport, Transport};
use crate::wire::WireRecord;

/// Message raised when the API refuses to create a zone for a domain
pub const UNKNOWN_DOMAIN_MESSAGE: &str = "This domain is not registered with the provider. \
     Please register or transfer it there to be able to manage its DNS zone.";

/// LiveDNS zone provider
///
/// # Security
///
/// The API token lives only inside the HTTP transport; the `Debug` output
/// of this type never contains it.
pub struct LiveDnsProvider<T = HttpTransport> {
    id: String,
    client: LiveDnsClient<T>,
    /// Normalized record-sets per zone name (with trailing dot)
    zone_records: HashMap<String, Vec<WireRecord>>,
    /// Sorted domain names, each with a trailing dot
    domains: Option<Vec<String>>,
}

impl LiveDnsProvider<HttpTransport> {
    /// Build a provider from a [`ProviderConfig::LiveDns`] configuration
    pub fn from_config(id: impl Into<String>, config: &ProviderConfig) -> Result<Self> {
        match config {
            ProviderConfig::LiveDns {
                token,
                per_page,
                endpoint,
                timeout_secs,
            } => {
                let id = id.into();
                tracing::debug!(
                    "LiveDnsProvider[{}]: token=***, per_page={}, endpoint={}",
                    id,
                    per_page,
                    endpoint
                );
                let transport = HttpTransport::new(
                    token,
                    endpoint.as_str(),
                    Duration::from_secs(*timeout_secs),
                )?;
                Ok(Self::with_transport(id, transport, *per_page))
            }
            _ => Err(Error::config("Invalid config for LiveDNS provider")),
        }
    }
}

impl<T: Transport> LiveDnsProvider<T> {
    /// Build a provider on top of an existing transport
    pub fn with_transport(id: impl Into<String>, transport: T, per_page: u32) -> Self {
        Self {
            id: id.into(),
            client: LiveDnsClient::new(transport, per_page),
            zone_records: HashMap::new(),
            domains: None,
        }
    }

    /// Whether record-sets of `zone_name` (with trailing dot) are cached
    pub fn is_cached(&self, zone_name: &str) -> bool {
        self.zone_records.contains_key(zone_name)
    }

    /// Drop the cached record-sets of `zone_name` (with trailing dot)
    pub fn invalidate(&mut self, zone_name: &str) {
        self.zone_records.remove(zone_name);
    }

    /// Fetch and cache the record-sets of `zone`, unless already cached
    ///
    /// A zone the API does not know is left uncached.
    async fn load_zone_records(&mut self, zone: &Zone) -> Result<()> {
        if self.zone_records.contains_key(zone.name()) {
            return Ok(());
        }

        match self.client.zone_records(zone.bare_name()).await {
            Ok(records) => {
                self.zone_records.insert(zone.name().to_string(), records);
                Ok(())
            }
            Err(Error::NotFound(_)) => {
                tracing::debug!("populate: zone {} not found", zone.name());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Make sure the zone exists at the provider, creating it if needed
    async fn ensure_zone(&self, zone_name: &str) -> Result<()> {
        match self.client.zone(zone_name).await {
            Ok(_) => Ok(()),
            Err(Error::NotFound(_)) => {
                tracing::info!("apply: no existing zone, trying to create it");
                match self.client.create_zone(zone_name).await {
                    Ok(_) => {
                        tracing::info!("apply: zone has been successfully created");
                        Ok(())
                    }
                    // 404 on creation means the domain itself is unknown here
                    Err(Error::NotFound(_)) => {
                        Err(Error::UnknownDomainName(UNKNOWN_DOMAIN_MESSAGE.to_string()))
                    }
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    async fn apply_create(&self, zone_name: &str, new: &Record) -> Result<()> {
        self.client
            .create_record(zone_name, &convert::params_for(new))
            .await
    }

    async fn apply_delete(&self, zone_name: &str, existing: &Record) -> Result<()> {
        self.client
            .delete_record(zone_name, &existing.name, existing.record_type().as_str())
            .await
    }
}

impl<T> std::fmt::Debug for LiveDnsProvider<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveDnsProvider")
            .field("id", &self.id)
            .field("cached_zones", &self.zone_records.keys().collect::<Vec<_>>())
            .field("domains_cached", &self.domains.is_some())
            .finish()
    }
}

#[async_trait]
impl<T: Transport> ZoneProvider for LiveDnsProvider<T> {
    fn id(&self) -> &str {
        &self.id
    }

    fn provider_name(&self) -> &'static str {
        "livedns"
    }

    fn supports(&self, _record_type: RecordType) -> bool {
        // Every modelled type maps onto a LiveDNS record-set
        true
    }

    async fn list_zones(&mut self) -> Result<Vec<String>> {
        tracing::debug!("list_zones:");
        if let Some(domains) = &self.domains {
            return Ok(domains.clone());
        }

        let mut domains: Vec<String> = self
            .client
            .domains()
            .await?
            .into_iter()
            .map(|fqdn| format!("{}.", fqdn))
            .collect();
        domains.sort();

        self.domains = Some(domains.clone());
        Ok(domains)
    }

    async fn populate(&mut self, zone: &mut Zone, target: bool, lenient: bool) -> Result<bool> {
        tracing::debug!(
            "populate: name={}, target={}, lenient={}",
            zone.name(),
            target,
            lenient
        );

        self.load_zone_records(zone).await?;
        let records: &[WireRecord] = self
            .zone_records
            .get(zone.name())
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut groups: BTreeMap<(&str, RecordType), Vec<&WireRecord>> = BTreeMap::new();
        for record in records {
            match record.rrset_type.parse::<RecordType>() {
                Ok(record_type) => groups
                    .entry((record.rrset_name.as_str(), record_type))
                    .or_default()
                    .push(record),
                Err(_) => tracing::debug!(
                    "populate: skipping unsupported {} record {}",
                    record.rrset_type,
                    record.rrset_name
                ),
            }
        }

        let before = zone.len();
        for ((name, record_type), group) in groups {
            if group.len() > 1 {
                tracing::warn!(
                    "populate: {} {} is split across {} entries, merging values",
                    name,
                    record_type,
                    group.len()
                );
            }
            let values: Vec<String> = group
                .iter()
                .flat_map(|r| r.rrset_values.iter().cloned())
                .collect();

            let record =
                convert::record_for(name, record_type, group[0].rrset_ttl, &values, lenient)?;
            zone.add_record(record, lenient)?;
        }

        let exists = self.zone_records.contains_key(zone.name());
        tracing::info!(
            "populate:   found {} records, exists={}",
            zone.len() - before,
            exists
        );
        Ok(exists)
    }

    async fn apply(&mut self, plan: &Plan) -> Result<usize> {
        let desired = &plan.desired;
        let zone_name = desired.bare_name();
        tracing::debug!(
            "apply: zone={}, len(changes)={}",
            desired.name(),
            plan.changes.len()
        );

        self.ensure_zone(zone_name).await?;

        for change in &plan.changes {
            tracing::debug!("apply: {}", change);
            match change {
                Change::Create { new } => self.apply_create(zone_name, new).await?,
                Change::Update { existing, new } => {
                    self.apply_delete(zone_name, existing).await?;
                    self.apply_create(zone_name, new).await?;
                }
                Change::Delete { existing } => self.apply_delete(zone_name, existing).await?,
            }
        }

        self.invalidate(desired.name());
        Ok(plan.changes.len())
    }
}
