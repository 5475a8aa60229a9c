// # Zone Provider Trait
//
// Defines the interface between the zone model and a concrete DNS provider.
//
// ## Implementations
//
// - LiveDNS: `zonesync-provider-livedns` crate
//
// ## Usage
//
// ```rust,ignore
// use zonesync_core::{ZoneProvider, Zone};
//
// async fn sync(provider: &mut dyn ZoneProvider, desired: &Zone) -> zonesync_core::Result<()> {
//     let plan = provider.plan(desired).await?;
//     if plan.has_changes() {
//         provider.apply(&plan).await?;
//     }
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::config::ProviderConfig;
use crate::error::Result;
use crate::zone::{Plan, RecordType, Zone};

/// Trait for DNS provider implementations
///
/// A provider reads the live state of a zone into the normalized model
/// (`populate`) and pushes a computed [`Plan`] back (`apply`).
///
/// # Sequential use
///
/// Methods take `&mut self`: providers own per-instance caches and are
/// driven by one caller at a time. Requests are issued one after another,
/// never concurrently. Callers wanting parallelism across zones create one
/// provider per zone.
///
/// # No retries
///
/// Providers surface every failure to the caller. A failure part-way through
/// `apply` leaves the changes issued before it in place; there is no
/// rollback.
#[async_trait]
pub trait ZoneProvider: Send {
    /// Identifier of this provider instance (for logging)
    fn id(&self) -> &str;

    /// Static name of the provider kind (e.g., "livedns")
    fn provider_name(&self) -> &'static str;

    /// Whether records of `record_type` can be managed
    fn supports(&self, record_type: RecordType) -> bool;

    /// Whether geo-routed records are supported
    fn supports_geo(&self) -> bool {
        false
    }

    /// Whether dynamic (weighted/failover) records are supported
    fn supports_dynamic(&self) -> bool {
        false
    }

    /// Names of the zones available at the provider, each ending in `.`
    async fn list_zones(&mut self) -> Result<Vec<String>>;

    /// Add the provider's current record-sets to `zone`
    ///
    /// # Parameters
    ///
    /// - `zone`: Zone to fill; its name selects the remote zone
    /// - `target`: The zone is being read as a sync target rather than a source
    /// - `lenient`: Keep records that fail validation instead of failing
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: The zone exists at the provider
    /// - `Ok(false)`: The zone does not exist; `zone` is left empty
    async fn populate(&mut self, zone: &mut Zone, target: bool, lenient: bool) -> Result<bool>;

    /// Apply every change of `plan`, in order
    ///
    /// # Returns
    ///
    /// The number of changes applied.
    async fn apply(&mut self, plan: &Plan) -> Result<usize>;

    /// Compute the changes that bring this provider in line with `desired`
    ///
    /// Desired records of unsupported types are skipped with a warning. The
    /// existing zone is read leniently, so records at the provider that fail
    /// validation are still replaced or deleted.
    async fn plan(&mut self, desired: &Zone) -> Result<Plan> {
        tracing::info!("[{}] Planning {}", self.id(), desired.name());

        let mut existing = Zone::new(desired.name())?;
        let exists = self.populate(&mut existing, true, true).await?;

        let mut supported = Zone::new(desired.name())?;
        for record in desired.records() {
            if self.supports(record.record_type()) {
                supported.add_record(record.clone(), true)?;
            } else {
                tracing::warn!(
                    "[{}] {} records not supported, skipping {}",
                    self.id(),
                    record.record_type(),
                    record.display_name()
                );
            }
        }

        let changes = supported.changes(&existing);
        let plan = Plan::new(desired.clone(), changes, exists);
        tracing::info!("[{}] Plan for {}: {}", self.id(), desired.name(), plan.summary());
        Ok(plan)
    }
}

/// Helper trait for constructing providers from configuration
pub trait ZoneProviderFactory: Send + Sync {
    /// Create a ZoneProvider instance from configuration
    ///
    /// # Parameters
    ///
    /// - `id`: Identifier for the new instance
    /// - `config`: Configuration specific to this provider
    fn create(&self, id: &str, config: &ProviderConfig) -> Result<Box<dyn ZoneProvider>>;
}
