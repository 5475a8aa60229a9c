// # Changes and Plans

use std::fmt;

use super::record::Record;
use super::Zone;

/// One reconciliation step for a single record-set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// The record-set is only in the desired zone
    Create { new: Record },
    /// The record-set exists on both sides with different TTL or values
    Update { existing: Record, new: Record },
    /// The record-set is only in the existing zone
    Delete { existing: Record },
}

impl Change {
    /// Lower-case name of the change kind
    pub fn kind(&self) -> &'static str {
        match self {
            Change::Create { .. } => "create",
            Change::Update { .. } => "update",
            Change::Delete { .. } => "delete",
        }
    }

    /// The record this change is about: the new one, or the existing one
    /// for deletes
    pub fn record(&self) -> &Record {
        match self {
            Change::Create { new } | Change::Update { new, .. } => new,
            Change::Delete { existing } => existing,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.record();
        write!(
            f,
            "{} {} {} (ttl {})",
            self.kind(),
            record.display_name(),
            record.record_type(),
            record.ttl
        )
    }
}

/// Ordered changes needed to bring a provider in line with a desired zone
#[derive(Debug, Clone)]
pub struct Plan {
    /// The zone as it should be
    pub desired: Zone,
    /// Changes to apply, in order
    pub changes: Vec<Change>,
    /// Whether the zone already existed at the provider
    pub exists: bool,
}

impl Plan {
    /// Create a plan
    pub fn new(desired: Zone, changes: Vec<Change>, exists: bool) -> Self {
        Self {
            desired,
            changes,
            exists,
        }
    }

    /// Whether there is anything to apply
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Count of creates, updates and deletes
    pub fn summary(&self) -> PlanSummary {
        let mut summary = PlanSummary::default();
        for change in &self.changes {
            match change {
                Change::Create { .. } => summary.creates += 1,
                Change::Update { .. } => summary.updates += 1,
                Change::Delete { .. } => summary.deletes += 1,
            }
        }
        summary
    }
}

/// Per-kind change counts of a [`Plan`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub creates: usize,
    pub updates: usize,
    pub deletes: usize,
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Creates={}, Updates={}, Deletes={}",
            self.creates, self.updates, self.deletes
        )
    }
}
