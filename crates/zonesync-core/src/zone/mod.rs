//! Zone model
//!
//! A [`Zone`] is the complete set of record-sets of one DNS domain, keyed by
//! `(name, type)`. Zones are filled either from a desired-state source or by
//! a provider's `populate`, and two zones are compared with
//! [`Zone::changes`] to produce a [`Plan`].

pub mod plan;
pub mod record;

pub use plan::{Change, Plan, PlanSummary};
pub use record::{
    CaaValue, MxValue, Record, RecordData, RecordType, SrvValue, SshfpValue, TlsaValue,
};

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// A DNS zone and its record-sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    name: String,
    records: BTreeMap<(String, RecordType), Record>,
}

impl Zone {
    /// Create an empty zone
    ///
    /// The name must be fully qualified, ending in the root label (`.`).
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.len() < 2 || !name.ends_with('.') {
            return Err(Error::config(format!(
                "Invalid zone name \"{}\": must end with a trailing .",
                name
            )));
        }

        Ok(Self {
            name,
            records: BTreeMap::new(),
        })
    }

    /// Fully qualified zone name, including the trailing dot
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zone name without the trailing root label
    pub fn bare_name(&self) -> &str {
        self.name.strip_suffix('.').unwrap_or(&self.name)
    }

    /// Add a record-set to the zone
    ///
    /// A second record with the same name and type is always rejected. A
    /// CNAME sharing its name with other record types is rejected unless
    /// `lenient` is set.
    pub fn add_record(&mut self, record: Record, lenient: bool) -> Result<()> {
        let key = record.key();
        if self.records.contains_key(&key) {
            return Err(Error::DuplicateRecord(format!(
                "{} {} already exists in {}",
                record.display_name(),
                key.1,
                self.name
            )));
        }

        let conflict = self.records.keys().any(|(name, rtype)| {
            name == &key.0 && (*rtype == RecordType::Cname || key.1 == RecordType::Cname)
        });
        if conflict {
            let msg = format!(
                "{} in {}: CNAME cannot coexist with other records",
                record.display_name(),
                self.name
            );
            if !lenient {
                return Err(Error::invalid_record(msg));
            }
            tracing::warn!("Keeping conflicting record (lenient): {}", msg);
        }

        self.records.insert(key, record);
        Ok(())
    }

    /// Look up the record-set at `(name, record_type)`
    pub fn get(&self, name: &str, record_type: RecordType) -> Option<&Record> {
        self.records.get(&(name.to_string(), record_type))
    }

    /// Record-sets in `(name, type)` order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Number of record-sets
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the zone holds no record-sets
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Changes that turn `existing` into `self`
    ///
    /// Deletes and updates come first, in `(name, type)` order of the
    /// existing records, followed by creates in `(name, type)` order of the
    /// desired ones. Two records differ when their TTL or values differ.
    pub fn changes(&self, existing: &Zone) -> Vec<Change> {
        let mut changes = Vec::new();

        for (key, current) in &existing.records {
            match self.records.get(key) {
                None => changes.push(Change::Delete {
                    existing: current.clone(),
                }),
                Some(wanted) if wanted != current => changes.push(Change::Update {
                    existing: current.clone(),
                    new: wanted.clone(),
                }),
                Some(_) => {}
            }
        }

        for (key, wanted) in &self.records {
            if !existing.records.contains_key(key) {
                changes.push(Change::Create {
                    new: wanted.clone(),
                });
            }
        }

        changes
    }
}
