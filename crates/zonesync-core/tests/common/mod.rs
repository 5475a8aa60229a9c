//! Test doubles and common utilities for contract tests
//!
//! This module provides a minimal in-memory provider that verifies the
//! provider contract without talking to any API.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use zonesync_core::error::Result;
use zonesync_core::{Change, Plan, Record, RecordData, RecordType, Zone, ZoneProvider};

/// An in-memory ZoneProvider that tracks calls
pub struct MemoryProvider {
    /// Records currently "at the provider", or None when the zone is absent
    remote: Option<Zone>,
    /// Types this provider accepts
    supported: BTreeSet<RecordType>,
    /// Call counter for populate()
    populate_call_count: Arc<AtomicUsize>,
    /// Changes seen by apply(), in order
    applied: Arc<Mutex<Vec<Change>>>,
}

impl MemoryProvider {
    pub fn new(remote: Option<Zone>) -> Self {
        Self {
            remote,
            supported: RecordType::ALL.into_iter().collect(),
            populate_call_count: Arc::new(AtomicUsize::new(0)),
            applied: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Restrict the supported record types
    pub fn supporting(mut self, types: &[RecordType]) -> Self {
        self.supported = types.iter().copied().collect();
        self
    }

    /// Get the number of times populate() was called
    pub fn populate_call_count(&self) -> usize {
        self.populate_call_count.load(Ordering::SeqCst)
    }

    /// Get the changes passed to apply()
    pub fn applied(&self) -> Vec<Change> {
        self.applied.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ZoneProvider for MemoryProvider {
    fn id(&self) -> &str {
        "memory"
    }

    fn provider_name(&self) -> &'static str {
        "memory"
    }

    fn supports(&self, record_type: RecordType) -> bool {
        self.supported.contains(&record_type)
    }

    async fn list_zones(&mut self) -> Result<Vec<String>> {
        Ok(self.remote.iter().map(|z| z.name().to_string()).collect())
    }

    async fn populate(&mut self, zone: &mut Zone, _target: bool, lenient: bool) -> Result<bool> {
        self.populate_call_count.fetch_add(1, Ordering::SeqCst);
        match &self.remote {
            Some(remote) => {
                for record in remote.records() {
                    zone.add_record(record.clone(), lenient)?;
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn apply(&mut self, plan: &Plan) -> Result<usize> {
        self.applied.lock().unwrap().extend(plan.changes.iter().cloned());
        Ok(plan.changes.len())
    }
}

/// Build a validated A record
pub fn a(name: &str, ttl: u32, values: &[&str]) -> Record {
    let values = values.iter().map(|v| v.to_string()).collect();
    Record::new(name, ttl, RecordData::A(values), false).expect("valid A record")
}

/// Build an empty `unit.tests.` zone holding `records`
pub fn zone_with(records: Vec<Record>) -> Zone {
    let mut zone = Zone::new("unit.tests.").expect("valid zone name");
    for record in records {
        zone.add_record(record, false).expect("record added");
    }
    zone
}
