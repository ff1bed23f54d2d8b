//! PropRecordStore: name -> record mapping.

use std::collections::HashMap;
use std::sync::Arc;

use crate::app::status::{PropCounts, PropStatus};
use crate::domain::{PropName, PropRecord};
use crate::ports::Clock;

/// Arena-style mapping from name to its resolution record.
///
/// Design:
/// - Records are created lazily on first reference and never removed;
///   teardown is the owning host's concern.
/// - The store is exclusively owned by one Resolver (behind one lock);
///   records are never aliased outside its API.
pub struct PropRecordStore {
    records: HashMap<PropName, PropRecord>,
    clock: Arc<dyn Clock>,
}

impl PropRecordStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: HashMap::new(),
            clock,
        }
    }

    /// Return the record for `name`, creating a fresh one on first call.
    ///
    /// Total over any name; a fresh record has zero counters and no value.
    pub fn get_or_create(&mut self, name: &PropName) -> &mut PropRecord {
        let now = self.clock.now();
        self.records
            .entry(name.clone())
            .or_insert_with(|| PropRecord::new(now))
    }

    pub fn has(&self, name: &PropName) -> bool {
        self.records.contains_key(name)
    }

    pub fn get(&self, name: &PropName) -> Option<&PropRecord> {
        self.records.get(name)
    }

    pub fn get_mut(&mut self, name: &PropName) -> Option<&mut PropRecord> {
        self.records.get_mut(name)
    }

    /// Resolved value for `name`; None if the record is missing or empty.
    pub fn resolved_value_of(&self, name: &PropName) -> Option<&serde_json::Value> {
        self.records.get(name).and_then(PropRecord::resolved_value)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Counts for observability.
    pub fn counts(&self) -> PropCounts {
        let mut counts = PropCounts {
            tracked: self.records.len(),
            ..PropCounts::default()
        };
        for record in self.records.values() {
            if record.is_loading() {
                counts.loading += 1;
            }
            if record.resolved_value().is_some() {
                counts.resolved += 1;
            }
        }
        counts
    }

    /// Per-name status views, sorted by name for stable output.
    pub fn statuses(&self) -> Vec<PropStatus> {
        let mut statuses: Vec<PropStatus> = self
            .records
            .iter()
            .map(|(name, record)| PropStatus {
                name: name.clone(),
                pending_count: record.pending_count(),
                resolved_count: record.resolved_count(),
                loading: record.is_loading(),
                has_value: record.resolved_value().is_some(),
                updated_at: record.updated_at(),
            })
            .collect();
        statuses.sort_by(|a, b| a.name.cmp(&b.name));
        statuses
    }
}
