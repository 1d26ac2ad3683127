use std::collections::BTreeMap;

use chrono::Utc;

use crate::core::models::change_event::{ChangeEvent, ChangeKind, FieldChange};
use crate::core::models::log_entry::{Actor, LogEntry};
use crate::core::models::order_record::OrderRecord;
use crate::core::models::value::Value;
use crate::core::services::classifier::ChangeClassifier;
use crate::core::services::formatter::format_for_storage;
use crate::core::traits::log_store::LogStore;
use crate::core::traits::snapshot_store::SnapshotStore;

/// What one detection cycle did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CycleReport {
    /// Whether a "before" snapshot was available.
    pub snapshot_found: bool,
    /// Every classified event, logged or not.
    pub events: Vec<ChangeEvent>,
    /// Ids of the entries written to the change log.
    pub logged: Vec<u64>,
    /// Events the change log refused.
    pub failed: usize,
}

/// Runs snapshot, compare, log and cleanup cycles for orders.
///
/// Storage failures never reach the caller: the order update that
/// triggered the cycle matters more than its audit trail, so failures
/// are reported through `tracing` and the cycle carries on.
pub struct ChangeTracker<'a> {
    snapshots: &'a dyn SnapshotStore,
    log: &'a dyn LogStore,
    classifier: ChangeClassifier,
    actor: Actor,
    enabled: bool,
}

impl<'a> ChangeTracker<'a> {
    pub fn new(
        snapshots: &'a dyn SnapshotStore,
        log: &'a dyn LogStore,
        classifier: ChangeClassifier,
        actor: Actor,
    ) -> Self {
        Self {
            snapshots,
            log,
            classifier,
            actor,
            enabled: true,
        }
    }

    /// Turn every write path into a no-op when `enabled` is false.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Capture the "before" state of an order.
    ///
    /// Returns false if tracking is off or the snapshot could not be
    /// stored, in which case the next `finish` finds nothing to compare.
    pub fn begin(&self, record_id: &str, current: &OrderRecord) -> bool {
        if !self.enabled {
            return false;
        }

        match self.snapshots.store(record_id, current) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(record_id, error = %e, "could not store snapshot, skipping change detection");
                false
            }
        }
    }

    /// Compare the stored snapshot with the current state, log every
    /// change, then drop the snapshot.
    ///
    /// A missing snapshot or a missing current record is a no-op.
    pub fn finish(&self, record_id: &str, current: Option<&OrderRecord>) -> CycleReport {
        let before = match self.snapshots.get(record_id) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(record_id, error = %e, "could not read snapshot");
                None
            }
        };

        let mut report = CycleReport {
            snapshot_found: before.is_some(),
            ..CycleReport::default()
        };

        if self.enabled {
            report.events = self.classifier.classify(record_id, before.as_ref(), current);
            tracing::debug!(record_id, events = report.events.len(), "changes classified");

            for event in &report.events {
                match self.log.append(self.entry_for(event)) {
                    Ok(id) => report.logged.push(id),
                    Err(e) => {
                        tracing::warn!(record_id, action = %event.kind, error = %e, "could not write change log entry");
                        report.failed += 1;
                    }
                }
            }
        }

        if report.snapshot_found
            && let Err(e) = self.snapshots.delete(record_id)
        {
            tracing::warn!(record_id, error = %e, "could not delete snapshot");
        }

        report
    }

    /// Record a single change directly, without a snapshot.
    ///
    /// Used for changes that arrive as discrete events (a coupon applied,
    /// a note added, a refund). Returns the entry id, or `None` if
    /// tracking is off or the log refused the entry.
    pub fn log_change(
        &self,
        record_id: &str,
        kind: ChangeKind,
        field_name: Option<&str>,
        old_value: Value,
        new_value: Value,
        payload: Option<BTreeMap<String, FieldChange>>,
    ) -> Option<u64> {
        if !self.enabled {
            return None;
        }

        let event = ChangeEvent {
            record_id: record_id.to_string(),
            kind,
            field_name: field_name.map(str::to_string),
            old_value,
            new_value,
            payload,
        };

        match self.log.append(self.entry_for(&event)) {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(record_id, action = %kind, error = %e, "could not write change log entry");
                None
            }
        }
    }

    fn entry_for(&self, event: &ChangeEvent) -> LogEntry {
        let additional_data = event.payload.as_ref().map(|payload| {
            serde_json::Value::Object(
                payload
                    .iter()
                    .map(|(field, change)| {
                        (
                            field.clone(),
                            serde_json::json!({
                                "old": serde_json::Value::from(&change.old),
                                "new": serde_json::Value::from(&change.new),
                            }),
                        )
                    })
                    .collect(),
            )
        });

        LogEntry {
            id: 0,
            order_id: event.record_id.clone(),
            timestamp: Utc::now(),
            user: self.actor.name.clone(),
            email: self.actor.email.clone(),
            action: event.kind,
            field_name: event.field_name.clone(),
            old_value: format_for_storage(&event.old_value),
            new_value: format_for_storage(&event.new_value),
            additional_data,
        }
    }
}
