use crate::core::errors::Result;
use crate::core::models::order_record::OrderRecord;

/// Port for short-lived "before" copies of an order.
///
/// Implementations keep a deep copy keyed by record id and forget it
/// once its time-to-live has passed.
pub trait SnapshotStore: Send + Sync {
    /// Save a copy of `snapshot`, replacing any previous one for this id.
    fn store(&self, record_id: &str, snapshot: &OrderRecord) -> Result<()>;

    /// The stored snapshot, or `None` if there is none or it expired.
    fn get(&self, record_id: &str) -> Result<Option<OrderRecord>>;

    /// Forget the snapshot. Succeeds when there is nothing to delete.
    fn delete(&self, record_id: &str) -> Result<()>;
}
