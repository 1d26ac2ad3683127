use crate::core::errors::Result;
use crate::core::models::order_record::OrderRecord;

/// Port for reading the current state of an order from the host platform.
pub trait RecordProvider {
    /// The order's comparable state, or `None` if it cannot be found.
    fn fetch(&self, record_id: &str) -> Result<Option<OrderRecord>>;
}
