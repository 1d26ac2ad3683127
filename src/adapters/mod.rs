pub mod log_store;
pub mod records;
pub mod snapshots;
