pub mod log_store;
pub mod record_provider;
pub mod snapshot_store;
