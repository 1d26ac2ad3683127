pub mod change_event;
pub mod log_entry;
pub mod order_record;
pub mod value;
