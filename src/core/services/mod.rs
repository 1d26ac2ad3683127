pub mod classifier;
pub mod differ;
pub mod formatter;
pub mod tracker;
