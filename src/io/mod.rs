pub mod csv_import;
pub mod dataset;

pub use dataset::{load_items, load_raw_export, sample_items, save_items};
