//! Salescope: exploratory data analysis CLI for retail sales data
//!
//! This library implements a sequential EDA pipeline over a sales CSV:
//! loading, cleaning, descriptive statistics, time-series aggregation,
//! customer/product/payment segmentation, chart rendering, and writing
//! the cleaned dataset back out.

pub mod cli;
pub mod data;
pub mod segments;
pub mod stats;
pub mod timeseries;
pub mod viz;

// Re-export public items for easier access
pub use cli::Args;
pub use data::{clean_records, load_records, write_cleaned, RawRecord, SalesRecord, SalesTable};

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
