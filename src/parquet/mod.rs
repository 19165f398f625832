//! Handles serialising and saving aggregates to disk in the _parquet_ file format.

pub mod monthly;
pub mod yearly;

pub use monthly::save_monthly;
pub use yearly::save_yearly;
