//! Pipeline entry points for batch operations.
//!
//! - `run_records`: Build index fields for a file of harvested records

pub mod records;

pub use records::{build_index, run_records};
