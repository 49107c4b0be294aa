// src/models/mod.rs

//! Domain models for the facet engine.
//!
//! Plain data only: resolved dates, link ranking inputs and outputs,
//! harvested records, and configuration.

pub mod config;
mod date;
mod link;
mod record;

// Re-export all public types
pub use config::{Config, FacetConfig, LinkConfig};
pub use date::{DateToken, Year, YearRange};
pub use link::{HeuristicContext, ScoredLink};
pub use record::{DcField, DcRecord, IndexFields};
