// src/lib.rs

//! Decade facet library
//!
//! Extracts years and decades from free-text metadata dates and ranks a
//! record's identifier links for indexing.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
