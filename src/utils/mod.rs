//! Utility functions and helpers.

pub mod url;
