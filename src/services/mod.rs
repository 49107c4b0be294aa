//! Service layer for the facet engine.
//!
//! This module contains the business logic for:
//! - Date grammar matching (`PatternLibrary`)
//! - Date extraction (`DateExtractor`)
//! - Decade faceting (`DecadeFacetEngine`, `DateFacets`)
//! - Link ranking (`HyperlinkRelevanceScorer`)
//! - Index field building (`DocumentBuilder`)

pub mod document;
pub mod extract;
pub mod facets;
pub mod links;
pub mod normalize;
pub mod patterns;

pub use document::DocumentBuilder;
pub use extract::{DateExtractor, Stage};
pub use facets::{DateFacets, DecadeFacetEngine, decades, floor10};
pub use links::{HyperlinkRelevanceScorer, RankedLinks};
pub use normalize::resolve_unknown_ones;
pub use patterns::{Grammar, PatternLibrary};
