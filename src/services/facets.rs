// src/services/facets.rs

//! Decade faceting.
//!
//! Turns resolved years and ranges into the set of decades (multiples of
//! ten) they touch. Flooring is toward negative infinity, so `-447` falls
//! in the `-450` decade, and a range yields every decade it spans.

use std::collections::BTreeSet;

use chrono::{Datelike, Local};

use crate::models::{DateToken, Year, YearRange};
use crate::services::extract::DateExtractor;

/// Floor a year to its decade (`floor(y / 10) * 10`).
pub fn floor10(year: Year) -> Year {
    year.div_euclid(10) * 10
}

/// The current calendar year in local time.
pub fn current_year() -> Year {
    Local::now().year()
}

/// Computes decade facets, optionally dropping years after a cutoff.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecadeFacetEngine {
    /// Years strictly greater than this are excluded
    cutoff: Option<Year>,
}

impl DecadeFacetEngine {
    /// Create an engine that keeps every year.
    pub fn new() -> Self {
        Self { cutoff: None }
    }

    /// Create an engine that drops years after the current calendar year.
    pub fn filtering_future() -> Self {
        Self::with_cutoff(current_year())
    }

    /// Create an engine that drops years strictly greater than `cutoff`.
    pub fn with_cutoff(cutoff: Year) -> Self {
        Self {
            cutoff: Some(cutoff),
        }
    }

    /// Engine honoring a caller-supplied future filter flag.
    pub fn from_flag(filter_future: bool) -> Self {
        if filter_future {
            Self::filtering_future()
        } else {
            Self::new()
        }
    }

    pub fn cutoff(&self) -> Option<Year> {
        self.cutoff
    }

    /// Apply the cutoff to one token. A range crossing the cutoff is
    /// clipped to end there; one starting after it is dropped.
    pub fn clip(&self, token: DateToken) -> Option<DateToken> {
        let Some(cutoff) = self.cutoff else {
            return Some(token);
        };
        match token {
            DateToken::Year(y) if y > cutoff => None,
            DateToken::Range(r) if r.start > cutoff => None,
            DateToken::Range(r) if r.end > cutoff => {
                Some(DateToken::Range(YearRange::new(r.start, cutoff)))
            }
            other => Some(other),
        }
    }

    /// Every decade touched by `tokens`.
    ///
    /// A range `(a, b)` contributes each multiple of ten from `floor10(a)`
    /// up to and including `b`.
    pub fn decades<'a, I>(&self, tokens: I) -> BTreeSet<Year>
    where
        I: IntoIterator<Item = &'a DateToken>,
    {
        let mut decades = BTreeSet::new();
        for token in tokens.into_iter().filter_map(|t| self.clip(*t)) {
            match token {
                DateToken::Year(y) => {
                    decades.insert(floor10(y));
                }
                DateToken::Range(r) => {
                    decades.extend((floor10(r.start)..=r.end).step_by(10));
                }
            }
        }
        decades
    }

    /// Resolved years: a year itself, or both endpoints of a range.
    pub fn years<'a, I>(&self, tokens: I) -> BTreeSet<Year>
    where
        I: IntoIterator<Item = &'a DateToken>,
    {
        let mut years = BTreeSet::new();
        for token in tokens.into_iter().filter_map(|t| self.clip(*t)) {
            match token {
                DateToken::Year(y) => {
                    years.insert(y);
                }
                DateToken::Range(r) => {
                    years.insert(r.start);
                    years.insert(r.end);
                }
            }
        }
        years
    }
}

/// Convenience function for the decades of a token set.
pub fn decades(tokens: &BTreeSet<DateToken>, filter_future: bool) -> BTreeSet<Year> {
    DecadeFacetEngine::from_flag(filter_future).decades(tokens)
}

/// Year and decade facets for the date values of one record.
///
/// Each result is computed on first request and cached for the lifetime
/// of the instance.
#[derive(Debug, Clone)]
pub struct DateFacets {
    values: Vec<String>,
    engine: DecadeFacetEngine,
    tokens: Option<BTreeSet<DateToken>>,
    decades: Option<BTreeSet<Year>>,
}

impl DateFacets {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            engine: DecadeFacetEngine::new(),
            tokens: None,
            decades: None,
        }
    }

    /// Facets for a single date value.
    pub fn single(value: impl Into<String>) -> Self {
        let value: String = value.into();
        Self::new([value])
    }

    /// Use a specific engine (e.g. one with a future cutoff).
    pub fn with_engine(mut self, engine: DecadeFacetEngine) -> Self {
        self.engine = engine;
        self.decades = None;
        self
    }

    /// Resolved tokens across all values.
    pub fn tokens(&mut self) -> &BTreeSet<DateToken> {
        if self.tokens.is_none() {
            let extractor = DateExtractor::new();
            self.tokens = Some(extractor.extract_all(self.values.iter().map(String::as_str)));
        }
        self.tokens.get_or_insert_with(BTreeSet::new)
    }

    /// Decade facets across all values.
    pub fn decades(&mut self) -> &BTreeSet<Year> {
        if self.decades.is_none() {
            let engine = self.engine;
            let decades = engine.decades(self.tokens().iter());
            self.decades = Some(decades);
        }
        self.decades.get_or_insert_with(BTreeSet::new)
    }

    /// Resolved years across all values; ranges contribute their endpoints.
    pub fn years(&mut self) -> BTreeSet<Year> {
        let engine = self.engine;
        engine.years(self.tokens().iter())
    }

    /// Earliest decade, used for sorting records.
    pub fn sort_decade(&mut self) -> Option<Year> {
        self.decades().first().copied()
    }
}
