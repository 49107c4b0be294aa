//! Resolved date values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A signed year. BCE years are negative magnitudes (`500 BC` is `-500`);
/// there is no year-zero offset.
pub type Year = i32;

/// An explicit "from-to" mention, ordered so that `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearRange {
    pub start: Year,
    pub end: Year,
}

impl YearRange {
    /// Create a range, swapping the endpoints if they arrive reversed.
    pub fn new(a: Year, b: Year) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Whether `year` lies inside the range (inclusive).
    pub fn contains(&self, year: Year) -> bool {
        self.start <= year && year <= self.end
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// The unit produced by resolving one pattern match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateToken {
    Year(Year),
    Range(YearRange),
}

impl DateToken {
    /// Convenience constructor for a range token.
    pub fn range(a: Year, b: Year) -> Self {
        Self::Range(YearRange::new(a, b))
    }
}

impl From<Year> for DateToken {
    fn from(year: Year) -> Self {
        Self::Year(year)
    }
}

impl From<YearRange> for DateToken {
    fn from(range: YearRange) -> Self {
        Self::Range(range)
    }
}

impl fmt::Display for DateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateToken::Year(y) => write!(f, "{y}"),
            DateToken::Range(r) => r.fmt(f),
        }
    }
}
