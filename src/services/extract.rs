// src/services/extract.rs

//! Date extraction from free-text metadata values.
//!
//! Extraction runs in three stages:
//! 1. a strict parse against common calendar layouts (ISO-8601 and
//!    RFC 3339 timestamps, month names, numeric dates),
//! 2. the same parse after stripping a non-digit prefix such as `ca.`,
//!    `c` or `[`,
//! 3. a left-to-right scan for every non-overlapping grammar match.
//!
//! Nothing here fails: a value with no recognizable date yields an empty set.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use regex::Captures;

use crate::models::{DateToken, Year};
use crate::services::normalize::resolve_unknown_ones;
use crate::services::patterns::{Grammar, PatternLibrary, UNCERTAINTY_MARKERS, library};

/// Calendar layouts tried by the strict parse: `(format, prefix, suffix)`.
///
/// Partial dates are completed with the prefix/suffix so that chrono can
/// build a full date; only the year is kept.
const DATE_LAYOUTS: [(&str, &str, &str); 12] = [
    ("%Y-%m-%d", "", ""),
    ("%Y-%m-%d", "", "-01"),
    ("%Y-%m-%d", "", "-01-01"),
    ("%Y/%m/%d", "", ""),
    ("%Y/%m/%d", "", "/01"),
    ("%m/%d/%Y", "", ""),
    ("%d-%B-%y", "", ""),
    ("%d-%B-%Y", "", ""),
    ("%d-%B-%y", "01-", ""),
    ("%d %B %Y", "", ""),
    ("%d %B %Y", "01 ", ""),
    ("%B %d, %Y", "", ""),
];

const DATETIME_LAYOUTS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Stage of extraction that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Strict,
    Stripped,
    Scan,
}

/// Era marked by a year suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Era {
    Bce,
    Ce,
}

/// A year resolved from the start of a token, with its suffix era.
#[derive(Debug, Clone, Copy)]
struct ResolvedYear {
    value: Year,
    era: Option<Era>,
}

/// Extracts years and year ranges from raw date strings.
#[derive(Clone, Copy)]
pub struct DateExtractor {
    patterns: &'static PatternLibrary,
}

impl DateExtractor {
    /// Create an extractor backed by the shared pattern library.
    pub fn new() -> Self {
        Self {
            patterns: library(),
        }
    }

    /// Extract every year and year range mentioned in `raw`.
    pub fn extract(&self, raw: &str) -> BTreeSet<DateToken> {
        self.extract_with_stage(raw).0
    }

    /// Union of [`extract`](Self::extract) over several values.
    pub fn extract_all<'a, I>(&self, values: I) -> BTreeSet<DateToken>
    where
        I: IntoIterator<Item = &'a str>,
    {
        values
            .into_iter()
            .flat_map(|value| self.extract(value))
            .collect()
    }

    /// Extract and report which stage produced the result.
    pub fn extract_with_stage(&self, raw: &str) -> (BTreeSet<DateToken>, Stage) {
        if let Some(year) = self.parse_strict(raw) {
            log::debug!("'{}' parsed strictly -> {}", raw, year);
            return (BTreeSet::from([DateToken::Year(year)]), Stage::Strict);
        }

        let stripped = raw.trim_start_matches(|c: char| !c.is_ascii_digit());
        if stripped.len() != raw.len() {
            if let Some(year) = self.parse_strict(stripped) {
                log::debug!("'{}' parsed after prefix strip -> {}", raw, year);
                return (BTreeSet::from([DateToken::Year(year)]), Stage::Stripped);
            }
        }

        let tokens = self.scan(raw);
        log::debug!("'{}' scanned -> {} token(s)", raw, tokens.len());
        (tokens, Stage::Scan)
    }

    /// Strict parse against the fixed layout table, returning the year.
    pub fn parse_strict(&self, raw: &str) -> Option<Year> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.year());
        }

        let has_full_year = self.patterns.four_digits(text).is_some();
        let leads_with_year = starts_with_year(text);

        for format in DATETIME_LAYOUTS {
            if leads_with_year {
                if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
                    return Some(dt.year());
                }
            }
        }

        for (format, prefix, suffix) in DATE_LAYOUTS {
            if format.contains("%Y") && !has_full_year {
                continue;
            }
            if format.starts_with("%Y") && !leads_with_year {
                continue;
            }
            let candidate = format!("{prefix}{text}{suffix}");
            if let Ok(date) = NaiveDate::parse_from_str(&candidate, format) {
                return Some(date.year());
            }
        }
        None
    }

    /// Scan for every non-overlapping grammar match, left to right.
    fn scan(&self, raw: &str) -> BTreeSet<DateToken> {
        let mut tokens = BTreeSet::new();

        for caps in self.patterns.composite().captures_iter(raw) {
            let Some((grammar, start, text)) = matched_grammar(&caps) else {
                continue;
            };

            let token = match grammar {
                Grammar::Century => self.resolve_century(raw, start, text),
                Grammar::YearRange => self.resolve_range(text),
                Grammar::DayMonthYearTime => self.resolve_day_month_year(text),
                Grammar::UncertainYear => resolve_unknown_ones(text).map(DateToken::Year),
                Grammar::PlainYear => self.resolve_year(text).map(|y| DateToken::Year(y.value)),
            };

            match token {
                Some(token) => {
                    tokens.insert(token);
                }
                None => log::debug!(
                    "Discarding unresolvable {} match '{}' in '{}'",
                    grammar.name(),
                    text,
                    raw
                ),
            }
        }
        tokens
    }

    /// `N`th century: `[100(N-1), 100(N-1)+99]`, or `[-100N, -100N+99]` BCE.
    fn resolve_century(&self, raw: &str, start: usize, text: &str) -> Option<DateToken> {
        // "21st C" must not be read as "1st C"
        if raw[..start]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_digit())
        {
            return None;
        }

        let caps = self.patterns.century_capture().captures(text)?;
        let ordinal: Year = caps.name("ordinal")?.as_str().parse().ok()?;
        let bce = caps
            .name("suffix")
            .is_some_and(|s| self.patterns.is_bce(s.as_str()));

        let first = if bce {
            ordinal.checked_mul(-100)?
        } else {
            ordinal.checked_sub(1)?.checked_mul(100)?
        };
        Some(DateToken::range(first, first + 99))
    }

    /// Both sides resolve independently, then a lone BCE suffix is
    /// propagated across the range.
    fn resolve_range(&self, text: &str) -> Option<DateToken> {
        let caps = self.patterns.range_split().captures(text)?;
        let start = self.resolve_year(caps.name("start")?.as_str())?;
        let end = self.resolve_year(caps.name("end")?.as_str())?;

        let (mut a, mut b) = (start.value, end.value);
        match (start.era, end.era) {
            // "447-432 BC"
            (None, Some(Era::Bce)) => a = -a.abs(),
            // "300 BC-100", but not "50 BC-100"
            (Some(Era::Bce), None) if b.abs() <= a.abs() => b = -b.abs(),
            _ => {}
        }
        Some(DateToken::range(a, b))
    }

    fn resolve_day_month_year(&self, text: &str) -> Option<DateToken> {
        let caps = self.patterns.dmy_capture().captures(text)?;
        let year = self.resolve_year(caps.name("year")?.as_str())?;
        Some(DateToken::Year(year.value))
    }

    /// Resolve the year at the start of `text`, applying its suffix.
    ///
    /// A lone uncertainty marker right after a short year (`196-`) rounds
    /// the year down to its decade.
    fn resolve_year(&self, text: &str) -> Option<ResolvedYear> {
        let caps = self.patterns.year_capture().captures(text)?;
        let (digits, suffix) = match caps.name("short") {
            Some(short) => (short.as_str(), caps.name("short_suffix")),
            None => (caps.name("long")?.as_str(), caps.name("long_suffix")),
        };

        let rest = &text[caps.get(0)?.end()..];
        let mut markers = rest.chars();
        let uncertain = suffix.is_none()
            && digits.len() < 4
            && markers.next().is_some_and(|c| UNCERTAINTY_MARKERS.contains(&c))
            && markers.next().is_none();

        let magnitude: Year = if uncertain {
            resolve_unknown_ones(&format!("{digits}{rest}"))?
        } else {
            digits.parse().ok()?
        };

        let era = suffix.map(|s| {
            if self.patterns.is_bce(s.as_str()) {
                Era::Bce
            } else {
                Era::Ce
            }
        });
        let value = match era {
            Some(Era::Bce) => -magnitude,
            _ => magnitude,
        };
        Some(ResolvedYear { value, era })
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to extract with the shared library.
pub fn extract(raw: &str) -> BTreeSet<DateToken> {
    DateExtractor::new().extract(raw)
}

/// The grammar whose group participated in a composite match.
fn matched_grammar<'t>(caps: &Captures<'t>) -> Option<(Grammar, usize, &'t str)> {
    Grammar::PRIORITY.iter().find_map(|g| {
        caps.name(g.group())
            .map(|m| (*g, m.start(), m.as_str()))
    })
}

/// Four digits at the start, not followed by a fifth.
fn starts_with_year(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 4
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes.get(4).is_none_or(|b| !b.is_ascii_digit())
}
