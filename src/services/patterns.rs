// src/services/patterns.rs

//! Date grammars for free-text metadata dates.
//!
//! Five grammars are tried at every position in a fixed priority order:
//! century, year range, day-month-year-time, uncertain year, plain year.
//! The looser grammars come last so that a plain year never swallows part
//! of a range or a century mention.
//!
//! The regex crate has no look-around, so the range grammar consumes one
//! trailing non-digit instead of asserting it. Every grammar starts with a
//! digit, so the consumed character can never begin the next match.

use std::sync::LazyLock;

use regex::Regex;

const SUFFIX_BCE: &str = r"BCE|B\.C\.E\.|BC|B\.C\.";
const SUFFIX_CE: &str = r"AD|A\.D\.|CE|C\.E\.";
const MONTH_NUM: &str = r"(?:0[1-9]|1[0-2])";
const DAY_NUM: &str = r"(?:0[1-9]|[12][0-9]|3[01])";
const MONTH_ABBR: &str = r"(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)";
const CLOCK: &str = r"[0-9]{1,2}[.:][0-9]{2}(?:[apAP]\.?[mM]\.?)?";
const ORDINAL: &str = r"(?:1st|2nd|3rd|(?:[4-9]|1[0-9]|20)th)";
const UNCERTAIN: &str = r"[1-9][0-9]{1,3}[-*?]";

/// Characters that stand in for an unknown ones digit.
pub const UNCERTAINTY_MARKERS: [char; 3] = ['-', '*', '?'];

/// A named date grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    Century,
    YearRange,
    DayMonthYearTime,
    UncertainYear,
    PlainYear,
}

impl Grammar {
    /// Matching priority, highest first.
    pub const PRIORITY: [Grammar; 5] = [
        Grammar::Century,
        Grammar::YearRange,
        Grammar::DayMonthYearTime,
        Grammar::UncertainYear,
        Grammar::PlainYear,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Grammar::Century => "century",
            Grammar::YearRange => "year-range",
            Grammar::DayMonthYearTime => "day-month-year-time",
            Grammar::UncertainYear => "uncertain-year",
            Grammar::PlainYear => "plain-year",
        }
    }

    /// Capture group name of this grammar inside the composite pattern.
    pub(crate) fn group(&self) -> &'static str {
        match self {
            Grammar::Century => "century",
            Grammar::YearRange => "range",
            Grammar::DayMonthYearTime => "dmy",
            Grammar::UncertainYear => "uncertain",
            Grammar::PlainYear => "year",
        }
    }

    fn source(&self) -> String {
        match self {
            Grammar::Century => century(),
            Grammar::YearRange => year_range(),
            Grammar::DayMonthYearTime => day_month_year_time(),
            Grammar::UncertainYear => UNCERTAIN.to_string(),
            Grammar::PlainYear => year(),
        }
    }
}

fn suffix() -> String {
    format!("(?:{SUFFIX_BCE}|{SUFFIX_CE})")
}

/// 1-2 digit years need a suffix; 3-4 digit years may carry one.
fn year() -> String {
    let suffix = suffix();
    format!(r"(?:[1-9][0-9]?\s?{suffix}|[1-9][0-9]{{2,3}}(?:\s?{suffix})?)")
}

/// A year optionally followed by a numeric month or an uncertainty marker.
fn year_month() -> String {
    let year = year();
    format!(r"{year}(?:[-/]{MONTH_NUM}|[-*?])?")
}

fn year_range() -> String {
    let side = year_month();
    format!(r"{side}\s*[-/]\s*{side}")
}

fn day_month_year_time() -> String {
    let year = year();
    format!(r"{DAY_NUM}\s+{MONTH_ABBR}\s+{year}(?:\.\s+{CLOCK})?")
}

fn century() -> String {
    let suffix = suffix();
    format!(r"{ORDINAL}\s+[cC](?:entury)?(?:\s+{suffix})?")
}

/// Compiled grammars plus the capture patterns used to resolve a match.
pub struct PatternLibrary {
    grammars: Vec<(Grammar, Regex)>,
    composite: Regex,
    year_capture: Regex,
    range_split: Regex,
    century_capture: Regex,
    dmy_capture: Regex,
    bce: Regex,
    four_digits: Regex,
}

static LIBRARY: LazyLock<PatternLibrary> = LazyLock::new(PatternLibrary::build);

/// The process-wide pattern library, compiled on first use.
pub fn library() -> &'static PatternLibrary {
    &LIBRARY
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("date grammar must be a valid regex")
}

impl PatternLibrary {
    fn build() -> Self {
        let grammars = Grammar::PRIORITY
            .iter()
            .map(|g| (*g, compile(&format!("^(?:{})$", g.source()))))
            .collect();

        let branches: Vec<String> = Grammar::PRIORITY
            .iter()
            .map(|g| match g {
                Grammar::YearRange => format!("(?P<{}>{})(?:[^0-9]|$)", g.group(), g.source()),
                _ => format!("(?P<{}>{})", g.group(), g.source()),
            })
            .collect();
        let composite = compile(&branches.join("|"));

        let suffix = suffix();
        let year_capture = compile(&format!(
            r"^(?:(?P<short>[1-9][0-9]?)\s?(?P<short_suffix>{suffix})|(?P<long>[1-9][0-9]{{2,3}})(?:\s?(?P<long_suffix>{suffix}))?)"
        ));
        let side = year_month();
        let range_split = compile(&format!(
            r"^(?P<start>{side})\s*[-/]\s*(?P<end>{side})$"
        ));
        let century_capture = compile(&format!(
            r"^(?P<ordinal>[0-9]+)(?:st|nd|rd|th)\s+[cC](?:entury)?(?:\s+(?P<suffix>{suffix}))?$"
        ));
        let year = self::year();
        let dmy_capture = compile(&format!(
            r"^{DAY_NUM}\s+{MONTH_ABBR}\s+(?P<year>{year})"
        ));

        Self {
            grammars,
            composite,
            year_capture,
            range_split,
            century_capture,
            dmy_capture,
            bce: compile(&format!("^(?:{SUFFIX_BCE})$")),
            four_digits: compile("[0-9]{4}"),
        }
    }

    /// Grammars in priority order.
    pub fn grammars(&self) -> impl Iterator<Item = Grammar> + '_ {
        self.grammars.iter().map(|(g, _)| *g)
    }

    /// Whether `text` as a whole is an instance of `grammar`.
    pub fn matches(&self, grammar: Grammar, text: &str) -> bool {
        self.grammars
            .iter()
            .find(|(g, _)| *g == grammar)
            .is_some_and(|(_, re)| re.is_match(text))
    }

    /// Alternation of every grammar in priority order, one named group each.
    pub fn composite(&self) -> &Regex {
        &self.composite
    }

    /// Leading year with optional suffix: groups `short`/`short_suffix`
    /// (1-2 digits) or `long`/`long_suffix` (3-4 digits).
    pub fn year_capture(&self) -> &Regex {
        &self.year_capture
    }

    /// Splits a year range into `start` and `end`.
    pub fn range_split(&self) -> &Regex {
        &self.range_split
    }

    /// Captures `ordinal` and optional `suffix` of a century mention.
    pub fn century_capture(&self) -> &Regex {
        &self.century_capture
    }

    /// Captures the `year` of a day-month-year-time mention.
    pub fn dmy_capture(&self) -> &Regex {
        &self.dmy_capture
    }

    /// Whether a suffix marks a year before the epoch.
    pub fn is_bce(&self, suffix: &str) -> bool {
        self.bce.is_match(suffix)
    }

    /// First run of four consecutive digits.
    pub fn four_digits<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.four_digits.find(text).map(|m| m.as_str())
    }
}
