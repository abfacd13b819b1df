//! Natural-language date range extraction from query text.
//!
//! Queries like "coffee with Ana yesterday" or "december review" imply a
//! date window. The parser recognizes a small fixed set of phrases through
//! an ordered rule table; the first matching rule wins and unrecognized
//! text simply yields no range.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{KirokuError, Result};

/// An inclusive-exclusive range of instants.
///
/// Invariant: `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    /// Start of the range (inclusive).
    pub start: DateTime<Utc>,
    /// End of the range (exclusive).
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Create a new range, rejecting a start after the end.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(KirokuError::invalid_argument(
                "date range start must not be after its end",
            ));
        }
        Ok(Self { start, end })
    }

    /// Check whether an instant falls inside this range.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// A date window implied by a query phrase, relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RelativeRange {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    /// A calendar month (1-12) in the reference year.
    Month(u32),
}

/// Phrase rules checked in priority order; first match wins.
const PHRASE_RULES: &[(&str, RelativeRange)] = &[
    ("today", RelativeRange::Today),
    ("yesterday", RelativeRange::Yesterday),
    ("this week", RelativeRange::ThisWeek),
    ("last week", RelativeRange::LastWeek),
];

/// English month names, indexed by month number minus one.
const MONTH_NAMES: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

lazy_static! {
    // Full-word match so "may" does not fire inside "maybe".
    static ref MONTH_WORD: Regex = Regex::new(
        r"\b(january|february|march|april|may|june|july|august|september|october|november|december)\b"
    )
    .unwrap();
}

/// Extracts an implied date range from free-text queries.
///
/// Deterministic for a fixed query and reference instant, and never fails:
/// anything unrecognized (including calendar arithmetic falling off the
/// supported range) is treated as "no match".
#[derive(Debug, Clone, Copy, Default)]
pub struct TemporalParser;

impl TemporalParser {
    /// Create a new temporal parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse an implied date range out of `query`, relative to `reference_now`.
    pub fn parse(&self, query: &str, reference_now: DateTime<Utc>) -> Option<DateRange> {
        let lowered = query.to_lowercase();
        let today = reference_now.date_naive();

        for (phrase, rule) in PHRASE_RULES {
            if lowered.contains(phrase) {
                return resolve(*rule, today);
            }
        }

        // Several month names may appear; calendar order decides, matching
        // the rule-table ordering of the relative phrases above.
        let month = MONTH_WORD
            .find_iter(&lowered)
            .filter_map(|m| MONTH_NAMES.iter().position(|name| *name == m.as_str()))
            .min()
            .map(|index| index as u32 + 1)?;

        resolve(RelativeRange::Month(month), today)
    }
}

fn resolve(rule: RelativeRange, today: NaiveDate) -> Option<DateRange> {
    let (start_day, end_day) = match rule {
        RelativeRange::Today => (today, today.succ_opt()?),
        RelativeRange::Yesterday => (today.pred_opt()?, today),
        RelativeRange::ThisWeek => {
            let monday =
                today.checked_sub_days(Days::new(today.weekday().num_days_from_monday() as u64))?;
            (monday, monday.checked_add_days(Days::new(7))?)
        }
        RelativeRange::LastWeek => {
            let monday = today
                .checked_sub_days(Days::new(today.weekday().num_days_from_monday() as u64 + 7))?;
            (monday, monday.checked_add_days(Days::new(7))?)
        }
        RelativeRange::Month(month) => {
            let year = today.year();
            let start = NaiveDate::from_ymd_opt(year, month, 1)?;
            // December rolls into January of the next year.
            let end = if month == 12 {
                NaiveDate::from_ymd_opt(year + 1, 1, 1)?
            } else {
                NaiveDate::from_ymd_opt(year, month + 1, 1)?
            };
            (start, end)
        }
    };

    Some(DateRange {
        start: start_of_day(start_day)?,
        end: start_of_day(end_day)?,
    })
}

fn start_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reference_now() -> DateTime<Utc> {
        // A Friday.
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 30, 0).unwrap()
    }

    fn utc_day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_date_range_invariant() {
        let start = utc_day(2024, 3, 15);
        let end = utc_day(2024, 3, 16);
        assert!(DateRange::new(start, end).is_ok());
        assert!(DateRange::new(end, start).is_err());
    }

    #[test]
    fn test_date_range_contains_is_half_open() {
        let range = DateRange::new(utc_day(2024, 3, 15), utc_day(2024, 3, 16)).unwrap();
        assert!(range.contains(utc_day(2024, 3, 15)));
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap()));
        assert!(!range.contains(utc_day(2024, 3, 16)));
        assert!(!range.contains(utc_day(2024, 3, 14)));
    }

    #[test]
    fn test_parse_today() {
        let range = TemporalParser::new()
            .parse("what did I write today", reference_now())
            .unwrap();
        assert_eq!(range.start, utc_day(2024, 3, 15));
        assert_eq!(range.end, utc_day(2024, 3, 16));
    }

    #[test]
    fn test_parse_yesterday() {
        let range = TemporalParser::new()
            .parse("Yesterday's run", reference_now())
            .unwrap();
        assert_eq!(range.start, utc_day(2024, 3, 14));
        assert_eq!(range.end, utc_day(2024, 3, 15));
    }

    #[test]
    fn test_parse_this_week() {
        let range = TemporalParser::new()
            .parse("workouts this week", reference_now())
            .unwrap();
        assert_eq!(range.start, utc_day(2024, 3, 11));
        assert_eq!(range.end, utc_day(2024, 3, 18));
    }

    #[test]
    fn test_parse_last_week() {
        let range = TemporalParser::new()
            .parse("how was last week", reference_now())
            .unwrap();
        assert_eq!(range.start, utc_day(2024, 3, 4));
        assert_eq!(range.end, utc_day(2024, 3, 11));
    }

    #[test]
    fn test_parse_month_name() {
        let range = TemporalParser::new()
            .parse("entries from january", reference_now())
            .unwrap();
        assert_eq!(range.start, utc_day(2024, 1, 1));
        assert_eq!(range.end, utc_day(2024, 2, 1));
    }

    #[test]
    fn test_parse_december_rolls_into_next_year() {
        let range = TemporalParser::new()
            .parse("December review", reference_now())
            .unwrap();
        assert_eq!(range.start, utc_day(2024, 12, 1));
        assert_eq!(range.end, utc_day(2025, 1, 1));
    }

    #[test]
    fn test_month_requires_full_word() {
        let parser = TemporalParser::new();
        assert!(parser.parse("maybe something nice", reference_now()).is_none());
        assert!(parser.parse("thoughts on may", reference_now()).is_some());
    }

    #[test]
    fn test_relative_phrases_beat_month_names() {
        let range = TemporalParser::new()
            .parse("today compared to january", reference_now())
            .unwrap();
        assert_eq!(range.start, utc_day(2024, 3, 15));
    }

    #[test]
    fn test_earliest_month_wins_on_multiple_names() {
        let range = TemporalParser::new()
            .parse("december versus january", reference_now())
            .unwrap();
        assert_eq!(range.start, utc_day(2024, 1, 1));
    }

    #[test]
    fn test_parse_no_match() {
        assert!(
            TemporalParser::new()
                .parse("quiet afternoon reading", reference_now())
                .is_none()
        );
        assert!(TemporalParser::new().parse("", reference_now()).is_none());
    }
}
