//! Text parsing for listing facts: compact counts, seller tenure and listing age.
//!
//! All calendar arithmetic takes an explicit `now` so results are
//! reproducible under a fixed reference time.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use regex::Regex;

static COMPACT_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*(?:\.\d+)?)\s*(?:([km])\b)?").expect("valid compact number regex")
});
static YEARS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:years?|yrs?)\b").expect("valid years regex")
});
static MONTHS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:months?|mos?)\b").expect("valid months regex"));
static SINCE_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:since|opened in)\s+((?:19|20)\d{2})\b").expect("valid since regex")
});
static LISTED_ON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)listed on\s+(.+)").expect("valid listed-on regex"));
static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").expect("valid ordinal regex"));

/// Separators that end the date part of a "Listed on" phrase.
const DATE_TERMINATORS: [char; 3] = ['•', '|', '\n'];

const LISTING_DATE_FORMATS: [&str; 6] = [
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%Y-%m-%d",
    "%m/%d/%Y",
];

/// Parses the first number in `text`, honouring compact suffixes.
///
/// - `"1.2k"` → `1200`
/// - `"3M"` → `3_000_000`
/// - `"1,234 Sales"` → `1234`
///
/// Returns `None` when `text` contains no digits.
#[must_use]
pub fn parse_compact_number(text: &str) -> Option<u64> {
    let caps = COMPACT_NUMBER_RE.captures(text)?;
    let digits = caps.get(1)?.as_str().replace(',', "");
    let value: f64 = digits.parse().ok()?;
    let multiplier = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(s) if s == "k" => 1_000.0,
        Some(s) if s == "m" => 1_000_000.0,
        _ => 1.0,
    };
    let scaled = (value * multiplier).round();
    if !scaled.is_finite() || scaled < 0.0 || scaled > 1e15 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(scaled as u64)
}

/// Normalizes seller tenure text to whole months.
///
/// Matching order:
/// 1. Explicit durations: `"2 years"` → 24, `"5 months"` → 5,
///    `"1 year 3 months"` → 15.
/// 2. A founding year: `"since 2019"` / `"opened in 2019"` →
///    `(now.year - 2019) * 12 + now.month`.
///
/// Returns `None` when no pattern matches or the year lies in the future.
#[must_use]
pub fn parse_tenure_months(text: &str, now: DateTime<Utc>) -> Option<u32> {
    let years = YEARS_RE
        .captures(text)
        .and_then(|c| c.get(1)?.as_str().parse::<f64>().ok());
    let months = MONTHS_RE
        .captures(text)
        .and_then(|c| c.get(1)?.as_str().parse::<u32>().ok());

    if years.is_some() || months.is_some() {
        let from_years = years.map_or(0.0, |y| (y * 12.0).round());
        if !(0.0..=f64::from(u32::MAX)).contains(&from_years) {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let from_years = from_years as u32;
        return from_years.checked_add(months.unwrap_or(0));
    }

    let year: i32 = SINCE_YEAR_RE.captures(text)?.get(1)?.as_str().parse().ok()?;
    months_since_year(year, now)
}

/// Months elapsed since the start of `year`, counting the current month.
#[must_use]
pub fn months_since_year(year: i32, now: DateTime<Utc>) -> Option<u32> {
    let elapsed_years = u32::try_from(now.year().checked_sub(year)?).ok()?;
    elapsed_years.checked_mul(12)?.checked_add(now.month())
}

/// Parses `"Listed on Mar 3, 2024 • 12 favorites"` into whole days since the
/// listing date, floored at zero.
#[must_use]
pub fn parse_listing_age_days(text: &str, now: DateTime<Utc>) -> Option<u32> {
    let rest = LISTED_ON_RE.captures(text)?.get(1)?.as_str();
    let date_part = rest
        .split(|c| DATE_TERMINATORS.contains(&c))
        .next()
        .unwrap_or(rest)
        .trim();
    let listed = parse_listing_date(date_part)?;
    let days = (now.date_naive() - listed).num_days().max(0);
    u32::try_from(days).ok()
}

/// Parses a calendar date in any of the formats listing pages use.
#[must_use]
pub fn parse_listing_date(text: &str) -> Option<NaiveDate> {
    let cleaned = ORDINAL_RE.replace_all(text.trim(), "$1");
    let cleaned = cleaned.trim_end_matches(['.', ',']);
    LISTING_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(cleaned, fmt).ok())
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
