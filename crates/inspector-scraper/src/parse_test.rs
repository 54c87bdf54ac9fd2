use chrono::TimeZone;

use super::*;

fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

// -----------------------------------------------------------------------
// parse_compact_number
// -----------------------------------------------------------------------

#[test]
fn compact_number_thousands_suffix() {
    assert_eq!(parse_compact_number("1.2k"), Some(1200));
    assert_eq!(parse_compact_number("1.2k Sales"), Some(1200));
}

#[test]
fn compact_number_millions_suffix_is_case_insensitive() {
    assert_eq!(parse_compact_number("3M"), Some(3_000_000));
    assert_eq!(parse_compact_number("2.5m sales"), Some(2_500_000));
}

#[test]
fn compact_number_strips_group_separators() {
    assert_eq!(parse_compact_number("1,234"), Some(1234));
    assert_eq!(parse_compact_number("12,345 Sales"), Some(12_345));
}

#[test]
fn compact_number_plain_digits() {
    assert_eq!(parse_compact_number("87 sales"), Some(87));
}

#[test]
fn compact_number_unparsable_is_none() {
    assert_eq!(parse_compact_number("no sales yet"), None);
    assert_eq!(parse_compact_number(""), None);
}

#[test]
fn compact_number_does_not_read_word_starting_with_k_as_suffix() {
    assert_eq!(parse_compact_number("5 kits sold"), Some(5));
}

// -----------------------------------------------------------------------
// parse_tenure_months
// -----------------------------------------------------------------------

#[test]
fn tenure_years_convert_to_months() {
    assert_eq!(parse_tenure_months("2 years on Etsy", reference_now()), Some(24));
}

#[test]
fn tenure_months_keep_month_precision() {
    assert_eq!(parse_tenure_months("5 months on Etsy", reference_now()), Some(5));
}

#[test]
fn tenure_years_and_months_are_summed() {
    assert_eq!(parse_tenure_months("1 year 3 months", reference_now()), Some(15));
}

#[test]
fn tenure_since_year_counts_elapsed_months() {
    // (2024 - 2019) * 12 + 6
    assert_eq!(parse_tenure_months("On Etsy since 2019", reference_now()), Some(66));
}

#[test]
fn tenure_opened_in_year() {
    assert_eq!(parse_tenure_months("Opened in 2023", reference_now()), Some(18));
}

#[test]
fn tenure_future_year_is_none() {
    assert_eq!(parse_tenure_months("since 2030", reference_now()), None);
}

#[test]
fn tenure_without_pattern_is_none() {
    assert_eq!(parse_tenure_months("Star Seller", reference_now()), None);
}

// -----------------------------------------------------------------------
// parse_listing_age_days
// -----------------------------------------------------------------------

#[test]
fn listing_age_stops_at_bullet() {
    let text = "Listed on Jun 5, 2024 • 37 favorites";
    assert_eq!(parse_listing_age_days(text, reference_now()), Some(10));
}

#[test]
fn listing_age_accepts_full_month_names_and_ordinals() {
    let text = "Listed on June 1st, 2024";
    assert_eq!(parse_listing_age_days(text, reference_now()), Some(14));
}

#[test]
fn listing_age_in_future_floors_at_zero() {
    let text = "Listed on Jul 1, 2024";
    assert_eq!(parse_listing_age_days(text, reference_now()), Some(0));
}

#[test]
fn listing_age_unparsable_date_is_none() {
    assert_eq!(parse_listing_age_days("Listed on recently", reference_now()), None);
    assert_eq!(parse_listing_age_days("Ships from Ohio", reference_now()), None);
}

#[test]
fn listing_date_iso_format() {
    assert_eq!(
        parse_listing_date("2024-03-03"),
        NaiveDate::from_ymd_opt(2024, 3, 3)
    );
}
