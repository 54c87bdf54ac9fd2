use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use scraper::{ElementRef, Html};
use serde_json::Value;

use super::ExtractConfig;
use crate::client::absolutize_url;
use crate::dom::{element_text, first_in_document, non_empty_text, select_all};
use crate::images::parse_dimension;
use crate::parse::{parse_compact_number, parse_listing_age_days, parse_tenure_months};

static SALES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bsales\b").expect("valid sales regex"));
static TENURE_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+\s*(?:years?|months?)\s+on\b|\b(?:since|opened in)\s+(?:19|20)\d{2}\b")
        .expect("valid tenure phrase regex")
});
static LISTED_ON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\blisted on\b").expect("valid listed-on regex"));
/// Width encoded in a CDN filename, e.g. `il_794xN.` → 794.
static URL_WIDTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(\d+)x(?:\d+|N)\.").expect("valid url width regex"));

fn selectors(list: &[String]) -> Vec<&str> {
    list.iter().map(String::as_str).collect()
}

#[must_use]
pub fn extract_title(doc: &Html, cfg: &ExtractConfig) -> Option<String> {
    first_in_document(doc, &selectors(&cfg.title_selectors)).and_then(non_empty_text)
}

#[must_use]
pub fn extract_seller_name(doc: &Html, cfg: &ExtractConfig) -> Option<String> {
    first_in_document(doc, &selectors(&cfg.seller_selectors)).and_then(non_empty_text)
}

/// Listing gallery images: hosted on the listing CDN and at least
/// `min_image_width_px` wide, deduplicated and capped.
#[must_use]
pub fn extract_images(doc: &Html, page_url: &str, cfg: &ExtractConfig) -> Vec<String> {
    let mut images: Vec<String> = Vec::new();
    for img in select_all(doc.root_element(), "img") {
        let Some(src) = image_source(img).and_then(|s| absolutize_url(page_url, &s)) else {
            continue;
        };
        if !src.contains(&cfg.image_host_marker) {
            continue;
        }
        let wide_enough = image_width(img, &src).is_some_and(|w| w >= cfg.min_image_width_px);
        if wide_enough && !images.contains(&src) {
            images.push(src);
            if images.len() >= cfg.max_images {
                break;
            }
        }
    }
    images
}

/// `src`, then lazy-load attributes, then the first `srcset` candidate.
fn image_source(img: ElementRef<'_>) -> Option<String> {
    let attrs = img.value();
    ["src", "data-src", "data-src-zoom-image"]
        .iter()
        .filter_map(|name| attrs.attr(name))
        .map(str::trim)
        .find(|s| !s.is_empty() && !s.starts_with("data:"))
        .map(str::to_owned)
        .or_else(|| {
            attrs
                .attr("srcset")
                .and_then(|set| set.split(',').next())
                .and_then(|candidate| candidate.split_whitespace().next())
                .map(str::to_owned)
        })
}

/// Declared width, else the width encoded in the filename. Full-size
/// variants count as wide.
fn image_width(img: ElementRef<'_>, src: &str) -> Option<u32> {
    let attrs = img.value();
    parse_dimension(attrs.attr("width"))
        .or_else(|| parse_dimension(attrs.attr("data-width")))
        .or_else(|| {
            URL_WIDTH_RE
                .captures(src)
                .and_then(|c| c.get(1)?.as_str().parse().ok())
        })
        .or_else(|| src.contains("fullxfull").then_some(u32::MAX))
}

/// Short element text containing a sales keyword and a digit.
#[must_use]
pub fn extract_sales_count(doc: &Html, cfg: &ExtractConfig) -> Option<u64> {
    scan_texts(doc, cfg, cfg.max_sales_text_len)
        .find(|t| SALES_RE.is_match(t) && t.chars().any(|c| c.is_ascii_digit()))
        .and_then(|t| parse_compact_number(&t))
}

/// Seller tenure in months.
///
/// 1. A dedicated tenure component, reading its structured event data before
///    its visible text.
/// 2. Any short element phrased like "3 years on Etsy", "since 2019" or
///    "opened in 2019".
#[must_use]
pub fn extract_seller_age_months(
    doc: &Html,
    now: DateTime<Utc>,
    cfg: &ExtractConfig,
) -> Option<u32> {
    tenure_from_component(doc, now, cfg).or_else(|| {
        scan_texts(doc, cfg, cfg.max_phrase_text_len)
            .filter(|t| TENURE_PHRASE_RE.is_match(t))
            .find_map(|t| parse_tenure_months(&t, now))
    })
}

fn tenure_from_component(doc: &Html, now: DateTime<Utc>, cfg: &ExtractConfig) -> Option<u32> {
    let component = first_in_document(doc, &selectors(&cfg.tenure_selectors))?;
    component
        .value()
        .attr(&cfg.tenure_event_attr)
        .and_then(|raw| tenure_from_event_data(raw, now))
        .or_else(|| parse_tenure_months(&element_text(component), now))
}

/// Reads tenure from event data such as `{"tenure": 5, "tenure_unit": "months"}`
/// or `{"tenure": "3 years"}`.
fn tenure_from_event_data(raw: &str, now: DateTime<Utc>) -> Option<u32> {
    let Ok(Value::Object(data)) = serde_json::from_str::<Value>(raw) else {
        return parse_tenure_months(raw, now);
    };

    let unit = data
        .iter()
        .find(|(k, _)| k.contains("unit"))
        .and_then(|(_, v)| v.as_str())
        .map(str::to_ascii_lowercase);
    // Only keys that name the tenure carry the amount; ids and counters
    // elsewhere in the payload are ignored.
    let amount = data
        .iter()
        .filter(|(k, _)| is_tenure_amount_key(k))
        .find_map(|(k, v)| {
            let n = v.as_u64().or_else(|| v.as_str()?.trim().parse().ok())?;
            Some((k.to_ascii_lowercase(), n))
        });
    let Some((key, n)) = amount else {
        return parse_tenure_months(raw, now);
    };

    // Without a unit field, a key like `tenure_years` names the unit itself.
    match unit.unwrap_or(key) {
        unit if unit.contains("month") => u32::try_from(n).ok(),
        unit if unit.contains("year") => u32::try_from(n).ok().and_then(|y| y.checked_mul(12)),
        _ => parse_tenure_months(raw, now),
    }
}

fn is_tenure_amount_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    !key.contains("unit")
        && (key.contains("tenure") || key.contains("year") || key.contains("month"))
}

/// Days since the "Listed on …" date, floored at zero.
#[must_use]
pub fn extract_listing_age_days(
    doc: &Html,
    now: DateTime<Utc>,
    cfg: &ExtractConfig,
) -> Option<u32> {
    scan_texts(doc, cfg, cfg.max_phrase_text_len)
        .filter(|t| LISTED_ON_RE.is_match(t))
        .find_map(|t| parse_listing_age_days(&t, now))
}

/// Texts of generic elements no longer than `max_len` characters, in
/// document order.
fn scan_texts<'a>(
    doc: &'a Html,
    cfg: &ExtractConfig,
    max_len: usize,
) -> impl Iterator<Item = String> + 'a {
    select_all(doc.root_element(), &cfg.text_scan_selector)
        .into_iter()
        .map(element_text)
        .filter(move |t| !t.is_empty() && t.chars().count() < max_len)
}
