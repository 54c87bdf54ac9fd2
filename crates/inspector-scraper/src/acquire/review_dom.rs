//! Review parsing over a rendered container: the leaf routine shared by the
//! dialog and page-fetch strategies.

use std::sync::LazyLock;

use inspector_core::{Review, ReviewAccumulator};
use regex::Regex;
use scraper::{ElementRef, Html};

use crate::client::absolutize_url;
use crate::dom::{element_text, first_in_document, first_match, select_all};
use crate::images::{is_review_photo_url, looks_like_avatar, parse_dimension, upgrade_image_url};

static RATING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s+out\s+of\b").expect("valid rating regex")
});
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s+\d{1,2},?\s+\d{4}\b",
    )
    .expect("valid review date regex")
});

/// Review regions, tried in order; the first selector with any match wins.
const REVIEW_NODE_SELECTORS: [&str; 4] = [
    "[data-review-region]",
    "[data-reviews-card]",
    ".review-card",
    "li[data-review]",
];

/// Body text candidates within a review region, most specific first.
const BODY_SELECTORS: [&str; 4] = [
    "[data-review-text]",
    "[id^=\"review-preview-toggle\"]",
    ".review-text",
    "p",
];

/// Elements that carry a review's own date, ahead of its body text.
const DATE_SELECTORS: [&str; 5] = [
    "time",
    "[data-review-date]",
    ".review-date",
    r#"[class*="date"]"#,
    ".wt-text-caption",
];

const REVIEWER_SELECTORS: [&str; 2] = [r#"a[href*="/people/"]"#, "[data-reviewer-name]"];

const VIDEO_SELECTORS: [&str; 3] = ["video", "[data-review-video]", r#"iframe[src*="video"]"#];

/// Open dialogs; pages often render unrelated ones (cookie consent, cart)
/// alongside the review overlay.
const DIALOG_SELECTORS: [&str; 4] = [
    r#"[role="dialog"]"#,
    r#"[aria-modal="true"]"#,
    "dialog[open]",
    ".wt-overlay--will-animate",
];

/// Inline review sections on a listing page or a dedicated reviews page.
const CONTAINER_SELECTORS: [&str; 4] = [
    "#reviews",
    "[data-reviews-container]",
    r#"[data-region="reviews"]"#,
    "#same-listing-reviews-panel",
];

/// Body text shorter than this is a placeholder, not a review.
const MIN_BODY_CHARS: usize = 3;

/// Reviews visible in an open dialog, plus what is needed to detect a page
/// change after pagination.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct DialogSnapshot {
    pub reviews: Vec<Review>,
    /// Number of review regions rendered, including ones without usable text.
    pub node_count: usize,
    /// Reviewer of the first region, or its text when no reviewer is shown.
    pub first_identity: Option<String>,
}

impl DialogSnapshot {
    pub(crate) fn differs_from(&self, previous: &DialogSnapshot) -> bool {
        self.node_count != previous.node_count || self.first_identity != previous.first_identity
    }
}

/// Parses the open review dialog, if one with at least one review region is
/// rendered.
pub(crate) fn parse_dialog(html: &str, page_url: &str) -> Option<DialogSnapshot> {
    let doc = Html::parse_document(html);
    let nodes = review_nodes(review_dialog(&doc)?);

    let first_identity = nodes.first().and_then(|node| {
        reviewer_name(*node).or_else(|| body_text(*node))
    });
    Some(DialogSnapshot {
        node_count: nodes.len(),
        first_identity,
        reviews: parse_nodes(&nodes, page_url),
    })
}

/// The first open dialog that renders at least one review region.
pub(crate) fn review_dialog(doc: &Html) -> Option<ElementRef<'_>> {
    DIALOG_SELECTORS
        .iter()
        .flat_map(|css| select_all(doc.root_element(), css))
        .find(|dialog| !review_nodes(*dialog).is_empty())
}

/// Parses reviews from the page's inline reviews section, or from the whole
/// document when no section is marked.
pub(crate) fn parse_container_reviews(html: &str, page_url: &str) -> Vec<Review> {
    let doc = Html::parse_document(html);
    let container =
        first_in_document(&doc, &CONTAINER_SELECTORS).unwrap_or_else(|| doc.root_element());
    parse_reviews(container, page_url)
}

/// Parses every review region under `container`, discarding regions without
/// usable body text and duplicates by text + reviewer.
pub(crate) fn parse_reviews(container: ElementRef<'_>, page_url: &str) -> Vec<Review> {
    parse_nodes(&review_nodes(container), page_url)
}

fn review_nodes(container: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    REVIEW_NODE_SELECTORS
        .iter()
        .map(|css| select_all(container, css))
        .find(|nodes| !nodes.is_empty())
        .unwrap_or_default()
}

fn parse_nodes(nodes: &[ElementRef<'_>], page_url: &str) -> Vec<Review> {
    let mut accumulator = ReviewAccumulator::new();
    for node in nodes {
        if let Some(review) = parse_node(*node, page_url) {
            let key = review.text_reviewer_key();
            accumulator.insert_with_key(review, key);
        }
    }
    accumulator.into_reviews()
}

fn parse_node(node: ElementRef<'_>, page_url: &str) -> Option<Review> {
    let text = body_text(node)?;
    let images = photo_urls(node, page_url);

    Some(Review {
        rating: rating(node),
        date: review_date(node),
        reviewer_name: reviewer_name(node),
        has_video: first_match(node, &VIDEO_SELECTORS).is_some(),
        has_photo: !images.is_empty(),
        images,
        ..Review::with_text(&text)
    })
}

/// The review's date from a dedicated element, falling back to the first
/// date anywhere in the region.
fn review_date(node: ElementRef<'_>) -> Option<String> {
    let find = |text: &str| DATE_RE.find(text).map(|m| m.as_str().to_owned());
    DATE_SELECTORS
        .iter()
        .flat_map(|css| select_all(node, css))
        .find_map(|el| find(&element_text(el)))
        .or_else(|| find(&element_text(node)))
}

fn body_text(node: ElementRef<'_>) -> Option<String> {
    BODY_SELECTORS.iter().find_map(|css| {
        select_all(node, css)
            .into_iter()
            .map(element_text)
            .find(|t| t.chars().count() >= MIN_BODY_CHARS)
    })
}

/// Rating from an aria-label such as `"5 out of 5 stars"` on the region or
/// any descendant.
fn rating(node: ElementRef<'_>) -> Option<f64> {
    std::iter::once(node)
        .chain(select_all(node, "[aria-label]"))
        .filter_map(|el| el.value().attr("aria-label"))
        .find_map(|label| RATING_RE.captures(label)?.get(1)?.as_str().parse().ok())
        .or_else(|| {
            select_all(node, r#"input[name="rating"]"#)
                .into_iter()
                .filter_map(|el| el.value().attr("value"))
                .find_map(|v| v.trim().parse().ok())
        })
}

fn reviewer_name(node: ElementRef<'_>) -> Option<String> {
    REVIEWER_SELECTORS.iter().find_map(|css| {
        select_all(node, css).into_iter().find_map(|el| {
            let text = element_text(el);
            if text.is_empty() {
                el.value()
                    .attr("data-reviewer-name")
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
            } else {
                Some(text)
            }
        })
    })
}

/// Review photos in page order, upgraded to full resolution and deduplicated.
/// Avatars are excluded by path, size and shape.
fn photo_urls(node: ElementRef<'_>, page_url: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for img in select_all(node, "img") {
        let attrs = img.value();
        let Some(src) = ["src", "data-src"]
            .iter()
            .filter_map(|name| attrs.attr(name))
            .find_map(|s| absolutize_url(page_url, s))
        else {
            continue;
        };
        let avatar = looks_like_avatar(
            attrs.attr("class"),
            parse_dimension(attrs.attr("width")),
            parse_dimension(attrs.attr("height")),
        );
        if avatar || !is_review_photo_url(&src) {
            continue;
        }
        let full = upgrade_image_url(&src);
        if !urls.contains(&full) {
            urls.push(full);
        }
    }
    urls
}

#[cfg(test)]
#[path = "review_dom_test.rs"]
mod tests;
