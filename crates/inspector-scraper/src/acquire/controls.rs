//! Locating the "view all reviews" control and dialog pagination controls.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use super::review_dom::review_dialog;
use crate::client::absolutize_url;
use crate::dom::{css_path, element_text, first_in_document, first_match, select_all};

static VIEW_ALL_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:see|view|read|show)\s+(?:all|more)\b.*\breviews?\b")
        .expect("valid view-all text regex")
});
static VIEW_ALL_ARIA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:all|more)\b.*\breviews?\b").expect("valid view-all aria regex")
});
static REVIEWS_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\breviews?\b").expect("valid reviews heading regex"));

const VIEW_ALL_MARKERS: [&str; 3] = [
    "[data-view-all-reviews]",
    "[data-reviews-modal-trigger]",
    r#"[data-wt-overlay-trigger*="reviews"]"#,
];

const REVIEW_SECTION_SELECTORS: [&str; 3] =
    ["#reviews", "[data-reviews-container]", r#"[data-region="reviews"]"#];

/// How the reviews can be expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ReviewsControl {
    /// A navigational link to a separate reviews page.
    Link { href: String },
    /// An in-page trigger that opens a dialog; `selector` addresses it on the
    /// live page.
    Trigger { selector: String },
}

/// Finds the "view all reviews" control, searching the reviews section first
/// and then the whole document.
///
/// Within each scope: explicit marker attribute, then anchor/button label
/// text, then `aria-label`.
pub(crate) fn find_view_all_control(html: &str, page_url: &str) -> Option<ReviewsControl> {
    let doc = Html::parse_document(html);
    let mut scopes: Vec<ElementRef<'_>> = Vec::new();
    if let Some(section) = reviews_section(&doc) {
        scopes.push(section);
    }
    scopes.push(doc.root_element());

    scopes
        .into_iter()
        .find_map(|scope| {
            first_match(scope, &VIEW_ALL_MARKERS)
                .or_else(|| by_label_text(scope))
                .or_else(|| by_aria_label(scope))
        })
        .map(|el| classify(el, page_url))
}

/// Selector addressing the reviews section on the live page.
pub(crate) fn reviews_section_path(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    reviews_section(&doc).map(css_path)
}

/// The marked reviews section, else the nearest container of a heading
/// mentioning reviews.
fn reviews_section(doc: &Html) -> Option<ElementRef<'_>> {
    first_in_document(doc, &REVIEW_SECTION_SELECTORS).or_else(|| {
        select_all(doc.root_element(), "h2, h3")
            .into_iter()
            .find(|h| REVIEWS_HEADING_RE.is_match(&element_text(*h)))
            .and_then(|h| h.parent().and_then(ElementRef::wrap))
    })
}

fn by_label_text(scope: ElementRef<'_>) -> Option<ElementRef<'_>> {
    select_all(scope, "a, button")
        .into_iter()
        .find(|el| VIEW_ALL_TEXT_RE.is_match(&element_text(*el)))
}

fn by_aria_label(scope: ElementRef<'_>) -> Option<ElementRef<'_>> {
    select_all(scope, "a[aria-label], button[aria-label]")
        .into_iter()
        .find(|el| {
            el.value()
                .attr("aria-label")
                .is_some_and(|label| VIEW_ALL_ARIA_RE.is_match(label))
        })
}

fn classify(el: ElementRef<'_>, page_url: &str) -> ReviewsControl {
    let value = el.value();
    if value.name() == "a" {
        let href = value.attr("href").map(str::trim).unwrap_or("");
        let navigational = !href.is_empty()
            && !href.starts_with('#')
            && !href.to_ascii_lowercase().starts_with("javascript:");
        if navigational {
            if let Some(href) = absolutize_url(page_url, href) {
                return ReviewsControl::Link { href };
            }
        }
    }
    ReviewsControl::Trigger {
        selector: css_path(el),
    }
}

/// Finds the review dialog's pagination control for page `next_page` and returns a
/// selector for it.
///
/// Matches a link or button whose label is exactly the page number, or whose
/// `data-page` / `aria-label` names it.
pub(crate) fn find_page_control(html: &str, next_page: u32) -> Option<String> {
    let doc = Html::parse_document(html);
    let scope = review_dialog(&doc)?;
    let wanted = next_page.to_string();
    let aria = Regex::new(&format!(r"(?i)\bpage\s+{next_page}\b")).ok()?;

    select_all(scope, "a, button")
        .into_iter()
        .find(|el| {
            let value = el.value();
            if value.attr("disabled").is_some() || value.attr("aria-disabled") == Some("true") {
                return false;
            }
            element_text(*el) == wanted
                || value.attr("data-page") == Some(wanted.as_str())
                || value.attr("aria-label").is_some_and(|l| aria.is_match(l))
        })
        .map(css_path)
}
