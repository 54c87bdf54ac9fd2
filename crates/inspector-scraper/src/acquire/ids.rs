//! Identifiers the reviews API needs, recovered from the page.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use crate::dom::{element_text, first_in_document, sel};

static LISTING_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/listing/(\d+)").expect("valid listing id regex"));

/// Structural patterns for the shop id inside inline scripts, most specific first.
static SCRIPT_SHOP_ID_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#""shop_id"\s*:\s*"?(\d+)"#,
        r#""shopId"\s*:\s*"?(\d+)"#,
        r#"\bshop_id\s*[=:]\s*['"]?(\d+)"#,
        r#""shop"\s*:\s*\{[^{}]*?"id"\s*:\s*"?(\d+)"#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid shop id regex"))
    .collect()
});
static TEXT_SHOP_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bshop\s*id\s*[:#]?\s*(\d+)").expect("valid shop id regex"));
static SCRIPT_CSRF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""csrf_(?:nonce|token)"\s*:\s*"([^"]+)""#).expect("valid csrf regex")
});

const CSRF_META_SELECTORS: [&str; 2] = [r#"meta[name="csrf_nonce"]"#, r#"meta[name="csrf-token"]"#];

/// What the reviews API needs from the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageIdentifiers {
    pub listing_id: Option<u64>,
    pub shop_id: Option<u64>,
    pub csrf_token: Option<String>,
}

impl PageIdentifiers {
    /// Reads every identifier from the page URL and HTML snapshot.
    #[must_use]
    pub fn discover(page_url: &str, html: &str) -> Self {
        let doc = Html::parse_document(html);
        let scripts = script_text(&doc);
        Self {
            listing_id: listing_id_from_url(page_url),
            shop_id: shop_id_from_scripts(&scripts)
                .or_else(|| shop_id_from_text(&doc))
                .or_else(|| shop_id_from_attribute(&doc)),
            csrf_token: csrf_from_meta(&doc).or_else(|| csrf_from_scripts(&scripts)),
        }
    }
}

/// Listing id from a `/listing/<digits>` path segment.
#[must_use]
pub fn listing_id_from_url(page_url: &str) -> Option<u64> {
    let path = reqwest::Url::parse(page_url)
        .map(|u| u.path().to_owned())
        .unwrap_or_else(|_| page_url.to_owned());
    LISTING_ID_RE
        .captures(&path)
        .and_then(|c| c.get(1)?.as_str().parse().ok())
}

fn script_text(doc: &Html) -> String {
    sel("script").map_or_else(String::new, |selector| {
        doc.select(&selector)
            .flat_map(|s| s.text())
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn shop_id_from_scripts(scripts: &str) -> Option<u64> {
    SCRIPT_SHOP_ID_RES
        .iter()
        .find_map(|re| re.captures(scripts)?.get(1)?.as_str().parse().ok())
}

fn shop_id_from_text(doc: &Html) -> Option<u64> {
    let body = first_in_document(doc, &["body"])?;
    TEXT_SHOP_ID_RE
        .captures(&element_text(body))
        .and_then(|c| c.get(1)?.as_str().parse().ok())
}

fn shop_id_from_attribute(doc: &Html) -> Option<u64> {
    let selector = sel("[data-shop-id]")?;
    doc.select(&selector)
        .filter_map(|el| el.value().attr("data-shop-id"))
        .find_map(|v| v.trim().parse().ok())
}

fn csrf_from_meta(doc: &Html) -> Option<String> {
    CSRF_META_SELECTORS
        .iter()
        .filter_map(|css| first_in_document(doc, &[*css]))
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_owned)
}

fn csrf_from_scripts(scripts: &str) -> Option<String> {
    SCRIPT_CSRF_RE
        .captures(scripts)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_id_from_path() {
        assert_eq!(
            listing_id_from_url("https://www.etsy.com/listing/1234567/handmade-mug?ref=x"),
            Some(1_234_567)
        );
        assert_eq!(listing_id_from_url("https://www.etsy.com/shop/MugShop"), None);
    }

    #[test]
    fn shop_id_from_inline_script() {
        let html = r#"<html><head><script>window.Etsy = {"listing_id": 1, "shop_id": "99887"};</script></head></html>"#;
        let ids = PageIdentifiers::discover("https://www.etsy.com/listing/1/x", html);
        assert_eq!(ids.listing_id, Some(1));
        assert_eq!(ids.shop_id, Some(99_887));
    }

    #[test]
    fn shop_id_from_nested_shop_object() {
        let html = r#"<html><head><script>{"shop": {"name": "MugShop", "id": 4242}}</script></head></html>"#;
        let ids = PageIdentifiers::discover("https://www.etsy.com/listing/1/x", html);
        assert_eq!(ids.shop_id, Some(4242));
    }

    #[test]
    fn shop_id_falls_back_to_text_then_attribute() {
        let text = "<html><body><p>Shop ID: 5150</p></body></html>";
        assert_eq!(PageIdentifiers::discover("", text).shop_id, Some(5150));

        let attr = r#"<html><body><div data-shop-id="777"></div></body></html>"#;
        assert_eq!(PageIdentifiers::discover("", attr).shop_id, Some(777));
    }

    #[test]
    fn csrf_from_meta_then_script() {
        let meta = r#"<html><head><meta name="csrf_nonce" content="abc:123"></head></html>"#;
        assert_eq!(
            PageIdentifiers::discover("", meta).csrf_token.as_deref(),
            Some("abc:123")
        );

        let script = r#"<html><head><script>{"csrf_nonce":"xyz"}</script></head></html>"#;
        assert_eq!(
            PageIdentifiers::discover("", script).csrf_token.as_deref(),
            Some("xyz")
        );
    }

    #[test]
    fn missing_identifiers_are_none() {
        let ids = PageIdentifiers::discover("https://example.com/", "<html></html>");
        assert_eq!(ids, PageIdentifiers::default());
    }
}
