//! schema.org JSON-LD `Product` reader.

use inspector_core::{StructuredListing, MAX_LISTING_IMAGES};
use scraper::Html;
use serde_json::Value;

use crate::client::absolutize_url;
use crate::dom::sel;

/// Every item in every `application/ld+json` block, with top-level arrays
/// flattened and `@graph` containers expanded. Malformed blocks are skipped.
pub(crate) fn collect_items(doc: &Html) -> Vec<Value> {
    let Some(selector) = sel(r#"script[type="application/ld+json"]"#) else {
        return Vec::new();
    };

    let mut items = Vec::new();
    for script in doc.select(&selector) {
        let text: String = script.text().collect();
        let Ok(value) = serde_json::from_str::<Value>(text.trim()) else {
            continue;
        };
        let candidates = match value {
            Value::Array(arr) => arr,
            other => vec![other],
        };
        for item in candidates {
            if let Some(graph) = item.get("@graph").and_then(Value::as_array) {
                items.extend(graph.iter().cloned());
            }
            items.push(item);
        }
    }
    items
}

/// `@type` may be a plain string or an array of strings.
fn has_type(item: &Value, wanted: &str) -> bool {
    match item.get("@type") {
        Some(Value::String(s)) => s == wanted,
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(wanted)),
        _ => false,
    }
}

/// Reads the first `Product` item on the page.
///
/// Returns `None` when no Product-typed item exists.
#[must_use]
pub fn read_structured_listing(doc: &Html, page_url: &str) -> Option<StructuredListing> {
    let items = collect_items(doc);
    let product = items.iter().find(|item| has_type(item, "Product"))?;

    let title = product
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned);

    let mut images: Vec<String> = Vec::new();
    for url in image_urls(product.get("image")) {
        if let Some(abs) = absolutize_url(page_url, &url) {
            if !images.contains(&abs) {
                images.push(abs);
            }
        }
        if images.len() >= MAX_LISTING_IMAGES {
            break;
        }
    }

    let seller_name = named(product.get("brand")).or_else(|| {
        named(product.get("seller")).or_else(|| {
            product
                .get("offers")
                .and_then(|offers| named(offers.get("seller")))
        })
    });

    Some(StructuredListing {
        title,
        images,
        seller_name,
    })
}

/// Image list from any of: a bare URL string, an object carrying
/// `contentUrl`/`url`/`thumbnailUrl` (in that order), or an array of either.
fn image_urls(node: Option<&Value>) -> Vec<String> {
    match node {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(arr)) => arr.iter().flat_map(|v| image_urls(Some(v))).collect(),
        Some(Value::Object(obj)) => ["contentUrl", "url", "thumbnailUrl"]
            .iter()
            .find_map(|key| obj.get(*key).and_then(Value::as_str))
            .map(|s| vec![s.to_owned()])
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// `"Acme"` or `{"name": "Acme"}`.
fn named(node: Option<&Value>) -> Option<String> {
    let name = match node? {
        Value::String(s) => s.as_str(),
        Value::Object(obj) => obj.get("name")?.as_str()?,
        _ => return None,
    };
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_owned())
}
