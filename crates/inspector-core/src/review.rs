use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Review bodies longer than this are cut at a character boundary.
pub const MAX_REVIEW_TEXT_CHARS: usize = 500;

/// One normalized review, regardless of which acquisition path produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub text: String,
    pub rating: Option<f64>,
    /// Free text as shown on the page, e.g. `"Mar 3, 2024"`.
    pub date: Option<String>,
    pub reviewer_name: Option<String>,
    pub has_video: bool,
    pub has_photo: bool,
    /// Full-resolution photo URLs, deduplicated.
    #[serde(default)]
    pub images: Vec<String>,

    /// Stable identifier from the reviews API; absent for scraped reviews.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_profile_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_response: Option<String>,
}

impl Review {
    /// Builds a review with `text` truncated to [`MAX_REVIEW_TEXT_CHARS`].
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            text: truncate_chars(text.trim(), MAX_REVIEW_TEXT_CHARS),
            ..Self::default()
        }
    }

    /// Identity used when merging API pages.
    ///
    /// The transaction identifier wins when present; otherwise the reviewer
    /// reference (profile URL, then display name), date and text form a
    /// composite key.
    #[must_use]
    pub fn identity_key(&self) -> String {
        if let Some(id) = self.transaction_id {
            return format!("tx:{id}");
        }
        let reviewer = self
            .reviewer_profile_url
            .as_deref()
            .or(self.reviewer_name.as_deref())
            .unwrap_or("");
        format!(
            "c:{reviewer}|{}|{}",
            self.date.as_deref().unwrap_or(""),
            self.text
        )
    }

    /// Identity used when accumulating reviews across dialog pages, where
    /// dates are not always rendered.
    #[must_use]
    pub fn text_reviewer_key(&self) -> String {
        format!(
            "{}|{}",
            self.text,
            self.reviewer_name.as_deref().unwrap_or("")
        )
    }
}

/// Truncates `s` to at most `max_chars` characters without splitting a
/// multi-byte character.
#[must_use]
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => s[..byte_idx].to_owned(),
        None => s.to_owned(),
    }
}

/// Order-preserving review collection that drops duplicates by key.
#[derive(Debug, Default)]
pub struct ReviewAccumulator {
    seen: HashSet<String>,
    reviews: Vec<Review>,
}

impl ReviewAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `review` under [`Review::identity_key`]. Returns `false` when an
    /// equal key was already present.
    pub fn insert(&mut self, review: Review) -> bool {
        let key = review.identity_key();
        self.insert_with_key(review, key)
    }

    /// Adds `review` under a caller-chosen key.
    pub fn insert_with_key(&mut self, review: Review, key: String) -> bool {
        if !self.seen.insert(key) {
            return false;
        }
        self.reviews.push(review);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    #[must_use]
    pub fn into_reviews(self) -> Vec<Review> {
        self.reviews
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(text: &str, reviewer: &str) -> Review {
        Review {
            reviewer_name: Some(reviewer.to_owned()),
            ..Review::with_text(text)
        }
    }

    #[test]
    fn with_text_truncates_long_bodies() {
        let long = "a".repeat(800);
        assert_eq!(Review::with_text(&long).text.chars().count(), 500);
    }

    #[test]
    fn truncate_chars_respects_multibyte_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn identity_key_prefers_transaction_id() {
        let mut a = review("Great mug", "Ann");
        a.transaction_id = Some(42);
        let mut b = review("Different text", "Bob");
        b.transaction_id = Some(42);
        assert_eq!(a.identity_key(), b.identity_key());
    }

    #[test]
    fn identity_key_falls_back_to_composite() {
        let mut a = review("Great mug", "Ann");
        a.date = Some("Mar 3, 2024".to_owned());
        let mut b = a.clone();
        b.date = Some("Mar 4, 2024".to_owned());
        assert_ne!(a.identity_key(), b.identity_key());
    }

    #[test]
    fn accumulator_drops_duplicates_and_keeps_order() {
        let mut acc = ReviewAccumulator::new();
        assert!(acc.insert(review("first", "Ann")));
        assert!(acc.insert(review("second", "Bob")));
        assert!(!acc.insert(review("first", "Ann")));
        let texts: Vec<_> = acc.into_reviews().into_iter().map(|r| r.text).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn text_reviewer_key_ignores_date() {
        let mut a = review("same", "Ann");
        a.date = Some("Jan 1, 2024".to_owned());
        let b = review("same", "Ann");
        assert_eq!(a.text_reviewer_key(), b.text_reviewer_key());
    }

    #[test]
    fn optional_api_fields_are_omitted_when_absent() {
        let json = serde_json::to_value(review("ok", "Ann")).unwrap();
        assert!(json.get("transactionId").is_none());
        assert_eq!(json["hasPhoto"], false);
        assert_eq!(json["reviewerName"], "Ann");
    }
}
