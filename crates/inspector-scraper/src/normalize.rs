//! Normalization of raw reviews-API records into the canonical [`Review`].

use inspector_core::Review;

use crate::client::absolutize_url;
use crate::images::upgrade_image_url;
use crate::types::RawReview;

/// Converts one raw API record into a [`Review`].
///
/// The original-language text is preferred; the translated text is used as
/// the body only when the original is blank, and kept alongside otherwise.
/// An appreciation photo marks the review as having a photo and is upgraded
/// to its full-resolution variant.
///
/// Returns `None` for records that carry neither text nor a rating.
#[must_use]
pub fn normalize_review(raw: RawReview, page_url: &str) -> Option<Review> {
    let original = non_blank(raw.review);
    let translated = non_blank(raw.translated_review);
    let body = original.clone().or_else(|| translated.clone());

    if body.is_none() && raw.rating.is_none() {
        return None;
    }

    let mut review = Review::with_text(body.as_deref().unwrap_or(""));
    review.rating = raw.rating;
    review.date = non_blank(raw.create_date);
    review.transaction_id = raw.transaction_id;
    review.recommended = raw.is_recommended;
    review.seller_response = non_blank(raw.seller_response);
    review.has_video = raw.has_video.unwrap_or(false);
    if original.is_some() {
        review.translated_text = translated;
    }

    if let Some(reviewer) = raw.reviewer {
        review.reviewer_name = non_blank(reviewer.name);
        review.reviewer_profile_url =
            non_blank(reviewer.profile_url).and_then(|u| absolutize_url(page_url, &u));
        review.reviewer_avatar_url =
            non_blank(reviewer.avatar_url).and_then(|u| absolutize_url(page_url, &u));
    }

    if let Some(photo) =
        non_blank(raw.appreciation_photo_url).and_then(|u| absolutize_url(page_url, &u))
    {
        review.has_photo = true;
        review.images.push(upgrade_image_url(&photo));
    }

    Some(review)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
