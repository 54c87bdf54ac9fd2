//! Image URL conventions for listing and review photos.

use std::sync::LazyLock;

use regex::Regex;

/// Size token in CDN filenames: `il_794xN.`, `iap_640x640.`, `il_75x75.`.
static SIZE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(il|iap)_\d+x(?:\d+|N)\.").expect("valid size suffix regex"));

/// Path fragments of user avatar images, which are never review photos.
const AVATAR_PATH_MARKERS: [&str; 2] = ["/iusa/", "/iusb/"];

/// Class fragments the page uses for circular avatar crops.
const AVATAR_CLASS_MARKERS: [&str; 3] = ["avatar", "circle", "rounded-full"];

/// Largest rendered edge, in pixels, still treated as an avatar.
const MAX_AVATAR_EDGE_PX: u32 = 75;

/// Rewrites a thumbnail URL to its full-resolution variant.
///
/// `…/il_340x270.123_abcd.jpg` becomes `…/il_fullxfull.123_abcd.jpg`. URLs
/// without a recognised size token pass through unchanged.
#[must_use]
pub fn upgrade_image_url(url: &str) -> String {
    SIZE_SUFFIX_RE
        .replace(url, "${1}_fullxfull.")
        .into_owned()
}

/// Returns `true` if `url` follows the review-photo path convention.
#[must_use]
pub fn is_review_photo_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    if AVATAR_PATH_MARKERS.iter().any(|m| lower.contains(m)) {
        return false;
    }
    lower.contains("/iap/") || lower.contains("iap_") || lower.contains("/il/")
}

/// Small or circular images are avatars rather than photos.
///
/// `width`/`height` are the declared attribute sizes when present.
#[must_use]
pub fn looks_like_avatar(class: Option<&str>, width: Option<u32>, height: Option<u32>) -> bool {
    let class = class.unwrap_or("").to_ascii_lowercase();
    if AVATAR_CLASS_MARKERS.iter().any(|m| class.contains(m)) {
        return true;
    }
    let small = |edge: Option<u32>| edge.is_some_and(|px| px <= MAX_AVATAR_EDGE_PX);
    small(width) || small(height)
}

/// Parses a pixel dimension attribute such as `"340"` or `"340px"`.
#[must_use]
pub fn parse_dimension(raw: Option<&str>) -> Option<u32> {
    let raw = raw?.trim().trim_end_matches("px");
    raw.parse::<f64>().ok().and_then(|v| {
        if v.is_finite() && v >= 0.0 && v <= f64::from(u32::MAX) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Some(v as u32)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upgrades_listing_thumbnail() {
        assert_eq!(
            upgrade_image_url("https://i.etsystatic.com/1/r/il/ab/9/il_340x270.9_xyz.jpg"),
            "https://i.etsystatic.com/1/r/il/ab/9/il_fullxfull.9_xyz.jpg"
        );
    }

    #[test]
    fn upgrades_review_photo_with_open_height() {
        assert_eq!(
            upgrade_image_url("https://i.etsystatic.com/iap/aa/1/iap_640xN.1_bb.jpg"),
            "https://i.etsystatic.com/iap/aa/1/iap_fullxfull.1_bb.jpg"
        );
    }

    #[test]
    fn unrelated_urls_pass_through() {
        let url = "https://cdn.example.com/images/photo_640x480.jpg";
        assert_eq!(upgrade_image_url(url), url);
        let full = "https://i.etsystatic.com/iap/aa/1/iap_fullxfull.1_bb.jpg";
        assert_eq!(upgrade_image_url(full), full);
    }

    #[test]
    fn avatar_paths_are_not_review_photos() {
        assert!(!is_review_photo_url(
            "https://i.etsystatic.com/iusa/aa/1/iusa_75x75.1_bb.jpg"
        ));
        assert!(is_review_photo_url(
            "https://i.etsystatic.com/iap/aa/1/iap_300x300.1_bb.jpg"
        ));
    }

    #[test]
    fn small_or_round_images_look_like_avatars() {
        assert!(looks_like_avatar(None, Some(36), Some(36)));
        assert!(looks_like_avatar(Some("wt-circle wt-mr-xs-1"), None, None));
        assert!(!looks_like_avatar(Some("review-photo"), Some(300), None));
    }

    #[test]
    fn parse_dimension_accepts_px_suffix() {
        assert_eq!(parse_dimension(Some("340px")), Some(340));
        assert_eq!(parse_dimension(Some("auto")), None);
        assert_eq!(parse_dimension(None), None);
    }
}
