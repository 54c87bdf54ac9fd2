//! URL origin and domain helpers for the listing client.

/// Extracts the scheme+host origin from a page URL.
///
/// Given `"https://www.etsy.com/listing/123/mug"`, returns
/// `"https://www.etsy.com"`. The reviews API is always addressed on the
/// listing's own origin.
#[must_use]
pub fn extract_origin(page_url: &str) -> String {
    reqwest::Url::parse(page_url).map_or_else(
        |e| {
            tracing::warn!(
                page_url,
                error = %e,
                "could not parse page url, falling back to string split for origin extraction"
            );
            page_url
                .trim_end_matches('/')
                .splitn(4, '/')
                .take(3)
                .collect::<Vec<_>>()
                .join("/")
        },
        |u| u.origin().ascii_serialization(),
    )
}

/// Extracts the hostname from a URL for use in error messages.
///
/// Falls back to the full string if parsing fails.
pub(crate) fn extract_domain(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}

/// Resolves `candidate` (absolute, protocol-relative or relative) against
/// `base_url`.
#[must_use]
pub fn absolutize_url(base_url: &str, candidate: &str) -> Option<String> {
    let candidate = candidate.trim().replace("&amp;", "&");
    if candidate.is_empty() || candidate.starts_with("data:") {
        return None;
    }
    let base = reqwest::Url::parse(base_url).ok()?;
    base.join(&candidate).ok().map(|u| u.to_string())
}
