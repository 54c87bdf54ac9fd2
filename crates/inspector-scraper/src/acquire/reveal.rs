//! Best-effort "show me the reviews" action on a live page.

use tracing::{debug, info};

use super::controls::{find_view_all_control, reviews_section_path, ReviewsControl};
use crate::error::ScraperError;
use crate::page::PageSession;

/// Scrolls the reviews section into view and clicks an in-page "view all"
/// trigger when there is one.
///
/// Returns `Ok(true)` when the page reacted to at least one action. A
/// navigational link is never followed.
///
/// # Errors
///
/// Returns [`ScraperError`] only when the page URL or HTML cannot be read.
pub async fn open_reviews(page: &dyn PageSession) -> Result<bool, ScraperError> {
    let url = page.url().await?;
    let html = page.html().await?;
    let section = reviews_section_path(&html);
    let control = find_view_all_control(&html, &url);

    let mut opened = false;
    if let Some(selector) = section.as_deref() {
        match page.scroll_into_view(selector).await {
            Ok(()) => opened = true,
            Err(e) => debug!(selector, error = %e, "could not scroll to reviews section"),
        }
    }
    if let Some(ReviewsControl::Trigger { selector }) = control {
        match page.click(&selector).await {
            Ok(()) => opened = true,
            Err(e) => debug!(%selector, error = %e, "could not click reviews trigger"),
        }
    }

    info!(%url, opened, "open reviews requested");
    Ok(opened)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::StaticPage;
    use crate::test_support::ScriptedPage;

    const PAGE: &str = "https://www.etsy.com/listing/123/mug";

    #[tokio::test]
    async fn clicks_in_page_trigger() {
        let html = r#"<html><body><div id="reviews">
            <button id="all-reviews">See all reviews</button>
        </div></body></html>"#;
        let page = ScriptedPage::new(PAGE, html).on_click("#all-reviews", vec![html.to_owned()]);
        assert!(open_reviews(&page).await.unwrap());
        assert_eq!(page.clicks(), vec!["#all-reviews"]);
    }

    #[tokio::test]
    async fn static_page_cannot_be_opened() {
        let page = StaticPage::from_html(PAGE, r#"<html><body><div id="reviews"></div></body></html>"#);
        assert!(!open_reviews(&page).await.unwrap());
    }

    #[tokio::test]
    async fn unreachable_page_is_an_error() {
        let page = ScriptedPage::unreachable(PAGE);
        assert!(open_reviews(&page).await.is_err());
    }
}
