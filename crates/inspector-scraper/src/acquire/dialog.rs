//! Strategy B: expand reviews through the page UI.
//!
//! A navigational "view all" link is fetched and parsed once. An in-page
//! trigger is clicked, the dialog is polled until reviews render, and the
//! dialog's numbered pagination is walked up to a hard page cap.

use inspector_core::{AcquisitionSource, Diagnostics, Review, ReviewAccumulator};
use tracing::{debug, info};

use super::controls::{find_page_control, find_view_all_control, ReviewsControl};
use super::review_dom::{parse_container_reviews, parse_dialog, DialogSnapshot};
use super::AcquisitionContext;
use crate::error::ScraperError;

pub(super) async fn scrape_via_dialog(
    ctx: &AcquisitionContext<'_>,
    page_url: &str,
    diagnostics: &mut Diagnostics,
) -> Result<(Vec<Review>, AcquisitionSource), ScraperError> {
    let html = ctx.page.html().await?;
    let control = find_view_all_control(&html, page_url)
        .ok_or_else(|| ScraperError::ControlNotFound("view all reviews".to_owned()))?;

    match control {
        ReviewsControl::Link { href } => {
            diagnostics.insert("dialog_control".into(), format!("link {href}"));
            let reviews = scrape_linked_page(ctx, &href).await?;
            Ok((reviews, AcquisitionSource::PageFetchScrape))
        }
        ReviewsControl::Trigger { selector } => {
            diagnostics.insert("dialog_control".into(), format!("trigger {selector}"));
            let (reviews, pages) = scrape_open_dialog(ctx, page_url, &selector).await?;
            diagnostics.insert("dialog_pages".into(), pages.to_string());
            Ok((reviews, AcquisitionSource::DialogScrape))
        }
    }
}

/// Single non-interactive pass over a dedicated reviews page.
async fn scrape_linked_page(
    ctx: &AcquisitionContext<'_>,
    href: &str,
) -> Result<Vec<Review>, ScraperError> {
    let html = ctx.client.fetch_html(href).await?;
    let reviews = parse_container_reviews(&html, href);
    if reviews.is_empty() {
        return Err(ScraperError::NoReviews {
            strategy: "reviews page link",
        });
    }
    info!(href, count = reviews.len(), "parsed linked reviews page");
    Ok(reviews)
}

/// Opens the dialog and walks its pages. Returns the accumulated reviews and
/// the number of dialog pages parsed.
async fn scrape_open_dialog(
    ctx: &AcquisitionContext<'_>,
    page_url: &str,
    trigger: &str,
) -> Result<(Vec<Review>, u32), ScraperError> {
    if let Err(e) = ctx.page.scroll_into_view(trigger).await {
        debug!(trigger, error = %e, "could not scroll to reviews trigger");
    }
    ctx.page.click(trigger).await?;

    let mut current = wait_for_dialog(ctx, page_url).await?;
    let mut accumulator = ReviewAccumulator::new();
    merge(&mut accumulator, &current);
    let mut pages = 1u32;

    for next_page in 2..=ctx.config.max_dialog_pages {
        let html = ctx.page.html().await?;
        let Some(control) = find_page_control(&html, next_page) else {
            debug!(next_page, "no further dialog page control");
            break;
        };
        if let Err(e) = ctx.page.click(&control).await {
            debug!(next_page, error = %e, "dialog page control click failed");
            break;
        }
        let Some(snapshot) = wait_for_page_change(ctx, page_url, &current).await? else {
            debug!(next_page, "dialog content did not change, stopping");
            break;
        };
        merge(&mut accumulator, &snapshot);
        current = snapshot;
        pages = next_page;
    }

    info!(pages, count = accumulator.len(), "collected reviews from dialog");
    if accumulator.is_empty() {
        return Err(ScraperError::NoReviews { strategy: "dialog" });
    }
    Ok((accumulator.into_reviews(), pages))
}

fn merge(accumulator: &mut ReviewAccumulator, snapshot: &DialogSnapshot) {
    for review in &snapshot.reviews {
        let key = review.text_reviewer_key();
        accumulator.insert_with_key(review.clone(), key);
    }
}

/// Polls until review regions appear inside an open dialog.
async fn wait_for_dialog(
    ctx: &AcquisitionContext<'_>,
    page_url: &str,
) -> Result<DialogSnapshot, ScraperError> {
    let attempts = ctx.config.dialog_poll_attempts.max(1);
    for attempt in 1..=attempts {
        let html = ctx.page.html().await?;
        if let Some(snapshot) = parse_dialog(&html, page_url) {
            debug!(attempt, nodes = snapshot.node_count, "review dialog rendered");
            return Ok(snapshot);
        }
        if attempt < attempts {
            ctx.clock().sleep(ctx.config.dialog_poll_interval).await;
        }
    }
    Err(ScraperError::DialogTimeout { attempts })
}

/// Polls until the dialog shows different reviews than `previous`, within
/// the configured page-change timeout. `Ok(None)` means nothing changed.
async fn wait_for_page_change(
    ctx: &AcquisitionContext<'_>,
    page_url: &str,
    previous: &DialogSnapshot,
) -> Result<Option<DialogSnapshot>, ScraperError> {
    for _ in 0..ctx.config.page_change_attempts() {
        ctx.clock().sleep(ctx.config.page_change_poll_interval).await;
        let html = ctx.page.html().await?;
        if let Some(snapshot) = parse_dialog(&html, page_url) {
            if snapshot.differs_from(previous) {
                return Ok(Some(snapshot));
            }
        }
    }
    Ok(None)
}
