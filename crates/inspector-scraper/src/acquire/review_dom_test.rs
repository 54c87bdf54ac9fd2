use super::*;

const PAGE: &str = "https://www.etsy.com/listing/123/mug";

fn review_region(reviewer: &str, text: &str, extra: &str) -> String {
    format!(
        r#"<div data-review-region="r">
             <span aria-label="4 out of 5 stars"></span>
             <a href="/people/{reviewer}"><img class="wt-circle" width="36" src="https://i.etsystatic.com/iusa/a/1/iusa_75x75.1_a.jpg"></a>
             <a href="/people/{reviewer}">{reviewer}</a>
             <span class="date-line">Mar 3, 2024</span>
             <div data-review-text>{text}</div>
             {extra}
           </div>"#
    )
}

fn page(regions: &str) -> String {
    format!(r#"<html><body><div id="reviews">{regions}</div></body></html>"#)
}

#[test]
fn parses_all_review_fields() {
    let html = page(&review_region(
        "ann",
        "Beautiful mug, arrived quickly.",
        r#"<img src="https://i.etsystatic.com/iap/aa/1/iap_300x300.1_bb.jpg" width="300">
           <img src="https://i.etsystatic.com/iap/aa/1/iap_640xN.1_bb.jpg">
           <video src="clip.mp4"></video>"#,
    ));

    let reviews = parse_container_reviews(&html, PAGE);

    assert_eq!(reviews.len(), 1);
    let review = &reviews[0];
    assert_eq!(review.text, "Beautiful mug, arrived quickly.");
    assert_eq!(review.rating, Some(4.0));
    assert_eq!(review.reviewer_name.as_deref(), Some("ann"));
    assert_eq!(review.date.as_deref(), Some("Mar 3, 2024"));
    assert!(review.has_video);
    assert!(review.has_photo);
    assert_eq!(
        review.images,
        vec!["https://i.etsystatic.com/iap/aa/1/iap_fullxfull.1_bb.jpg"],
        "thumbnails of one photo collapse to a single full-size URL; avatar excluded"
    );
}

#[test]
fn date_element_wins_over_dates_in_body_text() {
    let html = page(
        r#"<div data-review-region="r">
             <div data-review-text>Ordered on Jan 2, 2024 as a birthday gift, arrived on time.</div>
             <p class="wt-text-caption">ann Mar 3, 2024</p>
           </div>
           <div data-review-region="r">
             <div data-review-text>No separate date shown, posted Feb 9, 2024</div>
           </div>"#,
    );

    let reviews = parse_container_reviews(&html, PAGE);

    assert_eq!(reviews[0].date.as_deref(), Some("Mar 3, 2024"));
    assert_eq!(reviews[1].date.as_deref(), Some("Feb 9, 2024"));
}

#[test]
fn regions_without_body_text_are_discarded() {
    let html = page(&format!(
        "{}{}",
        review_region("ann", "ok", ""),
        review_region("bob", "Solid quality", "")
    ));
    let reviews = parse_container_reviews(&html, PAGE);
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].reviewer_name.as_deref(), Some("bob"));
    assert!(!reviews[0].has_photo);
    assert!(!reviews[0].has_video);
}

#[test]
fn duplicate_regions_collapse_and_reparse_is_stable() {
    let region = review_region("ann", "Great seller", "");
    let html = page(&format!("{region}{region}"));

    let first = parse_container_reviews(&html, PAGE);
    let second = parse_container_reviews(&html, PAGE);

    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
}

#[test]
fn no_review_regions_yield_empty() {
    let html = "<html><body><p>Item details</p></body></html>";
    assert!(parse_container_reviews(html, PAGE).is_empty());
}

#[test]
fn dialog_snapshot_reports_count_and_first_reviewer() {
    let html = format!(
        r#"<html><body>
             <div id="reviews">{}</div>
             <div role="dialog">{}{}</div>
           </body></html>"#,
        review_region("zed", "Inline review text", ""),
        review_region("ann", "Dialog review one", ""),
        review_region("bob", "Dialog review two", ""),
    );

    let snapshot = parse_dialog(&html, PAGE).unwrap();

    assert_eq!(snapshot.node_count, 2);
    assert_eq!(snapshot.first_identity.as_deref(), Some("ann"));
    assert_eq!(snapshot.reviews.len(), 2);
}

#[test]
fn dialog_without_reviews_is_skipped_for_a_later_one() {
    let html = format!(
        r#"<html><body>
             <div role="dialog"><p>We use cookies.</p></div>
             <div aria-modal="true">{}</div>
           </body></html>"#,
        review_region("ann", "Dialog review one", ""),
    );

    let snapshot = parse_dialog(&html, PAGE).unwrap();

    assert_eq!(snapshot.node_count, 1);
    assert_eq!(snapshot.first_identity.as_deref(), Some("ann"));
}

#[test]
fn empty_dialog_is_not_a_snapshot() {
    let html = r#"<html><body><div role="dialog"><p>Loading…</p></div></body></html>"#;
    assert!(parse_dialog(html, PAGE).is_none());
    assert!(parse_dialog("<html><body></body></html>", PAGE).is_none());
}

#[test]
fn snapshots_differ_on_count_or_first_identity() {
    let base = DialogSnapshot {
        reviews: Vec::new(),
        node_count: 4,
        first_identity: Some("ann".to_owned()),
    };
    let same = base.clone();
    let other_reviewer = DialogSnapshot {
        first_identity: Some("bob".to_owned()),
        ..base.clone()
    };
    let other_count = DialogSnapshot {
        node_count: 3,
        ..base.clone()
    };
    assert!(!same.differs_from(&base));
    assert!(other_reviewer.differs_from(&base));
    assert!(other_count.differs_from(&base));
}
