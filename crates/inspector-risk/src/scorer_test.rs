use inspector_core::{ListingSnapshot, Review};

use super::*;
use crate::rules::{SalesRule, TenureRule};

const NONE_FOUND: &[Review] = &[];

fn snapshot(months: Option<u32>, sales: Option<u64>) -> ListingSnapshot {
    ListingSnapshot {
        seller_age_months: months,
        sales_count: sales,
        ..ListingSnapshot::default()
    }
}

fn reviews(texts: &[&str]) -> Vec<Review> {
    texts.iter().map(|t| Review::with_text(t)).collect()
}

fn count(signals: &[String], needle: &str) -> usize {
    signals.iter().filter(|s| s.as_str() == needle).count()
}

#[test]
fn new_shop_with_low_sales_and_no_reviews() {
    let report = compute_risk(
        &snapshot(Some(6), Some(10)),
        Some(NONE_FOUND),
        &RiskRules::default(),
    );
    assert_eq!(report.risk_score, 32);
    assert_eq!(count(&report.signals, SIGNAL_VERY_NEW_SHOP), 1);
    assert_eq!(count(&report.signals, SIGNAL_VERY_LOW_SALES), 1);
    assert_eq!(count(&report.signals, SIGNAL_NO_REVIEWS), 1);
    assert_eq!(report.signals.len(), 3);
}

#[test]
fn signals_follow_rule_order() {
    let snap = ListingSnapshot {
        title: Some("MUG MUG MUG".to_owned()),
        ..snapshot(Some(18), Some(50))
    };
    let report = compute_risk(&snap, Some(NONE_FOUND), &RiskRules::default());
    assert_eq!(
        report.signals,
        vec![
            SIGNAL_NEW_SHOP,
            SIGNAL_LOW_SALES,
            SIGNAL_NO_REVIEWS,
            SIGNAL_TITLE_CAPS,
            SIGNAL_TITLE_REPEATS,
        ]
    );
    assert_eq!(report.risk_score, 8 + 6 + 5 + 8 + 8);
}

#[test]
fn no_input_scores_zero() {
    let report = compute_risk(&ListingSnapshot::default(), None, &RiskRules::default());
    assert_eq!(report.risk_score, 0);
    assert!(report.signals.is_empty());
}

#[test]
fn established_shop_is_not_penalized() {
    let report = compute_risk(
        &snapshot(Some(24), Some(100)),
        None,
        &RiskRules::default(),
    );
    assert_eq!(report.risk_score, 0);
}

#[test]
fn short_repetitive_positive_corpus_hits_every_review_rule() {
    let corpus = reviews(&["Great mug!"; 10]);
    let report = compute_risk(
        &ListingSnapshot::default(),
        Some(corpus.as_slice()),
        &RiskRules::default(),
    );
    assert_eq!(
        report.signals,
        vec![
            SIGNAL_SHORT_REVIEWS,
            SIGNAL_REPETITIVE_REVIEWS,
            SIGNAL_UNIFORM_POSITIVE,
        ]
    );
    assert_eq!(report.risk_score, 35);
}

#[test]
fn uniform_positive_needs_enough_reviews() {
    let corpus = reviews(&[
        "Great quality and it arrived quickly in the mail",
        "Love the colour, it looks exactly like the photos online",
        "Perfect gift for my sister who collects these things",
    ]);
    let report = compute_risk(
        &ListingSnapshot::default(),
        Some(corpus.as_slice()),
        &RiskRules::default(),
    );
    assert!(report.signals.is_empty());
}

#[test]
fn inflected_praise_counts_as_positive() {
    let corpus = reviews(&[
        "Loved it, highly recommended",
        "Lovely, recommended to all",
        "Loved the glaze on this one",
        "Lovely colours and well packed",
        "Recommended to my whole family",
        "Love drinking my morning coffee from it",
        "Highly recommended seller",
        "Lovely gift for a friend",
    ]);
    let report = compute_risk(
        &ListingSnapshot::default(),
        Some(corpus.as_slice()),
        &RiskRules::default(),
    );
    assert_eq!(count(&report.signals, SIGNAL_UNIFORM_POSITIVE), 1);
}

#[test]
fn repetition_ignores_case() {
    let corpus = reviews(&[
        "Nice mug would buy again from this seller",
        "NICE MUG WOULD BUY AGAIN FROM THIS SELLER",
        "nice mug would buy again from this seller",
    ]);
    let report = compute_risk(
        &ListingSnapshot::default(),
        Some(corpus.as_slice()),
        &RiskRules::default(),
    );
    assert_eq!(report.signals, vec![SIGNAL_REPETITIVE_REVIEWS]);
}

#[test]
fn long_title_is_flagged() {
    let title = (0..40).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ");
    let snap = ListingSnapshot {
        title: Some(title),
        ..ListingSnapshot::default()
    };
    let report = compute_risk(&snap, None, &RiskRules::default());
    assert_eq!(report.signals, vec![SIGNAL_LONG_TITLE]);
    assert_eq!(report.risk_score, 10);
}

#[test]
fn blank_title_is_ignored() {
    let snap = ListingSnapshot {
        title: Some("   ".to_owned()),
        ..ListingSnapshot::default()
    };
    assert!(compute_risk(&snap, None, &RiskRules::default())
        .signals
        .is_empty());
}

#[test]
fn score_is_clamped_to_hundred() {
    let rules = RiskRules {
        tenure: TenureRule {
            very_new_points: 90,
            ..TenureRule::default()
        },
        sales: SalesRule {
            very_low_points: 90,
            ..SalesRule::default()
        },
        ..RiskRules::default()
    };
    let report = compute_risk(&snapshot(Some(1), Some(1)), None, &rules);
    assert_eq!(report.risk_score, 100);
    assert_eq!(report.signals.len(), 2);
}

#[test]
fn injected_weights_are_used() {
    let rules = RiskRules {
        reviews: ReviewCorpusRules {
            no_reviews_points: 0,
            ..ReviewCorpusRules::default()
        },
        ..RiskRules::default()
    };
    let report = compute_risk(&ListingSnapshot::default(), Some(NONE_FOUND), &rules);
    assert_eq!(report.risk_score, 0);
    assert_eq!(report.signals, vec![SIGNAL_NO_REVIEWS]);
}
