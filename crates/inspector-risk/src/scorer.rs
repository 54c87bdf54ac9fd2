//! Additive rule engine producing a [`RiskReport`].

use std::collections::HashSet;

use inspector_core::{ListingSnapshot, Review, RiskReport};

use crate::rules::{ReviewCorpusRules, RiskRules, TitleRules};
use crate::sentiment::sentiment_score;

pub const SIGNAL_VERY_NEW_SHOP: &str = "Shop appears very new (< 1 year).";
pub const SIGNAL_NEW_SHOP: &str = "Shop is relatively new (< 2 years).";
pub const SIGNAL_VERY_LOW_SALES: &str = "Very low sales history.";
pub const SIGNAL_LOW_SALES: &str = "Low sales history.";
pub const SIGNAL_NO_REVIEWS: &str =
    "No reviews could be retrieved; they may be hidden or unavailable.";
pub const SIGNAL_SHORT_REVIEWS: &str = "Many reviews are very short/generic.";
pub const SIGNAL_REPETITIVE_REVIEWS: &str = "Review text appears repetitive.";
pub const SIGNAL_UNIFORM_POSITIVE: &str =
    "Reviews are overwhelmingly positive with little variation.";
pub const SIGNAL_LONG_TITLE: &str = "Title is unusually long (possible keyword stuffing).";
pub const SIGNAL_TITLE_CAPS: &str = "Title has excessive capitalization.";
pub const SIGNAL_TITLE_REPEATS: &str = "Title repeats words unusually often.";

/// Accumulates points and signals in rule order.
#[derive(Default)]
struct Findings {
    points: u32,
    signals: Vec<String>,
}

impl Findings {
    fn add(&mut self, points: u32, signal: &str) {
        self.points = self.points.saturating_add(points);
        self.signals.push(signal.to_owned());
    }
}

/// Scores a listing. Pure and deterministic.
///
/// `reviews` is `None` when acquisition was not attempted; `Some(&[])` means
/// it ran and found nothing, which adds the zero-review penalty. Missing
/// snapshot fields contribute nothing.
///
/// Signals appear in rule order: seller age, sales, reviews, title.
#[must_use]
pub fn compute_risk(
    snapshot: &ListingSnapshot,
    reviews: Option<&[Review]>,
    rules: &RiskRules,
) -> RiskReport {
    let mut findings = Findings::default();

    if let Some(months) = snapshot.seller_age_months {
        let rule = &rules.tenure;
        if months < rule.very_new_below_months {
            findings.add(rule.very_new_points, SIGNAL_VERY_NEW_SHOP);
        } else if months < rule.new_below_months {
            findings.add(rule.new_points, SIGNAL_NEW_SHOP);
        }
    }

    if let Some(sales) = snapshot.sales_count {
        let rule = &rules.sales;
        if sales < rule.very_low_below {
            findings.add(rule.very_low_points, SIGNAL_VERY_LOW_SALES);
        } else if sales < rule.low_below {
            findings.add(rule.low_points, SIGNAL_LOW_SALES);
        }
    }

    if let Some(reviews) = reviews {
        if reviews.is_empty() {
            findings.add(rules.reviews.no_reviews_points, SIGNAL_NO_REVIEWS);
        } else {
            review_corpus_signals(reviews, rules, &mut findings);
        }
    }

    if let Some(title) = snapshot.title.as_deref() {
        title_signals(title, &rules.title, &mut findings);
    }

    RiskReport::from_points(findings.points, findings.signals)
}

#[allow(clippy::cast_precision_loss)]
fn ratio(part: usize, whole: usize) -> f64 {
    part as f64 / whole.max(1) as f64
}

fn review_corpus_signals(reviews: &[Review], rules: &RiskRules, findings: &mut Findings) {
    let ReviewCorpusRules {
        short_review_max_words,
        max_short_ratio,
        short_points,
        min_unique_ratio,
        repetitive_points,
        max_positive_ratio,
        min_reviews_for_uniformity,
        uniform_positive_points,
        ..
    } = rules.reviews;
    let total = reviews.len();

    let short = reviews
        .iter()
        .filter(|r| r.text.split_whitespace().count() <= short_review_max_words)
        .count();
    if ratio(short, total) > max_short_ratio {
        findings.add(short_points, SIGNAL_SHORT_REVIEWS);
    }

    let unique: HashSet<String> = reviews.iter().map(|r| r.text.to_lowercase()).collect();
    if ratio(unique.len(), total) < min_unique_ratio {
        findings.add(repetitive_points, SIGNAL_REPETITIVE_REVIEWS);
    }

    let positive = reviews
        .iter()
        .filter(|r| sentiment_score(&r.text, &rules.lexicon) > 0)
        .count();
    if total >= min_reviews_for_uniformity && ratio(positive, total) > max_positive_ratio {
        findings.add(uniform_positive_points, SIGNAL_UNIFORM_POSITIVE);
    }
}

fn title_signals(title: &str, rules: &TitleRules, findings: &mut Findings) {
    let title = title.trim();
    if title.is_empty() {
        return;
    }
    let chars = title.chars().count();

    if chars > rules.max_chars {
        findings.add(rules.long_points, SIGNAL_LONG_TITLE);
    }

    let caps = title.chars().filter(char::is_ascii_uppercase).count();
    if ratio(caps, chars) > rules.max_caps_ratio {
        findings.add(rules.caps_points, SIGNAL_TITLE_CAPS);
    }

    let words: Vec<String> = title.split_whitespace().map(str::to_lowercase).collect();
    let distinct: HashSet<&str> = words.iter().map(String::as_str).collect();
    if ratio(distinct.len(), words.len()) < rules.min_unique_word_ratio {
        findings.add(rules.repeated_words_points, SIGNAL_TITLE_REPEATS);
    }
}

#[cfg(test)]
#[path = "scorer_test.rs"]
mod tests;
