//! Thresholds, weights and word lists for [`crate::compute_risk`].
//!
//! Every rule adds a fixed, non-negative number of points and one signal.

/// Seller tenure penalties, in months.
#[derive(Debug, Clone, PartialEq)]
pub struct TenureRule {
    pub very_new_below_months: u32,
    pub very_new_points: u32,
    pub new_below_months: u32,
    pub new_points: u32,
}

/// Sales history penalties.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRule {
    pub very_low_below: u64,
    pub very_low_points: u32,
    pub low_below: u64,
    pub low_points: u32,
}

/// Review corpus heuristics.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewCorpusRules {
    /// Applied when acquisition ran and found no reviews.
    pub no_reviews_points: u32,
    /// A review with at most this many words counts as short.
    pub short_review_max_words: usize,
    /// Penalize when the share of short reviews exceeds this.
    pub max_short_ratio: f64,
    pub short_points: u32,
    /// Penalize when distinct texts / all texts falls below this.
    pub min_unique_ratio: f64,
    pub repetitive_points: u32,
    /// Penalize when the share of positive reviews exceeds this...
    pub max_positive_ratio: f64,
    /// ...and the sample has at least this many reviews.
    pub min_reviews_for_uniformity: usize,
    pub uniform_positive_points: u32,
}

/// Title heuristics.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleRules {
    pub max_chars: usize,
    pub long_points: u32,
    pub max_caps_ratio: f64,
    pub caps_points: u32,
    pub min_unique_word_ratio: f64,
    pub repeated_words_points: u32,
}

/// Sentiment word lists. Entries are lowercase single words.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexicon {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RiskRules {
    pub tenure: TenureRule,
    pub sales: SalesRule,
    pub reviews: ReviewCorpusRules,
    pub title: TitleRules,
    pub lexicon: Lexicon,
}

impl Default for TenureRule {
    fn default() -> Self {
        Self {
            very_new_below_months: 12,
            very_new_points: 15,
            new_below_months: 24,
            new_points: 8,
        }
    }
}

impl Default for SalesRule {
    fn default() -> Self {
        Self {
            very_low_below: 20,
            very_low_points: 12,
            low_below: 100,
            low_points: 6,
        }
    }
}

impl Default for ReviewCorpusRules {
    fn default() -> Self {
        Self {
            no_reviews_points: 5,
            short_review_max_words: 6,
            max_short_ratio: 0.5,
            short_points: 10,
            min_unique_ratio: 0.7,
            repetitive_points: 15,
            max_positive_ratio: 0.9,
            min_reviews_for_uniformity: 8,
            uniform_positive_points: 10,
        }
    }
}

impl Default for TitleRules {
    fn default() -> Self {
        Self {
            max_chars: 140,
            long_points: 10,
            max_caps_ratio: 0.35,
            caps_points: 8,
            min_unique_word_ratio: 0.75,
            repeated_words_points: 8,
        }
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        let words = |list: &[&str]| -> Vec<String> { list.iter().map(|w| (*w).to_owned()).collect() };
        Self {
            positive: words(&[
                "love",
                "great",
                "amazing",
                "perfect",
                "excellent",
                "beautiful",
                "fast",
                "quality",
                "recommend",
            ]),
            negative: words(&[
                "bad", "poor", "terrible", "awful", "broken", "late", "cheap", "refund", "scam",
                "fake",
            ]),
        }
    }
}
