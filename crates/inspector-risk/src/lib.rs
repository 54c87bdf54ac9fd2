//! Heuristic risk scoring for a listing snapshot and its reviews.

pub mod display;
pub mod rules;
pub mod scorer;
pub mod sentiment;

pub use display::{format_tenure, RiskLevel, SellerTrust};
pub use rules::{Lexicon, ReviewCorpusRules, RiskRules, SalesRule, TenureRule, TitleRules};
pub use scorer::compute_risk;
pub use sentiment::sentiment_score;
