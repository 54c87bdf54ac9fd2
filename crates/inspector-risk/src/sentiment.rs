//! Word-list sentiment for review texts.

use std::collections::HashSet;

use crate::rules::Lexicon;

/// Net sentiment of `text`: +1 for each positive lexicon word present, -1
/// for each negative one. Each word counts once however often it appears.
///
/// A lexicon entry matches any word it starts, after lowercasing and
/// stripping surrounding punctuation: "Loved!" and "recommended" count, but
/// "breakfast" does not match "fast".
#[must_use]
pub fn sentiment_score(text: &str, lexicon: &Lexicon) -> i32 {
    let words: HashSet<String> = text
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphabetic()).to_lowercase())
        .filter(|w| !w.is_empty())
        .collect();

    let count = |list: &[String]| {
        let hits = list
            .iter()
            .filter(|entry| words.iter().any(|w| w.starts_with(entry.as_str())))
            .count();
        i32::try_from(hits).unwrap_or(i32::MAX)
    };
    count(lexicon.positive.as_slice()) - count(lexicon.negative.as_slice())
}
