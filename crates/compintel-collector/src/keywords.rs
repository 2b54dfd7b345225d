//! Frequency-ranked keyword extraction over collected text.

use std::collections::{HashMap, HashSet};

use compintel_core::CollectionRecord;

const DEFAULT_STOPWORDS: [&str; 13] = [
    "the", "and", "or", "in", "on", "at", "to", "a", "an", "of", "for", "with", "by",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordConfig {
    pub stopwords: HashSet<String>,
    /// Tokens shorter than this many characters are discarded.
    pub min_word_length: usize,
    pub top_n: usize,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            stopwords: DEFAULT_STOPWORDS.iter().map(|w| (*w).to_string()).collect(),
            min_word_length: 4,
            top_n: 50,
        }
    }
}

/// Top `config.top_n` whitespace tokens by descending frequency.
///
/// Absent texts are dropped before concatenation. Tokens are lower-cased
/// but keep their punctuation; equal counts keep first-seen order.
#[must_use]
pub fn extract_keywords(texts: &[Option<&str>], config: &KeywordConfig) -> Vec<String> {
    let combined = texts
        .iter()
        .flatten()
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in combined.split_whitespace() {
        if token.chars().count() < config.min_word_length || config.stopwords.contains(token) {
            continue;
        }
        let count = counts.entry(token).or_insert(0);
        if *count == 0 {
            order.push(token);
        }
        *count += 1;
    }

    // Stable sort keeps first-seen order among equal counts.
    order.sort_by_key(|token| std::cmp::Reverse(counts[token]));
    order
        .into_iter()
        .take(config.top_n)
        .map(str::to_string)
        .collect()
}

/// The present texts of a record that feed keyword extraction: every website
/// section, then each news item's content and description. Null news fields
/// are left out here rather than rendered.
#[must_use]
pub fn keyword_texts(record: &CollectionRecord) -> Vec<&str> {
    let sections = record
        .website_content()
        .values()
        .map(|section| section.text.as_str());
    let news = record.news().iter().flat_map(|item| {
        [item.content.as_deref(), item.description.as_deref()]
            .into_iter()
            .flatten()
    });
    sections.chain(news).collect()
}

#[cfg(test)]
#[path = "keywords_test.rs"]
mod tests;
