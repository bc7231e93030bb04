//! Reductions over tokens: per-chapter counts, top words and sentiment counts.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::Token;
use crate::lexicon::{SentimentLexicon, StopWords};

/// Default cap on the number of rows in the word-frequency table.
pub const DEFAULT_TOP_N_WORDS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterWordCount {
    pub chapter_number: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentimentCount {
    pub category: String,
    pub count: usize,
}

/// The three collections handed to the report renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregates {
    /// Ascending by chapter number
    pub chapter_counts: Vec<ChapterWordCount>,
    /// Descending by count, ties in first-seen order
    pub word_frequencies: Vec<WordFrequency>,
    /// Ascending by category name
    pub sentiment_counts: Vec<SentimentCount>,
}

impl Aggregates {
    pub fn compute(
        tokens: &[Token],
        stop_words: &StopWords,
        lexicon: &SentimentLexicon,
        top_n_words: usize,
    ) -> Self {
        let filtered: Vec<&Token> = tokens
            .iter()
            .filter(|t| !stop_words.contains(&t.word))
            .collect();

        Self {
            chapter_counts: chapter_word_counts(tokens),
            word_frequencies: word_frequencies(&filtered, top_n_words),
            sentiment_counts: sentiment_counts(&filtered, lexicon),
        }
    }
}

/// Count every token per chapter, stop words included.
pub fn chapter_word_counts(tokens: &[Token]) -> Vec<ChapterWordCount> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.chapter_number).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(chapter_number, count)| ChapterWordCount {
            chapter_number,
            count,
        })
        .collect()
}

/// Most frequent words, at most `top_n` of them.
pub fn word_frequencies(tokens: &[&Token], top_n: usize) -> Vec<WordFrequency> {
    // word -> (first seen position, count)
    let mut seen: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, token) in tokens.iter().enumerate() {
        seen.entry(token.word.as_str()).or_insert((position, 0)).1 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = seen
        .into_iter()
        .map(|(word, (first, count))| (word, first, count))
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.1.cmp(&b.1)));
    ranked.truncate(top_n);

    ranked
        .into_iter()
        .map(|(word, _, count)| WordFrequency {
            word: word.to_string(),
            count,
        })
        .collect()
}

/// Join tokens against the lexicon; a token counts once per category it maps to.
pub fn sentiment_counts(tokens: &[&Token], lexicon: &SentimentLexicon) -> Vec<SentimentCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for token in tokens {
        for category in lexicon.categories(&token.word) {
            *counts.entry(category.as_str()).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(category, count)| SentimentCount {
            category: category.to_string(),
            count,
        })
        .collect()
}
