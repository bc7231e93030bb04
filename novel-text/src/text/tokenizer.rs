//! Word tokenization of chapter lines.

use regex::Regex;
use std::sync::OnceLock;

use crate::{ChapterLine, Token};

/// Letters, marks, digits and connector punctuation form a word; an
/// apostrophe (straight or curly) between two word characters keeps the
/// word whole, so `don't` is one token and `'tis` is `tis`.
static WORD: OnceLock<Regex> = OnceLock::new();

fn word_pattern() -> &'static Regex {
    WORD.get_or_init(|| {
        Regex::new(r"[\p{L}\p{M}\p{Nd}\p{Pc}]+(?:['\u{2019}][\p{L}\p{M}\p{Nd}\p{Pc}]+)*")
            .expect("word pattern is valid")
    })
}

/// Split text into lowercase words, dropping purely numeric ones.
///
/// Curly apostrophes come out as `'`, so `Don’t` and `don't` are the same
/// token.
pub fn tokenize(text: &str) -> Vec<String> {
    word_pattern()
        .find_iter(text)
        .map(|m| normalize_word(m.as_str()))
        .filter(|word| !is_numeric(word))
        .collect()
}

/// Lowercase `word` and fold the typographic apostrophe into `'`.
pub fn normalize_word(word: &str) -> String {
    word.to_lowercase().replace('\u{2019}', "'")
}

/// Tokenize every line, keeping chapter order and word order.
pub fn tokenize_lines(lines: &[ChapterLine]) -> Vec<Token> {
    lines
        .iter()
        .flat_map(|line| {
            tokenize(&line.text).into_iter().map(|word| Token {
                chapter_number: line.chapter_number,
                word,
            })
        })
        .collect()
}

/// Only decimal digits can reach here from the word pattern, so any numeric
/// char is one.
fn is_numeric(word: &str) -> bool {
    word.chars().all(char::is_numeric)
}
