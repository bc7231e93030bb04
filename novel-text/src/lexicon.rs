//! Stop-word set and word→sentiment-category lexicon.
//!
//! Both tables ship with a bundled default and can be replaced by a file.
//! Accepted file layouts:
//! - stop words: one word per line, or CSV with the word in the first column
//! - lexicon: `word<TAB>category<TAB>0|1` (NRC word-level, rows flagged `0`
//!   are ignored), `word<TAB>category` or `word,category`
//!
//! Blank lines, `#` comments and a leading `word` header are skipped.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::error::{Result, TextError};
use crate::text::tokenizer::normalize_word;

const DEFAULT_STOP_WORDS: &str = include_str!("../data/stop_words.txt");
const DEFAULT_LEXICON: &str = include_str!("../data/sentiment_lexicon.tsv");

/// Words excluded from frequency and sentiment analysis.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The bundled English list.
    pub fn english() -> Self {
        Self::parse(DEFAULT_STOP_WORDS)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = read_table(path)?;
        let stop_words = Self::parse(&content);
        if stop_words.is_empty() {
            return Err(TextError::TableLoad {
                path: path.to_path_buf(),
                reason: "no stop words found".to_string(),
            });
        }
        Ok(stop_words)
    }

    pub fn parse(content: &str) -> Self {
        let words = table_rows(content)
            .filter_map(|fields| fields.first().map(|w| normalize_word(w)))
            .collect();
        Self { words }
    }

    /// `word` is expected in token form (see [`normalize_word`]).
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter
                .into_iter()
                .map(|w| {
                    let word: String = w.into();
                    normalize_word(&word)
                })
                .collect(),
        }
    }
}

/// Many-to-many mapping from words to sentiment categories.
#[derive(Debug, Clone, Default)]
pub struct SentimentLexicon {
    entries: HashMap<String, Vec<String>>,
}

impl SentimentLexicon {
    /// The bundled lexicon with NRC emotion categories.
    pub fn bundled() -> Self {
        Self::parse(DEFAULT_LEXICON).expect("bundled lexicon is valid")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = read_table(path)?;
        let lexicon = Self::parse(&content).map_err(|reason| TextError::TableLoad {
            path: path.to_path_buf(),
            reason,
        })?;
        if lexicon.is_empty() {
            return Err(TextError::TableLoad {
                path: path.to_path_buf(),
                reason: "no lexicon entries found".to_string(),
            });
        }
        Ok(lexicon)
    }

    /// Parse lexicon rows; the error names the first malformed line.
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        let mut lexicon = Self::default();

        for (line_no, line) in content.lines().enumerate() {
            let Some(fields) = split_row(line) else {
                continue;
            };
            if line_no == 0 && is_header(&fields) {
                continue;
            }

            match fields.as_slice() {
                [word, category] => lexicon.insert(word, category),
                [word, category, flag] => match *flag {
                    "1" => lexicon.insert(word, category),
                    "0" => {}
                    other => {
                        return Err(format!(
                            "line {}: association flag must be 0 or 1, got {:?}",
                            line_no + 1,
                            other
                        ));
                    }
                },
                _ => {
                    return Err(format!(
                        "line {}: expected word and category, got {:?}",
                        line_no + 1,
                        line
                    ));
                }
            }
        }

        Ok(lexicon)
    }

    pub fn insert(&mut self, word: &str, category: &str) {
        let categories = self.entries.entry(normalize_word(word)).or_default();
        if !categories.iter().any(|c| c == category) {
            categories.push(category.to_string());
        }
    }

    /// Categories of `word`, empty when the word is not in the lexicon.
    pub fn categories(&self, word: &str) -> &[String] {
        self.entries.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<W: AsRef<str>, C: AsRef<str>> FromIterator<(W, C)> for SentimentLexicon {
    fn from_iter<I: IntoIterator<Item = (W, C)>>(iter: I) -> Self {
        let mut lexicon = Self::default();
        for (word, category) in iter {
            lexicon.insert(word.as_ref(), category.as_ref());
        }
        lexicon
    }
}

fn read_table(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| TextError::TableLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Non-empty, non-comment rows, header excluded.
fn table_rows(content: &str) -> impl Iterator<Item = Vec<&str>> {
    content
        .lines()
        .enumerate()
        .filter_map(|(i, line)| split_row(line).map(|fields| (i, fields)))
        .filter(|(i, fields)| !(*i == 0 && is_header(fields)))
        .map(|(_, fields)| fields)
}

fn split_row(line: &str) -> Option<Vec<&str>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let delimiter = if line.contains('\t') { '\t' } else { ',' };
    Some(
        line.split(delimiter)
            .map(|f| f.trim().trim_matches('"'))
            .collect(),
    )
}

fn is_header(fields: &[&str]) -> bool {
    fields
        .first()
        .is_some_and(|f| f.eq_ignore_ascii_case("word"))
}
