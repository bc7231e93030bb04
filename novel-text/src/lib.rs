//! Chapter-aware text pipeline for novels stored as PDF
//!
//! The stages run strictly in order, each one a plain function over the
//! previous stage's output:
//! - extraction: PDF pages to [`PageBlock`]s
//! - normalization: page blocks to squished [`Line`]s inside a [`PageRange`]
//! - chapter tagging: forward-filled [`ChapterLine`]s
//! - tokenization: lowercase [`Token`]s without numeric words
//! - aggregation: per-chapter counts, top words and sentiment counts

pub mod aggregate;
pub mod error;
pub mod extract;
pub mod lexicon;
pub mod pipeline;
pub mod text;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use aggregate::{
    Aggregates, ChapterWordCount, DEFAULT_TOP_N_WORDS, SentimentCount, WordFrequency,
};
pub use error::{ChapterParseError, Result, TextError};
pub use extract::extract_pages;
pub use lexicon::{SentimentLexicon, StopWords};
pub use pipeline::{Analysis, AnalysisOptions, RunStats, analyze_document, analyze_pages};
pub use text::chapters::{SkippedHeading, TaggedLines, tag_chapters};
pub use text::normalizer::normalize_pages;
pub use text::tokenizer::{normalize_word, tokenize, tokenize_lines};

/// Text of one physical page, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBlock {
    /// 1-based page number
    pub page_index: usize,
    /// Raw extracted text, newlines intact
    pub raw_text: String,
}

impl PageBlock {
    pub fn new(page_index: usize, raw_text: impl Into<String>) -> Self {
        Self {
            page_index,
            raw_text: raw_text.into(),
        }
    }
}

/// A single whitespace-squished line of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub page_index: usize,
    pub text: String,
}

/// A line stamped with the chapter it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterLine {
    pub chapter_number: u32,
    pub text: String,
}

/// One lowercase word of a chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub chapter_number: u32,
    pub word: String,
}

/// Inclusive range of pages that hold the chapter body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct PageRange {
    pub first: usize,
    pub last: usize,
}

impl PageRange {
    pub fn new(first: usize, last: usize) -> Self {
        Self { first, last }
    }

    /// Every page of a document with `page_count` pages.
    pub fn whole(page_count: usize) -> Self {
        Self::new(1, page_count.max(1))
    }

    pub fn contains(&self, page_index: usize) -> bool {
        (self.first..=self.last).contains(&page_index)
    }

    pub fn is_valid(&self) -> bool {
        self.first >= 1 && self.first <= self.last
    }
}

impl From<[usize; 2]> for PageRange {
    fn from([first, last]: [usize; 2]) -> Self {
        Self::new(first, last)
    }
}

impl From<PageRange> for [usize; 2] {
    fn from(range: PageRange) -> Self {
        [range.first, range.last]
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.first, self.last)
    }
}
