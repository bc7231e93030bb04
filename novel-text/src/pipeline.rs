//! End-to-end run: pages → lines → chapter lines → tokens → aggregates.

use log::{debug, info, warn};
use serde::Serialize;
use std::path::Path;

use crate::aggregate::{Aggregates, DEFAULT_TOP_N_WORDS};
use crate::error::Result;
use crate::extract::extract_pages;
use crate::lexicon::{SentimentLexicon, StopWords};
use crate::text::chapters::tag_chapters;
use crate::text::normalizer::normalize_pages;
use crate::text::tokenizer::tokenize_lines;
use crate::{PageBlock, PageRange};

/// Knobs of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// In-scope pages; `None` means the whole document
    pub page_range: Option<PageRange>,
    pub top_n_words: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            page_range: None,
            top_n_words: DEFAULT_TOP_N_WORDS,
        }
    }
}

/// Counters collected along the way, shown in the report header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub pages_total: usize,
    pub page_range: Option<PageRange>,
    pub lines: usize,
    pub preamble_lines: usize,
    pub chapter_lines: usize,
    pub skipped_headings: usize,
    pub tokens: usize,
    pub filtered_tokens: usize,
}

/// Aggregates of a run plus its statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    #[serde(flatten)]
    pub aggregates: Aggregates,
    pub stats: RunStats,
}

/// Extract `path` and run the whole pipeline over it.
pub fn analyze_document(
    path: &Path,
    options: &AnalysisOptions,
    stop_words: &StopWords,
    lexicon: &SentimentLexicon,
) -> Result<Analysis> {
    let pages = extract_pages(path)?;
    analyze_pages(&pages, options, stop_words, lexicon)
}

/// Run normalization, tagging, tokenization and aggregation over extracted pages.
pub fn analyze_pages(
    pages: &[PageBlock],
    options: &AnalysisOptions,
    stop_words: &StopWords,
    lexicon: &SentimentLexicon,
) -> Result<Analysis> {
    let range = options
        .page_range
        .unwrap_or_else(|| PageRange::whole(pages.len()));

    let lines = normalize_pages(pages, range)?;
    let tagged = tag_chapters(&lines);

    if !tagged.skipped.is_empty() {
        warn!(
            "{} chapter heading(s) could not be parsed and were skipped",
            tagged.skipped.len()
        );
    }
    if tagged.lines.is_empty() {
        warn!("No chapter heading found in pages {}", range);
    }

    let tokens = tokenize_lines(&tagged.lines);
    let filtered_tokens = tokens
        .iter()
        .filter(|t| !stop_words.contains(&t.word))
        .count();
    debug!(
        "{} tokens, {} after stop-word removal",
        tokens.len(),
        filtered_tokens
    );

    let aggregates = Aggregates::compute(&tokens, stop_words, lexicon, options.top_n_words);
    info!(
        "{} chapters, {} distinct top words, {} sentiment categories",
        aggregates.chapter_counts.len(),
        aggregates.word_frequencies.len(),
        aggregates.sentiment_counts.len()
    );

    let stats = RunStats {
        pages_total: pages.len(),
        page_range: Some(range),
        lines: lines.len(),
        preamble_lines: tagged.preamble_lines,
        chapter_lines: tagged.lines.len(),
        skipped_headings: tagged.skipped.len(),
        tokens: tokens.len(),
        filtered_tokens,
    };

    Ok(Analysis { aggregates, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextError;
    use crate::aggregate::{ChapterWordCount, SentimentCount};

    fn book() -> Vec<PageBlock> {
        vec![
            PageBlock::new(1, "A NOVEL\nChapter 2 appears in the contents"),
            PageBlock::new(2, "Chapter I\nthe old man walked 3 miles\n"),
            PageBlock::new(3, "he felt joy and hope\nChapter IV\nthe storm came"),
            PageBlock::new(4, "Chapter 2\nthe old man felt fear"),
            PageBlock::new(5, "Chapter 9\nAcknowledgements"),
        ]
    }

    fn lexicon() -> SentimentLexicon {
        [
            ("joy", "joy"),
            ("joy", "positive"),
            ("hope", "anticipation"),
            ("hope", "positive"),
            ("storm", "fear"),
            ("fear", "fear"),
            ("fear", "negative"),
        ]
        .into_iter()
        .collect()
    }

    fn options(first: usize, last: usize) -> AnalysisOptions {
        AnalysisOptions {
            page_range: Some(PageRange::new(first, last)),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_run_over_range() {
        let stop_words: StopWords = ["the", "and", "he"].into_iter().collect();
        let analysis = analyze_pages(&book(), &options(2, 4), &stop_words, &lexicon()).unwrap();

        // chapter 1: "chapter i" + "the old man walked miles" + "he felt joy and hope"
        //          + "the storm came"  (Chapter IV skipped)
        // chapter 2: "chapter" + "the old man felt fear"
        assert_eq!(
            analysis.aggregates.chapter_counts,
            vec![
                ChapterWordCount {
                    chapter_number: 1,
                    count: 15,
                },
                ChapterWordCount {
                    chapter_number: 2,
                    count: 6,
                },
            ]
        );
        assert_eq!(analysis.stats.skipped_headings, 1);
        assert_eq!(analysis.stats.tokens, 21);

        let top = &analysis.aggregates.word_frequencies[0];
        assert_eq!((top.word.as_str(), top.count), ("chapter", 2));
        assert!(
            analysis
                .aggregates
                .word_frequencies
                .iter()
                .all(|f| f.word != "the" && f.word != "3")
        );

        assert_eq!(
            analysis.aggregates.sentiment_counts,
            vec![
                SentimentCount {
                    category: "anticipation".to_string(),
                    count: 1,
                },
                SentimentCount {
                    category: "fear".to_string(),
                    count: 2,
                },
                SentimentCount {
                    category: "joy".to_string(),
                    count: 1,
                },
                SentimentCount {
                    category: "negative".to_string(),
                    count: 1,
                },
                SentimentCount {
                    category: "positive".to_string(),
                    count: 2,
                },
            ]
        );
    }

    #[test]
    fn test_heading_outside_range_is_ignored() {
        let stop_words = StopWords::default();
        let analysis = analyze_pages(&book(), &options(2, 3), &stop_words, &lexicon()).unwrap();
        let chapters: Vec<u32> = analysis
            .aggregates
            .chapter_counts
            .iter()
            .map(|c| c.chapter_number)
            .collect();
        assert_eq!(chapters, vec![1]);
    }

    #[test]
    fn test_whole_document_when_no_range() {
        let stop_words = StopWords::default();
        let analysis =
            analyze_pages(&book(), &AnalysisOptions::default(), &stop_words, &lexicon()).unwrap();
        assert_eq!(analysis.stats.page_range, Some(PageRange::new(1, 5)));
        // page 1's "Chapter 2 appears ..." is a heading with designator "2"
        let chapters: Vec<u32> = analysis
            .aggregates
            .chapter_counts
            .iter()
            .map(|c| c.chapter_number)
            .collect();
        assert_eq!(chapters, vec![2, 9]);
        assert_eq!(analysis.stats.skipped_headings, 2);
    }

    #[test]
    fn test_empty_range_is_fatal() {
        let err = analyze_pages(&book(), &options(40, 50), &StopWords::default(), &lexicon())
            .unwrap_err();
        assert!(matches!(err, TextError::EmptyRange { .. }));
        assert!(err.to_string().contains("[40, 50]"));
    }

    #[test]
    fn test_unreadable_document_is_fatal() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.pdf");
        let err = analyze_document(
            &path,
            &AnalysisOptions::default(),
            &StopWords::default(),
            &lexicon(),
        )
        .unwrap_err();
        assert!(matches!(err, TextError::Extraction { .. }));
    }

    #[test]
    fn test_typographic_stop_words_are_filtered() {
        let pages = vec![PageBlock::new(
            1,
            "Chapter I\nI don\u{2019}t know, I don\u{2019}t care. It\u{2019}s late.",
        )];
        let analysis = analyze_pages(
            &pages,
            &AnalysisOptions::default(),
            &StopWords::english(),
            &lexicon(),
        )
        .unwrap();

        let words: Vec<&str> = analysis
            .aggregates
            .word_frequencies
            .iter()
            .map(|f| f.word.as_str())
            .collect();
        assert!(!words.contains(&"don't"));
        assert!(!words.contains(&"it's"));
        assert!(words.iter().all(|w| !w.contains('\u{2019}')));
        assert!(words.contains(&"late"));
    }

    #[test]
    fn test_top_n_is_respected() {
        let stop_words = StopWords::default();
        let options = AnalysisOptions {
            page_range: Some(PageRange::new(2, 4)),
            top_n_words: 3,
        };
        let analysis = analyze_pages(&book(), &options, &stop_words, &lexicon()).unwrap();
        assert_eq!(analysis.aggregates.word_frequencies.len(), 3);
    }
}
