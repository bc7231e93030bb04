//! Report rendering: chapter bar chart, word cloud and sentiment bar chart.
//!
//! Rendering is a pure function of the analysis; nothing here touches the
//! pipeline or global state.

use anyhow::Result;
use chrono::{DateTime, Utc};
use novel_text::{Analysis, WordFrequency};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

/// Number of weight tiers in the word cloud.
const CLOUD_TIERS: usize = 5;

/// Presentation settings.
#[derive(Debug, Clone, Copy)]
pub struct ReportStyle {
    pub cloud_words: usize,
    pub chart_width: usize,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a Path,
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    analysis: &'a Analysis,
}

/// Serialize the analysis with its source and a timestamp.
pub fn render_json(source: &Path, analysis: &Analysis) -> Result<String> {
    let report = JsonReport {
        source,
        generated_at: Utc::now(),
        analysis,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Render the plain-text report.
pub fn render_text(source: &Path, analysis: &Analysis, style: &ReportStyle) -> String {
    let stats = &analysis.stats;
    let aggregates = &analysis.aggregates;
    let mut out = String::new();

    let _ = writeln!(out, "Report: {}", source.display());
    if let Some(range) = stats.page_range {
        let _ = writeln!(out, "Pages {} of {}", range, stats.pages_total);
    }
    let _ = writeln!(
        out,
        "Lines: {} ({} before the first chapter), skipped headings: {}",
        stats.lines, stats.preamble_lines, stats.skipped_headings
    );
    let _ = writeln!(
        out,
        "Words: {} ({} after stop-word removal)",
        stats.tokens, stats.filtered_tokens
    );

    out.push('\n');
    out.push_str("Words per chapter\n");
    let chapter_rows: Vec<(String, usize)> = aggregates
        .chapter_counts
        .iter()
        .map(|c| (c.chapter_number.to_string(), c.count))
        .collect();
    out.push_str(&bar_chart(&chapter_rows, style.chart_width));

    out.push('\n');
    let _ = writeln!(out, "Word cloud (top {})", style.cloud_words);
    out.push_str(&word_cloud(&aggregates.word_frequencies, style.cloud_words));

    out.push('\n');
    out.push_str("Sentiment\n");
    let sentiment_rows: Vec<(String, usize)> = aggregates
        .sentiment_counts
        .iter()
        .map(|s| (s.category.clone(), s.count))
        .collect();
    out.push_str(&bar_chart(&sentiment_rows, style.chart_width));

    out
}

/// Horizontal bar chart, bars scaled so the largest count fills `width`.
fn bar_chart(rows: &[(String, usize)], width: usize) -> String {
    if rows.is_empty() {
        return "  (no data)\n".to_string();
    }

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let max = rows.iter().map(|(_, count)| *count).max().unwrap_or(0);

    let mut out = String::new();
    for (label, count) in rows {
        let _ = writeln!(
            out,
            "  {:>label_width$} | {} {}",
            label,
            "#".repeat(bar_length(*count, max, width)),
            count
        );
    }
    out
}

fn bar_length(count: usize, max: usize, width: usize) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    ((count * width + max / 2) / max).max(1)
}

/// Words grouped into weight tiers, heaviest first; tier = share of the top count.
fn word_cloud(frequencies: &[WordFrequency], limit: usize) -> String {
    let words = &frequencies[..frequencies.len().min(limit)];
    let Some(max) = words.first().map(|w| w.count) else {
        return "  (no data)\n".to_string();
    };

    let mut tiers: Vec<Vec<&str>> = vec![Vec::new(); CLOUD_TIERS];
    for word in words {
        let tier = (word.count * CLOUD_TIERS).div_ceil(max).clamp(1, CLOUD_TIERS);
        tiers[CLOUD_TIERS - tier].push(&word.word);
    }

    let mut out = String::new();
    for (i, tier) in tiers.iter().enumerate() {
        if tier.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  [{}] {}", CLOUD_TIERS - i, tier.join(" "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use novel_text::{
        Aggregates, ChapterWordCount, PageRange, RunStats, SentimentCount,
    };

    fn freq(word: &str, count: usize) -> WordFrequency {
        WordFrequency {
            word: word.to_string(),
            count,
        }
    }

    fn analysis() -> Analysis {
        Analysis {
            aggregates: Aggregates {
                chapter_counts: vec![
                    ChapterWordCount {
                        chapter_number: 1,
                        count: 100,
                    },
                    ChapterWordCount {
                        chapter_number: 2,
                        count: 50,
                    },
                ],
                word_frequencies: vec![freq("whale", 10), freq("sea", 5), freq("oar", 1)],
                sentiment_counts: vec![SentimentCount {
                    category: "fear".to_string(),
                    count: 7,
                }],
            },
            stats: RunStats {
                pages_total: 10,
                page_range: Some(PageRange::new(2, 9)),
                lines: 40,
                preamble_lines: 3,
                chapter_lines: 37,
                skipped_headings: 1,
                tokens: 150,
                filtered_tokens: 80,
            },
        }
    }

    #[test]
    fn test_bar_length_scales_to_width() {
        assert_eq!(bar_length(100, 100, 50), 50);
        assert_eq!(bar_length(50, 100, 50), 25);
        assert_eq!(bar_length(1, 1000, 50), 1);
        assert_eq!(bar_length(0, 100, 50), 0);
    }

    #[test]
    fn test_bar_chart_rows() {
        let rows = vec![("1".to_string(), 4), ("10".to_string(), 2)];
        let chart = bar_chart(&rows, 4);
        assert_eq!(chart, "   1 | #### 4\n  10 | ## 2\n");
        assert_eq!(bar_chart(&[], 4), "  (no data)\n");
    }

    #[test]
    fn test_word_cloud_tiers() {
        let cloud = word_cloud(&[freq("whale", 10), freq("sea", 5), freq("oar", 1)], 10);
        assert_eq!(cloud, "  [5] whale\n  [3] sea\n  [1] oar\n");
    }

    #[test]
    fn test_word_cloud_limit() {
        let cloud = word_cloud(&[freq("whale", 10), freq("sea", 5)], 1);
        assert!(cloud.contains("whale"));
        assert!(!cloud.contains("sea"));
        assert_eq!(word_cloud(&[], 5), "  (no data)\n");
    }

    #[test]
    fn test_render_text_sections() {
        let style = ReportStyle {
            cloud_words: 100,
            chart_width: 10,
        };
        let text = render_text(Path::new("novel.pdf"), &analysis(), &style);
        assert!(text.starts_with("Report: novel.pdf\n"));
        assert!(text.contains("Pages [2, 9] of 10"));
        assert!(text.contains("Words per chapter\n  1 | ########## 100\n  2 | ##### 50\n"));
        assert!(text.contains("[5] whale"));
        assert!(text.contains("Sentiment\n  fear | ########## 7\n"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(Path::new("novel.pdf"), &analysis()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["source"], "novel.pdf");
        assert!(value["generated_at"].is_string());
        assert_eq!(value["chapter_counts"][0]["count"], 100);
        assert_eq!(value["word_frequencies"][0]["word"], "whale");
        assert_eq!(value["sentiment_counts"][0]["category"], "fear");
        assert_eq!(value["stats"]["skipped_headings"], 1);
        assert_eq!(value["stats"]["page_range"][1], 9);
    }
}
