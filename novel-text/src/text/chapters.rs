//! Chapter heading detection and forward-fill of chapter numbers onto lines.

use log::{debug, warn};
use regex::Regex;
use std::sync::OnceLock;

use crate::error::ChapterParseError;
use crate::{ChapterLine, Line};

static HEADING: OnceLock<Regex> = OnceLock::new();

fn heading_pattern() -> &'static Regex {
    HEADING.get_or_init(|| Regex::new(r"\bChapter\b").expect("heading pattern is valid"))
}

/// A heading line that was dropped because its designator did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedHeading {
    pub page_index: usize,
    pub text: String,
    pub error: ChapterParseError,
}

/// Output of [`tag_chapters`].
#[derive(Debug, Clone, Default)]
pub struct TaggedLines {
    /// Lines at or after the first heading, stamped with their chapter
    pub lines: Vec<ChapterLine>,
    /// Headings that were skipped, in input order
    pub skipped: Vec<SkippedHeading>,
    /// Lines discarded because no heading preceded them
    pub preamble_lines: usize,
}

/// Whether the line carries the word `Chapter` (case-sensitive).
pub fn is_heading(text: &str) -> bool {
    heading_pattern().is_match(text)
}

/// Parse the designator of a heading such as `Chapter 12` or `Chapter I`.
///
/// The text is split into a label and a designator on whitespace; only the
/// Roman numeral `I` and base-10 integers are understood.
pub fn parse_heading(text: &str) -> Result<u32, ChapterParseError> {
    let mut fields = text.split_whitespace();
    let _label = fields.next();
    let designator = fields.next().ok_or(ChapterParseError::MissingDesignator)?;

    let number = match designator {
        "I" => 1,
        other => other
            .parse::<u32>()
            .map_err(|_| ChapterParseError::InvalidDesignator(other.to_string()))?,
    };

    if number == 0 {
        return Err(ChapterParseError::ZeroChapter);
    }

    Ok(number)
}

/// Stamp every line with the number of the nearest preceding heading.
///
/// Lines before the first heading are discarded. Headings whose designator
/// fails to parse, or whose number would move the chapter backwards, are
/// logged and dropped without changing the current chapter.
pub fn tag_chapters(lines: &[Line]) -> TaggedLines {
    let mut tagged = TaggedLines::default();
    let mut current: Option<u32> = None;

    for line in lines {
        if is_heading(&line.text) {
            let parsed = parse_heading(&line.text).and_then(|number| match current {
                Some(previous) if number < previous => Err(ChapterParseError::OutOfOrder {
                    found: number,
                    current: previous,
                }),
                _ => Ok(number),
            });

            match parsed {
                Ok(number) => {
                    if current != Some(number) {
                        debug!("Chapter {} starts on page {}", number, line.page_index);
                    }
                    current = Some(number);
                }
                Err(error) => {
                    warn!(
                        "Skipping heading {:?} on page {}: {}",
                        line.text, line.page_index, error
                    );
                    tagged.skipped.push(SkippedHeading {
                        page_index: line.page_index,
                        text: line.text.clone(),
                        error,
                    });
                    continue;
                }
            }
        }

        match current {
            Some(chapter_number) => tagged.lines.push(ChapterLine {
                chapter_number,
                text: line.text.clone(),
            }),
            None => tagged.preamble_lines += 1,
        }
    }

    tagged
}
