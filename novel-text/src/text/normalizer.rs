//! Page blocks to squished lines, restricted to the in-scope page range.

use log::debug;

use crate::error::{Result, TextError};
use crate::{Line, PageBlock, PageRange};

/// Split every in-range page into lines and squish their whitespace.
///
/// Empty lines are kept so positions survive. Pages outside `range` are
/// dropped whole, headings included.
pub fn normalize_pages(pages: &[PageBlock], range: PageRange) -> Result<Vec<Line>> {
    if !range.is_valid() {
        return Err(TextError::InvalidPageRange { range });
    }

    let mut lines = Vec::new();
    let mut dropped = 0;

    for page in pages {
        if !range.contains(page.page_index) {
            dropped += 1;
            continue;
        }

        lines.extend(page.raw_text.split('\n').map(|fragment| Line {
            page_index: page.page_index,
            text: squish(fragment),
        }));
    }

    debug!(
        "Kept {} lines from range {}, dropped {} pages outside it",
        lines.len(),
        range,
        dropped
    );

    if lines.is_empty() {
        return Err(TextError::EmptyRange {
            range,
            page_count: pages.len(),
        });
    }

    Ok(lines)
}

/// Collapse interior whitespace runs to one space and trim both ends.
pub fn squish(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for word in text.split_whitespace() {
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(word);
    }

    result
}
