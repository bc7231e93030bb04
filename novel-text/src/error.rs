use std::path::PathBuf;

use thiserror::Error;

use crate::PageRange;

#[derive(Error, Debug)]
pub enum TextError {
    #[error("Failed to extract text from {}: {reason}", path.display())]
    Extraction { path: PathBuf, reason: String },

    #[error(
        "No extractable text in {}. Image-only (scanned) PDFs are not supported; run OCR first.",
        path.display()
    )]
    NoTextLayer { path: PathBuf },

    #[error("Invalid page range {range}: pages are numbered from 1 and first must not exceed last")]
    InvalidPageRange { range: PageRange },

    #[error("Page range {range} yields no lines (document has {page_count} pages)")]
    EmptyRange { range: PageRange, page_count: usize },

    #[error("Failed to load lookup table {}: {reason}", path.display())]
    TableLoad { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, TextError>;

/// A chapter heading whose designator could not be turned into a chapter number.
///
/// Never fatal: the tagger drops the offending line and carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChapterParseError {
    #[error("heading has no chapter designator")]
    MissingDesignator,

    #[error("unsupported chapter designator {0:?}")]
    InvalidDesignator(String),

    #[error("chapter numbers start at 1, found 0")]
    ZeroChapter,

    #[error("chapter {found} appears after chapter {current}")]
    OutOfOrder { found: u32, current: u32 },
}
