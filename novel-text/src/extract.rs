//! PDF text extraction, one block per page.

use log::{debug, info};
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::PageBlock;
use crate::error::{Result, TextError};

/// Read a PDF and return its text page by page, numbered from 1.
///
/// The file is read into memory in one go and released before the text is
/// decoded. Documents without any text layer are rejected rather than
/// producing empty pages.
pub fn extract_pages(path: &Path) -> Result<Vec<PageBlock>> {
    info!("Extracting text from PDF: {}", path.display());

    let bytes = fs::read(path).map_err(|e| TextError::Extraction {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let pages = pages_from_bytes(&bytes).map_err(|reason| TextError::Extraction {
        path: path.to_path_buf(),
        reason,
    })?;

    let blocks = number_pages(path, pages)?;
    info!("Extracted {} pages", blocks.len());
    Ok(blocks)
}

/// Turn decoded page texts into blocks numbered from 1.
///
/// Fails with `NoTextLayer` when no page carries any text.
fn number_pages(path: &Path, pages: Vec<String>) -> Result<Vec<PageBlock>> {
    if pages.iter().all(|p| p.trim().is_empty()) {
        return Err(TextError::NoTextLayer {
            path: path.to_path_buf(),
        });
    }

    let blocks: Vec<PageBlock> = pages
        .into_iter()
        .enumerate()
        .map(|(i, text)| PageBlock::new(i + 1, text))
        .collect();

    for block in blocks.iter().filter(|b| b.raw_text.trim().is_empty()) {
        debug!("Page {} has no text", block.page_index);
    }

    Ok(blocks)
}

/// Decode PDF bytes into per-page strings.
///
/// `pdf_extract` panics on some malformed documents instead of returning an
/// error, so the call runs inside `catch_unwind`.
fn pages_from_bytes(bytes: &[u8]) -> std::result::Result<Vec<String>, String> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));

    match result {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(format!("PDF extraction failed: {}", e)),
        Err(_) => Err("PDF extraction panicked (malformed or encrypted document)".to_string()),
    }
}
