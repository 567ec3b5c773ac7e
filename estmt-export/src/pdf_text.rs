//! Page text sources for the statement scanner.
//!
//! `pdf-extract` renders the whole document as one string with a form feed
//! between pages. Pre-extracted `.txt` dumps use the same convention.

use anyhow::{Context, Result, anyhow, bail};
use std::fs;
use std::path::Path;
use tracing::debug;

const PAGE_BREAK: char = '\u{000C}';

fn split_pages(text: &str) -> Vec<String> {
    text.split(PAGE_BREAK)
        .filter(|p| !p.trim().is_empty())
        .map(|p| p.to_string())
        .collect()
}

/// Extract per-page text from a statement PDF.
pub fn extract_pdf_pages(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = pdf_extract::extract_text(path)
        .map_err(|e| anyhow!("extracting text from {}: {e}", path.display()))?;

    let pages = split_pages(&text);
    if pages.is_empty() {
        bail!("no text found in {} (scanned image?)", path.display());
    }
    debug!(path = %path.display(), pages = pages.len(), "extracted pdf text");
    Ok(pages)
}

/// Read pre-extracted statement text, pages separated by form feeds.
pub fn read_text_pages(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(split_pages(&text))
}

/// Load pages from a PDF or, for any other extension, a text dump.
pub fn load_pages(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    if is_pdf(path) {
        extract_pdf_pages(path)
    } else {
        read_text_pages(path)
    }
}

pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}
