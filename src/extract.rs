//! PDF text extraction.
//!
//! Only the embedded text layer is read. Scanned or image-only statements produce
//! an empty result, which callers treat as "not a digital statement".

use crate::error::{Result, StatementInsightsError};
use lopdf::Document;
use log::{debug, info};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    /// Non-empty page texts joined with `\n`, trimmed.
    pub text: String,
    pub page_count: usize,
    pub pages_with_text: usize,
}

impl ExtractedText {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

pub fn extract_text_from_path(path: &Path) -> Result<ExtractedText> {
    let mut document = Document::load(path)?;
    unlock(&mut document)?;
    extract_document_text(&document)
}

pub fn extract_text_from_bytes(bytes: &[u8]) -> Result<ExtractedText> {
    let mut document = Document::load_mem(bytes)?;
    unlock(&mut document)?;
    extract_document_text(&document)
}

/// Bank exports are often encrypted with an owner password only; those open
/// with the empty user password.
fn unlock(document: &mut Document) -> Result<()> {
    if !document.is_encrypted() {
        return Ok(());
    }

    document.decrypt("").map_err(|e| {
        debug!("Empty-password decryption failed: {}", e);
        StatementInsightsError::Pdf(
            "This PDF is password-protected; export an unlocked statement".to_string(),
        )
    })?;
    debug!("Decrypted PDF with the empty user password");
    Ok(())
}

fn extract_document_text(document: &Document) -> Result<ExtractedText> {

    let pages = document.get_pages();
    let page_count = pages.len();
    let mut segments: Vec<String> = Vec::with_capacity(page_count);

    // BTreeMap keys are page numbers, so this walks pages in order.
    for page_num in pages.keys() {
        match document.extract_text(&[*page_num]) {
            Ok(page_text) => {
                let trimmed = page_text.trim();
                if trimmed.is_empty() {
                    debug!("Page {} has no text layer, skipping", page_num);
                } else {
                    segments.push(trimmed.to_string());
                }
            }
            Err(e) => {
                debug!("Page {} text extraction failed, skipping: {}", page_num, e);
            }
        }
    }

    let pages_with_text = segments.len();
    info!(
        "Extracted text from {}/{} pages",
        pages_with_text, page_count
    );

    Ok(ExtractedText {
        text: segments.join("\n").trim().to_string(),
        page_count,
        pages_with_text,
    })
}
