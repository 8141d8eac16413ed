//! Document Text Extractor: pulls visible text out of an uploaded PDF.
//!
//! Pages are read in order with `lopdf` and joined with a line break. When
//! `lopdf` cannot decode the file or finds no text in it (common with CID
//! fonts), `pdf-extract` gets one attempt at the whole payload. Failures never escape: callers always receive text, either real
//! content or one of the sentinels below.

use lopdf::Document;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::resume::ResumeDocument;

pub const EMPTY_INPUT_SENTINEL: &str = "[empty document: no content was uploaded]";
pub const UNREADABLE_SENTINEL: &str = "[unreadable document: the file is not a valid PDF]";
pub const NO_TEXT_SENTINEL: &str = "[no text found: the document contains no extractable text]";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("document payload is empty")]
    EmptyInput,

    #[error("document could not be read: {0}")]
    Unreadable(String),

    #[error("document contains no extractable text")]
    NoText,
}

impl ExtractError {
    pub fn sentinel(&self) -> &'static str {
        match self {
            ExtractError::EmptyInput => EMPTY_INPUT_SENTINEL,
            ExtractError::Unreadable(_) => UNREADABLE_SENTINEL,
            ExtractError::NoText => NO_TEXT_SENTINEL,
        }
    }
}

/// Extracts text, substituting a sentinel on failure. Never returns empty text.
pub fn extract_text(payload: &[u8]) -> ResumeDocument {
    let source_text = match try_extract_text(payload) {
        Ok(text) => text,
        Err(e) => {
            warn!("Document extraction failed: {e}");
            e.sentinel().to_string()
        }
    };
    ResumeDocument { source_text }
}

/// Typed variant of `extract_text` for callers that need the failure kind.
pub fn try_extract_text(payload: &[u8]) -> Result<String, ExtractError> {
    extract_with_fallback(payload, fallback_extract)
}

/// `lopdf` first; `fallback` runs when `lopdf` fails or finds no text.
/// `Unreadable` only when both decoders reject the file.
fn extract_with_fallback<F>(payload: &[u8], fallback: F) -> Result<String, ExtractError>
where
    F: FnOnce(&[u8]) -> Result<String, String>,
{
    if payload.iter().all(u8::is_ascii_whitespace) {
        return Err(ExtractError::EmptyInput);
    }

    let primary = match extract_pages(payload) {
        Ok(text) if !text.is_empty() => return Ok(text),
        Ok(_) => {
            debug!("lopdf found no text, trying pdf-extract");
            None
        }
        Err(e) => {
            debug!("lopdf extraction failed ({e}), trying pdf-extract");
            Some(e)
        }
    };

    match (fallback(payload), primary) {
        (Ok(text), _) => {
            let text = text.trim();
            if text.is_empty() {
                Err(ExtractError::NoText)
            } else {
                Ok(text.to_string())
            }
        }
        (Err(fallback), None) => {
            debug!("pdf-extract failed on a document lopdf could load: {fallback}");
            Err(ExtractError::NoText)
        }
        (Err(fallback), Some(primary)) => Err(ExtractError::Unreadable(format!(
            "lopdf: {primary}; pdf-extract: {fallback}"
        ))),
    }
}

fn fallback_extract(payload: &[u8]) -> Result<String, String> {
    // pdf-extract can panic on malformed input.
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(payload)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("pdf-extract panicked".to_string()),
    }
}

/// Page-ordered text, blank pages skipped, pages joined with `\n`.
fn extract_pages(payload: &[u8]) -> Result<String, lopdf::Error> {
    let doc = Document::load_mem(payload)?;
    let mut pages = Vec::new();

    // get_pages() is a BTreeMap keyed by page number, so iteration is in page order.
    for page_number in doc.get_pages().keys() {
        let page_text = doc.extract_text(&[*page_number])?;
        let page_text = page_text.trim();
        if !page_text.is_empty() {
            pages.push(page_text.to_string());
        }
    }

    Ok(pages.join("\n"))
}
