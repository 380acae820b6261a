//! Course text extraction.
//!
//! Pages are read one at a time with `lopdf`; a page that cannot be decoded
//! contributes an empty segment. When no page yields any text the whole
//! document is handed to `pdf-extract`, which copes with more font encodings.

use std::fmt::Display;

use lopdf::Document;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not read PDF: {message}")]
    Unreadable { message: String },
}

/// Turns a document into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, data: &[u8]) -> Result<String, ExtractError>;
}

/// Extracts the text layer of a PDF, one newline-separated segment per page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, data: &[u8]) -> Result<String, ExtractError> {
        let doc = Document::load_mem(data).map_err(|e| ExtractError::Unreadable {
            message: e.to_string(),
        })?;

        let pages = doc
            .get_pages()
            .into_keys()
            .map(|number| (number, doc.extract_text(&[number])));
        let text = join_pages(pages);

        if !text.trim().is_empty() {
            return Ok(text);
        }

        match pdf_extract::extract_text_from_mem(data) {
            Ok(fallback) => {
                tracing::debug!(chars = fallback.len(), "used whole-document extraction");
                Ok(fallback
                    .split('\x0C')
                    .map(str::trim_end)
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            Err(e) => {
                tracing::warn!(error = %e, "whole-document extraction failed");
                Ok(text)
            }
        }
    }
}

/// Join per-page results in page order. Failed pages become empty segments.
fn join_pages<E: Display>(pages: impl IntoIterator<Item = (u32, Result<String, E>)>) -> String {
    let mut failed = 0usize;
    let segments: Vec<String> = pages
        .into_iter()
        .map(|(number, result)| match result {
            Ok(text) => text.trim_end().to_string(),
            Err(e) => {
                tracing::warn!(page = number, error = %e, "skipping unreadable page");
                failed += 1;
                String::new()
            }
        })
        .collect();

    tracing::debug!(pages = segments.len(), failed, "extracted PDF text");
    segments.join("\n")
}
