//! PDF document handle backed by lopdf, with pdf-extract as an alternative text engine.

use std::cell::OnceCell;

use lopdf::Document;
use tracing::{debug, trace};

use super::{PageSource, Result, TextEngine};
use crate::error::PdfError;

/// An opened PDF.
///
/// Owns the parsed document for the duration of one extraction and is released
/// by [`PdfDocument::close`] or by dropping it.
pub struct PdfDocument {
    document: Document,
    raw_data: Vec<u8>,
    engine: TextEngine,
    page_count: u32,
    /// Pages from pdf-extract, filled on first use.
    extracted_pages: OnceCell<Vec<String>>,
}

impl PdfDocument {
    /// Parse a PDF from memory.
    pub fn load(data: &[u8], engine: TextEngine) -> Result<Self> {
        let mut document = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let raw_data = if document.is_encrypted() {
            if document.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads bytes, so hand it the decrypted document
            let mut decrypted = Vec::new();
            document
                .save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = document.get_pages().len() as u32;
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages using {} engine", page_count, engine);
        Ok(Self {
            document,
            raw_data,
            engine,
            page_count,
            extracted_pages: OnceCell::new(),
        })
    }

    /// Text engine this document was opened with.
    pub fn engine(&self) -> TextEngine {
        self.engine
    }

    /// Release the document.
    pub fn close(self) {
        debug!("Closing PDF ({} pages)", self.page_count);
    }

    fn lopdf_page_text(&self, page: u32) -> Result<String> {
        self.document
            .extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    fn pdf_extract_page_text(&self, page: u32) -> Result<String> {
        if self.extracted_pages.get().is_none() {
            let pages = pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
                .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
            debug!("pdf-extract returned {} pages", pages.len());
            let _ = self.extracted_pages.set(pages);
        }

        let pages = self.extracted_pages.get().map(Vec::as_slice).unwrap_or_default();
        nth_page(pages, page, self.page_count)
    }
}

/// Text of 1-indexed `page` from a per-page list that should hold `expected` pages.
fn nth_page(pages: &[String], page: u32, expected: u32) -> Result<String> {
    page.checked_sub(1)
        .and_then(|idx| pages.get(idx as usize))
        .cloned()
        .ok_or_else(|| {
            PdfError::TextExtraction(format!(
                "pdf-extract returned {} pages, expected {}",
                pages.len(),
                expected
            ))
        })
}

impl PageSource for PdfDocument {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn page_text(&self, page: u32) -> Result<String> {
        if page == 0 || page > self.page_count {
            return Err(PdfError::InvalidPage(page));
        }

        let text = match self.engine {
            TextEngine::Lopdf => self.lopdf_page_text(page)?,
            TextEngine::PdfExtract => self.pdf_extract_page_text(page)?,
        };
        trace!("Page {}: {} chars", page, text.len());
        Ok(text)
    }
}
