//! PDF document handling.

mod document;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixture;

pub use document::PdfDocument;

use serde::{Deserialize, Serialize};

use crate::error::PdfError;

/// Library used to recover text from page content streams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEngine {
    /// `lopdf::Document::extract_text`, one page at a time.
    #[default]
    Lopdf,
    /// `pdf_extract`, whole document split by pages.
    PdfExtract,
}

impl std::fmt::Display for TextEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextEngine::Lopdf => write!(f, "lopdf"),
            TextEngine::PdfExtract => write!(f, "pdfextract"),
        }
    }
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Anything that can hand out text one page at a time.
///
/// Pages are 1-indexed.
pub trait PageSource {
    /// Number of pages.
    fn page_count(&self) -> u32;

    /// Text of a single page.
    fn page_text(&self, page: u32) -> Result<String>;
}

impl<T: AsRef<str>> PageSource for [T] {
    fn page_count(&self) -> u32 {
        self.len() as u32
    }

    fn page_text(&self, page: u32) -> Result<String> {
        page.checked_sub(1)
            .and_then(|idx| self.get(idx as usize))
            .map(|text| text.as_ref().to_string())
            .ok_or(PdfError::InvalidPage(page))
    }
}
