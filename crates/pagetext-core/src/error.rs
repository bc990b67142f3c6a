//! Error types for the pagetext-core library.

use thiserror::Error;

/// Main error type for the pagetext library.
#[derive(Error, Debug)]
pub enum PagetextError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Requested page range does not fit the document.
    #[error("invalid page range {start}-{end} for a document with {page_count} pages")]
    InvalidRange {
        start: u32,
        end: u32,
        page_count: u32,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Result type for the pagetext library.
pub type Result<T> = std::result::Result<T, PagetextError>;
