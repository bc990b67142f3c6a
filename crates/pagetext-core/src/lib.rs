//! Core library for PDF text extraction.
//!
//! This crate provides:
//! - An opened-document handle over lopdf, with pdf-extract as an alternative engine
//! - Extraction passes over all pages or a page range, separated by page markers
//! - Word, character, and per-page statistics
//! - Named text downloads and JSON reports

pub mod download;
pub mod error;
pub mod models;
pub mod pdf;
pub mod report;
pub mod stats;
pub mod text;

pub use download::Download;
pub use error::{PagetextError, PdfError, Result};
pub use models::config::PagetextConfig;
pub use pdf::{PageSource, PdfDocument, TextEngine};
pub use report::ExtractionReport;
pub use stats::{format_count, DocumentStats};
pub use text::{extract_all, extract_range, page_marker, Extraction, PageRange, PageText};
