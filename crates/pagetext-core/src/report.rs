//! Serializable summary of one extraction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pdf::TextEngine;
use crate::stats::DocumentStats;
use crate::text::{Extraction, PageRange, PageText};

/// Everything known about an extracted document, for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Name of the uploaded or input file.
    pub file_name: String,

    /// Engine that recovered the text.
    pub engine: TextEngine,

    /// When the extraction ran.
    pub extracted_at: DateTime<Utc>,

    /// Pages covered by `pages`.
    pub range: PageRange,

    /// Statistics over the full buffer.
    pub stats: DocumentStats,

    /// Text per page.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub pages: Vec<PageText>,
}

impl ExtractionReport {
    pub fn new(
        file_name: impl Into<String>,
        engine: TextEngine,
        extraction: &Extraction,
        stats: DocumentStats,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            engine,
            extracted_at: Utc::now(),
            range: extraction.range,
            stats,
            pages: extraction.pages(),
        }
    }

    /// Drop per-page text, keeping only the statistics.
    pub fn without_pages(mut self) -> Self {
        self.pages.clear();
        self
    }
}
