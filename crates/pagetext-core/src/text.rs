//! Extraction passes: page markers, page ranges, and the accumulated text buffer.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PagetextError, Result};
use crate::pdf::PageSource;

/// Number of pages selected by default for range extraction.
pub const DEFAULT_RANGE_SPAN: u32 = 3;

/// Separator placed before each page's text.
pub fn page_marker(page: u32) -> String {
    format!("\n--- Page {} ---\n", page)
}

/// Inclusive, 1-indexed range of pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    /// Validate `start..=end` against a document of `page_count` pages.
    pub fn new(start: u32, end: u32, page_count: u32) -> Result<Self> {
        if start == 0 || start > end || end > page_count {
            return Err(PagetextError::InvalidRange {
                start,
                end,
                page_count,
            });
        }
        Ok(Self { start, end })
    }

    /// Every page of the document.
    pub fn full(page_count: u32) -> Self {
        Self {
            start: 1,
            end: page_count,
        }
    }

    /// The first `span` pages, clamped to the document.
    pub fn default_selection(page_count: u32, span: u32) -> Self {
        Self {
            start: 1,
            end: span.max(1).min(page_count),
        }
    }

    /// Fill in missing bounds, then validate.
    ///
    /// A missing start is page 1. A missing end covers `span` pages from the
    /// start, capped at the last page.
    pub fn resolve(start: Option<u32>, end: Option<u32>, page_count: u32, span: u32) -> Result<Self> {
        let start = start.unwrap_or(1);
        let end = end.unwrap_or_else(|| start.saturating_add(span.max(1) - 1).min(page_count));
        Self::new(start, end, page_count)
    }

    /// Number of pages covered, 0 for an inverted range.
    pub fn len(&self) -> u32 {
        self.end.saturating_add(1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn pages(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Text of one page, as split back out of an extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub number: u32,
    pub text: String,
}

/// One accumulated text buffer: `page_marker(k) + page_text(k)` for each page in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub range: PageRange,
    pub text: String,
}

impl Extraction {
    /// Split the buffer back into per-page text.
    pub fn pages(&self) -> Vec<PageText> {
        let mut pages = Vec::with_capacity(self.range.len() as usize);
        let mut rest = self.text.as_str();

        for number in self.range.pages() {
            let marker = page_marker(number);
            let Some(body) = rest.strip_prefix(marker.as_str()) else {
                break;
            };
            let next_marker = page_marker(number + 1);
            let end = if number < self.range.end {
                body.find(next_marker.as_str()).unwrap_or(body.len())
            } else {
                body.len()
            };
            pages.push(PageText {
                number,
                text: body[..end].to_string(),
            });
            rest = &body[end..];
        }

        pages
    }
}

/// Extract every page.
pub fn extract_all<S: PageSource + ?Sized>(source: &S) -> Result<Extraction> {
    extract_range(source, PageRange::full(source.page_count()))
}

/// Extract `range`, which must fit within the source.
pub fn extract_range<S: PageSource + ?Sized>(source: &S, range: PageRange) -> Result<Extraction> {
    extract_range_with(source, range, |_| {})
}

/// Like [`extract_range`], calling `on_page` after each page is appended.
pub fn extract_range_with<S, F>(source: &S, range: PageRange, mut on_page: F) -> Result<Extraction>
where
    S: PageSource + ?Sized,
    F: FnMut(u32),
{
    let range = PageRange::new(range.start, range.end, source.page_count())?;

    let mut text = String::new();
    for page in range.pages() {
        text.push_str(&page_marker(page));
        text.push_str(&source.page_text(page)?);
        on_page(page);
    }

    debug!("Extracted pages {}: {} bytes", range, text.len());
    Ok(Extraction { range, text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGES: [&str; 5] = [
        "Intro text here\n",
        "Second page body\n",
        "Third\n",
        "",
        "Last page words\n",
    ];

    #[test]
    fn test_page_marker_literal() {
        assert_eq!(page_marker(7), "\n--- Page 7 ---\n");
    }

    #[test]
    fn test_extract_all_has_one_marker_per_page() {
        let extraction = extract_all(&PAGES[..]).unwrap();
        assert_eq!(extraction.range, PageRange::full(5));
        for k in 1..=5 {
            let marker = format!("--- Page {} ---", k);
            assert_eq!(extraction.text.matches(&marker).count(), 1, "marker {}", k);
        }
        assert_eq!(extraction.text.matches("--- Page ").count(), 5);
        assert!(extraction.text.starts_with("\n--- Page 1 ---\nIntro text here\n"));
    }

    #[test]
    fn test_markers_in_order() {
        let extraction = extract_all(&PAGES[..]).unwrap();
        let positions: Vec<usize> = (1..=5)
            .map(|k| extraction.text.find(&page_marker(k)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_range_is_substring_of_full() {
        let full = extract_all(&PAGES[..]).unwrap();
        for start in 1..=5 {
            for end in start..=5 {
                let range = PageRange::new(start, end, 5).unwrap();
                let partial = extract_range(&PAGES[..], range).unwrap();

                let from = full.text.find(&page_marker(start)).unwrap();
                let to = if end == 5 {
                    full.text.len()
                } else {
                    full.text.find(&page_marker(end + 1)).unwrap()
                };
                assert_eq!(partial.text, &full.text[from..to], "range {}", range);
            }
        }
    }

    #[test]
    fn test_range_validation() {
        assert!(PageRange::new(1, 5, 5).is_ok());
        assert!(matches!(
            PageRange::new(0, 2, 5),
            Err(PagetextError::InvalidRange { start: 0, .. })
        ));
        assert!(PageRange::new(3, 2, 5).is_err());
        assert!(PageRange::new(2, 6, 5).is_err());
    }

    #[test]
    fn test_extract_range_rejects_out_of_bounds() {
        let range = PageRange { start: 4, end: 9 };
        assert!(extract_range(&PAGES[..], range).is_err());
    }

    #[test]
    fn test_default_selection() {
        assert_eq!(PageRange::default_selection(10, DEFAULT_RANGE_SPAN), PageRange { start: 1, end: 3 });
        assert_eq!(PageRange::default_selection(2, DEFAULT_RANGE_SPAN), PageRange { start: 1, end: 2 });
        assert_eq!(PageRange::default_selection(1, DEFAULT_RANGE_SPAN), PageRange { start: 1, end: 1 });
        assert_eq!(PageRange::default_selection(5, 0), PageRange { start: 1, end: 1 });
    }

    #[test]
    fn test_resolve_fills_missing_bounds() {
        assert_eq!(PageRange::resolve(None, None, 10, 3).unwrap(), PageRange { start: 1, end: 3 });
        assert_eq!(PageRange::resolve(Some(4), None, 10, 3).unwrap(), PageRange { start: 4, end: 6 });
        assert_eq!(PageRange::resolve(Some(9), None, 10, 3).unwrap(), PageRange { start: 9, end: 10 });
        assert_eq!(PageRange::resolve(None, Some(2), 10, 3).unwrap(), PageRange { start: 1, end: 2 });
        assert!(PageRange::resolve(Some(11), None, 10, 3).is_err());
    }

    #[test]
    fn test_range_display_and_len() {
        let range = PageRange::new(2, 4, 5).unwrap();
        assert_eq!(range.to_string(), "2-4");
        assert_eq!(range.len(), 3);
        assert!(!range.is_empty());
    }

    #[test]
    fn test_inverted_range_is_empty() {
        // Fields are public, so an unvalidated range can still be built
        let range = PageRange { start: 5, end: 2 };
        assert_eq!(range.len(), 0);
        assert!(range.is_empty());
        assert_eq!(range.pages().count(), 0);

        let single = PageRange { start: 3, end: 3 };
        assert_eq!(single.len(), 1);
        assert!(!single.is_empty());
    }

    #[test]
    fn test_split_pages_back_out() {
        let extraction = extract_range(&PAGES[..], PageRange::new(2, 4, 5).unwrap()).unwrap();
        let pages = extraction.pages();
        assert_eq!(
            pages,
            vec![
                PageText { number: 2, text: "Second page body\n".to_string() },
                PageText { number: 3, text: "Third\n".to_string() },
                PageText { number: 4, text: String::new() },
            ]
        );
    }

    #[test]
    fn test_progress_callback_sees_each_page() {
        let mut seen = Vec::new();
        extract_range_with(&PAGES[..], PageRange::full(5), |page| seen.push(page)).unwrap();
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_extract_real_pdf() {
        use crate::pdf::fixture::build_pdf;
        use crate::pdf::{PdfDocument, TextEngine};

        let data = build_pdf(&["First words", "Middle", "Final words"]);
        let doc = PdfDocument::load(&data, TextEngine::Lopdf).unwrap();
        let full = extract_all(&doc).unwrap();
        assert_eq!(full.text.matches("--- Page ").count(), 3);
        assert!(full.text.contains("First words"));

        let tail = extract_range(&doc, PageRange::new(2, 3, 3).unwrap()).unwrap();
        assert!(full.text.ends_with(&tail.text));
        assert!(!tail.text.contains("First words"));
    }
}
