//! Text files offered for download.

use crate::text::Extraction;

/// MIME type of every download.
pub const TEXT_PLAIN: &str = "text/plain";

/// A text file held in memory, ready to be written or served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime: &'static str,
    pub content: String,
}

impl Download {
    /// The whole document: `{original_name}_extracted.txt`.
    pub fn full_text(original_name: &str, extraction: &Extraction) -> Self {
        Self {
            file_name: format!("{}_extracted.txt", original_name),
            mime: TEXT_PLAIN,
            content: extraction.text.clone(),
        }
    }

    /// A page range: `{original_name}_pages_{start}-{end}.txt`.
    pub fn page_range(original_name: &str, extraction: &Extraction) -> Self {
        Self {
            file_name: format!(
                "{}_pages_{}-{}.txt",
                original_name, extraction.range.start, extraction.range.end
            ),
            mime: TEXT_PLAIN,
            content: extraction.text.clone(),
        }
    }

    /// `Content-Disposition` value that asks the browser to save the file.
    pub fn content_disposition(&self) -> String {
        let safe: String = self
            .file_name
            .chars()
            .map(|c| match c {
                '"' | '\\' | '\r' | '\n' => '_',
                c => c,
            })
            .collect();
        format!("attachment; filename=\"{}\"", safe)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{extract_all, extract_range, PageRange};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_text_name_and_content() {
        let pages = ["one", "two"];
        let extraction = extract_all(&pages[..]).unwrap();
        let download = Download::full_text("report.pdf", &extraction);
        assert_eq!(download.file_name, "report.pdf_extracted.txt");
        assert_eq!(download.mime, "text/plain");
        assert_eq!(download.as_bytes(), extraction.text.as_bytes());
    }

    #[test]
    fn test_page_range_name() {
        let pages = ["one", "two", "three", "four"];
        let range = PageRange::new(2, 3, 4).unwrap();
        let extraction = extract_range(&pages[..], range).unwrap();
        let download = Download::page_range("report.pdf", &extraction);
        assert_eq!(download.file_name, "report.pdf_pages_2-3.txt");
        assert_eq!(download.content, extraction.text);
    }

    #[test]
    fn test_content_disposition_escapes_quotes() {
        let pages = ["x"];
        let extraction = extract_all(&pages[..]).unwrap();
        let download = Download::full_text("a\"b.pdf", &extraction);
        assert_eq!(
            download.content_disposition(),
            "attachment; filename=\"a_b.pdf_extracted.txt\""
        );
    }
}
