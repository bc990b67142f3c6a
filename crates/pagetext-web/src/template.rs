use axum::response::Html;

use pagetext_core::stats::format_count;
use pagetext_core::{Extraction, PageRange};

use crate::state::StoredDocument;

const LAYOUT_HTML: &str = include_str!("../templates/layout.html");
const INDEX_HTML: &str = include_str!("../templates/index.html");
const DOCUMENT_HTML: &str = include_str!("../templates/document.html");
const SELECTION_HTML: &str = include_str!("../templates/selection.html");
const ERROR_HTML: &str = include_str!("../templates/error.html");

/// Render the upload page.
pub fn render_index() -> Html<String> {
    page(INDEX_HTML.to_string())
}

/// Render an error panel under the upload form.
pub fn render_error(message: &str) -> Html<String> {
    page(fill(ERROR_HTML, &[("message", escape(message))]))
}

/// Render a loaded document, optionally with a page-range selection open.
pub fn render_document(
    id: u64,
    doc: &StoredDocument,
    range: PageRange,
    selection: Option<&Extraction>,
) -> Html<String> {
    let id = id.to_string();
    let stats = &doc.stats;

    let selection_html = selection
        .map(|extraction| {
            fill(
                SELECTION_HTML,
                &[
                    ("selected_text", textarea_value(&extraction.text)),
                    ("id", id.clone()),
                    ("range_start", extraction.range.start.to_string()),
                    ("range_end", extraction.range.end.to_string()),
                ],
            )
        })
        .unwrap_or_default();

    let (text_checked, options_checked) = if selection.is_some() {
        ("", "checked")
    } else {
        ("checked", "")
    };

    page(fill(
        DOCUMENT_HTML,
        &[
            ("file_name", escape(&doc.file_name)),
            ("page_count", stats.page_count.to_string()),
            ("word_count", format_count(stats.word_count)),
            ("char_count", format_count(stats.char_count)),
            ("avg_words", stats.avg_words_per_page.to_string()),
            ("full_text", textarea_value(&doc.extraction.text)),
            ("id", id),
            ("range_start", range.start.to_string()),
            ("range_end", range.end.to_string()),
            ("text_checked", text_checked.to_string()),
            ("options_checked", options_checked.to_string()),
            ("selection", selection_html),
        ],
    ))
}

fn page(body: String) -> Html<String> {
    Html(fill(LAYOUT_HTML, &[("body", body)]))
}

/// Replace `{{ key }}` placeholders in one pass, so inserted values are never rescanned.
fn fill(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };

        let key = after[..close].trim();
        match values.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after[close + 2..];
    }

    out.push_str(rest);
    out
}

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Browsers drop one newline right after `<textarea>`; add it back so the
/// displayed text matches the buffer exactly.
fn textarea_value(text: &str) -> String {
    format!("\n{}", escape(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fill_replaces_known_keys() {
        let out = fill("a {{ x }} b {{y}} c", &[("x", "1".to_string()), ("y", "2".to_string())]);
        assert_eq!(out, "a 1 b 2 c");
    }

    #[test]
    fn test_fill_does_not_rescan_values() {
        let out = fill("{{ a }}{{ b }}", &[("a", "{{ b }}".to_string()), ("b", "B".to_string())]);
        assert_eq!(out, "{{ b }}B");
    }

    #[test]
    fn test_fill_keeps_unknown_placeholders() {
        assert_eq!(fill("x {{ nope }} y", &[]), "x {{ nope }} y");
        assert_eq!(fill("open {{ only", &[]), "open {{ only");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"Tom & Jerry's\"</b>"), "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_index_has_upload_form() {
        let Html(html) = render_index();
        assert!(html.contains("action=\"/upload\""));
        assert!(html.contains("How to use this app"));
        assert!(!html.contains("{{"));
    }
}
