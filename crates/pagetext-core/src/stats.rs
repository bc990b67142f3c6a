//! Document statistics computed over an extraction buffer.

use serde::{Deserialize, Serialize};

/// Word and character totals for an extracted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    pub page_count: u32,
    /// Whitespace-delimited tokens.
    pub word_count: usize,
    /// Unicode scalar values, page markers included.
    pub char_count: usize,
    /// `word_count / page_count`, rounded down.
    pub avg_words_per_page: usize,
}

impl DocumentStats {
    pub fn compute(text: &str, page_count: u32) -> Self {
        let word_count = text.split_whitespace().count();
        let char_count = text.chars().count();
        let avg_words_per_page = word_count.checked_div(page_count as usize).unwrap_or(0);

        Self {
            page_count,
            word_count,
            char_count,
            avg_words_per_page,
        }
    }
}

/// Render a count with `,` between groups of three digits.
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
