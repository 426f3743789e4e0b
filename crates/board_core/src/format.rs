//! Cosmetic formatting of backend script output into HTML.
//!
//! Mirrors a handful of regex replacements rather than parsing markdown:
//! nested emphasis, escaped asterisks and multi-paragraph lists are not handled.
//! Patterns keep JavaScript regex semantics (`.` stops at any line terminator,
//! `\d` is ASCII only).

use std::sync::LazyLock;

use regex::Regex;

static BOLD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*([^\n\r\x{2028}\x{2029}]*?)\*\*").expect("bold pattern is valid")
});

static ITEM_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\.\s").expect("item marker pattern is valid"));

static LIST_SPAN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(<li>[^\n\r\x{2028}\x{2029}]*</li>)").expect("list span pattern is valid")
});

/// Formats one chunk of script output for the output log.
pub fn format_output(text: &str) -> String {
    let text = text.replace('\n', "<br>");
    let text = BOLD_REGEX.replace_all(&text, "<strong>${1}</strong>");
    let text = convert_numbered_items(&text);
    LIST_SPAN_REGEX
        .replace_all(&text, "<ol>${1}</ol>")
        .into_owned()
}

/// Turns `N. text` into `<li>text</li>`, where the text runs lazily up to the
/// next `<digit>.` or the end of input.
fn convert_numbered_items(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut search_from = 0;

    while let Some(marker) = ITEM_MARKER_REGEX.find_at(text, search_from) {
        match item_end(text, marker.end()) {
            Some(end) => {
                out.push_str(&text[copied..marker.start()]);
                out.push_str("<li>");
                out.push_str(&text[marker.end()..end]);
                out.push_str("</li>");
                copied = end;
                search_from = end;
            }
            // Markers start with an ASCII digit, so one byte is one char.
            None => search_from = marker.start() + 1,
        }
    }

    out.push_str(&text[copied..]);
    out
}

fn item_end(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    for (offset, ch) in text[from..].char_indices() {
        let pos = from + offset;
        if bytes[pos].is_ascii_digit() && bytes.get(pos + 1) == Some(&b'.') {
            return Some(pos);
        }
        if is_line_terminator(ch) {
            return None;
        }
    }
    Some(text.len())
}

fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
