//! Entry body rendering pipeline.
//!
//! # Responsibility
//! - Escape the raw body, then add keyword emphasis, inline code spans and
//!   paragraph structure, in that order.
//!
//! # Invariants
//! - Escaping runs first over the whole input; later passes only see
//!   escaped text and never reintroduce raw user content.
//! - Each pass operates on the previous pass's output. The passes are not
//!   fused because code-span matching relies on escaped input containing
//!   no literal `<`/`>`.
//! - Only line-leading keyword labels are emphasized, at most one per line.

use once_cell::sync::Lazy;
use regex::Regex;

/// Line-leading labels that receive `<strong>` emphasis (case-sensitive).
pub const KEYWORD_LABELS: &[&str] = &[
    "Action:",
    "Context:",
    "Resolution:",
    "Learning:",
    "Details:",
    "Issue:",
    "Observation:",
    "Cause:",
    "Decision:",
    "Alternative Considered:",
];

// `.` excludes `\n`, so a span never crosses a line.
static CODE_SPAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`(.+?)`").expect("valid code span regex"));
static PARAGRAPH_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\n+").expect("valid paragraph regex"));

/// Renders a raw entry body into an HTML fragment.
///
/// The caller must embed the result as-is: it is already escaped.
pub fn render_body(text: &str) -> String {
    let escaped = escape_html(text);
    let emphasized = emphasize_keywords(&escaped);
    let with_code = wrap_code_spans(&emphasized);
    paragraphize(&with_code)
}

/// Escapes `&`, `<`, `>`, `"` and `'` for HTML text and attribute contexts.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn emphasize_keywords(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            output.push('\n');
        }
        match leading_label(line) {
            Some(label) => {
                output.push_str("<strong>");
                output.push_str(label);
                output.push_str("</strong>");
                output.push_str(&line[label.len()..]);
            }
            None => output.push_str(line),
        }
    }
    output
}

fn leading_label(line: &str) -> Option<&'static str> {
    KEYWORD_LABELS
        .iter()
        .copied()
        .find(|label| line.starts_with(label))
}

fn wrap_code_spans(text: &str) -> String {
    CODE_SPAN_RE
        .replace_all(text, "<code>$1</code>")
        .into_owned()
}

fn paragraphize(text: &str) -> String {
    if text.trim().is_empty() {
        return "<p></p>".to_string();
    }

    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut paragraphs: Vec<&str> = PARAGRAPH_BREAK_RE.split(&normalized).collect();
    while paragraphs.last().is_some_and(|piece| piece.is_empty()) {
        paragraphs.pop();
    }

    paragraphs
        .into_iter()
        .map(|paragraph| format!("<p>{}</p>", insert_line_breaks(paragraph)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Adds `<br />` after every newline that sits between two other characters.
fn insert_line_breaks(paragraph: &str) -> String {
    let chars: Vec<char> = paragraph.chars().collect();
    let mut output = String::with_capacity(paragraph.len());
    for (index, &ch) in chars.iter().enumerate() {
        output.push(ch);
        if ch != '\n' || index == 0 {
            continue;
        }
        let prev = chars[index - 1];
        let next = chars.get(index + 1).copied();
        if prev != '\n' && next.is_some_and(|c| c != '\n') {
            output.push_str("<br />");
        }
    }
    output
}
