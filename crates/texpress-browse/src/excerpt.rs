//! Source code excerpts for HTML display.

use std::fmt::Write;

/// Lines shown before and after a highlighted line by default.
pub const DEFAULT_CONTEXT_LINES: usize = 4;

/// Escape text for HTML element content and attribute values.
///
/// Escapes `&`, `<`, `>`, `"` and `'`.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Format source code as HTML lines.
///
/// The code is escaped, split on `\n` or `\r\n`, and each line optionally
/// gets a `<span data-num="N"></span>` marker (1-based). A trailing empty
/// line is left unnumbered.
///
/// With `highlight_line > 0`, only the lines within `context_lines` of it are
/// returned (the highlighted line is clamped to the last line), and the
/// highlighted line is wrapped in `<mark>`.
///
/// # Examples
///
/// ```
/// use texpress_browse::format_code_block;
///
/// let lines = format_code_block("a\nb\nc", true, 2, 0);
/// assert_eq!(lines, [r#"<span data-num="2"></span><mark>b</mark>"#]);
/// ```
pub fn format_code_block(
    code: &str,
    with_line_numbers: bool,
    highlight_line: usize,
    context_lines: usize,
) -> Vec<String> {
    let escaped = escape_html(code);
    let lines: Vec<&str> = escaped
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let total = lines.len();
    let (first, last, highlight) = if highlight_line > 0 {
        let highlight = highlight_line.min(total);
        (
            highlight.saturating_sub(context_lines).max(1),
            (highlight + context_lines).min(total),
            Some(highlight),
        )
    } else {
        (1, total, None)
    };

    lines
        .iter()
        .enumerate()
        .map(|(index, text)| (index + 1, *text))
        .skip(first - 1)
        .take(last + 1 - first)
        .map(|(number, text)| {
            let mut line = String::new();
            if with_line_numbers && (number < last || !text.is_empty()) {
                let _ = write!(line, "<span data-num=\"{number}\"></span>");
            }
            if Some(number) == highlight {
                let _ = write!(line, "<mark>{text}</mark>");
            } else {
                line.push_str(text);
            }
            line
        })
        .collect()
}
