//! Delimiter-based markup stripping.
//!
//! There is no HTML parser here. Script and style blocks are cut out by
//! literal delimiters, then everything between `<` and the following `>` is
//! dropped. Entities such as `&amp;` are left as they are.

const SCRIPT_OPEN: &str = "<script";
const SCRIPT_CLOSE: &str = "</script>";
const STYLE_OPEN: &str = "<style";
const STYLE_CLOSE: &str = "</style>";

/// Concatenate the lines of a raw body, dropping `\n` / `\r\n` terminators.
///
/// No separator is inserted, so a word split across a line break is glued
/// back together with its neighbour.
///
/// ```
/// assert_eq!(wordhunt_text::flatten_lines("<p>\r\nhi\nthere</p>\n"), "<p>hithere</p>");
/// ```
pub fn flatten_lines(raw: &str) -> String {
    raw.lines().collect()
}

/// Remove every `start ... end` span from `document`.
///
/// The document is split on `end`; each segment keeps only what precedes its
/// first `start`. An unterminated `start` therefore swallows the rest of the
/// document, and a stray `end` only loses the delimiter itself.
pub fn remove_block(document: &str, start: &str, end: &str) -> String {
    let mut out = String::with_capacity(document.len());
    for segment in document.split(end) {
        let kept = segment
            .split_once(start)
            .map_or(segment, |(before, _)| before);
        out.push_str(kept);
    }
    out
}

/// Strip script blocks, style blocks and then every remaining tag.
///
/// ```
/// let text = wordhunt_text::strip_markup("<html><body>Hello, world! Hello.</body></html>");
/// assert_eq!(text, "  Hello, world! Hello.  ");
/// ```
pub fn strip_markup(document: &str) -> String {
    let without_scripts = remove_block(document, SCRIPT_OPEN, SCRIPT_CLOSE);
    let without_styles = remove_block(&without_scripts, STYLE_OPEN, STYLE_CLOSE);

    without_styles
        .split('>')
        .map(|fragment| fragment.split_once('<').map_or(fragment, |(text, _)| text))
        .collect::<Vec<_>>()
        .join(" ")
}
