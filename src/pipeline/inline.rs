//! Escaping and inline Markdown rules.
//!
//! Each block kind applies its own subset of these passes, in a fixed order:
//!
//! | Block | Passes |
//! |-------|--------|
//! | table header cell | [`escape_attr`] |
//! | table body cell | [`escape_attr`], strip bold, italic → `<em>` |
//! | heading | strip bold, strip italic, [`escape_attr`] |
//! | list item, blockquote | [`escape_attr`] |
//! | paragraph | [`escape_text`], links, strip bold, italic → `<em>`, code |
//!
//! Escaping runs before any rule that inserts tags, so generated elements
//! survive while literal `<`/`>` from the document are neutralised.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

static RE_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());

static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

static RE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Escape `"`, `<` and `>`. Ampersands are left alone.
pub fn escape_attr(input: &str) -> String {
    input
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape `&`, `<`, `>` and `"`, ampersand first.
pub fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// `**bold**` → `bold`.
pub fn strip_bold(input: &str) -> String {
    RE_BOLD.replace_all(input, "${1}").into_owned()
}

/// `*italic*` → `italic`.
pub fn strip_italic(input: &str) -> String {
    RE_ITALIC.replace_all(input, "${1}").into_owned()
}

/// `*italic*` → `<em>italic</em>`.
pub fn italic_to_em(input: &str) -> String {
    RE_ITALIC.replace_all(input, "<em>${1}</em>").into_owned()
}

/// `[text](url)` → `<a href="url">text</a>`.
pub fn links_to_anchors(input: &str) -> String {
    RE_LINK
        .replace_all(input, "<a href=\"${2}\">${1}</a>")
        .into_owned()
}

/// `` `code` `` → `<code>code</code>`.
pub fn code_spans(input: &str) -> String {
    RE_CODE.replace_all(input, "<code>${1}</code>").into_owned()
}

/// Body text of a table data cell.
pub fn render_cell(input: &str) -> String {
    italic_to_em(&strip_bold(&escape_attr(input)))
}

/// Heading text: emphasis markers are dropped, not converted.
pub fn render_heading(input: &str) -> String {
    escape_attr(&strip_italic(&strip_bold(input)))
}

/// Paragraph text with the full set of inline rules.
pub fn render_paragraph(input: &str) -> String {
    let s = escape_text(input);
    let s = links_to_anchors(&s);
    let s = strip_bold(&s);
    let s = italic_to_em(&s);
    code_spans(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attr_keeps_ampersand() {
        assert_eq!(escape_attr(r#"a & "b" <c>"#), "a & &quot;b&quot; &lt;c&gt;");
    }

    #[test]
    fn test_escape_text_escapes_ampersand_once() {
        assert_eq!(escape_text("a & <b>"), "a &amp; &lt;b&gt;");
        assert_eq!(escape_text("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_strip_bold_is_non_greedy() {
        assert_eq!(strip_bold("**a** and **b**"), "a and b");
    }

    #[test]
    fn test_italic_to_em() {
        assert_eq!(italic_to_em("an *odd* word"), "an <em>odd</em> word");
    }

    #[test]
    fn test_heading_drops_emphasis() {
        assert_eq!(render_heading("Title **bold** and *em*"), "Title bold and em");
    }

    #[test]
    fn test_cell_keeps_emphasis() {
        assert_eq!(render_cell("**Total** is *approx* <5"), "Total is <em>approx</em> &lt;5");
    }

    #[test]
    fn test_paragraph_code_and_link() {
        assert_eq!(
            render_paragraph("Some `code` and [link](http://x)"),
            "Some <code>code</code> and <a href=\"http://x\">link</a>"
        );
    }

    #[test]
    fn test_paragraph_escapes_before_tagging() {
        assert_eq!(
            render_paragraph("1 < 2 & **sure**"),
            "1 &lt; 2 &amp; sure"
        );
    }

    #[test]
    fn test_link_href_is_escaped() {
        assert_eq!(
            render_paragraph("[q](http://x?a=1&b=2)"),
            "<a href=\"http://x?a=1&amp;b=2\">q</a>"
        );
    }
}
