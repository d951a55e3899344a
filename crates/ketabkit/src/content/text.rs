//! Line-ending normalization and tag stripping

use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

/// Normalize CRLF and lone CR line endings to LF
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Remove every `<...>` tag, keeping the text between tags
///
/// Adjacent text is concatenated as-is, so `Line 1<br/>Line 2` becomes
/// `Line 1Line 2`. Meant for trusted catalog markup; it is not a sanitizer.
pub fn strip_markup_tags(markup: &str) -> String {
    TAG.replace_all(markup, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_crlf() {
        assert_eq!(normalize_line_endings("line1\r\nline2"), "line1\nline2");
    }

    #[test]
    fn test_normalize_lone_cr() {
        assert_eq!(normalize_line_endings("line1\rline2"), "line1\nline2");
    }

    #[test]
    fn test_normalize_mixed() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\nd"), "a\nb\nc\nd");
        assert_eq!(normalize_line_endings("a\r\n\r\nb"), "a\n\nb");
    }

    #[test]
    fn test_normalize_leaves_lf_alone() {
        assert_eq!(normalize_line_endings("line1\nline2"), "line1\nline2");
        assert_eq!(normalize_line_endings("no line breaks"), "no line breaks");
        assert_eq!(normalize_line_endings(""), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        for input in ["a\r\n\rb", "\r\r\n\n", "بسم الله\r\nالرحمن الرحيم", ""] {
            let once = normalize_line_endings(input);
            assert_eq!(normalize_line_endings(&once), once);
        }
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(
            strip_markup_tags("<p>Hello <strong>world</strong></p>"),
            "Hello world"
        );
        assert_eq!(strip_markup_tags(""), "");
        assert_eq!(strip_markup_tags("plain text"), "plain text");
    }

    #[test]
    fn test_strip_tags_concatenates() {
        assert_eq!(strip_markup_tags("Line 1<br/>Line 2"), "Line 1Line 2");
        assert_eq!(strip_markup_tags("<h1>Title</h1><p>Paragraph</p>"), "TitleParagraph");
        assert_eq!(
            strip_markup_tags("Content<span id=\"link-123\"></span>More"),
            "ContentMore"
        );
    }

    #[test]
    fn test_strip_tags_with_attributes() {
        assert_eq!(strip_markup_tags("<div class=\"test\">Content</div>"), "Content");
        assert_eq!(strip_markup_tags("<a href=\"test\">Link</a>"), "Link");
        assert_eq!(strip_markup_tags("<p>بسم الله</p>"), "بسم الله");
    }
}
