//! Page markup to Markdown conversion

use super::header::is_header_block;
use super::text::{normalize_line_endings, strip_markup_tags};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `<p ...>inner</p>`, non-greedy, may span lines
static PARAGRAPH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<p[^>]*>(.*?)</p>").expect("Invalid paragraph regex"));

static EXCESSIVE_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("Invalid newline regex"));

/// Convert catalog page markup to Markdown
///
/// - paragraphs with header content become `## heading`
/// - other paragraphs become text followed by a blank line
/// - inline spans, anchors and every other tag are stripped
pub fn markup_to_markdown(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }

    let blocks = PARAGRAPH.replace_all(markup, |caps: &Captures| {
        let text = strip_markup_tags(&caps[1]);
        let text = text.trim();

        if text.is_empty() {
            String::new()
        } else if is_header_block(text) {
            format!("## {}\n\n", text)
        } else {
            format!("{}\n\n", text)
        }
    });

    // Content outside recognized paragraphs
    let stripped = strip_markup_tags(&blocks);

    let normalized = normalize_line_endings(&stripped);
    EXCESSIVE_NEWLINES
        .replace_all(&normalized, "\n\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        let html = r#"<p class="g-paragraph">First paragraph</p><p class="g-paragraph">Second paragraph</p>"#;
        assert_eq!(markup_to_markdown(html), "First paragraph\n\nSecond paragraph");
    }

    #[test]
    fn test_header_paragraph() {
        let html = r#"<p class="g-paragraph" id="p-1">(قَوْلُهُ بَابُ الصلاة)</p>"#;
        assert_eq!(markup_to_markdown(html), "## (قَوْلُهُ بَابُ الصلاة)");
    }

    #[test]
    fn test_header_mixed_with_text() {
        let html = r#"<p class="g-paragraph" id="p-1">(باب الصلاة)</p><p class="g-paragraph" id="p-2">حَدَّثَنَا أَبُو بَكْرٍ</p>"#;
        assert_eq!(
            markup_to_markdown(html),
            "## (باب الصلاة)\n\nحَدَّثَنَا أَبُو بَكْرٍ"
        );
    }

    #[test]
    fn test_inline_spans_stripped() {
        let html = r#"<p>Text with <span class="g-holy-word">الله</span> inside</p>"#;
        assert_eq!(markup_to_markdown(html), "Text with الله inside");

        let html = r#"<p class="g-paragraph">Text with <span class="g-square-brackets">[١٢٢٦]</span> reference</p>"#;
        assert_eq!(markup_to_markdown(html), "Text with [١٢٢٦] reference");
    }

    #[test]
    fn test_anchor_stripped() {
        let html = r#"<p>Visit <a href="https://example.com">example</a> site</p>"#;
        assert_eq!(markup_to_markdown(html), "Visit example site");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(markup_to_markdown(""), "");
    }

    #[test]
    fn test_empty_paragraphs_dropped() {
        let html = "<p>One</p><p>  </p><p><span></span></p><p>Two</p>";
        assert_eq!(markup_to_markdown(html), "One\n\nTwo");
    }

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(
            markup_to_markdown("Plain text without any tags"),
            "Plain text without any tags"
        );
    }

    #[test]
    fn test_self_closing_and_uppercase_tags() {
        assert_eq!(markup_to_markdown("<p>Text<br/>More text</p>"), "TextMore text");
        assert_eq!(markup_to_markdown("<P>Uppercase tags</P>"), "Uppercase tags");
    }

    #[test]
    fn test_quranic_brackets_kept() {
        let html = "<p>﴿فَمَنْ يَعْمَلْ مِثْقَالَ ذَرَّةٍ خَيْرًا يَرَهُ﴾</p>";
        assert_eq!(
            markup_to_markdown(html),
            "﴿فَمَنْ يَعْمَلْ مِثْقَالَ ذَرَّةٍ خَيْرًا يَرَهُ﴾"
        );
    }

    #[test]
    fn test_line_endings_and_newline_runs() {
        let html = "<div>Intro\r\n\r\n\r\n\r\nBody</div>";
        assert_eq!(markup_to_markdown(html), "Intro\n\nBody");
    }

    #[test]
    fn test_multiline_paragraph() {
        let html = "<p>first line\nsecond line</p>\n<p>next</p>";
        assert_eq!(markup_to_markdown(html), "first line\nsecond line\n\nnext");
    }

    #[test]
    fn test_output_has_no_tags() {
        let inputs = [
            r#"<p class="g-paragraph g-rtl" id="p-1">مُقَدّمَة</p><p class="g-paragraph g-rtl" id="p-2">قَالَ <span class="g-holy-word">تَعَالَى</span> فِي عشرَة فُصُول</p>"#,
            "<div><p>nested <b>bold</b></p></div><hr/>",
            "<p>unclosed <span>paragraph",
        ];
        for input in inputs {
            let md = strip_markup_tags(&markup_to_markdown(input));
            assert!(!md.contains('<') && !md.contains('>'), "tags left in {:?}", md);
        }
    }
}
