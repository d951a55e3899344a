//! Footnote handling for catalog pages
//!
//! A page keeps its footnotes below a `<div class="g-page-footer">` marker.
//! References in the body are `<a class="g-footnote-link">(١)</a>` anchors,
//! usually wrapped in a `<span class="g-parentheses">`. Each footnote in the
//! footer starts with a `<span id="foot-N" class="g-footnote-target">(N)</span>`
//! target, normally inside a `<span class="g-list">` wrapper.

use super::markdown::markup_to_markdown;
use super::text::strip_markup_tags;
use crate::types::Footnote;
use once_cell::sync::Lazy;
use regex::Regex;

/// Element separating the page body from its footnotes
pub const FOOTNOTE_SEPARATOR: &str = r#"<div class="g-page-footer">"#;

/// Separator placed between body and footnotes by default
pub const DEFAULT_FOOTNOTE_SEPARATOR: &str = "\n\n---\n\n";

static FOOTNOTE_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<a[^>]*class="g-footnote-link"[^>]*>(.*?)</a>"#)
        .expect("Invalid footnote link regex")
});

static FOOTNOTE_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)<span[^>]*class="g-parentheses"[^>]*>\s*<a[^>]*class="g-footnote-link"[^>]*>.*?</a>\s*</span>"#,
    )
    .expect("Invalid footnote reference regex")
});

static FOOTNOTE_TARGET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)<span[^>]*id="foot-([0-9]+)"[^>]*class="g-footnote-target"[^>]*>\([^)]*\)</span>"#,
    )
    .expect("Invalid footnote target regex")
});

/// Where the text of one footnote ends
static FOOTNOTE_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<span[^>]*class="g-(?:list|footnote-target)"|</div>"#)
        .expect("Invalid footnote boundary regex")
});

/// Options for [`page_markup_to_markdown_with_footnotes`]
#[derive(Debug, Clone)]
pub struct FootnoteOptions {
    /// Append extracted footnotes after the body
    pub include_footnotes: bool,
    /// Text placed between the body and the footnote list
    pub footnote_separator: String,
}

impl Default for FootnoteOptions {
    fn default() -> Self {
        Self {
            include_footnotes: true,
            footnote_separator: DEFAULT_FOOTNOTE_SEPARATOR.to_string(),
        }
    }
}

impl FootnoteOptions {
    /// Enable or disable the footnote section
    pub fn include_footnotes(mut self, include: bool) -> Self {
        self.include_footnotes = include;
        self
    }

    /// Set the body/footnotes separator
    pub fn footnote_separator(mut self, separator: impl Into<String>) -> Self {
        self.footnote_separator = separator.into();
        self
    }
}

/// Split page markup into `(body, footer)` at the first footer marker
///
/// The footer keeps the marker itself. Without a marker the whole input is
/// the body and the footer is empty.
pub fn split_footnotes(markup: &str) -> (&str, &str) {
    match markup.find(FOOTNOTE_SEPARATOR) {
        Some(index) => markup.split_at(index),
        None => (markup, ""),
    }
}

/// Check if page markup has a footnote section
pub fn has_footnotes(markup: &str) -> bool {
    markup.contains(FOOTNOTE_SEPARATOR)
}

/// Replace footnote link anchors with their inner text
///
/// `Text <a href="#foot-1" class="g-footnote-link">(١)</a> more` becomes
/// `Text (١) more`.
pub fn strip_footnote_links(markup: &str) -> String {
    FOOTNOTE_LINK.replace_all(markup, "$1").into_owned()
}

/// Remove footnote references entirely, numbers included
///
/// Only `g-parentheses` spans that wrap a footnote link are removed; the
/// whitespace around them stays where it was.
pub fn remove_footnote_references(markup: &str) -> String {
    FOOTNOTE_REFERENCE.replace_all(markup, "").into_owned()
}

/// Extract numbered footnotes from a footer region
///
/// Footnotes come back in document order. Targets followed by no text are
/// skipped.
pub fn extract_footnotes(footer: &str) -> Vec<Footnote> {
    let mut footnotes = Vec::new();

    for caps in FOOTNOTE_TARGET.captures_iter(footer) {
        let (Some(target), Some(digits)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Ok(number) = digits.as_str().parse::<u32>() else {
            continue;
        };

        let rest = &footer[target.end()..];
        let end = FOOTNOTE_BOUNDARY
            .find(rest)
            .map_or(rest.len(), |boundary| boundary.start());

        let text = strip_markup_tags(&rest[..end]);
        let text = text.trim();
        if !text.is_empty() {
            footnotes.push(Footnote {
                number,
                text: text.to_string(),
            });
        }
    }

    footnotes
}

/// Convert page markup to Markdown with footnotes as `[^N]: text` lines
pub fn page_markup_to_markdown_with_footnotes(markup: &str, options: &FootnoteOptions) -> String {
    let (body, footer) = split_footnotes(markup);
    let body_markdown = markup_to_markdown(body);

    if !options.include_footnotes || footer.is_empty() {
        return body_markdown;
    }

    let footnotes = extract_footnotes(footer);
    if footnotes.is_empty() {
        return body_markdown;
    }

    let footnotes_markdown = footnotes
        .iter()
        .map(|footnote| format!("[^{}]: {}", footnote.number, footnote.text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}{}{}",
        body_markdown, options.footnote_separator, footnotes_markdown
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const WITH_FOOTNOTES: &str = r##"<p class="g-paragraph g-rtl" id="p-1">وذكر الذهبي أن الدَّبَري عُمِّر دهرًا؛ فأكثر عنه الطبراني <span class="g-parentheses">  <a href="#foot-1" class="g-footnote-link">(١)</a> </span> .</p><p class="g-paragraph g-rtl" id="p-2">قال الذهبي في  <span class="g-quotes">"ميزان الاعتدال"</span> .</p><p class="g-paragraph g-ltr" id="p-3"><div class="g-page-separator" id="page-separator"></div><div class="g-page-footer"></p><p class="g-paragraph g-rtl" id="p-4"><span class="g-list"> <span id="foot-1" class="g-footnote-target">(١)</span> </span>   <span class="g-quotes">"تاريخ الإسلام"</span>  <span class="g-parentheses"> (٥/ ٣٧٨)</span> .</p>"##;

    const WITHOUT_FOOTNOTES: &str = r#"<p class="g-paragraph g-rtl" id="p-1">المُصَنَّفُ</p><p class="g-paragraph g-rtl" id="p-2">للإمام الحافظ أبى بكر عبد الرزاق</p>"#;

    const TWO_FOOTNOTES: &str = r#"<div class="g-page-footer"><p><span class="g-list"><span id="foot-2" class="g-footnote-target">(٢)</span></span> Second note.</p><p><span class="g-list"><span id="foot-1" class="g-footnote-target">(١)</span></span> First <b>note</b>.</p></div>"#;

    #[test]
    fn test_split_at_footer() {
        let (body, footer) = split_footnotes(WITH_FOOTNOTES);
        assert!(body.contains("الدَّبَري"));
        assert!(!body.contains("g-page-footer"));
        assert!(footer.starts_with(FOOTNOTE_SEPARATOR));
        assert!(footer.contains("foot-1"));
        assert_eq!(format!("{}{}", body, footer), WITH_FOOTNOTES);
    }

    #[test]
    fn test_split_without_footer() {
        let (body, footer) = split_footnotes(WITHOUT_FOOTNOTES);
        assert_eq!(body, WITHOUT_FOOTNOTES);
        assert_eq!(footer, "");
    }

    #[test]
    fn test_split_empty() {
        assert_eq!(split_footnotes(""), ("", ""));
    }

    #[test]
    fn test_has_footnotes() {
        assert!(has_footnotes(WITH_FOOTNOTES));
        assert!(!has_footnotes(WITHOUT_FOOTNOTES));
        assert!(!has_footnotes(""));
    }

    #[test]
    fn test_strip_footnote_links() {
        let html = r##"Text <a href="#foot-1" class="g-footnote-link">(١)</a> more"##;
        assert_eq!(strip_footnote_links(html), "Text (١) more");

        let html = r##"A <a href="#foot-1" class="g-footnote-link">(١)</a> B <a href="#foot-2" class="g-footnote-link">(٢)</a> C"##;
        assert_eq!(strip_footnote_links(html), "A (١) B (٢) C");

        assert_eq!(strip_footnote_links(""), "");
    }

    #[test]
    fn test_strip_footnote_links_keeps_other_anchors() {
        let html = r#"<a href="https://example.com">site</a>"#;
        assert_eq!(strip_footnote_links(html), html);
    }

    #[test]
    fn test_remove_footnote_references_keeps_double_space() {
        let html = r##"Text <span class="g-parentheses"><a href="#foot-1" class="g-footnote-link">(١)</a></span> more"##;
        assert_eq!(remove_footnote_references(html), "Text  more");
        assert_eq!(remove_footnote_references(""), "");
    }

    #[test]
    fn test_remove_footnote_references_preserves_plain_parentheses() {
        let html = r#"Text <span class="g-parentheses">(regular)</span> more"#;
        assert_eq!(remove_footnote_references(html), html);
    }

    #[test]
    fn test_remove_footnote_references_in_page() {
        let (body, _) = split_footnotes(WITH_FOOTNOTES);
        let cleaned = remove_footnote_references(body);
        assert!(!cleaned.contains("g-footnote-link"));
        assert!(cleaned.contains(r#"<span class="g-quotes">"#));
    }

    #[test]
    fn test_extract_footnotes_from_page() {
        let (_, footer) = split_footnotes(WITH_FOOTNOTES);
        let footnotes = extract_footnotes(footer);
        assert_eq!(footnotes.len(), 1);
        assert_eq!(footnotes[0].number, 1);
        assert_eq!(footnotes[0].text, "\"تاريخ الإسلام\"   (٥/ ٣٧٨) .");
    }

    #[test]
    fn test_extract_footnotes_document_order() {
        let footnotes = extract_footnotes(TWO_FOOTNOTES);
        assert_eq!(
            footnotes,
            vec![
                Footnote {
                    number: 2,
                    text: "Second note.".to_string()
                },
                Footnote {
                    number: 1,
                    text: "First note.".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_extract_footnotes_adjacent_targets() {
        let footer = r#"<span id="foot-1" class="g-footnote-target">(1)</span> one <span id="foot-2" class="g-footnote-target">(2)</span> two"#;
        let footnotes = extract_footnotes(footer);
        assert_eq!(footnotes.len(), 2);
        assert_eq!(footnotes[0].text, "one");
        assert_eq!(footnotes[1].text, "two");
    }

    #[test]
    fn test_extract_footnotes_skips_empty_text() {
        let footer = r#"<span id="foot-1" class="g-footnote-target">(1)</span>  </div>"#;
        assert!(extract_footnotes(footer).is_empty());
    }

    #[test]
    fn test_extract_footnotes_empty_or_unmarked() {
        assert!(extract_footnotes("").is_empty());
        assert!(extract_footnotes("<p>Just some text</p>").is_empty());
    }

    #[test]
    fn test_markdown_with_footnotes() {
        let md = page_markup_to_markdown_with_footnotes(WITH_FOOTNOTES, &FootnoteOptions::default());
        assert!(md.contains("الدَّبَري"));
        assert!(md.contains("\n\n---\n\n[^1]: \"تاريخ الإسلام\""));
    }

    #[test]
    fn test_markdown_without_footnotes_option() {
        let options = FootnoteOptions::default().include_footnotes(false);
        let md = page_markup_to_markdown_with_footnotes(WITH_FOOTNOTES, &options);
        assert!(md.contains("الدَّبَري"));
        assert!(!md.contains("[^"));
    }

    #[test]
    fn test_markdown_custom_separator() {
        let options = FootnoteOptions::default().footnote_separator("\n\n");
        let md = page_markup_to_markdown_with_footnotes(TWO_FOOTNOTES, &options);
        assert_eq!(md, "\n\n[^2]: Second note.\n[^1]: First note.");
    }

    #[test]
    fn test_markdown_page_without_footer() {
        let md =
            page_markup_to_markdown_with_footnotes(WITHOUT_FOOTNOTES, &FootnoteOptions::default());
        assert!(md.contains("المُصَنَّفُ"));
        assert!(!md.contains("---"));
        assert_eq!(md, markup_to_markdown(WITHOUT_FOOTNOTES));
    }

    #[test]
    fn test_markdown_footer_without_targets() {
        let html = r#"<p>Body</p><div class="g-page-footer"><p>no targets</p></div>"#;
        let md = page_markup_to_markdown_with_footnotes(html, &FootnoteOptions::default());
        assert_eq!(md, "Body");
    }

    #[test]
    fn test_markdown_empty_input() {
        assert_eq!(
            page_markup_to_markdown_with_footnotes("", &FootnoteOptions::default()),
            ""
        );
    }
}
