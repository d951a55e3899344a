//! Lookups and conversions over book pages

use super::footnotes::{page_markup_to_markdown_with_footnotes, FootnoteOptions};
use super::markdown::markup_to_markdown;
use super::text::strip_markup_tags;
use crate::types::Page;

/// Separator placed between pages by default
pub const DEFAULT_PAGE_SEPARATOR: &str = "\n---\n\n";

/// Options for [`pages_to_markdown`]
#[derive(Debug, Clone)]
pub struct PagesMarkdownOptions {
    /// Prefix each page with a `<!-- Page N, Part P -->` comment
    pub include_page_numbers: bool,
    /// Text placed between consecutive pages
    pub separator: String,
    /// Render footers as footnotes; `None` converts whole pages
    pub footnotes: Option<FootnoteOptions>,
}

impl Default for PagesMarkdownOptions {
    fn default() -> Self {
        Self {
            include_page_numbers: false,
            separator: DEFAULT_PAGE_SEPARATOR.to_string(),
            footnotes: None,
        }
    }
}

impl PagesMarkdownOptions {
    /// Enable page number comments
    pub fn include_page_numbers(mut self, include: bool) -> Self {
        self.include_page_numbers = include;
        self
    }

    /// Set the page separator
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Split each page's footer off and render it with these options
    pub fn footnotes(mut self, footnotes: FootnoteOptions) -> Self {
        self.footnotes = Some(footnotes);
        self
    }
}

/// Plain text of a page
pub fn page_text(page: &Page) -> String {
    strip_markup_tags(&page.content)
}

/// Markdown of a page
pub fn page_markdown(page: &Page) -> String {
    markup_to_markdown(&page.content)
}

/// Convert pages to a single Markdown document
///
/// Page number comments are only written for pages that carry a part.
pub fn pages_to_markdown(pages: &[Page], options: &PagesMarkdownOptions) -> String {
    pages
        .iter()
        .map(|page| {
            let markdown = match options.footnotes {
                Some(ref footnotes) => {
                    page_markup_to_markdown_with_footnotes(&page.content, footnotes)
                }
                None => page_markdown(page),
            };
            match page.part {
                Some(ref part) if options.include_page_numbers => {
                    format!("<!-- Page {}, Part {} -->\n{}", page.page, part.name, markdown)
                }
                _ => markdown,
            }
        })
        .collect::<Vec<_>>()
        .join(&options.separator)
}

/// First page with the given page number
pub fn page_by_number(pages: &[Page], page_number: u32) -> Option<&Page> {
    pages.iter().find(|page| page.page == page_number)
}

/// Pages of the part with the given name, in book order
pub fn pages_by_part<'a>(pages: &'a [Page], part_name: &str) -> Vec<&'a Page> {
    pages
        .iter()
        .filter(|page| page.part.as_ref().is_some_and(|part| part.name == part_name))
        .collect()
}

/// Pages belonging to the given index entry, in book order
pub fn pages_for_section(pages: &[Page], section_id: u64) -> Vec<&Page> {
    pages.iter().filter(|page| page.index == section_id).collect()
}
