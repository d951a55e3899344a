//! Content transformation for catalog pages
//!
//! Design: every function here is pure and synchronous. Page markup is
//! treated as a flat string with a small fixed vocabulary (`<p>` blocks,
//! inline spans, footnote anchors and targets, one footer marker) and is
//! scanned with regular expressions rather than parsed into a DOM.
//!
//! Functions accept empty strings and empty slices and never panic on
//! malformed markup; unmatched constructs fall through to tag stripping.

mod footnotes;
mod header;
mod index;
mod markdown;
mod pages;
mod text;

pub use footnotes::{
    extract_footnotes, has_footnotes, page_markup_to_markdown_with_footnotes,
    remove_footnote_references, split_footnotes, strip_footnote_links, FootnoteOptions,
    DEFAULT_FOOTNOTE_SEPARATOR, FOOTNOTE_SEPARATOR,
};
pub use header::is_header_block;
pub use index::{
    find_index_entry, flatten_index, index_breadcrumb, index_to_markdown, IndexMarkdownOptions,
};
pub use markdown::markup_to_markdown;
pub use pages::{
    page_by_number, page_markdown, pages_by_part, pages_for_section, pages_to_markdown,
    page_text, PagesMarkdownOptions, DEFAULT_PAGE_SEPARATOR,
};
pub use text::{normalize_line_endings, strip_markup_tags};
