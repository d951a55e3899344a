//! KetabKit - client library for the ketabonline.com book catalog
//!
//! This crate fetches author, book and category metadata, downloads book
//! archives, and converts page markup into Markdown.
//!
//! ## Content pipeline
//!
//! The [`content`] module is the pure half of the crate. It never performs
//! I/O and works on borrowed strings and slices:
//! - [`markup_to_markdown`] - page markup to Markdown with `##` section headers
//! - [`split_footnotes`] / [`extract_footnotes`] - footnote region handling
//! - [`pages_to_markdown`] - whole books (or page ranges) as one document
//! - [`index_to_markdown`] - table of contents rendering
//!
//! ## Catalog client
//!
//! [`KetabClient`] talks to the catalog API through a pluggable
//! [`Transport`]. The default [`ReqwestTransport`] is used unless another one
//! is installed with [`ClientBuilder::transport`].

pub mod archive;
pub mod client;
pub mod common;
pub mod content;
mod error;
pub mod network;
pub mod types;

pub use client::{ClientBuilder, KetabClient};
pub use content::{
    extract_footnotes, find_index_entry, flatten_index, has_footnotes, index_breadcrumb,
    index_to_markdown, is_header_block, markup_to_markdown, normalize_line_endings,
    page_by_number, page_markdown, page_markup_to_markdown_with_footnotes, page_text,
    pages_by_part, pages_for_section, pages_to_markdown, remove_footnote_references,
    split_footnotes, strip_footnote_links, strip_markup_tags, FootnoteOptions,
    IndexMarkdownOptions, PagesMarkdownOptions,
};
pub use error::KetabError;
pub use network::{HttpBody, ReqwestTransport, Transport};
pub use types::{
    AuthorInfo, BookContents, BookIndexEntry, BookIndexOptions, BookInfo, CategoryInfo,
    Footnote, IndexItem, Page, PartReference, QueryScope, RequestOptions, SortDirection,
};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "KetabKit/0.1";
