//! Core types for KetabKit
//!
//! Records mirror the catalog's JSON payloads. Catalog responses pass
//! through [`remove_falsy_values`](crate::common::remove_falsy_values)
//! before deserialization, so most record fields default when missing.
//! Archive records are decoded as-is; their fields also accept `null`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Scope for filtering search results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryScope {
    /// Search only in book titles
    #[default]
    Titles,
}

impl fmt::Display for QueryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryScope::Titles => write!(f, "titles"),
        }
    }
}

/// Direction for sorting results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    /// Sort in ascending order
    #[default]
    Asc,
    /// Sort in descending order
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err("Invalid sort direction: must be ASC or DESC".to_string()),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

/// Query parameters for the paginated list endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// Filter by active status (0 or 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<u8>,
    /// Filter by deletion status (0 or 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<u8>,
    /// Maximum number of results per page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Page number for pagination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Search query string, sent as `q`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Scope of the search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<QueryScope>,
    /// Sort direction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    /// Field to sort by
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
}

impl RequestOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search query
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set the page size
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the result page
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sort by a field in the given direction
    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_field = Some(field.into());
        self.sort_direction = Some(direction);
        self
    }

    /// Query string pairs in request order
    ///
    /// The search query is sent last, as `q`. An empty query is not sent.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(v) = self.is_active {
            pairs.push(("is_active", v.to_string()));
        }
        if let Some(v) = self.is_deleted {
            pairs.push(("is_deleted", v.to_string()));
        }
        if let Some(v) = self.limit {
            pairs.push(("limit", v.to_string()));
        }
        if let Some(v) = self.page {
            pairs.push(("page", v.to_string()));
        }
        if let Some(v) = self.scope {
            pairs.push(("scope", v.to_string()));
        }
        if let Some(v) = self.sort_direction {
            pairs.push(("sort_direction", v.to_string()));
        }
        if let Some(ref v) = self.sort_field {
            pairs.push(("sort_field", v.clone()));
        }
        if let Some(ref q) = self.query {
            if !q.is_empty() {
                pairs.push(("q", q.clone()));
            }
        }
        pairs
    }
}

/// Options for the book index endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookIndexOptions {
    /// Return a hierarchical structure with children
    pub is_recursive: bool,
    /// Part number to list
    pub part: u32,
}

impl Default for BookIndexOptions {
    fn default() -> Self {
        Self {
            is_recursive: false,
            part: 1,
        }
    }
}

impl BookIndexOptions {
    /// Request the nested tree instead of a flat list
    pub fn recursive(mut self, is_recursive: bool) -> Self {
        self.is_recursive = is_recursive;
        self
    }

    /// Select the part to list
    pub fn part(mut self, part: u32) -> Self {
        self.part = part;
        self
    }

    /// Query string pairs in request order
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("is_recursive", u8::from(self.is_recursive).to_string()),
            ("part", self.part.to_string()),
        ]
    }
}

/// Standard API response envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Status code reported in the body
    pub code: u16,
    /// Payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Pagination navigation links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<PaginationLinks>,
    /// Error message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Pagination metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
    /// Whether the request succeeded
    #[serde(default)]
    pub status: bool,
}

/// Navigation links for paginated results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationLinks {
    pub first: Option<String>,
    pub last: Option<String>,
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// Metadata about paginated results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationMeta {
    pub current_page: u32,
    pub from: Option<u64>,
    pub last_page: u32,
    pub per_page: u32,
    pub to: Option<u64>,
    pub total: u64,
}

/// Information about a book author
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorInfo {
    pub id: u64,
    /// Primary author name
    pub name: String,
    /// Full name with additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
    /// Biographical summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    /// Number of books by this author
    pub books_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub books_updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub is_active: u8,
    pub is_deleted: u8,
    pub is_followed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Display order priority
    pub order: i64,
}

/// Author reference on a book
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// Category reference on a book
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// Information about a book category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryInfo {
    pub id: u64,
    /// Parent category ID, 0 for root categories
    pub parent: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub books_updated_at: Option<String>,
    pub is_active: u8,
    pub is_deleted: u8,
    pub books_count: u64,
    pub order: i64,
    pub children_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Child categories
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryInfo>,
}

/// File size and download URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileData {
    #[serde(deserialize_with = "null_as_default")]
    pub size: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

/// Available file formats for a book
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Files {
    /// Data archive (zipped JSON)
    #[serde(deserialize_with = "null_as_default")]
    pub data: FileData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf: Option<FileData>,
}

/// Metadata key-value pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Page numbering entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationItem {
    #[serde(deserialize_with = "null_as_default")]
    pub number: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub page_id: u64,
}

/// Reference to a book part or volume
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartReference {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    /// Part name, usually its number
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// Book part or volume with its PDF details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Part {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Starting page number
    #[serde(deserialize_with = "null_as_default")]
    pub page: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub page_id: u64,
    /// Number of pages in this part
    #[serde(deserialize_with = "null_as_default")]
    pub pages: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
}

/// Metadata about a book
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub authors: Vec<Author>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub categories: Vec<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bibliography: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub files: Files,
    /// Table of contents
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub index: Vec<IndexItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub index_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub pages_count: u64,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub pagination: Vec<PaginationItem>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub parts: Vec<Part>,
    #[serde(deserialize_with = "null_as_default")]
    pub parts_count: u64,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub meta: Vec<Meta>,
    #[serde(deserialize_with = "null_as_default")]
    pub downloads: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub reads: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub views: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub is_free: u8,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub book_type: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ris_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Complete book data from the content archive
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookContents {
    #[serde(flatten)]
    pub info: BookInfo,
    /// Book pages with markup content
    #[serde(default, deserialize_with = "null_as_default")]
    pub pages: Vec<Page>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ris_file: Option<String>,
}

/// Quranic verse reference of a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quran {
    #[serde(deserialize_with = "null_as_default")]
    pub sura_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub from_aya_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub to_aya_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_range: Option<u8>,
}

/// Hadith authenticity and classification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hadeeth {
    #[serde(deserialize_with = "null_as_default")]
    pub hukm_ejmali: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hukm_tafseeli: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hukm_tafseeli_arabic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mouzuh: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub type_atraaf: String,
    #[serde(deserialize_with = "null_as_default")]
    pub type_qft: String,
    #[serde(deserialize_with = "null_as_default")]
    pub type_rowaat: String,
}

/// One page of book content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    /// Printed page number
    #[serde(default, deserialize_with = "null_as_default")]
    pub page: u32,
    /// Page markup
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    /// Part or volume this page belongs to
    #[serde(default)]
    pub part: Option<PartReference>,
    /// Index entry (section) this page belongs to
    #[serde(default, deserialize_with = "null_as_default")]
    pub index: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quran: Option<Quran>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hadeeth: Option<Hadeeth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seal: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub reciters: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub rowa: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub shrooh: Vec<Value>,
}

/// Table of contents node
///
/// Children are owned by their parent; the tree has no back pointers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Page number where this entry starts
    #[serde(default, deserialize_with = "null_as_default")]
    pub page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
    /// Name of the part or volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_name: Option<String>,
    /// Heading level (1 = top level, 2+ = nested)
    #[serde(default = "default_title_level", deserialize_with = "null_as_title_level")]
    pub title_level: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub children: Vec<IndexItem>,
}

fn default_title_level() -> u32 {
    1
}

/// Deserialize `null` as the type's default
///
/// Archive JSON is decoded as-is and carries `null` in place of empty
/// strings, counts and lists.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_title_level<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_else(default_title_level))
}

impl IndexItem {
    /// Create a leaf entry
    pub fn new(id: u64, title: impl Into<String>, page: u32, title_level: u32) -> Self {
        Self {
            id,
            title: title.into(),
            page,
            title_level,
            ..Default::default()
        }
    }

    /// Set the part name
    pub fn part_name(mut self, part_name: impl Into<String>) -> Self {
        self.part_name = Some(part_name.into());
        self
    }

    /// Set the children
    pub fn with_children(mut self, children: Vec<IndexItem>) -> Self {
        self.children = children;
        self
    }
}

/// Table of contents entry as returned by the book index endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookIndexEntry {
    pub id: u64,
    pub book_id: u64,
    pub title: String,
    pub title_level: u32,
    pub order: i64,
    pub page: u32,
    pub page_id: u64,
    /// Paragraph identifier within the page
    pub paragraph_id: Option<u64>,
    /// Parent entry ID, 0 for top-level entries
    pub parent: u64,
    pub part_name: String,
    /// Ending page identifier of this section
    pub to_page_id: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reciters: Vec<Value>,
    /// Present when the index was requested recursively
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BookIndexEntry>,
}

impl From<BookIndexEntry> for IndexItem {
    fn from(entry: BookIndexEntry) -> Self {
        IndexItem {
            id: entry.id,
            title: entry.title,
            page: entry.page,
            page_id: Some(entry.page_id),
            parent: (entry.parent != 0).then_some(entry.parent),
            part_name: (!entry.part_name.is_empty()).then_some(entry.part_name),
            title_level: entry.title_level,
            children: entry.children.into_iter().map(IndexItem::from).collect(),
        }
    }
}

/// Footnote extracted from a page footer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footnote {
    /// Footnote number as given by its target id
    pub number: u32,
    /// Tag-free footnote text
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sort_direction_from_str() {
        assert_eq!(SortDirection::from_str("asc").unwrap(), SortDirection::Asc);
        assert_eq!(SortDirection::from_str("DESC").unwrap(), SortDirection::Desc);
        assert!(SortDirection::from_str("sideways").is_err());
    }

    #[test]
    fn test_request_options_query_pairs() {
        let options = RequestOptions::new()
            .query("الطهارة")
            .limit(10)
            .sort("id", SortDirection::Desc);
        assert_eq!(
            options.to_query_pairs(),
            vec![
                ("limit", "10".to_string()),
                ("sort_direction", "DESC".to_string()),
                ("sort_field", "id".to_string()),
                ("q", "الطهارة".to_string()),
            ]
        );
        assert!(RequestOptions::new().query("").to_query_pairs().is_empty());
    }

    #[test]
    fn test_book_index_options_defaults() {
        let options = BookIndexOptions::default();
        assert_eq!(
            options.to_query_pairs(),
            vec![("is_recursive", "0".to_string()), ("part", "1".to_string())]
        );
        let options = options.recursive(true).part(3);
        assert_eq!(
            options.to_query_pairs(),
            vec![("is_recursive", "1".to_string()), ("part", "3".to_string())]
        );
    }

    #[test]
    fn test_page_deserialization() {
        let page: Page = serde_json::from_value(json!({
            "content": "<p>Page one content</p>",
            "id": 1,
            "index": 100,
            "page": 3,
            "part": { "id": 1, "name": "1" },
            "quran": { "from_aya_id": 0, "sura_id": 0, "to_aya_id": 0 },
            "reciters": [],
            "rowa": [],
            "seal": "abc",
            "shrooh": []
        }))
        .unwrap();
        assert_eq!(page.page, 3);
        assert_eq!(page.part.as_ref().map(|p| p.name.as_str()), Some("1"));
        assert_eq!(page.seal.as_deref(), Some("abc"));
    }

    #[test]
    fn test_page_with_null_part() {
        let page: Page = serde_json::from_value(json!({
            "content": "", "id": 1, "index": 1, "page": 1, "part": null
        }))
        .unwrap();
        assert!(page.part.is_none());
    }

    #[test]
    fn test_index_item_children_optional() {
        let item: IndexItem = serde_json::from_value(json!({
            "id": 4, "page": 20, "page_id": 20, "part_name": "1",
            "title": "Chapter 2", "title_level": 1
        }))
        .unwrap();
        assert!(item.children.is_empty());

        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("children"));
    }

    #[test]
    fn test_book_index_entry_into_index_item() {
        let entry: BookIndexEntry = serde_json::from_value(json!({
            "id": 1, "book_id": 67768, "title": "Chapter 1", "title_level": 1,
            "page": 1, "page_id": 11, "parent": 0, "part_name": "1",
            "children": [
                { "id": 2, "title": "Section", "title_level": 2, "page": 5, "parent": 1, "part_name": "" }
            ]
        }))
        .unwrap();

        let item = IndexItem::from(entry);
        assert_eq!(item.parent, None);
        assert_eq!(item.part_name.as_deref(), Some("1"));
        assert_eq!(item.children.len(), 1);
        assert_eq!(item.children[0].parent, Some(1));
        assert_eq!(item.children[0].part_name, None);
    }

    #[test]
    fn test_book_contents_flattened_info() {
        let contents: BookContents = serde_json::from_value(json!({
            "id": 67768,
            "title": "المصنف",
            "type": 1,
            "pages": [{ "content": "<p>x</p>", "id": 1, "index": 1, "page": 1, "part": null }],
            "image_file": "cover.jpg"
        }))
        .unwrap();
        assert_eq!(contents.info.id, 67768);
        assert_eq!(contents.info.book_type, 1);
        assert_eq!(contents.pages.len(), 1);
        assert_eq!(contents.image_file.as_deref(), Some("cover.jpg"));
    }

    #[test]
    fn test_book_contents_accepts_nulls() {
        let contents: BookContents = serde_json::from_value(json!({
            "id": 1,
            "title": null,
            "description": null,
            "authors": null,
            "files": null,
            "parts": [{ "id": 3, "name": null, "pages": null }],
            "index": [{ "id": 5, "title": null, "page": 2, "title_level": null, "children": null }],
            "pages": [{
                "id": 1,
                "page": null,
                "content": null,
                "index": null,
                "hadeeth": { "hukm_ejmali": null, "type_atraaf": null, "type_qft": "x", "type_rowaat": null },
                "reciters": null
            }]
        }))
        .unwrap();

        assert_eq!(contents.info.title, "");
        assert_eq!(contents.info.description, "");
        assert!(contents.info.authors.is_empty());
        assert_eq!(contents.info.parts[0].name, "");
        assert_eq!(contents.info.index[0].title_level, 1);
        assert!(contents.info.index[0].children.is_empty());

        let page = &contents.pages[0];
        assert_eq!(page.page, 0);
        assert_eq!(page.content, "");
        assert_eq!(page.index, 0);
        assert_eq!(page.hadeeth.as_ref().unwrap().type_qft, "x");
        assert_eq!(page.hadeeth.as_ref().unwrap().hukm_ejmali, "");
    }

    #[test]
    fn test_index_item_missing_title_level_defaults_to_one() {
        let item: IndexItem = serde_json::from_value(json!({ "id": 1, "title": "t", "page": 1 })).unwrap();
        assert_eq!(item.title_level, 1);
    }
}
