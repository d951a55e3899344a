//! Table of contents traversal and rendering

use crate::types::IndexItem;

/// Options for [`index_to_markdown`]
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexMarkdownOptions {
    /// Deepest level to render, 1 = top level only. `None` renders all levels.
    pub max_depth: Option<usize>,
}

impl IndexMarkdownOptions {
    /// Limit rendering to the given depth
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Flatten the tree in pre-order, parents before their children
pub fn flatten_index(index: &[IndexItem]) -> Vec<&IndexItem> {
    fn traverse<'a>(items: &'a [IndexItem], out: &mut Vec<&'a IndexItem>) {
        for item in items {
            out.push(item);
            traverse(&item.children, out);
        }
    }

    let mut result = Vec::new();
    traverse(index, &mut result);
    result
}

/// Find an entry anywhere in the tree, first match in pre-order
pub fn find_index_entry(index: &[IndexItem], id: u64) -> Option<&IndexItem> {
    index.iter().find_map(|item| {
        if item.id == id {
            Some(item)
        } else {
            find_index_entry(&item.children, id)
        }
    })
}

/// Path from the root entry down to the entry with the given ID
///
/// Both ends are included. Returns an empty path when the ID is absent.
pub fn index_breadcrumb(index: &[IndexItem], id: u64) -> Vec<&IndexItem> {
    fn find_path<'a>(items: &'a [IndexItem], id: u64, path: &mut Vec<&'a IndexItem>) -> bool {
        for item in items {
            path.push(item);
            if item.id == id || find_path(&item.children, id, path) {
                return true;
            }
            path.pop();
        }
        false
    }

    let mut path = Vec::new();
    find_path(index, id, &mut path);
    path
}

/// Render the tree as a Markdown table of contents
///
/// Top-level entries become `## Title (Part P, p. N)` headings, nested
/// entries become indented list items.
pub fn index_to_markdown(index: &[IndexItem], options: &IndexMarkdownOptions) -> String {
    fn traverse(items: &[IndexItem], depth: usize, max_depth: Option<usize>, lines: &mut Vec<String>) {
        if max_depth.is_some_and(|max| depth > max) {
            return;
        }

        for item in items {
            let page_info = match item.part_name.as_deref() {
                Some(part) if !part.is_empty() => format!(" (Part {}, p. {})", part, item.page),
                _ => format!(" (p. {})", item.page),
            };

            if depth == 1 {
                lines.push(format!("## {}{}", item.title, page_info));
            } else {
                let indent = "  ".repeat(depth - 1);
                lines.push(format!("{}- {}{}", indent, item.title, page_info));
            }

            traverse(&item.children, depth + 1, max_depth, lines);
        }
    }

    let mut lines = Vec::new();
    traverse(index, 1, options.max_depth, &mut lines);
    lines.join("\n")
}
