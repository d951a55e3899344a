//! Book archive extraction
//!
//! Book contents are published as `{id}.data.zip` archives holding a single
//! JSON document. Archives are small enough to extract in memory.

use crate::error::KetabError;
use std::io::{Cursor, Read};
use tracing::debug;
use zip::ZipArchive;

/// A file extracted from an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path of the entry inside the archive
    pub name: String,
    /// Decompressed contents
    pub data: Vec<u8>,
}

impl ArchiveEntry {
    /// Whether the entry name ends in `.json`
    pub fn is_json(&self) -> bool {
        self.name.ends_with(".json")
    }
}

/// Upper bound on the buffer reserved from an entry's declared size
const MAX_PREALLOCATION: u64 = 16 * 1024 * 1024;

/// Extract every file entry of a zip archive held in memory
///
/// Directory entries are skipped. Entries keep their archive order.
pub fn unzip_archive(bytes: &[u8]) -> Result<Vec<ArchiveEntry>, KetabError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entries = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }

        let mut data = Vec::with_capacity(capacity_hint(file.size()));
        file.read_to_end(&mut data)?;
        debug!(name = file.name(), size = data.len(), "Extracted archive entry");

        entries.push(ArchiveEntry {
            name: file.name().to_string(),
            data,
        });
    }

    Ok(entries)
}

/// Buffer size to reserve for an entry
///
/// Declared sizes come from the archive headers and are not trusted.
fn capacity_hint(declared_size: u64) -> usize {
    declared_size.min(MAX_PREALLOCATION) as usize
}

/// First entry whose name ends in `.json`
pub fn find_json_entry(entries: &[ArchiveEntry]) -> Option<&ArchiveEntry> {
    entries.iter().find(|entry| entry.is_json())
}
