//! Status table type definitions.
//!
//! This module contains the data structures produced by the parser: single
//! status entries, offset markers and the flattened table that owns them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A single named status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Symbol name, conventionally prefixed with `ER_`.
    pub name: String,
    /// Numeric code.
    pub value: u32,
    /// Human readable description.
    pub comment: String,
}

impl StatusEntry {
    /// Creates a new status entry.
    #[must_use]
    pub fn new(name: impl Into<String>, value: u32, comment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            comment: comment.into(),
        }
    }

    /// Returns the name with `prefix` removed, or the full name if it does
    /// not start with `prefix`.
    #[must_use]
    pub fn short_name(&self, prefix: &str) -> &str {
        match self.name.strip_prefix(prefix) {
            Some(rest) if !rest.is_empty() => rest,
            _ => &self.name,
        }
    }
}

/// An `offset` element seen while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetMarker {
    /// Declared offset value.
    pub value: u32,
    /// Index of the first entry that follows the marker.
    pub entry_index: usize,
}

/// Ordered, flattened table of status entries.
#[derive(Debug, Clone, Default)]
pub struct StatusTable {
    entries: Vec<StatusEntry>,
    offsets: Vec<OffsetMarker>,
    sources: Vec<PathBuf>,
    /// Name lookup (first occurrence wins).
    name_map: HashMap<String, usize>,
}

impl StatusTable {
    /// Creates a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry in document order.
    pub fn push(&mut self, entry: StatusEntry) {
        let index = self.entries.len();
        self.name_map.entry(entry.name.clone()).or_insert(index);
        self.entries.push(entry);
    }

    /// Records an offset marker at the current position.
    pub fn push_offset(&mut self, value: u32) {
        self.offsets.push(OffsetMarker {
            value,
            entry_index: self.entries.len(),
        });
    }

    /// Records a source document in visit order.
    pub fn push_source(&mut self, path: impl Into<PathBuf>) {
        self.sources.push(path.into());
    }

    /// Returns all entries in document order.
    #[must_use]
    pub fn entries(&self) -> &[StatusEntry] {
        &self.entries
    }

    /// Returns the offset markers in document order.
    #[must_use]
    pub fn offsets(&self) -> &[OffsetMarker] {
        &self.offsets
    }

    /// Returns the documents that contributed to this table.
    pub fn sources(&self) -> impl Iterator<Item = &Path> {
        self.sources.iter().map(PathBuf::as_path)
    }

    /// Looks up an entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StatusEntry> {
        self.name_map.get(name).map(|&i| &self.entries[i])
    }

    /// Looks up the first entry with the given value.
    #[must_use]
    pub fn find_value(&self, value: u32) -> Option<&StatusEntry> {
        self.entries.iter().find(|e| e.value == value)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries with a flag telling whether each is the last one.
    pub fn iter_with_last(&self) -> impl Iterator<Item = (&StatusEntry, bool)> {
        let last = self.entries.len().saturating_sub(1);
        self.entries.iter().enumerate().map(move |(i, e)| (e, i == last))
    }
}

impl<'a> IntoIterator for &'a StatusTable {
    type Item = &'a StatusEntry;
    type IntoIter = std::slice::Iter<'a, StatusEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Parses a numeric literal as used by `value` attributes and `offset`
/// elements: `0x`-prefixed hex or plain decimal.
#[must_use]
pub fn parse_number(text: &str) -> Option<u32> {
    let text = text.trim();
    if let Some(hex) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        u32::from_str_radix(hex, 16).ok()
    } else {
        text.parse().ok()
    }
}
