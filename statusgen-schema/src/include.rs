//! XInclude resolution.
//!
//! Includes are resolved against a base directory and deduplicated through an
//! [`IncludeSet`] owned by the compile session.

use crate::error::ParseError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Namespace URI of XInclude elements.
pub const XINCLUDE_NS: &str = "http://www.w3.org/2001/XInclude";

/// Outcome of marking a document as visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// First time this document is seen; the caller must parse it.
    First,
    /// Already visited in this session; skip it.
    Repeat,
}

/// Set of canonical document paths visited in one session.
#[derive(Debug, Clone, Default)]
pub struct IncludeSet {
    visited: HashSet<PathBuf>,
}

impl IncludeSet {
    /// Creates a new empty include set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `href` against `base` into a canonical path.
    ///
    /// # Errors
    /// Returns `ParseError::IncludeNotFound` if the target does not exist.
    pub fn resolve(base: &Path, href: &str) -> Result<PathBuf, ParseError> {
        let joined = base.join(href);
        std::fs::canonicalize(&joined).map_err(|source| ParseError::IncludeNotFound {
            href: href.to_string(),
            path: joined,
            source,
        })
    }

    /// Marks a canonical path as visited.
    pub fn mark(&mut self, path: &Path) -> Visit {
        if self.visited.insert(path.to_path_buf()) {
            Visit::First
        } else {
            Visit::Repeat
        }
    }

    /// Whether a canonical path was already visited.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.visited.contains(path)
    }

    /// Number of distinct documents visited.
    #[must_use]
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    /// Whether no document was visited yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_mark_repeat() {
        let mut set = IncludeSet::new();
        let path = Path::new("/tmp/a.xml");
        assert_eq!(set.mark(path), Visit::First);
        assert_eq!(set.mark(path), Visit::Repeat);
        assert_eq!(set.len(), 1);
        assert!(set.contains(path));
    }

    #[test]
    fn test_resolve_relative_to_base() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/b.xml"), "<status_block/>").unwrap();

        let resolved = IncludeSet::resolve(dir.path(), "sub/b.xml").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("sub/b.xml"));

        // Same file through a different spelling resolves to the same key.
        let again = IncludeSet::resolve(&dir.path().join("sub"), "../sub/./b.xml").unwrap();
        assert_eq!(resolved, again);
    }

    #[test]
    fn test_resolve_missing() {
        let dir = TempDir::new().unwrap();
        let err = IncludeSet::resolve(dir.path(), "missing.xml").unwrap_err();
        match err {
            ParseError::IncludeNotFound { href, path, .. } => {
                assert_eq!(href, "missing.xml");
                assert_eq!(path, dir.path().join("missing.xml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
