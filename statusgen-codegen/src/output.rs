//! Output file management.
//!
//! Every requested output is created before any input is read, so a bad
//! output path fails the run early. Files stay owned by the [`OutputSet`]
//! until [`OutputSet::commit`]; dropping an uncommitted set deletes every
//! file it created, which keeps partial sources out of the build tree.

use crate::error::CodegenError;
use crate::generator::{Generator, Target};
use crate::options::CodegenOptions;
use statusgen_schema::StatusTable;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

struct Output {
    target: Target,
    path: PathBuf,
    file: File,
}

/// Set of output files for one run.
#[derive(Default)]
pub struct OutputSet {
    outputs: Vec<Output>,
    committed: bool,
}

impl OutputSet {
    /// Creates an empty output set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates (truncating) the output file for a target.
    ///
    /// # Errors
    /// Returns `CodegenError::Output` if the file cannot be created and
    /// `CodegenError::DuplicateOutput` if the path is already in the set.
    pub fn create(&mut self, target: Target, path: impl Into<PathBuf>) -> Result<(), CodegenError> {
        let path = path.into();
        if self.outputs.iter().any(|o| o.path == path) {
            return Err(CodegenError::DuplicateOutput { path });
        }

        let file = File::create(&path).map_err(|e| CodegenError::output(&path, e))?;
        tracing::debug!("Created {} output {}", target, path.display());
        self.outputs.push(Output { target, path, file });
        Ok(())
    }

    /// Renders the table for every output and writes it.
    ///
    /// # Errors
    /// Returns `CodegenError::Output` on the first failed write.
    pub fn write_all(
        &mut self,
        table: &StatusTable,
        options: &CodegenOptions,
    ) -> Result<(), CodegenError> {
        let generator = Generator::new(table, options);
        for output in &mut self.outputs {
            let content = generator.generate(output.target);
            output
                .file
                .write_all(content.as_bytes())
                .and_then(|()| output.file.flush())
                .map_err(|e| CodegenError::output(&output.path, e))?;
            tracing::info!("Wrote {} ({})", output.path.display(), output.target);
        }
        Ok(())
    }

    /// Paths in the set, in creation order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.outputs.iter().map(|o| o.path.as_path())
    }

    /// Number of outputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Whether the set has no outputs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Keeps the files and returns their paths.
    #[must_use]
    pub fn commit(mut self) -> Vec<PathBuf> {
        self.committed = true;
        std::mem::take(&mut self.outputs)
            .into_iter()
            .map(|o| o.path)
            .collect()
    }
}

impl Drop for OutputSet {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for output in self.outputs.drain(..) {
            let Output { path, file, .. } = output;
            drop(file);
            match std::fs::remove_file(&path) {
                Ok(()) => tracing::debug!("Removed partial output {}", path.display()),
                Err(e) => tracing::warn!("Failed to remove {}: {}", path.display(), e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statusgen_schema::StatusEntry;
    use tempfile::TempDir;

    fn table() -> StatusTable {
        let mut table = StatusTable::new();
        table.push(StatusEntry::new("ER_OK", 0, "Success"));
        table
    }

    #[test]
    fn test_commit_keeps_files() {
        let dir = TempDir::new().unwrap();
        let header = dir.path().join("Status.h");

        let mut outputs = OutputSet::new();
        outputs.create(Target::CHeader, &header).unwrap();
        outputs.write_all(&table(), &CodegenOptions::default()).unwrap();
        let written = outputs.commit();

        assert_eq!(written, vec![header.clone()]);
        let content = std::fs::read_to_string(&header).unwrap();
        assert!(content.contains("ER_OK = 0x0 /**< Success */"));
    }

    #[test]
    fn test_drop_removes_files() {
        let dir = TempDir::new().unwrap();
        let header = dir.path().join("Status.h");
        let source = dir.path().join("Status.cc");

        {
            let mut outputs = OutputSet::new();
            outputs.create(Target::CHeader, &header).unwrap();
            outputs.create(Target::CSource, &source).unwrap();
            assert!(header.exists());
            assert!(source.exists());
        }

        assert!(!header.exists());
        assert!(!source.exists());
    }

    #[test]
    fn test_create_failure() {
        let dir = TempDir::new().unwrap();
        let mut outputs = OutputSet::new();
        let err = outputs
            .create(Target::Java, dir.path().join("missing/Status.java"))
            .unwrap_err();
        assert!(matches!(err, CodegenError::Output { .. }));
        assert!(outputs.is_empty());
    }

    #[test]
    fn test_duplicate_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Status.h");
        let mut outputs = OutputSet::new();
        outputs.create(Target::CHeader, &path).unwrap();
        let err = outputs.create(Target::CSource, &path).unwrap_err();
        assert!(matches!(err, CodegenError::DuplicateOutput { .. }));
        assert_eq!(outputs.paths().count(), 1);
    }
}
