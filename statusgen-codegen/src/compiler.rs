//! End-to-end status table compilation.

use crate::error::CodegenError;
use crate::generator::Target;
use crate::options::CodegenOptions;
use crate::output::OutputSet;
use statusgen_schema::{CompileSession, StatusTable, ValidationMode, validate_table};
use std::path::{Path, PathBuf};

/// Builder for one compiler run: inputs, outputs and settings.
#[derive(Debug, Clone, Default)]
pub struct StatusCompiler {
    base: Option<PathBuf>,
    mode: ValidationMode,
    options: CodegenOptions,
    outputs: Vec<(Target, PathBuf)>,
}

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct CompileReport {
    /// Number of entries in the flattened table.
    pub entries: usize,
    /// Documents parsed, root and included.
    pub documents: usize,
    /// Lenient validation findings.
    pub warnings: usize,
    /// Files written.
    pub written: Vec<PathBuf>,
}

impl StatusCompiler {
    /// Creates a compiler with default settings and no outputs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the include base directory.
    #[must_use]
    pub fn base(mut self, base: impl Into<PathBuf>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Sets the validation mode.
    #[must_use]
    pub fn validation(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the code generation options.
    #[must_use]
    pub fn options(mut self, options: CodegenOptions) -> Self {
        self.options = options;
        self
    }

    /// Requests an output file for a target.
    #[must_use]
    pub fn output(mut self, target: Target, path: impl Into<PathBuf>) -> Self {
        self.outputs.push((target, path.into()));
        self
    }

    /// Whether any output was requested.
    #[must_use]
    pub fn has_outputs(&self) -> bool {
        !self.outputs.is_empty()
    }

    /// Parses and validates the given root documents into one table.
    ///
    /// # Errors
    /// Returns `CodegenError` if any document fails to parse, if the
    /// documents define no entries or, in strict mode, if validation fails.
    pub fn compile<P: AsRef<Path>>(
        &self,
        documents: &[P],
    ) -> Result<(StatusTable, usize), CodegenError> {
        let mut session = CompileSession::new(self.base.clone());
        for document in documents {
            session.add_document(document)?;
        }
        tracing::debug!("Visited {} document(s)", session.visited().len());
        let table = session.finish();
        if table.is_empty() {
            return Err(CodegenError::EmptyTable);
        }

        let findings = validate_table(&table, self.mode)?;
        for finding in &findings {
            tracing::warn!("{}", finding);
        }

        Ok((table, findings.len()))
    }

    /// Runs the compiler: creates every output, parses the documents and
    /// writes each target. On any failure, files created by this run are
    /// removed.
    ///
    /// # Errors
    /// Returns `CodegenError` on the first output, parse or validation
    /// failure.
    pub fn run<P: AsRef<Path>>(&self, documents: &[P]) -> Result<CompileReport, CodegenError> {
        self.check_outputs(documents)?;

        let mut outputs = OutputSet::new();
        for (target, path) in &self.outputs {
            outputs.create(*target, path)?;
        }

        let (table, warnings) = self.compile(documents)?;
        tracing::info!(
            "Compiled {} status entries from {} document(s)",
            table.len(),
            table.sources().count()
        );

        outputs.write_all(&table, &self.options)?;

        Ok(CompileReport {
            entries: table.len(),
            documents: table.sources().count(),
            warnings,
            written: outputs.commit(),
        })
    }

    /// Rejects outputs that resolve to a root document, before any output
    /// is truncated.
    fn check_outputs<P: AsRef<Path>>(&self, documents: &[P]) -> Result<(), CodegenError> {
        let inputs: Vec<PathBuf> = documents
            .iter()
            .filter_map(|d| std::fs::canonicalize(d).ok())
            .collect();

        for (_, path) in &self.outputs {
            // Outputs that do not exist yet cannot alias an input.
            let Ok(canonical) = std::fs::canonicalize(path) else {
                continue;
            };
            if inputs.contains(&canonical) {
                return Err(CodegenError::OutputIsInput { path: path.clone() });
            }
        }
        Ok(())
    }
}
