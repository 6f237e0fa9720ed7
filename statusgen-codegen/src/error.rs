//! Error types for code generation.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Status table parse error.
    #[error("status table parse error: {0}")]
    Parse(#[from] statusgen_schema::ParseError),

    /// Status table validation error.
    #[error("status table error: {0}")]
    Table(#[from] statusgen_schema::TableError),

    /// An output file could not be created or written.
    #[error("cannot write output '{path}': {source}")]
    Output {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The same output path was requested twice.
    #[error("output '{path}' requested more than once")]
    DuplicateOutput {
        /// Output path.
        path: PathBuf,
    },

    /// An output path names one of the input documents.
    #[error("output '{path}' would overwrite input document")]
    OutputIsInput {
        /// Output path.
        path: PathBuf,
    },

    /// The documents define no status entries.
    #[error("status table has no entries")]
    EmptyTable,

    /// Version information could not be determined.
    #[error("version error: {message}")]
    Version {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates an output error for the given path.
    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }

    /// Creates a version error with the given message.
    pub fn version(message: impl Into<String>) -> Self {
        Self::Version {
            message: message.into(),
        }
    }
}
