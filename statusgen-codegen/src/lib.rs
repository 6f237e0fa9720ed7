//! # statusgen Codegen
//!
//! Code generation from status tables.
//!
//! This crate provides:
//! - C header, C/C++ lookup, Java, C#, scripting-constant, WIDL and Rust
//!   renderers for a parsed [`StatusTable`](statusgen_schema::StatusTable)
//! - Output file handling that removes partial outputs on failure
//! - Version string generation from git metadata

pub mod compiler;
pub mod error;
pub mod generator;
pub mod naming;
pub mod options;
pub mod output;
pub mod targets;
pub mod version;

pub use compiler::{CompileReport, StatusCompiler};
pub use error::CodegenError;
pub use generator::{Generator, Target};
pub use options::CodegenOptions;
pub use output::OutputSet;
pub use version::VersionInfo;

/// Generates one target from a status table XML string.
///
/// # Arguments
/// * `xml` - status table document (without includes)
/// * `target` - output format
/// * `options` - code generation options
///
/// # Returns
/// Generated source as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing fails or the document has no entries.
pub fn generate_from_xml(
    xml: &str,
    target: Target,
    options: &CodegenOptions,
) -> Result<String, CodegenError> {
    let table = statusgen_schema::parse_table(xml)?;
    if table.is_empty() {
        return Err(CodegenError::EmptyTable);
    }
    Ok(Generator::new(&table, options).generate(target))
}

/// Generates one target from a status table file, following includes
/// relative to the file's directory.
///
/// # Errors
/// Returns `CodegenError` if reading or parsing fails or no entries are
/// defined.
pub fn generate_from_file(
    path: &std::path::Path,
    target: Target,
    options: &CodegenOptions,
) -> Result<String, CodegenError> {
    let mut session = statusgen_schema::CompileSession::new(None);
    session.add_document(path)?;
    let table = session.finish();
    if table.is_empty() {
        return Err(CodegenError::EmptyTable);
    }
    Ok(Generator::new(&table, options).generate(target))
}
