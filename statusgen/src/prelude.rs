//! Prelude module for convenient imports.
//!
//! ```ignore
//! use statusgen::prelude::*;
//! ```

// Table types
pub use statusgen_schema::{
    CompileSession, ParseError, StatusEntry, StatusTable, TableError, ValidationMode,
    parse_table, validate_table,
};

// Generation types
pub use statusgen_codegen::{
    CodegenError, CodegenOptions, CompileReport, Generator, StatusCompiler, Target, VersionInfo,
};
