//! # statusgen
//!
//! Status table compiler.
//!
//! A library's status codes are kept in one XML table (`status_block`
//! documents spliced together with XInclude). statusgen flattens the table
//! and renders it for every language binding: a C header and lookup
//! functions, a Java enum, a C# class, a scripting constant table, a WIDL
//! fragment and a Rust enum.
//!
//! ## Quick Start
//!
//! ```no_run
//! use statusgen::prelude::*;
//!
//! let report = StatusCompiler::new()
//!     .base("include")
//!     .output(Target::CHeader, "Status.h")
//!     .output(Target::CSource, "Status.cc")
//!     .run(&["status.xml"])?;
//! println!("{} entries", report.entries);
//! # Ok::<(), CodegenError>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - XML parsing, include resolution and validation
//! - [`codegen`] - Per-target generation and output handling
//! - [`cli`] - The `statusgen` command line

pub mod cli;
pub mod prelude;

/// Status table parsing and validation.
pub mod schema {
    pub use statusgen_schema::*;
}

/// Code generation from status tables.
pub mod codegen {
    pub use statusgen_codegen::*;
}
