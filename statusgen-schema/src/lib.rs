//! # statusgen Schema
//!
//! Status table XML parser and type definitions.
//!
//! This crate provides:
//! - Parsing of `status_block` documents into an ordered table
//! - XInclude resolution with per-session deduplication
//! - Optional validation of names, values and block offsets

pub mod error;
pub mod include;
pub mod parser;
pub mod types;
pub mod validation;

pub use error::{ParseError, TableError};
pub use include::{IncludeSet, Visit};
pub use parser::{CompileSession, parse_table};
pub use types::{OffsetMarker, StatusEntry, StatusTable};
pub use validation::{ValidationMode, validate_table};
