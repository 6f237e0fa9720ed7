//! Error types for status table parsing and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for status table parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Attribute syntax error.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Invalid character or entity reference in attribute text.
    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on element '{element}'")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// Included document could not be found.
    #[error("cannot resolve include '{href}' ({path}): {source}")]
    IncludeNotFound {
        /// The `href` attribute as written.
        href: String,
        /// Path the href resolved to.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// An include element was found while parsing a standalone string.
    #[error("include of '{href}' requires a compile session")]
    IncludeWithoutSession {
        /// The `href` attribute as written.
        href: String,
    },

    /// Invalid document structure.
    #[error("invalid document structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// Error inside a specific document.
    #[error("{path}: {source}")]
    InDocument {
        /// Document the error occurred in.
        path: PathBuf,
        /// Underlying error.
        source: Box<ParseError>,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Error type for status table validation.
#[derive(Debug, Error)]
pub enum TableError {
    /// Two entries share a name.
    #[error("duplicate status name '{name}' (values {first:#x} and {second:#x})")]
    DuplicateName {
        /// Entry name.
        name: String,
        /// Value of the first occurrence.
        first: u32,
        /// Value of the second occurrence.
        second: u32,
    },

    /// Two entries share a value.
    #[error("duplicate status value {value:#x} ('{first}' and '{second}')")]
    DuplicateValue {
        /// Shared value.
        value: u32,
        /// Name of the first occurrence.
        first: String,
        /// Name of the second occurrence.
        second: String,
    },

    /// An entry lies below the offset declared for its block.
    #[error("status '{name}' value {value:#x} is below block offset {offset:#x}")]
    BelowOffset {
        /// Entry name.
        name: String,
        /// Entry value.
        value: u32,
        /// Active offset.
        offset: u32,
    },
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates an invalid structure error.
    pub fn structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }

    /// Attaches the document path to this error, unless it already has one.
    #[must_use]
    pub fn in_document(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::InDocument { .. } => self,
            other => Self::InDocument {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attr_message() {
        let err = ParseError::missing_attr("status", "name");
        assert_eq!(
            err.to_string(),
            "missing required attribute 'name' on element 'status'"
        );
    }

    #[test]
    fn test_in_document_wraps_once() {
        let err = ParseError::structure("boom")
            .in_document("a.xml")
            .in_document("b.xml");
        assert_eq!(err.to_string(), "a.xml: invalid document structure: boom");
    }

    #[test]
    fn test_table_error_hex_formatting() {
        let err = TableError::DuplicateValue {
            value: 0x90ea,
            first: "ER_A".to_string(),
            second: "ER_B".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "duplicate status value 0x90ea ('ER_A' and 'ER_B')"
        );
    }
}
