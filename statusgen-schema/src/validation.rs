//! Status table validation.
//!
//! The parser accepts duplicate names, duplicate values and entries that lie
//! below their block's `offset`. Validation reports these either as
//! diagnostics (lenient) or as a hard error (strict).

use crate::error::TableError;
use crate::types::StatusTable;
use std::collections::HashMap;

/// How validation findings are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Findings are returned as diagnostics.
    #[default]
    Lenient,
    /// The first finding is returned as an error.
    Strict,
}

/// Validates a flattened table.
///
/// # Arguments
/// * `table` - The table to validate
/// * `mode` - Lenient or strict handling of findings
///
/// # Returns
/// All findings in document order (always empty in strict mode).
///
/// # Errors
/// In strict mode, returns the first `TableError` found.
pub fn validate_table(
    table: &StatusTable,
    mode: ValidationMode,
) -> Result<Vec<TableError>, TableError> {
    let mut findings = Vec::new();
    let mut report = |finding: TableError| -> Result<(), TableError> {
        match mode {
            ValidationMode::Strict => Err(finding),
            ValidationMode::Lenient => {
                findings.push(finding);
                Ok(())
            }
        }
    };

    let mut seen_names: HashMap<&str, u32> = HashMap::new();
    let mut seen_values: HashMap<u32, &str> = HashMap::new();
    let mut offsets = table.offsets().iter().peekable();
    let mut active_offset: Option<u32> = None;

    for (index, entry) in table.entries().iter().enumerate() {
        while let Some(marker) = offsets.next_if(|m| m.entry_index <= index) {
            active_offset = Some(marker.value);
        }

        if let Some(&first) = seen_names.get(entry.name.as_str()) {
            report(TableError::DuplicateName {
                name: entry.name.clone(),
                first,
                second: entry.value,
            })?;
        } else {
            seen_names.insert(&entry.name, entry.value);
        }

        if let Some(&first) = seen_values.get(&entry.value) {
            report(TableError::DuplicateValue {
                value: entry.value,
                first: first.to_string(),
                second: entry.name.clone(),
            })?;
        } else {
            seen_values.insert(entry.value, &entry.name);
        }

        if let Some(offset) = active_offset {
            if entry.value < offset {
                report(TableError::BelowOffset {
                    name: entry.name.clone(),
                    value: entry.value,
                    offset,
                })?;
            }
        }
    }

    Ok(findings)
}
