//! Rust enum generation.

use crate::naming::{comment_text, hex, string_literal, to_pascal_case};
use crate::options::{CodegenOptions, GENERATED_BANNER};
use statusgen_schema::StatusTable;

/// Generator for a Rust `Status` enum with lookup helpers.
///
/// Rust discriminants must be unique, so a table with duplicate values only
/// produces compilable output after strict validation.
pub struct RustGenerator<'a> {
    table: &'a StatusTable,
    options: &'a CodegenOptions,
}

impl<'a> RustGenerator<'a> {
    /// Creates a new Rust generator.
    #[must_use]
    pub fn new(table: &'a StatusTable, options: &'a CodegenOptions) -> Self {
        Self { table, options }
    }

    /// Generates the module source.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        let strip = &self.options.strip_prefix;
        let variants: Vec<(String, &statusgen_schema::StatusEntry)> = self
            .table
            .entries()
            .iter()
            .map(|e| (to_pascal_case(e.short_name(strip)), e))
            .collect();

        output.push_str(GENERATED_BANNER);
        output.push_str("\n\n");

        output.push_str("/// Status codes returned by the library.\n");
        output.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]\n");
        output.push_str("#[repr(u32)]\n");
        output.push_str("pub enum Status {\n");
        for (variant, entry) in &variants {
            output.push_str(&format!("    /// {}\n", comment_text(&entry.comment)));
            output.push_str(&format!("    {} = {},\n", variant, hex(entry.value)));
        }
        output.push_str("}\n\n");

        output.push_str("impl Status {\n");
        output.push_str("    /// Looks up the status for a numeric code.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub const fn from_code(code: u32) -> Option<Self> {\n");
        output.push_str("        match code {\n");
        for (variant, entry) in &variants {
            output.push_str(&format!(
                "            {} => Some(Self::{}),\n",
                hex(entry.value),
                variant
            ));
        }
        output.push_str("            _ => None,\n        }\n    }\n\n");

        output.push_str("    /// Returns the numeric code.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub const fn code(self) -> u32 {\n        self as u32\n    }\n\n");

        output.push_str("    /// Returns the symbolic name.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub const fn name(self) -> &'static str {\n");
        output.push_str("        match self {\n");
        for (variant, entry) in &variants {
            output.push_str(&format!(
                "            Self::{} => {},\n",
                variant,
                string_literal(&entry.name)
            ));
        }
        output.push_str("        }\n    }\n\n");

        output.push_str("    /// Returns the description.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub const fn comment(self) -> &'static str {\n");
        output.push_str("        match self {\n");
        for (variant, entry) in &variants {
            output.push_str(&format!(
                "            Self::{} => {},\n",
                variant,
                string_literal(&entry.comment)
            ));
        }
        output.push_str("        }\n    }\n}\n\n");

        output.push_str("impl std::fmt::Display for Status {\n");
        output.push_str(
            "    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {\n",
        );
        output.push_str("        f.write_str(self.name())\n    }\n}\n\n");

        output.push_str("/// Returns the name of a numeric code, or a hex description if unknown.\n");
        output.push_str("#[must_use]\n");
        output.push_str("pub fn status_text(code: u32) -> String {\n");
        output.push_str("    match Status::from_code(code) {\n");
        output.push_str("        Some(status) => status.name().to_string(),\n");
        output.push_str("        None => format!(\"<unknown>: 0x{:04x}\", code),\n");
        output.push_str("    }\n}\n");

        output
    }
}
