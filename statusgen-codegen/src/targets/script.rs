//! Scripting-binding constant table and WIDL generation.

use crate::naming::{comment_text, hex, string_literal};
use crate::options::{CodegenOptions, GENERATED_BANNER};
use statusgen_schema::StatusTable;

/// Generator for the C++ constant table behind the JavaScript binding.
pub struct JsConstantsGenerator<'a> {
    table: &'a StatusTable,
    options: &'a CodegenOptions,
}

impl<'a> JsConstantsGenerator<'a> {
    /// Creates a new constant table generator.
    #[must_use]
    pub fn new(table: &'a StatusTable, options: &'a CodegenOptions) -> Self {
        Self { table, options }
    }

    /// Generates the constant table source.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        let strip = &self.options.strip_prefix;

        output.push_str(GENERATED_BANNER);
        output.push('\n');
        output.push_str("#include \"StatusInterface.h\"\n\n");

        if let Some(ns) = &self.options.namespace {
            output.push_str(&format!("namespace {} {{\n\n", ns));
        }

        output.push_str("std::map<qcc::String, int32_t> StatusInterface::constants;\n\n");
        output.push_str("std::map<qcc::String, int32_t>& StatusInterface::Constants()\n{\n");
        output.push_str("    if (constants.empty()) {\n");
        for entry in self.table {
            output.push_str(&format!(
                "        CONSTANT({}, {});\n",
                string_literal(entry.short_name(strip)),
                hex(entry.value)
            ));
        }
        output.push_str("    }\n    return constants;\n}\n");

        if let Some(ns) = &self.options.namespace {
            output.push_str(&format!("\n}} /* namespace {} */\n", ns));
        }

        output
    }
}

/// Generator for the WIDL interface fragment.
pub struct WidlGenerator<'a> {
    table: &'a StatusTable,
    options: &'a CodegenOptions,
}

impl<'a> WidlGenerator<'a> {
    /// Creates a new WIDL generator.
    #[must_use]
    pub fn new(table: &'a StatusTable, options: &'a CodegenOptions) -> Self {
        Self { table, options }
    }

    /// Generates the WIDL fragment.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        let strip = &self.options.strip_prefix;

        output.push_str(GENERATED_BANNER);
        output.push_str("\n\n/**\n * Status codes returned by the library.\n */\n");
        output.push_str("interface Status {\n");
        for entry in self.table {
            output.push_str(&format!("    /** {} */\n", comment_text(&entry.comment)));
            output.push_str(&format!(
                "    const unsigned long {} = {};\n",
                entry.short_name(strip),
                hex(entry.value)
            ));
        }
        output.push_str("};\n");

        output
    }
}
