//! C header and C/C++ implementation generation.

use crate::naming::{comment_text, hex, string_literal};
use crate::options::{CodegenOptions, GENERATED_BANNER, UNKNOWN_FORMAT};
use statusgen_schema::{StatusEntry, StatusTable};

/// Generator for the C header declaring the status enum.
pub struct CHeaderGenerator<'a> {
    table: &'a StatusTable,
    options: &'a CodegenOptions,
}

impl<'a> CHeaderGenerator<'a> {
    /// Creates a new header generator.
    #[must_use]
    pub fn new(table: &'a StatusTable, options: &'a CodegenOptions) -> Self {
        Self { table, options }
    }

    /// Generates the header.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        let type_name = &self.options.type_name;
        let guard = include_guard(&self.options.header_name);

        output.push_str(GENERATED_BANNER);
        output.push('\n');
        output.push_str("/**\n * @file\n");
        output.push_str(&format!(
            " * This file contains an enumerated list of values {} can return.\n */\n",
            type_name
        ));
        output.push_str(&format!("#ifndef {}\n#define {}\n\n", guard, guard));
        output.push_str("#ifdef __cplusplus\nextern \"C\" {\n#endif\n\n");

        output.push_str(&format!(
            "/**\n * Enumerated list of values {} can return.\n */\n",
            type_name
        ));
        output.push_str("typedef enum {\n");
        for (entry, last) in self.table.iter_with_last() {
            let comma = if last { "" } else { "," };
            output.push_str(&format!(
                "    {} = {}{} /**< {} */\n",
                entry.name,
                hex(entry.value),
                comma,
                comment_text(&entry.comment)
            ));
        }
        output.push_str(&format!("}} {};\n\n", type_name));

        output.push_str(&format!(
            "/**\n * Convert a status code to a C string.\n *\n \
             * @param status  Status code to be converted.\n *\n \
             * @return  C string representation of the status code.\n */\n\
             extern const char* {}({} status);\n\n",
            self.options.text_fn(),
            type_name
        ));
        output.push_str(&format!(
            "/**\n * Convert a status code to its description.\n *\n \
             * @param status  Status code to be described.\n *\n \
             * @return  Human readable description of the status code.\n */\n\
             extern const char* {}({} status);\n\n",
            self.options.comment_fn(),
            type_name
        ));

        output.push_str("#ifdef __cplusplus\n}\n#endif\n\n");
        output.push_str("#endif\n");

        output
    }
}

/// What the `switch` of a C implementation returns for each entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// The symbol name (`QCC_StatusText`).
    Text,
    /// The comment (`QCC_StatusComment`).
    Comment,
}

/// Generator for the C/C++ lookup implementation.
pub struct CSourceGenerator<'a> {
    table: &'a StatusTable,
    options: &'a CodegenOptions,
    kind: LookupKind,
}

impl<'a> CSourceGenerator<'a> {
    /// Creates a new implementation generator.
    #[must_use]
    pub fn new(table: &'a StatusTable, options: &'a CodegenOptions, kind: LookupKind) -> Self {
        Self {
            table,
            options,
            kind,
        }
    }

    /// Generates the implementation.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        let function = match self.kind {
            LookupKind::Text => self.options.text_fn(),
            LookupKind::Comment => self.options.comment_fn(),
        };

        output.push_str(GENERATED_BANNER);
        output.push('\n');
        output.push_str("#include <stdio.h>\n");
        output.push_str(&format!("#include \"{}\"\n\n", self.options.header_name));

        if let Some(ns) = &self.options.namespace {
            output.push_str(&format!("namespace {} {{\n\n", ns));
        }

        output.push_str(&format!(
            "const char* {}({} status)\n{{\n",
            function, self.options.type_name
        ));
        output.push_str("    static char code[32];\n\n");
        output.push_str("    switch (status) {\n");
        for entry in self.table {
            output.push_str(&format!(
                "        case {}: return {};\n",
                entry.name,
                self.returned(entry)
            ));
        }
        output.push_str("    default:\n");
        output.push_str(&format!(
            "        snprintf(code, sizeof(code), \"{}\", (unsigned int)status);\n",
            UNKNOWN_FORMAT
        ));
        output.push_str("        return code;\n");
        output.push_str("    }\n}\n");

        if let Some(ns) = &self.options.namespace {
            output.push_str(&format!("\n}} /* namespace {} */\n", ns));
        }

        output
    }

    fn returned(&self, entry: &StatusEntry) -> String {
        match self.kind {
            LookupKind::Text => string_literal(&entry.name),
            LookupKind::Comment => string_literal(&entry.comment),
        }
    }
}

/// Derives an include guard from a header file name.
fn include_guard(header_name: &str) -> String {
    let file = header_name.rsplit(['/', '\\']).next().unwrap_or(header_name);
    let mut guard = String::from("_");
    guard.extend(file.chars().map(|c| {
        if c.is_ascii_alphanumeric() {
            c.to_ascii_uppercase()
        } else {
            '_'
        }
    }));
    guard
}
