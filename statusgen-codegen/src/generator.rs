//! Target selection and dispatch.

use crate::options::CodegenOptions;
use crate::targets::{
    CHeaderGenerator, CSharpGenerator, CSourceGenerator, JavaGenerator, JsConstantsGenerator,
    LookupKind, RustGenerator, WidlGenerator,
};
use statusgen_schema::StatusTable;
use std::fmt;

/// Output formats the compiler can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// C header with the status enum.
    CHeader,
    /// C implementation of the to-string function.
    CSource,
    /// C implementation of the to-comment function.
    CommentSource,
    /// Java enum.
    Java,
    /// C# wrapper class.
    CSharp,
    /// C++ constant table for the JavaScript binding.
    JsConstants,
    /// WIDL interface fragment.
    Widl,
    /// Rust enum.
    Rust,
}

impl Target {
    /// All targets in emission order.
    pub const ALL: [Target; 8] = [
        Target::CHeader,
        Target::CSource,
        Target::CommentSource,
        Target::Java,
        Target::CSharp,
        Target::JsConstants,
        Target::Widl,
        Target::Rust,
    ];

    /// Short name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Target::CHeader => "c-header",
            Target::CSource => "c-source",
            Target::CommentSource => "comment-source",
            Target::Java => "java",
            Target::CSharp => "csharp",
            Target::JsConstants => "js-constants",
            Target::Widl => "widl",
            Target::Rust => "rust",
        }
    }

    /// Whether the output contains a to-string function with the unknown
    /// code fallback.
    #[must_use]
    pub const fn has_text_lookup(self) -> bool {
        matches!(
            self,
            Target::CSource | Target::CommentSource | Target::Java | Target::CSharp | Target::Rust
        )
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Renders a status table for any target.
pub struct Generator<'a> {
    table: &'a StatusTable,
    options: &'a CodegenOptions,
}

impl<'a> Generator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(table: &'a StatusTable, options: &'a CodegenOptions) -> Self {
        Self { table, options }
    }

    /// Generates the output for one target.
    #[must_use]
    pub fn generate(&self, target: Target) -> String {
        let (table, options) = (self.table, self.options);
        match target {
            Target::CHeader => CHeaderGenerator::new(table, options).generate(),
            Target::CSource => CSourceGenerator::new(table, options, LookupKind::Text).generate(),
            Target::CommentSource => {
                CSourceGenerator::new(table, options, LookupKind::Comment).generate()
            }
            Target::Java => JavaGenerator::new(table, options).generate(),
            Target::CSharp => CSharpGenerator::new(table, options).generate(),
            Target::JsConstants => JsConstantsGenerator::new(table, options).generate(),
            Target::Widl => WidlGenerator::new(table, options).generate(),
            Target::Rust => RustGenerator::new(table, options).generate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::to_pascal_case;
    use regex::Regex;
    use statusgen_schema::parse_table;

    const TABLE: &str = r#"<status_block>
        <offset>0x0</offset>
        <status name="ER_OK" value="0x0" comment="Success"/>
        <status name="ER_FAIL" value="0x1" comment="Failure"/>
        <offset>0x9000</offset>
        <status name="ER_BUS_READ_ERROR" value="0x9000" comment="Read error"/>
        <status name="ER_BUS_WRITE_ERROR" value="0x9001" comment="Write error"/>
    </status_block>"#;

    fn table() -> StatusTable {
        parse_table(TABLE).unwrap()
    }

    /// Entry lines of a target as sorted `(name, value)` pairs. The C
    /// lookups only name their cases, so their value is the table value of
    /// that name.
    fn entry_pairs(target: Target, output: &str, table: &StatusTable) -> Vec<(String, u32)> {
        let pattern = match target {
            Target::CHeader => r"(?m)^    (\w+) = (0x[0-9a-f]+),? /\*\*<",
            Target::CSource | Target::CommentSource => r"(?m)^        case (\w+): return ",
            Target::Java => r"(?m)^    (\w+)\((0x[0-9a-f]+)\)[,;]$",
            Target::CSharp => r"public static readonly QStatus (\w+) = new QStatus\((0x[0-9a-f]+)\);",
            Target::JsConstants => r#"CONSTANT\("(\w+)", (0x[0-9a-f]+)\);"#,
            Target::Widl => r"const unsigned long (\w+) = (0x[0-9a-f]+);",
            Target::Rust => r"(?m)^    (\w+) = (0x[0-9a-f]+),$",
        };
        let re = Regex::new(pattern).unwrap();

        let mut pairs: Vec<(String, u32)> = re
            .captures_iter(output)
            .map(|caps| {
                let name = caps[1].to_string();
                let value = match caps.get(2) {
                    Some(v) => u32::from_str_radix(&v.as_str()[2..], 16).unwrap(),
                    None => table.get(&name).unwrap().value,
                };
                (name, value)
            })
            .collect();
        pairs.sort();
        pairs
    }

    fn expected_pairs(target: Target, table: &StatusTable, options: &CodegenOptions) -> Vec<(String, u32)> {
        let mut pairs: Vec<(String, u32)> = table
            .into_iter()
            .map(|entry| {
                let name = match target {
                    Target::CHeader | Target::CSource | Target::CommentSource => entry.name.clone(),
                    Target::Rust => to_pascal_case(entry.short_name(&options.strip_prefix)),
                    _ => entry.short_name(&options.strip_prefix).to_string(),
                };
                (name, entry.value)
            })
            .collect();
        pairs.sort();
        pairs
    }

    #[test]
    fn test_every_target_has_the_same_entries() {
        let table = table();
        let options = CodegenOptions::default();
        let generator = Generator::new(&table, &options);

        for target in Target::ALL {
            let output = generator.generate(target);
            assert_eq!(
                entry_pairs(target, &output, &table),
                expected_pairs(target, &table, &options),
                "{target} entries differ from the table"
            );
        }
    }

    #[test]
    fn test_output_is_deterministic() {
        let first = table();
        let second = table();
        let options = CodegenOptions::default().namespace("ajn");

        for target in Target::ALL {
            assert_eq!(
                Generator::new(&first, &options).generate(target),
                Generator::new(&second, &options).generate(target),
                "{target} output differs between runs"
            );
        }
    }

    #[test]
    fn test_text_lookups_have_fallback() {
        let table = table();
        let options = CodegenOptions::default();
        let generator = Generator::new(&table, &options);

        for target in Target::ALL.into_iter().filter(|t| t.has_text_lookup()) {
            let output = generator.generate(target);
            assert!(output.contains("<unknown>: 0x"), "{target} has no fallback");
        }
    }

    #[test]
    fn test_two_entry_scenario() {
        let table = parse_table(
            r#"<status_block>
                <status name="ER_OK" value="0" comment="Success"/>
                <status name="ER_FAIL" value="1" comment="Failure"/>
            </status_block>"#,
        )
        .unwrap();
        let options = CodegenOptions::default();
        let generator = Generator::new(&table, &options);

        let header = generator.generate(Target::CHeader);
        assert!(header.contains("ER_OK = 0x0,"));
        assert!(header.contains("ER_FAIL = 0x1 "));

        let source = generator.generate(Target::CSource);
        assert!(source.contains("case ER_OK: return \"ER_OK\";"));
        assert!(source.contains("case ER_FAIL: return \"ER_FAIL\";"));

        let java = generator.generate(Target::Java);
        assert!(java.contains("OK(0x0),"));
        assert!(java.contains("FAIL(0x1);"));
        assert!(java.contains("private Status(int errorCode)"));
    }
}
