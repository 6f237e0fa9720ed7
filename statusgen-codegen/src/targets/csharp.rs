//! C# status class generation.

use crate::naming::{comment_text, hex, string_literal};
use crate::options::{CodegenOptions, GENERATED_BANNER};
use statusgen_schema::StatusTable;

/// Generator for the C# wrapper class.
pub struct CSharpGenerator<'a> {
    table: &'a StatusTable,
    options: &'a CodegenOptions,
}

impl<'a> CSharpGenerator<'a> {
    /// Creates a new C# generator.
    #[must_use]
    pub fn new(table: &'a StatusTable, options: &'a CodegenOptions) -> Self {
        Self { table, options }
    }

    /// Generates the class source.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        let class = &self.options.type_name;
        let strip = &self.options.strip_prefix;
        let ok = self.ok_test();

        output.push_str(GENERATED_BANNER);
        output.push_str("\n\nusing System;\n\n");
        output.push_str(&format!("namespace {}\n{{\n", self.options.csharp_namespace));
        output.push_str(&format!(
            "\t/// <summary>Enumerated list of values {} can return.</summary>\n",
            class
        ));
        output.push_str(&format!("\tpublic class {}\n\t{{\n", class));
        output.push_str(&format!(
            "\t\tprivate {}(int x)\n\t\t{{\n\t\t\tvalue = x;\n\t\t}}\n\n",
            class
        ));
        output.push_str(&format!(
            "\t\tpublic static implicit operator {0}(int x)\n\t\t{{\n\t\t\treturn new {0}(x);\n\t\t}}\n\n",
            class
        ));
        output.push_str(&format!(
            "\t\tpublic static implicit operator int({} x)\n\t\t{{\n\t\t\treturn x.value;\n\t\t}}\n\n",
            class
        ));
        output.push_str(&format!(
            "\t\tpublic static bool operator true({} x)\n\t\t{{\n\t\t\treturn {};\n\t\t}}\n\n",
            class, ok
        ));
        output.push_str(&format!(
            "\t\tpublic static bool operator false({} x)\n\t\t{{\n\t\t\treturn !({});\n\t\t}}\n\n",
            class, ok
        ));
        output.push_str(&format!(
            "\t\tpublic static bool operator !({} x)\n\t\t{{\n\t\t\treturn !({});\n\t\t}}\n\n",
            class, ok
        ));
        output.push_str(&format!(
            "\t\tpublic static implicit operator string({} x)\n\t\t{{\n\t\t\treturn x.value.ToString();\n\t\t}}\n\n",
            class
        ));
        output.push_str(&format!(
            "\t\tpublic static bool operator ==({0} x, {0} y)\n\t\t{{\n\t\t\treturn x.value == y.value;\n\t\t}}\n\n",
            class
        ));
        output.push_str(&format!(
            "\t\tpublic static bool operator !=({0} x, {0} y)\n\t\t{{\n\t\t\treturn x.value != y.value;\n\t\t}}\n\n",
            class
        ));
        output.push_str(&format!(
            "\t\tpublic override bool Equals(object o)\n\t\t{{\n\t\t\t{0} other = o as {0};\n\t\t\treturn !ReferenceEquals(other, null) && other.value == value;\n\t\t}}\n\n",
            class
        ));
        output.push_str("\t\tpublic override int GetHashCode()\n\t\t{\n\t\t\treturn value;\n\t\t}\n\n");
        output.push_str(
            "\t\tpublic override string ToString()\n\t\t{\n\t\t\treturn StatusText(value);\n\t\t}\n\n",
        );

        output.push_str("\t\t/// <summary>Gets the name of a numeric status code.</summary>\n");
        output.push_str("\t\tpublic static string StatusText(int x)\n\t\t{\n");
        output.push_str("\t\t\tswitch (x)\n\t\t\t{\n");
        for entry in self.table {
            output.push_str(&format!(
                "\t\t\tcase {}: return {};\n",
                hex(entry.value),
                string_literal(entry.short_name(strip))
            ));
        }
        output.push_str(
            "\t\t\tdefault: return string.Format(\"<unknown>: 0x{0:x4}\", x);\n\t\t\t}\n\t\t}\n\n",
        );

        output.push_str("\t\tinternal int value;\n\n");

        for entry in self.table {
            output.push_str(&format!("\t\t/// {}\n", comment_text(&entry.comment)));
            output.push_str(&format!(
                "\t\tpublic static readonly {0} {1} = new {0}({2});\n",
                class,
                entry.short_name(strip),
                hex(entry.value)
            ));
        }

        output.push_str("\t}\n}\n");

        output
    }

    /// Expression that is true when `x` is the success status.
    ///
    /// Compares against the `OK` member when the table defines one, otherwise
    /// against zero.
    fn ok_test(&self) -> String {
        let name = format!("{}OK", self.options.strip_prefix);
        match self.table.get(&name) {
            Some(entry) => format!("x == {}", entry.short_name(&self.options.strip_prefix)),
            None => "x.value == 0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statusgen_schema::parse_table;

    #[test]
    fn test_generate_class() {
        let table = parse_table(
            r#"<status_block>
                <status name="ER_OK" value="0x0" comment="Success"/>
                <status name="ER_BUS_NO_SUCH_MESSAGE" value="0x90ee" comment="Message not found"/>
            </status_block>"#,
        )
        .unwrap();
        let options = CodegenOptions::default().csharp_namespace("Bindings");
        let output = CSharpGenerator::new(&table, &options).generate();

        assert!(output.contains("namespace Bindings\n{"));
        assert!(output.contains("\t\t/// Success\n\t\tpublic static readonly QStatus OK = new QStatus(0x0);"));
        assert!(output.contains(
            "public static readonly QStatus BUS_NO_SUCH_MESSAGE = new QStatus(0x90ee);"
        ));
        assert!(output.contains("case 0x90ee: return \"BUS_NO_SUCH_MESSAGE\";"));
        assert!(output.contains("string.Format(\"<unknown>: 0x{0:x4}\", x)"));
        assert!(output.contains(
            "public static bool operator true(QStatus x)\n\t\t{\n\t\t\treturn x == OK;"
        ));
        assert!(output.contains(
            "public static bool operator false(QStatus x)\n\t\t{\n\t\t\treturn !(x == OK);"
        ));
        assert!(output.contains(
            "public static bool operator !(QStatus x)\n\t\t{\n\t\t\treturn !(x == OK);"
        ));
        assert!(output.contains(
            "public static implicit operator string(QStatus x)\n\t\t{\n\t\t\treturn x.value.ToString();"
        ));
    }

    #[test]
    fn test_success_operators_without_ok_member() {
        let table = parse_table(
            r#"<status_block><status name="AJ_FAIL" value="0x1"/></status_block>"#,
        )
        .unwrap();
        let options = CodegenOptions::default().strip_prefix("AJ_");
        let output = CSharpGenerator::new(&table, &options).generate();

        assert!(output.contains("public static bool operator true(QStatus x)\n\t\t{\n\t\t\treturn x.value == 0;"));
        assert!(!output.contains("x == OK"));
    }
}
