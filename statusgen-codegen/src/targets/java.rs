//! Java enum generation.

use crate::naming::{comment_text, hex};
use crate::options::{CodegenOptions, GENERATED_BANNER};
use statusgen_schema::StatusTable;

/// Generator for the Java `Status` enum.
pub struct JavaGenerator<'a> {
    table: &'a StatusTable,
    options: &'a CodegenOptions,
}

impl<'a> JavaGenerator<'a> {
    /// Creates a new Java generator.
    #[must_use]
    pub fn new(table: &'a StatusTable, options: &'a CodegenOptions) -> Self {
        Self { table, options }
    }

    /// Generates the enum source.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        let strip = &self.options.strip_prefix;

        output.push_str(GENERATED_BANNER);
        output.push_str("\n\n");
        output.push_str(&format!("package {};\n\n", self.options.java_package));
        output.push_str("/**\n * Standard function return codes for this package.\n */\n");
        output.push_str("public enum Status {\n\n");

        for (entry, last) in self.table.iter_with_last() {
            let value = hex(entry.value);
            output.push_str(&format!(
                "    /** <b><tt>{}</tt></b> {} */\n",
                value,
                comment_text(&entry.comment)
            ));
            let terminator = if last { ';' } else { ',' };
            output.push_str(&format!(
                "    {}({}){}\n",
                entry.short_name(strip),
                value,
                terminator
            ));
        }
        if self.table.is_empty() {
            output.push_str("    ;\n");
        }

        output.push_str(
            r#"
    /** Error Code */
    private int errorCode;

    /** Constructor */
    private Status(int errorCode) {
        this.errorCode = errorCode;
    }

    /**
     * Looks up the constant for a numeric error code.
     *
     * @param errorCode the numeric error code
     * @return the matching constant, or null if the code is unknown
     */
    public static Status create(int errorCode) {
        for (Status s : Status.values()) {
            if (s.getErrorCode() == errorCode) {
                return s;
            }
        }
        return null;
    }

    /**
     * Gets the name of a numeric error code.
     *
     * @param errorCode the numeric error code
     * @return the constant name, or a hex description if the code is unknown
     */
    public static String text(int errorCode) {
        Status s = create(errorCode);
        if (s != null) {
            return s.name();
        }
        return String.format("<unknown>: 0x%04x", errorCode);
    }

    /**
     * Gets the numeric error code.
     *
     * @return the numeric error code
     */
    public int getErrorCode() { return errorCode; }
}
"#,
        );

        output
    }
}
