//! Code generation options.

/// Format of the fallback text for codes missing from the table, as a
/// printf-style format string.
pub const UNKNOWN_FORMAT: &str = "<unknown>: 0x%04x";

/// Banner placed at the top of every generated file.
pub const GENERATED_BANNER: &str = "/* This file is auto-generated.  Do not modify. */";

/// Settings shared by all targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    /// Prefix injected into generated function symbols (`QCC_StatusText`).
    pub prefix: String,
    /// Prefix removed from entry names for Java, C#, scripting and WIDL.
    pub strip_prefix: String,
    /// C type name of the status enum.
    pub type_name: String,
    /// Namespace wrapping the C/C++ implementation outputs.
    pub namespace: Option<String>,
    /// Header file name included by the C implementation outputs.
    pub header_name: String,
    /// Java package of the generated enum.
    pub java_package: String,
    /// C# namespace of the generated class.
    pub csharp_namespace: String,
}

impl CodegenOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prefix: "QCC_".to_string(),
            strip_prefix: "ER_".to_string(),
            type_name: "QStatus".to_string(),
            namespace: None,
            header_name: "Status.h".to_string(),
            java_package: "status".to_string(),
            csharp_namespace: "Status".to_string(),
        }
    }

    /// Sets the symbol prefix.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the name prefix stripped for non-C targets.
    #[must_use]
    pub fn strip_prefix(mut self, strip: impl Into<String>) -> Self {
        self.strip_prefix = strip.into();
        self
    }

    /// Sets the C type name.
    #[must_use]
    pub fn type_name(mut self, name: impl Into<String>) -> Self {
        self.type_name = name.into();
        self
    }

    /// Sets the C++ namespace for implementation outputs.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Sets the header file name.
    #[must_use]
    pub fn header_name(mut self, name: impl Into<String>) -> Self {
        self.header_name = name.into();
        self
    }

    /// Sets the Java package.
    #[must_use]
    pub fn java_package(mut self, package: impl Into<String>) -> Self {
        self.java_package = package.into();
        self
    }

    /// Sets the C# namespace.
    #[must_use]
    pub fn csharp_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.csharp_namespace = namespace.into();
        self
    }

    /// Name of the generated to-string function.
    #[must_use]
    pub fn text_fn(&self) -> String {
        format!("{}StatusText", self.prefix)
    }

    /// Name of the generated to-comment function.
    #[must_use]
    pub fn comment_fn(&self) -> String {
        format!("{}StatusComment", self.prefix)
    }
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self::new()
    }
}
