//! Status table XML parser.
//!
//! This module parses `status_block` documents into a flattened
//! [`StatusTable`]. Standalone strings are handled by [`parse_table`];
//! documents that use XInclude go through a [`CompileSession`], which owns
//! the visited set and the table under construction.

use crate::error::ParseError;
use crate::include::{IncludeSet, Visit, XINCLUDE_NS};
use crate::types::{StatusEntry, StatusTable, parse_number};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::{Path, PathBuf};

/// Parses a single status table document from a string.
///
/// # Arguments
/// * `xml` - XML document content
///
/// # Returns
/// Parsed table or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed, an entry is invalid, or the
/// document contains an include (includes need a [`CompileSession`]).
pub fn parse_table(xml: &str) -> Result<StatusTable, ParseError> {
    let mut table = StatusTable::new();
    parse_into(xml, &mut table, &mut |href: &str, _: &mut StatusTable| {
        Err(ParseError::IncludeWithoutSession {
            href: href.to_string(),
        })
    })?;
    Ok(table)
}

/// One compiler invocation over a set of root documents.
#[derive(Debug, Default)]
pub struct CompileSession {
    base: Option<PathBuf>,
    visited: IncludeSet,
    table: StatusTable,
}

impl CompileSession {
    /// Creates a new session.
    ///
    /// `base` is the directory include `href`s are resolved against. Without
    /// one, each include resolves relative to the document containing it.
    #[must_use]
    pub fn new(base: Option<PathBuf>) -> Self {
        Self {
            base,
            visited: IncludeSet::new(),
            table: StatusTable::new(),
        }
    }

    /// Sets the include base directory.
    #[must_use]
    pub fn base(mut self, base: impl Into<PathBuf>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Parses a root document and everything it includes, appending the
    /// entries to the session table.
    ///
    /// # Errors
    /// Returns `ParseError` if the document or any include cannot be read or
    /// parsed.
    pub fn add_document(&mut self, path: impl AsRef<Path>) -> Result<(), ParseError> {
        let path = path.as_ref();
        let canonical =
            std::fs::canonicalize(path).map_err(|e| ParseError::from(e).in_document(path))?;

        if self.visited.mark(&canonical) == Visit::Repeat {
            tracing::debug!("Skipping already visited document {}", canonical.display());
            return Ok(());
        }

        let mut table = std::mem::take(&mut self.table);
        let result = self.parse_file(&canonical, &mut table);
        self.table = table;
        result
    }

    /// Returns the visited set.
    #[must_use]
    pub fn visited(&self) -> &IncludeSet {
        &self.visited
    }

    /// Consumes the session and returns the flattened table.
    #[must_use]
    pub fn finish(self) -> StatusTable {
        self.table
    }

    fn parse_file(&mut self, path: &Path, table: &mut StatusTable) -> Result<(), ParseError> {
        tracing::debug!("Parsing status document {}", path.display());
        let xml = std::fs::read_to_string(path).map_err(|e| ParseError::from(e).in_document(path))?;
        table.push_source(path);

        let base = match &self.base {
            Some(base) => base.clone(),
            None => path.parent().map(Path::to_path_buf).unwrap_or_default(),
        };

        parse_into(&xml, table, &mut |href: &str, table: &mut StatusTable| {
            self.include(&base, href, table)
        })
        .map_err(|e| e.in_document(path))
    }

    fn include(
        &mut self,
        base: &Path,
        href: &str,
        table: &mut StatusTable,
    ) -> Result<(), ParseError> {
        let path = IncludeSet::resolve(base, href)?;
        match self.visited.mark(&path) {
            Visit::First => self.parse_file(&path, table),
            Visit::Repeat => {
                tracing::debug!("Include {} already processed, skipping", path.display());
                Ok(())
            }
        }
    }
}

/// In-scope namespace prefix bindings.
#[derive(Debug, Default)]
struct Namespaces {
    /// One frame per open element: (prefix, uri). Empty prefix is the default
    /// namespace.
    frames: Vec<Vec<(String, String)>>,
}

impl Namespaces {
    fn push(&mut self, bindings: Vec<(String, String)>) {
        self.frames.push(bindings);
    }

    fn pop(&mut self) {
        self.frames.pop();
    }

    fn resolve(&self, prefix: &str) -> Option<&str> {
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter())
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }
}

/// Attributes of one element, decoded and unescaped.
struct Attributes {
    values: Vec<(String, String)>,
}

impl Attributes {
    fn read(e: &BytesStart<'_>) -> Result<Self, ParseError> {
        let mut values = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?;
            let raw = std::str::from_utf8(&attr.value)?;
            let value = quick_xml::escape::unescape(raw)?;
            values.push((key.to_string(), value.into_owned()));
        }
        Ok(Self { values })
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn namespace_bindings(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .filter_map(|(k, v)| {
                if k == "xmlns" {
                    Some((String::new(), v.clone()))
                } else {
                    k.strip_prefix("xmlns:").map(|p| (p.to_string(), v.clone()))
                }
            })
            .collect()
    }
}

/// Parses one document, appending entries to `table` and calling
/// `on_include` for each XInclude element at its position in the document.
fn parse_into<F>(xml: &str, table: &mut StatusTable, on_include: &mut F) -> Result<(), ParseError>
where
    F: FnMut(&str, &mut StatusTable) -> Result<(), ParseError>,
{
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut skip = Vec::new();
    let mut namespaces = Namespaces::default();
    let mut depth: usize = 0;
    let mut seen_root = false;
    let mut in_offset = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                seen_root = true;
                let attrs = Attributes::read(e)?;
                namespaces.push(attrs.namespace_bindings());
                match handle_element(e, &attrs, &namespaces, table, on_include)? {
                    ElementKind::Include => {
                        // Children of an include (xi:fallback) never reach the table.
                        reader.read_to_end_into(e.name(), &mut skip)?;
                        skip.clear();
                        namespaces.pop();
                    }
                    kind => {
                        depth += 1;
                        in_offset = kind == ElementKind::Offset;
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                seen_root = true;
                let attrs = Attributes::read(e)?;
                namespaces.push(attrs.namespace_bindings());
                let result = handle_element(e, &attrs, &namespaces, table, on_include);
                namespaces.pop();
                if result? == ElementKind::Offset {
                    return Err(ParseError::invalid_attr("offset", "value", ""));
                }
            }
            Ok(Event::Text(ref t)) if in_offset => {
                let text = std::str::from_utf8(t.as_ref())?.trim();
                let value =
                    parse_number(text).ok_or_else(|| ParseError::invalid_attr("offset", "value", text))?;
                table.push_offset(value);
                in_offset = false;
            }
            Ok(Event::End(_)) => {
                if in_offset {
                    return Err(ParseError::invalid_attr("offset", "value", ""));
                }
                depth = depth.saturating_sub(1);
                namespaces.pop();
                in_offset = false;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if depth != 0 {
        return Err(ParseError::structure("unexpected end of document inside element"));
    }
    if !seen_root {
        return Err(ParseError::structure("document has no root element"));
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum ElementKind {
    Block,
    Status,
    Offset,
    Include,
    Other,
}

fn handle_element<F>(
    e: &BytesStart<'_>,
    attrs: &Attributes,
    namespaces: &Namespaces,
    table: &mut StatusTable,
    on_include: &mut F,
) -> Result<ElementKind, ParseError>
where
    F: FnMut(&str, &mut StatusTable) -> Result<(), ParseError>,
{
    let name_bytes = e.name().as_ref().to_vec();
    let qname = std::str::from_utf8(&name_bytes)?;
    let (prefix, local) = qname.split_once(':').unwrap_or(("", qname));

    let kind = match local {
        "include" if namespaces.resolve(prefix) == Some(XINCLUDE_NS) => ElementKind::Include,
        "status_block" => ElementKind::Block,
        "status" => ElementKind::Status,
        "offset" => ElementKind::Offset,
        _ => ElementKind::Other,
    };

    match kind {
        ElementKind::Status => table.push(parse_status(attrs)?),
        ElementKind::Include => {
            let href = attrs
                .get("href")
                .ok_or_else(|| ParseError::missing_attr(qname, "href"))?;
            on_include(href, table)?;
        }
        ElementKind::Other if local == "include" => {
            tracing::warn!("Ignoring <{}> outside the XInclude namespace", qname);
        }
        _ => {}
    }

    Ok(kind)
}

/// Parses the attributes of a `status` element.
fn parse_status(attrs: &Attributes) -> Result<StatusEntry, ParseError> {
    let name = attrs
        .get("name")
        .ok_or_else(|| ParseError::missing_attr("status", "name"))?;
    let raw_value = attrs
        .get("value")
        .ok_or_else(|| ParseError::missing_attr("status", "value"))?;
    let value =
        parse_number(raw_value).ok_or_else(|| ParseError::invalid_attr("status", "value", raw_value))?;
    let comment = attrs.get("comment").unwrap_or_default();

    Ok(StatusEntry::new(name, value, comment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SIMPLE_TABLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<status_block>
    <offset>0x0000</offset>
    <status value="0x0000" name="ER_OK" comment="Success"/>
    <status value="0x0001" name="ER_FAIL" comment="Failure"/>
    <status value="2" name="ER_ESCAPED" comment="a &lt;b&gt; &amp; &quot;c&quot;"/>
</status_block>"#;

    const XI: &str = r#"xmlns:xi="http://www.w3.org/2001/XInclude""#;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    fn names(table: &StatusTable) -> Vec<&str> {
        table.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_parse_simple_table() {
        let table = parse_table(SIMPLE_TABLE).expect("Failed to parse table");

        assert_eq!(names(&table), vec!["ER_OK", "ER_FAIL", "ER_ESCAPED"]);
        assert_eq!(table.get("ER_FAIL").unwrap().value, 1);
        assert_eq!(table.get("ER_OK").unwrap().comment, "Success");
        assert_eq!(table.get("ER_ESCAPED").unwrap().comment, r#"a <b> & "c""#);
        assert_eq!(table.offsets().len(), 1);
        assert_eq!(table.offsets()[0].value, 0);
    }

    #[test]
    fn test_nested_blocks_keep_document_order() {
        let xml = r#"<status_block>
            <status value="0x1" name="ER_A" comment=""/>
            <status_block>
                <offset>0x9000</offset>
                <status value="0x9000" name="ER_B" comment=""/>
            </status_block>
            <status value="0x2" name="ER_C"/>
        </status_block>"#;
        let table = parse_table(xml).unwrap();

        assert_eq!(names(&table), vec!["ER_A", "ER_B", "ER_C"]);
        assert_eq!(table.offsets()[0].value, 0x9000);
        assert_eq!(table.offsets()[0].entry_index, 1);
        assert_eq!(table.get("ER_C").unwrap().comment, "");
    }

    #[test]
    fn test_missing_name() {
        let xml = r#"<status_block><status value="1"/></status_block>"#;
        let err = parse_table(xml).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingAttribute { ref attribute, .. } if attribute == "name"
        ));
    }

    #[test]
    fn test_invalid_value() {
        let xml = r#"<status_block><status name="ER_X" value="0xZZ"/></status_block>"#;
        let err = parse_table(xml).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidAttribute { ref value, .. } if value == "0xZZ"
        ));
    }

    #[test]
    fn test_invalid_offset() {
        let xml = r#"<status_block><offset>nope</offset></status_block>"#;
        assert!(parse_table(xml).is_err());
    }

    #[test]
    fn test_empty_offset() {
        for xml in [
            "<status_block><offset/></status_block>",
            "<status_block><offset></offset></status_block>",
            "<status_block><offset>  </offset></status_block>",
        ] {
            let err = parse_table(xml).unwrap_err();
            assert!(
                matches!(err, ParseError::InvalidAttribute { ref value, .. } if value.is_empty()),
                "{xml}: {err}"
            );
        }
    }

    #[test]
    fn test_malformed_xml() {
        assert!(parse_table("<status_block><status name='a' value='1'></status_block>").is_err());
        assert!(parse_table("<status_block>").is_err());
        assert!(parse_table("").is_err());
    }

    #[test]
    fn test_include_without_session() {
        let xml = format!(r#"<status_block {XI}><xi:include href="b.xml"/></status_block>"#);
        let err = parse_table(&xml).unwrap_err();
        assert!(matches!(err, ParseError::IncludeWithoutSession { .. }));
    }

    #[test]
    fn test_include_outside_namespace_is_ignored() {
        let xml = r#"<status_block><include href="b.xml"/>
            <status name="ER_OK" value="0"/></status_block>"#;
        let table = parse_table(xml).unwrap();
        assert_eq!(names(&table), vec!["ER_OK"]);
    }

    #[test]
    fn test_include_chain_splices_in_place() {
        let dir = TempDir::new().unwrap();
        let a = write(
            dir.path(),
            "a.xml",
            &format!(
                r#"<status_block {XI}>
                    <status name="ER_A1" value="1"/>
                    <xi:include href="b.xml"/>
                    <status name="ER_A2" value="2"/>
                </status_block>"#
            ),
        );
        write(
            dir.path(),
            "b.xml",
            &format!(
                r#"<status_block {XI}>
                    <status name="ER_B1" value="10"/>
                    <xi:include href="c.xml"/>
                </status_block>"#
            ),
        );
        write(
            dir.path(),
            "c.xml",
            r#"<status_block><status name="ER_C1" value="20"/></status_block>"#,
        );

        let mut session = CompileSession::new(None);
        session.add_document(&a).unwrap();
        assert_eq!(session.visited().len(), 3);

        let table = session.finish();
        assert_eq!(names(&table), vec!["ER_A1", "ER_B1", "ER_C1", "ER_A2"]);
        assert_eq!(table.sources().count(), 3);
    }

    #[test]
    fn test_include_fallback_is_skipped() {
        let dir = TempDir::new().unwrap();
        let a = write(
            dir.path(),
            "a.xml",
            &format!(
                r#"<status_block {XI}>
                    <xi:include href="b.xml">
                        <xi:fallback><status name="ER_FALLBACK" value="9"/></xi:fallback>
                    </xi:include>
                    <status name="ER_AFTER" value="3"/>
                </status_block>"#
            ),
        );
        write(
            dir.path(),
            "b.xml",
            r#"<status_block><status name="ER_B" value="2"/></status_block>"#,
        );

        let mut session = CompileSession::new(None);
        session.add_document(&a).unwrap();
        assert_eq!(names(&session.finish()), vec!["ER_B", "ER_AFTER"]);
    }

    #[test]
    fn test_repeated_and_cyclic_includes_visit_once() {
        let dir = TempDir::new().unwrap();
        let a = write(
            dir.path(),
            "a.xml",
            &format!(
                r#"<status_block {XI}>
                    <xi:include href="b.xml"/>
                    <xi:include href="b.xml"/>
                    <status name="ER_A" value="1"/>
                </status_block>"#
            ),
        );
        write(
            dir.path(),
            "b.xml",
            &format!(
                r#"<status_block {XI}>
                    <status name="ER_B" value="2"/>
                    <xi:include href="a.xml"/>
                </status_block>"#
            ),
        );

        let mut session = CompileSession::new(None);
        session.add_document(&a).unwrap();
        // Adding the same root again is a no-op.
        session.add_document(dir.path().join("b.xml")).unwrap();

        let table = session.finish();
        assert_eq!(names(&table), vec!["ER_B", "ER_A"]);
    }

    #[test]
    fn test_base_directory_resolution() {
        let root = TempDir::new().unwrap();
        let inc = TempDir::new().unwrap();
        write(
            inc.path(),
            "extra.xml",
            r#"<status_block><status name="ER_EXTRA" value="0x9000"/></status_block>"#,
        );
        let a = write(
            root.path(),
            "a.xml",
            &format!(r#"<status_block {XI}><xi:include href="extra.xml"/></status_block>"#),
        );

        // Relative to the document directory the include does not exist.
        let mut session = CompileSession::new(None);
        assert!(session.add_document(&a).is_err());

        let mut session = CompileSession::default().base(inc.path());
        session.add_document(&a).unwrap();
        assert_eq!(names(&session.finish()), vec!["ER_EXTRA"]);
    }

    #[test]
    fn test_missing_include_reports_document() {
        let dir = TempDir::new().unwrap();
        let a = write(
            dir.path(),
            "a.xml",
            &format!(r#"<status_block {XI}><xi:include href="gone.xml"/></status_block>"#),
        );

        let mut session = CompileSession::new(None);
        let err = session.add_document(&a).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("a.xml"), "{message}");
        assert!(message.contains("gone.xml"), "{message}");
    }

    #[test]
    fn test_missing_root_document() {
        let dir = TempDir::new().unwrap();
        let mut session = CompileSession::new(None);
        assert!(session.add_document(dir.path().join("none.xml")).is_err());
    }

    #[test]
    fn test_include_missing_href() {
        let dir = TempDir::new().unwrap();
        let a = write(
            dir.path(),
            "a.xml",
            &format!(r#"<status_block {XI}><xi:include/></status_block>"#),
        );
        let mut session = CompileSession::new(None);
        let err = session.add_document(&a).unwrap_err();
        assert!(err.to_string().contains("href"));
    }
}
