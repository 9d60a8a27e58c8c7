use alloc::string::{String, ToString};
use alloc::vec::Vec;

use super::{DeserializationVisitor, SerializationVisitor, primitive_text};
use crate::SerialError;
use crate::data::{Data, Entry, XmlHint};
use crate::format::Format;
use crate::reflect::Primitive;

const DEFAULT_ROOT: &str = "result";
const DEFAULT_ENTRY: &str = "entry";

// -----------------------------------------------------------------------------
// Serialization

/// Writes an indented XML document.
///
/// Scalars become text nodes. Map entries hinted as attributes are written
/// as attributes of their parent element, everything else as child
/// elements. Sequence items are named after the entry hint of the sequence.
#[derive(Debug, Clone, Copy)]
pub struct XmlSerializationVisitor {
    indent: usize,
}

impl XmlSerializationVisitor {
    #[inline]
    pub const fn new(indent: usize) -> Self {
        Self { indent }
    }
}

impl Default for XmlSerializationVisitor {
    #[inline]
    fn default() -> Self {
        Self::new(2)
    }
}

impl SerializationVisitor for XmlSerializationVisitor {
    #[inline]
    fn format(&self) -> Format {
        Format::Xml
    }

    #[inline]
    fn visit_primitive(&mut self, value: Primitive<'_>) -> Data {
        primitive_text(value)
    }

    fn finish(&mut self, data: &Data, root_name: Option<&str>) -> Result<String, SerialError> {
        let mut writer = XmlWriter {
            out: String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"),
            indent: self.indent,
        };
        writer.element(root_name.unwrap_or(DEFAULT_ROOT), data, XmlHint::default(), 0);
        Ok(writer.out)
    }
}

struct XmlWriter {
    out: String,
    indent: usize,
}

impl XmlWriter {
    fn pad(&mut self, depth: usize) {
        self.out.extend(core::iter::repeat_n(' ', depth * self.indent));
    }

    fn element(&mut self, name: &str, data: &Data, hint: XmlHint, depth: usize) {
        self.pad(depth);
        self.out.push('<');
        self.out.push_str(name);

        match data {
            Data::Null => self.out.push_str("/>\n"),
            Data::Map(entries) => {
                let (attributes, children): (Vec<&Entry>, Vec<&Entry>) = entries
                    .iter()
                    .filter(|e| !(e.hint.attribute && e.value.is_null()))
                    .partition(|e| e.hint.attribute && e.value.is_scalar());

                for attr in attributes {
                    self.out.push(' ');
                    self.out.push_str(&attr.key);
                    self.out.push_str("=\"");
                    if let Some(text) = attr.value.to_text() {
                        escape_into(&mut self.out, &text, true);
                    }
                    self.out.push('"');
                }

                if children.is_empty() {
                    self.out.push_str("/>\n");
                } else {
                    self.out.push_str(">\n");
                    for child in children {
                        self.element(&child.key, &child.value, child.hint, depth + 1);
                    }
                    self.close(name, depth);
                }
            }
            Data::Seq(items) => {
                if items.is_empty() {
                    self.out.push_str("/>\n");
                } else {
                    self.out.push_str(">\n");
                    let entry_name = hint.entry_name.unwrap_or(DEFAULT_ENTRY);
                    for item in items {
                        self.element(entry_name, item, XmlHint::default(), depth + 1);
                    }
                    self.close(name, depth);
                }
            }
            scalar => {
                self.out.push('>');
                if let Some(text) = scalar.to_text() {
                    escape_into(&mut self.out, &text, false);
                }
                self.out.push_str("</");
                self.out.push_str(name);
                self.out.push_str(">\n");
            }
        }
    }

    fn close(&mut self, name: &str, depth: usize) {
        self.pad(depth);
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push_str(">\n");
    }
}

/// Escapes markup characters.
///
/// Readers normalize raw `\r` everywhere, and raw `\n` and `\t` in attribute
/// values, so those are written as character references.
fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            '"' if attribute => out.push_str("&quot;"),
            '\n' if attribute => out.push_str("&#10;"),
            '\t' if attribute => out.push_str("&#9;"),
            _ => out.push(ch),
        }
    }
}

// -----------------------------------------------------------------------------
// Deserialization

/// Reads an XML document with `roxmltree`.
///
/// The document element becomes the top-level data, its own name is
/// dropped. Attributes and child elements become map entries in document
/// order, and an element with neither becomes a text node.
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlDeserializationVisitor;

impl XmlDeserializationVisitor {
    fn node(node: roxmltree::Node<'_, '_>) -> Data {
        let attributes = node.attributes().map(|attr| {
            Entry::with_hint(
                attr.name(),
                Data::Text(String::from(attr.value())),
                XmlHint {
                    attribute: true,
                    entry_name: None,
                },
            )
        });
        let mut entries: Vec<Entry> = attributes.collect();
        entries.extend(
            node.children()
                .filter(|child| child.is_element())
                .map(|child| Entry::new(child.tag_name().name(), Self::node(child))),
        );

        if entries.is_empty() {
            let text: String = node
                .children()
                .filter(|child| child.is_text())
                .filter_map(|child| child.text())
                .collect();
            Data::Text(text)
        } else {
            Data::Map(entries)
        }
    }
}

impl DeserializationVisitor for XmlDeserializationVisitor {
    #[inline]
    fn format(&self) -> Format {
        Format::Xml
    }

    fn prepare(&mut self, input: &str) -> Result<Data, SerialError> {
        let document = roxmltree::Document::parse(input).map_err(|err| SerialError::Decode {
            format: Format::Xml,
            message: err.to_string(),
        })?;
        Ok(Self::node(document.root_element()))
    }

    /// The child elements of a map are the items, and an element without
    /// content is an empty sequence.
    fn visit_sequence(&mut self, data: Data) -> Result<Vec<Data>, SerialError> {
        match data {
            Data::Map(entries) => Ok(entries
                .into_iter()
                .filter(|e| !e.hint.attribute)
                .map(|e| e.value)
                .collect()),
            Data::Text(text) if text.trim().is_empty() => Ok(Vec::new()),
            Data::Seq(items) => Ok(items),
            Data::Null => Ok(Vec::new()),
            other => Err(SerialError::UnexpectedData {
                expected: "sequence",
                found: other.kind(),
            }),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const ATTR: XmlHint = XmlHint {
        attribute: true,
        entry_name: None,
    };

    fn employee(name: &str, age: &str) -> Data {
        Data::Map(vec![
            Entry::with_hint("name", Data::Text(name.into()), ATTR),
            Entry::with_hint("age", Data::Text(age.into()), ATTR),
        ])
    }

    #[test]
    fn writes_attributes_and_entries() {
        let data = Data::Map(vec![
            Entry::with_hint("name", Data::Text("Apple Computer, Inc.".into()), ATTR),
            Entry::with_hint(
                "employees",
                Data::Seq(vec![employee("Joost Nijhuis", "40"), employee("John Doe", "25")]),
                XmlHint {
                    attribute: false,
                    entry_name: Some("employee"),
                },
            ),
        ]);
        let xml = XmlSerializationVisitor::default()
            .finish(&data, Some("company"))
            .unwrap();

        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <company name=\"Apple Computer, Inc.\">\n\
             \x20 <employees>\n\
             \x20   <employee name=\"Joost Nijhuis\" age=\"40\"/>\n\
             \x20   <employee name=\"John Doe\" age=\"25\"/>\n\
             \x20 </employees>\n\
             </company>\n"
        );
    }

    #[test]
    fn keeps_whitespace_controls() {
        let data = Data::Map(vec![
            Entry::with_hint("name", Data::Text("Apple\nComputer\tInc.".into()), XmlHint {
                attribute: true,
                entry_name: None,
            }),
            Entry::new("motto", Data::Text("Think\r\ndifferent".into())),
        ]);
        let xml = XmlSerializationVisitor::default().finish(&data, None).unwrap();
        assert!(xml.contains("name=\"Apple&#10;Computer&#9;Inc.\""));
        assert!(xml.contains("<motto>Think&#13;\ndifferent</motto>"));

        let decoded = XmlDeserializationVisitor.prepare(&xml).unwrap();
        assert_eq!(decoded.get("name"), Some(&Data::Text("Apple\nComputer\tInc.".into())));
        assert_eq!(decoded.get("motto"), Some(&Data::Text("Think\r\ndifferent".into())));
    }

    #[test]
    fn escapes_text() {
        let data = Data::map([("title", Data::Text("Tom & \"Jerry\" <3".into()))]);
        let xml = XmlSerializationVisitor::new(4).finish(&data, None).unwrap();

        assert!(xml.contains("<result>\n    <title>Tom &amp; \"Jerry\" &lt;3</title>\n</result>\n"));
    }

    #[test]
    fn reads_attributes_and_children() {
        let mut visitor = XmlDeserializationVisitor;
        let data = visitor
            .prepare(
                "<company name=\"Apple\"><employees><employee name=\"A\" age=\"1\"/></employees></company>",
            )
            .unwrap();

        assert_eq!(data.get("name"), Some(&Data::Text("Apple".into())));
        let employees = data.get("employees").cloned().unwrap();
        let items = visitor.visit_sequence(employees).unwrap();
        assert_eq!(items, vec![Data::map([
            ("name", Data::Text("A".into())),
            ("age", Data::Text("1".into())),
        ])]);
    }

    #[test]
    fn empty_element_is_empty_sequence() {
        let mut visitor = XmlDeserializationVisitor;
        let data = visitor.prepare("<company><employees/></company>").unwrap();
        let employees = data.get("employees").cloned().unwrap();

        assert!(visitor.visit_sequence(employees).unwrap().is_empty());
    }

    #[test]
    fn malformed_input() {
        let err = XmlDeserializationVisitor.prepare("<company>").unwrap_err();
        assert!(matches!(err, SerialError::Decode { format: Format::Xml, .. }));
    }
}
