//! Format visitors.
//!
//! A serialization visitor turns primitives and containers into [`Data`]
//! and finally encodes the tree. A deserialization visitor decodes input
//! into [`Data`] and coerces decoded values when the navigator asks for a
//! particular primitive.
//!
//! Coercion is lenient: data that can not be read as the requested
//! primitive is handed back unchanged, so value object constructors see
//! the original value and reject it with their own error.

// -----------------------------------------------------------------------------
// Modules

mod json;
mod xml;
mod yaml;

// -----------------------------------------------------------------------------
// Exports

pub use json::{JsonDeserializationVisitor, JsonSerializationVisitor};
pub use xml::{XmlDeserializationVisitor, XmlSerializationVisitor};
pub use yaml::YamlSerializationVisitor;

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::SerialError;
use crate::data::{Data, Entry};
use crate::format::{Direction, Format};
use crate::reflect::Primitive;
use crate::registry::FieldInfo;

// -----------------------------------------------------------------------------
// SerializationVisitor

/// Builds and encodes the output tree of one serialization call.
pub trait SerializationVisitor {
    fn format(&self) -> Format;

    #[inline]
    fn visit_null(&mut self) -> Data {
        Data::Null
    }

    fn visit_primitive(&mut self, value: Primitive<'_>) -> Data;

    /// Creates a text node, only meaningful for DOM formats.
    #[inline]
    fn visit_text(&mut self, text: String) -> Data {
        Data::Text(text)
    }

    #[inline]
    fn visit_sequence(&mut self, items: Vec<Data>) -> Data {
        Data::Seq(items)
    }

    #[inline]
    fn visit_map(&mut self, entries: Vec<Entry>) -> Data {
        Data::Map(entries)
    }

    /// Encodes the finished tree.
    ///
    /// `root_name` names the document element in DOM formats.
    fn finish(&mut self, data: &Data, root_name: Option<&str>) -> Result<String, SerialError>;
}

// -----------------------------------------------------------------------------
// DeserializationVisitor

/// Decodes input and reads primitives out of decoded data.
pub trait DeserializationVisitor {
    fn format(&self) -> Format;

    /// Decodes `input` into a data tree.
    fn prepare(&mut self, input: &str) -> Result<Data, SerialError>;

    fn visit_bool(&mut self, data: Data) -> Data {
        match data {
            Data::String(s) | Data::Text(s) => match s.trim() {
                "true" | "1" => Data::Bool(true),
                "false" | "0" => Data::Bool(false),
                _ => Data::String(s),
            },
            Data::Integer(v @ (0 | 1)) => Data::Bool(v == 1),
            other => other,
        }
    }

    fn visit_integer(&mut self, data: Data) -> Data {
        match data {
            Data::String(s) | Data::Text(s) => match s.trim().parse::<i64>() {
                Ok(v) => Data::Integer(v),
                Err(_) => Data::String(s),
            },
            Data::Float(v) if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 => {
                Data::Integer(v as i64)
            }
            other => other,
        }
    }

    fn visit_float(&mut self, data: Data) -> Data {
        match data {
            Data::String(s) | Data::Text(s) => match s.trim().parse::<f64>() {
                Ok(v) => Data::Float(v),
                Err(_) => Data::String(s),
            },
            Data::Integer(v) => Data::Float(v as f64),
            other => other,
        }
    }

    fn visit_string(&mut self, data: Data) -> Data {
        match data {
            Data::Text(s) => Data::String(s),
            Data::Bool(_) | Data::Integer(_) | Data::Float(_) => match data.to_text() {
                Some(s) => Data::String(s),
                None => data,
            },
            other => other,
        }
    }

    /// Splits sequence data into its items.
    ///
    /// Null is an empty sequence.
    fn visit_sequence(&mut self, data: Data) -> Result<Vec<Data>, SerialError> {
        match data {
            Data::Seq(items) => Ok(items),
            Data::Null => Ok(Vec::new()),
            other => Err(SerialError::UnexpectedData {
                expected: "sequence",
                found: other.kind(),
            }),
        }
    }

    /// Removes the value of `field` from map data.
    ///
    /// `None` means the input has no such key, which is different from an
    /// explicit null.
    fn visit_property(&mut self, data: &mut Data, field: &FieldInfo) -> Option<Data> {
        data.take(field.serialized_name())
    }
}

// -----------------------------------------------------------------------------
// Factories

/// Options passed to the serialization visitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitorOptions {
    /// Indentation width of DOM output.
    pub xml_indent: usize,
}

impl Default for VisitorOptions {
    #[inline]
    fn default() -> Self {
        Self { xml_indent: 2 }
    }
}

/// Creates the serialization visitor of `format`.
pub fn serialization_visitor(
    format: Format,
    options: VisitorOptions,
) -> Box<dyn SerializationVisitor> {
    match format {
        Format::Json => Box::new(JsonSerializationVisitor),
        Format::Xml => Box::new(XmlSerializationVisitor::new(options.xml_indent)),
        Format::Yaml => Box::new(YamlSerializationVisitor),
    }
}

/// Creates the deserialization visitor of `format`.
///
/// `yml` is output only.
pub fn deserialization_visitor(
    format: Format,
) -> Result<Box<dyn DeserializationVisitor>, SerialError> {
    match format {
        Format::Json => Ok(Box::new(JsonDeserializationVisitor)),
        Format::Xml => Ok(Box::new(XmlDeserializationVisitor)),
        Format::Yaml => Err(SerialError::UnsupportedFormat {
            format,
            direction: Direction::Deserialization,
        }),
    }
}

/// Renders a primitive as a text node.
#[inline]
pub(crate) fn primitive_text(value: Primitive<'_>) -> Data {
    Data::Text(value.to_string())
}

// -----------------------------------------------------------------------------
// Tests
