use alloc::string::{String, ToString};

use super::{DeserializationVisitor, SerializationVisitor};
use crate::SerialError;
use crate::data::Data;
use crate::format::Format;
use crate::reflect::Primitive;

// -----------------------------------------------------------------------------
// Serialization

/// Writes compact JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSerializationVisitor;

impl SerializationVisitor for JsonSerializationVisitor {
    #[inline]
    fn format(&self) -> Format {
        Format::Json
    }

    #[inline]
    fn visit_primitive(&mut self, value: Primitive<'_>) -> Data {
        value.to_data()
    }

    fn finish(&mut self, data: &Data, _root_name: Option<&str>) -> Result<String, SerialError> {
        serde_json::to_string(data).map_err(|err| SerialError::Encode {
            format: Format::Json,
            message: err.to_string(),
        })
    }
}

// -----------------------------------------------------------------------------
// Deserialization

/// Reads JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonDeserializationVisitor;

impl DeserializationVisitor for JsonDeserializationVisitor {
    #[inline]
    fn format(&self) -> Format {
        Format::Json
    }

    fn prepare(&mut self, input: &str) -> Result<Data, SerialError> {
        serde_json::from_str(input).map_err(|err| SerialError::Decode {
            format: Format::Json,
            message: err.to_string(),
        })
    }
}

// -----------------------------------------------------------------------------
// Tests
