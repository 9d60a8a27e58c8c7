use alloc::string::{String, ToString};

use super::SerializationVisitor;
use crate::SerialError;
use crate::data::Data;
use crate::format::Format;
use crate::reflect::Primitive;

/// Writes YAML. There is no YAML reader.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlSerializationVisitor;

impl SerializationVisitor for YamlSerializationVisitor {
    #[inline]
    fn format(&self) -> Format {
        Format::Yaml
    }

    #[inline]
    fn visit_primitive(&mut self, value: Primitive<'_>) -> Data {
        value.to_data()
    }

    fn finish(&mut self, data: &Data, _root_name: Option<&str>) -> Result<String, SerialError> {
        serde_yaml::to_string(data).map_err(|err| SerialError::Encode {
            format: Format::Yaml,
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_style_output() {
        let data = Data::map([
            ("name", Data::from("John Doe")),
            ("age", Data::from(25)),
        ]);
        let yaml = YamlSerializationVisitor.finish(&data, None).unwrap();

        assert_eq!(yaml, "name: John Doe\nage: 25\n");
    }
}
