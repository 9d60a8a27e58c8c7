use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use super::ContextConfig;
use crate::SerialError;
use crate::data::Data;
use crate::desc::{self, TypeDesc};
use crate::error::ResolveError;
use crate::format::{Direction, Format};
use crate::reflect::{DynamicArray, Reflect};
use crate::registry::{TypeKind, TypeMeta, TypeRegistry};
use crate::visitor::DeserializationVisitor;

/// State of one deserialization call.
pub struct DeserializationContext<'a> {
    config: ContextConfig<'a>,
    visitor: Box<dyn DeserializationVisitor>,
}

impl<'a> DeserializationContext<'a> {
    pub fn new(config: ContextConfig<'a>, visitor: Box<dyn DeserializationVisitor>) -> Self {
        Self { config, visitor }
    }

    #[inline]
    pub fn format(&self) -> Format {
        self.visitor.format()
    }

    #[inline]
    pub fn registry(&self) -> &'a TypeRegistry {
        self.config.registry
    }

    #[inline]
    pub fn visitor(&mut self) -> &mut dyn DeserializationVisitor {
        &mut *self.visitor
    }

    /// Decodes `input` with the visitor.
    #[inline]
    pub fn prepare(&mut self, input: &str) -> Result<Data, SerialError> {
        self.visitor.prepare(input)
    }

    // -------------------------------------------------------------------------
    // Navigation

    /// Deserializes `data` as a value of `ty`.
    pub fn accept(&mut self, data: Data, ty: &TypeDesc) -> Result<Box<dyn Reflect>, SerialError> {
        if let Some(primitive) = desc::canonical_primitive(ty.name()) {
            return self.visit_primitive(data, primitive);
        }
        if ty.is_array() {
            return self.visit_array(data, ty).map(|array| Box::new(array) as Box<dyn Reflect>);
        }

        let format = self.format();
        let handlers = self.config.handlers;
        if let Some((handler, method)) = handlers.get(Direction::Deserialization, format, ty.name()) {
            log::trace!("deserialize `{ty}` as {format} with `{}::{method}`", handler.name());
            return handler.deserialize(self, data, ty);
        }

        let registry = self.config.registry;
        let meta = registry
            .get(ty.name())
            .ok_or_else(|| ResolveError::Unknown(String::from(ty.name())))?;
        match meta.kind() {
            TypeKind::Struct { .. } => self.visit_struct(meta, data, ty),
            TypeKind::Value { .. } => Err(SerialError::NoHandler {
                type_name: String::from(ty.name()),
                format,
                direction: Direction::Deserialization,
            }),
            TypeKind::Interface => Err(SerialError::NotConstructible(String::from(ty.name()))),
        }
    }

    /// Deserializes sequence data item by item as the element type of `ty`.
    ///
    /// Without a declared element type only scalar items are accepted.
    pub fn visit_array(&mut self, data: Data, ty: &TypeDesc) -> Result<DynamicArray, SerialError> {
        let items = self.visitor.visit_sequence(data)?;
        let element_type = ty.params().last();
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            let value = match element_type {
                Some(element_type) => self.accept(item, element_type)?,
                None => untyped(item)?,
            };
            out.push(value);
        }
        Ok(DynamicArray::from_items(out))
    }

    fn visit_primitive(
        &mut self,
        data: Data,
        primitive: &'static str,
    ) -> Result<Box<dyn Reflect>, SerialError> {
        let data = match primitive {
            "integer" => self.visitor.visit_integer(data),
            "float" => self.visitor.visit_float(data),
            "boolean" => self.visitor.visit_bool(data),
            _ => self.visitor.visit_string(data),
        };
        match (primitive, data) {
            ("integer", Data::Integer(v)) => Ok(Box::new(v)),
            ("float", Data::Float(v)) => Ok(Box::new(v)),
            ("boolean", Data::Bool(v)) => Ok(Box::new(v)),
            ("string", Data::String(v)) => Ok(Box::new(v)),
            (expected, other) => Err(SerialError::UnexpectedData {
                expected,
                found: other.kind(),
            }),
        }
    }

    fn visit_struct(
        &mut self,
        meta: &TypeMeta,
        mut data: Data,
        ty: &TypeDesc,
    ) -> Result<Box<dyn Reflect>, SerialError> {
        if !matches!(data, Data::Map(_)) {
            return Err(SerialError::UnexpectedData {
                expected: "map",
                found: data.kind(),
            });
        }

        let config = self.config;
        let mut values = config.constructor.construct(meta, &data, ty)?;
        for field in meta.fields() {
            // Absent keys keep what the constructor preset.
            let Some(raw) = self.visitor.visit_property(&mut data, field) else {
                continue;
            };
            let value = match raw {
                Data::Null => None,
                raw => Some(self.accept(raw, field.ty())?),
            };
            config.accessor.set_value(&mut values, field, value);
        }
        meta.construct(&mut values)
    }
}

/// Converts scalar data without a declared type.
fn untyped(data: Data) -> Result<Box<dyn Reflect>, SerialError> {
    match data {
        Data::Bool(v) => Ok(Box::new(v)),
        Data::Integer(v) => Ok(Box::new(v)),
        Data::Float(v) => Ok(Box::new(v)),
        Data::String(v) | Data::Text(v) => Ok(Box::new(v)),
        Data::Seq(items) => {
            let items = items.into_iter().map(untyped).collect::<Result<_, _>>()?;
            Ok(Box::new(DynamicArray::from_items(items)))
        }
        other => Err(SerialError::UnexpectedData {
            expected: "scalar or sequence",
            found: other.kind(),
        }),
    }
}

// -----------------------------------------------------------------------------
// Tests
