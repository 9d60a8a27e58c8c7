use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::ptr;

use vc_utils::hash::HashSet;

use super::ContextConfig;
use crate::SerialError;
use crate::data::{Data, Entry};
use crate::desc::{self, TypeDesc};
use crate::error::ResolveError;
use crate::format::{Direction, Format};
use crate::reflect::{Reflect, ReflectRef, Struct};
use crate::registry::TypeRegistry;
use crate::visitor::SerializationVisitor;

/// Identity of a value for the visited guard.
type VisitKey = (usize, &'static str);

#[inline]
fn visit_key(value: &dyn Reflect) -> VisitKey {
    (ptr::from_ref(value).cast::<()>().addr(), value.reflect_type_path())
}

/// State of one serialization call.
///
/// Non-primitive values are marked as visiting while they are processed.
/// Meeting a value that is already being visited ends that branch with
/// null, which stops reference cycles.
pub struct SerializationContext<'a> {
    config: ContextConfig<'a>,
    visitor: Box<dyn SerializationVisitor>,
    visiting: HashSet<VisitKey>,
}

impl<'a> SerializationContext<'a> {
    pub fn new(config: ContextConfig<'a>, visitor: Box<dyn SerializationVisitor>) -> Self {
        Self {
            config,
            visitor,
            visiting: HashSet::default(),
        }
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
    pub fn visitor(&mut self) -> &mut dyn SerializationVisitor {
        &mut *self.visitor
    }

    /// Encodes the finished tree with the visitor.
    pub fn finish(&mut self, data: &Data, root_name: Option<&str>) -> Result<String, SerialError> {
        self.visitor.finish(data, root_name)
    }

    // -------------------------------------------------------------------------
    // Visited guard

    #[inline]
    pub fn is_visiting(&self, value: &dyn Reflect) -> bool {
        self.visiting.contains(&visit_key(value))
    }

    /// Runs `f` with `value` unmarked, restoring the mark afterwards.
    ///
    /// Handlers use this to hand a value they were called for back to the
    /// navigator, for instance to walk the union alternative behind it.
    /// The mark is restored on every exit path of `f`.
    pub fn without_visiting<R>(
        &mut self,
        value: &dyn Reflect,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let key = visit_key(value);
        let was_visiting = self.visiting.remove(&key);
        let result = f(self);
        if was_visiting {
            self.visiting.insert(key);
        }
        result
    }

    // -------------------------------------------------------------------------
    // Navigation

    /// Serializes `value` declared as `ty`.
    pub fn accept(&mut self, value: &dyn Reflect, ty: &TypeDesc) -> Result<Data, SerialError> {
        if desc::canonical_primitive(ty.name()).is_some() {
            return self.visit_primitive(value);
        }
        if ty.is_array() {
            return self.visit_list(value, ty);
        }

        let key = visit_key(value);
        if !self.visiting.insert(key) {
            log::debug!("skip `{}`, it is already being visited", key.1);
            return Ok(self.visitor.visit_null());
        }
        let result = self.accept_object(value, ty);
        self.visiting.remove(&key);
        result
    }

    /// Serializes `items` as a sequence of the element type of `ty`.
    ///
    /// Without a declared element type every item is walked as its own
    /// runtime type.
    pub fn visit_array(
        &mut self,
        items: Vec<&dyn Reflect>,
        ty: &TypeDesc,
    ) -> Result<Data, SerialError> {
        let element_type = ty.params().last();
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            let data = match element_type {
                Some(element_type) => self.accept(item, element_type)?,
                None => self.accept(item, &TypeDesc::new(item.reflect_type_path()))?,
            };
            out.push(data);
        }
        Ok(self.visitor.visit_sequence(out))
    }

    fn accept_object(&mut self, value: &dyn Reflect, ty: &TypeDesc) -> Result<Data, SerialError> {
        let format = self.format();
        let handlers = self.config.handlers;
        if let Some((handler, method)) = handlers.get(Direction::Serialization, format, ty.name()) {
            log::trace!("serialize `{ty}` as {format} with `{}::{method}`", handler.name());
            return handler.serialize(self, value, ty);
        }

        match value.reflect_ref() {
            ReflectRef::Primitive(primitive) => Ok(self.visitor.visit_primitive(primitive)),
            ReflectRef::List(list) => self.visit_array(list.to_array(), ty),
            ReflectRef::Struct(object) => self.visit_struct(object, value.reflect_type_path()),
            ReflectRef::Value(_) => Err(SerialError::NoHandler {
                type_name: ty.name().into(),
                format,
                direction: Direction::Serialization,
            }),
        }
    }

    fn visit_primitive(&mut self, value: &dyn Reflect) -> Result<Data, SerialError> {
        match value.reflect_ref() {
            ReflectRef::Primitive(primitive) => Ok(self.visitor.visit_primitive(primitive)),
            _ => Err(SerialError::UnexpectedData {
                expected: "primitive",
                found: value.reflect_ref().kind(),
            }),
        }
    }

    fn visit_list(&mut self, value: &dyn Reflect, ty: &TypeDesc) -> Result<Data, SerialError> {
        match value.reflect_ref() {
            ReflectRef::List(list) => self.visit_array(list.to_array(), ty),
            other => Err(SerialError::UnexpectedData {
                expected: "list",
                found: other.kind(),
            }),
        }
    }

    fn visit_struct(
        &mut self,
        object: &dyn Struct,
        type_path: &'static str,
    ) -> Result<Data, SerialError> {
        let config = self.config;
        let meta = config
            .registry
            .get(type_path)
            .ok_or_else(|| ResolveError::Unknown(type_path.into()))?;

        let mut entries = Vec::with_capacity(meta.fields().len());
        for field in meta.fields() {
            let data = match config.accessor.get_value(object, field) {
                Some(value) => self.accept(value.as_reflect(), field.ty())?,
                None => self.visitor.visit_null(),
            };
            if data.is_null() && !config.serialize_null {
                continue;
            }
            entries.push(Entry::with_hint(field.serialized_name(), data, field.hint()));
        }
        Ok(self.visitor.visit_map(entries))
    }
}

// -----------------------------------------------------------------------------
// Tests
