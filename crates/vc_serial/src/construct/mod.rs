//! Object construction and field access.
//!
//! Deserialization gathers field values into a [`FieldValues`] bag, created
//! by an [`ObjectConstructor`] and written through an [`AccessorStrategy`].
//! Once every field was visited the type's registered constructor turns
//! the bag into the object. Serialization reads fields through the same
//! [`AccessorStrategy`].

// -----------------------------------------------------------------------------
// Modules

mod typed_collection;

// -----------------------------------------------------------------------------
// Exports

pub use typed_collection::{TypedCollectionAccessorStrategy, TypedCollectionObjectConstructor};

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::SerialError;
use crate::data::Data;
use crate::desc::TypeDesc;
use crate::reflect::{FromReflect, Reflect, Struct};
use crate::registry::{FieldInfo, TypeMeta};

// -----------------------------------------------------------------------------
// FieldValues

/// The field values of an object under construction.
///
/// # Examples
///
/// ```
/// use vc_serial::construct::FieldValues;
///
/// let mut values = FieldValues::new("Author");
/// values.set("name", Box::new(String::from("John Doe")));
///
/// let name: String = values.take("name").unwrap();
/// assert_eq!(name, "John Doe");
/// assert!(values.take::<String>("name").is_err());
/// ```
#[derive(Debug)]
pub struct FieldValues {
    type_path: &'static str,
    values: Vec<(&'static str, Box<dyn Reflect>)>,
}

impl FieldValues {
    #[inline]
    pub const fn new(type_path: &'static str) -> Self {
        Self {
            type_path,
            values: Vec::new(),
        }
    }

    /// The type being constructed.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Stores `value` for `field`, replacing a previous value.
    pub fn set(&mut self, field: &'static str, value: Box<dyn Reflect>) {
        match self.values.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => *slot = value,
            None => self.values.push((field, value)),
        }
    }

    pub fn remove(&mut self, field: &str) -> Option<Box<dyn Reflect>> {
        let index = self.values.iter().position(|(name, _)| *name == field)?;
        Some(self.values.remove(index).1)
    }

    #[inline]
    pub fn get(&self, field: &str) -> Option<&dyn Reflect> {
        self.values
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| &**value)
    }

    #[inline]
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Removes the value of `field` and converts it to `T`.
    pub fn take<T: FromReflect>(&mut self, field: &'static str) -> Result<T, SerialError> {
        match self.remove(field) {
            Some(value) => T::from_reflect(value),
            None => Err(SerialError::MissingField {
                type_path: self.type_path,
                field,
            }),
        }
    }

    /// Like [`take`](Self::take), but an unset field is `None`.
    pub fn take_optional<T: FromReflect>(
        &mut self,
        field: &'static str,
    ) -> Result<Option<T>, SerialError> {
        self.remove(field).map(T::from_reflect).transpose()
    }
}

// -----------------------------------------------------------------------------
// ObjectConstructor

/// Creates the field bag of an object about to be deserialized.
pub trait ObjectConstructor: Send + Sync {
    fn construct(
        &self,
        meta: &TypeMeta,
        data: &Data,
        ty: &TypeDesc,
    ) -> Result<FieldValues, SerialError>;
}

/// Starts every object with no field set.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultObjectConstructor;

impl ObjectConstructor for DefaultObjectConstructor {
    #[inline]
    fn construct(
        &self,
        meta: &TypeMeta,
        _data: &Data,
        _ty: &TypeDesc,
    ) -> Result<FieldValues, SerialError> {
        Ok(FieldValues::new(meta.type_path()))
    }
}

// -----------------------------------------------------------------------------
// AccessorStrategy

/// A field value read during serialization.
#[derive(Debug)]
pub enum FieldValue<'a> {
    Borrowed(&'a dyn Reflect),
    /// A value created by the accessor itself.
    Owned(Box<dyn Reflect>),
}

impl FieldValue<'_> {
    #[inline]
    pub fn as_reflect(&self) -> &dyn Reflect {
        match self {
            FieldValue::Borrowed(value) => *value,
            FieldValue::Owned(value) => &**value,
        }
    }
}

/// Reads and writes object fields.
pub trait AccessorStrategy: Send + Sync {
    /// Reads `field` of `object`, `None` if the object has no value for it.
    fn get_value<'a>(&self, object: &'a dyn Struct, field: &FieldInfo) -> Option<FieldValue<'a>>;

    /// Writes `field` of an object under construction, `None` unsets it.
    fn set_value(
        &self,
        values: &mut FieldValues,
        field: &FieldInfo,
        value: Option<Box<dyn Reflect>>,
    );
}

/// Plain field access through [`Struct::field`] and [`FieldValues`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultAccessorStrategy;

impl AccessorStrategy for DefaultAccessorStrategy {
    #[inline]
    fn get_value<'a>(&self, object: &'a dyn Struct, field: &FieldInfo) -> Option<FieldValue<'a>> {
        object.field(field.name()).map(FieldValue::Borrowed)
    }

    fn set_value(
        &self,
        values: &mut FieldValues,
        field: &FieldInfo,
        value: Option<Box<dyn Reflect>>,
    ) {
        match value {
            Some(value) => values.set(field.name(), value),
            None => {
                values.remove(field.name());
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
