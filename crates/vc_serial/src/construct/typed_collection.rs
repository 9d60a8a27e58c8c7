use alloc::boxed::Box;

use super::{AccessorStrategy, FieldValue, FieldValues, ObjectConstructor};
use crate::SerialError;
use crate::collections::{DynamicCollection, DynamicSet};
use crate::data::Data;
use crate::desc::{ARRAY, COLLECTION, SET, TypeDesc};
use crate::reflect::{DynamicArray, Reflect, Struct};
use crate::registry::{FieldInfo, TypeMeta};

/// An empty container for a field declared as a typed container.
///
/// `None` for every other declaration, and for containers declared
/// without an element type.
fn empty_container(ty: &TypeDesc) -> Option<Box<dyn Reflect>> {
    let element_type = ty.param(0).cloned();
    match ty.name() {
        COLLECTION => Some(Box::new(DynamicCollection::new(element_type?))),
        SET => Some(Box::new(DynamicSet::new(element_type?))),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// TypedCollectionObjectConstructor

/// Presets every container field of a new object.
///
/// `Collection<T>` and `Set<T>` fields start as an empty container of `T`
/// and `array` fields as an empty array. Fields missing from the input
/// therefore still end up as empty containers of the right type.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypedCollectionObjectConstructor<C> {
    inner: C,
}

impl<C: ObjectConstructor> TypedCollectionObjectConstructor<C> {
    #[inline]
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: ObjectConstructor> ObjectConstructor for TypedCollectionObjectConstructor<C> {
    fn construct(
        &self,
        meta: &TypeMeta,
        data: &Data,
        ty: &TypeDesc,
    ) -> Result<FieldValues, SerialError> {
        let mut values = self.inner.construct(meta, data, ty)?;
        for field in meta.fields() {
            if let Some(empty) = empty_container(field.ty()) {
                values.set(field.name(), empty);
            } else if field.ty().name() == ARRAY {
                values.set(field.name(), Box::new(DynamicArray::new()));
            }
        }
        Ok(values)
    }
}

// -----------------------------------------------------------------------------
// TypedCollectionAccessorStrategy

/// Replaces absent typed containers by empty ones.
///
/// Writing null to a `Collection<T>` or `Set<T>` field stores an empty
/// container of `T`, and reading such a field from an object that has no
/// value for it yields one.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypedCollectionAccessorStrategy<A> {
    inner: A,
}

impl<A: AccessorStrategy> TypedCollectionAccessorStrategy<A> {
    #[inline]
    pub const fn new(inner: A) -> Self {
        Self { inner }
    }
}

impl<A: AccessorStrategy> AccessorStrategy for TypedCollectionAccessorStrategy<A> {
    fn get_value<'a>(&self, object: &'a dyn Struct, field: &FieldInfo) -> Option<FieldValue<'a>> {
        self.inner
            .get_value(object, field)
            .or_else(|| empty_container(field.ty()).map(FieldValue::Owned))
    }

    fn set_value(
        &self,
        values: &mut FieldValues,
        field: &FieldInfo,
        value: Option<Box<dyn Reflect>>,
    ) {
        let value = value.or_else(|| empty_container(field.ty()));
        self.inner.set_value(values, field, value);
    }
}

// -----------------------------------------------------------------------------
// Tests
