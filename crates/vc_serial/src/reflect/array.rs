use alloc::boxed::Box;
use alloc::vec::Vec;

use super::{FromReflect, List, Reflect, ReflectRef, TypePath};
use crate::SerialError;
use crate::desc::ARRAY;

// -----------------------------------------------------------------------------
// DynamicArray

/// The decoded form of an `array` before it is converted to a static type.
#[derive(Debug, Default)]
pub struct DynamicArray {
    items: Vec<Box<dyn Reflect>>,
}

impl DynamicArray {
    #[inline]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[inline]
    pub fn from_items(items: Vec<Box<dyn Reflect>>) -> Self {
        Self { items }
    }

    #[inline]
    pub fn into_items(self) -> Vec<Box<dyn Reflect>> {
        self.items
    }
}

impl TypePath for DynamicArray {
    #[inline(always)]
    fn type_path() -> &'static str {
        ARRAY
    }
}

impl Reflect for DynamicArray {
    #[inline(always)]
    fn reflect_type_path(&self) -> &'static str {
        ARRAY
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }
}

impl List for DynamicArray {
    #[inline]
    fn len(&self) -> usize {
        self.items.len()
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(self.items.iter().map(|item| &**item))
    }
}

// -----------------------------------------------------------------------------
// Vec

impl<T: Reflect> TypePath for Vec<T> {
    #[inline(always)]
    fn type_path() -> &'static str {
        ARRAY
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    #[inline(always)]
    fn reflect_type_path(&self) -> &'static str {
        ARRAY
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }
}

impl<T: Reflect> List for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(<[T]>::iter(self).map(|item| item as &dyn Reflect))
    }
}

impl<T: Reflect + FromReflect> FromReflect for Vec<T> {
    fn from_reflect(value: Box<dyn Reflect>) -> Result<Self, SerialError> {
        let value = match value.downcast::<Vec<T>>() {
            Ok(vec) => return Ok(*vec),
            Err(value) => value,
        };
        let array = crate::reflect::downcast_boxed::<DynamicArray>(value)?;
        array.into_items().into_iter().map(T::from_reflect).collect()
    }
}

// -----------------------------------------------------------------------------
// Tests
