use alloc::boxed::Box;
use alloc::vec::{self, Vec};
use core::slice;

use super::{DynamicCollection, check_element_type};
use crate::SerialError;
use crate::desc::COLLECTION;
use crate::reflect::{DynamicArray, FromReflect, List, Reflect, ReflectRef, TypePath};

/// An ordered, index-addressable sequence of `T`.
///
/// Declared as `Collection<T>` in field types.
///
/// # Examples
///
/// ```
/// use vc_serial::collections::Collection;
///
/// let mut names = Collection::new();
/// names.push(String::from("Joost Nijhuis"));
/// names.push_all([String::from("John Doe")]);
///
/// assert_eq!(names.len(), 2);
/// assert_eq!(names.get(1).map(String::as_str), Some("John Doe"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Collection<T> {
    #[inline]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    /// Appends every value of `values`, in order.
    #[inline]
    pub fn push_all(&mut self, values: impl IntoIterator<Item = T>) {
        self.items.extend(values);
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    /// The elements in insertion order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for Collection<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    #[inline]
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for Collection<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: Vec::from_iter(iter),
        }
    }
}

impl<T> Extend<T> for Collection<T> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// -----------------------------------------------------------------------------
// Reflect

impl<T: Reflect> TypePath for Collection<T> {
    #[inline(always)]
    fn type_path() -> &'static str {
        COLLECTION
    }
}

impl<T: Reflect> Reflect for Collection<T> {
    #[inline(always)]
    fn reflect_type_path(&self) -> &'static str {
        COLLECTION
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }
}

impl<T: Reflect> List for Collection<T> {
    #[inline]
    fn len(&self) -> usize {
        self.items.len()
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(self.items.iter().map(|item| item as &dyn Reflect))
    }
}

impl<T: Reflect + TypePath + FromReflect> FromReflect for Collection<T> {
    fn from_reflect(value: Box<dyn Reflect>) -> Result<Self, SerialError> {
        let value = match value.downcast::<Self>() {
            Ok(collection) => return Ok(*collection),
            Err(value) => value,
        };
        let items = match value.downcast::<DynamicCollection>() {
            Ok(dynamic) => {
                let (element_type, items) = dynamic.into_parts();
                check_element_type::<T>(COLLECTION, &element_type)?;
                items
            }
            Err(value) => crate::reflect::downcast_boxed::<DynamicArray>(value)?.into_items(),
        };
        items.into_iter().map(T::from_reflect).collect()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;

    use super::Collection;
    use crate::SerialError;
    use crate::collections::DynamicCollection;
    use crate::desc::TypeDesc;
    use crate::reflect::{FromReflect, List, Reflect};

    #[test]
    fn from_dynamic_keeps_order() {
        let dynamic = DynamicCollection::with_items(
            TypeDesc::new("int"),
            vec![Box::new(3_i64) as Box<dyn Reflect>, Box::new(1_i64), Box::new(2_i64)],
        );
        let collection = Collection::<i64>::from_reflect(Box::new(dynamic)).unwrap();

        assert_eq!(collection.as_slice(), [3, 1, 2]);
    }

    #[test]
    fn empty_dynamic_is_typed() {
        let dynamic = DynamicCollection::new(TypeDesc::new("string"));
        let collection = Collection::<String>::from_reflect(Box::new(dynamic)).unwrap();

        assert_eq!(collection, Collection::new());
    }

    #[test]
    fn element_type_must_match() {
        let dynamic = DynamicCollection::new(TypeDesc::new("string"));
        let err = Collection::<i64>::from_reflect(Box::new(dynamic)).unwrap_err();

        match err {
            SerialError::TypeMismatch { expected, found } => {
                assert_eq!(expected, "Collection<integer>");
                assert_eq!(found, "Collection<string>");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn list_view_exports_in_order() {
        let collection = Collection::from(vec![String::from("a"), String::from("b")]);
        let exported = collection.to_array();

        assert_eq!(exported.len(), 2);
        assert_eq!(exported[1].downcast_ref::<String>().map(String::as_str), Some("b"));
    }
}
