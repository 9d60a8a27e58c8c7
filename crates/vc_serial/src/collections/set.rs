use alloc::boxed::Box;
use alloc::vec::{self, Vec};
use core::fmt;
use core::hash::Hash;
use core::slice;

use vc_utils::hash::{HashTable, hash_one};

use super::{DynamicSet, check_element_type};
use crate::SerialError;
use crate::desc::SET;
use crate::reflect::{DynamicArray, FromReflect, List, Reflect, ReflectRef, TypePath};

/// A set of `T`, deduplicated by the elements' own hash and equality.
///
/// Declared as `Set<T>` in field types. Iteration and export follow
/// insertion order, so serializing the same set always gives the same
/// output. Two sets are equal when they hold the same elements, in any
/// order.
///
/// # Examples
///
/// ```
/// use vc_serial::collections::Set;
///
/// let mut set = Set::new();
/// assert!(set.insert("b"));
/// assert!(set.insert("a"));
/// assert!(!set.insert("b"));
///
/// assert_eq!(set.as_slice(), ["b", "a"]);
/// assert_eq!(set, Set::from_iter(["a", "b"]));
/// ```
#[derive(Clone)]
pub struct Set<T> {
    items: Vec<T>,
    index: HashTable<usize>,
}

impl<T> Set<T> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashTable::new(),
        }
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

impl<T: Hash + Eq> Set<T> {
    /// Adds `value`, returns `false` if an equal element is present.
    pub fn insert(&mut self, value: T) -> bool {
        let hash = hash_one(&value);
        let items = &self.items;
        if self.index.find(hash, |&i| items[i] == value).is_some() {
            return false;
        }
        self.items.push(value);
        let items = &self.items;
        self.index
            .insert_unique(hash, items.len() - 1, |&i| hash_one(&items[i]));
        true
    }

    /// Adds every value of `values`, returns how many were new.
    pub fn add_all(&mut self, values: impl IntoIterator<Item = T>) -> usize {
        values
            .into_iter()
            .fold(0, |added, value| added + usize::from(self.insert(value)))
    }

    pub fn contains(&self, value: &T) -> bool {
        self.index
            .find(hash_one(value), |&i| self.items[i] == *value)
            .is_some()
    }
}

impl<T> Default for Set<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}

impl<T: Hash + Eq> PartialEq for Set<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl<T: Hash + Eq> Eq for Set<T> {}

impl<T: Hash + Eq> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.add_all(iter);
        set
    }
}

impl<T: Hash + Eq> Extend<T> for Set<T> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<T> IntoIterator for Set<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Set<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// -----------------------------------------------------------------------------
// Reflect

impl<T: Reflect> TypePath for Set<T> {
    #[inline(always)]
    fn type_path() -> &'static str {
        SET
    }
}

impl<T: Reflect> Reflect for Set<T> {
    #[inline(always)]
    fn reflect_type_path(&self) -> &'static str {
        SET
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }
}

impl<T: Reflect> List for Set<T> {
    #[inline]
    fn len(&self) -> usize {
        self.items.len()
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(self.items.iter().map(|item| item as &dyn Reflect))
    }
}

impl<T: Reflect + TypePath + FromReflect + Hash + Eq> FromReflect for Set<T> {
    fn from_reflect(value: Box<dyn Reflect>) -> Result<Self, SerialError> {
        let value = match value.downcast::<Self>() {
            Ok(set) => return Ok(*set),
            Err(value) => value,
        };
        let items = match value.downcast::<DynamicSet>() {
            Ok(dynamic) => {
                let (element_type, items) = dynamic.into_parts();
                check_element_type::<T>(SET, &element_type)?;
                items
            }
            Err(value) => crate::reflect::downcast_boxed::<DynamicArray>(value)?.into_items(),
        };
        let mut set = Self::new();
        for item in items {
            set.insert(T::from_reflect(item)?);
        }
        Ok(set)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;

    use super::Set;
    use crate::collections::DynamicSet;
    use crate::desc::TypeDesc;
    use crate::reflect::{FromReflect, List, Reflect};

    #[test]
    fn deduplicates_by_hash() {
        let mut set = Set::new();
        assert_eq!(set.add_all([1_i64, 2, 1, 3, 2]), 3);
        assert_eq!(set.as_slice(), [1, 2, 3]);
        assert!(set.contains(&3));
        assert!(!set.contains(&4));
    }

    #[test]
    fn equality_ignores_order() {
        let a = Set::from_iter(["x", "y"]);
        let b = Set::from_iter(["y", "x"]);
        let c = Set::from_iter(["x"]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn from_dynamic_deduplicates() {
        let dynamic = DynamicSet::with_items(
            TypeDesc::new("string"),
            vec![
                Box::new(String::from("a")) as Box<dyn Reflect>,
                Box::new(String::from("a")),
                Box::new(String::from("b")),
            ],
        );
        let set = Set::<String>::from_reflect(Box::new(dynamic)).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.to_array().len(), 2);
    }

    #[test]
    fn grows_past_rehash() {
        let set: Set<i64> = (0..1000).chain(0..1000).collect();
        assert_eq!(set.len(), 1000);
        assert!((0..1000).all(|i| set.contains(&i)));
    }
}
