use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::desc::{COLLECTION, SET, TypeDesc};
use crate::reflect::{List, Reflect, ReflectRef, TypePath, reflect_eq};

macro_rules! impl_dynamic_container {
    ($(#[$meta:meta])* $ty:ident, $path:expr) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $ty {
            element_type: TypeDesc,
            items: Vec<Box<dyn Reflect>>,
        }

        impl $ty {
            /// Creates an empty container of `element_type`.
            #[inline]
            pub fn new(element_type: TypeDesc) -> Self {
                Self {
                    element_type,
                    items: Vec::new(),
                }
            }

            #[inline]
            pub fn element_type(&self) -> &TypeDesc {
                &self.element_type
            }

            #[inline]
            pub fn into_parts(self) -> (TypeDesc, Vec<Box<dyn Reflect>>) {
                (self.element_type, self.items)
            }
        }

        impl TypePath for $ty {
            #[inline(always)]
            fn type_path() -> &'static str {
                $path
            }
        }

        impl Reflect for $ty {
            #[inline(always)]
            fn reflect_type_path(&self) -> &'static str {
                $path
            }

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::List(self)
            }
        }

        impl List for $ty {
            #[inline]
            fn len(&self) -> usize {
                self.items.len()
            }

            fn elements(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
                Box::new(self.items.iter().map(|item| &**item))
            }
        }
    };
}

impl_dynamic_container!(
    /// A decoded collection whose element type is only known by name.
    DynamicCollection,
    COLLECTION
);

impl DynamicCollection {
    #[inline]
    pub fn with_items(element_type: TypeDesc, items: Vec<Box<dyn Reflect>>) -> Self {
        Self {
            element_type,
            items,
        }
    }
}

impl_dynamic_container!(
    /// A decoded set whose element type is only known by name.
    ///
    /// Elements are unique by [`reflect_eq`], the first occurrence wins.
    ///
    /// [`reflect_eq`]: crate::reflect::reflect_eq
    DynamicSet,
    SET
);

impl DynamicSet {
    /// Collects `items`, dropping every element equal to an earlier one.
    pub fn with_items(
        element_type: TypeDesc,
        items: impl IntoIterator<Item = Box<dyn Reflect>>,
    ) -> Self {
        let mut set = Self::new(element_type);
        for item in items {
            set.insert(item);
        }
        set
    }

    /// Adds `value`, returns `false` if an equal element is present.
    pub fn insert(&mut self, value: Box<dyn Reflect>) -> bool {
        if self.contains(&*value) {
            return false;
        }
        self.items.push(value);
        true
    }

    pub fn contains(&self, value: &dyn Reflect) -> bool {
        self.items.iter().any(|item| reflect_eq(&**item, value))
    }
}

// -----------------------------------------------------------------------------
// Tests
