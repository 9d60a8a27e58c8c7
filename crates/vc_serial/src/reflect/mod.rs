//! The object model the navigator and handlers work against.
//!
//! - [`Reflect`]: runtime type name and a structural view ([`ReflectRef`]).
//! - [`FromReflect`]: checked conversion out of a boxed dynamic value. This is
//!   where decoded, untyped data meets the static types again.
//! - [`Struct`], [`List`], [`ValueObject`]: the structural views.
//!
//! User types implement these through [`impl_reflect_struct!`],
//! [`impl_reflect_value!`] and [`impl_reflect_union!`].
//!
//! [`impl_reflect_struct!`]: crate::impl_reflect_struct
//! [`impl_reflect_value!`]: crate::impl_reflect_value
//! [`impl_reflect_union!`]: crate::impl_reflect_union

// -----------------------------------------------------------------------------
// Modules

mod array;
mod macros;
mod primitive;

// -----------------------------------------------------------------------------
// Exports

pub use array::DynamicArray;

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::SerialError;
use crate::data::Data;

// -----------------------------------------------------------------------------
// TypePath

/// The registered name of a type, available without an instance.
///
/// This is the name used in type declarations and as union discriminator.
pub trait TypePath {
    fn type_path() -> &'static str;
}

// -----------------------------------------------------------------------------
// Reflect

/// A value the navigator can walk.
pub trait Reflect: Any + fmt::Debug {
    /// The runtime type name.
    ///
    /// For union enums this is the name of the active alternative.
    fn reflect_type_path(&self) -> &'static str;

    fn reflect_ref(&self) -> ReflectRef<'_>;
}

impl dyn Reflect {
    #[inline]
    pub fn is<T: Reflect>(&self) -> bool {
        let any: &dyn Any = self;
        any.is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }

    /// Downcasts a boxed value, giving it back unchanged on mismatch.
    pub fn downcast<T: Reflect>(self: Box<Self>) -> Result<Box<T>, Box<dyn Reflect>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        #[expect(unsafe_code, reason = "the type is checked above")]
        let value = unsafe { any.downcast::<T>().unwrap_unchecked() };
        Ok(value)
    }
}

/// A structural view of a [`Reflect`] value.
pub enum ReflectRef<'a> {
    Primitive(Primitive<'a>),
    Struct(&'a dyn Struct),
    List(&'a dyn List),
    Value(&'a dyn ValueObject),
}

impl ReflectRef<'_> {
    /// A short name of the view kind, used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            ReflectRef::Primitive(_) => "primitive",
            ReflectRef::Struct(_) => "struct",
            ReflectRef::List(_) => "list",
            ReflectRef::Value(_) => "value object",
        }
    }
}

/// A borrowed primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive<'a> {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(&'a str),
}

impl Primitive<'_> {
    /// The primitive as plain data.
    pub fn to_data(self) -> Data {
        match self {
            Primitive::Bool(v) => Data::Bool(v),
            Primitive::Integer(v) => Data::Integer(v),
            Primitive::Float(v) => Data::Float(v),
            Primitive::String(v) => Data::String(String::from(v)),
        }
    }
}

impl fmt::Display for Primitive<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Bool(v) => fmt::Display::fmt(v, f),
            Primitive::Integer(v) => fmt::Display::fmt(v, f),
            Primitive::Float(v) => fmt::Display::fmt(v, f),
            Primitive::String(v) => f.write_str(v),
        }
    }
}

// -----------------------------------------------------------------------------
// Structural views

/// A value with named fields.
pub trait Struct: Reflect {
    /// The visible field names, in declaration order.
    fn field_names(&self) -> &'static [&'static str];

    fn field(&self, name: &str) -> Option<&dyn Reflect>;
}

/// An ordered sequence of values.
pub trait List: Reflect {
    fn len(&self) -> usize;

    fn elements(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;

    /// Exports the elements in iteration order.
    fn to_array(&self) -> Vec<&dyn Reflect> {
        self.elements().collect()
    }
}

/// A single-primitive wrapper whose constructor enforces validity.
pub trait ValueObject: Reflect {
    fn value(&self) -> Primitive<'_>;
}

/// Construction of a value object from decoded data.
///
/// Rejections are the value object's own errors, the handlers pass them
/// through unchanged.
pub trait FromValue: Sized {
    type Error: core::error::Error + Send + Sync + 'static;

    fn from_value(data: Data) -> Result<Self, Self::Error>;
}

// -----------------------------------------------------------------------------
// FromReflect

/// Checked conversion from a boxed dynamic value.
pub trait FromReflect: Sized {
    fn from_reflect(value: Box<dyn Reflect>) -> Result<Self, SerialError>;
}

impl FromReflect for Box<dyn Reflect> {
    #[inline]
    fn from_reflect(value: Box<dyn Reflect>) -> Result<Self, SerialError> {
        Ok(value)
    }
}

// -----------------------------------------------------------------------------
// Structural equality

/// Compares two values by runtime type and structure.
///
/// Structs compare their visible fields, lists their elements in order and
/// value objects their wrapped primitive.
///
/// # Examples
///
/// ```
/// use vc_serial::reflect::reflect_eq;
///
/// assert!(reflect_eq(&String::from("a"), &String::from("a")));
/// assert!(!reflect_eq(&String::from("a"), &String::from("b")));
/// assert!(!reflect_eq(&1_i64, &String::from("1")));
/// ```
pub fn reflect_eq(a: &dyn Reflect, b: &dyn Reflect) -> bool {
    if a.reflect_type_path() != b.reflect_type_path() {
        return false;
    }
    match (a.reflect_ref(), b.reflect_ref()) {
        (ReflectRef::Primitive(a), ReflectRef::Primitive(b)) => a == b,
        (ReflectRef::Value(a), ReflectRef::Value(b)) => a.value() == b.value(),
        (ReflectRef::List(a), ReflectRef::List(b)) => {
            a.len() == b.len() && a.elements().zip(b.elements()).all(|(a, b)| reflect_eq(a, b))
        }
        (ReflectRef::Struct(a), ReflectRef::Struct(b)) => {
            a.field_names().iter().all(|&name| match (a.field(name), b.field(name)) {
                (Some(a), Some(b)) => reflect_eq(a, b),
                (None, None) => true,
                _ => false,
            })
        }
        _ => false,
    }
}

/// Moves the concrete `T` out of `value`.
pub fn downcast_boxed<T: Reflect + TypePath>(value: Box<dyn Reflect>) -> Result<T, SerialError> {
    match value.downcast::<T>() {
        Ok(value) => Ok(*value),
        Err(value) => Err(SerialError::TypeMismatch {
            expected: String::from(T::type_path()),
            found: String::from(value.reflect_type_path()),
        }),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{FromReflect, Primitive, Reflect, ReflectRef, downcast_boxed, reflect_eq};
    use crate::SerialError;

    #[test]
    fn downcast_keeps_value_on_mismatch() {
        let value: Box<dyn Reflect> = Box::new(40_i64);
        let value = value.downcast::<String>().unwrap_err();
        assert_eq!(*value.downcast::<i64>().unwrap(), 40);
    }

    #[test]
    fn mismatch_error_names_both_types() {
        let value: Box<dyn Reflect> = Box::new(String::from("x"));
        match downcast_boxed::<i64>(value) {
            Err(SerialError::TypeMismatch { expected, found }) => {
                assert_eq!(expected, "integer");
                assert_eq!(found, "string");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[derive(Debug)]
    struct Author {
        name: String,
        books: Vec<String>,
    }

    crate::impl_reflect_struct!(Author as "Author" { name, books });

    #[test]
    fn structural_equality() {
        let a = Author {
            name: "John Doe".into(),
            books: vec!["Design patterns".into()],
        };
        let b = Author {
            name: "John Doe".into(),
            books: vec!["Design patterns".into()],
        };
        let c = Author {
            name: "John Doe".into(),
            books: Vec::new(),
        };

        assert!(reflect_eq(&a, &b));
        assert!(!reflect_eq(&a, &c));
        assert!(!reflect_eq(&a, &String::from("John Doe")));
    }

    #[test]
    fn primitive_views() {
        let value = String::from("John Doe");
        match value.reflect_ref() {
            ReflectRef::Primitive(p) => assert_eq!(p, Primitive::String("John Doe")),
            other => panic!("unexpected {}", other.kind()),
        }
        assert_eq!(i64::from_reflect(Box::new(25_i64)).unwrap(), 25);
    }
}
