/// Implements [`TypePath`], [`Reflect`], [`Struct`] and [`FromReflect`] for a
/// struct with named fields.
///
/// Only the listed fields are visible to the navigator.
///
/// # Examples
///
/// ```
/// use vc_serial::impl_reflect_struct;
/// use vc_serial::reflect::{Reflect, ReflectRef};
///
/// #[derive(Debug, PartialEq)]
/// struct Author {
///     name: String,
/// }
///
/// impl_reflect_struct!(Author as "Author" { name });
///
/// let author = Author { name: "John Doe".into() };
/// let ReflectRef::Struct(view) = author.reflect_ref() else { unreachable!() };
///
/// assert_eq!(author.reflect_type_path(), "Author");
/// assert!(view.field("name").is_some());
/// assert!(view.field("age").is_none());
/// ```
///
/// [`TypePath`]: crate::reflect::TypePath
/// [`Reflect`]: crate::reflect::Reflect
/// [`Struct`]: crate::reflect::Struct
/// [`FromReflect`]: crate::reflect::FromReflect
#[macro_export]
macro_rules! impl_reflect_struct {
    ($ty:ty as $path:literal { $($field:ident),* $(,)? }) => {
        impl $crate::reflect::TypePath for $ty {
            #[inline(always)]
            fn type_path() -> &'static str {
                $path
            }
        }

        impl $crate::reflect::Reflect for $ty {
            #[inline(always)]
            fn reflect_type_path(&self) -> &'static str {
                $path
            }

            #[inline]
            fn reflect_ref(&self) -> $crate::reflect::ReflectRef<'_> {
                $crate::reflect::ReflectRef::Struct(self)
            }
        }

        impl $crate::reflect::Struct for $ty {
            #[inline]
            fn field_names(&self) -> &'static [&'static str] {
                &[$( ::core::stringify!($field) ),*]
            }

            fn field(&self, name: &str) -> ::core::option::Option<&dyn $crate::reflect::Reflect> {
                match name {
                    $( ::core::stringify!($field) => ::core::option::Option::Some(&self.$field), )*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl $crate::reflect::FromReflect for $ty {
            #[inline]
            fn from_reflect(
                value: $crate::__macro_exports::Box<dyn $crate::reflect::Reflect>,
            ) -> ::core::result::Result<Self, $crate::SerialError> {
                $crate::reflect::downcast_boxed(value)
            }
        }
    };
}

/// Implements [`TypePath`], [`Reflect`] and [`FromReflect`] for a type that
/// already implements [`ValueObject`].
///
/// # Examples
///
/// ```
/// use vc_serial::impl_reflect_value;
/// use vc_serial::reflect::{Primitive, ValueObject};
///
/// #[derive(Debug)]
/// struct Age(i64);
///
/// impl ValueObject for Age {
///     fn value(&self) -> Primitive<'_> {
///         Primitive::Integer(self.0)
///     }
/// }
///
/// impl_reflect_value!(Age as "Age");
///
/// assert_eq!(Age(40).value(), Primitive::Integer(40));
/// ```
///
/// [`TypePath`]: crate::reflect::TypePath
/// [`Reflect`]: crate::reflect::Reflect
/// [`FromReflect`]: crate::reflect::FromReflect
/// [`ValueObject`]: crate::reflect::ValueObject
#[macro_export]
macro_rules! impl_reflect_value {
    ($ty:ty as $path:literal) => {
        impl $crate::reflect::TypePath for $ty {
            #[inline(always)]
            fn type_path() -> &'static str {
                $path
            }
        }

        impl $crate::reflect::Reflect for $ty {
            #[inline(always)]
            fn reflect_type_path(&self) -> &'static str {
                $path
            }

            #[inline]
            fn reflect_ref(&self) -> $crate::reflect::ReflectRef<'_> {
                $crate::reflect::ReflectRef::Value(self)
            }
        }

        impl $crate::reflect::FromReflect for $ty {
            #[inline]
            fn from_reflect(
                value: $crate::__macro_exports::Box<dyn $crate::reflect::Reflect>,
            ) -> ::core::result::Result<Self, $crate::SerialError> {
                $crate::reflect::downcast_boxed(value)
            }
        }
    };
}

/// Implements [`TypePath`], [`Reflect`] and [`FromReflect`] for an enum whose
/// variants are the alternatives of a union.
///
/// Each variant wraps exactly one alternative. The enum is transparent:
/// its runtime type name and structure are those of the active variant, and
/// converting back picks the variant by the decoded value's type.
///
/// # Examples
///
/// ```
/// use vc_serial::{impl_reflect_struct, impl_reflect_union};
/// use vc_serial::reflect::{FromReflect, Reflect};
///
/// #[derive(Debug, PartialEq)]
/// struct Book { title: String }
/// #[derive(Debug, PartialEq)]
/// struct Movie { title: String }
///
/// impl_reflect_struct!(Book as "Book" { title });
/// impl_reflect_struct!(Movie as "Movie" { title });
///
/// #[derive(Debug, PartialEq)]
/// enum Media {
///     Book(Book),
///     Movie(Movie),
/// }
///
/// impl_reflect_union!(Media as "Media" { Book(Book), Movie(Movie) });
///
/// let media = Media::Movie(Movie { title: "The matrix".into() });
/// assert_eq!(media.reflect_type_path(), "Movie");
///
/// let decoded = Media::from_reflect(Box::new(Book { title: "Design patterns".into() })).unwrap();
/// assert_eq!(decoded, Media::Book(Book { title: "Design patterns".into() }));
/// ```
///
/// [`TypePath`]: crate::reflect::TypePath
/// [`Reflect`]: crate::reflect::Reflect
/// [`FromReflect`]: crate::reflect::FromReflect
#[macro_export]
macro_rules! impl_reflect_union {
    ($ty:ident as $path:literal { $($variant:ident($inner:ty)),+ $(,)? }) => {
        impl $crate::reflect::TypePath for $ty {
            #[inline(always)]
            fn type_path() -> &'static str {
                $path
            }
        }

        impl $crate::reflect::Reflect for $ty {
            fn reflect_type_path(&self) -> &'static str {
                match self {
                    $( $ty::$variant(inner) => $crate::reflect::Reflect::reflect_type_path(inner), )+
                }
            }

            fn reflect_ref(&self) -> $crate::reflect::ReflectRef<'_> {
                match self {
                    $( $ty::$variant(inner) => $crate::reflect::Reflect::reflect_ref(inner), )+
                }
            }
        }

        impl $crate::reflect::FromReflect for $ty {
            fn from_reflect(
                value: $crate::__macro_exports::Box<dyn $crate::reflect::Reflect>,
            ) -> ::core::result::Result<Self, $crate::SerialError> {
                $(
                    if value.is::<$inner>() {
                        return <$inner as $crate::reflect::FromReflect>::from_reflect(value)
                            .map($ty::$variant);
                    }
                )+
                $crate::reflect::downcast_boxed(value)
            }
        }
    };
}
