use alloc::boxed::Box;
use alloc::string::String;

use super::{FromReflect, Primitive, Reflect, ReflectRef, TypePath, downcast_boxed};
use crate::SerialError;

macro_rules! impl_primitive {
    ($ty:ty, $path:literal, |$this:ident| $view:expr) => {
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
                let $this = self;
                ReflectRef::Primitive($view)
            }
        }

        impl FromReflect for $ty {
            #[inline]
            fn from_reflect(value: Box<dyn Reflect>) -> Result<Self, SerialError> {
                downcast_boxed(value)
            }
        }
    };
}

impl_primitive!(bool, "boolean", |v| Primitive::Bool(*v));
impl_primitive!(i64, "integer", |v| Primitive::Integer(*v));
impl_primitive!(f64, "float", |v| Primitive::Float(*v));
impl_primitive!(String, "string", |v| Primitive::String(v.as_str()));
