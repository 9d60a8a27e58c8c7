use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use super::{SubscribingHandler, Subscription, validate};
use crate::SerialError;
use crate::context::{DeserializationContext, SerializationContext};
use crate::data::{Data, Entry};
use crate::desc::{TypeDesc, UNION};
use crate::error::HandlerError;
use crate::reflect::{Primitive, Reflect};

/// The discriminator key of a serialized union value.
pub const TYPE_NAME_KEY: &str = "__typename";

/// Converts `union<A, B, ..>` values from and to tagged maps.
///
/// The value is written as its concrete alternative with a leading
/// `__typename` entry naming that alternative. Reading removes the entry
/// and decodes the rest as the named alternative. Either way the name must
/// be one of the declared alternatives.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnionHandler;

impl UnionHandler {
    pub const NAME: &'static str = "UnionHandler";
}

impl SubscribingHandler for UnionHandler {
    #[inline]
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn subscribing_methods(&self) -> Vec<Subscription> {
        Subscription::all_formats(UNION, "serialize_union", "deserialize_union").collect()
    }

    fn serialize(
        &self,
        ctx: &mut SerializationContext<'_>,
        value: &dyn Reflect,
        ty: &TypeDesc,
    ) -> Result<Data, SerialError> {
        let class_name = value.reflect_type_path();
        let alternative = validate::union_alternative(Self::NAME, ty, class_name)?;

        let data = ctx.without_visiting(value, |ctx| ctx.accept(value, alternative))?;
        let mut entries = match data {
            Data::Map(entries) => entries,
            other => {
                return Err(SerialError::UnexpectedData {
                    expected: "map",
                    found: other.kind(),
                });
            }
        };
        let tag = ctx.visitor().visit_primitive(Primitive::String(class_name));
        entries.insert(0, Entry::new(TYPE_NAME_KEY, tag));
        Ok(ctx.visitor().visit_map(entries))
    }

    fn deserialize(
        &self,
        ctx: &mut DeserializationContext<'_>,
        mut data: Data,
        ty: &TypeDesc,
    ) -> Result<Box<dyn Reflect>, SerialError> {
        let Some(tag) = data.take(TYPE_NAME_KEY) else {
            return Err(HandlerError::TypeNameMissingInData { handler: Self::NAME }.into());
        };
        let class_name = ctx
            .visitor()
            .visit_string(tag)
            .as_str()
            .map(String::from)
            .unwrap_or_default();
        validate::union_alternative(Self::NAME, ty, &class_name)?;

        ctx.accept(data, &TypeDesc::new(class_name))
    }
}
