use alloc::boxed::Box;
use alloc::vec::Vec;

use super::{SubscribingHandler, Subscription, validate};
use crate::SerialError;
use crate::collections::DynamicCollection;
use crate::context::{DeserializationContext, SerializationContext};
use crate::data::Data;
use crate::desc::{ARRAY, COLLECTION, TypeDesc};
use crate::reflect::{Reflect, ReflectRef};

/// Converts `Collection<T>` from and to sequences.
///
/// Elements keep their order and are walked as `T` in both directions.
#[derive(Debug, Default, Clone, Copy)]
pub struct CollectionHandler;

impl CollectionHandler {
    pub const NAME: &'static str = "CollectionHandler";
}

impl SubscribingHandler for CollectionHandler {
    #[inline]
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn subscribing_methods(&self) -> Vec<Subscription> {
        Subscription::all_formats(COLLECTION, "serialize_collection", "deserialize_collection")
            .collect()
    }

    #[inline]
    fn serialize(
        &self,
        ctx: &mut SerializationContext<'_>,
        value: &dyn Reflect,
        ty: &TypeDesc,
    ) -> Result<Data, SerialError> {
        serialize_list(ctx, value, ty)
    }

    fn deserialize(
        &self,
        ctx: &mut DeserializationContext<'_>,
        data: Data,
        ty: &TypeDesc,
    ) -> Result<Box<dyn Reflect>, SerialError> {
        let element_type = validate::container_element_type(COLLECTION, ty, ctx.registry())?;
        let array = ctx.visit_array(data, &ty.with_name(ARRAY))?;

        Ok(Box::new(DynamicCollection::with_items(
            element_type.clone(),
            array.into_items(),
        )))
    }
}

/// Serializes a container as an `array` of the same parameters.
///
/// The container itself is unmarked while its elements are walked.
pub(super) fn serialize_list(
    ctx: &mut SerializationContext<'_>,
    value: &dyn Reflect,
    ty: &TypeDesc,
) -> Result<Data, SerialError> {
    let ReflectRef::List(list) = value.reflect_ref() else {
        return Err(SerialError::UnexpectedData {
            expected: "list",
            found: value.reflect_ref().kind(),
        });
    };
    let array_type = ty.with_name(ARRAY);
    ctx.without_visiting(value, |ctx| ctx.visit_array(list.to_array(), &array_type))
}
