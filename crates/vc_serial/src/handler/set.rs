use alloc::boxed::Box;
use alloc::vec::Vec;

use super::collection::serialize_list;
use super::{SubscribingHandler, Subscription, validate};
use crate::SerialError;
use crate::collections::DynamicSet;
use crate::context::{DeserializationContext, SerializationContext};
use crate::data::Data;
use crate::desc::{ARRAY, SET, TypeDesc};
use crate::reflect::Reflect;

/// Converts `Set<T>` from and to sequences.
///
/// Serialization follows the set's iteration order. Decoding drops every
/// element structurally equal to an earlier one.
#[derive(Debug, Default, Clone, Copy)]
pub struct SetHandler;

impl SetHandler {
    pub const NAME: &'static str = "SetHandler";
}

impl SubscribingHandler for SetHandler {
    #[inline]
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn subscribing_methods(&self) -> Vec<Subscription> {
        Subscription::all_formats(SET, "serialize_set", "deserialize_set").collect()
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
        let element_type = validate::container_element_type(SET, ty, ctx.registry())?;
        let array = ctx.visit_array(data, &ty.with_name(ARRAY))?;

        Ok(Box::new(DynamicSet::with_items(
            element_type.clone(),
            array.into_items(),
        )))
    }
}
