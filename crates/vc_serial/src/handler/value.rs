use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use super::{SubscribingHandler, Subscription, validate};
use crate::SerialError;
use crate::context::{DeserializationContext, SerializationContext};
use crate::data::Data;
use crate::desc::TypeDesc;
use crate::error::ResolveError;
use crate::reflect::{Reflect, ReflectRef};

/// Converts value objects from and to their primitive.
///
/// Subscribes every value class it is created with. Declarations name the
/// primitive the wire value is read as, for example `Age<integer>`.
///
/// # Examples
///
/// ```
/// use vc_serial::handler::{SubscribingHandler, ValueHandler};
///
/// let handler = ValueHandler::new(["Age", "Email"]);
///
/// assert_eq!(handler.subscribing_methods().len(), 12);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ValueHandler {
    types: Vec<&'static str>,
}

impl ValueHandler {
    pub const NAME: &'static str = "ValueHandler";

    pub fn new(types: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            types: types.into_iter().collect(),
        }
    }

    /// The subscribed value classes.
    #[inline]
    pub fn types(&self) -> &[&'static str] {
        &self.types
    }
}

impl SubscribingHandler for ValueHandler {
    #[inline]
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn subscribing_methods(&self) -> Vec<Subscription> {
        self.types
            .iter()
            .flat_map(|&ty| Subscription::all_formats(ty, "serialize_value", "deserialize_value"))
            .collect()
    }

    /// Emits the wrapped primitive, as a text node in DOM formats.
    fn serialize(
        &self,
        ctx: &mut SerializationContext<'_>,
        value: &dyn Reflect,
        _ty: &TypeDesc,
    ) -> Result<Data, SerialError> {
        let ReflectRef::Value(object) = value.reflect_ref() else {
            return Err(SerialError::UnexpectedData {
                expected: "value object",
                found: value.reflect_ref().kind(),
            });
        };
        let primitive = object.value();
        if ctx.format().is_dom() {
            Ok(ctx.visitor().visit_text(primitive.to_string()))
        } else {
            Ok(ctx.visitor().visit_primitive(primitive))
        }
    }

    /// Reads the wire value as the declared inner type and hands it to the
    /// value object's constructor, whose errors pass through unchanged.
    fn deserialize(
        &self,
        ctx: &mut DeserializationContext<'_>,
        data: Data,
        ty: &TypeDesc,
    ) -> Result<Box<dyn Reflect>, SerialError> {
        let registry = ctx.registry();
        let inner_type = validate::value_inner_type(Self::NAME, ty, registry)?;
        let data = match inner_type {
            "integer" | "int" => ctx.visitor().visit_integer(data),
            "string" => ctx.visitor().visit_string(data),
            _ => data,
        };
        let meta = registry
            .get(ty.name())
            .ok_or_else(|| ResolveError::Unknown(String::from(ty.name())))?;
        meta.construct_value(data)
    }
}
