//! Navigation state of a single (de)serialization call.
//!
//! The contexts walk values against declared [`TypeDesc`]s. For every value
//! they first look for a subscribed handler, then fall back to the built-in
//! rules: primitives go straight to the visitor, `array` is walked item by
//! item, and registered structs are walked field by field.
//!
//! Handlers receive the context and call back into it for nested values,
//! which is the only kind of recursion in a call.
//!
//! [`TypeDesc`]: crate::desc::TypeDesc

// -----------------------------------------------------------------------------
// Modules

mod de;
mod ser;

// -----------------------------------------------------------------------------
// Exports

pub use de::DeserializationContext;
pub use ser::SerializationContext;

use crate::construct::{AccessorStrategy, ObjectConstructor};
use crate::handler::HandlerRegistry;
use crate::registry::TypeRegistry;

/// Read-only state shared by the contexts of one call.
#[derive(Clone, Copy)]
pub struct ContextConfig<'a> {
    pub registry: &'a TypeRegistry,
    pub handlers: &'a HandlerRegistry,
    pub constructor: &'a dyn ObjectConstructor,
    pub accessor: &'a dyn AccessorStrategy,
    /// Emit fields without a value as null instead of skipping them.
    pub serialize_null: bool,
}
