//! Subscribing handlers and their registry.
//!
//! A handler declares [`Subscription`]s: for a direction, a format and a
//! declared type name, which of its methods converts the value. The
//! navigator asks the [`HandlerRegistry`] for an exact match on
//! (direction, format, type name) before falling back to its own rules.
//!
//! Bundled handlers:
//!
//! - [`CollectionHandler`]: `Collection<T>` from and to sequences.
//! - [`SetHandler`]: `Set<T>` from and to sequences.
//! - [`UnionHandler`]: `union<A, B, ..>` from and to maps tagged with
//!   `__typename`.
//! - [`ValueHandler`]: registered value objects from and to their primitive.

// -----------------------------------------------------------------------------
// Modules

mod collection;
mod set;
mod union;
mod validate;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use collection::CollectionHandler;
pub use set::SetHandler;
pub use union::{TYPE_NAME_KEY, UnionHandler};
pub use value::ValueHandler;

use alloc::boxed::Box;
use alloc::vec::Vec;

use vc_utils::hash::HashMap;

use crate::SerialError;
use crate::context::{DeserializationContext, SerializationContext};
use crate::data::Data;
use crate::desc::TypeDesc;
use crate::format::{Direction, Format};
use crate::reflect::Reflect;

// -----------------------------------------------------------------------------
// Subscription

/// One routing entry of a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    pub direction: Direction,
    pub format: Format,
    pub type_name: &'static str,
    pub method: &'static str,
}

impl Subscription {
    /// Subscribes `type_name` in both directions for every format.
    ///
    /// Entries are ordered by format, serialization first.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_serial::format::{Direction, Format};
    /// use vc_serial::handler::Subscription;
    ///
    /// let subs: Vec<_> = Subscription::all_formats("Age", "serialize_value", "deserialize_value").collect();
    ///
    /// assert_eq!(subs.len(), 6);
    /// assert_eq!(subs[1].direction, Direction::Deserialization);
    /// assert_eq!(subs[2].format, Format::Xml);
    /// ```
    pub fn all_formats(
        type_name: &'static str,
        serialize: &'static str,
        deserialize: &'static str,
    ) -> impl Iterator<Item = Subscription> {
        Format::ALL.into_iter().flat_map(move |format| {
            [
                Subscription {
                    direction: Direction::Serialization,
                    format,
                    type_name,
                    method: serialize,
                },
                Subscription {
                    direction: Direction::Deserialization,
                    format,
                    type_name,
                    method: deserialize,
                },
            ]
        })
    }
}

// -----------------------------------------------------------------------------
// SubscribingHandler

/// A handler converting the values of the type names it subscribes to.
///
/// Validation failures are returned as [`HandlerError`] and end the
/// current call.
///
/// [`HandlerError`]: crate::HandlerError
pub trait SubscribingHandler: Send + Sync {
    /// The name reported in error messages.
    fn name(&self) -> &'static str;

    fn subscribing_methods(&self) -> Vec<Subscription>;

    fn serialize(
        &self,
        ctx: &mut SerializationContext<'_>,
        value: &dyn Reflect,
        ty: &TypeDesc,
    ) -> Result<Data, SerialError>;

    fn deserialize(
        &self,
        ctx: &mut DeserializationContext<'_>,
        data: Data,
        ty: &TypeDesc,
    ) -> Result<Box<dyn Reflect>, SerialError>;
}

// -----------------------------------------------------------------------------
// HandlerRegistry

#[derive(Debug, Clone, Copy)]
struct Route {
    handler: usize,
    method: &'static str,
}

/// Routes (direction, format, type name) to a handler.
///
/// A later subscription for the same triple replaces the earlier one.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn SubscribingHandler>>,
    routes: HashMap<(Direction, Format), HashMap<&'static str, Route>>,
}

impl HandlerRegistry {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for all of its subscriptions.
    pub fn register_subscribing_handler<H: SubscribingHandler + 'static>(
        &mut self,
        handler: H,
    ) -> &mut Self {
        self.register_boxed(Box::new(handler))
    }

    pub fn register_boxed(&mut self, handler: Box<dyn SubscribingHandler>) -> &mut Self {
        let index = self.handlers.len();
        for sub in handler.subscribing_methods() {
            log::debug!(
                "register `{}` for {} of `{}` as {}",
                handler.name(),
                sub.direction,
                sub.type_name,
                sub.format,
            );
            self.routes
                .entry((sub.direction, sub.format))
                .or_default()
                .insert(sub.type_name, Route {
                    handler: index,
                    method: sub.method,
                });
        }
        self.handlers.push(handler);
        self
    }

    /// Returns the handler and method subscribed to the exact triple.
    pub fn get(
        &self,
        direction: Direction,
        format: Format,
        type_name: &str,
    ) -> Option<(&dyn SubscribingHandler, &'static str)> {
        let route = self.routes.get(&(direction, format))?.get(type_name)?;
        let handler = self.handlers.get(route.handler)?;
        Some((&**handler, route.method))
    }

    #[inline]
    pub fn contains(&self, direction: Direction, format: Format, type_name: &str) -> bool {
        self.get(direction, format, type_name).is_some()
    }
}

impl core::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let names: Vec<&str> = self.handlers.iter().map(|h| h.name()).collect();
        f.debug_struct("HandlerRegistry")
            .field("handlers", &names)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests
