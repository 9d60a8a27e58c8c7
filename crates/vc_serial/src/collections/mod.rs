//! Containers restricted to one declared element type.
//!
//! [`Collection`] and [`Set`] are the static forms used in user types. While
//! decoding, the element type is only known by name, so the handlers produce
//! a [`DynamicCollection`] or [`DynamicSet`] carrying the declared element
//! type next to the decoded elements. The conversion to the static form
//! (through [`FromReflect`]) checks the declared type against `T` and
//! converts every element.
//!
//! [`FromReflect`]: crate::reflect::FromReflect

// -----------------------------------------------------------------------------
// Modules

mod collection;
mod dynamic;
mod set;

// -----------------------------------------------------------------------------
// Exports

pub use collection::Collection;
pub use dynamic::{DynamicCollection, DynamicSet};
pub use set::Set;

use alloc::format;

use crate::SerialError;
use crate::desc::{TypeDesc, canonical_primitive};
use crate::reflect::TypePath;

/// Checks that a decoded container of `container` declared with
/// `element_type` can become a container of `T`.
fn check_element_type<T: TypePath>(
    container: &str,
    element_type: &TypeDesc,
) -> Result<(), SerialError> {
    let declared = canonical_primitive(element_type.name()).unwrap_or(element_type.name());
    if element_type.is_union() || declared == T::type_path() {
        Ok(())
    } else {
        Err(SerialError::TypeMismatch {
            expected: format!("{container}<{}>", T::type_path()),
            found: format!("{container}<{element_type}>"),
        })
    }
}
