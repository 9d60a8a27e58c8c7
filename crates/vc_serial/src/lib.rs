#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Lets the exported macros name `vc_serial` in doc tests and in the crate.
extern crate self as vc_serial;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod data;
mod error;
mod serializer;

pub mod collections;
pub mod construct;
pub mod context;
pub mod desc;
pub mod format;
pub mod handler;
pub mod reflect;
pub mod registry;
pub mod visitor;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use data::{Data, Entry, XmlHint};
pub use error::{HandlerError, ResolveError, SerialError, ValueError};
pub use format::{Direction, Format};
pub use serializer::{Serializer, SerializerBuilder};

#[doc(hidden)]
pub mod __macro_exports {
    pub use alloc::boxed::Box;
}
