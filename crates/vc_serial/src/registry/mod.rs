//! Registered type information and name resolution.
//!
//! Handlers only ever see type *names* inside a [`TypeDesc`]. The
//! [`TypeRegistry`] is the capability map that turns those names back into
//! field lists and constructors, and answers the [`TypeResolver`] questions
//! asked during validation.
//!
//! [`TypeDesc`]: crate::desc::TypeDesc

// -----------------------------------------------------------------------------
// Modules

mod type_meta;

// -----------------------------------------------------------------------------
// Exports

pub use type_meta::{FieldInfo, TypeKind, TypeMeta, Typed};

use alloc::string::String;

use vc_utils::hash::HashMap;

use crate::SerialError;
use crate::desc::{self, TypeDesc};
use crate::error::ResolveError;

// -----------------------------------------------------------------------------
// TypeResolver

/// What a type name denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedType {
    /// A primitive, with its canonical name.
    Primitive(&'static str),
    /// The native sequence type.
    Array,
    /// `Collection`, `Set` or `union`.
    Container,
    /// A registered struct type.
    Class,
    /// A registered value object type.
    Value,
    /// A registered interface.
    Interface,
}

impl ResolvedType {
    /// Returns `true` for types that can be instantiated.
    #[inline]
    pub const fn is_concrete(self) -> bool {
        matches!(self, Self::Class | Self::Value)
    }
}

/// Name resolution used by the handler validation rules.
pub trait TypeResolver {
    /// Resolves `name` to a primitive, container, class or interface.
    fn resolve(&self, name: &str) -> Result<ResolvedType, ResolveError>;

    /// Returns `true` if `name` is a registered type with the value capability.
    fn implements_value(&self, name: &str) -> bool;
}

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of [`TypeMeta`] keyed by type name.
///
/// # Examples
///
/// ```
/// use vc_serial::registry::{ResolvedType, TypeMeta, TypeRegistry, TypeResolver};
///
/// let mut registry = TypeRegistry::new();
/// registry.insert(TypeMeta::interface("Media"));
///
/// assert_eq!(registry.resolve("int"), Ok(ResolvedType::Primitive("integer")));
/// assert_eq!(registry.resolve("Media"), Ok(ResolvedType::Interface));
/// assert!(registry.resolve("Missing").is_err());
/// ```
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<&'static str, TypeMeta>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T`, replacing a previous registration of the same name.
    pub fn register<T: Typed>(&mut self) -> Result<&mut Self, SerialError> {
        let meta = T::type_meta()?;
        self.insert(meta);
        Ok(self)
    }

    /// Inserts `meta` directly.
    pub fn insert(&mut self, meta: TypeMeta) {
        log::debug!("register type `{}`", meta.type_path());
        self.types.insert(meta.type_path(), meta);
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&TypeMeta> {
        self.types.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates over registered types in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeMeta> {
        self.types.values()
    }

    /// Checks that every alternative of every `union` declared in a field
    /// of a registered struct resolves to a concrete type.
    pub fn validate(&self) -> Result<(), SerialError> {
        for meta in self.iter() {
            for field in meta.fields() {
                let mut failure = None;
                field.ty().walk(&mut |ty: &TypeDesc| {
                    if failure.is_some() || !ty.is_union() {
                        return;
                    }
                    for alt in ty.params() {
                        match self.resolve(alt.name()) {
                            Ok(resolved) if resolved.is_concrete() => {}
                            Ok(_) => {
                                failure = Some(ResolveError::Unknown(String::from(alt.name())));
                                break;
                            }
                            Err(err) => {
                                failure = Some(err);
                                break;
                            }
                        }
                    }
                });
                if let Some(err) = failure {
                    return Err(SerialError::InvalidRegistration {
                        type_path: meta.type_path(),
                        field: field.name(),
                        source: alloc::boxed::Box::new(err.into()),
                    });
                }
            }
        }
        Ok(())
    }
}

impl TypeResolver for TypeRegistry {
    fn resolve(&self, name: &str) -> Result<ResolvedType, ResolveError> {
        if name.is_empty() {
            return Err(ResolveError::Empty);
        }
        if let Some(primitive) = desc::canonical_primitive(name) {
            return Ok(ResolvedType::Primitive(primitive));
        }
        match name {
            desc::ARRAY => return Ok(ResolvedType::Array),
            desc::COLLECTION | desc::SET | desc::UNION => return Ok(ResolvedType::Container),
            _ => {}
        }
        match self.types.get(name).map(TypeMeta::kind) {
            Some(TypeKind::Struct { .. }) => Ok(ResolvedType::Class),
            Some(TypeKind::Value { .. }) => Ok(ResolvedType::Value),
            Some(TypeKind::Interface) => Ok(ResolvedType::Interface),
            None => Err(ResolveError::Unknown(String::from(name))),
        }
    }

    fn implements_value(&self, name: &str) -> bool {
        self.types.get(name).is_some_and(TypeMeta::is_value)
    }
}

// -----------------------------------------------------------------------------
// Tests
