//! Parsed type declarations.
//!
//! A [`TypeDesc`] is the structured form of a declaration such as
//! `Collection<Employee>` or `union<Book, Movie>`: a name plus an ordered list
//! of parameters, each of which is again a [`TypeDesc`].
//!
//! Descriptors are plain values. Handlers that need a modified descriptor
//! (for example retagging a collection as `array`) build a copy through
//! [`TypeDesc::with_name`] and never mutate the one they were given.

// -----------------------------------------------------------------------------
// Modules

mod parser;

// -----------------------------------------------------------------------------
// Exports

pub use parser::ParseError;

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

// -----------------------------------------------------------------------------
// Reserved names

/// Name of the host's native sequence type.
pub const ARRAY: &str = "array";

/// Name of the tagged union type.
pub const UNION: &str = "union";

/// Name of the typed collection container.
pub const COLLECTION: &str = "Collection";

/// Name of the typed set container.
pub const SET: &str = "Set";

/// Returns the canonical primitive name for `name`, if it denotes one.
///
/// Aliases collapse onto a single spelling: `int` is `integer`,
/// `double` is `float` and `bool` is `boolean`.
///
/// # Examples
///
/// ```
/// use vc_serial::desc::canonical_primitive;
///
/// assert_eq!(canonical_primitive("int"), Some("integer"));
/// assert_eq!(canonical_primitive("string"), Some("string"));
/// assert_eq!(canonical_primitive("Employee"), None);
/// ```
pub fn canonical_primitive(name: &str) -> Option<&'static str> {
    match name {
        "integer" | "int" => Some("integer"),
        "float" | "double" => Some("float"),
        "string" => Some("string"),
        "boolean" | "bool" => Some("boolean"),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// TypeDesc

/// A declared type: a name and its ordered type parameters.
///
/// Equality is structural.
///
/// # Examples
///
/// ```
/// use vc_serial::desc::TypeDesc;
///
/// let ty: TypeDesc = "Collection<Employee>".parse().unwrap();
///
/// assert_eq!(ty.name(), "Collection");
/// assert_eq!(ty.param_count(), 1);
/// assert_eq!(ty.param(0).unwrap().name(), "Employee");
///
/// let array = ty.with_name("array");
/// assert_eq!(array.to_string(), "array<Employee>");
/// assert_eq!(ty.to_string(), "Collection<Employee>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDesc {
    name: Cow<'static, str>,
    params: Vec<TypeDesc>,
}

impl TypeDesc {
    /// Creates a descriptor without parameters.
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Creates a descriptor with the given parameters.
    #[inline]
    pub fn with_params(name: impl Into<Cow<'static, str>>, params: Vec<TypeDesc>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// Parses the textual form `name<param, ...>`.
    ///
    /// See [`ParseError`] for the failure cases.
    #[inline]
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        parser::parse(input)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn param(&self, index: usize) -> Option<&TypeDesc> {
        self.params.get(index)
    }

    #[inline]
    pub fn params(&self) -> &[TypeDesc] {
        &self.params
    }

    /// Returns a copy of this descriptor carrying a different name.
    ///
    /// The parameters are kept as they are.
    pub fn with_name(&self, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            params: self.params.clone(),
        }
    }

    /// Returns `true` if the name is a primitive or one of its aliases.
    #[inline]
    pub fn is_primitive(&self) -> bool {
        canonical_primitive(&self.name).is_some()
    }

    /// Returns `true` for the reserved `union` name.
    #[inline]
    pub fn is_union(&self) -> bool {
        self.name == UNION
    }

    /// Returns `true` for the reserved `array` name.
    #[inline]
    pub fn is_array(&self) -> bool {
        self.name == ARRAY
    }

    /// Visits this descriptor and every nested parameter, depth first.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a TypeDesc)) {
        f(self);
        for param in &self.params {
            param.walk(f);
        }
    }
}

impl From<&'static str> for TypeDesc {
    /// Creates a parameterless descriptor, the input is not parsed.
    #[inline]
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeDesc {
    #[inline]
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl FromStr for TypeDesc {
    type Err = ParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse(s)
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some((first, rest)) = self.params.split_first() {
            write!(f, "<{first}")?;
            for param in rest {
                write!(f, ", {param}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests
