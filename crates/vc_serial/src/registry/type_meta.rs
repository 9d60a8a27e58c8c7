use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::SerialError;
use crate::construct::FieldValues;
use crate::data::{Data, XmlHint};
use crate::desc::{ParseError, TypeDesc};
use crate::error::ValueError;
use crate::reflect::{FromValue, Reflect, TypePath, ValueObject};

// -----------------------------------------------------------------------------
// Typed

/// A type that can describe itself to a [`TypeRegistry`].
///
/// [`TypeRegistry`]: crate::registry::TypeRegistry
pub trait Typed: Reflect + TypePath {
    fn type_meta() -> Result<TypeMeta, SerialError>;
}

// -----------------------------------------------------------------------------
// FieldInfo

/// A declared field of a struct type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    name: &'static str,
    serialized_name: &'static str,
    ty: TypeDesc,
    hint: XmlHint,
}

impl FieldInfo {
    #[inline]
    pub fn new(name: &'static str, ty: TypeDesc) -> Self {
        Self {
            name,
            serialized_name: name,
            ty,
            hint: XmlHint::default(),
        }
    }

    /// Creates a field from the textual type declaration.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_serial::registry::FieldInfo;
    ///
    /// let field = FieldInfo::parse("employees", "Collection<Employee>")
    ///     .unwrap()
    ///     .with_xml_entry("employee");
    ///
    /// assert_eq!(field.ty().name(), "Collection");
    /// assert_eq!(field.hint().entry_name, Some("employee"));
    /// ```
    pub fn parse(name: &'static str, ty: &str) -> Result<Self, ParseError> {
        Ok(Self::new(name, TypeDesc::parse(ty)?))
    }

    /// Uses a different key on the wire.
    #[inline]
    pub fn with_serialized_name(mut self, serialized_name: &'static str) -> Self {
        self.serialized_name = serialized_name;
        self
    }

    /// Renders the field as an attribute in DOM formats.
    #[inline]
    pub fn as_xml_attribute(mut self) -> Self {
        self.hint.attribute = true;
        self
    }

    /// Names the element of each item when the field is a sequence.
    #[inline]
    pub fn with_xml_entry(mut self, entry_name: &'static str) -> Self {
        self.hint.entry_name = Some(entry_name);
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn serialized_name(&self) -> &'static str {
        self.serialized_name
    }

    #[inline]
    pub fn ty(&self) -> &TypeDesc {
        &self.ty
    }

    #[inline]
    pub fn hint(&self) -> XmlHint {
        self.hint
    }
}

// -----------------------------------------------------------------------------
// TypeMeta

type ConstructStruct =
    Box<dyn Fn(&mut FieldValues) -> Result<Box<dyn Reflect>, SerialError> + Send + Sync>;

type ConstructValue = fn(Data) -> Result<Box<dyn Reflect>, ValueError>;

/// The shape of a registered type.
pub enum TypeKind {
    /// A class with ordered fields and a constructor over their values.
    Struct {
        fields: Vec<FieldInfo>,
        construct: ConstructStruct,
    },
    /// A value object built from a single primitive.
    Value { construct: ConstructValue },
    /// A name other types may declare to implement.
    Interface,
}

/// Registered information about one type.
pub struct TypeMeta {
    type_path: &'static str,
    kind: TypeKind,
    xml_root_name: Option<&'static str>,
}

impl TypeMeta {
    /// Describes a struct type.
    ///
    /// `construct` receives the field values gathered during
    /// deserialization, see [`FieldValues::take`].
    pub fn structure<T: Reflect + TypePath>(
        construct: fn(&mut FieldValues) -> Result<T, SerialError>,
    ) -> Self {
        Self::new(
            T::type_path(),
            TypeKind::Struct {
                fields: Vec::new(),
                construct: Box::new(move |values| {
                    construct(values).map(|value| Box::new(value) as Box<dyn Reflect>)
                }),
            },
        )
    }

    /// Describes a value object type.
    pub fn value<T: ValueObject + TypePath + FromValue>() -> Self {
        Self::new(
            T::type_path(),
            TypeKind::Value {
                construct: |data| match T::from_value(data) {
                    Ok(value) => Ok(Box::new(value)),
                    Err(err) => Err(ValueError::new(err)),
                },
            },
        )
    }

    /// Describes an interface name.
    #[inline]
    pub fn interface(type_path: &'static str) -> Self {
        Self::new(type_path, TypeKind::Interface)
    }

    #[inline]
    fn new(type_path: &'static str, kind: TypeKind) -> Self {
        Self {
            type_path,
            kind,
            xml_root_name: None,
        }
    }

    /// Appends a field, has no effect on non-struct types.
    pub fn with_field(mut self, field: FieldInfo) -> Self {
        if let TypeKind::Struct { fields, .. } = &mut self.kind {
            fields.push(field);
        }
        self
    }

    /// Element name used when this type is the document root in DOM formats.
    #[inline]
    pub fn with_xml_root(mut self, name: &'static str) -> Self {
        self.xml_root_name = Some(name);
        self
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// The declared fields, empty for non-struct types.
    pub fn fields(&self) -> &[FieldInfo] {
        match &self.kind {
            TypeKind::Struct { fields, .. } => fields,
            _ => &[],
        }
    }

    #[inline]
    pub fn xml_root_name(&self) -> Option<&'static str> {
        self.xml_root_name
    }

    #[inline]
    pub fn is_value(&self) -> bool {
        matches!(self.kind, TypeKind::Value { .. })
    }

    /// Runs the struct constructor.
    pub fn construct(&self, values: &mut FieldValues) -> Result<Box<dyn Reflect>, SerialError> {
        match &self.kind {
            TypeKind::Struct { construct, .. } => construct(values),
            _ => Err(SerialError::NotConstructible(self.type_path.into())),
        }
    }

    /// Runs the value object constructor.
    pub fn construct_value(&self, data: Data) -> Result<Box<dyn Reflect>, SerialError> {
        match &self.kind {
            TypeKind::Value { construct } => Ok(construct(data)?),
            _ => Err(SerialError::NotConstructible(self.type_path.into())),
        }
    }
}

impl fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            TypeKind::Struct { .. } => "struct",
            TypeKind::Value { .. } => "value",
            TypeKind::Interface => "interface",
        };
        f.debug_struct("TypeMeta")
            .field("type_path", &self.type_path)
            .field("kind", &kind)
            .field("fields", &self.fields())
            .finish()
    }
}
