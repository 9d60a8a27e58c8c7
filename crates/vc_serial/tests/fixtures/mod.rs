#![allow(dead_code)]

use vc_serial::construct::{
    DefaultAccessorStrategy, DefaultObjectConstructor, TypedCollectionAccessorStrategy,
    TypedCollectionObjectConstructor,
};
use vc_serial::reflect::{FromValue, Primitive, ValueObject};
use vc_serial::registry::{FieldInfo, TypeMeta, Typed};
use vc_serial::{Data, SerialError, Serializer, SerializerBuilder, impl_reflect_value};

pub mod collection;
pub mod set;
pub mod union;

// -----------------------------------------------------------------------------
// Age

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Age(i64);

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum AgeError {
    #[error("invalid value given for `Age`, value must be of type integer but is of type {0}")]
    NotAnInteger(&'static str),
    #[error("invalid value given for `Age`, value must be between 0 and 120 but value is {0}")]
    OutOfRange(i64),
}

impl Age {
    pub fn new(value: i64) -> Result<Self, AgeError> {
        if (0..=120).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AgeError::OutOfRange(value))
        }
    }

    pub fn of(value: i64) -> Self {
        Self::new(value).unwrap()
    }
}

impl FromValue for Age {
    type Error = AgeError;

    fn from_value(data: Data) -> Result<Self, Self::Error> {
        match data {
            Data::Integer(value) => Self::new(value),
            other => Err(AgeError::NotAnInteger(other.kind())),
        }
    }
}

impl ValueObject for Age {
    fn value(&self) -> Primitive<'_> {
        Primitive::Integer(self.0)
    }
}

impl_reflect_value!(Age as "Age");

impl Typed for Age {
    fn type_meta() -> Result<TypeMeta, SerialError> {
        Ok(TypeMeta::value::<Self>())
    }
}

// -----------------------------------------------------------------------------
// Serializer

/// Everything registered, containers kept present by the decorators.
pub fn builder() -> SerializerBuilder {
    Serializer::builder()
        .register_type::<Age>()
        .register_type::<collection::Employee>()
        .register_type::<collection::Company>()
        .register_type::<set::Employee>()
        .register_type::<set::Company>()
        .register_type::<union::Author>()
        .register_type::<union::Book>()
        .register_type::<union::Movie>()
        .register_type::<union::MediaContainer>()
        .register_type::<union::Employee>()
        .add_default_handlers()
        .add_value_handler(["Age"])
        .with_object_constructor(TypedCollectionObjectConstructor::new(DefaultObjectConstructor))
        .with_accessor_strategy(TypedCollectionAccessorStrategy::new(DefaultAccessorStrategy))
}

pub fn serializer() -> Serializer {
    builder().build().unwrap()
}

pub fn field(name: &'static str, ty: &str) -> Result<FieldInfo, SerialError> {
    Ok(FieldInfo::parse(name, ty)?)
}

pub const COMPANY_NAME: &str = "Apple Computer, Inc.";
