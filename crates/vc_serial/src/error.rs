use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::error::Error as CoreError;
use core::fmt;

use thiserror::Error;

use crate::desc::ParseError;
use crate::format::{Direction, Format};

// -----------------------------------------------------------------------------
// SerialError

/// Error returned by every fallible (de)serialization operation.
///
/// Configuration and data-contract violations raised by the handlers are
/// grouped in [`HandlerError`]. Failures raised by a value object's own
/// constructor travel untouched in [`SerialError::Value`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SerialError {
    #[error(transparent)]
    Handler(#[from] HandlerError),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("the format \"{format}\" is not supported for {direction}")]
    UnsupportedFormat { format: Format, direction: Direction },

    #[error("no {direction} handler registered for type `{type_name}` and format \"{format}\"")]
    NoHandler {
        type_name: String,
        format: Format,
        direction: Direction,
    },

    #[error("type `{0}` can not be constructed")]
    NotConstructible(String),

    #[error("expected a value of type `{expected}`, found `{found}`")]
    TypeMismatch { expected: String, found: String },

    #[error("expected {expected} data, found {found}")]
    UnexpectedData {
        expected: &'static str,
        found: &'static str,
    },

    #[error("field `{field}` of `{type_path}` has no value")]
    MissingField {
        type_path: &'static str,
        field: &'static str,
    },

    #[error("invalid registration of field `{field}` in `{type_path}`: {source}")]
    InvalidRegistration {
        type_path: &'static str,
        field: &'static str,
        #[source]
        source: Box<SerialError>,
    },

    #[error("failed to encode {format} output: {message}")]
    Encode { format: Format, message: String },

    #[error("failed to decode {format} input: {message}")]
    Decode { format: Format, message: String },
}

impl SerialError {
    /// Returns the value object error of type `E`, if this is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_serial::{SerialError, ValueError};
    ///
    /// #[derive(Debug, thiserror::Error)]
    /// #[error("out of range")]
    /// struct OutOfRange;
    ///
    /// let err = SerialError::from(ValueError::new(OutOfRange));
    /// assert!(err.downcast_value::<OutOfRange>().is_some());
    /// ```
    pub fn downcast_value<E: CoreError + 'static>(&self) -> Option<&E> {
        match self {
            Self::Value(err) => err.downcast_ref(),
            _ => None,
        }
    }

    /// Returns the handler error, if this is one.
    #[inline]
    pub fn as_handler(&self) -> Option<&HandlerError> {
        match self {
            Self::Handler(err) => Some(err),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// ValueError

/// An error raised by a value object's constructor.
///
/// The handler layer never inspects or rewraps it, see
/// [`SerialError::downcast_value`] to get the original error back.
#[derive(Debug)]
pub struct ValueError(Box<dyn CoreError + Send + Sync>);

impl ValueError {
    #[inline]
    pub fn new<E: CoreError + Send + Sync + 'static>(error: E) -> Self {
        Self(Box::new(error))
    }

    #[inline]
    pub fn downcast_ref<E: CoreError + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref()
    }

    #[inline]
    pub fn into_inner(self) -> Box<dyn CoreError + Send + Sync> {
        self.0
    }
}

impl fmt::Display for ValueError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl CoreError for ValueError {
    #[inline]
    fn source(&self) -> Option<&(dyn CoreError + 'static)> {
        self.0.source()
    }
}

// -----------------------------------------------------------------------------
// ResolveError

/// A type name that does not denote a primitive, class or interface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResolveError {
    #[error("type name is empty")]
    Empty,

    #[error("`{0}` is not a primitive type, registered class or registered interface")]
    Unknown(String),
}

// -----------------------------------------------------------------------------
// HandlerError

/// Configuration and data-contract violations detected by the handlers.
///
/// None of these are transient; the current call is aborted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandlerError {
    #[error("invalid config for `{handler}`: the type has no name")]
    MissingName { handler: &'static str },

    #[error(
        "invalid config for `{handler}` and value class `{value_class}`: {}",
        ParamCount(.count)
    )]
    ParamCountIncorrect {
        handler: &'static str,
        value_class: String,
        count: usize,
    },

    #[error("invalid config for `{handler}`: value class `{value_class}` does not exist")]
    NotExistingClass {
        handler: &'static str,
        value_class: String,
    },

    #[error(
        "invalid config for `{handler}`: value class `{value_class}` does not implement `{interface}`"
    )]
    DoesNotImplementInterface {
        handler: &'static str,
        value_class: String,
        interface: &'static str,
    },

    // Only `integer`, `int` and `string` pass the check, `float` is named
    // here but rejected.
    #[error(
        "invalid config for `{handler}` and value class `{value_class}`: inner type `{inner_type}` is not valid, it must be one of: integer, float or string"
    )]
    InvalidInnerType {
        handler: &'static str,
        value_class: String,
        inner_type: String,
    },

    #[error(
        "invalid config for serialization type `{type_name}`: a parameter naming the element type is required, it can be a primitive type, class name or interface name"
    )]
    MissingTypeValue { type_name: &'static str },

    #[error(
        "invalid config for serialization type `{type_name}`: the type parameter value `{type_value}` is not valid"
    )]
    TypeValueInvalid {
        type_name: &'static str,
        type_value: String,
        #[source]
        source: ResolveError,
    },

    #[error(
        "invalid config for serialization type `{type_name}`: too many parameters, expected 1 parameter but got {count}"
    )]
    TooManyParameters { type_name: &'static str, count: usize },

    #[error("invalid config for `{handler}`: no union types configured")]
    NoTypesConfigured { handler: &'static str },

    #[error(
        "invalid config for `{handler}`: class `{class_name}` is not one of the configured union types: {}",
        TypeList(.types)
    )]
    InvalidClassNameConfigured {
        handler: &'static str,
        class_name: String,
        types: Vec<String>,
    },

    #[error("`{handler}` can not deserialize the data, the `__typename` field is missing")]
    TypeNameMissingInData { handler: &'static str },
}

struct ParamCount<'a>(&'a usize);

impl fmt::Display for ParamCount<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.0 {
            0 => f.write_str("a parameter for the inner type is required but none is given"),
            n => write!(f, "exactly 1 parameter for the inner type is expected but got {n}"),
        }
    }
}

struct TypeList<'a>(&'a [String]);

impl fmt::Display for TypeList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, name) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "`{name}`")?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;

    use super::{HandlerError, ResolveError, SerialError, ValueError};

    #[test]
    fn param_count_messages() {
        let none = HandlerError::ParamCountIncorrect {
            handler: "ValueHandler",
            value_class: String::from("Age"),
            count: 0,
        };
        let many = HandlerError::ParamCountIncorrect {
            handler: "ValueHandler",
            value_class: String::from("Age"),
            count: 2,
        };
        assert!(none.to_string().ends_with("but none is given"));
        assert!(many.to_string().ends_with("but got 2"));
    }

    #[test]
    fn class_list_message() {
        let err = HandlerError::InvalidClassNameConfigured {
            handler: "UnionHandler",
            class_name: String::from("Author"),
            types: vec![String::from("Book"), String::from("Movie")],
        };
        assert_eq!(
            err.to_string(),
            "invalid config for `UnionHandler`: class `Author` is not one of the configured union types: `Book`, `Movie`"
        );
    }

    #[test]
    fn type_value_source() {
        use core::error::Error;

        let err = HandlerError::TypeValueInvalid {
            type_name: "Collection",
            type_value: String::from("invalidType"),
            source: ResolveError::Unknown(String::from("invalidType")),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn value_error_is_not_rewrapped() {
        #[derive(Debug, thiserror::Error)]
        #[error("Invalid value given for: Age")]
        struct AgeError;

        let err: SerialError = ValueError::new(AgeError).into();
        assert_eq!(err.to_string(), "Invalid value given for: Age");
        assert!(err.downcast_value::<AgeError>().is_some());
        assert!(err.as_handler().is_none());
    }
}
