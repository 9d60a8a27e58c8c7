//! Validation rules of the bundled handlers.
//!
//! Each rule checks one declared [`TypeDesc`] and returns the first failure
//! in rule order. Nothing is logged here, the caller reports the error.

use alloc::string::String;
use alloc::vec::Vec;

use crate::desc::TypeDesc;
use crate::error::HandlerError;
use crate::registry::{ResolvedType, TypeResolver};

/// The capability a value class must implement.
pub(crate) const VALUE_INTERFACE: &str = "ValueObject";

/// Inner types a value object may be read as.
///
/// `float` is not part of the set although the error message lists it.
const VALUE_INNER_TYPES: [&str; 3] = ["integer", "int", "string"];

/// Checks a `Collection<T>` or `Set<T>` declaration, returns `T`.
pub(crate) fn container_element_type<'t>(
    type_name: &'static str,
    ty: &'t TypeDesc,
    resolver: &dyn TypeResolver,
) -> Result<&'t TypeDesc, HandlerError> {
    let element = match ty.param(0) {
        Some(element) if !element.name().is_empty() => element,
        _ => return Err(HandlerError::MissingTypeValue { type_name }),
    };
    if let Err(source) = resolver.resolve(element.name()) {
        return Err(HandlerError::TypeValueInvalid {
            type_name,
            type_value: String::from(element.name()),
            source,
        });
    }
    if ty.param_count() > 1 {
        return Err(HandlerError::TooManyParameters {
            type_name,
            count: ty.param_count(),
        });
    }
    Ok(element)
}

/// Checks a value object declaration such as `Age<integer>`, returns the
/// inner type name.
pub(crate) fn value_inner_type<'t>(
    handler: &'static str,
    ty: &'t TypeDesc,
    resolver: &dyn TypeResolver,
) -> Result<&'t str, HandlerError> {
    let value_class = ty.name();
    if value_class.is_empty() {
        return Err(HandlerError::MissingName { handler });
    }
    if ty.param_count() != 1 {
        return Err(HandlerError::ParamCountIncorrect {
            handler,
            value_class: String::from(value_class),
            count: ty.param_count(),
        });
    }
    match resolver.resolve(value_class) {
        Ok(ResolvedType::Value) if resolver.implements_value(value_class) => {}
        Ok(
            ResolvedType::Class
            | ResolvedType::Value
            | ResolvedType::Container
            | ResolvedType::Array,
        ) => {
            return Err(HandlerError::DoesNotImplementInterface {
                handler,
                value_class: String::from(value_class),
                interface: VALUE_INTERFACE,
            });
        }
        Ok(ResolvedType::Primitive(_) | ResolvedType::Interface) | Err(_) => {
            return Err(HandlerError::NotExistingClass {
                handler,
                value_class: String::from(value_class),
            });
        }
    }
    let inner_type = ty.param(0).map(TypeDesc::name).unwrap_or_default();
    if !VALUE_INNER_TYPES.contains(&inner_type) {
        return Err(HandlerError::InvalidInnerType {
            handler,
            value_class: String::from(value_class),
            inner_type: String::from(inner_type),
        });
    }
    Ok(inner_type)
}

/// Returns the alternative of a `union<..>` declaration named `class_name`.
pub(crate) fn union_alternative<'t>(
    handler: &'static str,
    ty: &'t TypeDesc,
    class_name: &str,
) -> Result<&'t TypeDesc, HandlerError> {
    if ty.params().is_empty() {
        return Err(HandlerError::NoTypesConfigured { handler });
    }
    ty.params()
        .iter()
        .find(|alt| alt.name() == class_name)
        .ok_or_else(|| HandlerError::InvalidClassNameConfigured {
            handler,
            class_name: String::from(class_name),
            types: ty.params().iter().map(|alt| String::from(alt.name())).collect::<Vec<_>>(),
        })
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::error::ResolveError;

    /// Knows `Employee` (class), `Age` (value) and `Media` (interface).
    struct Names;

    impl TypeResolver for Names {
        fn resolve(&self, name: &str) -> Result<ResolvedType, ResolveError> {
            match name {
                "" => Err(ResolveError::Empty),
                "string" => Ok(ResolvedType::Primitive("string")),
                "Collection" => Ok(ResolvedType::Container),
                "Employee" => Ok(ResolvedType::Class),
                "Age" => Ok(ResolvedType::Value),
                "Media" => Ok(ResolvedType::Interface),
                other => Err(ResolveError::Unknown(other.to_string())),
            }
        }

        fn implements_value(&self, name: &str) -> bool {
            name == "Age"
        }
    }

    fn desc(s: &str) -> TypeDesc {
        TypeDesc::parse(s).unwrap()
    }

    #[test]
    fn container_rules_in_order() {
        let check = |s: &str| {
            container_element_type("Collection", &desc(s), &Names).map(|t| t.to_string())
        };

        assert_eq!(check("Collection<Employee>").unwrap(), "Employee");
        assert_eq!(check("Collection<Media>").unwrap(), "Media");
        assert_eq!(
            check("Collection").unwrap_err(),
            HandlerError::MissingTypeValue { type_name: "Collection" }
        );
        assert_eq!(
            check("Collection<invalidType>").unwrap_err(),
            HandlerError::TypeValueInvalid {
                type_name: "Collection",
                type_value: "invalidType".into(),
                source: ResolveError::Unknown("invalidType".into()),
            }
        );
        // An unresolvable first parameter wins over the parameter count.
        assert!(matches!(
            check("Collection<invalidType, string>").unwrap_err(),
            HandlerError::TypeValueInvalid { .. }
        ));
        assert_eq!(
            check("Collection<string, arg2, arg3>").unwrap_err(),
            HandlerError::TooManyParameters { type_name: "Collection", count: 3 }
        );
    }

    #[test]
    fn too_many_parameters_message() {
        let err =
            container_element_type("Set", &desc("Set<string, arg2, arg3>"), &Names).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid config for serialization type `Set`: too many parameters, expected 1 parameter but got 3"
        );
    }

    #[test]
    fn value_rules_in_order() {
        fn check(ty: &TypeDesc) -> Result<&str, HandlerError> {
            value_inner_type("ValueHandler", ty, &Names)
        }

        assert_eq!(check(&desc("Age<integer>")), Ok("integer"));
        assert_eq!(check(&desc("Age<int>")), Ok("int"));
        assert_eq!(check(&desc("Age<string>")), Ok("string"));
        assert_eq!(
            check(&TypeDesc::with_params("", alloc::vec![desc("int")])),
            Err(HandlerError::MissingName { handler: "ValueHandler" })
        );
        assert!(matches!(
            check(&desc("Age")),
            Err(HandlerError::ParamCountIncorrect { count: 0, .. })
        ));
        assert!(matches!(
            check(&desc("Age<int, string>")),
            Err(HandlerError::ParamCountIncorrect { count: 2, .. })
        ));
        assert!(matches!(
            check(&desc("Height<int>")),
            Err(HandlerError::NotExistingClass { .. })
        ));
        assert!(matches!(
            check(&desc("Media<int>")),
            Err(HandlerError::NotExistingClass { .. })
        ));
        assert_eq!(
            check(&desc("Employee<int>")),
            Err(HandlerError::DoesNotImplementInterface {
                handler: "ValueHandler",
                value_class: "Employee".into(),
                interface: VALUE_INTERFACE,
            })
        );
    }

    #[test]
    fn float_inner_type_is_rejected() {
        let err = value_inner_type("ValueHandler", &desc("Age<float>"), &Names).unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid config for `ValueHandler` and value class `Age`: inner type `float` is not valid, it must be one of: integer, float or string"
        );
    }

    #[test]
    fn union_rules() {
        let ty = desc("union<Book, Movie>");

        assert_eq!(union_alternative("UnionHandler", &ty, "Movie").unwrap().name(), "Movie");
        assert_eq!(
            union_alternative("UnionHandler", &desc("union"), "Book"),
            Err(HandlerError::NoTypesConfigured { handler: "UnionHandler" })
        );

        let err = union_alternative("UnionHandler", &ty, "Author").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid config for `UnionHandler`: class `Author` is not one of the configured union types: `Book`, `Movie`"
        );
    }
}
