//! Shape validation
//!
//! Rejects descriptors the emitter cannot represent faithfully, before any
//! text is produced. Without this pass such shapes would surface much later
//! as parse or check errors against generated code the user never wrote.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::compiler::references::ACCESSOR_TYPE;
use crate::config::GeneratorOptions;
use crate::descriptor::{is_identifier, TypeDescriptor, TypeRef};
use crate::generator::classify;
use crate::parser::token::is_keyword;

/// A type shape the generator cannot handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// Indexed property with more than one index parameter
    #[error("indexed property '{property}' has {count} index parameters; only one is supported")]
    MultiIndex {
        /// Property name
        property: String,
        /// Number of index parameters
        count: usize,
    },

    /// Name that is not a usable identifier
    #[error("{context}: '{name}' is not a valid identifier")]
    InvalidIdentifier {
        /// Where the name appears
        context: String,
        /// The offending name
        name: String,
    },

    /// Member name reserved by the wrapper itself
    #[error("member '{name}' collides with a name reserved by the generated wrapper")]
    ReservedName {
        /// The offending name
        name: String,
    },

    /// `void` used where a value type is required
    #[error("{member} cannot have type 'void'")]
    VoidMember {
        /// Description of the member
        member: String,
    },

    /// Two properties with the same name
    #[error("property '{name}' is declared more than once")]
    DuplicateProperty {
        /// Property name
        name: String,
    },

    /// Two parameters of one method with the same name
    #[error("method '{method}' declares parameter '{name}' more than once")]
    DuplicateParameter {
        /// Method name
        method: String,
        /// Parameter name
        name: String,
    },

    /// Overloaded method (same name, several signatures)
    #[error("method '{method}' is overloaded; overload sets cannot be forwarded by name")]
    Overload {
        /// Method name
        method: String,
    },

    /// Type name already declared by a reference unit
    #[error("{context}: '{name}' clashes with a built-in type of the generated code")]
    ReservedTypeName {
        /// Where the name appears
        context: String,
        /// The offending name
        name: String,
    },

    /// A property and a method share a name
    #[error("'{name}' is declared both as a property and as a method")]
    NameClash {
        /// The shared name
        name: String,
    },
}

fn check_identifier(context: impl FnOnce() -> String, name: &str) -> Result<(), ShapeError> {
    if is_identifier(name) && !is_keyword(name) {
        Ok(())
    } else {
        Err(ShapeError::InvalidIdentifier {
            context: context(),
            name: name.to_string(),
        })
    }
}

/// Names declared by the std and generator reference units.
fn is_builtin_type(name: &str) -> bool {
    TypeRef::primitive(name).is_some() || name == ACCESSOR_TYPE
}

fn check_type_name(context: impl Fn() -> String, name: &str) -> Result<(), ShapeError> {
    check_identifier(&context, name)?;
    if is_builtin_type(name) {
        return Err(ShapeError::ReservedTypeName {
            context: context(),
            name: name.to_string(),
        });
    }
    Ok(())
}

fn check_type(context: impl Fn() -> String, ty: &TypeRef) -> Result<(), ShapeError> {
    match ty {
        TypeRef::Named(name) => check_type_name(context, name),
        _ => Ok(()),
    }
}

/// Validate that `ty` can be wrapped with the given options.
pub fn validate_shape(ty: &TypeDescriptor, options: &GeneratorOptions) -> Result<(), ShapeError> {
    check_type_name(|| "type name".to_string(), &ty.name)?;

    let reserved = ["source", "toString", options.source_accessor.as_str()];
    let members = classify(ty);

    let mut property_names = FxHashSet::default();
    for property in &ty.properties {
        let name = &property.name;
        check_identifier(|| "property name".to_string(), name)?;
        if reserved.contains(&name.as_str()) {
            return Err(ShapeError::ReservedName { name: name.clone() });
        }
        if !property_names.insert(name.as_str()) {
            return Err(ShapeError::DuplicateProperty { name: name.clone() });
        }
        if property.ty.is_void() {
            return Err(ShapeError::VoidMember {
                member: format!("property '{}'", name),
            });
        }
        check_type(|| format!("type of property '{}'", name), &property.ty)?;
        if property.index.len() > 1 {
            return Err(ShapeError::MultiIndex {
                property: name.clone(),
                count: property.index.len(),
            });
        }
        for index in &property.index {
            if index.is_void() {
                return Err(ShapeError::VoidMember {
                    member: format!("index of property '{}'", name),
                });
            }
            check_type(|| format!("index type of property '{}'", name), index)?;
        }
    }

    let mut method_names = FxHashSet::default();
    for method in &members.methods {
        let name = &method.name;
        check_identifier(|| "method name".to_string(), name)?;
        if reserved.contains(&name.as_str()) {
            return Err(ShapeError::ReservedName { name: name.clone() });
        }
        if property_names.contains(name.as_str()) {
            return Err(ShapeError::NameClash { name: name.clone() });
        }
        if !method_names.insert(name.as_str()) {
            return Err(ShapeError::Overload {
                method: name.clone(),
            });
        }
        check_type(|| format!("return type of method '{}'", name), &method.returns)?;

        let mut param_names = FxHashSet::default();
        for param in &method.params {
            check_identifier(|| format!("parameter of method '{}'", name), &param.name)?;
            if !param_names.insert(param.name.as_str()) {
                return Err(ShapeError::DuplicateParameter {
                    method: name.clone(),
                    name: param.name.clone(),
                });
            }
            if param.ty.is_void() {
                return Err(ShapeError::VoidMember {
                    member: format!("parameter '{}' of method '{}'", param.name, name),
                });
            }
            check_type(
                || format!("type of parameter '{}' of method '{}'", param.name, name),
                &param.ty,
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{MethodDescriptor, PropertyDescriptor};

    fn validate(ty: &TypeDescriptor) -> Result<(), ShapeError> {
        validate_shape(ty, &GeneratorOptions::default())
    }

    #[test]
    fn test_accepts_regular_shape() {
        let ty = TypeDescriptor::new("Mock")
            .with_property(PropertyDescriptor::new("Name", TypeRef::String).read_write())
            .with_property(
                PropertyDescriptor::new("Item", TypeRef::Double)
                    .readable()
                    .indexed_by(TypeRef::Int),
            )
            .with_method(
                MethodDescriptor::new("TryGet")
                    .param("key", TypeRef::String)
                    .out_param("value", TypeRef::Double)
                    .returns(TypeRef::Bool),
            );
        assert_eq!(validate(&ty), Ok(()));
    }

    #[test]
    fn test_rejects_multi_index() {
        let ty = TypeDescriptor::new("Grid").with_property(
            PropertyDescriptor::new("Cell", TypeRef::Int)
                .readable()
                .indexed_by(TypeRef::Int)
                .indexed_by(TypeRef::Int),
        );
        assert_eq!(
            validate(&ty),
            Err(ShapeError::MultiIndex {
                property: "Cell".to_string(),
                count: 2
            })
        );
    }

    #[test]
    fn test_rejects_overloads() {
        let ty = TypeDescriptor::new("Mock")
            .with_method(MethodDescriptor::new("Add").param("x", TypeRef::Int))
            .with_method(MethodDescriptor::new("Add").param("x", TypeRef::Double));
        assert_eq!(
            validate(&ty),
            Err(ShapeError::Overload {
                method: "Add".to_string()
            })
        );
    }

    #[test]
    fn test_rejects_keywords_and_reserved_names() {
        let ty = TypeDescriptor::new("Mock").with_method(MethodDescriptor::new("return"));
        assert!(matches!(
            validate(&ty),
            Err(ShapeError::InvalidIdentifier { .. })
        ));

        let ty = TypeDescriptor::new("Mock")
            .with_property(PropertyDescriptor::new("source", TypeRef::Int).readable());
        assert_eq!(
            validate(&ty),
            Err(ShapeError::ReservedName {
                name: "source".to_string()
            })
        );
    }

    #[test]
    fn test_rejects_void_parameter() {
        let ty = TypeDescriptor::new("Mock")
            .with_method(MethodDescriptor::new("Take").param("x", TypeRef::Void));
        assert!(matches!(validate(&ty), Err(ShapeError::VoidMember { .. })));
    }

    #[test]
    fn test_rejects_builtin_type_names() {
        let ty = TypeDescriptor::new("Spec")
            .with_property(
                PropertyDescriptor::new("Acc", TypeRef::named("IndexedAccessor")).readable(),
            )
            .with_property(
                PropertyDescriptor::new("Item", TypeRef::Double)
                    .readable()
                    .indexed_by(TypeRef::Int),
            );
        assert_eq!(
            validate(&ty),
            Err(ShapeError::ReservedTypeName {
                context: "type of property 'Acc'".to_string(),
                name: "IndexedAccessor".to_string(),
            })
        );

        let ty = TypeDescriptor::new("object")
            .with_property(PropertyDescriptor::new("Name", TypeRef::String).readable());
        assert_eq!(
            validate(&ty),
            Err(ShapeError::ReservedTypeName {
                context: "type name".to_string(),
                name: "object".to_string(),
            })
        );

        let ty = TypeDescriptor::new("Mock")
            .with_method(MethodDescriptor::new("Take").param("x", TypeRef::named("string")));
        assert!(matches!(
            validate(&ty),
            Err(ShapeError::ReservedTypeName { name, .. }) if name == "string"
        ));
    }

    #[test]
    fn test_rejects_property_method_clash() {
        let ty = TypeDescriptor::new("Mock")
            .with_property(PropertyDescriptor::new("Size", TypeRef::Int).readable())
            .with_method(MethodDescriptor::new("Size").returns(TypeRef::Int));
        assert_eq!(
            validate(&ty),
            Err(ShapeError::NameClash {
                name: "Size".to_string()
            })
        );
    }
}
