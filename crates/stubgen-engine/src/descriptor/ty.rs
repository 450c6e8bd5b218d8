//! Type references used by descriptors.
//!
//! Types are spelled the way the stub language spells them, so a `TypeRef`
//! can be rendered straight into generated source and parsed back from a
//! JSON description.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a type name is not a valid stub-language type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid type name '{0}'")]
pub struct InvalidTypeName(pub String);

/// A reference to a type, as seen by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    /// No value (method return type only)
    Void,
    /// Boolean
    Bool,
    /// 64-bit signed integer
    Int,
    /// 64-bit float
    Double,
    /// UTF-8 string
    String,
    /// Any object
    Object,
    /// A class declared in the wrapped type's unit
    Named(String),
}

impl TypeRef {
    /// Stub-language spelling of this type.
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Void => "void",
            TypeRef::Bool => "bool",
            TypeRef::Int => "int",
            TypeRef::Double => "double",
            TypeRef::String => "string",
            TypeRef::Object => "object",
            TypeRef::Named(name) => name,
        }
    }

    /// Create a named class reference.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    /// Check if this is `void`.
    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Void)
    }

    /// Check if this is a builtin (non-class) type.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, TypeRef::Named(_))
    }

    /// Look up a builtin type by its spelling.
    pub fn primitive(name: &str) -> Option<Self> {
        match name {
            "void" => Some(TypeRef::Void),
            "bool" => Some(TypeRef::Bool),
            "int" => Some(TypeRef::Int),
            "double" => Some(TypeRef::Double),
            "string" => Some(TypeRef::String),
            "object" => Some(TypeRef::Object),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TypeRef {
    type Err = InvalidTypeName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(ty) = TypeRef::primitive(s) {
            return Ok(ty);
        }
        if crate::descriptor::is_identifier(s) {
            Ok(TypeRef::Named(s.to_string()))
        } else {
            Err(InvalidTypeName(s.to_string()))
        }
    }
}

impl TryFrom<String> for TypeRef {
    type Error = InvalidTypeName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeRef> for String {
    fn from(ty: TypeRef) -> Self {
        ty.name().to_string()
    }
}
