//! Checker types

use std::fmt;

/// Static type of an expression or declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ty {
    Void,
    Bool,
    Int,
    Double,
    String,
    /// The `object` base type
    Object,
    /// A class declared in the unit being compiled
    Class(String),
    /// A type declared by the target reference unit
    Source(String),
    /// `IndexedAccessor<K, V>`
    Accessor(Box<Ty>, Box<Ty>),
    /// Type of the `null` literal
    Null,
    /// A lambda with the given number of parameters
    Lambda(usize),
    /// Result of an expression that already produced a diagnostic
    Unknown,
}

impl Ty {
    /// Primitive type for a stdlib name.
    pub fn primitive(name: &str) -> Option<Ty> {
        match name {
            "void" => Some(Ty::Void),
            "bool" => Some(Ty::Bool),
            "int" => Some(Ty::Int),
            "double" => Some(Ty::Double),
            "string" => Some(Ty::String),
            "object" => Some(Ty::Object),
            _ => None,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Ty::Void)
    }

    /// Types whose values are references and may hold `null`.
    pub fn is_nullable(&self) -> bool {
        matches!(
            self,
            Ty::String | Ty::Object | Ty::Class(_) | Ty::Source(_) | Ty::Accessor(..) | Ty::Unknown
        )
    }

    /// Check if a value of type `self` can be stored where `target` is expected.
    pub fn is_assignable_to(&self, target: &Ty) -> bool {
        match (self, target) {
            (Ty::Unknown, _) | (_, Ty::Unknown) => true,
            (Ty::Void, _) | (_, Ty::Void) => false,
            (Ty::Lambda(_), _) | (_, Ty::Lambda(_)) => false,
            (Ty::Null, target) => target.is_nullable(),
            (_, Ty::Object) => true,
            (Ty::Accessor(k1, v1), Ty::Accessor(k2, v2)) => k1 == k2 && v1 == v2,
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Void => f.write_str("void"),
            Ty::Bool => f.write_str("bool"),
            Ty::Int => f.write_str("int"),
            Ty::Double => f.write_str("double"),
            Ty::String => f.write_str("string"),
            Ty::Object => f.write_str("object"),
            Ty::Class(name) | Ty::Source(name) => f.write_str(name),
            Ty::Accessor(k, v) => write!(f, "IndexedAccessor<{}, {}>", k, v),
            Ty::Null => f.write_str("null"),
            Ty::Lambda(arity) => write!(f, "lambda/{}", arity),
            Ty::Unknown => f.write_str("?"),
        }
    }
}
