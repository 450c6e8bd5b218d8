//! Dynamic values
//!
//! The runtime is untyped: the checker guarantees well-typed member bodies,
//! so values only carry enough tagging for dispatch and for conversions at
//! the boundary with host code.

use std::fmt;
use std::sync::Arc;

use crate::vm::accessor::IndexedAccessor;
use crate::vm::object::ObjectRef;
use crate::vm::RuntimeError;

/// A runtime value.
#[derive(Clone, Default)]
pub enum Value {
    /// `null`
    #[default]
    Null,
    /// `bool`
    Bool(bool),
    /// `int`
    Int(i64),
    /// `double`
    Double(f64),
    /// `string`
    Str(String),
    /// A source object or wrapper
    Object(ObjectRef),
    /// An `IndexedAccessor<K, V>`
    Accessor(Arc<IndexedAccessor<Value, Value>>),
}

impl Value {
    /// Short name of the value's kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::Str(_) => "string",
            Value::Object(_) => "object",
            Value::Accessor(_) => "IndexedAccessor",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Result<bool, RuntimeError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(RuntimeError::type_mismatch("bool", other)),
        }
    }

    pub fn as_int(&self) -> Result<i64, RuntimeError> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(RuntimeError::type_mismatch("int", other)),
        }
    }

    /// Read a `double`, widening `int`.
    pub fn as_double(&self) -> Result<f64, RuntimeError> {
        match self {
            Value::Double(n) => Ok(*n),
            Value::Int(n) => Ok(*n as f64),
            other => Err(RuntimeError::type_mismatch("double", other)),
        }
    }

    pub fn as_str(&self) -> Result<&str, RuntimeError> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(RuntimeError::type_mismatch("string", other)),
        }
    }

    pub fn as_object(&self) -> Result<&ObjectRef, RuntimeError> {
        match self {
            Value::Object(obj) => Ok(obj),
            other => Err(RuntimeError::type_mismatch("object", other)),
        }
    }

    pub fn as_accessor(&self) -> Result<&Arc<IndexedAccessor<Value, Value>>, RuntimeError> {
        match self {
            Value::Accessor(acc) => Ok(acc),
            other => Err(RuntimeError::type_mismatch("IndexedAccessor", other)),
        }
    }

    /// Text form used by `toString()`.
    pub fn display(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Double(n) => n.to_string(),
            Value::Str(s) => s.clone(),
            Value::Object(obj) => obj.read().display(),
            Value::Accessor(acc) => format!("IndexedAccessor({})", acc.member()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(n) => write!(f, "Int({})", n),
            Value::Double(n) => write!(f, "Double({})", n),
            Value::Str(s) => write!(f, "Str({:?})", s),
            Value::Object(obj) => write!(f, "Object({})", obj.read().type_name()),
            Value::Accessor(acc) => write!(f, "Accessor({})", acc.member()),
        }
    }
}

impl PartialEq for Value {
    /// Primitives compare by value; objects and accessors by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Accessor(a), Value::Accessor(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}
