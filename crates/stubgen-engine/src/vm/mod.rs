//! Wrapper runtime
//!
//! Executes compiled wrapper classes against live source objects:
//! - Dynamic [`Value`]s exchanged with source objects
//! - The [`Object`] trait every wrapped source implements
//! - [`IndexedAccessor`] adapters for indexed properties
//! - [`Wrapper`] instances and the member body interpreter

pub mod accessor;
pub mod instance;
pub mod interpreter;
pub mod object;
pub mod value;

pub use accessor::IndexedAccessor;
pub use instance::{Wrapper, WrapperClass};
pub use object::{object_ref, Object, ObjectRef};
pub use value::Value;

use thiserror::Error;

/// Runtime errors raised while executing wrapper members
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// The accessor exists on the type but the capability is not granted
    #[error("accessor '{accessor}' of '{member}' is not implemented")]
    AccessorNotImplemented {
        /// Property or indexed accessor name
        member: String,
        /// `get` or `set`
        accessor: &'static str,
    },

    /// No member with that name on the object
    #[error("type '{type_name}' has no member '{member}'")]
    MissingMember {
        /// Receiver type
        type_name: String,
        /// Requested member
        member: String,
    },

    /// Wrong number of arguments
    #[error("'{member}' expects {expected} argument(s), got {actual}")]
    ArgumentCount {
        /// Called member
        member: String,
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        actual: usize,
    },

    /// A value of the wrong kind
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Expected kind
        expected: String,
        /// Actual kind
        found: String,
    },

    /// Wrapper instantiated around an object of another type
    #[error("wrapper expects a source of type '{expected}', got '{found}'")]
    WrongSourceType {
        /// Wrapped type
        expected: String,
        /// Supplied object's type
        found: String,
    },

    /// An accessor outlived the wrapper it was created from
    #[error("the wrapper instance behind this accessor has been released")]
    SourceReleased,

    /// Member access on `null` or a primitive
    #[error("cannot access '{member}' on a value of kind {kind}")]
    NotAnObject {
        /// Requested member
        member: String,
        /// Kind of the receiver
        kind: &'static str,
    },

    /// Failure reported by a source object
    #[error("{0}")]
    Native(String),
}

impl RuntimeError {
    /// Create a "missing member" error.
    pub fn missing_member(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        RuntimeError::MissingMember {
            type_name: type_name.into(),
            member: member.into(),
        }
    }

    /// Create a "type mismatch" error.
    pub fn type_mismatch(expected: impl Into<String>, found: &Value) -> Self {
        RuntimeError::TypeMismatch {
            expected: expected.into(),
            found: found.kind().to_string(),
        }
    }

    /// Check arity of a native call.
    pub fn check_arity(member: &str, expected: usize, args: &[Value]) -> Result<(), Self> {
        if args.len() == expected {
            Ok(())
        } else {
            Err(RuntimeError::ArgumentCount {
                member: member.to_string(),
                expected,
                actual: args.len(),
            })
        }
    }
}
