//! Source object contract

use std::sync::Arc;

use parking_lot::RwLock;

use crate::vm::value::Value;
use crate::vm::RuntimeError;

/// An object a wrapper can forward to.
///
/// Properties are read and written by name. Indexed properties are not
/// reachable through `get`/`set`; they are exposed as `get_<Name>` and
/// `set_<Name>` methods taking the index as first argument. Methods with
/// `out` parameters write their results back into `args`.
pub trait Object: Send + Sync {
    /// Name of the type this object is an instance of.
    fn type_name(&self) -> &str;

    /// Read a property.
    fn get(&self, name: &str) -> Result<Value, RuntimeError>;

    /// Write a property.
    fn set(&mut self, name: &str, value: Value) -> Result<(), RuntimeError>;

    /// Call a method.
    fn invoke(&mut self, name: &str, args: &mut [Value]) -> Result<Value, RuntimeError>;

    /// Text representation returned by `toString()`.
    fn display(&self) -> String {
        self.type_name().to_string()
    }
}

/// Shared handle to an object.
pub type ObjectRef = Arc<RwLock<dyn Object>>;

/// Move an object behind a shared handle.
pub fn object_ref<T: Object + 'static>(object: T) -> ObjectRef {
    Arc::new(RwLock::new(object))
}
