//! Wrapper classes and instances

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::compiler::ir::ClassDef;
use crate::compiler::references::TO_STRING;
use crate::vm::accessor::IndexedAccessor;
use crate::vm::interpreter;
use crate::vm::object::{Object, ObjectRef};
use crate::vm::{RuntimeError, Value};

/// Name of the field generated wrappers keep their source in.
pub const SOURCE_FIELD: &str = "source";

/// State shared by a wrapper and the accessors it hands out.
pub(crate) struct InstanceState {
    pub(crate) class: Arc<ClassDef>,
    pub(crate) fields: RwLock<Vec<Value>>,
}

/// A compiled wrapper class, ready to be instantiated.
#[derive(Debug, Clone)]
pub struct WrapperClass {
    def: Arc<ClassDef>,
    source_type: String,
    namespace: Option<String>,
}

impl WrapperClass {
    pub(crate) fn new(def: ClassDef, source_type: &str, namespace: Option<&str>) -> Self {
        Self {
            def: Arc::new(def),
            source_type: source_type.to_string(),
            namespace: namespace.map(str::to_string),
        }
    }

    /// Class name.
    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Class name prefixed with its namespace, if any.
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.def.name),
            None => self.def.name.clone(),
        }
    }

    /// Name of the type this class wraps.
    pub fn source_type(&self) -> &str {
        &self.source_type
    }

    /// Compiled members.
    pub fn definition(&self) -> &ClassDef {
        &self.def
    }

    /// Wrap `source`.
    ///
    /// Fails with [`RuntimeError::WrongSourceType`] when `source` is not an
    /// instance of the wrapped type.
    pub fn instantiate(&self, source: ObjectRef) -> Result<Wrapper, RuntimeError> {
        let found = source.read().type_name().to_string();
        if found != self.source_type {
            return Err(RuntimeError::WrongSourceType {
                expected: self.source_type.clone(),
                found,
            });
        }

        let state = Arc::new(InstanceState {
            class: self.def.clone(),
            fields: RwLock::new(vec![Value::Null; self.def.fields.len()]),
        });
        interpreter::call(
            "constructor",
            &self.def.constructor,
            &state,
            &mut [Value::Object(source)],
        )?;
        log::trace!("instantiated {}", self.qualified_name());
        Ok(Wrapper { state })
    }
}

/// An instance of a wrapper class.
///
/// Cloning yields another handle to the same instance.
#[derive(Clone)]
pub struct Wrapper {
    state: Arc<InstanceState>,
}

impl Wrapper {
    pub(crate) fn from_state(state: Arc<InstanceState>) -> Self {
        Self { state }
    }

    /// Name of the wrapper class.
    pub fn class_name(&self) -> &str {
        &self.state.class.name
    }

    /// Read a public property.
    pub fn get(&self, name: &str) -> Result<Value, RuntimeError> {
        interpreter::get_property(&self.state, name, true)
    }

    /// Write a public property.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<(), RuntimeError> {
        interpreter::set_property(&self.state, name, value.into(), true)
    }

    /// Call a public method. Values of `out` parameters are written back into `args`.
    pub fn invoke(&self, name: &str, args: &mut [Value]) -> Result<Value, RuntimeError> {
        if name == TO_STRING && args.is_empty() && self.state.class.method(name).is_none() {
            return Ok(Value::Str(self.class_name().to_string()));
        }
        interpreter::call_method(&self.state, name, args, true)
    }

    /// Read an accessor-valued property.
    pub fn index(&self, name: &str) -> Result<Arc<IndexedAccessor<Value, Value>>, RuntimeError> {
        self.get(name)?.as_accessor().cloned()
    }

    /// Text form: the class's `toString()` method, or the class name.
    pub fn to_string(&self) -> Result<String, RuntimeError> {
        match self.state.class.method(TO_STRING) {
            Some(method) if method.params.is_empty() => {
                Ok(interpreter::call_method(&self.state, TO_STRING, &mut [], true)?.display())
            }
            _ => Ok(self.class_name().to_string()),
        }
    }

    /// The wrapped source object.
    pub fn source(&self) -> Result<ObjectRef, RuntimeError> {
        let index = self
            .state
            .class
            .field(SOURCE_FIELD)
            .map(|(index, _)| index)
            .ok_or_else(|| RuntimeError::missing_member(self.class_name(), SOURCE_FIELD))?;
        let value = self.state.fields.read().get(index).cloned().unwrap_or_default();
        value.as_object().cloned()
    }
}

impl fmt::Debug for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapper")
            .field("class", &self.class_name())
            .finish_non_exhaustive()
    }
}

impl Object for Wrapper {
    fn type_name(&self) -> &str {
        self.class_name()
    }

    fn get(&self, name: &str) -> Result<Value, RuntimeError> {
        Wrapper::get(self, name)
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        Wrapper::set(self, name, value)
    }

    fn invoke(&mut self, name: &str, args: &mut [Value]) -> Result<Value, RuntimeError> {
        Wrapper::invoke(self, name, args)
    }

    fn display(&self) -> String {
        Wrapper::to_string(self).unwrap_or_else(|_| self.class_name().to_string())
    }
}
