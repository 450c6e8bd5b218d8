//! Test harness: a mock source type and helpers to wrap it.

#![allow(dead_code)]

use stubgen_engine::{
    object_ref, CompiledArtifact, MethodDescriptor, Object, ObjectRef, PropertyDescriptor,
    RuntimeError, StubGenerator, TypeDescriptor, TypeRef, Value, Wrapper,
};

/// Descriptor of [`Mock`].
pub fn mock_descriptor() -> TypeDescriptor {
    TypeDescriptor::new("Mock")
        .with_property(PropertyDescriptor::new("Name", TypeRef::String).read_write())
        .with_property(PropertyDescriptor::new("Size", TypeRef::Int).readable())
        .with_property(
            PropertyDescriptor::new("Item", TypeRef::Double)
                .read_write()
                .indexed_by(TypeRef::Int),
        )
        .with_property(
            PropertyDescriptor::new("Label", TypeRef::String)
                .readable()
                .indexed_by(TypeRef::Int),
        )
        .with_method(MethodDescriptor::new("Reset"))
        .with_method(
            MethodDescriptor::new("TryGet")
                .param("key", TypeRef::String)
                .out_param("found", TypeRef::Double)
                .returns(TypeRef::Bool),
        )
}

/// Descriptor with a writable `Name`, a read-only indexed `Item` and `Reset()`.
pub fn scenario_descriptor() -> TypeDescriptor {
    TypeDescriptor::new("Mock")
        .with_property(PropertyDescriptor::new("Name", TypeRef::String).read_write())
        .with_property(
            PropertyDescriptor::new("Item", TypeRef::Double)
                .readable()
                .indexed_by(TypeRef::Int),
        )
        .with_method(MethodDescriptor::new("Reset"))
}

/// In-memory source object matching [`mock_descriptor`].
#[derive(Debug, Clone, Default)]
pub struct Mock {
    pub name: String,
    pub size: i64,
    pub items: Vec<f64>,
    pub labels: Vec<String>,
    pub resets: usize,
}

impl Mock {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            size: 2,
            items: vec![0.0; 2],
            labels: vec!["first".to_string(), "second".to_string()],
            resets: 0,
        }
    }
}

fn index(value: &Value, len: usize) -> Result<usize, RuntimeError> {
    let n = value.as_int()?;
    usize::try_from(n)
        .ok()
        .filter(|i| *i < len)
        .ok_or_else(|| RuntimeError::Native(format!("index {} out of range", n)))
}

impl Object for Mock {
    fn type_name(&self) -> &str {
        "Mock"
    }

    fn get(&self, name: &str) -> Result<Value, RuntimeError> {
        match name {
            "Name" => Ok(Value::from(self.name.as_str())),
            "Size" => Ok(Value::Int(self.size)),
            "Resets" => Ok(Value::Int(self.resets as i64)),
            _ => Err(RuntimeError::missing_member("Mock", name)),
        }
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        match name {
            "Name" => {
                self.name = value.as_str()?.to_string();
                Ok(())
            }
            _ => Err(RuntimeError::missing_member("Mock", name)),
        }
    }

    fn invoke(&mut self, name: &str, args: &mut [Value]) -> Result<Value, RuntimeError> {
        match name {
            "get_Item" => {
                RuntimeError::check_arity(name, 1, args)?;
                let i = index(&args[0], self.items.len())?;
                Ok(Value::Double(self.items[i]))
            }
            "set_Item" => {
                RuntimeError::check_arity(name, 2, args)?;
                let i = index(&args[0], self.items.len())?;
                self.items[i] = args[1].as_double()?;
                Ok(Value::Null)
            }
            "get_Label" => {
                RuntimeError::check_arity(name, 1, args)?;
                let i = index(&args[0], self.labels.len())?;
                Ok(Value::from(self.labels[i].as_str()))
            }
            "Reset" => {
                RuntimeError::check_arity(name, 0, args)?;
                self.resets += 1;
                self.items.iter_mut().for_each(|x| *x = 0.0);
                Ok(Value::Null)
            }
            "TryGet" => {
                RuntimeError::check_arity(name, 2, args)?;
                let found = match args[0].as_str()? {
                    "size" => Some(self.size as f64),
                    "first" => self.items.first().copied(),
                    _ => None,
                };
                args[1] = Value::Double(found.unwrap_or(0.0));
                Ok(Value::Bool(found.is_some()))
            }
            _ => Err(RuntimeError::missing_member("Mock", name)),
        }
    }

    fn display(&self) -> String {
        format!("Mock({})", self.name)
    }
}

/// A source object of some other type.
pub struct Other;

impl Object for Other {
    fn type_name(&self) -> &str {
        "Other"
    }

    fn get(&self, name: &str) -> Result<Value, RuntimeError> {
        Err(RuntimeError::missing_member("Other", name))
    }

    fn set(&mut self, name: &str, _value: Value) -> Result<(), RuntimeError> {
        Err(RuntimeError::missing_member("Other", name))
    }

    fn invoke(&mut self, name: &str, _args: &mut [Value]) -> Result<Value, RuntimeError> {
        Err(RuntimeError::missing_member("Other", name))
    }
}

/// Generate and compile a wrapper for `descriptor`.
pub fn build(descriptor: TypeDescriptor) -> CompiledArtifact {
    match StubGenerator::new(descriptor).compile() {
        Ok(artifact) => artifact,
        Err(e) => panic!("wrapper failed to build:\n{}", e),
    }
}

/// Wrap `mock` with the full mock wrapper; returns the wrapper and the shared source.
pub fn wrap_mock(mock: Mock) -> (Wrapper, ObjectRef) {
    let artifact = build(mock_descriptor());
    let source = object_ref(mock);
    let wrapper = artifact
        .class("MockWrapper")
        .expect("wrapper class")
        .instantiate(source.clone())
        .expect("instantiate");
    (wrapper, source)
}

