//! Type descriptors
//!
//! A [`TypeDescriptor`] is the structural, read-only description of a type
//! to wrap: its properties (simple and indexed) and its methods. It plays the
//! role a reflection facility plays elsewhere, but as plain data that can be
//! built in code or loaded from JSON.
//!
//! Adding a property through [`TypeDescriptor::with_property`] also records
//! the synthesized accessor methods (`get_<Name>` / `set_<Name>`) the way a
//! reflection API reports them next to ordinary methods.

mod ty;

pub use ty::{InvalidTypeName, TypeRef};

use serde::{Deserialize, Serialize};

/// Prefix of synthesized property getter methods.
pub const GETTER_PREFIX: &str = "get_";
/// Prefix of synthesized property setter methods.
pub const SETTER_PREFIX: &str = "set_";

/// Check if `s` is a syntactically valid identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Structural description of a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Type name
    pub name: String,
    /// Properties in declaration order
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
    /// Methods in declaration order (including property accessor methods)
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

impl TypeDescriptor {
    /// Create an empty descriptor.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Parse a descriptor from JSON and synthesize missing accessor methods.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut descriptor: TypeDescriptor = serde_json::from_str(json)?;
        descriptor.synthesize_accessors();
        Ok(descriptor)
    }

    /// Add a property (builder style).
    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.add_property(property);
        self
    }

    /// Add a method (builder style).
    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.add_method(method);
        self
    }

    /// Add a property together with its accessor methods.
    pub fn add_property(&mut self, property: PropertyDescriptor) {
        let accessors = property.accessor_methods();
        self.properties.push(property);
        for method in accessors {
            if self.method(&method.name).is_none() {
                self.methods.push(method);
            }
        }
    }

    /// Add a method.
    pub fn add_method(&mut self, method: MethodDescriptor) {
        self.methods.push(method);
    }

    /// Make sure every property accessor is listed among the methods.
    ///
    /// Idempotent; accessor methods are appended after existing methods.
    pub fn synthesize_accessors(&mut self) {
        let missing: Vec<MethodDescriptor> = self
            .properties
            .iter()
            .flat_map(|p| p.accessor_methods())
            .filter(|m| self.method(&m.name).is_none())
            .collect();
        self.methods.extend(missing);
    }

    /// Find a property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Find the first method with the given name.
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Check if the descriptor has no members at all.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.methods.is_empty()
    }
}

/// A property (simple or indexed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    /// Property name
    pub name: String,
    /// Declared value type
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Whether the property can be read
    #[serde(default = "default_true")]
    pub readable: bool,
    /// Whether the property can be written
    #[serde(default)]
    pub writable: bool,
    /// Index parameter types (empty for simple properties)
    #[serde(default)]
    pub index: Vec<TypeRef>,
}

fn default_true() -> bool {
    true
}

impl PropertyDescriptor {
    /// Create a property that is neither readable nor writable yet.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            readable: false,
            writable: false,
            index: Vec::new(),
        }
    }

    /// Mark the property readable.
    pub fn readable(mut self) -> Self {
        self.readable = true;
        self
    }

    /// Mark the property writable.
    pub fn writable(mut self) -> Self {
        self.writable = true;
        self
    }

    /// Mark the property readable and writable.
    pub fn read_write(self) -> Self {
        self.readable().writable()
    }

    /// Add an index parameter.
    pub fn indexed_by(mut self, ty: TypeRef) -> Self {
        self.index.push(ty);
        self
    }

    /// Check if this is an indexed property.
    pub fn is_indexed(&self) -> bool {
        !self.index.is_empty()
    }

    /// Name of the getter method, if readable.
    pub fn getter_name(&self) -> Option<String> {
        self.readable
            .then(|| format!("{}{}", GETTER_PREFIX, self.name))
    }

    /// Name of the setter method, if writable.
    pub fn setter_name(&self) -> Option<String> {
        self.writable
            .then(|| format!("{}{}", SETTER_PREFIX, self.name))
    }

    /// The accessor methods a reflection facility would report for this property.
    pub fn accessor_methods(&self) -> Vec<MethodDescriptor> {
        let index_params = || {
            self.index.iter().enumerate().map(|(i, ty)| {
                let name = if i == 0 {
                    "index".to_string()
                } else {
                    format!("index{}", i)
                };
                ParameterDescriptor::new(name, ty.clone())
            })
        };

        let mut methods = Vec::new();
        if let Some(name) = self.getter_name() {
            methods.push(MethodDescriptor {
                name,
                params: index_params().collect(),
                returns: self.ty.clone(),
            });
        }
        if let Some(name) = self.setter_name() {
            let mut params: Vec<_> = index_params().collect();
            params.push(ParameterDescriptor::new("value", self.ty.clone()));
            methods.push(MethodDescriptor {
                name,
                params,
                returns: TypeRef::Void,
            });
        }
        methods
    }
}

/// A method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Method name
    pub name: String,
    /// Parameters in order
    #[serde(default)]
    pub params: Vec<ParameterDescriptor>,
    /// Return type (`void` for no value)
    #[serde(default = "default_void")]
    pub returns: TypeRef,
}

fn default_void() -> TypeRef {
    TypeRef::Void
}

impl MethodDescriptor {
    /// Create a parameterless `void` method.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: TypeRef::Void,
        }
    }

    /// Add a by-value parameter.
    pub fn param(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.params.push(ParameterDescriptor::new(name, ty));
        self
    }

    /// Add an out parameter.
    pub fn out_param(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.params.push(ParameterDescriptor {
            name: name.into(),
            ty,
            mode: ParamMode::Out,
        });
        self
    }

    /// Set the return type.
    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.returns = ty;
        self
    }

    /// Check if the method produces a value.
    pub fn has_return_value(&self) -> bool {
        !self.returns.is_void()
    }
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Parameter name
    pub name: String,
    /// Parameter type
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Passing mode
    #[serde(default)]
    pub mode: ParamMode,
}

impl ParameterDescriptor {
    /// Create a by-value parameter.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            mode: ParamMode::In,
        }
    }

    /// Check if this is an out parameter.
    pub fn is_out(&self) -> bool {
        self.mode == ParamMode::Out
    }
}

/// Parameter passing mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamMode {
    /// By value
    #[default]
    In,
    /// By out reference
    Out,
}
