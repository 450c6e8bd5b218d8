//! Lowered class representation
//!
//! The output of lowering and the input of the interpreter. Names are
//! resolved to slots where possible: locals to frame slots, fields of the
//! enclosing class to field indices. Member access on other objects stays
//! name-based, since source objects are dynamic.

use std::sync::Arc;

use crate::parser::ast::Visibility;
use crate::vm::Value;

/// A compiled wrapper class.
#[derive(Debug, Clone)]
pub struct ClassDef {
    /// Class name
    pub name: String,
    /// Instance fields, indexed by slot
    pub fields: Vec<FieldDef>,
    /// Constructor; its first parameter receives the source object
    pub constructor: Function,
    /// Properties in declaration order
    pub properties: Vec<PropertyDef>,
    /// Methods in declaration order
    pub methods: Vec<MethodDef>,
}

impl ClassDef {
    pub fn field(&self, name: &str) -> Option<(usize, &FieldDef)> {
        self.fields.iter().enumerate().find(|(_, f)| f.name == name)
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&MethodDef> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// An instance field.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub type_name: String,
    pub readonly: bool,
}

/// A property with its accessors.
#[derive(Debug, Clone)]
pub struct PropertyDef {
    pub name: String,
    pub type_name: String,
    pub getter: Option<AccessorDef>,
    pub setter: Option<AccessorDef>,
}

/// One accessor of a property.
#[derive(Debug, Clone)]
pub struct AccessorDef {
    /// Effective visibility
    pub visibility: Visibility,
    /// Body; `None` for restricted (bodiless) accessors
    pub body: Option<Function>,
}

impl AccessorDef {
    /// Check if the accessor can be called from outside the class.
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public && self.body.is_some()
    }
}

/// A method.
#[derive(Debug, Clone)]
pub struct MethodDef {
    pub name: String,
    pub visibility: Visibility,
    pub params: Vec<ParamDef>,
    pub return_type: String,
    pub body: Function,
}

/// A method parameter.
#[derive(Debug, Clone)]
pub struct ParamDef {
    pub name: String,
    pub type_name: String,
    pub out: bool,
}

/// An executable body.
///
/// Frame layout: `captures` slots copied from the enclosing frame (lambdas
/// only), then `params` parameter slots, then the remaining locals.
#[derive(Debug, Clone, Default)]
pub struct Function {
    pub captures: usize,
    pub params: usize,
    pub slots: usize,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Return(Option<Expr>),
    Eval(Expr),
    StoreLocal(usize, Expr),
    StoreField(usize, Expr),
    /// Write a property of this instance
    SetOwn { name: String, value: Expr },
    /// Write a property of another object
    SetMember { object: Expr, name: String, value: Expr },
}

#[derive(Debug, Clone)]
pub enum Expr {
    Const(Value),
    Local(usize),
    This,
    Field(usize),
    /// Read a property of this instance (visibility ignored)
    GetOwn(String),
    /// Call a method of this instance (visibility ignored)
    CallOwn { name: String, args: Vec<Arg> },
    GetMember { object: Box<Expr>, name: String },
    CallMember { object: Box<Expr>, name: String, args: Vec<Arg> },
    ToString(Box<Expr>),
    NewAccessor {
        member: String,
        getter: Option<Arc<Function>>,
        setter: Option<Arc<Function>>,
    },
}

#[derive(Debug, Clone)]
pub enum Arg {
    Value(Expr),
    /// Out argument bound to a local slot
    Out(usize),
}
