//! Member body interpreter
//!
//! Executes lowered [`Function`]s against a wrapper instance. Bodies are
//! straight-line (no branches or loops), so execution is a single pass over
//! the statement list that stops at the first `return`.
//!
//! Locks are never held across calls: field reads clone the value out before
//! it is used, and source objects are locked only for the duration of one
//! `get`/`set`/`invoke`.

use std::sync::Arc;

use crate::compiler::ir::{Arg, ClassDef, Expr, Function, Stmt};
use crate::parser::ast::Visibility;
use crate::vm::accessor::{Getter, IndexedAccessor, Setter};
use crate::vm::instance::{InstanceState, Wrapper};
use crate::vm::object::object_ref;
use crate::vm::{RuntimeError, Value};

type Result<T> = std::result::Result<T, RuntimeError>;

/// Call `function` on `instance`.
///
/// `args` fills the parameter slots and receives their final values, so
/// callers can copy `out` parameters back.
pub(crate) fn call(
    member: &str,
    function: &Function,
    instance: &Arc<InstanceState>,
    args: &mut [Value],
) -> Result<Value> {
    call_with(member, function, instance, &[], args)
}

fn call_with(
    member: &str,
    function: &Function,
    instance: &Arc<InstanceState>,
    captured: &[Value],
    args: &mut [Value],
) -> Result<Value> {
    if args.len() != function.params {
        return Err(RuntimeError::ArgumentCount {
            member: member.to_string(),
            expected: function.params,
            actual: args.len(),
        });
    }

    let mut locals = Vec::with_capacity(function.slots);
    locals.extend(captured.iter().take(function.captures).cloned());
    locals.resize(function.captures, Value::Null);
    locals.extend(args.iter().cloned());
    locals.resize(function.slots.max(locals.len()), Value::Null);

    let result = Interpreter {
        instance,
        locals: &mut locals,
    }
    .run(&function.body);

    for (i, arg) in args.iter_mut().enumerate() {
        if let Some(value) = locals.get(function.captures + i) {
            *arg = value.clone();
        }
    }
    result
}

// ============================================================================
// Own members
// ============================================================================

fn accessor_body<'c>(
    class: &'c ClassDef,
    name: &str,
    accessor: &'static str,
    public_only: bool,
) -> Result<&'c Function> {
    let Some(property) = class.property(name) else {
        if public_only && class.field(name).is_some() {
            return Err(RuntimeError::AccessorNotImplemented {
                member: name.to_string(),
                accessor,
            });
        }
        return Err(RuntimeError::missing_member(&class.name, name));
    };
    let def = if accessor == "get" {
        property.getter.as_ref()
    } else {
        property.setter.as_ref()
    };
    def.filter(|d| !public_only || d.is_public())
        .and_then(|d| d.body.as_ref())
        .ok_or_else(|| RuntimeError::AccessorNotImplemented {
            member: name.to_string(),
            accessor,
        })
}

/// Read property `name` of `instance`.
pub(crate) fn get_property(
    instance: &Arc<InstanceState>,
    name: &str,
    public_only: bool,
) -> Result<Value> {
    let body = accessor_body(&instance.class, name, "get", public_only)?;
    call(name, body, instance, &mut [])
}

/// Write property `name` of `instance`.
pub(crate) fn set_property(
    instance: &Arc<InstanceState>,
    name: &str,
    value: Value,
    public_only: bool,
) -> Result<()> {
    let body = accessor_body(&instance.class, name, "set", public_only)?;
    call(name, body, instance, &mut [value]).map(|_| ())
}

/// Call method `name` of `instance`, copying `out` parameters back into `args`.
pub(crate) fn call_method(
    instance: &Arc<InstanceState>,
    name: &str,
    args: &mut [Value],
    public_only: bool,
) -> Result<Value> {
    let class = &instance.class;
    let method = class
        .method(name)
        .ok_or_else(|| RuntimeError::missing_member(&class.name, name))?;
    if public_only && method.visibility != Visibility::Public {
        return Err(RuntimeError::AccessorNotImplemented {
            member: name.to_string(),
            accessor: "call",
        });
    }

    let mut frame = args.to_vec();
    let result = call(name, &method.body, instance, &mut frame)?;
    for ((param, arg), value) in method.params.iter().zip(args.iter_mut()).zip(frame) {
        if param.out {
            *arg = value;
        }
    }
    Ok(result)
}

// ============================================================================
// Statements and expressions
// ============================================================================

struct Interpreter<'a> {
    instance: &'a Arc<InstanceState>,
    locals: &'a mut Vec<Value>,
}

impl Interpreter<'_> {
    fn run(&mut self, body: &[Stmt]) -> Result<Value> {
        for stmt in body {
            match stmt {
                Stmt::Return(None) => return Ok(Value::Null),
                Stmt::Return(Some(expr)) => return self.eval(expr),
                Stmt::Eval(expr) => {
                    self.eval(expr)?;
                }
                Stmt::StoreLocal(slot, expr) => {
                    let value = self.eval(expr)?;
                    self.store_local(*slot, value);
                }
                Stmt::StoreField(index, expr) => {
                    let value = self.eval(expr)?;
                    if let Some(field) = self.instance.fields.write().get_mut(*index) {
                        *field = value;
                    }
                }
                Stmt::SetOwn { name, value } => {
                    let value = self.eval(value)?;
                    set_property(self.instance, name, value, false)?;
                }
                Stmt::SetMember {
                    object,
                    name,
                    value,
                } => {
                    let receiver = self.eval(object)?;
                    let value = self.eval(value)?;
                    match receiver {
                        Value::Object(obj) => obj.write().set(name, value)?,
                        other => {
                            return Err(RuntimeError::NotAnObject {
                                member: name.clone(),
                                kind: other.kind(),
                            })
                        }
                    }
                }
            }
        }
        Ok(Value::Null)
    }

    fn eval(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Const(value) => Ok(value.clone()),
            Expr::Local(slot) => Ok(self.locals.get(*slot).cloned().unwrap_or_default()),
            Expr::This => Ok(Value::Object(object_ref(Wrapper::from_state(
                self.instance.clone(),
            )))),
            Expr::Field(index) => Ok(self
                .instance
                .fields
                .read()
                .get(*index)
                .cloned()
                .unwrap_or_default()),
            Expr::GetOwn(name) => get_property(self.instance, name, false),
            Expr::CallOwn { name, args } => {
                let mut values = self.eval_args(args)?;
                let result = call_method(self.instance, name, &mut values, false)?;
                self.write_back(args, values);
                Ok(result)
            }
            Expr::GetMember { object, name } => match self.eval(object)? {
                Value::Object(obj) => obj.read().get(name),
                other => Err(RuntimeError::NotAnObject {
                    member: name.clone(),
                    kind: other.kind(),
                }),
            },
            Expr::CallMember { object, name, args } => {
                let receiver = self.eval(object)?;
                let mut values = self.eval_args(args)?;
                let result = invoke_value(&receiver, name, &mut values)?;
                self.write_back(args, values);
                Ok(result)
            }
            Expr::ToString(object) => match self.eval(object)? {
                Value::Null => Err(RuntimeError::NotAnObject {
                    member: "toString".to_string(),
                    kind: "null",
                }),
                value => Ok(Value::Str(value.display())),
            },
            Expr::NewAccessor {
                member,
                getter,
                setter,
            } => Ok(self.new_accessor(member, getter.clone(), setter.clone())),
        }
    }

    fn eval_args(&mut self, args: &[Arg]) -> Result<Vec<Value>> {
        args.iter()
            .map(|arg| match arg {
                Arg::Value(expr) => self.eval(expr),
                Arg::Out(slot) => Ok(self.locals.get(*slot).cloned().unwrap_or_default()),
            })
            .collect()
    }

    fn write_back(&mut self, args: &[Arg], values: Vec<Value>) {
        for (arg, value) in args.iter().zip(values) {
            if let Arg::Out(slot) = arg {
                self.store_local(*slot, value);
            }
        }
    }

    fn store_local(&mut self, slot: usize, value: Value) {
        if slot >= self.locals.len() {
            self.locals.resize(slot + 1, Value::Null);
        }
        self.locals[slot] = value;
    }

    /// Build an accessor whose closures run against a snapshot of this frame.
    fn new_accessor(
        &self,
        member: &str,
        getter: Option<Arc<Function>>,
        setter: Option<Arc<Function>>,
    ) -> Value {
        let captured: Arc<Vec<Value>> = Arc::new(self.locals.clone());

        let getter = getter.map(|function| {
            let instance = Arc::downgrade(self.instance);
            let captured = captured.clone();
            let member = member.to_string();
            Box::new(move |index: Value| {
                let instance = instance.upgrade().ok_or(RuntimeError::SourceReleased)?;
                call_with(&member, &function, &instance, &captured, &mut [index])
            }) as Getter<Value, Value>
        });

        let setter = setter.map(|function| {
            let instance = Arc::downgrade(self.instance);
            let member = member.to_string();
            Box::new(move |index: Value, value: Value| {
                let instance = instance.upgrade().ok_or(RuntimeError::SourceReleased)?;
                call_with(&member, &function, &instance, &captured, &mut [index, value])
                    .map(|_| ())
            }) as Setter<Value, Value>
        });

        Value::Accessor(Arc::new(IndexedAccessor::new(getter, setter).named(member)))
    }
}

/// Call `name` on an arbitrary receiver.
fn invoke_value(receiver: &Value, name: &str, args: &mut [Value]) -> Result<Value> {
    match receiver {
        Value::Object(obj) => obj.write().invoke(name, args),
        Value::Accessor(accessor) => match name {
            "get" => {
                RuntimeError::check_arity(name, 1, args)?;
                accessor.get(args[0].clone())
            }
            "set" => {
                RuntimeError::check_arity(name, 2, args)?;
                accessor.set(args[0].clone(), args[1].clone())?;
                Ok(Value::Null)
            }
            _ => Err(RuntimeError::missing_member("IndexedAccessor", name)),
        },
        other => Err(RuntimeError::NotAnObject {
            member: name.to_string(),
            kind: other.kind(),
        }),
    }
}
