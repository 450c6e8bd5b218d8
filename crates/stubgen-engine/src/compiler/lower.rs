//! AST to class lowering
//!
//! Converts a checked [`CompilationUnit`] into [`ClassDef`]s. Locals are
//! resolved to frame slots and members of `this` to field indices or own
//! member names. Lowering assumes the checker accepted the unit; anything it
//! cannot make sense of is reported as an internal diagnostic.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::compiler::ir::*;
use crate::compiler::references::{ACCESSOR_TYPE, TO_STRING};
use crate::diagnostic::{Diagnostic, ErrorCode};
use crate::parser::ast::{self, AccessorKind, Expression, LambdaBody, Member, Statement};
use crate::parser::Span;
use crate::vm::Value;

/// Code of diagnostics raised by lowering itself.
pub const INTERNAL: ErrorCode = ErrorCode("E0900");

/// Lower every class of `unit`.
pub fn lower(unit: &ast::CompilationUnit) -> Result<Vec<ClassDef>, Diagnostic> {
    unit.classes.iter().map(lower_class).collect()
}

fn internal(span: Span, message: impl Into<String>) -> Diagnostic {
    Diagnostic::error(message)
        .with_code(INTERNAL)
        .with_primary_label(span, "cannot be lowered")
}

fn lower_class(class: &ast::ClassDecl) -> Result<ClassDef, Diagnostic> {
    let mut lowerer = Lowerer::new(class);

    let fields = class
        .members
        .iter()
        .filter_map(|member| match member {
            Member::Field(field) => Some(FieldDef {
                name: field.name.name.clone(),
                type_name: field.ty.to_string(),
                readonly: field.readonly,
            }),
            _ => None,
        })
        .collect();

    let mut constructor = None;
    let mut properties = Vec::new();
    let mut methods = Vec::new();

    for member in &class.members {
        match member {
            Member::Field(_) => {}
            Member::Constructor(ctor) => {
                if constructor.is_none() {
                    let params: Vec<String> =
                        ctor.params.iter().map(|p| p.name.name.clone()).collect();
                    constructor = Some(lowerer.function(&params, &ctor.body)?);
                }
            }
            Member::Method(method) => {
                let params: Vec<String> =
                    method.params.iter().map(|p| p.name.name.clone()).collect();
                let body = lowerer.function(&params, &method.body)?;
                methods.push(MethodDef {
                    name: method.name.name.clone(),
                    visibility: method.visibility,
                    params: method
                        .params
                        .iter()
                        .map(|p| ParamDef {
                            name: p.name.name.clone(),
                            type_name: p.ty.to_string(),
                            out: p.out,
                        })
                        .collect(),
                    return_type: method.return_type.to_string(),
                    body,
                });
            }
            Member::Property(property) => {
                lowerer.property = Some(property.name.name.clone());
                let getter = lowerer.accessor(property, AccessorKind::Get)?;
                let setter = lowerer.accessor(property, AccessorKind::Set)?;
                lowerer.property = None;
                properties.push(PropertyDef {
                    name: property.name.name.clone(),
                    type_name: property.ty.to_string(),
                    getter,
                    setter,
                });
            }
        }
    }

    let constructor = constructor.ok_or_else(|| {
        internal(
            class.name.span,
            format!("Class '{}' has no constructor", class.name.name),
        )
    })?;

    Ok(ClassDef {
        name: class.name.name.clone(),
        fields,
        constructor,
        properties,
        methods,
    })
}

/// Per-class lowering state.
struct Lowerer<'a> {
    fields: Vec<&'a str>,
    methods: FxHashSet<&'a str>,
    /// Property whose accessor is being lowered
    property: Option<String>,
    /// Frame slots of the function being lowered, by name
    locals: Vec<String>,
}

impl<'a> Lowerer<'a> {
    fn new(class: &'a ast::ClassDecl) -> Self {
        let mut fields = Vec::new();
        let mut methods = FxHashSet::default();
        for member in &class.members {
            match member {
                Member::Field(f) => fields.push(f.name.name.as_str()),
                Member::Method(m) => {
                    methods.insert(m.name.name.as_str());
                }
                _ => {}
            }
        }
        Self {
            fields,
            methods,
            property: None,
            locals: Vec::new(),
        }
    }

    fn accessor(
        &mut self,
        property: &ast::PropertyDecl,
        kind: AccessorKind,
    ) -> Result<Option<AccessorDef>, Diagnostic> {
        let Some(decl) = property.accessor(kind) else {
            return Ok(None);
        };
        let body = match &decl.body {
            Some(block) => {
                let params = match kind {
                    AccessorKind::Get => Vec::new(),
                    AccessorKind::Set => vec!["value".to_string()],
                };
                Some(self.function(&params, block)?)
            }
            None => None,
        };
        Ok(Some(AccessorDef {
            visibility: decl.visibility.unwrap_or(property.visibility),
            body,
        }))
    }

    fn function(&mut self, params: &[String], block: &ast::Block) -> Result<Function, Diagnostic> {
        self.locals = params.to_vec();
        let body = self.block(block)?;
        Ok(Function {
            captures: 0,
            params: params.len(),
            slots: self.locals.len(),
            body,
        })
    }

    fn block(&mut self, block: &ast::Block) -> Result<Vec<Stmt>, Diagnostic> {
        block.statements.iter().map(|s| self.statement(s)).collect()
    }

    fn statement(&mut self, stmt: &Statement) -> Result<Stmt, Diagnostic> {
        match stmt {
            Statement::Return { value, .. } => {
                let value = value.as_ref().map(|v| self.expr(v)).transpose()?;
                Ok(Stmt::Return(value))
            }
            Statement::Expression { expression, .. } => Ok(Stmt::Eval(self.expr(expression)?)),
            Statement::Assign { target, value, span } => {
                let value = self.expr(value)?;
                match target {
                    Expression::Identifier(ident) => {
                        Ok(Stmt::StoreLocal(self.local(&ident.name, ident.span)?, value))
                    }
                    Expression::Member {
                        object, property, ..
                    } => {
                        if matches!(**object, Expression::This(_)) {
                            match self.field(&property.name) {
                                Some(index) => Ok(Stmt::StoreField(index, value)),
                                None => Ok(Stmt::SetOwn {
                                    name: property.name.clone(),
                                    value,
                                }),
                            }
                        } else {
                            Ok(Stmt::SetMember {
                                object: self.expr(object)?,
                                name: property.name.clone(),
                                value,
                            })
                        }
                    }
                    _ => Err(internal(*span, "Invalid assignment target")),
                }
            }
        }
    }

    fn expr(&mut self, expr: &Expression) -> Result<Expr, Diagnostic> {
        match expr {
            Expression::This(_) => Ok(Expr::This),
            Expression::Null(_) => Ok(Expr::Const(Value::Null)),
            Expression::Literal(lit, _) => Ok(Expr::Const(match lit {
                ast::Literal::Bool(b) => Value::Bool(*b),
                ast::Literal::Int(n) => Value::Int(*n),
                ast::Literal::Double(n) => Value::Double(*n),
                ast::Literal::String(s) => Value::Str(s.clone()),
            })),
            Expression::Identifier(ident) => Ok(Expr::Local(self.local(&ident.name, ident.span)?)),
            Expression::Member {
                object, property, ..
            } => {
                if matches!(**object, Expression::This(_)) {
                    return Ok(match self.field(&property.name) {
                        Some(index) => Expr::Field(index),
                        None => Expr::GetOwn(property.name.clone()),
                    });
                }
                Ok(Expr::GetMember {
                    object: Box::new(self.expr(object)?),
                    name: property.name.clone(),
                })
            }
            Expression::Call {
                object,
                method,
                args,
                ..
            } => {
                let is_this = matches!(**object, Expression::This(_));
                if is_this && self.methods.contains(method.name.as_str()) {
                    return Ok(Expr::CallOwn {
                        name: method.name.clone(),
                        args: self.args(args)?,
                    });
                }
                let receiver = self.expr(object)?;
                if method.name == TO_STRING && args.is_empty() {
                    return Ok(Expr::ToString(Box::new(receiver)));
                }
                Ok(Expr::CallMember {
                    object: Box::new(receiver),
                    name: method.name.clone(),
                    args: self.args(args)?,
                })
            }
            Expression::New { ty, args, span } => {
                if ty.name.name != ACCESSOR_TYPE || args.len() != 2 {
                    return Err(internal(*span, format!("Cannot construct '{}'", ty)));
                }
                let getter = self.accessor_part(&args[0].value)?;
                let setter = self.accessor_part(&args[1].value)?;
                Ok(Expr::NewAccessor {
                    member: self
                        .property
                        .clone()
                        .unwrap_or_else(|| ACCESSOR_TYPE.to_string()),
                    getter,
                    setter,
                })
            }
            Expression::Lambda(lambda) => {
                Err(internal(lambda.span, "Lambda outside of an accessor construction"))
            }
        }
    }

    fn args(&mut self, args: &[ast::Argument]) -> Result<Vec<Arg>, Diagnostic> {
        args.iter()
            .map(|arg| match (&arg.value, arg.out) {
                (Expression::Identifier(ident), true) => {
                    Ok(Arg::Out(self.local(&ident.name, ident.span)?))
                }
                (_, true) => Err(internal(arg.span, "Out argument must name a local")),
                (value, false) => Ok(Arg::Value(self.expr(value)?)),
            })
            .collect()
    }

    /// One closure of `new IndexedAccessor(getter, setter)`.
    fn accessor_part(&mut self, expr: &Expression) -> Result<Option<Arc<Function>>, Diagnostic> {
        match expr {
            Expression::Null(_) => Ok(None),
            Expression::Lambda(lambda) => Ok(Some(Arc::new(self.lambda(lambda)?))),
            other => Err(internal(other.span(), "Expected a lambda or null")),
        }
    }

    /// Lower a lambda. Its frame starts with a copy of the enclosing frame.
    fn lambda(&mut self, lambda: &ast::LambdaExpr) -> Result<Function, Diagnostic> {
        let outer = self.locals.clone();
        let captures = outer.len();
        self.locals
            .extend(lambda.params.iter().map(|p| p.name.clone()));

        let body = match &lambda.body {
            LambdaBody::Expression(expr) => self.expr(expr).map(|e| vec![Stmt::Return(Some(e))]),
            LambdaBody::Block(block) => self.block(block),
        };
        let slots = self.locals.len();
        self.locals = outer;

        Ok(Function {
            captures,
            params: lambda.params.len(),
            slots,
            body: body?,
        })
    }

    fn local(&self, name: &str, span: Span) -> Result<usize, Diagnostic> {
        self.locals
            .iter()
            .rposition(|local| local == name)
            .ok_or_else(|| internal(span, format!("Unknown local '{}'", name)))
    }

    fn field(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| *f == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn lower_source(source: &str) -> Vec<ClassDef> {
        let unit = Parser::new(source).unwrap().parse().unwrap();
        lower(&unit).unwrap()
    }

    #[test]
    fn test_fields_and_constructor() {
        let classes = lower_source(
            "class W { private readonly source: Mock; constructor(source: Mock) { this.source = source; } }",
        );
        let class = &classes[0];
        assert_eq!(class.name, "W");
        assert_eq!(class.field("source").map(|(i, _)| i), Some(0));
        assert_eq!(class.constructor.params, 1);
        assert!(matches!(
            class.constructor.body.as_slice(),
            [Stmt::StoreField(0, Expr::Local(0))]
        ));
    }

    #[test]
    fn test_property_accessors() {
        let classes = lower_source(
            "class W {
                private readonly source: Mock;
                constructor(source: Mock) { this.source = source; }
                public Name: string { get { return this.source.Name; } set { this.source.Name = value; } }
                public Size: int { get { return this.source.Size; } private set; }
            }",
        );
        let name = classes[0].property("Name").unwrap();
        assert!(name.getter.as_ref().unwrap().is_public());
        let setter = name.setter.as_ref().unwrap();
        assert_eq!(setter.body.as_ref().unwrap().params, 1);
        assert!(matches!(
            setter.body.as_ref().unwrap().body.as_slice(),
            [Stmt::SetMember { name, value: Expr::Local(0), .. }] if name == "Name"
        ));

        let size = classes[0].property("Size").unwrap();
        assert!(!size.setter.as_ref().unwrap().is_public());
        assert!(size.setter.as_ref().unwrap().body.is_none());
    }

    #[test]
    fn test_own_calls_and_to_string() {
        let classes = lower_source(
            "class W {
                constructor(source: Mock) { }
                public A(): int { return this.B(); }
                public B(): int { return 1; }
                public toString(): string { return this.toString(); }
                public C(): string { return this.Missing.toString(); }
            }",
        );
        let class = &classes[0];
        assert!(matches!(
            class.method("A").unwrap().body.body.as_slice(),
            [Stmt::Return(Some(Expr::CallOwn { name, .. }))] if name == "B"
        ));
        assert!(matches!(
            class.method("toString").unwrap().body.body.as_slice(),
            [Stmt::Return(Some(Expr::CallOwn { .. }))]
        ));
        assert!(matches!(
            class.method("C").unwrap().body.body.as_slice(),
            [Stmt::Return(Some(Expr::ToString(_)))]
        ));
    }

    #[test]
    fn test_accessor_lambdas_capture_frame() {
        let classes = lower_source(
            "class W {
                constructor(source: Mock) { }
                public Item: IndexedAccessor<int, double> {
                    get { return new IndexedAccessor<int, double>((i) => this.source.get_Item(i), null); }
                    private set;
                }
            }",
        );
        let getter = classes[0].property("Item").unwrap().getter.as_ref().unwrap();
        let body = &getter.body.as_ref().unwrap().body;
        let Stmt::Return(Some(Expr::NewAccessor { member, getter, setter })) = &body[0] else {
            panic!("expected an accessor construction, got {:?}", body);
        };
        assert_eq!(member, "Item");
        assert!(setter.is_none());
        let lambda = getter.as_ref().unwrap();
        assert_eq!((lambda.captures, lambda.params, lambda.slots), (0, 1, 1));
        assert!(matches!(
            lambda.body.as_slice(),
            [Stmt::Return(Some(Expr::CallMember { args, .. }))] if matches!(args.as_slice(), [Arg::Value(Expr::Local(0))])
        ));
    }

    #[test]
    fn test_out_arguments_bind_slots() {
        let classes = lower_source(
            "class W {
                constructor(source: Mock) { }
                public TryGet(key: string, out found: double): bool { return this.source.TryGet(key, out found); }
            }",
        );
        let method = classes[0].method("TryGet").unwrap();
        assert!(method.params[1].out);
        assert!(matches!(
            method.body.body.as_slice(),
            [Stmt::Return(Some(Expr::CallMember { args, .. }))]
                if matches!(args.as_slice(), [Arg::Value(Expr::Local(0)), Arg::Out(1)])
        ));
    }

    #[test]
    fn test_missing_constructor_is_internal_error() {
        let unit = Parser::new("class W { }").unwrap().parse().unwrap();
        let err = lower(&unit).unwrap_err();
        assert_eq!(err.code(), Some(INTERNAL));
    }
}
