//! Semantic checker
//!
//! Checks a parsed unit against its reference units. Every problem becomes a
//! [`Diagnostic`]; checking never stops at the first error, and expressions
//! that fail to type as [`Ty::Unknown`] so that one mistake does not cascade
//! into a string of follow-up errors.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::compiler::references::{References, ACCESSOR_TYPE, GENERATOR_UNIT, STD_UNIT, TO_STRING};
use crate::compiler::types::Ty;
use crate::diagnostic::{Diagnostic, ErrorCode};
use crate::parser::ast::*;
use crate::parser::Span;

/// Diagnostic codes produced by the checker.
pub mod codes {
    use crate::diagnostic::ErrorCode;

    pub const UNKNOWN_TYPE: ErrorCode = ErrorCode("E0001");
    pub const GENERIC_ARITY: ErrorCode = ErrorCode("E0002");
    pub const DUPLICATE: ErrorCode = ErrorCode("E0003");
    pub const UNKNOWN_NAME: ErrorCode = ErrorCode("E0004");
    pub const UNKNOWN_MEMBER: ErrorCode = ErrorCode("E0005");
    pub const NOT_READABLE: ErrorCode = ErrorCode("E0006");
    pub const NOT_WRITABLE: ErrorCode = ErrorCode("E0007");
    pub const INDEXED_ACCESS: ErrorCode = ErrorCode("E0008");
    pub const ARGUMENT_COUNT: ErrorCode = ErrorCode("E0009");
    pub const OUT_MISMATCH: ErrorCode = ErrorCode("E0010");
    pub const TYPE_MISMATCH: ErrorCode = ErrorCode("E0011");
    pub const RETURN_VALUE: ErrorCode = ErrorCode("E0012");
    pub const READONLY_ASSIGN: ErrorCode = ErrorCode("E0013");
    pub const READONLY_UNASSIGNED: ErrorCode = ErrorCode("E0014");
    pub const PUBLIC_BODILESS: ErrorCode = ErrorCode("E0015");
    pub const MISSING_CONSTRUCTOR: ErrorCode = ErrorCode("E0016");
    pub const INVALID_EXPRESSION: ErrorCode = ErrorCode("E0017");
}

/// Check `unit` against `refs`, returning every error found.
pub fn check(unit: &CompilationUnit, refs: &References) -> Vec<Diagnostic> {
    let mut checker = Checker::new(refs);
    checker.check_unit(unit);
    checker.diagnostics
}

#[derive(Debug, Clone)]
struct Local {
    name: String,
    ty: Ty,
}

#[derive(Debug, Clone)]
struct Scope {
    class: String,
    locals: Vec<Local>,
    return_ty: Ty,
    in_constructor: bool,
}

impl Scope {
    fn lookup(&self, name: &str) -> Option<&Local> {
        self.locals.iter().rev().find(|l| l.name == name)
    }
}

/// Members of one class declared in the unit.
#[derive(Default)]
struct ClassSymbols<'a> {
    fields: FxHashMap<&'a str, &'a FieldDecl>,
    properties: FxHashMap<&'a str, &'a PropertyDecl>,
    methods: FxHashMap<&'a str, &'a MethodDecl>,
}

struct Checker<'a> {
    refs: &'a References,
    classes: FxHashMap<&'a str, ClassSymbols<'a>>,
    assigned_fields: FxHashSet<String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Checker<'a> {
    fn new(refs: &'a References) -> Self {
        Self {
            refs,
            classes: FxHashMap::default(),
            assigned_fields: FxHashSet::default(),
            diagnostics: Vec::new(),
        }
    }

    fn error(&mut self, code: ErrorCode, span: Span, message: String, label: &str) {
        self.diagnostics.push(
            Diagnostic::error(message)
                .with_code(code)
                .with_primary_label(span, label),
        );
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn check_unit(&mut self, unit: &'a CompilationUnit) {
        for class in &unit.classes {
            if self.classes.contains_key(class.name.name.as_str()) {
                self.error(
                    codes::DUPLICATE,
                    class.name.span,
                    format!("Duplicate class '{}'", class.name.name),
                    "already declared",
                );
                continue;
            }
            let symbols = self.collect_members(class);
            self.classes.insert(&class.name.name, symbols);
        }

        for class in &unit.classes {
            self.check_class(class);
        }
    }

    fn collect_members(&mut self, class: &'a ClassDecl) -> ClassSymbols<'a> {
        let mut symbols = ClassSymbols::default();
        let mut seen: FxHashSet<&str> = FxHashSet::default();

        for member in &class.members {
            let name = member.name();
            if !seen.insert(name) {
                let message = match member {
                    Member::Constructor(_) => {
                        format!("Class '{}' declares more than one constructor", class.name.name)
                    }
                    _ => format!("Duplicate member '{}' in class '{}'", name, class.name.name),
                };
                self.error(codes::DUPLICATE, member_name_span(member), message, "already declared");
                continue;
            }
            match member {
                Member::Field(f) => {
                    symbols.fields.insert(&f.name.name, f);
                }
                Member::Property(p) => {
                    symbols.properties.insert(&p.name.name, p);
                }
                Member::Method(m) => {
                    symbols.methods.insert(&m.name.name, m);
                }
                Member::Constructor(_) => {}
            }
        }
        symbols
    }

    fn check_class(&mut self, class: &'a ClassDecl) {
        let class_name = class.name.name.clone();
        let target = Ty::Source(self.refs.target_type().to_string());
        self.assigned_fields.clear();

        let mut has_source_constructor = false;
        for member in &class.members {
            match member {
                Member::Field(field) => {
                    self.resolve_value_type(&field.ty);
                }
                Member::Constructor(ctor) => {
                    let params = self.check_params(&ctor.params);
                    if params.len() == 1 && !ctor.params[0].out && params[0].ty == target {
                        has_source_constructor = true;
                    }
                    let mut scope = Scope {
                        class: class_name.clone(),
                        locals: params,
                        return_ty: Ty::Void,
                        in_constructor: true,
                    };
                    self.check_block(&ctor.body, &mut scope);
                }
                Member::Method(method) => {
                    let params = self.check_params(&method.params);
                    let return_ty = self.resolve_type(&method.return_type);
                    let mut scope = Scope {
                        class: class_name.clone(),
                        locals: params,
                        return_ty: return_ty.clone(),
                        in_constructor: false,
                    };
                    self.check_block(&method.body, &mut scope);
                    if !return_ty.is_void() && !contains_return(&method.body) {
                        self.error(
                            codes::RETURN_VALUE,
                            method.name.span,
                            format!(
                                "Method '{}' must return a value of type '{}'",
                                method.name.name, return_ty
                            ),
                            "missing return",
                        );
                    }
                }
                Member::Property(property) => self.check_property(&class_name, property),
            }
        }

        for member in &class.members {
            if let Member::Field(field) = member {
                if field.readonly && !self.assigned_fields.contains(&field.name.name) {
                    self.error(
                        codes::READONLY_UNASSIGNED,
                        field.name.span,
                        format!(
                            "Readonly field '{}' is never assigned in the constructor",
                            field.name.name
                        ),
                        "never assigned",
                    );
                }
            }
        }

        if !has_source_constructor {
            self.diagnostics.push(
                Diagnostic::error(format!(
                    "Class '{}' has no constructor taking a '{}'",
                    class_name, target
                ))
                .with_code(codes::MISSING_CONSTRUCTOR)
                .with_primary_label(class.name.span, "wrapper class")
                .with_help(format!("add 'constructor(source: {}) {{ ... }}'", target)),
            );
        }
    }

    fn check_property(&mut self, class_name: &str, property: &'a PropertyDecl) {
        let ty = self.resolve_value_type(&property.ty);
        let mut kinds = FxHashSet::default();

        for accessor in &property.accessors {
            if !kinds.insert(accessor.kind) {
                self.error(
                    codes::DUPLICATE,
                    accessor.span,
                    format!(
                        "Duplicate '{}' accessor for property '{}'",
                        accessor.kind, property.name.name
                    ),
                    "already declared",
                );
                continue;
            }

            let visibility = accessor.visibility.unwrap_or(property.visibility);
            let Some(body) = &accessor.body else {
                if visibility != Visibility::Private {
                    self.diagnostics.push(
                        Diagnostic::error(format!(
                            "Accessor '{}' of property '{}' has no body but is not private",
                            accessor.kind, property.name.name
                        ))
                        .with_code(codes::PUBLIC_BODILESS)
                        .with_primary_label(accessor.span, "missing body")
                        .with_help(format!("declare it as 'private {};'", accessor.kind)),
                    );
                }
                continue;
            };

            let (locals, return_ty) = match accessor.kind {
                AccessorKind::Get => (Vec::new(), ty.clone()),
                AccessorKind::Set => (
                    vec![Local {
                        name: "value".to_string(),
                        ty: ty.clone(),
                    }],
                    Ty::Void,
                ),
            };
            let mut scope = Scope {
                class: class_name.to_string(),
                locals,
                return_ty: return_ty.clone(),
                in_constructor: false,
            };
            self.check_block(body, &mut scope);
            if !return_ty.is_void() && !contains_return(body) {
                self.error(
                    codes::RETURN_VALUE,
                    accessor.span,
                    format!(
                        "Getter of property '{}' must return a value of type '{}'",
                        property.name.name, return_ty
                    ),
                    "missing return",
                );
            }
        }
    }

    fn check_params(&mut self, params: &[Param]) -> Vec<Local> {
        let mut seen = FxHashSet::default();
        let mut locals = Vec::new();
        for param in params {
            if !seen.insert(param.name.name.as_str()) {
                self.error(
                    codes::DUPLICATE,
                    param.name.span,
                    format!("Duplicate parameter '{}'", param.name.name),
                    "already declared",
                );
            }
            let ty = self.resolve_value_type(&param.ty);
            locals.push(Local {
                name: param.name.name.clone(),
                ty,
            });
        }
        locals
    }

    // ========================================================================
    // Types
    // ========================================================================

    /// Resolve a type that must hold a value (not `void`).
    fn resolve_value_type(&mut self, ty: &TypeExpr) -> Ty {
        self.resolve(ty, true, true)
    }

    fn resolve_type(&mut self, ty: &TypeExpr) -> Ty {
        self.resolve(ty, false, true)
    }

    /// Resolve a type whose declaration was already checked, without
    /// reporting it again.
    fn lookup_type(&mut self, ty: &TypeExpr) -> Ty {
        self.resolve(ty, false, false)
    }

    fn resolve(&mut self, ty: &TypeExpr, value_only: bool, report: bool) -> Ty {
        let name = ty.name.name.as_str();

        let generic_arity = if self.classes.contains_key(name) {
            Some((0, Ty::Class(name.to_string())))
        } else {
            match self.refs.resolve(name) {
                Some((unit, decl)) if unit.name() == STD_UNIT => {
                    Ty::primitive(name).map(|ty| (decl.arity, ty))
                }
                Some((unit, decl)) if unit.name() == GENERATOR_UNIT && name == ACCESSOR_TYPE => {
                    Some((decl.arity, Ty::Unknown))
                }
                Some((_, decl)) => Some((decl.arity, Ty::Source(name.to_string()))),
                None => None,
            }
        };

        let Some((arity, resolved)) = generic_arity else {
            if report {
                self.error(
                    codes::UNKNOWN_TYPE,
                    ty.name.span,
                    format!("Cannot find type '{}'", name),
                    "unknown type",
                );
            }
            return Ty::Unknown;
        };

        if ty.args.len() != arity {
            if report {
                self.error(
                    codes::GENERIC_ARITY,
                    ty.span,
                    format!(
                        "Type '{}' expects {} type argument{}, but got {}",
                        name,
                        arity,
                        if arity == 1 { "" } else { "s" },
                        ty.args.len()
                    ),
                    "wrong number of type arguments",
                );
            }
            return Ty::Unknown;
        }

        let resolved = if name == ACCESSOR_TYPE && arity == 2 {
            let key = self.resolve(&ty.args[0], true, report);
            let value = self.resolve(&ty.args[1], true, report);
            Ty::Accessor(Box::new(key), Box::new(value))
        } else {
            resolved
        };

        if value_only && resolved.is_void() {
            if report {
                self.error(
                    codes::UNKNOWN_TYPE,
                    ty.span,
                    "Type 'void' cannot be used here".to_string(),
                    "not a value type",
                );
            }
            return Ty::Unknown;
        }
        resolved
    }

    fn expect_assignable(&mut self, actual: &Ty, expected: &Ty, span: Span) {
        if !actual.is_assignable_to(expected) {
            self.error(
                codes::TYPE_MISMATCH,
                span,
                format!(
                    "Type '{}' is not assignable to type '{}'",
                    actual, expected
                ),
                &format!("expected '{}', found '{}'", expected, actual),
            );
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn check_block(&mut self, block: &Block, scope: &mut Scope) {
        for stmt in &block.statements {
            self.check_statement(stmt, scope);
        }
    }

    fn check_statement(&mut self, stmt: &Statement, scope: &mut Scope) {
        match stmt {
            Statement::Return { value, span } => match (value, scope.return_ty.is_void()) {
                (Some(value), true) => {
                    self.check_expr(value, scope);
                    self.error(
                        codes::RETURN_VALUE,
                        value.span(),
                        "Unexpected return value in a member returning 'void'".to_string(),
                        "remove this value",
                    );
                }
                (Some(value), false) => {
                    let ty = self.check_expr(value, scope);
                    let expected = scope.return_ty.clone();
                    self.expect_assignable(&ty, &expected, value.span());
                }
                (None, false) => {
                    self.error(
                        codes::RETURN_VALUE,
                        *span,
                        format!("Missing return value of type '{}'", scope.return_ty),
                        "expected a value",
                    );
                }
                (None, true) => {}
            },
            Statement::Assign { target, value, .. } => {
                let target_ty = match target {
                    Expression::Identifier(ident) => match scope.lookup(&ident.name) {
                        Some(local) => local.ty.clone(),
                        None => {
                            self.error(
                                codes::UNKNOWN_NAME,
                                ident.span,
                                format!("Cannot find name '{}'", ident.name),
                                "not found in this scope",
                            );
                            Ty::Unknown
                        }
                    },
                    Expression::Member { object, property, .. } => {
                        let object_ty = self.check_expr(object, scope);
                        self.member_type(&object_ty, object, property, scope, true)
                    }
                    other => {
                        self.error(
                            codes::INVALID_EXPRESSION,
                            other.span(),
                            "Invalid assignment target".to_string(),
                            "cannot assign to this",
                        );
                        Ty::Unknown
                    }
                };
                let value_ty = self.check_expr(value, scope);
                self.expect_assignable(&value_ty, &target_ty, value.span());
            }
            Statement::Expression { expression, .. } => {
                self.check_expr(expression, scope);
            }
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn check_expr(&mut self, expr: &Expression, scope: &mut Scope) -> Ty {
        match expr {
            Expression::This(_) => Ty::Class(scope.class.clone()),
            Expression::Null(_) => Ty::Null,
            Expression::Literal(lit, _) => match lit {
                Literal::Bool(_) => Ty::Bool,
                Literal::Int(_) => Ty::Int,
                Literal::Double(_) => Ty::Double,
                Literal::String(_) => Ty::String,
            },
            Expression::Identifier(ident) => match scope.lookup(&ident.name) {
                Some(local) => local.ty.clone(),
                None => {
                    self.error(
                        codes::UNKNOWN_NAME,
                        ident.span,
                        format!("Cannot find name '{}'", ident.name),
                        "not found in this scope",
                    );
                    Ty::Unknown
                }
            },
            Expression::Member {
                object, property, ..
            } => {
                let object_ty = self.check_expr(object, scope);
                self.member_type(&object_ty, object, property, scope, false)
            }
            Expression::Call {
                object,
                method,
                args,
                span,
            } => {
                let object_ty = self.check_expr(object, scope);
                self.call_type(&object_ty, method, args, *span, scope)
            }
            Expression::New { ty, args, span } => self.check_new(ty, args, *span, scope),
            Expression::Lambda(lambda) => {
                self.error(
                    codes::INVALID_EXPRESSION,
                    lambda.span,
                    "Lambda expressions are only allowed as IndexedAccessor arguments".to_string(),
                    "unexpected lambda",
                );
                Ty::Unknown
            }
        }
    }

    /// Type of `object.property`, checking read or write capability.
    fn member_type(
        &mut self,
        object_ty: &Ty,
        object: &Expression,
        property: &Identifier,
        scope: &Scope,
        write: bool,
    ) -> Ty {
        let name = property.name.as_str();
        match object_ty {
            Ty::Unknown => Ty::Unknown,
            Ty::Class(class) => {
                let (field, prop, is_method) = match self.classes.get(class.as_str()) {
                    Some(symbols) => (
                        symbols.fields.get(name).copied(),
                        symbols.properties.get(name).copied(),
                        symbols.methods.contains_key(name),
                    ),
                    None => return Ty::Unknown,
                };
                if let Some(field) = field {
                    let is_this = matches!(object, Expression::This(_));
                    if write && field.readonly {
                        if scope.in_constructor && is_this && scope.class == *class {
                            self.assigned_fields.insert(name.to_string());
                        } else {
                            self.error(
                                codes::READONLY_ASSIGN,
                                property.span,
                                format!(
                                    "Cannot assign to '{}' because it is a readonly field",
                                    name
                                ),
                                "assignment outside the constructor",
                            );
                        }
                    }
                    return self.lookup_type(&field.ty);
                }
                if let Some(prop) = prop {
                    let kind = if write { AccessorKind::Set } else { AccessorKind::Get };
                    let implemented = prop
                        .accessor(kind)
                        .map(|a| a.body.is_some())
                        .unwrap_or(false);
                    if !implemented {
                        let (code, what) = if write {
                            (codes::NOT_WRITABLE, "read-only")
                        } else {
                            (codes::NOT_READABLE, "write-only")
                        };
                        self.error(
                            code,
                            property.span,
                            format!("Property '{}' of '{}' is {}", name, class, what),
                            &format!("no '{}' accessor", kind),
                        );
                    }
                    return self.lookup_type(&prop.ty);
                }
                let message = if is_method {
                    format!("'{}' is a method of '{}', not a property", name, class)
                } else {
                    format!("Property '{}' does not exist on type '{}'", name, class)
                };
                self.error(codes::UNKNOWN_MEMBER, property.span, message, "property not found");
                Ty::Unknown
            }
            Ty::Source(type_name) => {
                let refs = self.refs;
                let Some(descriptor) = refs.source_type(type_name) else {
                    self.error(
                        codes::UNKNOWN_MEMBER,
                        property.span,
                        format!("Members of type '{}' are not known", type_name),
                        "property not found",
                    );
                    return Ty::Unknown;
                };
                let Some(prop) = descriptor.property(name) else {
                    let message = if descriptor.method(name).is_some() {
                        format!("'{}' is a method of '{}', not a property", name, type_name)
                    } else {
                        format!("Property '{}' does not exist on type '{}'", name, type_name)
                    };
                    self.error(codes::UNKNOWN_MEMBER, property.span, message, "property not found");
                    return Ty::Unknown;
                };
                if prop.is_indexed() {
                    self.diagnostics.push(
                        Diagnostic::error(format!(
                            "Indexed property '{}' of '{}' cannot be accessed directly",
                            name, type_name
                        ))
                        .with_code(codes::INDEXED_ACCESS)
                        .with_primary_label(property.span, "indexed property")
                        .with_help(format!("call 'get_{0}' or 'set_{0}' instead", name)),
                    );
                    return Ty::Unknown;
                }
                if write && !prop.writable {
                    self.error(
                        codes::NOT_WRITABLE,
                        property.span,
                        format!("Property '{}' of '{}' is read-only", name, type_name),
                        "not writable",
                    );
                } else if !write && !prop.readable {
                    self.error(
                        codes::NOT_READABLE,
                        property.span,
                        format!("Property '{}' of '{}' is write-only", name, type_name),
                        "not readable",
                    );
                }
                refs.ty_of(&prop.ty)
            }
            other => {
                self.error(
                    codes::UNKNOWN_MEMBER,
                    property.span,
                    format!("Property '{}' does not exist on type '{}'", name, other),
                    "property not found",
                );
                Ty::Unknown
            }
        }
    }

    /// Type of `object.method(args)`.
    fn call_type(
        &mut self,
        object_ty: &Ty,
        method: &Identifier,
        args: &[Argument],
        span: Span,
        scope: &mut Scope,
    ) -> Ty {
        let name = method.name.as_str();
        let is_to_string = name == TO_STRING && args.is_empty();

        let signature: Option<(Vec<(Ty, bool)>, Ty)> = match object_ty {
            Ty::Unknown => {
                self.check_args_untyped(args, scope);
                return Ty::Unknown;
            }
            Ty::Class(class) => {
                let method_decl = self
                    .classes
                    .get(class.as_str())
                    .and_then(|symbols| symbols.methods.get(name).copied());
                match method_decl {
                    Some(decl) => {
                        let params = decl
                            .params
                            .iter()
                            .map(|p| (self.lookup_type(&p.ty), p.out))
                            .collect();
                        Some((params, self.lookup_type(&decl.return_type)))
                    }
                    None => None,
                }
            }
            Ty::Source(type_name) => {
                let refs = self.refs;
                refs.source_type(type_name).and_then(|descriptor| {
                    descriptor.method(name).map(|m| {
                        let params = m
                            .params
                            .iter()
                            .map(|p| (refs.ty_of(&p.ty), p.is_out()))
                            .collect();
                        (params, refs.ty_of(&m.returns))
                    })
                })
            }
            Ty::Accessor(key, value) => match name {
                "get" => Some((vec![((**key).clone(), false)], (**value).clone())),
                "set" => Some((
                    vec![((**key).clone(), false), ((**value).clone(), false)],
                    Ty::Void,
                )),
                _ => None,
            },
            _ => None,
        };

        match signature {
            Some((params, returns)) => {
                self.check_args(name, &params, args, span, scope);
                returns
            }
            None if is_to_string && !matches!(object_ty, Ty::Void | Ty::Null) => Ty::String,
            None => {
                self.check_args_untyped(args, scope);
                self.error(
                    codes::UNKNOWN_MEMBER,
                    method.span,
                    format!("Method '{}' does not exist on type '{}'", name, object_ty),
                    "method not found",
                );
                Ty::Unknown
            }
        }
    }

    fn check_args(
        &mut self,
        member: &str,
        params: &[(Ty, bool)],
        args: &[Argument],
        span: Span,
        scope: &mut Scope,
    ) {
        if params.len() != args.len() {
            self.error(
                codes::ARGUMENT_COUNT,
                span,
                format!(
                    "'{}' expects {} argument{}, but got {}",
                    member,
                    params.len(),
                    if params.len() == 1 { "" } else { "s" },
                    args.len()
                ),
                "incorrect number of arguments",
            );
            self.check_args_untyped(args, scope);
            return;
        }

        for ((param_ty, param_out), arg) in params.iter().zip(args) {
            if *param_out != arg.out {
                let message = if *param_out {
                    format!("Argument of '{}' must be passed with 'out'", member)
                } else {
                    format!("Argument of '{}' must not be passed with 'out'", member)
                };
                self.error(codes::OUT_MISMATCH, arg.span, message, "parameter mode mismatch");
            }
            if arg.out {
                if let Expression::Identifier(ident) = &arg.value {
                    match scope.lookup(&ident.name) {
                        Some(local) => {
                            let local_ty = local.ty.clone();
                            self.expect_assignable(param_ty, &local_ty, arg.span);
                        }
                        None => self.error(
                            codes::UNKNOWN_NAME,
                            ident.span,
                            format!("Cannot find name '{}'", ident.name),
                            "not found in this scope",
                        ),
                    }
                }
            } else {
                let ty = self.check_expr(&arg.value, scope);
                self.expect_assignable(&ty, param_ty, arg.value.span());
            }
        }
    }

    fn check_args_untyped(&mut self, args: &[Argument], scope: &mut Scope) {
        for arg in args {
            if !arg.out {
                self.check_expr(&arg.value, scope);
            }
        }
    }

    fn check_new(&mut self, ty: &TypeExpr, args: &[Argument], span: Span, scope: &mut Scope) -> Ty {
        let resolved = self.resolve_type(ty);
        let (key, value) = match &resolved {
            Ty::Accessor(key, value) => ((**key).clone(), (**value).clone()),
            Ty::Unknown => {
                self.check_args_untyped(args, scope);
                return Ty::Unknown;
            }
            other => {
                self.error(
                    codes::INVALID_EXPRESSION,
                    ty.span,
                    format!("Type '{}' cannot be constructed", other),
                    &format!("only {} can be constructed", ACCESSOR_TYPE),
                );
                return Ty::Unknown;
            }
        };

        if args.len() != 2 {
            self.error(
                codes::ARGUMENT_COUNT,
                span,
                format!(
                    "{} expects 2 arguments (getter, setter), but got {}",
                    ACCESSOR_TYPE,
                    args.len()
                ),
                "incorrect number of arguments",
            );
            return resolved;
        }

        let expected = [
            (vec![key.clone()], value.clone()),
            (vec![key, value], Ty::Void),
        ];
        for (arg, (params, returns)) in args.iter().zip(expected) {
            if arg.out {
                self.error(
                    codes::OUT_MISMATCH,
                    arg.span,
                    format!("Arguments of {} cannot be passed with 'out'", ACCESSOR_TYPE),
                    "parameter mode mismatch",
                );
                continue;
            }
            match &arg.value {
                Expression::Lambda(lambda) => self.check_lambda(lambda, params, returns, scope),
                Expression::Null(_) => {}
                other => {
                    let found = self.check_expr(other, scope);
                    self.error(
                        codes::TYPE_MISMATCH,
                        other.span(),
                        format!(
                            "Expected a lambda with {} parameter{} or null, found '{}'",
                            params.len(),
                            if params.len() == 1 { "" } else { "s" },
                            found
                        ),
                        "expected a lambda",
                    );
                }
            }
        }
        resolved
    }

    fn check_lambda(&mut self, lambda: &LambdaExpr, params: Vec<Ty>, returns: Ty, scope: &Scope) {
        if lambda.params.len() != params.len() {
            self.error(
                codes::TYPE_MISMATCH,
                lambda.span,
                format!(
                    "Expected a lambda with {} parameter{}, found one with {}",
                    params.len(),
                    if params.len() == 1 { "" } else { "s" },
                    lambda.params.len()
                ),
                "wrong number of lambda parameters",
            );
        }

        let mut inner = scope.clone();
        inner.return_ty = returns.clone();
        inner.in_constructor = false;
        for (i, param) in lambda.params.iter().enumerate() {
            inner.locals.push(Local {
                name: param.name.clone(),
                ty: params.get(i).cloned().unwrap_or(Ty::Unknown),
            });
        }

        match &lambda.body {
            LambdaBody::Expression(body) => {
                let ty = self.check_expr(body, &mut inner);
                if !returns.is_void() {
                    self.expect_assignable(&ty, &returns, body.span());
                }
            }
            LambdaBody::Block(block) => {
                self.check_block(block, &mut inner);
                if !returns.is_void() && !contains_return(block) {
                    self.error(
                        codes::RETURN_VALUE,
                        lambda.span,
                        format!("Lambda must return a value of type '{}'", returns),
                        "missing return",
                    );
                }
            }
        }
    }
}

fn contains_return(block: &Block) -> bool {
    block
        .statements
        .iter()
        .any(|stmt| matches!(stmt, Statement::Return { .. }))
}

fn member_name_span(member: &Member) -> Span {
    match member {
        Member::Field(f) => f.name.span,
        Member::Method(m) => m.name.span,
        Member::Property(p) => p.name.span,
        Member::Constructor(c) => c.span,
    }
}
