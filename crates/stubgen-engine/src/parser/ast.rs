//! Abstract syntax tree for the stub language.

use crate::parser::token::Span;

/// A parsed source file.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    /// Enclosing namespace, if declared
    pub namespace: Option<Identifier>,
    /// Class declarations
    pub classes: Vec<ClassDecl>,
    /// Whole-file span
    pub span: Span,
}

/// A name with its location.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    /// The name
    pub name: String,
    /// Location
    pub span: Span,
}

/// Member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Accessible from outside the class
    #[default]
    Public,
    /// Accessible only from inside the class
    Private,
}

/// `class Name { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    /// Class name
    pub name: Identifier,
    /// Members in declaration order
    pub members: Vec<Member>,
    /// Location
    pub span: Span,
}

/// A class member.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// Field declaration
    Field(FieldDecl),
    /// Constructor
    Constructor(ConstructorDecl),
    /// Method
    Method(MethodDecl),
    /// Property with accessors
    Property(PropertyDecl),
}

impl Member {
    /// Member name (`constructor` for constructors).
    pub fn name(&self) -> &str {
        match self {
            Member::Field(f) => &f.name.name,
            Member::Constructor(_) => "constructor",
            Member::Method(m) => &m.name.name,
            Member::Property(p) => &p.name.name,
        }
    }

    /// Location of the member.
    pub fn span(&self) -> Span {
        match self {
            Member::Field(f) => f.span,
            Member::Constructor(c) => c.span,
            Member::Method(m) => m.span,
            Member::Property(p) => p.span,
        }
    }
}

/// `private readonly name: Type;`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Visibility
    pub visibility: Visibility,
    /// Whether the field may only be assigned in the constructor
    pub readonly: bool,
    /// Field name
    pub name: Identifier,
    /// Field type
    pub ty: TypeExpr,
    /// Location
    pub span: Span,
}

/// `constructor(params) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    /// Parameters
    pub params: Vec<Param>,
    /// Body
    pub body: Block,
    /// Location
    pub span: Span,
}

/// `name(params): Type { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    /// Visibility
    pub visibility: Visibility,
    /// Method name
    pub name: Identifier,
    /// Parameters
    pub params: Vec<Param>,
    /// Declared return type
    pub return_type: TypeExpr,
    /// Body
    pub body: Block,
    /// Location
    pub span: Span,
}

/// `name: Type { get ...; set ...; }`
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    /// Visibility
    pub visibility: Visibility,
    /// Property name
    pub name: Identifier,
    /// Property type
    pub ty: TypeExpr,
    /// Accessors in declaration order
    pub accessors: Vec<AccessorDecl>,
    /// Location
    pub span: Span,
}

impl PropertyDecl {
    /// Find the accessor of the given kind.
    pub fn accessor(&self, kind: AccessorKind) -> Option<&AccessorDecl> {
        self.accessors.iter().find(|a| a.kind == kind)
    }
}

/// Kind of property accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    /// Read
    Get,
    /// Write
    Set,
}

impl std::fmt::Display for AccessorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessorKind::Get => f.write_str("get"),
            AccessorKind::Set => f.write_str("set"),
        }
    }
}

/// `private get;` or `set { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct AccessorDecl {
    /// Explicit visibility (inherits the property's when absent)
    pub visibility: Option<Visibility>,
    /// Get or set
    pub kind: AccessorKind,
    /// Body; `None` for a restricted declaration
    pub body: Option<Block>,
    /// Location
    pub span: Span,
}

/// `out name: Type`
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Whether the parameter is passed by out reference
    pub out: bool,
    /// Parameter name
    pub name: Identifier,
    /// Parameter type
    pub ty: TypeExpr,
    /// Location
    pub span: Span,
}

/// `Name` or `Name<Arg, ...>`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpr {
    /// Type name
    pub name: Identifier,
    /// Generic arguments
    pub args: Vec<TypeExpr>,
    /// Location
    pub span: Span,
}

impl std::fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name.name)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", arg)?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

/// `{ statements }`
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements in order
    pub statements: Vec<Statement>,
    /// Location
    pub span: Span,
}

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `return expr?;`
    Return {
        /// Returned value
        value: Option<Expression>,
        /// Location
        span: Span,
    },
    /// `target = value;`
    Assign {
        /// Assigned place
        target: Expression,
        /// Assigned value
        value: Expression,
        /// Location
        span: Span,
    },
    /// `expr;`
    Expression {
        /// The expression
        expression: Expression,
        /// Location
        span: Span,
    },
}

impl Statement {
    /// Location of the statement.
    pub fn span(&self) -> Span {
        match self {
            Statement::Return { span, .. }
            | Statement::Assign { span, .. }
            | Statement::Expression { span, .. } => *span,
        }
    }
}

/// Literal values.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `true` / `false`
    Bool(bool),
    /// Integer
    Int(i64),
    /// Float
    Double(f64),
    /// String
    String(String),
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// `this`
    This(Span),
    /// `null`
    Null(Span),
    /// Literal value
    Literal(Literal, Span),
    /// Local name
    Identifier(Identifier),
    /// `object.property`
    Member {
        /// Receiver
        object: Box<Expression>,
        /// Accessed member
        property: Identifier,
        /// Location
        span: Span,
    },
    /// `object.method(args)`
    Call {
        /// Receiver
        object: Box<Expression>,
        /// Called method
        method: Identifier,
        /// Arguments
        args: Vec<Argument>,
        /// Location
        span: Span,
    },
    /// `new Type(args)`
    New {
        /// Constructed type
        ty: TypeExpr,
        /// Arguments
        args: Vec<Argument>,
        /// Location
        span: Span,
    },
    /// `(params) => body`
    Lambda(LambdaExpr),
}

impl Expression {
    /// Location of the expression.
    pub fn span(&self) -> Span {
        match self {
            Expression::This(span) | Expression::Null(span) | Expression::Literal(_, span) => *span,
            Expression::Identifier(id) => id.span,
            Expression::Member { span, .. }
            | Expression::Call { span, .. }
            | Expression::New { span, .. } => *span,
            Expression::Lambda(lambda) => lambda.span,
        }
    }
}

/// A call argument, optionally passed as `out`.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    /// Whether passed by out reference
    pub out: bool,
    /// Argument expression (an identifier when `out`)
    pub value: Expression,
    /// Location
    pub span: Span,
}

/// `(a, b) => body`
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpr {
    /// Parameter names
    pub params: Vec<Identifier>,
    /// Body
    pub body: LambdaBody,
    /// Location
    pub span: Span,
}

/// Lambda body.
#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    /// `=> expr`
    Expression(Box<Expression>),
    /// `=> { ... }`
    Block(Block),
}
