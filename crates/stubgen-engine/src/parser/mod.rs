//! Stub language front end
//!
//! Lexer, AST and recursive-descent parser for the class-definition language
//! the source emitter produces and the compiler consumes.

pub mod ast;
pub mod lexer;
#[allow(clippy::module_inception)]
pub mod parser;
pub mod token;

pub use ast::CompilationUnit;
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, ParseErrorKind, Parser};
pub use token::{Span, Token};
