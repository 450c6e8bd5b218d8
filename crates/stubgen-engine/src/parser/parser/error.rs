//! Parse error types

use crate::parser::token::{Span, Token};
use std::fmt;

/// A parse error with location and contextual information.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// The kind of error that occurred
    pub kind: ParseErrorKind,

    /// Source location of the error
    pub span: Span,

    /// Human-readable error message
    pub message: String,

    /// Optional suggestion for fixing the error
    pub suggestion: Option<String>,
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// Unexpected token found
    UnexpectedToken { expected: Vec<Token>, found: Token },

    /// Unexpected end of file
    UnexpectedEof { expected: Vec<Token> },

    /// Syntactically valid tokens in an invalid position
    InvalidSyntax { reason: String },

    /// `out` used on something that is not a local name
    InvalidOutArgument,

    /// Assignment to something that is not a name or member
    InvalidAssignmentTarget,
}

impl ParseErrorKind {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorKind::UnexpectedToken { .. } => "P0001",
            ParseErrorKind::UnexpectedEof { .. } => "P0002",
            ParseErrorKind::InvalidSyntax { .. } => "P0003",
            ParseErrorKind::InvalidOutArgument => "P0004",
            ParseErrorKind::InvalidAssignmentTarget => "P0005",
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.span, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (help: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

fn expected_list(expected: &[Token]) -> String {
    match expected {
        [single] => single.to_string(),
        _ => {
            let names: Vec<String> = expected.iter().map(|t| t.to_string()).collect();
            format!("one of {}", names.join(", "))
        }
    }
}

impl ParseError {
    /// Create an "unexpected token" error.
    pub fn unexpected_token(expected: Vec<Token>, found: Token, span: Span) -> Self {
        let message = format!("expected {}, found {}", expected_list(&expected), found);
        Self {
            kind: ParseErrorKind::UnexpectedToken { expected, found },
            span,
            message,
            suggestion: None,
        }
    }

    /// Create an "unexpected EOF" error.
    pub fn unexpected_eof(expected: Vec<Token>, span: Span) -> Self {
        let message = format!("unexpected end of file, expected {}", expected_list(&expected));
        Self {
            kind: ParseErrorKind::UnexpectedEof { expected },
            span,
            message,
            suggestion: None,
        }
    }

    /// Create an "invalid syntax" error.
    pub fn invalid_syntax(reason: impl Into<String>, span: Span) -> Self {
        let reason = reason.into();
        Self {
            message: reason.clone(),
            kind: ParseErrorKind::InvalidSyntax { reason },
            span,
            suggestion: None,
        }
    }

    /// Create an error for `out` applied to a non-name expression.
    pub fn invalid_out_argument(span: Span) -> Self {
        Self {
            kind: ParseErrorKind::InvalidOutArgument,
            span,
            message: "'out' arguments must be local names".to_string(),
            suggestion: None,
        }
    }

    /// Create an error for an invalid assignment target.
    pub fn invalid_assignment_target(span: Span) -> Self {
        Self {
            kind: ParseErrorKind::InvalidAssignmentTarget,
            span,
            message: "invalid assignment target".to_string(),
            suggestion: Some("assign to a name or a member such as 'this.field'".to_string()),
        }
    }

    /// Attach a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}
