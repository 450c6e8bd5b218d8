//! Diagnostic infrastructure for error reporting
//!
//! Every failure of the compilation pipeline (lexing, parsing, checking) is
//! turned into a [`Diagnostic`]: a message, a stable code, a primary location
//! and optional notes. Diagnostics render either as one plain line
//! (`line:column: error[CODE]: message`) or, through codespan-reporting, as a
//! full annotated snippet of the source.

use std::fmt;

use codespan_reporting::diagnostic::{Diagnostic as CsDiagnostic, Label, Severity};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::WriteColor;

use crate::parser::{LexError, ParseError, Span};

/// Error code for a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(pub &'static str);

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A diagnostic message with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    span: Span,
    label: Option<String>,
    notes: Vec<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            code: None,
            message: message.into(),
            span: Span::default(),
            label: None,
            notes: Vec::new(),
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Set the error code
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the primary location and its label
    pub fn with_primary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.span = span;
        self.label = Some(message.into());
        self
    }

    /// Set the primary location without a label
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Add a note (additional context)
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Add a help suggestion
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.notes.push(format!("help: {}", help.into()));
        self
    }

    /// Create a diagnostic from a lexer error
    pub fn from_lex_error(error: &LexError) -> Self {
        let code = match error {
            LexError::UnexpectedCharacter { .. } => ErrorCode("L0001"),
            LexError::InvalidNumber { .. } => ErrorCode("L0002"),
        };
        Diagnostic::error(error.to_string())
            .with_code(code)
            .with_primary_label(error.span(), "not valid here")
    }

    /// Create a diagnostic from a parse error
    pub fn from_parse_error(error: &ParseError) -> Self {
        let mut diag = Diagnostic::error(error.message.clone())
            .with_code(ErrorCode(error.kind.code()))
            .at(error.span);
        if let Some(suggestion) = &error.suggestion {
            diag = diag.with_help(suggestion.clone());
        }
        diag
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Check if this diagnostic is an error
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error | Severity::Bug)
    }

    /// Convert to a codespan diagnostic for rendering
    pub fn to_codespan(&self, file_id: usize) -> CsDiagnostic<usize> {
        let mut inner = CsDiagnostic::new(self.severity).with_message(&self.message);
        if let Some(code) = self.code {
            inner = inner.with_code(code.0);
        }
        let label = Label::primary(file_id, self.span.start..self.span.end);
        let label = match &self.label {
            Some(text) => label.with_message(text),
            None => label,
        };
        inner.with_labels(vec![label]).with_notes(self.notes.clone())
    }
}

fn severity_name(severity: Severity) -> &'static str {
    match severity {
        Severity::Bug => "bug",
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Note => "note",
        Severity::Help => "help",
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.span, severity_name(self.severity))?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Render diagnostics against `source` with codespan-reporting.
pub fn emit(
    writer: &mut dyn WriteColor,
    file_name: &str,
    source: &str,
    diagnostics: &[Diagnostic],
) -> Result<(), codespan_reporting::files::Error> {
    let mut files = SimpleFiles::new();
    let file_id = files.add(file_name.to_string(), source.to_string());
    let config = term::Config::default();
    for diag in diagnostics {
        term::emit(writer, &config, &files, &diag.to_codespan(file_id))?;
    }
    Ok(())
}
