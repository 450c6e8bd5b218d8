//! Parser for the stub language
//!
//! A recursive descent parser that turns the token stream produced by the
//! lexer into a [`CompilationUnit`]. Errors are accumulated: after a failure
//! the parser resynchronizes at the next member or statement boundary and
//! keeps going, so one run reports every syntax error in the file.

pub mod decl;
pub mod error;
pub mod expr;
pub mod recovery;

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer};
use crate::parser::token::{Span, Token};

pub use error::{ParseError, ParseErrorKind};

/// Parser state.
pub struct Parser {
    /// Pre-tokenized input, always terminated by `Eof`
    tokens: Vec<(Token, Span)>,

    /// Current position in token stream
    pos: usize,

    /// Accumulated parse errors
    errors: Vec<ParseError>,
}

impl Parser {
    /// Create a new parser from source code.
    pub fn new(source: &str) -> Result<Self, Vec<LexError>> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self::from_tokens(tokens))
    }

    fn from_tokens(mut tokens: Vec<(Token, Span)>) -> Self {
        if !matches!(tokens.last(), Some((Token::Eof, _))) {
            let eof_span = tokens
                .last()
                .map(|(_, last)| Span::new(last.end, last.end, last.line, last.column))
                .unwrap_or_else(|| Span::new(0, 0, 1, 1));
            tokens.push((Token::Eof, eof_span));
        }
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the entire source into a compilation unit.
    ///
    /// Returns all accumulated errors on failure.
    pub fn parse(mut self) -> Result<CompilationUnit, Vec<ParseError>> {
        let start_span = self.current_span();
        let mut namespace = None;
        let mut classes = Vec::new();

        if self.check(&Token::Namespace) {
            self.advance();
            match self.expect_identifier() {
                Ok(name) => namespace = Some(name),
                Err(err) => self.errors.push(err),
            }
            match self.expect(Token::LeftBrace) {
                Ok(_) => {
                    self.parse_classes(&mut classes);
                    if let Err(err) = self.expect(Token::RightBrace) {
                        self.errors.push(err);
                    }
                }
                Err(err) => self.errors.push(err),
            }
        } else {
            self.parse_classes(&mut classes);
        }

        while !self.at_eof() {
            let err = self.unexpected_token(&[Token::Eof]);
            self.errors.push(err);
            recovery::sync_to_class(&mut self);
            if self.check(&Token::Class) {
                self.parse_classes(&mut classes);
            }
        }

        let span = self.combine_spans(&start_span, &self.current_span());

        if !self.errors.is_empty() {
            return Err(self.errors);
        }

        Ok(CompilationUnit {
            namespace,
            classes,
            span,
        })
    }

    fn parse_classes(&mut self, classes: &mut Vec<ClassDecl>) {
        while !self.at_eof() && !self.check(&Token::RightBrace) {
            let before = self.pos;
            match decl::parse_class(self) {
                Ok(class) => classes.push(class),
                Err(err) => {
                    self.errors.push(err);
                    recovery::sync_to_class(self);
                    self.ensure_progress(before);
                }
            }
        }
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Get the current token.
    #[inline]
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos].0
    }

    /// Get the current token's span.
    #[inline]
    pub fn current_span(&self) -> Span {
        self.tokens[self.pos].1
    }

    /// Span of the most recently consumed token.
    #[inline]
    pub fn previous_span(&self) -> Span {
        self.tokens[self.pos.saturating_sub(1)].1
    }

    /// Peek at the next token (lookahead).
    #[inline]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1).map(|(tok, _)| tok)
    }

    /// Advance to the next token, returning the previous current token.
    pub fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].0.clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    /// Check if the current token matches the given kind.
    #[inline]
    pub fn check(&self, expected: &Token) -> bool {
        std::mem::discriminant(self.current()) == std::mem::discriminant(expected)
    }

    /// Check if the current token matches any of the given kinds.
    pub fn check_any(&self, expected: &[Token]) -> bool {
        expected.iter().any(|tok| self.check(tok))
    }

    /// Check if we've reached EOF.
    #[inline]
    pub fn at_eof(&self) -> bool {
        matches!(self.current(), Token::Eof)
    }

    /// Consume the current token if it matches the expected kind.
    pub fn expect(&mut self, expected: Token) -> Result<Token, ParseError> {
        if self.check(&expected) {
            Ok(self.advance())
        } else {
            Err(self.unexpected_token(&[expected]))
        }
    }

    /// Consume an identifier.
    pub fn expect_identifier(&mut self) -> Result<Identifier, ParseError> {
        match self.current() {
            Token::Identifier(name) => {
                let ident = Identifier {
                    name: name.clone(),
                    span: self.current_span(),
                };
                self.advance();
                Ok(ident)
            }
            _ => Err(self.unexpected_token(&[Token::ident()])),
        }
    }

    // ========================================================================
    // Error Handling
    // ========================================================================

    /// Record a parse error and keep going.
    pub fn record(&mut self, err: ParseError) {
        self.errors.push(err);
    }

    /// Create an "unexpected token" error at the current position.
    pub fn unexpected_token(&self, expected: &[Token]) -> ParseError {
        let span = self.current_span();
        if self.at_eof() {
            ParseError::unexpected_eof(expected.to_vec(), span)
        } else {
            ParseError::unexpected_token(expected.to_vec(), self.current().clone(), span)
        }
    }

    /// Skip one token if recovery did not move past `before`.
    pub(crate) fn ensure_progress(&mut self, before: usize) {
        if self.pos == before && !self.at_eof() {
            self.advance();
        }
    }

    /// Current position in the token stream.
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    // ========================================================================
    // Utilities
    // ========================================================================

    /// Combine two spans into a single span.
    pub fn combine_spans(&self, start: &Span, end: &Span) -> Span {
        start.merge(end)
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: &Span) -> Span {
        self.combine_spans(start, &self.previous_span())
    }
}
