//! Lexer for the stub language.
//!
//! Built on logos. Tokens carry byte spans plus 1-based line/column so that
//! diagnostics can point into the generated source.

use crate::parser::token::{Span, Token};
use logos::Logos;

/// Logos-based token enum, converted to [`Token`] after lexing.
#[derive(Logos, Debug, Clone, PartialEq)]
enum LogosToken {
    // Whitespace (skip)
    #[regex(r"[ \t\r\n]+", logos::skip)]
    Whitespace,

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[regex(r"/\*", lex_block_comment)]
    BlockComment,

    // Keywords (must come before identifiers)
    #[token("namespace")]
    Namespace,

    #[token("class")]
    Class,

    #[token("constructor")]
    Constructor,

    #[token("public")]
    Public,

    #[token("private")]
    Private,

    #[token("readonly")]
    Readonly,

    #[token("out")]
    Out,

    #[token("get")]
    Get,

    #[token("set")]
    Set,

    #[token("return")]
    Return,

    #[token("this")]
    This,

    #[token("new")]
    New,

    #[token("true")]
    True,

    #[token("false")]
    False,

    #[token("null")]
    Null,

    // Identifiers
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Numbers
    #[regex(r"[0-9]+", parse_int)]
    IntLiteral(i64),

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    FloatLiteral(f64),

    // Strings
    #[regex(r#""([^"\\]|\\.)*""#, parse_string)]
    StringLiteral(String),

    // Punctuation (2-char before 1-char)
    #[token("=>")]
    Arrow,

    #[token("=")]
    Equal,

    #[token("{")]
    LeftBrace,

    #[token("}")]
    RightBrace,

    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    #[token("<")]
    Less,

    #[token(">")]
    Greater,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token(".")]
    Dot,
}

fn lex_block_comment(lex: &mut logos::Lexer<'_, LogosToken>) -> logos::Skip {
    // "/*" is consumed, find "*/"
    let remainder = lex.remainder();

    if let Some(end) = remainder.find("*/") {
        lex.bump(end + 2);
    } else {
        // Unterminated comment - consume to end
        lex.bump(remainder.len());
    }

    logos::Skip
}

fn parse_int(lex: &mut logos::Lexer<'_, LogosToken>) -> Option<i64> {
    lex.slice().parse().ok()
}

fn parse_float(lex: &mut logos::Lexer<'_, LogosToken>) -> Option<f64> {
    lex.slice().parse().ok()
}

fn parse_string(lex: &mut logos::Lexer<'_, LogosToken>) -> Option<String> {
    let s = lex.slice();
    let inner = &s[1..s.len() - 1];
    Some(unescape_string(inner))
}

fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some('0') => result.push('\0'),
                Some(c) => result.push(c),
                None => break,
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Main lexer structure.
pub struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<(Token, Span)>,
    errors: Vec<LexError>,
}

/// Lexer error types.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// Character that starts no token
    UnexpectedCharacter {
        /// The character
        char: char,
        /// Where it was found
        span: Span,
    },
    /// Numeric literal out of range
    InvalidNumber {
        /// Literal text
        text: String,
        /// Where it was found
        span: Span,
    },
}

impl LexError {
    /// Location of the error.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedCharacter { span, .. } | LexError::InvalidNumber { span, .. } => {
                *span
            }
        }
    }
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the whole input, appending an `Eof` token.
    ///
    /// Lexing continues after errors so that every bad character is reported.
    pub fn tokenize(mut self) -> Result<Vec<(Token, Span)>, Vec<LexError>> {
        let mut logos_lexer = LogosToken::lexer(self.source);
        let mut line = 1u32;
        let mut column = 1u32;
        let mut last_end = 0;

        while let Some(token_result) = logos_lexer.next() {
            let range = logos_lexer.span();

            // Advance line/column over skipped text
            for c in self.source[last_end..range.start].chars() {
                if c == '\n' {
                    line += 1;
                    column = 1;
                } else {
                    column += 1;
                }
            }

            let span = Span::new(range.start, range.end, line, column);
            let text = &self.source[range.clone()];

            match token_result {
                Ok(logos_token) => {
                    let token = convert_token(logos_token);
                    self.tokens.push((token, span));
                }
                Err(_) if text.starts_with(|c: char| c.is_ascii_digit()) => {
                    self.errors.push(LexError::InvalidNumber {
                        text: text.to_string(),
                        span,
                    });
                }
                Err(_) => {
                    let char = text.chars().next().unwrap_or('\0');
                    self.errors.push(LexError::UnexpectedCharacter { char, span });
                }
            }

            for c in text.chars() {
                if c == '\n' {
                    line += 1;
                    column = 1;
                } else {
                    column += 1;
                }
            }

            last_end = range.end;
        }

        for c in self.source[last_end..].chars() {
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        let eof_span = Span::new(self.source.len(), self.source.len(), line, column);
        self.tokens.push((Token::Eof, eof_span));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }
}

fn convert_token(token: LogosToken) -> Token {
    match token {
        LogosToken::Namespace => Token::Namespace,
        LogosToken::Class => Token::Class,
        LogosToken::Constructor => Token::Constructor,
        LogosToken::Public => Token::Public,
        LogosToken::Private => Token::Private,
        LogosToken::Readonly => Token::Readonly,
        LogosToken::Out => Token::Out,
        LogosToken::Get => Token::Get,
        LogosToken::Set => Token::Set,
        LogosToken::Return => Token::Return,
        LogosToken::This => Token::This,
        LogosToken::New => Token::New,
        LogosToken::True => Token::True,
        LogosToken::False => Token::False,
        LogosToken::Null => Token::Null,
        LogosToken::Identifier(name) => Token::Identifier(name),
        LogosToken::IntLiteral(n) => Token::IntLiteral(n),
        LogosToken::FloatLiteral(n) => Token::FloatLiteral(n),
        LogosToken::StringLiteral(s) => Token::StringLiteral(s),
        LogosToken::Arrow => Token::Arrow,
        LogosToken::Equal => Token::Equal,
        LogosToken::LeftBrace => Token::LeftBrace,
        LogosToken::RightBrace => Token::RightBrace,
        LogosToken::LeftParen => Token::LeftParen,
        LogosToken::RightParen => Token::RightParen,
        LogosToken::Less => Token::Less,
        LogosToken::Greater => Token::Greater,
        LogosToken::Comma => Token::Comma,
        LogosToken::Semicolon => Token::Semicolon,
        LogosToken::Colon => Token::Colon,
        LogosToken::Dot => Token::Dot,
        // Skipped by logos callbacks
        LogosToken::Whitespace | LogosToken::LineComment | LogosToken::BlockComment => {
            unreachable!("trivia tokens are skipped")
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexError::UnexpectedCharacter { char, .. } => {
                write!(f, "Unexpected character '{}'", char)
            }
            LexError::InvalidNumber { text, .. } => write!(f, "Invalid number '{}'", text),
        }
    }
}

impl std::error::Error for LexError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|(tok, _)| tok)
            .collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            tokens("class getter get"),
            vec![
                Token::Class,
                Token::Identifier("getter".to_string()),
                Token::Get,
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_arrow_and_equal() {
        assert_eq!(
            tokens("(i) => x = y"),
            vec![
                Token::LeftParen,
                Token::Identifier("i".to_string()),
                Token::RightParen,
                Token::Arrow,
                Token::Identifier("x".to_string()),
                Token::Equal,
                Token::Identifier("y".to_string()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            tokens(r#"42 2.5 "a\"b""#),
            vec![
                Token::IntLiteral(42),
                Token::FloatLiteral(2.5),
                Token::StringLiteral("a\"b".to_string()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            tokens("a // line\n /* block */ b"),
            vec![
                Token::Identifier("a".to_string()),
                Token::Identifier("b".to_string()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_line_and_column() {
        let toks = Lexer::new("class\n  Foo").tokenize().unwrap();
        assert_eq!((toks[0].1.line, toks[0].1.column), (1, 1));
        assert_eq!((toks[1].1.line, toks[1].1.column), (2, 3));
    }

    #[test]
    fn test_collects_all_errors() {
        let errors = Lexer::new("a # b @ c").tokenize().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], LexError::UnexpectedCharacter { char: '#', .. }));
        assert_eq!(errors[1].span().column, 7);
    }
}
