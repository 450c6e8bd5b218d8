//! Token definitions for the stub language.

use std::fmt;

/// Reserved words of the stub language.
pub const KEYWORDS: &[&str] = &[
    "namespace",
    "class",
    "public",
    "private",
    "readonly",
    "constructor",
    "get",
    "set",
    "return",
    "this",
    "null",
    "true",
    "false",
    "new",
    "out",
];

/// Check if `word` is a reserved word.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// A token in the stub language.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Declarations
    Namespace,
    Class,
    Constructor,

    // Modifiers
    Public,
    Private,
    Readonly,
    Out,

    // Accessors
    Get,
    Set,

    // Statements and expressions
    Return,
    This,
    New,

    // Literals
    IntLiteral(i64),
    FloatLiteral(f64),
    StringLiteral(String),
    True,
    False,
    Null,

    // Identifiers
    Identifier(String),

    // Punctuation
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    Less,
    Greater,
    Comma,
    Semicolon,
    Colon,
    Dot,
    Equal,
    Arrow,

    // Special
    Eof,
}

impl Token {
    /// Create an identifier token (used in `expected` lists).
    pub fn ident() -> Self {
        Token::Identifier(String::new())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::Namespace => "'namespace'",
            Token::Class => "'class'",
            Token::Constructor => "'constructor'",
            Token::Public => "'public'",
            Token::Private => "'private'",
            Token::Readonly => "'readonly'",
            Token::Out => "'out'",
            Token::Get => "'get'",
            Token::Set => "'set'",
            Token::Return => "'return'",
            Token::This => "'this'",
            Token::New => "'new'",
            Token::True => "'true'",
            Token::False => "'false'",
            Token::Null => "'null'",
            Token::IntLiteral(n) => return write!(f, "integer '{}'", n),
            Token::FloatLiteral(n) => return write!(f, "number '{}'", n),
            Token::StringLiteral(s) => return write!(f, "string \"{}\"", s),
            Token::Identifier(name) if name.is_empty() => "identifier",
            Token::Identifier(name) => return write!(f, "identifier '{}'", name),
            Token::LeftBrace => "'{'",
            Token::RightBrace => "'}'",
            Token::LeftParen => "'('",
            Token::RightParen => "')'",
            Token::Less => "'<'",
            Token::Greater => "'>'",
            Token::Comma => "','",
            Token::Semicolon => "';'",
            Token::Colon => "':'",
            Token::Dot => "'.'",
            Token::Equal => "'='",
            Token::Arrow => "'=>'",
            Token::Eof => "end of file",
        };
        f.write_str(text)
    }
}

/// Source location of a token or node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    /// 1-based line of `start`
    pub line: u32,
    /// 1-based column of `start`
    pub column: u32,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The text covered by this span.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// Span from the start of `self` to the end of `other`.
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start,
            end: other.end.max(self.end),
            line: self.line,
            column: self.column,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
