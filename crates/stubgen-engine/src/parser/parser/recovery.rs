//! Error recovery strategies for the parser.
//!
//! When the parser encounters an error, it uses these strategies to
//! resynchronize and continue parsing to find more errors.

use super::Parser;
use crate::parser::token::Token;

/// Skip to the next `class` keyword.
pub fn sync_to_class(parser: &mut Parser) {
    while !parser.at_eof() && !parser.check(&Token::Class) {
        parser.advance();
    }
}

/// Synchronize to the next class member.
///
/// Skips a whole member, including a braced body, but stops before the
/// brace that closes the class.
pub fn sync_to_member_boundary(parser: &mut Parser) {
    let mut depth = 0usize;
    while !parser.at_eof() {
        match parser.current() {
            Token::LeftBrace => {
                depth += 1;
                parser.advance();
            }
            Token::RightBrace => {
                if depth == 0 {
                    return;
                }
                depth -= 1;
                parser.advance();
                if depth == 0 {
                    return;
                }
            }
            Token::Semicolon => {
                parser.advance();
                if depth == 0 {
                    return;
                }
            }
            Token::Public | Token::Private | Token::Readonly | Token::Constructor
                if depth == 0 =>
            {
                return;
            }
            Token::Class if depth == 0 => return,
            _ => {
                parser.advance();
            }
        }
    }
}

/// Synchronize to the next statement inside a block.
///
/// Consumes up to and including the next `;`, stopping before a `}`.
pub fn sync_to_statement_boundary(parser: &mut Parser) {
    while !parser.at_eof() {
        match parser.current() {
            Token::Semicolon => {
                parser.advance();
                return;
            }
            Token::RightBrace | Token::Return => return,
            _ => {
                parser.advance();
            }
        }
    }
}

/// Skip tokens until we find one of the expected tokens.
pub fn skip_until(parser: &mut Parser, expected: &[Token]) {
    while !parser.at_eof() && !parser.check_any(expected) {
        parser.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_to_member_skips_body() {
        let mut parser = Parser::new("broken() { a; { b; } } next: int;").unwrap();
        sync_to_member_boundary(&mut parser);
        assert!(matches!(parser.current(), Token::Identifier(name) if name == "next"));
    }

    #[test]
    fn test_sync_to_member_stops_at_class_end() {
        let mut parser = Parser::new("x y } class").unwrap();
        sync_to_member_boundary(&mut parser);
        assert!(parser.check(&Token::RightBrace));
    }

    #[test]
    fn test_sync_to_statement_boundary() {
        let mut parser = Parser::new("a b c; return x;").unwrap();
        sync_to_statement_boundary(&mut parser);
        assert!(parser.check(&Token::Return));
    }

    #[test]
    fn test_skip_until() {
        let mut parser = Parser::new("a b ) c").unwrap();
        skip_until(&mut parser, &[Token::RightParen]);
        assert!(parser.check(&Token::RightParen));
    }
}
