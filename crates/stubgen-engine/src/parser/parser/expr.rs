//! Expression parsing.

use super::{decl, ParseError, Parser};
use crate::parser::ast::*;
use crate::parser::token::Token;

/// Parse an expression (lambda or postfix chain).
pub fn parse_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    // The only parenthesized form is a lambda parameter list.
    if parser.check(&Token::LeftParen) {
        return parse_lambda(parser).map(Expression::Lambda);
    }
    parse_postfix(parser)
}

fn parse_lambda(parser: &mut Parser) -> Result<LambdaExpr, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::LeftParen)?;

    let mut params = Vec::new();
    if !parser.check(&Token::RightParen) {
        loop {
            params.push(parser.expect_identifier()?);
            if parser.check(&Token::Comma) {
                parser.advance();
            } else {
                break;
            }
        }
    }
    parser.expect(Token::RightParen)?;
    parser
        .expect(Token::Arrow)
        .map_err(|err| err.with_suggestion("parenthesized expressions are not supported"))?;

    let body = if parser.check(&Token::LeftBrace) {
        LambdaBody::Block(decl::parse_block(parser)?)
    } else {
        LambdaBody::Expression(Box::new(parse_expression(parser)?))
    };

    Ok(LambdaExpr {
        params,
        body,
        span: parser.span_from(&start_span),
    })
}

fn parse_postfix(parser: &mut Parser) -> Result<Expression, ParseError> {
    let start_span = parser.current_span();
    let mut expr = parse_primary(parser)?;

    while parser.check(&Token::Dot) {
        parser.advance();
        let member = parser.expect_identifier()?;
        if parser.check(&Token::LeftParen) {
            let args = parse_arguments(parser)?;
            expr = Expression::Call {
                object: Box::new(expr),
                method: member,
                args,
                span: parser.span_from(&start_span),
            };
        } else {
            expr = Expression::Member {
                object: Box::new(expr),
                property: member,
                span: parser.span_from(&start_span),
            };
        }
    }

    Ok(expr)
}

fn parse_primary(parser: &mut Parser) -> Result<Expression, ParseError> {
    let span = parser.current_span();
    let expr = match parser.current() {
        Token::This => Expression::This(span),
        Token::Null => Expression::Null(span),
        Token::True => Expression::Literal(Literal::Bool(true), span),
        Token::False => Expression::Literal(Literal::Bool(false), span),
        Token::IntLiteral(n) => Expression::Literal(Literal::Int(*n), span),
        Token::FloatLiteral(n) => Expression::Literal(Literal::Double(*n), span),
        Token::StringLiteral(s) => Expression::Literal(Literal::String(s.clone()), span),
        Token::Identifier(_) => return parser.expect_identifier().map(Expression::Identifier),
        Token::New => {
            parser.advance();
            let ty = decl::parse_type(parser)?;
            let args = parse_arguments(parser)?;
            return Ok(Expression::New {
                ty,
                args,
                span: parser.span_from(&span),
            });
        }
        _ => {
            return Err(parser.unexpected_token(&[
                Token::This,
                Token::New,
                Token::Null,
                Token::ident(),
                Token::LeftParen,
            ]))
        }
    };
    parser.advance();
    Ok(expr)
}

/// Parse a parenthesized argument list.
pub fn parse_arguments(parser: &mut Parser) -> Result<Vec<Argument>, ParseError> {
    parser.expect(Token::LeftParen)?;
    let mut args = Vec::new();

    if !parser.check(&Token::RightParen) {
        loop {
            let start_span = parser.current_span();
            let out = parser.check(&Token::Out);
            if out {
                parser.advance();
            }
            let value = parse_expression(parser)?;
            if out && !matches!(value, Expression::Identifier(_)) {
                return Err(ParseError::invalid_out_argument(value.span()));
            }
            args.push(Argument {
                out,
                value,
                span: parser.span_from(&start_span),
            });

            if parser.check(&Token::Comma) {
                parser.advance();
            } else {
                break;
            }
        }
    }

    parser.expect(Token::RightParen)?;
    Ok(args)
}
