//! Declaration parsing: classes, members, parameters, types and blocks.

use super::{expr, recovery, ParseError, Parser};
use crate::parser::ast::*;
use crate::parser::token::Token;

/// Parse `class Name { member* }`.
pub fn parse_class(parser: &mut Parser) -> Result<ClassDecl, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::Class)?;
    let name = parser.expect_identifier()?;
    parser.expect(Token::LeftBrace)?;

    let mut members = Vec::new();
    while !parser.at_eof() && !parser.check(&Token::RightBrace) && !parser.check(&Token::Class) {
        let before = parser.position();
        match parse_member(parser) {
            Ok(member) => members.push(member),
            Err(err) => {
                parser.record(err);
                recovery::sync_to_member_boundary(parser);
                parser.ensure_progress(before);
            }
        }
    }
    parser.expect(Token::RightBrace)?;

    Ok(ClassDecl {
        name,
        members,
        span: parser.span_from(&start_span),
    })
}

/// Parse one member with its modifiers.
pub fn parse_member(parser: &mut Parser) -> Result<Member, ParseError> {
    let start_span = parser.current_span();
    let mut visibility = None;
    let mut readonly = false;

    loop {
        match parser.current() {
            Token::Public | Token::Private => {
                let vis = if parser.check(&Token::Public) {
                    Visibility::Public
                } else {
                    Visibility::Private
                };
                if visibility.is_some() {
                    return Err(ParseError::invalid_syntax(
                        "duplicate visibility modifier",
                        parser.current_span(),
                    ));
                }
                visibility = Some(vis);
                parser.advance();
            }
            Token::Readonly => {
                readonly = true;
                parser.advance();
            }
            _ => break,
        }
    }

    if parser.check(&Token::Constructor) {
        if readonly {
            return Err(ParseError::invalid_syntax(
                "'readonly' is only allowed on fields",
                start_span,
            ));
        }
        parser.advance();
        let params = parse_params(parser)?;
        let body = parse_block(parser)?;
        return Ok(Member::Constructor(ConstructorDecl {
            params,
            body,
            span: parser.span_from(&start_span),
        }));
    }

    let visibility = visibility.unwrap_or_default();
    let name = match parser.current() {
        Token::Identifier(_) => parser.expect_identifier()?,
        _ => return Err(parser.unexpected_token(&[Token::ident(), Token::Constructor])),
    };

    if parser.check(&Token::LeftParen) {
        if readonly {
            return Err(ParseError::invalid_syntax(
                "'readonly' is only allowed on fields",
                start_span,
            ));
        }
        let params = parse_params(parser)?;
        parser.expect(Token::Colon)?;
        let return_type = parse_type(parser)?;
        let body = parse_block(parser)?;
        return Ok(Member::Method(MethodDecl {
            visibility,
            name,
            params,
            return_type,
            body,
            span: parser.span_from(&start_span),
        }));
    }

    parser.expect(Token::Colon)?;
    let ty = parse_type(parser)?;

    match parser.current() {
        Token::Semicolon => {
            parser.advance();
            Ok(Member::Field(FieldDecl {
                visibility,
                readonly,
                name,
                ty,
                span: parser.span_from(&start_span),
            }))
        }
        Token::LeftBrace if !readonly => {
            let accessors = parse_accessors(parser)?;
            Ok(Member::Property(PropertyDecl {
                visibility,
                name,
                ty,
                accessors,
                span: parser.span_from(&start_span),
            }))
        }
        Token::LeftBrace => Err(ParseError::invalid_syntax(
            "'readonly' is only allowed on fields",
            start_span,
        )
        .with_suggestion("declare the property without setter instead")),
        _ => Err(parser.unexpected_token(&[Token::Semicolon, Token::LeftBrace])),
    }
}

fn parse_accessors(parser: &mut Parser) -> Result<Vec<AccessorDecl>, ParseError> {
    parser.expect(Token::LeftBrace)?;
    let mut accessors = Vec::new();

    while !parser.at_eof() && !parser.check(&Token::RightBrace) {
        let before = parser.position();
        match parse_accessor(parser) {
            Ok(accessor) => accessors.push(accessor),
            Err(err) => {
                parser.record(err);
                recovery::skip_until(parser, &[Token::Get, Token::Set, Token::RightBrace]);
                parser.ensure_progress(before);
            }
        }
    }
    parser.expect(Token::RightBrace)?;

    Ok(accessors)
}

fn parse_accessor(parser: &mut Parser) -> Result<AccessorDecl, ParseError> {
    let start_span = parser.current_span();
    let visibility = match parser.current() {
        Token::Public => {
            parser.advance();
            Some(Visibility::Public)
        }
        Token::Private => {
            parser.advance();
            Some(Visibility::Private)
        }
        _ => None,
    };

    let kind = match parser.current() {
        Token::Get => AccessorKind::Get,
        Token::Set => AccessorKind::Set,
        _ => return Err(parser.unexpected_token(&[Token::Get, Token::Set])),
    };
    parser.advance();

    let body = match parser.current() {
        Token::Semicolon => {
            parser.advance();
            None
        }
        Token::LeftBrace => Some(parse_block(parser)?),
        _ => return Err(parser.unexpected_token(&[Token::Semicolon, Token::LeftBrace])),
    };

    Ok(AccessorDecl {
        visibility,
        kind,
        body,
        span: parser.span_from(&start_span),
    })
}

/// Parse a parenthesized parameter list.
pub fn parse_params(parser: &mut Parser) -> Result<Vec<Param>, ParseError> {
    parser.expect(Token::LeftParen)?;
    let mut params = Vec::new();

    if !parser.check(&Token::RightParen) {
        loop {
            let start_span = parser.current_span();
            let out = if parser.check(&Token::Out) {
                parser.advance();
                true
            } else {
                false
            };
            let name = match parser.current() {
                Token::Identifier(_) => parser.expect_identifier()?,
                _ if out => return Err(parser.unexpected_token(&[Token::ident()])),
                _ => return Err(parser.unexpected_token(&[Token::Out, Token::ident()])),
            };
            parser.expect(Token::Colon)?;
            let ty = parse_type(parser)?;
            params.push(Param {
                out,
                name,
                ty,
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
    Ok(params)
}

/// Parse a type reference: `Name` or `Name<T, ...>`.
pub fn parse_type(parser: &mut Parser) -> Result<TypeExpr, ParseError> {
    let start_span = parser.current_span();
    let name = parser.expect_identifier()?;
    let mut args = Vec::new();

    if parser.check(&Token::Less) {
        parser.advance();
        loop {
            args.push(parse_type(parser)?);
            if parser.check(&Token::Comma) {
                parser.advance();
            } else {
                break;
            }
        }
        parser.expect(Token::Greater)?;
    }

    Ok(TypeExpr {
        name,
        args,
        span: parser.span_from(&start_span),
    })
}

/// Parse `{ statement* }`.
pub fn parse_block(parser: &mut Parser) -> Result<Block, ParseError> {
    let start_span = parser.current_span();
    parser.expect(Token::LeftBrace)?;
    let mut statements = Vec::new();

    while !parser.at_eof() && !parser.check(&Token::RightBrace) {
        let before = parser.position();
        match parse_statement(parser) {
            Ok(stmt) => statements.push(stmt),
            Err(err) => {
                parser.record(err);
                recovery::sync_to_statement_boundary(parser);
                parser.ensure_progress(before);
            }
        }
    }
    parser.expect(Token::RightBrace)?;

    Ok(Block {
        statements,
        span: parser.span_from(&start_span),
    })
}

/// Parse a single statement.
pub fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let start_span = parser.current_span();

    if parser.check(&Token::Return) {
        parser.advance();
        let value = if parser.check(&Token::Semicolon) {
            None
        } else {
            Some(expr::parse_expression(parser)?)
        };
        parser.expect(Token::Semicolon)?;
        return Ok(Statement::Return {
            value,
            span: parser.span_from(&start_span),
        });
    }

    let expression = expr::parse_expression(parser)?;

    if parser.check(&Token::Equal) {
        if !matches!(
            expression,
            Expression::Identifier(_) | Expression::Member { .. }
        ) {
            return Err(ParseError::invalid_assignment_target(expression.span()));
        }
        parser.advance();
        let value = expr::parse_expression(parser)?;
        parser.expect(Token::Semicolon)?;
        return Ok(Statement::Assign {
            target: expression,
            value,
            span: parser.span_from(&start_span),
        });
    }

    parser.expect(Token::Semicolon)?;
    Ok(Statement::Expression {
        expression,
        span: parser.span_from(&start_span),
    })
}
