//! PyLite statement parser: turns the indentation-tracked line stream
//! from [`crate::pylite_lexer`] into the shared `Module` AST.

use crate::ast::{AssignTarget, Expr, Module, Stmt};
use crate::bracket::find_matching;
use crate::error::{Error, Result};
use crate::expr_parser::parse_expr;
use crate::pylite_lexer::{lex_lines, PyLiteLine};
use crate::token::{Punct, Token, TokenKind};

fn is_name(token: &Token, text: &str) -> bool {
    matches!(&token.kind, TokenKind::Name(n) if n == text)
}

fn is_colon(token: &Token) -> bool {
    matches!(token.kind, TokenKind::Punct(Punct::Colon))
}

/// Strips a trailing `:` from a compound-statement header's tokens and
/// parses everything after the leading keyword as its test expression.
fn parse_header_test(tokens: &[Token]) -> Result<Expr> {
    let last = tokens
        .last()
        .ok_or_else(|| Error::syntax("empty statement header"))?;
    if !is_colon(last) {
        return Err(Error::syntax("expected ':' at the end of this header"));
    }
    parse_expr(&tokens[1..tokens.len() - 1])
}

fn parse_block(lines: &[PyLiteLine], pos: &mut usize, depth: usize) -> Result<Vec<Stmt>> {
    let mut body = Vec::new();
    while *pos < lines.len() && lines[*pos].depth == depth {
        body.push(parse_line_stmt(lines, pos, depth)?);
    }
    if body.is_empty() {
        return Err(Error::syntax("expected an indented block"));
    }
    Ok(body)
}

/// Parses `elif`/`else` continuations at the same depth as the
/// original `if`, returning `None` when there is no continuation.
fn parse_if_tail(lines: &[PyLiteLine], pos: &mut usize, depth: usize) -> Result<Option<Vec<Stmt>>> {
    if *pos >= lines.len() || lines[*pos].depth != depth {
        return Ok(None);
    }
    let tokens = &lines[*pos].tokens;
    let Some(first) = tokens.first() else {
        return Ok(None);
    };

    if is_name(first, "elif") {
        let test = parse_header_test(tokens)?;
        *pos += 1;
        let body = parse_block(lines, pos, depth + 1)?;
        let orelse = parse_if_tail(lines, pos, depth)?;
        Ok(Some(vec![Stmt::if_stmt(test, body, orelse)?]))
    } else if is_name(first, "else") {
        *pos += 1;
        Ok(Some(parse_block(lines, pos, depth + 1)?))
    } else {
        Ok(None)
    }
}

fn parse_line_stmt(lines: &[PyLiteLine], pos: &mut usize, depth: usize) -> Result<Stmt> {
    let tokens = lines[*pos].tokens.clone();
    let first = tokens
        .first()
        .ok_or_else(|| Error::syntax("empty statement"))?;

    if is_name(first, "while") {
        let test = parse_header_test(&tokens)?;
        *pos += 1;
        let body = parse_block(lines, pos, depth + 1)?;
        return Ok(Stmt::While { test, body });
    }

    if is_name(first, "if") {
        let test = parse_header_test(&tokens)?;
        *pos += 1;
        let body = parse_block(lines, pos, depth + 1)?;
        let orelse = parse_if_tail(lines, pos, depth)?;
        return Stmt::if_stmt(test, body, orelse);
    }

    if is_name(first, "print") {
        if !matches!(tokens.get(1).map(|t| &t.kind), Some(TokenKind::Punct(Punct::LParen))) {
            return Err(Error::syntax("expected '(' after 'print'"));
        }
        let close = find_matching(
            &tokens,
            1,
            |t| matches!(t.kind, TokenKind::Punct(Punct::LParen)),
            |t| matches!(t.kind, TokenKind::Punct(Punct::RParen)),
        )?;
        if close != tokens.len() - 1 {
            return Err(Error::syntax("unexpected tokens after print(...)"));
        }
        let value = parse_expr(&tokens[2..close])?;
        *pos += 1;
        return Ok(Stmt::Print(value));
    }

    parse_assign(&tokens, pos)
}

fn parse_assign(tokens: &[Token], pos: &mut usize) -> Result<Stmt> {
    let eq_index = tokens
        .iter()
        .position(|t| matches!(t.kind, TokenKind::Punct(Punct::Equals)))
        .ok_or_else(|| Error::syntax("expected an assignment ('=')"))?;

    let target = match &tokens[0].kind {
        TokenKind::Name(name) if eq_index == 1 => AssignTarget::Name(name.clone()),
        TokenKind::Subscript { container, index } if eq_index == 1 => AssignTarget::Subscript {
            container: container.clone(),
            index: (**index).clone(),
        },
        _ => return Err(Error::syntax("expected a name or subscript before '='")),
    };
    let value = parse_expr(&tokens[eq_index + 1..])?;
    *pos += 1;
    Ok(Stmt::Assign { target, value })
}

/// Parses a complete PyLite program into the shared `Module` AST.
pub fn parse_module(lines: &[PyLiteLine]) -> Result<Module> {
    let mut pos = 0;
    let body = parse_block(lines, &mut pos, 0)?;
    if pos != lines.len() {
        return Err(Error::syntax("unexpected indentation at top level"));
    }
    Ok(Module::new(body))
}

/// Convenience wrapper: lexes and parses PyLite source text in one
/// step.
pub fn parse_source(source: &str) -> Result<Module> {
    let lines = lex_lines(source)?;
    parse_module(&lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{ArithOp, BoolOp, Number};

    #[test]
    fn parses_assignment_and_print() {
        let module = parse_source("x = 1 + 2\nprint(x)\n").unwrap();
        assert_eq!(
            module.body,
            vec![
                Stmt::Assign {
                    target: AssignTarget::Name("x".into()),
                    value: Expr::bin_op(Expr::Num(Number::Int(1)), ArithOp::Add, Expr::Num(Number::Int(2))),
                },
                Stmt::Print(Expr::Name("x".into())),
            ]
        );
    }

    #[test]
    fn parses_while_loop() {
        let module = parse_source("while x < 3:\n    print(x)\n    x = x + 1\n").unwrap();
        match &module.body[0] {
            Stmt::While { test, body } => {
                assert_eq!(
                    *test,
                    Expr::bool_op(BoolOp::Lt, Expr::Name("x".into()), Expr::Num(Number::Int(3)))
                );
                assert_eq!(body.len(), 2);
            }
            other => panic!("expected While, got {other:?}"),
        }
    }

    #[test]
    fn parses_if_elif_else_chain() {
        let module = parse_source(
            "if x == 1:\n    print(x)\nelif x == 2:\n    print(x)\nelse:\n    print(x)\n",
        )
        .unwrap();
        match &module.body[0] {
            Stmt::If { orelse, .. } => {
                let orelse = orelse.as_ref().unwrap();
                assert!(matches!(&orelse[0], Stmt::If { .. }));
            }
            other => panic!("expected If, got {other:?}"),
        }
    }

    #[test]
    fn parses_subscript_assignment() {
        let module = parse_source("xs = [1, 2, 3]\nxs[0] = 9\n").unwrap();
        assert!(matches!(
            &module.body[1],
            Stmt::Assign {
                target: AssignTarget::Subscript { .. },
                ..
            }
        ));
    }
}
