//! Expression parsing (C4): Shunting-Yard over a flat typed-token slice.
//!
//! Handles arithmetic, comparisons, `and`/`or`, parenthesized grouping,
//! and list literals (`[a, b, c]`). Subscript tokens arrive already
//! folded by the lexer and are simply lifted into `Expr::Subscript`.

use crate::ast::Expr;
use crate::bracket::find_matching;
use crate::error::{Error, Result};
use crate::token::{ArithOp, BoolOp, Keyword, Number, Punct, Token, TokenKind};

#[derive(Debug, Clone, Copy)]
enum Op {
    Arith(ArithOp),
    Bool(BoolOp),
    LParen,
}

impl Op {
    /// Precedence tiers (§4.3): `* / // %` bind tightest, then `+ -`,
    /// then comparisons, then `and`/`or` loosest. All operators are
    /// left-associative, so equal precedence pops before pushing.
    fn precedence(self) -> i32 {
        match self {
            Op::Arith(ArithOp::Mul | ArithOp::Div | ArithOp::FloorDiv | ArithOp::Mod) => 1,
            Op::Arith(ArithOp::Add | ArithOp::Sub) => 0,
            Op::Bool(BoolOp::And | BoolOp::Or) => -2,
            Op::Bool(_) => -1,
            Op::LParen => i32::MIN,
        }
    }
}

/// Parses a single expression from a token slice with no leftover
/// tokens permitted; `Error::Syntax` on anything malformed.
pub fn parse_expr(tokens: &[Token]) -> Result<Expr> {
    let mut output: Vec<Expr> = Vec::new();
    let mut ops: Vec<Op> = Vec::new();
    let mut i = 0usize;

    while i < tokens.len() {
        match &tokens[i].kind {
            TokenKind::NumLit(n) => {
                output.push(Expr::Num(*n));
                i += 1;
            }
            TokenKind::StrLit(s) => {
                output.push(Expr::Str(s.clone()));
                i += 1;
            }
            TokenKind::BoolLit(b) => {
                output.push(Expr::Bool(*b));
                i += 1;
            }
            TokenKind::Name(name) => {
                output.push(Expr::Name(name.clone()));
                i += 1;
            }
            TokenKind::Subscript { container, index } => {
                output.push(Expr::Subscript {
                    container: container.clone(),
                    index: index.clone(),
                });
                i += 1;
            }
            TokenKind::Punct(Punct::LParen) => {
                ops.push(Op::LParen);
                i += 1;
            }
            TokenKind::Punct(Punct::RParen) => {
                pop_until_lparen(&mut output, &mut ops)?;
                i += 1;
            }
            TokenKind::Punct(Punct::LBracket) => {
                let close = find_matching(
                    tokens,
                    i,
                    |t| matches!(t.kind, TokenKind::Punct(Punct::LBracket)),
                    |t| matches!(t.kind, TokenKind::Punct(Punct::RBracket)),
                )?;
                let elements = parse_comma_separated(&tokens[i + 1..close])?;
                output.push(Expr::ListLit(elements));
                i = close + 1;
            }
            TokenKind::Arith(op) => {
                push_operator(&mut output, &mut ops, Op::Arith(*op))?;
                i += 1;
            }
            TokenKind::Bool(op) => {
                push_operator(&mut output, &mut ops, Op::Bool(*op))?;
                i += 1;
            }
            TokenKind::Keyword(Keyword::And) => {
                push_operator(&mut output, &mut ops, Op::Bool(BoolOp::And))?;
                i += 1;
            }
            TokenKind::Keyword(Keyword::Or) => {
                push_operator(&mut output, &mut ops, Op::Bool(BoolOp::Or))?;
                i += 1;
            }
            other => {
                return Err(Error::syntax(format!(
                    "unexpected token in expression: {other:?}"
                )));
            }
        }
    }

    while let Some(op) = ops.pop() {
        match op {
            Op::LParen => return Err(Error::syntax("unmatched '(' in expression")),
            op => apply(&mut output, op)?,
        }
    }

    if output.len() != 1 {
        return Err(Error::syntax("expression did not reduce to a single value"));
    }
    Ok(output.pop().expect("checked length above"))
}

/// Parses `a, b, c` (possibly empty) into a vector of expressions, each
/// comma-separated element parsed independently.
fn parse_comma_separated(tokens: &[Token]) -> Result<Vec<Expr>> {
    if tokens.is_empty() {
        return Ok(Vec::new());
    }
    let mut elements = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, tok) in tokens.iter().enumerate() {
        match &tok.kind {
            TokenKind::Punct(Punct::LParen | Punct::LBracket) => depth += 1,
            TokenKind::Punct(Punct::RParen | Punct::RBracket) => depth -= 1,
            TokenKind::Punct(Punct::Comma) if depth == 0 => {
                elements.push(parse_expr(&tokens[start..i])?);
                start = i + 1;
            }
            _ => {}
        }
    }
    elements.push(parse_expr(&tokens[start..])?);
    Ok(elements)
}

fn push_operator(output: &mut Vec<Expr>, ops: &mut Vec<Op>, incoming: Op) -> Result<()> {
    while let Some(top) = ops.last() {
        if matches!(top, Op::LParen) || top.precedence() < incoming.precedence() {
            break;
        }
        let op = ops.pop().expect("just peeked");
        apply(output, op)?;
    }
    ops.push(incoming);
    Ok(())
}

fn pop_until_lparen(output: &mut Vec<Expr>, ops: &mut Vec<Op>) -> Result<()> {
    loop {
        match ops.pop() {
            Some(Op::LParen) => return Ok(()),
            Some(op) => apply(output, op)?,
            None => return Err(Error::syntax("unmatched ')' in expression")),
        }
    }
}

fn apply(output: &mut Vec<Expr>, op: Op) -> Result<()> {
    let rhs = output
        .pop()
        .ok_or_else(|| Error::syntax("missing right-hand operand"))?;
    let lhs = output
        .pop()
        .ok_or_else(|| Error::syntax("missing left-hand operand"))?;
    let expr = match op {
        Op::Arith(arith) => Expr::bin_op(lhs, arith, rhs),
        Op::Bool(boolop) => Expr::bool_op(boolop, lhs, rhs),
        Op::LParen => unreachable!("LParen is never applied as an operator"),
    };
    output.push(expr);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Span;

    fn tok(kind: TokenKind) -> Token {
        Token::new(kind, Span::default())
    }

    #[test]
    fn precedence_orders_mul_before_add() {
        // 2 + 3 * 4
        let tokens = vec![
            tok(TokenKind::NumLit(Number::Int(2))),
            tok(TokenKind::Arith(ArithOp::Add)),
            tok(TokenKind::NumLit(Number::Int(3))),
            tok(TokenKind::Arith(ArithOp::Mul)),
            tok(TokenKind::NumLit(Number::Int(4))),
        ];
        let expr = parse_expr(&tokens).unwrap();
        assert_eq!(
            expr,
            Expr::bin_op(
                Expr::Num(Number::Int(2)),
                ArithOp::Add,
                Expr::bin_op(Expr::Num(Number::Int(3)), ArithOp::Mul, Expr::Num(Number::Int(4))),
            )
        );
    }

    #[test]
    fn parens_override_precedence() {
        // (2 + 3) * 4
        let tokens = vec![
            tok(TokenKind::Punct(Punct::LParen)),
            tok(TokenKind::NumLit(Number::Int(2))),
            tok(TokenKind::Arith(ArithOp::Add)),
            tok(TokenKind::NumLit(Number::Int(3))),
            tok(TokenKind::Punct(Punct::RParen)),
            tok(TokenKind::Arith(ArithOp::Mul)),
            tok(TokenKind::NumLit(Number::Int(4))),
        ];
        let expr = parse_expr(&tokens).unwrap();
        assert_eq!(
            expr,
            Expr::bin_op(
                Expr::bin_op(Expr::Num(Number::Int(2)), ArithOp::Add, Expr::Num(Number::Int(3))),
                ArithOp::Mul,
                Expr::Num(Number::Int(4)),
            )
        );
    }

    #[test]
    fn and_or_bind_looser_than_comparisons() {
        // 1 < 2 and 3 < 4
        let tokens = vec![
            tok(TokenKind::NumLit(Number::Int(1))),
            tok(TokenKind::Bool(BoolOp::Lt)),
            tok(TokenKind::NumLit(Number::Int(2))),
            tok(TokenKind::Keyword(Keyword::And)),
            tok(TokenKind::NumLit(Number::Int(3))),
            tok(TokenKind::Bool(BoolOp::Lt)),
            tok(TokenKind::NumLit(Number::Int(4))),
        ];
        let expr = parse_expr(&tokens).unwrap();
        assert_eq!(
            expr,
            Expr::bool_op(
                BoolOp::And,
                Expr::bool_op(BoolOp::Lt, Expr::Num(Number::Int(1)), Expr::Num(Number::Int(2))),
                Expr::bool_op(BoolOp::Lt, Expr::Num(Number::Int(3)), Expr::Num(Number::Int(4))),
            )
        );
    }

    #[test]
    fn empty_list_literal_parses() {
        let tokens = vec![
            tok(TokenKind::Punct(Punct::LBracket)),
            tok(TokenKind::Punct(Punct::RBracket)),
        ];
        let expr = parse_expr(&tokens).unwrap();
        assert_eq!(expr, Expr::ListLit(vec![]));
    }

    #[test]
    fn list_literal_with_elements_parses() {
        let tokens = vec![
            tok(TokenKind::Punct(Punct::LBracket)),
            tok(TokenKind::NumLit(Number::Int(1))),
            tok(TokenKind::Punct(Punct::Comma)),
            tok(TokenKind::NumLit(Number::Int(2))),
            tok(TokenKind::Punct(Punct::RBracket)),
        ];
        let expr = parse_expr(&tokens).unwrap();
        assert_eq!(
            expr,
            Expr::ListLit(vec![Expr::Num(Number::Int(1)), Expr::Num(Number::Int(2))])
        );
    }

    #[test]
    fn unmatched_rparen_is_a_syntax_error() {
        let tokens = vec![
            tok(TokenKind::NumLit(Number::Int(1))),
            tok(TokenKind::Punct(Punct::RParen)),
        ];
        assert!(parse_expr(&tokens).is_err());
    }
}
