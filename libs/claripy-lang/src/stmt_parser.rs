//! Statement parsing (C5): recursive descent over the typed token
//! stream into a `Module`.
//!
//! Grammar (§6):
//! ```text
//! stmt      := define | print | while | if
//! define    := "Define" (NAME | subscript) "as" (list-lit | expr) ";"
//! print     := "Print" expr ";"
//! while     := "While" "(" expr ")" "{" stmt* "}"
//! if        := "If" "(" expr ")" "{" stmt* "}" else-tail?
//! else-tail := "Else" ( if | "{" stmt* "}" )
//! ```
//! There is no bare `name = expr;` statement in ClariPy — `Define` is
//! the only assignment form, and it covers both plain names and
//! subscript targets.

use crate::ast::{AssignTarget, Module, Stmt};
use crate::error::{Error, Result};
use crate::expr_parser::parse_expr;
use crate::lexer::lex;
use crate::token::{Keyword, Punct, Token, TokenKind};

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn bump(&mut self) -> Result<&TokenKind> {
        let tok = self
            .tokens
            .get(self.pos)
            .ok_or_else(|| Error::syntax("unexpected end of input"))?;
        self.pos += 1;
        Ok(&tok.kind)
    }

    fn expect_keyword(&mut self, kw: Keyword) -> Result<()> {
        match self.bump()? {
            TokenKind::Keyword(k) if *k == kw => Ok(()),
            other => Err(Error::syntax(format!("expected '{kw}', found {other:?}"))),
        }
    }

    fn expect_punct(&mut self, p: Punct) -> Result<()> {
        match self.bump()? {
            TokenKind::Punct(found) if *found == p => Ok(()),
            other => Err(Error::syntax(format!("expected '{p}', found {other:?}"))),
        }
    }

    /// Scans forward from the current position for the first top-level
    /// occurrence (i.e. not inside nested `(...)` or `[...]`) of a
    /// token matching `is_target`, returning its index.
    fn find_top_level(&self, is_target: impl Fn(&TokenKind) -> bool) -> Result<usize> {
        let mut depth = 0i32;
        for (offset, tok) in self.tokens[self.pos..].iter().enumerate() {
            match &tok.kind {
                TokenKind::Punct(Punct::LParen | Punct::LBracket) => depth += 1,
                TokenKind::Punct(Punct::RParen | Punct::RBracket) => depth -= 1,
                kind if depth == 0 && is_target(kind) => return Ok(self.pos + offset),
                _ => {}
            }
        }
        Err(Error::syntax("unterminated statement"))
    }

    fn parse_expr_until(&mut self, is_target: impl Fn(&TokenKind) -> bool) -> Result<crate::ast::Expr> {
        let end = self.find_top_level(is_target)?;
        let expr = parse_expr(&self.tokens[self.pos..end])?;
        self.pos = end;
        Ok(expr)
    }

    /// `"(" expr ")"` — the parenthesized test expression required
    /// before every `While`/`If` block.
    fn parse_parenthesized_test(&mut self) -> Result<crate::ast::Expr> {
        self.expect_punct(Punct::LParen)?;
        let test = self.parse_expr_until(|k| matches!(k, TokenKind::Punct(Punct::RParen)))?;
        self.expect_punct(Punct::RParen)?;
        Ok(test)
    }

    fn parse_block(&mut self) -> Result<Vec<Stmt>> {
        self.expect_punct(Punct::LBrace)?;
        let mut body = Vec::new();
        while !matches!(self.peek(), Some(TokenKind::Punct(Punct::RBrace))) {
            if self.at_end() {
                return Err(Error::syntax("unterminated block: missing '}'"));
            }
            body.push(self.parse_stmt()?);
        }
        self.expect_punct(Punct::RBrace)?;
        Ok(body)
    }

    fn parse_stmt(&mut self) -> Result<Stmt> {
        match self.peek() {
            Some(TokenKind::Keyword(Keyword::Define)) => self.parse_define(),
            Some(TokenKind::Keyword(Keyword::Print)) => self.parse_print(),
            Some(TokenKind::Keyword(Keyword::While)) => self.parse_while(),
            Some(TokenKind::Keyword(Keyword::If)) => self.parse_if(),
            other => Err(Error::syntax(format!("unexpected start of statement: {other:?}"))),
        }
    }

    fn parse_define(&mut self) -> Result<Stmt> {
        self.expect_keyword(Keyword::Define)?;
        let target = match self.bump()? {
            TokenKind::Name(n) => AssignTarget::Name(n.clone()),
            TokenKind::Subscript { container, index } => AssignTarget::Subscript {
                container: container.clone(),
                index: (**index).clone(),
            },
            other => {
                return Err(Error::syntax(format!(
                    "expected a name or subscript target after 'Define', found {other:?}"
                )))
            }
        };
        self.expect_keyword(Keyword::As)?;
        let value = self.parse_expr_until(|k| matches!(k, TokenKind::Punct(Punct::Semicolon)))?;
        self.expect_punct(Punct::Semicolon)?;
        Ok(Stmt::Assign { target, value })
    }

    fn parse_print(&mut self) -> Result<Stmt> {
        self.expect_keyword(Keyword::Print)?;
        let value = self.parse_expr_until(|k| matches!(k, TokenKind::Punct(Punct::Semicolon)))?;
        self.expect_punct(Punct::Semicolon)?;
        Ok(Stmt::Print(value))
    }

    fn parse_while(&mut self) -> Result<Stmt> {
        self.expect_keyword(Keyword::While)?;
        let test = self.parse_parenthesized_test()?;
        let body = self.parse_block()?;
        Ok(Stmt::While { test, body })
    }

    fn parse_if(&mut self) -> Result<Stmt> {
        self.expect_keyword(Keyword::If)?;
        let test = self.parse_parenthesized_test()?;
        let body = self.parse_block()?;

        let orelse = if matches!(self.peek(), Some(TokenKind::Keyword(Keyword::Else))) {
            self.pos += 1;
            if matches!(self.peek(), Some(TokenKind::Keyword(Keyword::If))) {
                Some(vec![self.parse_if()?])
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };

        Stmt::if_stmt(test, body, orelse)
    }
}

/// Parses a full ClariPy token stream into a `Module`.
pub fn parse_module(tokens: &[Token]) -> Result<Module> {
    let mut parser = Parser::new(tokens);
    let mut body = Vec::new();
    while !parser.at_end() {
        body.push(parser.parse_stmt()?);
    }
    Ok(Module::new(body))
}

/// Convenience wrapper: lexes and parses ClariPy source text in one
/// step.
pub fn parse_source(source: &str) -> Result<Module> {
    let tokens = lex(source)?;
    parse_module(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expr;
    use crate::token::{ArithOp, BoolOp, Number};

    #[test]
    fn parses_define_with_arithmetic_rhs() {
        let module = parse_source("Define x as 2 + 3 * 4;").unwrap();
        assert_eq!(
            module.body,
            vec![Stmt::Assign {
                target: AssignTarget::Name("x".into()),
                value: Expr::bin_op(
                    Expr::Num(Number::Int(2)),
                    ArithOp::Add,
                    Expr::bin_op(Expr::Num(Number::Int(3)), ArithOp::Mul, Expr::Num(Number::Int(4))),
                ),
            }]
        );
    }

    #[test]
    fn parses_print_statement() {
        let module = parse_source(r#"Print "hi";"#).unwrap();
        assert_eq!(module.body, vec![Stmt::Print(Expr::Str("hi".into()))]);
    }

    #[test]
    fn parses_while_loop_body() {
        let module = parse_source("While (x is less than 3) { Define x as x + 1; }").unwrap();
        assert_eq!(module.body.len(), 1);
        match &module.body[0] {
            Stmt::While { test, body } => {
                assert_eq!(
                    *test,
                    Expr::bool_op(BoolOp::Lt, Expr::Name("x".into()), Expr::Num(Number::Int(3)))
                );
                assert_eq!(body.len(), 1);
            }
            other => panic!("expected While, got {other:?}"),
        }
    }

    #[test]
    fn parses_if_else_if_else_chain() {
        let module = parse_source(
            "If (x is equal to 1) { Print x; } Else If (x is equal to 2) { Print x; } Else { Print x; }",
        )
        .unwrap();
        match &module.body[0] {
            Stmt::If { orelse, .. } => {
                let orelse = orelse.as_ref().expect("expected an else branch");
                assert_eq!(orelse.len(), 1);
                assert!(matches!(&orelse[0], Stmt::If { .. }));
            }
            other => panic!("expected If, got {other:?}"),
        }
    }

    #[test]
    fn parses_subscript_define_target() {
        let module = parse_source("Define xs as [1, 2, 3]; Define xs[0] as 9;").unwrap();
        match &module.body[1] {
            Stmt::Assign {
                target: AssignTarget::Subscript { container, index },
                value,
            } => {
                assert_eq!(container, "xs");
                assert_eq!(*index, Expr::Num(Number::Int(0)));
                assert_eq!(*value, Expr::Num(Number::Int(9)));
            }
            other => panic!("expected subscript assignment, got {other:?}"),
        }
    }

    #[test]
    fn missing_semicolon_is_a_syntax_error() {
        assert!(parse_source("Define x as 1").is_err());
    }

    #[test]
    fn while_test_requires_parens() {
        assert!(parse_source("While x is less than 3 { Print x; }").is_err());
    }
}
