//! PyLite lexer: indentation-aware tokenizing of PyLite source text
//! into per-line typed token runs.
//!
//! PyLite has no braces — block structure comes from indentation, so
//! this stage groups tokens by logical line and records each line's
//! indentation depth instead of folding blocks into the token stream
//! the way the ClariPy lexer's braces do.

use crate::error::{Error, Result};
use crate::lexer::{fold_subscripts, is_identifier, lookup_punct, parse_number, strip_quotes};
use crate::token::{ArithOp, BoolOp, Keyword, Punct, Token, TokenKind};
use crate::tokenizer::tokenize;

const INDENT_WIDTH: usize = 4;

/// One non-blank logical line: its indentation depth and typed tokens.
#[derive(Debug, Clone)]
pub struct PyLiteLine {
    pub depth: usize,
    pub tokens: Vec<Token>,
}

/// Lexes every non-blank line of PyLite source text.
pub fn lex_lines(source: &str) -> Result<Vec<PyLiteLine>> {
    let mut lines = Vec::new();
    for raw_line in source.lines() {
        if raw_line.trim().is_empty() {
            continue;
        }
        let leading = raw_line.len() - raw_line.trim_start_matches(' ').len();
        if leading % INDENT_WIDTH != 0 {
            return Err(Error::syntax(format!(
                "indentation must be a multiple of {INDENT_WIDTH} spaces, found {leading}"
            )));
        }
        let depth = leading / INDENT_WIDTH;

        let raw_tokens = tokenize(raw_line.trim_start())?;
        let mut tokens = Vec::with_capacity(raw_tokens.len());
        for r in &raw_tokens {
            tokens.push(Token::new(classify(&r.text)?, r.span));
        }
        let tokens = fold_subscripts(tokens)?;
        lines.push(PyLiteLine { depth, tokens });
    }
    Ok(lines)
}

/// Classifies one raw token's text under PyLite's keyword set:
/// `and`, `or`, `True`, `False`. `if`/`elif`/`else`/`while`/`print`
/// read as plain names at this stage — the statement parser
/// recognizes them positionally, since PyLite's control-flow words
/// aren't reserved the way ClariPy's capitalized keywords are.
fn classify(text: &str) -> Result<TokenKind> {
    match text {
        "and" => return Ok(TokenKind::Keyword(Keyword::And)),
        "or" => return Ok(TokenKind::Keyword(Keyword::Or)),
        "True" => return Ok(TokenKind::BoolLit(true)),
        "False" => return Ok(TokenKind::BoolLit(false)),
        _ => {}
    }
    if let Some(stripped) = strip_quotes(text) {
        return Ok(TokenKind::StrLit(stripped.to_string()));
    }
    if let Some(number) = parse_number(text) {
        return Ok(TokenKind::NumLit(number));
    }
    if text == "==" {
        return Ok(TokenKind::Bool(BoolOp::Eq));
    }
    if text == "=" {
        return Ok(TokenKind::Punct(Punct::Equals));
    }
    if let Some(op) = BoolOp::lookup_symbol(text) {
        return Ok(TokenKind::Bool(op));
    }
    if let Some(op) = ArithOp::lookup(text) {
        return Ok(TokenKind::Arith(op));
    }
    if let Some(punct) = lookup_punct(text) {
        return Ok(TokenKind::Punct(punct));
    }
    if is_identifier(text) {
        return Ok(TokenKind::Name(text.to_string()));
    }
    Err(Error::syntax(format!("unrecognized token: '{text}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_indentation_depth_in_units_of_four_spaces() {
        let lines = lex_lines("while x < 3:\n    print(x)\n    x = x + 1\n").unwrap();
        assert_eq!(lines[0].depth, 0);
        assert_eq!(lines[1].depth, 1);
        assert_eq!(lines[2].depth, 1);
    }

    #[test]
    fn rejects_misaligned_indentation() {
        assert!(lex_lines("if x:\n  print(x)\n").is_err());
    }

    #[test]
    fn classifies_bool_literals() {
        let lines = lex_lines("x = True\n").unwrap();
        assert!(matches!(lines[0].tokens[2].kind, TokenKind::BoolLit(true)));
    }

    #[test]
    fn folds_subscript_in_pylite_too() {
        let lines = lex_lines("print(xs[0])\n").unwrap();
        let inner = &lines[0].tokens[2];
        assert!(matches!(inner.kind, TokenKind::Subscript { .. }));
    }
}
