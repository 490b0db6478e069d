//! Lexer (C3): raw string tokens → typed `Token`s, including the
//! subscript fold (`name '[' expr ']'` → a single `Subscript` token).
//!
//! The fold runs after every other raw token has been classified, so
//! that the bracket-matching predicates in [`crate::bracket`] see typed
//! punctuation rather than bare characters.

use crate::ast::Expr;
use crate::bracket::find_matching;
use crate::error::{Error, Result};
use crate::expr_parser::parse_expr;
use crate::token::{ArithOp, BoolOp, Keyword, Number, Punct, Token, TokenKind};
use crate::tokenizer::{tokenize, RawToken};

/// Classifies one raw token's text into a typed, unfolded `TokenKind`.
fn classify(raw: &RawToken) -> Result<TokenKind> {
    let text = raw.text.as_str();

    if let Some(kw) = Keyword::lookup(text) {
        return Ok(TokenKind::Keyword(kw));
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

pub(crate) fn strip_quotes(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'"' || first == b'\'') && first == last {
            return Some(&text[1..text.len() - 1]);
        }
    }
    None
}

pub(crate) fn parse_number(text: &str) -> Option<Number> {
    if text.contains('.') {
        text.parse::<f64>().ok().map(Number::Float)
    } else {
        text.parse::<i64>().ok().map(Number::Int)
    }
}

pub(crate) fn lookup_punct(text: &str) -> Option<Punct> {
    match text {
        "(" => Some(Punct::LParen),
        ")" => Some(Punct::RParen),
        "{" => Some(Punct::LBrace),
        "}" => Some(Punct::RBrace),
        "[" => Some(Punct::LBracket),
        "]" => Some(Punct::RBracket),
        "," => Some(Punct::Comma),
        ";" => Some(Punct::Semicolon),
        ":" => Some(Punct::Colon),
        _ => None,
    }
}

pub(crate) fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}

/// Lexes ClariPy source text into the final typed token stream, with
/// subscripts folded into single tokens.
pub fn lex(source: &str) -> Result<Vec<Token>> {
    let raw = tokenize(source)?;
    let mut tokens: Vec<Token> = Vec::with_capacity(raw.len());
    for r in &raw {
        tokens.push(Token::new(classify(r)?, r.span));
    }
    let tokens = fold_subscripts(tokens)?;
    fold_at_index_phrases(tokens)
}

/// Repeatedly scans for `Name '[' … ']'` runs and collapses each into a
/// single `Subscript` token, innermost matches first (there are none
/// nested, by invariant 3, but multiple subscripts can appear
/// side by side in one statement). Shared with [`crate::pylite_lexer`],
/// which folds subscripts the same way over PyLite's token stream.
pub(crate) fn fold_subscripts(tokens: Vec<Token>) -> Result<Vec<Token>> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut i = 0usize;
    while i < tokens.len() {
        let starts_subscript = matches!(tokens[i].kind, TokenKind::Name(_))
            && tokens
                .get(i + 1)
                .is_some_and(|t| matches!(t.kind, TokenKind::Punct(Punct::LBracket)));

        if !starts_subscript {
            out.push(tokens[i].clone());
            i += 1;
            continue;
        }

        let container = match &tokens[i].kind {
            TokenKind::Name(name) => name.clone(),
            _ => unreachable!("starts_subscript guarantees a Name"),
        };
        let open = i + 1;
        let close = find_matching(
            &tokens,
            open,
            |t| matches!(t.kind, TokenKind::Punct(Punct::LBracket)),
            |t| matches!(t.kind, TokenKind::Punct(Punct::RBracket)),
        )?;
        let index: Expr = parse_expr(&tokens[open + 1..close])?;
        let span = crate::token::Span::new(tokens[i].span.start, tokens[close].span.end);
        out.push(Token::new(
            TokenKind::Subscript {
                container,
                index: Box::new(index),
            },
            span,
        ));
        i = close + 1;
    }
    Ok(out)
}

/// Folds the pretty-printer's `at index <expr> [<name>]` phrase (§4.6)
/// back into a single `Subscript` token, so printed output stays
/// parseable. Runs after [`fold_subscripts`], since the index
/// expression itself may already contain folded subscripts.
///
/// A run is recognized only when a top-level `[<name>]` immediately
/// follows the `at index <expr>` phrase, bounded by the next
/// `;`/`{`/`}` — this keeps an unrelated `at`/`index` pair of ordinary
/// variable names from being misread as the phrase.
fn fold_at_index_phrases(tokens: Vec<Token>) -> Result<Vec<Token>> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut i = 0usize;
    while i < tokens.len() {
        let starts_phrase = is_name(&tokens[i].kind, "at")
            && tokens.get(i + 1).is_some_and(|t| is_name(&t.kind, "index"));

        if !starts_phrase {
            out.push(tokens[i].clone());
            i += 1;
            continue;
        }

        let index_start = i + 2;
        let boundary = tokens[index_start..]
            .iter()
            .position(|t| {
                matches!(
                    t.kind,
                    TokenKind::Punct(Punct::Semicolon | Punct::LBrace | Punct::RBrace)
                )
            })
            .map(|offset| index_start + offset)
            .unwrap_or(tokens.len());

        let bracket_open = tokens[index_start..boundary]
            .iter()
            .position(|t| matches!(t.kind, TokenKind::Punct(Punct::LBracket)));

        let Some(bracket_open) = bracket_open.map(|offset| index_start + offset) else {
            out.push(tokens[i].clone());
            i += 1;
            continue;
        };

        let close = find_matching(
            &tokens,
            bracket_open,
            |t| matches!(t.kind, TokenKind::Punct(Punct::LBracket)),
            |t| matches!(t.kind, TokenKind::Punct(Punct::RBracket)),
        )?;

        let container = match &tokens[bracket_open + 1..close] {
            [single] => match &single.kind {
                TokenKind::Name(name) => name.clone(),
                _ => {
                    out.push(tokens[i].clone());
                    i += 1;
                    continue;
                }
            },
            _ => {
                out.push(tokens[i].clone());
                i += 1;
                continue;
            }
        };

        let index: Expr = parse_expr(&tokens[index_start..bracket_open])?;
        let span = crate::token::Span::new(tokens[i].span.start, tokens[close].span.end);
        out.push(Token::new(
            TokenKind::Subscript {
                container,
                index: Box::new(index),
            },
            span,
        ));
        i = close + 1;
    }
    Ok(out)
}

fn is_name(kind: &TokenKind, text: &str) -> bool {
    matches!(kind, TokenKind::Name(n) if n == text)
}
