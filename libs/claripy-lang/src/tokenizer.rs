//! Tokenizer (C2): source text → raw string tokens.
//!
//! Performs the English-phrase substitution before applying the master
//! regular-expression pattern. Per spec §9's open question, the
//! "…or equal to" phrases are substituted before their shorter prefixes
//! so that `is greater than or equal to` never partially matches as
//! `is greater than` followed by stray words — the substitution list
//! below is already ordered longest-phrase-first.

use regex::Regex;

use crate::error::Result;
use crate::token::Span;

/// A single raw token: matched text plus its byte span in the
/// (post-substitution) source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub text: String,
    pub span: Span,
}

/// Phrase → symbol substitutions, longest phrase first so that a prefix
/// phrase never shadows the longer phrase it's contained in.
const PHRASE_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("is greater than or equal to", ">="),
    ("is less than or equal to", "<="),
    ("is not equal to", "!="),
    ("is equal to", "=="),
    ("is greater than", ">"),
    ("is less than", "<"),
];

fn substitute_phrases(source: &str) -> String {
    let mut text = source.to_string();
    for (phrase, symbol) in PHRASE_SUBSTITUTIONS {
        text = text.replace(phrase, symbol);
    }
    text
}

/// The master pattern (§4.1 step 3). Alternation order matters: the
/// `regex` crate picks the first alternative that matches at a given
/// start position (leftmost-first, not longest-match), so the signed
/// float form must precede the signed int form or `3.14` would lex as
/// `3` followed by a dropped `.` and a stray `14`.
fn master_pattern() -> Regex {
    Regex::new(
        r#"(?x)
        -?[0-9]*\.[0-9]+      # signed float
      | -?[0-9]+              # signed int
      | \w+                   # identifier/keyword
      | ["'][ -~]+["']        # quoted string, non-empty interior
      | !=|<=|>=               # multi-char operators
      | [<>+\-*/;{}(),%:\]\[]  # single-char punctuation
      | =+                     # assignment run
      "#,
    )
    .expect("master tokenizer pattern is a fixed, valid regex")
}

/// Tokenizes ClariPy source text into raw string tokens. Whitespace and
/// any unmatched characters are discarded implicitly by only collecting
/// regex matches.
pub fn tokenize(source: &str) -> Result<Vec<RawToken>> {
    let substituted = substitute_phrases(source);
    let pattern = master_pattern();

    Ok(pattern
        .find_iter(&substituted)
        .map(|m| RawToken {
            text: m.as_str().to_string(),
            span: Span::new(m.start(), m.end()),
        })
        .collect())
}
