//! A bidirectional translator between ClariPy (English-flavored
//! pseudocode) and PyLite (a restricted Python-like subset), sharing
//! one AST (§1-§3).
//!
//! ```text
//! ClariPy text ─┐                ┌─ PyLite text
//!               ├─> lex/parse ─> AST ─> pretty-print ┤
//! PyLite text  ─┘                └─ ClariPy text
//! ```
//!
//! The AST can also be run directly ([`engine::run`]) or turned into a
//! labelled display tree ([`display_tree::build_tree`]) for external
//! visualization tooling.

pub mod api;
pub mod ast;
pub mod bracket;
pub mod display_tree;
pub mod engine;
pub mod error;
pub mod expr_parser;
pub mod lexer;
pub mod pretty_claripy;
pub mod pretty_pylite;
pub mod pylite_lexer;
pub mod pylite_parser;
pub mod stmt_parser;
pub mod token;
pub mod tokenizer;
pub mod value;

pub use api::{
    dialect_of, display_tree_of, parse_file, run_file, translate_to_clarypy, translate_to_pylite,
    Dialect,
};
pub use error::{Error, Result};
