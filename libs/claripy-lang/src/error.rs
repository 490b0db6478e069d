//! Error types shared across the tokenizer, parsers, evaluator, and
//! pretty-printers.

use thiserror::Error;

/// Result alias used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The error kinds a ClariPy/PyLite program can fail with.
///
/// Every variant corresponds to one of the error kinds named in the
/// design: I/O failures reading source files, syntax errors from the
/// tokenizer/parsers, and the three evaluator-time errors (name, index,
/// type). `Internal` is reserved for AST invariant violations, which
/// should be unreachable if the parsers are correct.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("could not read source: {0}")]
    Io(String),

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("name error: '{0}' is not defined")]
    Name(String),

    #[error("index error: {0}")]
    Index(String),

    #[error("type error: {0}")]
    Type(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn syntax(msg: impl Into<String>) -> Self {
        Error::Syntax(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    pub fn name(ident: impl Into<String>) -> Self {
        Error::Name(ident.into())
    }

    pub fn index(msg: impl Into<String>) -> Self {
        Error::Index(msg.into())
    }

    pub fn type_error(msg: impl Into<String>) -> Self {
        Error::Type(msg.into())
    }
}
