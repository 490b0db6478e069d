//! Abstract syntax tree (C6): the sum-type node set shared by both
//! surface syntaxes, plus the construction invariants from spec §3.
//!
//! The tree is owned outright — every non-literal node holds its
//! children in a `Box`, so there is no way to build a DAG through this
//! API (invariant 1). `Subscript::container` is a plain `String` rather
//! than a nested `Expr`, which rules out nested subscripts by
//! construction (invariant 3). `If::orelse` is `Option<Vec<Stmt>>` with
//! the empty-vec case rejected at construction (invariant 4).

use crate::error::{Error, Result};
use crate::token::{ArithOp, BoolOp, Number};

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(Number),
    Str(String),
    Bool(bool),
    Name(String),
    ListLit(Vec<Expr>),
    Subscript {
        container: String,
        index: Box<Expr>,
    },
    BinOp {
        left: Box<Expr>,
        op: ArithOp,
        right: Box<Expr>,
    },
    BoolOp {
        op: BoolOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn subscript(container: impl Into<String>, index: Expr) -> Expr {
        Expr::Subscript {
            container: container.into(),
            index: Box::new(index),
        }
    }

    pub fn bin_op(left: Expr, op: ArithOp, right: Expr) -> Expr {
        Expr::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn bool_op(op: BoolOp, left: Expr, right: Expr) -> Expr {
        Expr::BoolOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// The target of an `Assign`: a bare name, or a single-index subscript
/// (invariant 3 applies here too — the container is always a name).
#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    Name(String),
    Subscript { container: String, index: Expr },
}

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign {
        target: AssignTarget,
        value: Expr,
    },
    Print(Expr),
    While {
        test: Expr,
        body: Vec<Stmt>,
    },
    If {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Option<Vec<Stmt>>,
    },
}

impl Stmt {
    /// Builds an `If` node, enforcing invariant 4: `orelse` is either
    /// absent or non-empty.
    pub fn if_stmt(test: Expr, body: Vec<Stmt>, orelse: Option<Vec<Stmt>>) -> Result<Stmt> {
        if let Some(ref stmts) = orelse {
            if stmts.is_empty() {
                return Err(Error::internal(
                    "If.orelse must be absent or non-empty, never an empty list",
                ));
            }
        }
        Ok(Stmt::If { test, body, orelse })
    }
}

/// A whole program: an ordered list of statements, evaluated top to
/// bottom against a single environment (invariant 5: a `Module` body
/// contains only statements).
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub body: Vec<Stmt>,
}

impl Module {
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn if_stmt_rejects_empty_orelse() {
        let test = Expr::Bool(true);
        let result = Stmt::if_stmt(test, vec![], Some(vec![]));
        assert!(matches!(result, Err(Error::Internal(_))));
    }

    #[test]
    fn if_stmt_allows_absent_orelse() {
        let test = Expr::Bool(true);
        let result = Stmt::if_stmt(test, vec![Stmt::Print(Expr::Num(Number::Int(1)))], None);
        assert!(result.is_ok());
    }

    #[test]
    fn subscript_container_is_always_a_name_by_construction() {
        // There is no variant of `Expr::Subscript` whose container is an
        // `Expr` — this is a compile-time guarantee, not a runtime check.
        let e = Expr::subscript("xs", Expr::Num(Number::Int(0)));
        match e {
            Expr::Subscript { container, .. } => assert_eq!(container, "xs"),
            _ => panic!("expected Subscript"),
        }
    }
}
