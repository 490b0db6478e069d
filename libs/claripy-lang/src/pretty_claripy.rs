//! ClariPy pretty-printer (C8): renders a `Module` back into ClariPy
//! surface syntax.
//!
//! Every `BinOp`/`BoolOp` is printed fully parenthesized — this trades
//! a few redundant parens for a printer that never needs to reason
//! about precedence to stay round-trip-safe. A `Subscript` used as a
//! plain expression prints as the English phrase `at index <i> [<xs>]`
//! (§4.6); a `Subscript` used as a `Define` *target* still prints in
//! bracket form, matching the surface grammar's `Target` production.

use std::fmt::Write as _;

use crate::ast::{AssignTarget, Expr, Module, Stmt};
use crate::token::{ArithOp, BoolOp};

/// Renders a full module as ClariPy source text.
pub fn print_module(module: &Module) -> String {
    let mut out = String::new();
    print_block(&module.body, 0, &mut out);
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("    ");
    }
}

fn print_block(body: &[Stmt], depth: usize, out: &mut String) {
    for stmt in body {
        print_stmt(stmt, depth, out);
    }
}

fn print_target(target: &AssignTarget) -> String {
    match target {
        AssignTarget::Name(name) => name.clone(),
        AssignTarget::Subscript { container, index } => {
            format!("{container}[{}]", print_expr(index))
        }
    }
}

fn print_stmt(stmt: &Stmt, depth: usize, out: &mut String) {
    indent(out, depth);
    match stmt {
        Stmt::Assign { target, value } => {
            let _ = writeln!(out, "Define {} as {};", print_target(target), print_expr(value));
        }
        Stmt::Print(expr) => {
            let _ = writeln!(out, "Print {};", print_expr(expr));
        }
        Stmt::While { test, body } => {
            let _ = writeln!(out, "While ({}) {{", print_expr(test));
            print_block(body, depth + 1, out);
            indent(out, depth);
            out.push_str("}\n");
        }
        Stmt::If { test, body, orelse } => {
            let _ = writeln!(out, "If ({}) {{", print_expr(test));
            print_block(body, depth + 1, out);
            indent(out, depth);
            out.push('}');
            print_else_tail(orelse.as_deref(), depth, out);
        }
    }
}

/// `orelse` holding exactly one `If` statement is an "Else If" chain
/// link; anything else is a terminal `Else` block.
fn print_else_tail(orelse: Option<&[Stmt]>, depth: usize, out: &mut String) {
    match orelse {
        None => out.push('\n'),
        Some([Stmt::If { test, body, orelse }]) => {
            let _ = writeln!(out, " Else If ({}) {{", print_expr(test));
            print_block(body, depth + 1, out);
            indent(out, depth);
            out.push('}');
            print_else_tail(orelse.as_deref(), depth, out);
        }
        Some(stmts) => {
            out.push_str(" Else {\n");
            print_block(stmts, depth + 1, out);
            indent(out, depth);
            out.push_str("}\n");
        }
    }
}

/// Renders a single expression, always fully parenthesizing binary
/// operators.
pub fn print_expr(expr: &Expr) -> String {
    match expr {
        Expr::Num(n) => n.to_string(),
        Expr::Str(s) => format!("\"{s}\""),
        Expr::Bool(b) => b.to_string(),
        Expr::Name(name) => name.clone(),
        Expr::ListLit(items) => {
            let rendered: Vec<String> = items.iter().map(print_expr).collect();
            format!("[{}]", rendered.join(", "))
        }
        Expr::Subscript { container, index } => {
            format!("at index {} [{container}]", print_expr(index))
        }
        Expr::BinOp { left, op, right } => {
            format!("({} {} {})", print_expr(left), arith_symbol(*op), print_expr(right))
        }
        Expr::BoolOp { op, left, right } => {
            format!("({} {} {})", print_expr(left), bool_english(*op), print_expr(right))
        }
    }
}

fn arith_symbol(op: ArithOp) -> &'static str {
    op.as_str()
}

fn bool_english(op: BoolOp) -> &'static str {
    op.as_english()
}
