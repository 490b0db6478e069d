//! PyLite pretty-printer (C8): renders a `Module` as indentation-based
//! PyLite source text — the symmetric counterpart to
//! [`crate::pretty_claripy`] that the distilled design never implements
//! (it only ever builds a display tree from PyLite, never prints back
//! to ClariPy prose). Both directions are real here.

use std::fmt::Write as _;

use crate::ast::{AssignTarget, Expr, Module, Stmt};
use crate::token::{ArithOp, BoolOp};

const INDENT: &str = "    ";

/// Renders a full module as PyLite source text.
pub fn print_module(module: &Module) -> String {
    let mut out = String::new();
    print_block(&module.body, 0, &mut out);
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn print_block(body: &[Stmt], depth: usize, out: &mut String) {
    for stmt in body {
        print_stmt(stmt, depth, out);
    }
}

fn print_stmt(stmt: &Stmt, depth: usize, out: &mut String) {
    indent(out, depth);
    match stmt {
        Stmt::Assign {
            target: AssignTarget::Name(name),
            value,
        } => {
            let _ = writeln!(out, "{name} = {}", print_expr(value));
        }
        Stmt::Assign {
            target: AssignTarget::Subscript { container, index },
            value,
        } => {
            let _ = writeln!(out, "{container}[{}] = {}", print_expr(index), print_expr(value));
        }
        Stmt::Print(expr) => {
            let _ = writeln!(out, "print({})", print_expr(expr));
        }
        Stmt::While { test, body } => {
            let _ = writeln!(out, "while {}:", print_expr(test));
            print_block(body, depth + 1, out);
        }
        Stmt::If { test, body, orelse } => {
            let _ = writeln!(out, "if {}:", print_expr(test));
            print_block(body, depth + 1, out);
            print_else_tail(orelse.as_deref(), depth, out);
        }
    }
}

fn print_else_tail(orelse: Option<&[Stmt]>, depth: usize, out: &mut String) {
    match orelse {
        None => {}
        Some([Stmt::If { test, body, orelse }]) => {
            indent(out, depth);
            let _ = writeln!(out, "elif {}:", print_expr(test));
            print_block(body, depth + 1, out);
            print_else_tail(orelse.as_deref(), depth, out);
        }
        Some(stmts) => {
            indent(out, depth);
            out.push_str("else:\n");
            print_block(stmts, depth + 1, out);
        }
    }
}

/// Renders a single expression, always fully parenthesizing binary
/// operators (the same round-trip-safety trade-off as the ClariPy
/// printer).
pub fn print_expr(expr: &Expr) -> String {
    match expr {
        Expr::Num(n) => n.to_string(),
        Expr::Str(s) => format!("\"{s}\""),
        Expr::Bool(b) => if *b { "True".to_string() } else { "False".to_string() },
        Expr::Name(name) => name.clone(),
        Expr::ListLit(items) => {
            let rendered: Vec<String> = items.iter().map(print_expr).collect();
            format!("[{}]", rendered.join(", "))
        }
        Expr::Subscript { container, index } => format!("{container}[{}]", print_expr(index)),
        Expr::BinOp { left, op, right } => {
            format!("({} {} {})", print_expr(left), arith_symbol(*op), print_expr(right))
        }
        Expr::BoolOp { op, left, right } => {
            format!("({} {} {})", print_expr(left), bool_symbol(*op), print_expr(right))
        }
    }
}

fn arith_symbol(op: ArithOp) -> &'static str {
    op.as_str()
}

fn bool_symbol(op: BoolOp) -> &'static str {
    match op {
        BoolOp::Eq => "==",
        other => other.as_symbol(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt_parser::parse_source;

    #[test]
    fn renders_define_as_plain_assignment() {
        let module = parse_source("Define x as 2 + 3 * 4;").unwrap();
        assert_eq!(print_module(&module), "x = (2 + (3 * 4))\n");
    }

    #[test]
    fn renders_print_with_parens() {
        let module = parse_source(r#"Print "hi";"#).unwrap();
        assert_eq!(print_module(&module), "print(\"hi\")\n");
    }

    #[test]
    fn renders_while_with_indented_body() {
        let module = parse_source("While (x is less than 3) { Print x; Define x as x + 1; }").unwrap();
        let printed = print_module(&module);
        assert!(printed.starts_with("while (x < 3):\n"));
        assert!(printed.contains("    print(x)\n"));
    }

    #[test]
    fn renders_if_elif_else_chain() {
        let source =
            "If (x is equal to 1) { Print x; } Else If (x is equal to 2) { Print x; } Else { Print x; }";
        let module = parse_source(source).unwrap();
        let printed = print_module(&module);
        assert!(printed.contains("elif (x == 2):\n"));
        assert!(printed.contains("else:\n"));
    }
}
