//! Display tree (C9): builds a labelled, rooted tree from a `Module`
//! for external visualization tools (graph layout, plotting — kept out
//! of this crate's own scope per the Non-goals, but the tree itself is
//! still produced and is `Serialize` so those tools can consume it as
//! JSON). [`render_ascii`] additionally renders it as indented text for
//! the `claripy tree` debugging command.
//!
//! The condition-branch label is spelled `"Conditon"` — preserved
//! verbatim because downstream consumers may already depend on the
//! exact string. `While`'s body-child label and `Assign`'s two
//! children's labels aren't specified; this picks `"While-Body"` and
//! `"Target"`/`"Value"`, mirroring the naming style used for `If`.

use serde::Serialize;

use crate::ast::{AssignTarget, Expr, Module, Stmt};
use crate::token::{ArithOp, BoolOp};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayNode {
    pub label: String,
    pub children: Vec<DisplayNode>,
}

impl DisplayNode {
    fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    fn node(label: impl Into<String>, children: Vec<DisplayNode>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }
}

/// Renders the tree as indented ASCII text, one label per line, for
/// the `claripy tree` debugging command.
pub fn render_ascii(root: &DisplayNode) -> String {
    let mut out = String::new();
    out.push_str(&root.label);
    out.push('\n');
    render_children(&root.children, "", &mut out);
    out
}

fn render_children(children: &[DisplayNode], prefix: &str, out: &mut String) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        let connector = if is_last { "└── " } else { "├── " };
        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(&child.label);
        out.push('\n');

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        render_children(&child.children, &child_prefix, out);
    }
}

/// Builds the display tree for a whole module, rooted at `"Module"`.
pub fn build_tree(module: &Module) -> DisplayNode {
    DisplayNode::node("Module", module.body.iter().map(build_stmt).collect())
}

fn build_stmt(stmt: &Stmt) -> DisplayNode {
    match stmt {
        Stmt::Assign { target, value } => DisplayNode::node(
            "Assign",
            vec![
                DisplayNode::node("Target", vec![build_target(target)]),
                DisplayNode::node("Value", vec![build_expr(value)]),
            ],
        ),
        Stmt::Print(expr) => DisplayNode::node("Print", vec![build_expr(expr)]),
        Stmt::While { test, body } => DisplayNode::node(
            "While",
            vec![
                DisplayNode::node("Conditon", vec![build_expr(test)]),
                DisplayNode::node("While-Body", body.iter().map(build_stmt).collect()),
            ],
        ),
        Stmt::If { test, body, orelse } => {
            let mut children = vec![
                DisplayNode::node("Conditon", vec![build_expr(test)]),
                DisplayNode::node("If-Body", body.iter().map(build_stmt).collect()),
            ];
            if let Some(orelse) = orelse {
                children.push(DisplayNode::node(
                    "Orelse",
                    orelse.iter().map(build_stmt).collect(),
                ));
            }
            DisplayNode::node("If", children)
        }
    }
}

fn build_target(target: &AssignTarget) -> DisplayNode {
    match target {
        AssignTarget::Name(name) => build_expr(&Expr::Name(name.clone())),
        AssignTarget::Subscript { container, index } => {
            build_expr(&Expr::Subscript { container: container.clone(), index: Box::new(index.clone()) })
        }
    }
}

fn build_expr(expr: &Expr) -> DisplayNode {
    match expr {
        Expr::Num(n) => DisplayNode::node("Num", vec![DisplayNode::leaf(n.to_string())]),
        Expr::Str(s) => DisplayNode::node("Str", vec![DisplayNode::leaf(s.clone())]),
        Expr::Bool(b) => DisplayNode::node("Bool", vec![DisplayNode::leaf(b.to_string())]),
        Expr::Name(name) => DisplayNode::node("Variable", vec![DisplayNode::leaf(name.clone())]),
        Expr::ListLit(items) => DisplayNode::node("List", items.iter().map(build_expr).collect()),
        Expr::Subscript { container, index } => DisplayNode::node(
            "List Index",
            vec![
                DisplayNode::node("List", vec![DisplayNode::leaf(container.clone())]),
                DisplayNode::node("Index", vec![build_expr(index)]),
            ],
        ),
        Expr::BinOp { left, op, right } => DisplayNode::node(
            "Binary Op.",
            vec![build_expr(left), DisplayNode::leaf(arith_label(*op)), build_expr(right)],
        ),
        Expr::BoolOp { op, left, right } => DisplayNode::node(
            "Bool Op.",
            vec![build_expr(left), DisplayNode::leaf(bool_label(*op)), build_expr(right)],
        ),
    }
}

fn arith_label(op: ArithOp) -> &'static str {
    op.as_str()
}

fn bool_label(op: BoolOp) -> &'static str {
    op.as_symbol()
}
