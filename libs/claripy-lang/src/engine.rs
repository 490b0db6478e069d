//! Tree-walking evaluator (C7): runs a `Module` against a single,
//! freshly-created `Environment` and collects everything `Print`ed.
//!
//! `and`/`or` are deliberately non-short-circuiting (§9): both operands
//! are always evaluated, matching the source behavior rather than
//! "fixing" it into the short-circuit form most languages use.

use crate::ast::{AssignTarget, Expr, Module, Stmt};
use crate::error::{Error, Result};
use crate::token::{ArithOp, BoolOp, Number};
use crate::value::{Environment, Value};

/// The result of running a module: the final environment (for
/// inspection — e.g. the CLI's `--show-env` flag) and every line
/// written by a `Print` statement, in order.
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    pub env: Environment,
    pub output: Vec<String>,
}

/// Runs every statement in `module` against a fresh environment.
pub fn run(module: &Module) -> Result<RunOutcome> {
    let mut env = Environment::new();
    let mut output = Vec::new();
    exec_block(&module.body, &mut env, &mut output)?;
    Ok(RunOutcome { env, output })
}

fn exec_block(body: &[Stmt], env: &mut Environment, output: &mut Vec<String>) -> Result<()> {
    for stmt in body {
        exec_stmt(stmt, env, output)?;
    }
    Ok(())
}

fn exec_stmt(stmt: &Stmt, env: &mut Environment, output: &mut Vec<String>) -> Result<()> {
    match stmt {
        Stmt::Assign { target, value } => {
            let value = eval_expr(value, env)?;
            assign(target, value, env)
        }
        Stmt::Print(expr) => {
            let value = eval_expr(expr, env)?;
            output.push(value.to_string());
            Ok(())
        }
        Stmt::While { test, body } => {
            while eval_expr(test, env)?.is_truthy() {
                exec_block(body, env, output)?;
            }
            Ok(())
        }
        Stmt::If { test, body, orelse } => {
            if eval_expr(test, env)?.is_truthy() {
                exec_block(body, env, output)
            } else if let Some(orelse) = orelse {
                exec_block(orelse, env, output)
            } else {
                Ok(())
            }
        }
    }
}

fn assign(target: &AssignTarget, value: Value, env: &mut Environment) -> Result<()> {
    match target {
        AssignTarget::Name(name) => {
            env.set(name.clone(), value);
            Ok(())
        }
        AssignTarget::Subscript { container, index } => {
            let index_value = eval_expr(index, env)?;
            let idx = require_index(&index_value)?;
            let list = env
                .get(container)
                .ok_or_else(|| Error::name(container.clone()))?
                .clone();
            let mut items = match list {
                Value::List(items) => items,
                other => {
                    return Err(Error::type_error(format!(
                        "'{}' is not subscriptable (it is a {})",
                        container,
                        other.type_name()
                    )))
                }
            };
            let slot = items.get_mut(idx).ok_or_else(|| {
                Error::index(format!(
                    "index {idx} out of range for '{container}' (length {})",
                    items.len()
                ))
            })?;
            *slot = value;
            env.set(container.clone(), Value::List(items));
            Ok(())
        }
    }
}

/// Evaluates an expression. `Subscript` returns the stored element
/// directly rather than calling `eval_expr` on it again — the stored
/// value is already a `Value`, not an `Expr`, so there is nothing left
/// to evaluate (§9).
pub fn eval_expr(expr: &Expr, env: &Environment) -> Result<Value> {
    match expr {
        Expr::Num(Number::Int(n)) => Ok(Value::Int(*n)),
        Expr::Num(Number::Float(x)) => Ok(Value::Float(*x)),
        Expr::Str(s) => Ok(Value::Str(s.clone())),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::Name(name) => env
            .get(name)
            .cloned()
            .ok_or_else(|| Error::name(name.clone())),
        Expr::ListLit(items) => {
            let values = items
                .iter()
                .map(|item| eval_expr(item, env))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::List(values))
        }
        Expr::Subscript { container, index } => {
            let index_value = eval_expr(index, env)?;
            let idx = require_index(&index_value)?;
            match env.get(container) {
                Some(Value::List(items)) => items.get(idx).cloned().ok_or_else(|| {
                    Error::index(format!(
                        "index {idx} out of range for '{container}' (length {})",
                        items.len()
                    ))
                }),
                Some(other) => Err(Error::type_error(format!(
                    "'{}' is not subscriptable (it is a {})",
                    container,
                    other.type_name()
                ))),
                None => Err(Error::name(container.clone())),
            }
        }
        Expr::BinOp { left, op, right } => {
            let lhs = eval_expr(left, env)?;
            let rhs = eval_expr(right, env)?;
            eval_arith(*op, lhs, rhs)
        }
        Expr::BoolOp { op, left, right } => {
            let lhs = eval_expr(left, env)?;
            let rhs = eval_expr(right, env)?;
            eval_bool(*op, lhs, rhs)
        }
    }
}

fn require_index(value: &Value) -> Result<usize> {
    match value {
        Value::Int(n) if *n >= 0 => Ok(*n as usize),
        Value::Int(n) => Err(Error::index(format!("negative index {n} is not supported"))),
        other => Err(Error::type_error(format!(
            "list index must be an int, not {}",
            other.type_name()
        ))),
    }
}

fn eval_arith(op: ArithOp, lhs: Value, rhs: Value) -> Result<Value> {
    match op {
        ArithOp::Add => eval_add(lhs, rhs),
        ArithOp::Sub => eval_numeric(lhs, rhs, "-", |a, b| a - b, i64::wrapping_sub),
        ArithOp::Mul => eval_mul(lhs, rhs),
        ArithOp::Div => eval_true_div(lhs, rhs),
        ArithOp::FloorDiv => eval_floor_div(lhs, rhs),
        ArithOp::Mod => eval_mod(lhs, rhs),
    }
}

fn eval_add(lhs: Value, rhs: Value) -> Result<Value> {
    match (lhs, rhs) {
        (Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
        (a, b) if a.is_numeric() && b.is_numeric() => {
            eval_numeric(a, b, "+", |x, y| x + y, i64::wrapping_add)
        }
        (a, b) => Err(Error::type_error(format!(
            "unsupported operand types for +: {} and {}",
            a.type_name(),
            b.type_name()
        ))),
    }
}

/// `*` is restricted to `numeric * numeric`, `text * int`, and
/// `int * text` — `list * text` is deliberately excluded (§9).
fn eval_mul(lhs: Value, rhs: Value) -> Result<Value> {
    match (lhs, rhs) {
        (Value::Str(s), Value::Int(n)) | (Value::Int(n), Value::Str(s)) => {
            if n < 0 {
                return Err(Error::type_error("cannot repeat text a negative number of times"));
            }
            Ok(Value::Str(s.repeat(n as usize)))
        }
        (a, b) if a.is_numeric() && b.is_numeric() => {
            eval_numeric(a, b, "*", |x, y| x * y, i64::wrapping_mul)
        }
        (a, b) => Err(Error::type_error(format!(
            "unsupported operand types for *: {} and {}",
            a.type_name(),
            b.type_name()
        ))),
    }
}

fn eval_true_div(lhs: Value, rhs: Value) -> Result<Value> {
    let (a, b) = require_numeric_pair(&lhs, &rhs, "/")?;
    if b == 0.0 {
        return Err(Error::type_error("division by zero"));
    }
    Ok(Value::Float(a / b))
}

fn eval_floor_div(lhs: Value, rhs: Value) -> Result<Value> {
    if let (Value::Int(a), Value::Int(b)) = (&lhs, &rhs) {
        if *b == 0 {
            return Err(Error::type_error("division by zero"));
        }
        return Ok(Value::Int(floor_div_i64(*a, *b)));
    }
    let (a, b) = require_numeric_pair(&lhs, &rhs, "//")?;
    if b == 0.0 {
        return Err(Error::type_error("division by zero"));
    }
    Ok(Value::Float((a / b).floor()))
}

fn eval_mod(lhs: Value, rhs: Value) -> Result<Value> {
    if let (Value::Int(a), Value::Int(b)) = (&lhs, &rhs) {
        if *b == 0 {
            return Err(Error::type_error("division by zero"));
        }
        return Ok(Value::Int(floor_mod_i64(*a, *b)));
    }
    let (a, b) = require_numeric_pair(&lhs, &rhs, "%")?;
    if b == 0.0 {
        return Err(Error::type_error("division by zero"));
    }
    Ok(Value::Float(a - b * (a / b).floor()))
}

/// Floor division: the quotient rounded toward negative infinity, not
/// toward zero — `7 // -2 == -4`, where `7 / -2` truncated is `-3`.
fn floor_div_i64(a: i64, b: i64) -> i64 {
    let q = a.wrapping_div(b);
    let r = a.wrapping_rem(b);
    if r != 0 && (r < 0) != (b < 0) {
        q - 1
    } else {
        q
    }
}

/// Floor-mod: the remainder takes the divisor's sign — `7 % -2 == -1`.
fn floor_mod_i64(a: i64, b: i64) -> i64 {
    let r = a.wrapping_rem(b);
    if r != 0 && (r < 0) != (b < 0) {
        r + b
    } else {
        r
    }
}

fn require_numeric_pair(lhs: &Value, rhs: &Value, op: &str) -> Result<(f64, f64)> {
    match (lhs.as_f64(), rhs.as_f64()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(Error::type_error(format!(
            "unsupported operand types for {op}: {} and {}",
            lhs.type_name(),
            rhs.type_name()
        ))),
    }
}

/// Shared int/float promotion: if both sides are `Int`, applies
/// `int_op`; otherwise promotes both to `f64` and applies `float_op`.
fn eval_numeric(
    lhs: Value,
    rhs: Value,
    op_name: &str,
    float_op: impl Fn(f64, f64) -> f64,
    int_op: impl Fn(i64, i64) -> i64,
) -> Result<Value> {
    match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(int_op(*a, *b))),
        _ => {
            let (a, b) = require_numeric_pair(&lhs, &rhs, op_name)?;
            Ok(Value::Float(float_op(a, b)))
        }
    }
}

fn eval_bool(op: BoolOp, lhs: Value, rhs: Value) -> Result<Value> {
    match op {
        BoolOp::And => Ok(Value::Bool(lhs.is_truthy() && rhs.is_truthy())),
        BoolOp::Or => Ok(Value::Bool(lhs.is_truthy() || rhs.is_truthy())),
        BoolOp::Eq => Ok(Value::Bool(values_equal(&lhs, &rhs))),
        BoolOp::NotEq => Ok(Value::Bool(!values_equal(&lhs, &rhs))),
        BoolOp::Lt | BoolOp::LtEq | BoolOp::Gt | BoolOp::GtEq => eval_ordering(op, lhs, rhs),
    }
}

fn values_equal(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (a, b) if a.is_numeric() && b.is_numeric() => a.as_f64() == b.as_f64(),
        _ => lhs == rhs,
    }
}

fn eval_ordering(op: BoolOp, lhs: Value, rhs: Value) -> Result<Value> {
    let ordering = match (&lhs, &rhs) {
        (a, b) if a.is_numeric() && b.is_numeric() => {
            a.as_f64().unwrap().partial_cmp(&b.as_f64().unwrap())
        }
        (Value::Str(a), Value::Str(b)) => a.partial_cmp(b),
        _ => {
            return Err(Error::type_error(format!(
                "'{}' not supported between instances of '{}' and '{}'",
                op, lhs.type_name(), rhs.type_name()
            )))
        }
    };
    let ordering = ordering.ok_or_else(|| Error::type_error("unorderable values (NaN)"))?;
    let result = match op {
        BoolOp::Lt => ordering.is_lt(),
        BoolOp::LtEq => ordering.is_le(),
        BoolOp::Gt => ordering.is_gt(),
        BoolOp::GtEq => ordering.is_ge(),
        _ => unreachable!("only ordering comparisons reach eval_ordering"),
    };
    Ok(Value::Bool(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stmt_parser::parse_source;

    fn run_source(source: &str) -> RunOutcome {
        let module = parse_source(source).unwrap();
        run(&module).unwrap()
    }

    #[test]
    fn arithmetic_precedence_evaluates_correctly() {
        let outcome = run_source("Define x as (2 + 3) * 4; Print x;");
        assert_eq!(outcome.output, vec!["20"]);
    }

    #[test]
    fn while_loop_counts_up() {
        let outcome = run_source(
            "Define x as 0; While (x is less than 3) { Print x; Define x as x + 1; }",
        );
        assert_eq!(outcome.output, vec!["0", "1", "2"]);
    }

    #[test]
    fn if_else_if_else_picks_matching_branch() {
        let outcome = run_source(
            "Define x as 2; If (x is equal to 1) { Print \"one\"; } Else If (x is equal to 2) { Print \"two\"; } Else { Print \"other\"; }",
        );
        assert_eq!(outcome.output, vec!["two"]);
    }

    #[test]
    fn and_or_do_not_short_circuit_but_still_produce_boolean_result() {
        let outcome = run_source("Define x as (1 is equal to 1) and (2 is equal to 3); Print x;");
        assert_eq!(outcome.output, vec!["false"]);
    }

    #[test]
    fn subscript_assignment_mutates_stored_list() {
        let outcome = run_source("Define xs as [1, 2, 3]; Define xs[1] as 9; Print xs;");
        assert_eq!(outcome.output, vec!["[1, 9, 3]"]);
    }

    #[test]
    fn subscript_out_of_range_is_an_index_error() {
        let module = parse_source("Define xs as [1]; Print xs[5];").unwrap();
        assert!(matches!(run(&module), Err(Error::Index(_))));
    }

    #[test]
    fn undefined_name_is_a_name_error() {
        let module = parse_source("Print missing;").unwrap();
        assert!(matches!(run(&module), Err(Error::Name(_))));
    }

    #[test]
    fn multiplying_list_by_text_is_a_type_error() {
        let module =
            parse_source(r#"Define xs as [1, 2]; Define bad as xs * "x"; Print bad;"#).unwrap();
        assert!(matches!(run(&module), Err(Error::Type(_))));
    }

    #[test]
    fn text_times_int_repeats_the_text() {
        let outcome = run_source(r#"Define s as "ab" * 3; Print s;"#);
        assert_eq!(outcome.output, vec!["ababab"]);
    }

    #[test]
    fn true_division_always_yields_float() {
        let outcome = run_source("Define x as 7 / 2; Print x;");
        assert_eq!(outcome.output, vec!["3.5"]);
    }

    #[test]
    fn floor_division_on_ints_stays_int() {
        let outcome = run_source("Define x as 7 // 2; Print x;");
        assert_eq!(outcome.output, vec!["3"]);
    }

    #[test]
    fn floor_division_rounds_toward_negative_infinity_for_negative_divisor() {
        let outcome = run_source("Define x as 7 // -2; Print x;");
        assert_eq!(outcome.output, vec!["-4"]);
    }

    #[test]
    fn modulo_takes_the_sign_of_the_divisor() {
        let outcome = run_source("Define x as 7 % -2; Print x;");
        assert_eq!(outcome.output, vec!["-1"]);
    }

    #[test]
    fn list_plus_list_is_a_type_error() {
        let module = parse_source("Define x as [1] + [2]; Print x;").unwrap();
        assert!(matches!(run(&module), Err(Error::Type(_))));
    }
}
