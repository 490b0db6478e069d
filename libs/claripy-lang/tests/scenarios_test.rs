//! Integration tests for the six concrete scenarios: each one parses a
//! ClariPy program, runs it, and checks printed stdout plus the final
//! environment (or the error raised).

use claripy_lang::engine::run;
use claripy_lang::stmt_parser::parse_source;
use claripy_lang::value::Value;
use claripy_lang::Error;

#[test]
fn arithmetic_precedence() {
    let module = parse_source("Define x as (2 + 3) * 4; Print x;").unwrap();
    let outcome = run(&module).unwrap();
    assert_eq!(outcome.output, vec!["20"]);
    assert_eq!(outcome.env.get("x"), Some(&Value::Int(20)));
}

#[test]
fn while_loop_with_compound_update() {
    let module =
        parse_source("Define x as 0; While (x is less than 5) { Define x as x + 1; } Print x;")
            .unwrap();
    let outcome = run(&module).unwrap();
    assert_eq!(outcome.output, vec!["5"]);
    assert_eq!(outcome.env.get("x"), Some(&Value::Int(5)));
}

#[test]
fn if_else_if_chain_picks_second_branch() {
    let module = parse_source(
        r#"Define x as 2; If (x is equal to 1) { Print "a"; } Else If (x is equal to 2) { Print "b"; } Else { Print "c"; }"#,
    )
    .unwrap();
    let outcome = run(&module).unwrap();
    assert_eq!(outcome.output, vec!["b"]);
}

#[test]
fn list_index_read_and_write() {
    let module =
        parse_source("Define xs as [10, 20, 30]; Define xs[1] as 99; Print xs[1];").unwrap();
    let outcome = run(&module).unwrap();
    assert_eq!(outcome.output, vec!["99"]);
    assert_eq!(
        outcome.env.get("xs"),
        Some(&Value::List(vec![Value::Int(10), Value::Int(99), Value::Int(30)]))
    );
}

#[test]
fn subtracting_from_text_is_a_type_error_with_no_output() {
    let module = parse_source(r#"Define x as "a" - 1;"#).unwrap();
    let err = run(&module).unwrap_err();
    assert!(matches!(err, Error::Type(_)));
}

#[test]
fn printing_an_undefined_name_is_a_name_error() {
    let module = parse_source("Print y;").unwrap();
    let err = run(&module).unwrap_err();
    assert!(matches!(err, Error::Name(_)));
}
