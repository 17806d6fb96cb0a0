#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::errors::EvalErrorKind;
use crate::buffer_handler;
use kel_lexer::Lexer;
use kel_object::HostRefSet;
use kel_parse::Parser;
use pretty_assertions::assert_eq;

/// Evaluate `source` with the prelude installed; returns the result's repr
/// and everything printed.
fn eval(source: &str) -> (Result<String, EvalError>, String) {
    let mut rt = Runtime::new();
    let output = buffer_handler();
    let program = {
        let mut lexer = Lexer::new(source).unwrap();
        let mut protect = HostRefSet::new();
        Parser::new(&mut rt)
            .parse_program(&mut lexer, &mut protect)
            .unwrap()
    };
    let mut ctx = Context::new(&mut rt);
    install(&mut ctx, &output).unwrap();
    let result = ctx
        .eval_program(program.object())
        .map(|value| ctx.runtime().repr(value).to_string());
    (result, output.get_output())
}

fn value(source: &str) -> String {
    eval(source).0.unwrap()
}

fn error(source: &str) -> EvalErrorKind {
    eval(source).0.unwrap_err().kind
}

#[test]
fn test_print_and_println() {
    let (result, out) = eval("(print \"a\" 1 'b) (println) (println \"x\" 2.5)");
    assert_eq!(result.unwrap(), "()");
    assert_eq!(out, "a 1 b\nx 2.5\n");
}

#[test]
fn test_print_nested_values() {
    let (_, out) = eval("(println (list 1 \"two\" 'three (list)))");
    assert_eq!(out, "(1 two three ())\n");
}

#[test]
fn test_list_builds_new_list() {
    assert_eq!(value("(list 1 (list 2 3) \"s\")"), "(1 (2 3) \"s\")");
    assert_eq!(value("(list)"), "()");
}

#[test]
fn test_addition() {
    assert_eq!(value("(+)"), "0");
    assert_eq!(value("(+ 1 2 3)"), "6");
    assert_eq!(value("(+ 1 2i64)"), "3i64");
    assert_eq!(value("(+ 2147483647 1)"), "2147483648i64");
    assert_eq!(value("(+ 1 0.5)"), "1.5");
    assert_eq!(value("(+ (+ 1 2) (+ 3 4))"), "10");
}

#[test]
fn test_subtraction() {
    assert_eq!(value("(- 5)"), "-5");
    assert_eq!(value("(- 10 3 2)"), "5");
    assert_eq!(value("(- 1 1.5)"), "-0.5");
    assert!(matches!(error("(-)"), EvalErrorKind::ArityMismatch { .. }));
}

#[test]
fn test_arithmetic_errors() {
    assert!(matches!(
        error("(+ 1 \"x\")"),
        EvalErrorKind::TypeMismatch { .. }
    ));
    assert!(matches!(
        error("(+ 9223372036854775807i64 1)"),
        EvalErrorKind::Custom { .. }
    ));
}

#[test]
fn test_equality() {
    assert_eq!(value("(= 1 1)"), "1");
    assert_eq!(value("(= 1 1i64 1u8)"), "1");
    assert_eq!(value("(= 1 2)"), "()");
    assert_eq!(value("(= 1.5 1.5f)"), "1");
    assert_eq!(value("(= \"a\" \"a\")"), "1");
    assert_eq!(value("(= 'a 'a)"), "1");
    assert_eq!(value("(= 'a \"a\")"), "()");
    assert_eq!(value("(= () ())"), "1");
    assert!(matches!(error("(= 1)"), EvalErrorKind::ArityMismatch { .. }));
}

#[test]
fn test_less_than_chain() {
    assert_eq!(value("(< 1 2 3)"), "1");
    assert_eq!(value("(< 1 3 2)"), "()");
    assert_eq!(value("(< 1 1)"), "()");
    assert_eq!(value("(< (- 1) 0.5)"), "1");
    assert!(matches!(
        error("(< 1 'a)"),
        EvalErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn test_define_binds_objects() {
    let (result, out) = eval("(define 'greeting \"hi\") (println (greeting))");
    assert!(result.is_err());
    assert_eq!(out, "");

    assert_eq!(value("(define 'xs (list 1 2))"), "(1 2)");
}

#[test]
fn test_define_user_callable() {
    let (result, out) = eval(
        "(define 'hello '(println \"hello\"))\n\
         (hello)\n\
         (hello)",
    );
    assert_eq!(result.unwrap(), "()");
    assert_eq!(out, "hello\nhello\n");
}

#[test]
fn test_define_requires_object() {
    assert!(matches!(
        error("(define 'x 5)"),
        EvalErrorKind::TypeMismatch { .. }
    ));
    assert!(matches!(
        error("(define \"x\" (list))"),
        EvalErrorKind::TypeMismatch { .. }
    ));
    assert!(matches!(
        error("(define 'x)"),
        EvalErrorKind::ArityMismatch { .. }
    ));
}

#[test]
fn test_user_function_with_if() {
    let source = "\
        (define 'check '(if (< (+) 1) 'done))\n\
        (check)";
    assert_eq!(value(source), "done");
}

#[test]
fn test_define_list_built_at_runtime() {
    let (result, out) = eval(
        "(define 'greet (list 'println \"hi\"))\n\
         (greet)",
    );
    assert_eq!(result.unwrap(), "()");
    assert_eq!(out, "hi\n");
}

#[test]
fn test_list_elements_lose_quote() {
    assert_eq!(value("(list 'a '(b c) 1)"), "(a (b c) 1)");
}
