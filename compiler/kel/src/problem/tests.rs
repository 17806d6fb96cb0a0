#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use kel_ir::{Position, Span};
use kel_object::{not_callable, recursion_limit_exceeded, BacktraceFrame, EvalBacktrace};
use pretty_assertions::assert_eq;

fn lex_problem(source: &str) -> Problem {
    Problem::from(kel_lexer::lex(source).unwrap_err())
}

#[test]
fn test_lex_codes() {
    assert_eq!(lex_problem("\"open").code(), ErrorCode::E0001);
    assert_eq!(lex_problem("\u{1}").code(), ErrorCode::E0002);
    assert_eq!(lex_problem("300u8").code(), ErrorCode::E0003);
    assert_eq!(lex_problem("\"\\q\"").code(), ErrorCode::E0005);
    assert_eq!(lex_problem("/* open").code(), ErrorCode::E0006);
}

#[test]
fn test_problem_display_is_phase_error() {
    let err = kel_lexer::lex("\"open").unwrap_err();
    let text = err.to_string();
    assert_eq!(Problem::from(err).to_string(), text);
}

#[test]
fn test_eval_codes() {
    let cases = [
        (kel_object::unbound_symbol("x"), ErrorCode::E6001),
        (not_callable("string"), ErrorCode::E6002),
        (
            kel_object::arity_mismatch("f", kel_object::Arity::Exactly(1), 0),
            ErrorCode::E6003,
        ),
        (kel_object::type_mismatch("number", "string"), ErrorCode::E6004),
        (kel_object::invalid_special_form("if", "bad"), ErrorCode::E6005),
        (recursion_limit_exceeded(10), ErrorCode::E6006),
        (kel_object::out_of_memory(8, 0, Some(4)), ErrorCode::E6007),
        (EvalError::new("custom"), ErrorCode::E6099),
    ];
    for (err, code) in cases {
        assert_eq!(Problem::from(err).code(), code);
    }
}

#[test]
fn test_parse_allocation_uses_memory_code() {
    let err = ParseError {
        kind: ParseErrorKind::Allocation(kel_object::out_of_memory(64, 0, Some(32))),
        message: "out of memory".to_string(),
        span: Span::new(0, 1),
        position: Position::default(),
    };
    assert_eq!(Problem::from(err).code(), ErrorCode::E6007);
}

#[test]
fn test_eval_diagnostic_lists_callers() {
    let source = "(a\n  (b))";
    let index = LineIndex::build(source);
    let err = recursion_limit_exceeded(2)
        .with_span(Span::new(5, 8))
        .with_backtrace(EvalBacktrace::new(vec![
            BacktraceFrame {
                name: "b".to_string(),
                span: Some(Span::new(5, 8)),
            },
            BacktraceFrame {
                name: "a".to_string(),
                span: Some(Span::new(0, 9)),
            },
        ]));
    let diag = Problem::from(err).to_diagnostic(&index);
    assert_eq!(diag.code, ErrorCode::E6006);
    assert_eq!(diag.primary_span(), Some(Span::new(5, 8)));
    assert_eq!(diag.notes.len(), 2);
    assert_eq!(diag.notes[1], "called from `a` at 1:1");
}

#[test]
fn test_eval_without_span_has_no_label() {
    let diag = Problem::from(not_callable("i32")).to_diagnostic(&LineIndex::build(""));
    assert!(diag.labels.is_empty());
    assert_eq!(diag.message, "i32 is not callable");
}
