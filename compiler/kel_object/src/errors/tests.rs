use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_factory_message_matches_kind() {
    let err = unbound_symbol("undefined-symbol");
    assert_eq!(err.message, "unbound symbol: undefined-symbol");
    assert_eq!(err.message, err.kind.to_string());
    assert!(matches!(err.kind, EvalErrorKind::UnboundSymbol { ref name } if name == "undefined-symbol"));
}

#[test]
fn test_arity_messages() {
    assert_eq!(
        arity_mismatch("print", Arity::Exactly(1), 0).message,
        "print expects 1 argument, got 0"
    );
    assert_eq!(
        arity_mismatch("if", Arity::Between(2, 3), 4).message,
        "if expects 2 to 3 arguments, got 4"
    );
    assert_eq!(
        arity_mismatch("-", Arity::AtLeast(1), 0).message,
        "- expects at least 1 argument, got 0"
    );
}

#[test]
fn test_arity_accepts() {
    assert!(Arity::Exactly(2).accepts(2));
    assert!(!Arity::Exactly(2).accepts(3));
    assert!(Arity::AtLeast(1).accepts(9));
    assert!(!Arity::AtLeast(1).accepts(0));
    assert!(Arity::Between(2, 3).accepts(3));
    assert!(!Arity::Between(2, 3).accepts(1));
}

#[test]
fn test_or_span_keeps_existing() {
    let err = not_callable("string")
        .with_span(Span::new(1, 2))
        .or_span(Some(Span::new(0, 9)));
    assert_eq!(err.span, Some(Span::new(1, 2)));

    let err = EvalError::new("boom").or_span(Some(Span::new(0, 9)));
    assert_eq!(err.span, Some(Span::new(0, 9)));
    assert_eq!(err.kind, EvalErrorKind::Custom { message: "boom".into() });
}

#[test]
fn test_out_of_memory_message() {
    assert_eq!(
        out_of_memory(100, 40, Some(64)).to_string(),
        "out of memory: 100 bytes requested with 40 in use (limit: 64)"
    );
}

#[test]
fn test_backtrace_display() {
    let trace = EvalBacktrace::new(vec![
        BacktraceFrame {
            name: "loop".into(),
            span: Some(Span::new(10, 16)),
        },
        BacktraceFrame {
            name: "<list>".into(),
            span: None,
        },
    ]);
    assert_eq!(trace.len(), 2);
    assert_eq!(trace.to_string(), "backtrace:\n  0: loop at 10..16\n  1: <list>\n");
    assert_eq!(EvalBacktrace::default().to_string(), "");
}
