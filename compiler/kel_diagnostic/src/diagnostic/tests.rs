use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_builder_collects_labels_and_notes() {
    let diag = Diagnostic::error(ErrorCode::E6001)
        .with_message("unbound symbol: foo")
        .with_secondary_label(Span::new(0, 10), "in this call")
        .with_label(Span::new(1, 4), "not bound")
        .with_note("symbols are bound by the host or by `define`");

    assert_eq!(diag.primary_span(), Some(Span::new(1, 4)));
    assert_eq!(diag.labels.len(), 2);
    assert_eq!(diag.notes.len(), 1);
}

#[test]
fn test_display() {
    let diag = Diagnostic::error(ErrorCode::E1003)
        .with_message("unexpected end of input")
        .with_label(Span::new(0, 1), "list opened here");
    assert_eq!(
        diag.to_string(),
        "error[E1003]: unexpected end of input\n  --> 0..1: list opened here"
    );
}

#[test]
fn test_code_phases() {
    assert!(ErrorCode::E0001.is_lexical());
    assert!(ErrorCode::E1004.is_syntax());
    assert!(ErrorCode::E6099.is_runtime());
    assert!(!ErrorCode::E6001.is_lexical());
}
