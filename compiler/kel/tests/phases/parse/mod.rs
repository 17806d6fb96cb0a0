//! Lexer and parser behavior seen from outside the crates.

use kel_ir::{Position, Span};
use kel_lexer::{Lexer, TokenKind, Trivia};
use kel_object::{BudgetProvider, HostRefSet, Runtime, Value};
use kel_parse::{ParseErrorKind, Parser};
use pretty_assertions::assert_eq;

fn parse(rt: &mut Runtime, source: &str) -> Result<Vec<Value>, kel_parse::ParseError> {
    let mut lexer = Lexer::new(source).unwrap();
    let mut protect = HostRefSet::new();
    let program = Parser::new(rt).parse_program(&mut lexer, &mut protect)?;
    Ok(rt.list(program.object()).unwrap().to_vec())
}

#[test]
fn test_token_stream_with_trivia() {
    let mut lexer = Lexer::new("(a // note\n 'b)").unwrap();
    let mut kinds = Vec::new();
    loop {
        let token = lexer.next_token(Trivia::all());
        if token.kind == TokenKind::Eof {
            break;
        }
        kinds.push(token.kind.name());
    }
    assert_eq!(
        kinds,
        vec!["(", "identifier", "whitespace", "comment", "newline", "whitespace", "'", "identifier", ")"]
    );
}

#[test]
fn test_positions_are_zero_based() {
    let mut lexer = Lexer::new("\n  (x)").unwrap();
    let token = lexer.next_token(Trivia::empty());
    assert_eq!(token.kind, TokenKind::LParen);
    assert_eq!(token.span, Span::new(3, 4));
    assert_eq!(token.location.begin, Position { line: 1, column: 2 });
}

#[test]
fn test_nested_structure() {
    let mut rt = Runtime::new();
    let forms = parse(&mut rt, "(a (b 1) \"s\") 2.5 'q").unwrap();
    assert_eq!(forms.len(), 3);
    assert_eq!(rt.repr(forms[0]).to_string(), "(a (b 1) \"s\")");
    assert_eq!(forms[1], Value::Double(2.5));
    assert_eq!(rt.repr(forms[2]).to_string(), "'q");
}

#[test]
fn test_failed_parse_releases_protection() {
    let mut rt = Runtime::new();
    let before = rt.object_count();
    let err = parse(&mut rt, "(a (b \"c\" (d)").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::UnexpectedEof { .. }));
    assert!(rt.object_count() > before);
    for index in before..rt.object_count() {
        let r = kel_object::ObjectRef::from_raw(u32::try_from(index).unwrap());
        assert_eq!(rt.host_ref_count(r), Some(0), "object {index} still protected");
    }
}

#[test]
fn test_budget_exhausted_while_parsing() {
    let mut rt = Runtime::with_provider(BudgetProvider::new(256));
    let source = format!("(f \"{}\")", "x".repeat(4096));
    let err = parse(&mut rt, &source).unwrap_err();
    let ParseErrorKind::Allocation(inner) = err.kind else {
        panic!("expected an allocation failure, got {err}");
    };
    assert!(matches!(inner.kind, kel_object::EvalErrorKind::OutOfMemory { .. }));
    assert!(rt.allocated_bytes() <= 256);
}
