#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::EvalErrorKind;
use pretty_assertions::assert_eq;

#[test]
fn test_argument_helpers() {
    let mut rt = Runtime::new();
    let mut bindings = Bindings::new();
    let s = rt.alloc_string("text").unwrap();
    let sym = rt.alloc_symbol("name").unwrap();
    let args = [s.value(), sym.value().quoted(), Value::Short(-4)];

    let call = NativeCall::new(&mut rt, &mut bindings, &args, "f", None);
    assert_eq!(call.args().len(), 3);
    assert_eq!(call.string_arg(0).unwrap(), "text");
    assert_eq!(call.symbol_arg(1).unwrap(), "name");
    assert_eq!(call.int_arg(2).unwrap(), -4);
    assert_eq!(call.name(), "f");
    assert!(call.expect_arity(Arity::Exactly(3)).is_ok());
}

#[test]
fn test_argument_errors() {
    let mut rt = Runtime::new();
    let mut bindings = Bindings::new();
    let args = [Value::Double(1.0)];
    let call = NativeCall::new(&mut rt, &mut bindings, &args, "g", None);

    let err = call.string_arg(0).unwrap_err();
    assert_eq!(err.message, "type mismatch: expected string, got f64");

    let err = call.arg(2).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ArityMismatch {
            name: "g".into(),
            expected: Arity::AtLeast(3),
            got: 1,
        }
    );

    let err = call.expect_arity(Arity::Exactly(0)).unwrap_err();
    assert_eq!(err.message, "g expects 0 arguments, got 1");
}

#[test]
fn test_stateful_native_through_shared_callback() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    let hits = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&hits);
    let mut rt = Runtime::new();
    let f = rt
        .alloc_native("count", move |_call| {
            Ok(Value::ULong(seen.fetch_add(1, Ordering::Relaxed) as u64 + 1))
        })
        .unwrap();

    let callback = rt.native(f.object()).unwrap().callback();
    let mut bindings = Bindings::new();
    let mut call = NativeCall::new(&mut rt, &mut bindings, &[], "count", None);
    assert_eq!(callback.call(&mut call).unwrap(), Value::ULong(1));
    assert_eq!(callback.call(&mut call).unwrap(), Value::ULong(2));
    assert_eq!(hits.load(Ordering::Relaxed), 2);
}

#[test]
fn test_bindings_hold_a_reference() {
    let mut rt = Runtime::new();
    let mut bindings = Bindings::new();
    let sym = rt.alloc_symbol("v").unwrap();
    assert!(bindings.define("v", sym.clone()).is_none());
    assert_eq!(sym.count(), 2);
    assert_eq!(bindings.lookup("v"), Some(sym.object()));
    assert!(bindings.contains("v"));
    assert_eq!(bindings.names().collect::<Vec<_>>(), vec!["v"]);

    let old = bindings.remove("v").unwrap();
    drop(old);
    assert_eq!(sym.count(), 1);
    assert!(bindings.is_empty());
}
