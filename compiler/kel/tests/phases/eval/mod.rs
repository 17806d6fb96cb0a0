//! Whole programs through a session.

use kel::{Config, ErrorCode, Problem, Value};
use pretty_assertions::assert_eq;

use crate::common::{fail, run, session, session_with};

#[test]
fn test_hello() {
    let (value, out) = run("(println \"hello, world\")");
    assert_eq!(value, "()");
    assert_eq!(out, "hello, world\n");
}

#[test]
fn test_evaluation_order_is_visible_in_output() {
    let (_, out) = run("(print 1 (print 2) (print 3))");
    assert_eq!(out, "231 () ()");
}

#[test]
fn test_quoting() {
    assert_eq!(run("'x").0, "'x");
    assert_eq!(run("'(1 2)").0, "'(1 2)");
    assert_eq!(run("(list '(+ 1 2) (+ 1 2))").0, "((+ 1 2) 3)");
}

#[test]
fn test_list_built_form_runs_when_called() {
    let (value, out) = run("(define 'g (list 'println \"hi\")) (g)");
    assert_eq!(value, "()");
    assert_eq!(out, "hi\n");
}

#[test]
fn test_conditionals() {
    assert_eq!(run("(if (< 1 2) 'less 'more)").0, "less");
    assert_eq!(run("(if (= 1 2) 'same)").0, "()");
    let (_, out) = run("(if (list) (println \"yes\") (println \"no\"))");
    assert_eq!(out, "yes\n");
}

#[test]
fn test_user_callable_counts_down() {
    let mut s = session();
    s.define_native("next", {
        let left = std::sync::atomic::AtomicI64::new(5);
        move |_call| {
            let n = left.fetch_sub(1, std::sync::atomic::Ordering::Relaxed);
            Ok(if n > 0 { Value::Long(n) } else { Value::Nil })
        }
    })
    .unwrap();
    s.run("(define 'countdown '(if (next) (countdown) 'liftoff))").unwrap();
    let value = s.run("(countdown)").unwrap();
    assert_eq!(s.repr(value), "liftoff");
}

#[test]
fn test_deep_recursion() {
    let mut s = session();
    s.define_native("more", {
        let left = std::sync::atomic::AtomicUsize::new(100_000);
        move |_call| {
            let more = left.fetch_sub(1, std::sync::atomic::Ordering::Relaxed) > 0;
            Ok(if more { Value::Int(1) } else { Value::Nil })
        }
    })
    .unwrap();
    s.run("(define 'deep '(if (more) (deep) 'bottom))").unwrap();
    let value = s.run("(deep)").unwrap();
    assert_eq!(s.repr(value), "bottom");
}

#[test]
fn test_runaway_recursion_is_reported() {
    let mut s = session_with(Config {
        max_depth: Some(64),
        ..Config::default()
    });
    let problem = s.run("(define 'f '(f)) (f)").unwrap_err();
    assert_eq!(problem.code(), ErrorCode::E6006);
    let Problem::Eval(err) = problem else {
        panic!("expected a runtime error");
    };
    assert_eq!(err.backtrace.unwrap().len(), 32);
}

#[test]
fn test_error_codes_by_phase() {
    assert_eq!(fail("(print \"open").code(), ErrorCode::E0001);
    assert_eq!(fail("(print (list)").code(), ErrorCode::E1003);
    assert_eq!(fail(")").code(), ErrorCode::E1002);
    assert_eq!(fail("(nope)").code(), ErrorCode::E6001);
    assert_eq!(fail("(1)").code(), ErrorCode::E6002);
    assert_eq!(fail("(define 'x)").code(), ErrorCode::E6003);
    assert_eq!(fail("(+ 'a)").code(), ErrorCode::E6004);
    assert_eq!(fail("(if)").code(), ErrorCode::E6005);
}

#[test]
fn test_memory_budget() {
    let baseline = session().runtime().allocated_bytes();
    let mut s = session_with(Config {
        memory_limit: Some(baseline + 1024),
        ..Config::default()
    });
    assert!(s.run("(list 1 2 3)").is_ok());
    let before = s.runtime().allocated_bytes();
    let source = format!("(println \"{}\")", "x".repeat(8192));
    let problem = s.run(&source).unwrap_err();
    assert_eq!(problem.code(), ErrorCode::E6007);
    assert!(s.runtime().allocated_bytes() <= baseline + 1024);
    assert!(s.runtime().allocated_bytes() >= before);
    assert_eq!(s.output().get_output(), "");
}

#[test]
fn test_tiny_budget_rejects_prelude() {
    let problem = kel::Session::with_config(
        Config {
            memory_limit: Some(16),
            ..Config::default()
        },
        kel::buffer_handler(),
    )
    .unwrap_err();
    assert_eq!(problem.code(), ErrorCode::E6007);
}
