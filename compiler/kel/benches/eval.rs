#![allow(clippy::expect_used)]

//! Evaluator benchmarks.
//!
//! Measures lexing a large source, a flat loop of native calls, and deep
//! recursion through the frame stack.

use std::hint::black_box;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use kel::{silent_handler, Config, Session, Value};

fn generate_calls(n: usize) -> String {
    (0..n)
        .map(|i| format!("(+ {i} (- {i} 1) 0x{i:x})"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_lexer(c: &mut Criterion) {
    let source = generate_calls(1_000);
    c.bench_function("lexer/1000_calls", |b| {
        b.iter(|| black_box(kel_lexer::lex(black_box(&source))));
    });
}

fn bench_flat_calls(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval/flat_calls");
    for n in [10, 100, 1_000] {
        let source = generate_calls(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &source, |b, source| {
            b.iter(|| {
                let mut session = Session::with_config(Config::default(), silent_handler())
                    .expect("session");
                black_box(session.run(source).expect("run"));
            });
        });
    }
    group.finish();
}

fn bench_deep_recursion(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval/deep_recursion");
    group.sample_size(20);
    for depth in [1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut session = Session::with_config(Config::default(), silent_handler())
                    .expect("session");
                let left = Arc::new(AtomicUsize::new(depth));
                session
                    .define_native("more", move |_call| {
                        let more = left.fetch_sub(1, Ordering::Relaxed) > 0;
                        Ok(if more { Value::Int(1) } else { Value::Nil })
                    })
                    .expect("define");
                session
                    .run("(define 'deep '(if (more) (deep) 0))")
                    .expect("define");
                black_box(session.run("(deep)").expect("run"));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lexer, bench_flat_calls, bench_deep_recursion);
criterion_main!(benches);
