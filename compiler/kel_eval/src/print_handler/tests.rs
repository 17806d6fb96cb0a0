#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_buffer_collects_print_and_println() {
    let handler = buffer_handler();
    handler.print("a");
    handler.print(" ");
    handler.println("b");
    assert_eq!(handler.get_output(), "a b\n");
}

#[test]
fn test_take_output_drains() {
    let handler = buffer_handler();
    handler.println("one");
    assert_eq!(handler.take_output(), "one\n");
    assert_eq!(handler.get_output(), "");
    handler.print("two");
    handler.clear();
    assert_eq!(handler.get_output(), "");
}

#[test]
fn test_non_capturing_handlers() {
    for handler in [silent_handler(), stdout_handler()] {
        handler.print("");
        assert_eq!(handler.get_output(), "");
        assert_eq!(handler.take_output(), "");
        handler.clear();
    }
}

#[test]
fn test_buffer_shared_across_threads() {
    let handler = buffer_handler();
    let other = Arc::clone(&handler);
    let worker = std::thread::spawn(move || {
        for _ in 0..100 {
            other.println("a");
        }
    });
    for _ in 0..100 {
        handler.println("b");
    }
    worker.join().unwrap();
    assert_eq!(handler.get_output().lines().count(), 200);
}
