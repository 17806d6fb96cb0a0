//! Shared helpers for phase tests.

use kel::{buffer_handler, ColorMode, Config, Problem, Session, Value};

/// A session that prints into a buffer and renders without color.
pub fn session() -> Session {
    session_with(Config {
        color: ColorMode::Never,
        ..Config::default()
    })
}

pub fn session_with(config: Config) -> Session {
    kel::init_tracing();
    Session::with_config(config, buffer_handler()).unwrap()
}

/// Run `source` in a fresh session; returns the readable result and
/// everything printed.
pub fn run(source: &str) -> (String, String) {
    let mut s = session();
    let value: Value = s.run(source).unwrap();
    (s.repr(value), s.output().get_output())
}

/// Run `source` in a fresh session, expecting it to fail.
pub fn fail(source: &str) -> Problem {
    session().run(source).unwrap_err()
}
