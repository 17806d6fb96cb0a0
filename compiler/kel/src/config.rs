//! Session configuration from the environment.

use kel_diagnostic::ColorMode;
use kel_eval::{EvalConfig, DEFAULT_MAX_DEPTH};

/// Settings for a [`Session`](crate::Session).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Cap on pending evaluation frames; `None` disables it.
    pub max_depth: Option<usize>,
    /// Byte budget for the runtime's objects; `None` is unbounded.
    pub memory_limit: Option<usize>,
    /// Color for rendered diagnostics.
    pub color: ColorMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            memory_limit: None,
            color: ColorMode::Auto,
        }
    }
}

impl Config {
    /// Read `KEL_MAX_DEPTH`, `KEL_MEMORY_LIMIT` and `KEL_COLOR`.
    ///
    /// Unset variables keep their defaults; malformed ones are logged and
    /// ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// As [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();

        if let Some(raw) = lookup("KEL_MAX_DEPTH") {
            match parse_limit(&raw) {
                Some(limit) => config.max_depth = limit,
                None => tracing::warn!(value = %raw, "ignoring malformed KEL_MAX_DEPTH"),
            }
        }
        if let Some(raw) = lookup("KEL_MEMORY_LIMIT") {
            match parse_limit(&raw) {
                Some(limit) => config.memory_limit = limit,
                None => tracing::warn!(value = %raw, "ignoring malformed KEL_MEMORY_LIMIT"),
            }
        }
        if let Some(raw) = lookup("KEL_COLOR") {
            match ColorMode::parse(raw.trim()) {
                Some(mode) => config.color = mode,
                None => tracing::warn!(value = %raw, "ignoring malformed KEL_COLOR"),
            }
        }

        config
    }

    pub fn eval_config(&self) -> EvalConfig {
        EvalConfig {
            max_depth: self.max_depth,
        }
    }
}

/// `0` and `none` mean no limit; otherwise a positive integer.
fn parse_limit(raw: &str) -> Option<Option<usize>> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("none") {
        return Some(None);
    }
    match raw.parse::<usize>().ok()? {
        0 => Some(None),
        n => Some(Some(n)),
    }
}
