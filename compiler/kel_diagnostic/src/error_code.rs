use std::fmt;

/// Stable codes for every diagnostic the runtime can produce.
///
/// The first digit names the phase:
/// - E0xxx: lexical errors
/// - E1xxx: syntax errors
/// - E6xxx: runtime errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexical (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Invalid number literal
    E0003,
    /// Invalid escape sequence
    E0005,
    /// Unterminated block comment
    E0006,

    // Syntax (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter / unexpected end of input
    E1003,
    /// Literal out of range for its type
    E1004,

    // Runtime (E6xxx)
    /// Unbound symbol
    E6001,
    /// Call target is not callable
    E6002,
    /// Wrong number of arguments
    E6003,
    /// Argument of the wrong type
    E6004,
    /// Malformed special form
    E6005,
    /// Frame stack depth limit exceeded
    E6006,
    /// Allocation refused by the memory provider
    E6007,
    /// Error raised by a native function
    E6099,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6099 => "E6099",
        }
    }

    pub fn is_lexical(self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_syntax(self) -> bool {
        self.as_str().starts_with("E1")
    }

    pub fn is_runtime(self) -> bool {
        self.as_str().starts_with("E6")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
