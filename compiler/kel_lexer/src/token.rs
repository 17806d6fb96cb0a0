//! Public token types.

use std::fmt;

use kel_ir::{Location, Span};

/// Token kind with decoded literal payload.
///
/// Integer payloads are unsigned magnitudes; signedness is applied by the
/// parser when it builds a value. Unsuffixed decimal literals are `Int`,
/// unsuffixed octal/hex/binary literals are `UInt`.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    LParen,
    RParen,
    Quote,

    Byte(u8),
    UByte(u8),
    Short(u16),
    UShort(u16),
    Int(u32),
    UInt(u32),
    Long(u64),
    ULong(u64),
    Float(f32),
    Double(f64),

    /// String literal with escapes decoded.
    String(String),
    Ident,

    Whitespace,
    Newline,
    /// Line (`//`, `///`) or block (`/* */`) comment.
    Comment,

    Eof,
}

impl TokenKind {
    /// Human-readable name used in "expected ..." messages.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Quote => "'",
            TokenKind::Byte(_) => "i8 literal",
            TokenKind::UByte(_) => "u8 literal",
            TokenKind::Short(_) => "i16 literal",
            TokenKind::UShort(_) => "u16 literal",
            TokenKind::Int(_) => "integer literal",
            TokenKind::UInt(_) => "unsigned integer literal",
            TokenKind::Long(_) => "i64 literal",
            TokenKind::ULong(_) => "u64 literal",
            TokenKind::Float(_) => "float literal",
            TokenKind::Double(_) => "double literal",
            TokenKind::String(_) => "string literal",
            TokenKind::Ident => "identifier",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Newline => "newline",
            TokenKind::Comment => "comment",
            TokenKind::Eof => "end of file",
        }
    }

    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::Newline | TokenKind::Comment
        )
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Byte(_)
                | TokenKind::UByte(_)
                | TokenKind::Short(_)
                | TokenKind::UShort(_)
                | TokenKind::Int(_)
                | TokenKind::UInt(_)
                | TokenKind::Long(_)
                | TokenKind::ULong(_)
                | TokenKind::Float(_)
                | TokenKind::Double(_)
                | TokenKind::String(_)
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One scanned token.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub location: Location,
    /// Raw source text of the token, quotes and escapes included.
    pub text: String,
}
