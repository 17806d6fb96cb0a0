//! Raw token definition.
//!
//! `RawToken` is the logos-derived scanner. Callbacks decode literal
//! payloads; [`RawToken::cook`] turns the result into a public
//! [`TokenKind`](crate::TokenKind), checking integer widths.
//!
//! Scanning modes outside the normal one (string, escape, block comment)
//! live in the callbacks: each consumes from `lex.remainder()` until its
//! terminator and bumps the lexer past it.

use logos::Logos;

use crate::{LexErrorKind, TokenKind};

/// Per-run scratch state shared with callbacks.
#[derive(Default)]
pub(crate) struct LexExtras {
    /// Byte offset of an error inside a longer token (e.g. a bad escape in
    /// a string). When unset, the error is reported at the token start.
    pub error_at: Option<usize>,
}

/// Width suffix on an integer literal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Width {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
}

impl Width {
    fn from_suffix(suffix: &str) -> Option<Self> {
        Some(match suffix {
            "i8" => Width::I8,
            "u8" => Width::U8,
            "i16" => Width::I16,
            "u16" => Width::U16,
            "i32" => Width::I32,
            "u32" => Width::U32,
            "i64" => Width::I64,
            "u64" => Width::U64,
            _ => return None,
        })
    }
}

/// Decoded integer literal: unsigned magnitude plus optional width.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct IntLiteral {
    pub value: u64,
    pub width: Option<Width>,
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexErrorKind)]
#[logos(extras = LexExtras)]
pub(crate) enum RawToken {
    #[regex(r"[ \t\r]+")]
    Whitespace,

    #[token("\n")]
    Newline,

    /// `//` and `///` comments run to end of line.
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("'")]
    Quote,

    #[token("\"", string_literal)]
    String(String),

    #[regex(r"[0-9]+(i8|u8|i16|u16|i32|u32|i64|u64)?", |lex| int_literal(lex, 0, 10), priority = 3)]
    Decimal(IntLiteral),
    #[regex(r"0[0-7]+(i8|u8|i16|u16|i32|u32|i64|u64)?", |lex| int_literal(lex, 1, 8), priority = 4)]
    Octal(IntLiteral),
    #[regex(r"0[xX][0-9a-fA-F]+(i8|u8|i16|u16|i32|u32|i64|u64)?", |lex| int_literal(lex, 2, 16), priority = 4)]
    Hex(IntLiteral),
    #[regex(r"0[bB][01]+(i8|u8|i16|u16|i32|u32|i64|u64)?", |lex| int_literal(lex, 2, 2), priority = 4)]
    Binary(IntLiteral),

    #[regex(r"[0-9]+\.[0-9]+[fF]", float_literal, priority = 4)]
    Float(f32),
    #[regex(r"[0-9]+\.[0-9]+", double_literal, priority = 4)]
    Double(f64),

    /// Anything else up to a delimiter. A leading `/` is only an identifier
    /// when it does not open a comment.
    #[regex(r#"[^\x00-\x20\x7F()'"/][^\x00-\x20\x7F()'"]*"#, priority = 1)]
    #[regex(r#"/[^\x00-\x20\x7F()'"/*][^\x00-\x20\x7F()'"]*"#, priority = 1)]
    #[token("/", priority = 1)]
    Ident,
}

impl RawToken {
    /// Convert to the public token kind, enforcing literal widths.
    pub(crate) fn cook(self) -> Result<TokenKind, LexErrorKind> {
        Ok(match self {
            RawToken::Whitespace => TokenKind::Whitespace,
            RawToken::Newline => TokenKind::Newline,
            RawToken::LineComment | RawToken::BlockComment => TokenKind::Comment,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::Quote => TokenKind::Quote,
            RawToken::String(text) => TokenKind::String(text),
            RawToken::Decimal(lit) => cook_int(lit, Width::I32)?,
            RawToken::Octal(lit) | RawToken::Hex(lit) | RawToken::Binary(lit) => {
                cook_int(lit, Width::U32)?
            }
            RawToken::Float(value) => TokenKind::Float(value),
            RawToken::Double(value) => TokenKind::Double(value),
            RawToken::Ident => TokenKind::Ident,
        })
    }
}

fn cook_int(lit: IntLiteral, default: Width) -> Result<TokenKind, LexErrorKind> {
    let value = lit.value;
    let too_wide = |_| LexErrorKind::InvalidNumber;
    Ok(match lit.width.unwrap_or(default) {
        Width::I8 => TokenKind::Byte(u8::try_from(value).map_err(too_wide)?),
        Width::U8 => TokenKind::UByte(u8::try_from(value).map_err(too_wide)?),
        Width::I16 => TokenKind::Short(u16::try_from(value).map_err(too_wide)?),
        Width::U16 => TokenKind::UShort(u16::try_from(value).map_err(too_wide)?),
        Width::I32 => TokenKind::Int(u32::try_from(value).map_err(too_wide)?),
        Width::U32 => TokenKind::UInt(u32::try_from(value).map_err(too_wide)?),
        Width::I64 => TokenKind::Long(value),
        Width::U64 => TokenKind::ULong(value),
    })
}

/// Split `digits[suffix]` after a `prefix`-byte radix marker and decode.
fn int_literal(
    lex: &mut logos::Lexer<'_, RawToken>,
    prefix: usize,
    radix: u32,
) -> Result<IntLiteral, LexErrorKind> {
    let body = &lex.slice()[prefix..];
    let digits_end = body
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(body.len());
    let (digits, suffix) = body.split_at(digits_end);
    let value = u64::from_str_radix(digits, radix).map_err(|_| LexErrorKind::InvalidNumber)?;
    let width = if suffix.is_empty() {
        None
    } else {
        Some(Width::from_suffix(suffix).ok_or(LexErrorKind::InvalidNumber)?)
    };
    Ok(IntLiteral { value, width })
}

fn float_literal(lex: &mut logos::Lexer<'_, RawToken>) -> Result<f32, LexErrorKind> {
    let slice = lex.slice();
    slice[..slice.len() - 1]
        .parse()
        .map_err(|_| LexErrorKind::InvalidNumber)
}

fn double_literal(lex: &mut logos::Lexer<'_, RawToken>) -> Result<f64, LexErrorKind> {
    lex.slice().parse().map_err(|_| LexErrorKind::InvalidNumber)
}

fn block_comment(lex: &mut logos::Lexer<'_, RawToken>) -> Result<(), LexErrorKind> {
    if let Some(end) = lex.remainder().find("*/") {
        lex.bump(end + 2);
        Ok(())
    } else {
        lex.bump(lex.remainder().len());
        Err(LexErrorKind::UnterminatedBlockComment)
    }
}

/// String mode. Entered after the opening `"`; returns the decoded text.
///
/// Escapes: `\' \" \? \\ \a \b \f \n \r \t \v`, 1-3 octal digits,
/// `\x`/`\X` with 1-2 hex digits, and backslash-newline as a line
/// continuation. A raw newline or end of input is an error.
///
/// Octal and hex escapes name a byte. The text is UTF-8, so the byte is
/// stored as the code point of the same value (U+0000 to U+00FF); octal
/// values above `\377` keep their low eight bits.
fn string_literal(lex: &mut logos::Lexer<'_, RawToken>) -> Result<String, LexErrorKind> {
    let body_start = lex.span().end;
    let rest = lex.remainder();
    let mut text = String::new();
    let mut chars = rest.char_indices().peekable();

    while let Some((at, ch)) = chars.next() {
        match ch {
            '"' => {
                lex.bump(at + 1);
                return Ok(text);
            }
            '\n' => {
                lex.bump(at);
                return Err(LexErrorKind::UnterminatedString);
            }
            '\\' => {
                let Some((_, escape)) = chars.next() else {
                    break;
                };
                let decoded = match escape {
                    '\'' | '"' | '?' | '\\' => Some(escape),
                    'a' => Some('\x07'),
                    'b' => Some('\x08'),
                    'f' => Some('\x0C'),
                    'n' => Some('\n'),
                    'r' => Some('\r'),
                    't' => Some('\t'),
                    'v' => Some('\x0B'),
                    '\n' => None,
                    '0'..='7' => {
                        let mut value = escape.to_digit(8).unwrap_or(0);
                        for _ in 0..2 {
                            match chars.peek().and_then(|(_, c)| c.to_digit(8)) {
                                Some(digit) => {
                                    value = value * 8 + digit;
                                    chars.next();
                                }
                                None => break,
                            }
                        }
                        u8::try_from(value & 0xFF).ok().map(char::from)
                    }
                    'x' | 'X' => {
                        let mut value = None;
                        for _ in 0..2 {
                            match chars.peek().and_then(|(_, c)| c.to_digit(16)) {
                                Some(digit) => {
                                    value = Some(value.unwrap_or(0) * 16 + digit);
                                    chars.next();
                                }
                                None => break,
                            }
                        }
                        let Some(value) = value.and_then(char::from_u32) else {
                            lex.extras.error_at = Some(body_start + at);
                            lex.bump(rest.len());
                            return Err(LexErrorKind::InvalidEscape);
                        };
                        Some(value)
                    }
                    _ => {
                        lex.extras.error_at = Some(body_start + at);
                        lex.bump(rest.len());
                        return Err(LexErrorKind::InvalidEscape);
                    }
                };
                text.extend(decoded);
            }
            _ => text.push(ch),
        }
    }

    lex.bump(rest.len());
    Err(LexErrorKind::UnterminatedString)
}
