//! Recursive-descent parser for the kel runtime.
//!
//! Grammar:
//!
//! ```text
//! expr := "'" expr
//!       | "(" expr* ")"
//!       | literal
//!       | identifier
//! ```
//!
//! Lists become `List` objects, identifiers `Symbol` objects and string
//! literals `String` objects, all allocated in the caller's [`Runtime`].
//! A quote retags the following object reference as quoted; quoting a
//! scalar has no effect.
//!
//! Every object is added to the caller's [`HostRefSet`] the moment it is
//! allocated, before it is linked into its parent. If parsing fails
//! halfway through a list, the partial tree stays protected until the
//! caller's scope ends, and nothing dangles.

mod error;

use kel_ir::Span;
use kel_lexer::{Lexer, Token, TokenKind, Trivia};
use kel_object::{EvalError, HostRef, HostRefSet, Runtime, Value};
use kel_stack::ensure_sufficient_stack;

pub use error::{ParseError, ParseErrorKind};

/// Builds expression trees in a runtime.
pub struct Parser<'rt> {
    runtime: &'rt mut Runtime,
}

impl<'rt> Parser<'rt> {
    pub fn new(runtime: &'rt mut Runtime) -> Self {
        Parser { runtime }
    }

    /// Parse one expression from the token stream.
    pub fn parse_expression(
        &mut self,
        lexer: &mut Lexer,
        protect: &mut HostRefSet,
    ) -> Result<Value, ParseError> {
        ensure_sufficient_stack(|| self.expression(lexer, protect))
    }

    /// Parse expressions until end of input, collected into one list.
    ///
    /// The returned handle keeps the program list alive after `protect`
    /// is dropped; its elements stay reachable through it.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_program(
        &mut self,
        lexer: &mut Lexer,
        protect: &mut HostRefSet,
    ) -> Result<HostRef, ParseError> {
        let start = lexer.peek_token(Trivia::empty()).span;
        let program = self.alloc(lexer, protect, start, |rt| rt.alloc_list(Vec::new()))?;

        while lexer.peek_token(Trivia::empty()).kind != TokenKind::Eof {
            let item = self.parse_expression(lexer, protect)?;
            self.push(lexer, &program, item, start)?;
        }

        let end = lexer.peek_token(Trivia::empty()).span;
        self.runtime.set_span(program.object(), start.merge(end));
        let forms = self.runtime.list(program.object()).map_or(0, |items| items.len());
        tracing::debug!(forms, "parsed program");
        Ok(program)
    }

    fn expression(
        &mut self,
        lexer: &mut Lexer,
        protect: &mut HostRefSet,
    ) -> Result<Value, ParseError> {
        let token = lexer.next_token(Trivia::empty());
        let span = token.span;
        let value = match &token.kind {
            TokenKind::Quote => return Ok(self.parse_expression(lexer, protect)?.quoted()),
            TokenKind::LParen => return self.list(lexer, protect, &token),
            TokenKind::Eof => {
                return Err(error_at(lexer, &token, ParseErrorKind::UnexpectedEof { open: None }))
            }
            TokenKind::String(text) => {
                let text = text.clone();
                self.alloc(lexer, protect, span, |rt| rt.alloc_string(text))?
                    .value()
            }
            TokenKind::Ident => self
                .alloc(lexer, protect, span, |rt| rt.alloc_symbol(&token.text))?
                .value(),
            TokenKind::Byte(m) => Value::Byte(signed(lexer, &token, *m, "i8")?),
            TokenKind::UByte(m) => Value::UByte(*m),
            TokenKind::Short(m) => Value::Short(signed(lexer, &token, *m, "i16")?),
            TokenKind::UShort(m) => Value::UShort(*m),
            TokenKind::Int(m) => Value::Int(signed(lexer, &token, *m, "i32")?),
            TokenKind::UInt(m) => Value::UInt(*m),
            TokenKind::Long(m) => Value::Long(signed(lexer, &token, *m, "i64")?),
            TokenKind::ULong(m) => Value::ULong(*m),
            TokenKind::Float(v) => Value::Float(*v),
            TokenKind::Double(v) => Value::Double(*v),
            TokenKind::RParen
            | TokenKind::Whitespace
            | TokenKind::Newline
            | TokenKind::Comment => {
                return Err(error_at(
                    lexer,
                    &token,
                    ParseErrorKind::UnrecognizedToken {
                        found: token.text.clone(),
                    },
                ))
            }
        };
        Ok(value)
    }

    fn list(
        &mut self,
        lexer: &mut Lexer,
        protect: &mut HostRefSet,
        open: &Token,
    ) -> Result<Value, ParseError> {
        let list = self.alloc(lexer, protect, open.span, |rt| rt.alloc_list(Vec::new()))?;
        loop {
            let next = lexer.peek_token(Trivia::empty());
            match next.kind {
                TokenKind::RParen => {
                    let close = expect_token(lexer, &TokenKind::RParen)?;
                    self.runtime
                        .set_span(list.object(), open.span.merge(close.span));
                    return Ok(list.value());
                }
                TokenKind::Eof => {
                    let eof = next.clone();
                    return Err(error_at(
                        lexer,
                        &eof,
                        ParseErrorKind::UnexpectedEof {
                            open: Some(open.span),
                        },
                    ));
                }
                _ => {
                    let item = self.parse_expression(lexer, protect)?;
                    self.push(lexer, &list, item, open.span)?;
                }
            }
        }
    }

    /// Allocate through `make`, record `span`, and protect the result.
    fn alloc(
        &mut self,
        lexer: &Lexer,
        protect: &mut HostRefSet,
        span: Span,
        make: impl FnOnce(&mut Runtime) -> Result<HostRef, EvalError>,
    ) -> Result<HostRef, ParseError> {
        let handle = make(&mut *self.runtime).map_err(|err| allocation_error(lexer, span, err))?;
        self.runtime.set_span(handle.object(), span);
        protect.add(&handle);
        Ok(handle)
    }

    fn push(
        &mut self,
        lexer: &Lexer,
        list: &HostRef,
        item: Value,
        span: Span,
    ) -> Result<(), ParseError> {
        self.runtime
            .list_push(list.object(), item)
            .map_err(|err| allocation_error(lexer, span, err))
    }
}

/// Consume the next token, requiring it to have the same kind as
/// `expected` (payloads are not compared).
pub fn expect_token(lexer: &mut Lexer, expected: &TokenKind) -> Result<Token, ParseError> {
    let token = lexer.next_token(Trivia::empty());
    if std::mem::discriminant(&token.kind) == std::mem::discriminant(expected) {
        return Ok(token);
    }
    let kind = if token.kind == TokenKind::Eof {
        ParseErrorKind::UnexpectedEof { open: None }
    } else {
        ParseErrorKind::ExpectedToken {
            expected: expected.name(),
            found: token.kind.name(),
        }
    };
    Err(error_at(lexer, &token, kind))
}

fn error_at(lexer: &Lexer, token: &Token, kind: ParseErrorKind) -> ParseError {
    ParseError::new(kind, token.span, lexer.line_index().position(token.span.start))
}

fn allocation_error(lexer: &Lexer, span: Span, err: EvalError) -> ParseError {
    ParseError::new(
        ParseErrorKind::Allocation(err),
        span,
        lexer.line_index().position(span.start),
    )
}

/// Apply a signed type to an unsigned magnitude.
fn signed<M, S>(lexer: &Lexer, token: &Token, magnitude: M, ty: &'static str) -> Result<S, ParseError>
where
    S: TryFrom<M>,
{
    S::try_from(magnitude).map_err(|_| {
        error_at(
            lexer,
            token,
            ParseErrorKind::LiteralOutOfRange {
                literal: token.text.clone(),
                ty,
            },
        )
    })
}
