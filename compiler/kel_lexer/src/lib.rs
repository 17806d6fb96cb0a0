//! Lexer for the kel runtime.
//!
//! Source text is scanned eagerly into a random-access token list; the
//! parser then walks it with a cursor. Scanning is done by a logos-derived
//! [`RawToken`](raw_token::RawToken) machine, and each raw token is cooked
//! into a [`TokenKind`] with its decoded payload.
//!
//! # Cursor
//!
//! [`Lexer::next_token`] and [`Lexer::peek_token`] take a [`Trivia`] mask
//! naming which trivia kinds to keep; the default skips whitespace,
//! newlines and comments. Once the list is exhausted both keep returning
//! the trailing [`TokenKind::Eof`] token.

mod lex_error;
mod raw_token;
mod token;
mod trivia;

use kel_ir::{LineIndex, Location, Position, Span};
use logos::Logos;

pub use lex_error::{LexError, LexErrorKind};
pub use token::{Token, TokenKind};
pub use trivia::Trivia;

use raw_token::RawToken;

/// Token list plus cursor over one source text.
#[derive(Clone, Debug)]
pub struct Lexer {
    source: String,
    index: LineIndex,
    /// Always ends with exactly one `Eof` token.
    tokens: Vec<Token>,
    cursor: usize,
}

impl Default for Lexer {
    fn default() -> Self {
        let mut lexer = Lexer {
            source: String::new(),
            index: LineIndex::build(""),
            tokens: Vec::new(),
            cursor: 0,
        };
        lexer.push_eof();
        lexer
    }
}

impl Lexer {
    /// Scan `source` into a new lexer.
    pub fn new(source: &str) -> Result<Self, LexError> {
        let mut lexer = Lexer::default();
        lexer.reload(source)?;
        Ok(lexer)
    }

    /// Discard all tokens and cursor state, then scan `source`.
    ///
    /// On error the lexer is left empty (only `Eof`).
    pub fn reload(&mut self, source: &str) -> Result<(), LexError> {
        self.source.clear();
        self.source.push_str(source);
        self.index = LineIndex::build(source);
        self.tokens.clear();
        self.cursor = 0;

        let result = self.scan();
        if result.is_err() {
            self.tokens.clear();
        }
        self.push_eof();
        tracing::debug!(
            tokens = self.tokens.len(),
            bytes = self.source.len(),
            ok = result.is_ok(),
            "lexed source"
        );
        result
    }

    fn scan(&mut self) -> Result<(), LexError> {
        let mut raw = RawToken::lexer(&self.source);
        while let Some(result) = raw.next() {
            let range = raw.span();
            let kind = match result.and_then(RawToken::cook) {
                Ok(kind) => kind,
                Err(kind) => {
                    let span = match raw.extras.error_at.take() {
                        Some(at) => Span::from_range(at..(at + 2).min(range.end)),
                        None => Span::from_range(range),
                    };
                    return Err(LexError::new(kind, span, self.index.position(span.start)));
                }
            };
            let span = Span::from_range(range.clone());
            self.tokens.push(Token {
                kind,
                span,
                location: self.index.location(span),
                text: self.source[range].to_owned(),
            });
        }
        Ok(())
    }

    fn push_eof(&mut self) {
        let span = Span::point(self.source.len());
        let at = self.index.position(span.start);
        self.tokens.push(Token {
            kind: TokenKind::Eof,
            span,
            location: Location::new(at, at),
            text: String::new(),
        });
    }

    /// Index of the next token kept by `keep`, without moving the cursor.
    fn seek(&self, keep: Trivia) -> usize {
        let last = self.tokens.len() - 1;
        (self.cursor..last)
            .find(|&i| !keep.skips(&self.tokens[i].kind))
            .unwrap_or(last)
    }

    /// Advance past the next token kept by `keep` and return it.
    pub fn next_token(&mut self, keep: Trivia) -> Token {
        let at = self.seek(keep);
        let token = self.tokens[at].clone();
        if token.kind != TokenKind::Eof {
            self.cursor = at + 1;
        } else {
            self.cursor = at;
        }
        token
    }

    /// The token [`next_token`](Self::next_token) would return.
    pub fn peek_token(&self, keep: Trivia) -> &Token {
        &self.tokens[self.seek(keep)]
    }

    /// Linear scan for the token whose location contains `position`.
    ///
    /// Intended for tooling (hover, go-to); the parser never calls it.
    pub fn token_at(&self, position: Position) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|token| token.location.contains(position))
    }

    /// All tokens including trivia, ending with `Eof`.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.index
    }
}

/// Scan `source` into its token list (trivia included).
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).map(|lexer| lexer.tokens)
}
