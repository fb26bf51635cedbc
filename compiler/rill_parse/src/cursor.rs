//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption. The lexer
//! guarantees the stream ends with exactly one `Eof` token, so the cursor
//! never runs off the end: `advance` refuses to move past it.

use crate::error::ParseError;
use rill_ir::{Token, TokenKind};

/// Cursor over a finished token stream.
///
/// Invariant: `tokens` is non-empty and its last element is `Eof`;
/// `pos` always indexes a valid token.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of the stream.
    ///
    /// # Panics
    /// Panics (debug builds) if the stream is empty or not `Eof`-terminated.
    pub fn new(tokens: &'a [Token]) -> Self {
        debug_assert!(
            matches!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof)),
            "token stream must end with Eof"
        );
        Cursor { tokens, pos: 0 }
    }

    /// Current position, for progress checks.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The token under the cursor.
    #[inline]
    pub fn current(&self) -> &'a Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// The most recently consumed token.
    ///
    /// Before any `advance`, returns the first token.
    #[inline]
    pub fn previous(&self) -> &'a Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    /// True once the cursor rests on the `Eof` sentinel.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    /// Consume the current token (stopping at `Eof`) and return it.
    pub fn advance(&mut self) -> &'a Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.previous()
    }

    /// Whether the current token has the given kind. `Eof` never matches.
    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.current().kind == kind
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            return true;
        }
        false
    }

    /// Consume the current token if its kind is any of `kinds`.
    pub fn eat_any(&mut self, kinds: &[TokenKind]) -> bool {
        for &kind in kinds {
            if self.check(kind) {
                self.advance();
                return true;
            }
        }
        false
    }

    /// Require a token of the given kind, or fail with `message` attributed
    /// to the current token.
    pub fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            return Ok(self.advance().clone());
        }
        Err(ParseError::at(self.current(), message))
    }
}
