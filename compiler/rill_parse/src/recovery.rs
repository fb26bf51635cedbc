//! Error recovery for the parser.
//!
//! Panic-mode synchronization: after a parse error the cursor discards
//! tokens until the next statement boundary, bounding error cascades to one
//! diagnostic per structural unit. Boundary membership uses a bitset over
//! `TokenKind` discriminants for O(1) testing.

use crate::cursor::Cursor;
use rill_ir::TokenKind;

// TokenSet is a u64 bitset, so every discriminant index must fit in 0..63.
const _: () = assert!(
    TokenKind::COUNT <= 64,
    "TokenSet uses a u64 bitset; all discriminant indices must be < 64"
);

/// A set of token kinds with O(1) membership testing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    /// The empty set.
    #[inline]
    pub const fn new() -> Self {
        TokenSet(0)
    }

    /// Add a token kind (builder pattern for const contexts).
    #[inline]
    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        TokenSet(self.0 | (1u64 << kind.discriminant_index()))
    }

    /// Whether this set contains `kind`.
    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        (self.0 & (1u64 << kind.discriminant_index())) != 0
    }

    /// Number of kinds in the set.
    #[inline]
    pub const fn count(&self) -> u32 {
        self.0.count_ones()
    }
}

impl Default for TokenSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Keywords that begin a new statement: synchronization stops immediately
/// before any of these.
pub const STMT_BOUNDARY: TokenSet = TokenSet::new()
    .with(TokenKind::Class)
    .with(TokenKind::Fun)
    .with(TokenKind::Var)
    .with(TokenKind::For)
    .with(TokenKind::If)
    .with(TokenKind::While)
    .with(TokenKind::Print)
    .with(TokenKind::Return);

/// Discard tokens until the next statement boundary.
///
/// A boundary is the token after a consumed `;`, or the token immediately
/// before a keyword in [`STMT_BOUNDARY`].
pub fn synchronize(cursor: &mut Cursor<'_>) {
    cursor.advance();

    while !cursor.is_at_end() {
        if cursor.previous().kind == TokenKind::Semicolon {
            return;
        }
        if STMT_BOUNDARY.contains(cursor.current().kind) {
            return;
        }
        cursor.advance();
    }
}
