//! Token types for the Rill lexer.
//!
//! A token is an immutable record of kind, lexeme text, optional cooked
//! literal value, and source line. The line is an opaque location
//! attachment: it has no control-flow significance beyond error
//! attribution.

use std::fmt;

/// Token kinds for Rill.
///
/// This is a C-like enum: literal payloads live in [`Token::literal`] and
/// the raw text in [`Token::lexeme`]. Keeping the kind payload-free lets
/// the parser's recovery sets use a plain bitset over discriminants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum TokenKind {
    // Single-character punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Semicolon,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Bang,
    NotEq,
    Eq,
    EqEq,
    Gt,
    GtEq,
    Lt,
    LtEq,

    // Literals and identifiers (payload in lexeme/literal)
    Ident,
    Str,
    Number,

    // Keywords
    And,
    Class,
    Else,
    False,
    For,
    Fun,
    If,
    Nil,
    Or,
    Print,
    Return,
    True,
    Var,
    While,

    Eof,
}

impl TokenKind {
    /// Discriminant index for bitset membership (parser recovery sets).
    ///
    /// All variants fit in `0..=36`, so a `u64` bitset covers the set.
    #[inline]
    pub const fn discriminant_index(self) -> u8 {
        self as u8
    }

    /// Number of `TokenKind` variants. Used for bitset sizing verification.
    pub const COUNT: usize = 37;
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Semicolon => ";",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Bang => "!",
            TokenKind::NotEq => "!=",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Ident => "identifier",
            TokenKind::Str => "string",
            TokenKind::Number => "number",
            TokenKind::And => "and",
            TokenKind::Class => "class",
            TokenKind::Else => "else",
            TokenKind::False => "false",
            TokenKind::For => "for",
            TokenKind::Fun => "fun",
            TokenKind::If => "if",
            TokenKind::Nil => "nil",
            TokenKind::Or => "or",
            TokenKind::Print => "print",
            TokenKind::Return => "return",
            TokenKind::True => "true",
            TokenKind::Var => "var",
            TokenKind::While => "while",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}

/// Cooked literal value attached to `Number` and `Str` tokens.
#[derive(Clone, PartialEq, Debug)]
pub enum TokenLiteral {
    /// All Rill numbers are 64-bit floats; integers are represented exactly
    /// up to 2^53.
    Number(f64),
    /// String contents with the surrounding quotes stripped.
    Str(String),
}

/// A token with its lexeme and source line.
#[derive(Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<TokenLiteral>,
    pub line: u32,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line,
        }
    }

    /// A token carrying a cooked literal value.
    pub fn with_literal(
        kind: TokenKind,
        lexeme: impl Into<String>,
        literal: TokenLiteral,
        line: u32,
    ) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            literal: Some(literal),
            line,
        }
    }

    /// The end-of-input sentinel. The lexer always emits exactly one, last.
    pub fn eof(line: u32) -> Self {
        Token::new(TokenKind::Eof, "", line)
    }

    /// The cooked number payload, if this is a `Number` token.
    pub fn number(&self) -> Option<f64> {
        match self.literal {
            Some(TokenLiteral::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// The cooked string payload, if this is a `Str` token.
    pub fn string(&self) -> Option<&str> {
        match &self.literal {
            Some(TokenLiteral::Str(s)) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(lit) => write!(
                f,
                "{:?}({:?}) {:?} @ line {}",
                self.kind, self.lexeme, lit, self.line
            ),
            None => write!(f, "{:?}({:?}) @ line {}", self.kind, self.lexeme, self.line),
        }
    }
}
