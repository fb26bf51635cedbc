//! Lexer for Rill, built on logos.
//!
//! Scans raw source text into a `Vec<Token>` terminated by exactly one
//! `Eof` token. The lexer is a collaborator of the parsing core: scanning
//! problems are reported to the [`DiagnosticQueue`] and scanning continues,
//! so one pass surfaces every lexical error in a file.
//!
//! Whitespace is skipped by logos; newlines are real tokens internally so
//! the conversion loop can maintain the line counter that every cooked
//! [`Token`] carries.

use logos::Logos;
use thiserror::Error;

use rill_diagnostic::{Diagnostic, DiagnosticQueue};
use rill_ir::{Token, TokenKind, TokenLiteral};

#[cfg(test)]
mod tests;

/// Lexical errors. Converted to diagnostics at the point of detection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Unexpected character '{0}'.")]
    UnexpectedCharacter(char),
    #[error("Unterminated string.")]
    UnterminatedString,
}

/// Raw token from logos (before cooking literals and line numbers).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("\n")]
    Newline,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("!=")]
    NotEq,
    #[token("!")]
    Bang,
    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,

    #[token("and")]
    And,
    #[token("class")]
    Class,
    #[token("else")]
    Else,
    #[token("false")]
    False,
    #[token("for")]
    For,
    #[token("fun")]
    Fun,
    #[token("if")]
    If,
    #[token("nil")]
    Nil,
    #[token("or")]
    Or,
    #[token("print")]
    Print,
    #[token("return")]
    Return,
    #[token("true")]
    True,
    #[token("var")]
    Var,
    #[token("while")]
    While,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    #[regex(r#""[^"\n]*""#)]
    Str,
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
}

/// Scan `source` into tokens, reporting lexical errors to `queue`.
///
/// Always returns a token list ending in `Eof`, even for empty or fully
/// erroneous input; the parser never requests more tokens than exist.
pub fn lex(source: &str, queue: &mut DiagnosticQueue) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut line: u32 = 1;
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let slice = lexer.slice();
        match result {
            Ok(RawToken::Newline) => line += 1,
            Ok(RawToken::LineComment) => {}
            Ok(raw) => tokens.push(cook(raw, slice, line, queue)),
            Err(()) => {
                let error = if slice.starts_with('"') {
                    LexError::UnterminatedString
                } else {
                    LexError::UnexpectedCharacter(slice.chars().next().unwrap_or('\0'))
                };
                queue.emit(Diagnostic::error(line, error.to_string()));
            }
        }
    }

    tokens.push(Token::eof(line));
    tokens
}

/// Convert a raw logos token into a cooked [`Token`].
fn cook(raw: RawToken, slice: &str, line: u32, queue: &mut DiagnosticQueue) -> Token {
    let kind = match raw {
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Bang => TokenKind::Bang,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Eq => TokenKind::Eq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::And => TokenKind::And,
        RawToken::Class => TokenKind::Class,
        RawToken::Else => TokenKind::Else,
        RawToken::False => TokenKind::False,
        RawToken::For => TokenKind::For,
        RawToken::Fun => TokenKind::Fun,
        RawToken::If => TokenKind::If,
        RawToken::Nil => TokenKind::Nil,
        RawToken::Or => TokenKind::Or,
        RawToken::Print => TokenKind::Print,
        RawToken::Return => TokenKind::Return,
        RawToken::True => TokenKind::True,
        RawToken::Var => TokenKind::Var,
        RawToken::While => TokenKind::While,
        RawToken::Ident => TokenKind::Ident,

        RawToken::Number => {
            return match slice.parse::<f64>() {
                Ok(value) => {
                    Token::with_literal(TokenKind::Number, slice, TokenLiteral::Number(value), line)
                }
                Err(_) => {
                    // Unreachable for the number regex, but never panic on
                    // user input.
                    queue.emit(Diagnostic::error(line, format!("Invalid number '{slice}'.")));
                    Token::with_literal(TokenKind::Number, slice, TokenLiteral::Number(0.0), line)
                }
            };
        }
        RawToken::Str => {
            // Strip the surrounding quotes; no escape sequences in Rill.
            let contents = &slice[1..slice.len() - 1];
            return Token::with_literal(
                TokenKind::Str,
                slice,
                TokenLiteral::Str(contents.to_string()),
                line,
            );
        }

        // Consumed by the lex loop before cooking.
        RawToken::LineComment | RawToken::Newline => unreachable!(),
    };

    Token::new(kind, slice, line)
}
