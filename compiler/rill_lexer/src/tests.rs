use pretty_assertions::assert_eq;

use rill_diagnostic::DiagnosticQueue;
use rill_ir::{TokenKind, TokenLiteral};

use crate::lex;

fn kinds(source: &str) -> Vec<TokenKind> {
    let mut queue = DiagnosticQueue::new();
    let tokens = lex(source, &mut queue);
    assert!(!queue.has_errors(), "unexpected lex errors for {source:?}");
    tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn empty_source_is_just_eof() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}

#[test]
fn punctuation_and_operators() {
    assert_eq!(
        kinds("(){},.;+-*/"),
        vec![
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::Semicolon,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn two_char_operators_win_over_one_char() {
    assert_eq!(
        kinds("! != = == < <= > >="),
        vec![
            TokenKind::Bang,
            TokenKind::NotEq,
            TokenKind::Eq,
            TokenKind::EqEq,
            TokenKind::Lt,
            TokenKind::LtEq,
            TokenKind::Gt,
            TokenKind::GtEq,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn keywords_versus_identifiers() {
    assert_eq!(
        kinds("var variable and android"),
        vec![
            TokenKind::Var,
            TokenKind::Ident,
            TokenKind::And,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn number_literals_are_cooked_to_f64() {
    let mut queue = DiagnosticQueue::new();
    let tokens = lex("12 3.5", &mut queue);
    assert_eq!(tokens[0].literal, Some(TokenLiteral::Number(12.0)));
    assert_eq!(tokens[0].lexeme, "12");
    assert_eq!(tokens[1].literal, Some(TokenLiteral::Number(3.5)));
}

#[test]
fn string_literals_strip_quotes() {
    let mut queue = DiagnosticQueue::new();
    let tokens = lex("\"hello world\"", &mut queue);
    assert_eq!(tokens[0].kind, TokenKind::Str);
    assert_eq!(tokens[0].lexeme, "\"hello world\"");
    assert_eq!(tokens[0].literal, Some(TokenLiteral::Str("hello world".into())));
}

#[test]
fn line_numbers_advance_on_newlines() {
    let mut queue = DiagnosticQueue::new();
    let tokens = lex("var a;\nvar b;\n\nvar c;", &mut queue);
    let var_lines: Vec<u32> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Var)
        .map(|t| t.line)
        .collect();
    assert_eq!(var_lines, vec![1, 2, 4]);
    // Eof carries the final line.
    assert_eq!(tokens.last().map(|t| t.line), Some(4));
}

#[test]
fn comments_are_skipped_entirely() {
    assert_eq!(
        kinds("// a comment\nprint 1; // trailing"),
        vec![
            TokenKind::Print,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unexpected_character_is_reported_and_scanning_continues() {
    let mut queue = DiagnosticQueue::new();
    let tokens = lex("var @ x;", &mut queue);
    assert_eq!(queue.error_count(), 1);
    let message = queue
        .iter()
        .next()
        .map(|d| d.message.clone())
        .unwrap_or_default();
    assert_eq!(message, "Unexpected character '@'.");
    // The rest of the line still lexes.
    let ks: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        ks,
        vec![
            TokenKind::Var,
            TokenKind::Ident,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unterminated_string_is_reported() {
    let mut queue = DiagnosticQueue::new();
    let _ = lex("\"oops", &mut queue);
    assert!(queue.has_errors());
    let messages: Vec<String> = queue.iter().map(|d| d.message.clone()).collect();
    assert!(messages.iter().any(|m| m == "Unterminated string."));
}
