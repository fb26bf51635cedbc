//! Runtime errors.

use thiserror::Error;

use rill_diagnostic::Diagnostic;
use rill_ir::Token;

/// A runtime error with the source line of the offending operation.
///
/// Message strings are part of the language's observable behavior; tests
/// assert on them, so change them deliberately.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct RuntimeError {
    pub line: u32,
    pub message: String,
}

impl RuntimeError {
    pub fn new(line: u32, message: impl Into<String>) -> Self {
        RuntimeError {
            line,
            message: message.into(),
        }
    }

    pub fn operand_must_be_number(operator: &Token) -> Self {
        RuntimeError::new(operator.line, "Operand must be a number.")
    }

    pub fn operands_must_be_numbers_or_strings(operator: &Token) -> Self {
        RuntimeError::new(operator.line, "Operands must be two numbers or two strings.")
    }

    pub fn not_callable(paren: &Token) -> Self {
        RuntimeError::new(paren.line, "Can only call functions and classes.")
    }

    pub fn wrong_arity(paren: &Token, expected: usize, got: usize) -> Self {
        RuntimeError::new(
            paren.line,
            format!("Expected {expected} arguments but got {got}."),
        )
    }

    pub fn undefined_variable(name: &Token) -> Self {
        RuntimeError::new(name.line, format!("Undefined variable '{}'.", name.lexeme))
    }

    /// Fallback for operator tokens the parser should never produce in
    /// operator position.
    pub fn invalid_operator(operator: &Token) -> Self {
        RuntimeError::new(
            operator.line,
            format!("Invalid operator '{}'.", operator.lexeme),
        )
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.line, &self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rill_ir::TokenKind;

    #[test]
    fn messages_match_the_reported_shapes() {
        let star = Token::new(TokenKind::Star, "*", 4);
        assert_eq!(
            RuntimeError::operand_must_be_number(&star).to_string(),
            "Operand must be a number."
        );

        let paren = Token::new(TokenKind::RParen, ")", 7);
        assert_eq!(
            RuntimeError::wrong_arity(&paren, 2, 3).to_string(),
            "Expected 2 arguments but got 3."
        );

        let name = Token::new(TokenKind::Ident, "x", 2);
        let err = RuntimeError::undefined_variable(&name);
        assert_eq!(err.to_string(), "Undefined variable 'x'.");
        assert_eq!(
            err.to_diagnostic().to_string(),
            "[line 2] error: Undefined variable 'x'."
        );
    }
}
