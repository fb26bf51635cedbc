//! Parse error type.

use thiserror::Error;

use rill_diagnostic::Diagnostic;
use rill_ir::Token;

/// A parse error bound to the token where parsing stopped.
///
/// Never crosses the parser's public boundary: `declaration` converts it to
/// a [`Diagnostic`] and synchronizes. It exists as a typed error so the
/// grammar productions can use `?` internally.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl ParseError {
    /// An error attributed to `token`.
    pub fn at(token: &Token, message: impl Into<String>) -> Self {
        ParseError {
            token: token.clone(),
            message: message.into(),
        }
    }

    /// Convert to a diagnostic in the `Error at 'lexeme': message` shape.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::parse_error(&self.token, &self.message)
    }
}
