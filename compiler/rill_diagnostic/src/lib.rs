//! Diagnostic reporting for Rill.
//!
//! The parser and interpreter never format user-facing text beyond a
//! message string and never terminate the process; they push [`Diagnostic`]
//! records into a [`DiagnosticQueue`] owned by the driver. The driver
//! decides what to do with them (print and skip interpretation, print and
//! set an exit code, assert on them in tests).

mod queue;

pub use queue::DiagnosticQueue;

use std::fmt;

use rill_ir::{Token, TokenKind};

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A single diagnostic: severity, optional source line, message.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub line: Option<u32>,
    pub message: String,
}

impl Diagnostic {
    /// An error with a known source line.
    pub fn error(line: u32, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            line: Some(line),
            message: message.into(),
        }
    }

    /// An error with no usable location (driver-level failures).
    pub fn error_without_line(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            line: None,
            message: message.into(),
        }
    }

    /// A parse error attributed to a token.
    ///
    /// Follows the classic `Error at 'lexeme': message` shape, with
    /// `at end` for the end-of-input sentinel.
    pub fn parse_error(token: &Token, message: impl fmt::Display) -> Self {
        let message = if token.kind == TokenKind::Eof {
            format!("Error at end: {message}")
        } else {
            format!("Error at '{}': {message}", token.lexeme)
        };
        Diagnostic::error(token.line, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "[line {line}] {}: {}", self.severity, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_error_names_the_offending_lexeme() {
        let token = Token::new(TokenKind::Eq, "=", 3);
        let diag = Diagnostic::parse_error(&token, "Invalid assignment target.");
        assert_eq!(
            diag.to_string(),
            "[line 3] error: Error at '=': Invalid assignment target."
        );
    }

    #[test]
    fn parse_error_at_eof_says_at_end() {
        let diag = Diagnostic::parse_error(&Token::eof(9), "Expect ';' after value.");
        assert_eq!(
            diag.to_string(),
            "[line 9] error: Error at end: Expect ';' after value."
        );
    }

    #[test]
    fn diagnostic_without_line_omits_the_prefix() {
        let diag = Diagnostic::error_without_line("could not read script");
        assert_eq!(diag.to_string(), "error: could not read script");
    }
}
