//! Recursive-descent parser for Rill.
//!
//! Turns a finished token stream into `Stmt`/`Expr` trees. The parser never
//! fails past its own boundary: parse errors are reported to the
//! [`DiagnosticQueue`](rill_diagnostic::DiagnosticQueue) and recovered from
//! by synchronizing to the next statement boundary, so a single call can
//! yield multiple diagnostics and a partial statement list. The driver
//! decides whether a program with parse errors is interpreted (it is not).
//!
//! Precedence, lowest to highest binding:
//! `assignment, or, and, equality, comparison, term, factor, unary, call,
//! primary`. All binary and logical productions are left-associative via
//! iterative folding; assignment alone is right-associative.

mod cursor;
mod error;
mod grammar;
mod recovery;

#[cfg(test)]
mod tests;

pub use cursor::Cursor;
pub use error::ParseError;
pub use grammar::{parse, Parser};
pub use recovery::TokenSet;
