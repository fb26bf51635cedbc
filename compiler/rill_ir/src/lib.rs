//! Rill IR - token and AST types shared by the lexer, parser, and evaluator.
//!
//! The pipeline is `source → Vec<Token> → (Expr, Stmt) trees → evaluation`.
//! Everything in this crate is immutable once constructed: the parser builds
//! a tree (never a graph), and the evaluator only reads it.

mod ast;
mod token;

pub use ast::{Expr, FunctionDecl, Literal, Stmt};
pub use token::{Token, TokenKind, TokenLiteral};
