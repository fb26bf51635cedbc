//! Expression and statement trees.
//!
//! Two closed variant sets built by the parser and walked by the evaluator.
//! The evaluator dispatches by exhaustive `match`, so adding a variant is a
//! compile-time-visible change everywhere it matters.
//!
//! Operator and name nodes carry their originating [`Token`] so runtime
//! errors can be attributed to a source line.

use std::fmt;
use std::rc::Rc;

use crate::Token;

/// Literal values as they appear in source.
#[derive(Clone, PartialEq, Debug)]
pub enum Literal {
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Nil => f.write_str("nil"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Str(s) => write!(f, "{s:?}"),
        }
    }
}

/// Expression nodes.
///
/// Each node owns its children; the tree is acyclic and immutable after
/// construction.
#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
    Literal(Literal),
    Grouping(Box<Expr>),
    Unary {
        operator: Token,
        operand: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    /// `and` / `or` with short-circuit evaluation.
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Variable {
        name: Token,
    },
    Assign {
        name: Token,
        value: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        /// The closing `)`, retained solely to attribute runtime errors
        /// (arity mismatch, non-callable) to a source location.
        paren: Token,
        arguments: Vec<Expr>,
    },
}

/// A function declaration: name, parameter tokens, body statements.
///
/// Shared via `Rc` between its [`Stmt::Function`] node and any runtime
/// function values bound to it; both sides only read it.
#[derive(PartialEq, Debug)]
pub struct FunctionDecl {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

/// Statement nodes.
///
/// There is no `For` variant: `for` loops are desugared by the parser into
/// an initializer plus a `While` inside a `Block`.
#[derive(Clone, PartialEq, Debug)]
pub enum Stmt {
    Expression(Expr),
    Print(Expr),
    Var {
        name: Token,
        initializer: Option<Expr>,
    },
    Block(Vec<Stmt>),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    Function(Rc<FunctionDecl>),
    Return {
        keyword: Token,
        value: Option<Expr>,
    },
}
