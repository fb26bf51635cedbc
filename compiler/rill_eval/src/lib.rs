//! Tree-walking evaluator for Rill.
//!
//! The [`Interpreter`] walks the statement trees produced by the parser and
//! executes them against a mutable [`Environment`]. Runtime errors are
//! ordinary `Result` values that unwind to the statement driver; `return`
//! is modeled as a [`Flow`] variant on the success path, not as an error.
//!
//! Output goes through a [`SharedPrintHandler`] so tests and embedders can
//! capture what a program prints without touching process stdout.

mod environment;
mod error;
mod interpreter;
mod operators;
mod print_handler;
mod value;


pub use environment::{Environment, Scope, ScopeCell};
pub use error::RuntimeError;
pub use interpreter::{Flow, Interpreter};
pub use print_handler::{
    buffer_handler, stdout_handler, BufferPrintHandler, PrintHandler, SharedPrintHandler,
    StdoutPrintHandler,
};
pub use value::{Callable, Value};
