//! Statement execution and expression evaluation.

use std::rc::Rc;

use tracing::{debug, trace};

use rill_diagnostic::DiagnosticQueue;
use rill_ir::{Expr, FunctionDecl, Literal, Stmt, Token, TokenKind};

use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::value::{Callable, Value};

/// Outcome of executing a statement.
///
/// `return` is ordinary control flow on the success path: a `Return`
/// propagates up through blocks and loops until the enclosing function
/// call consumes it. Runtime errors travel separately, in the `Err` arm.
#[derive(Clone, PartialEq, Debug)]
pub enum Flow {
    Continue,
    Return(Value),
}

/// The tree-walking interpreter.
///
/// Holds the variable environment and the print destination. The
/// environment persists across `interpret` calls, which is what makes the
/// REPL's session state work.
pub struct Interpreter {
    env: Environment,
    out: SharedPrintHandler,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(stdout_handler())
    }
}

impl Interpreter {
    pub fn new(out: SharedPrintHandler) -> Self {
        Interpreter {
            env: Environment::new(),
            out,
        }
    }

    /// Execute a program.
    ///
    /// Stops at the first runtime error, reports it to `queue`, and returns
    /// `false`. A `return` outside any function is discarded and execution
    /// continues with the next statement.
    pub fn interpret(&mut self, statements: &[Stmt], queue: &mut DiagnosticQueue) -> bool {
        debug!(statements = statements.len(), "interpret");
        for stmt in statements {
            match self.execute(stmt) {
                Ok(_) => {}
                Err(err) => {
                    queue.emit(err.to_diagnostic());
                    return false;
                }
            }
        }
        true
    }

    /// Evaluate a single expression against the current environment.
    ///
    /// The REPL uses this to print the value of an expression entered
    /// without a trailing semicolon.
    pub fn evaluate_expression(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        self.evaluate(expr)
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Continue)
            }
            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                self.out.println(&value.to_string());
                Ok(Flow::Continue)
            }
            Stmt::Var { name, initializer } => {
                // An uninitialized variable is nil, not an error.
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                self.env.define(&name.lexeme, value);
                Ok(Flow::Continue)
            }
            Stmt::Block(statements) => self.execute_block(statements),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Continue)
                }
            }
            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    match self.execute(body)? {
                        Flow::Continue => {}
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }
                Ok(Flow::Continue)
            }
            Stmt::Function(decl) => {
                let function = Value::Callable(Callable::Function(Rc::clone(decl)));
                self.env.define(&decl.name.lexeme, function);
                Ok(Flow::Continue)
            }
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                Ok(Flow::Return(value))
            }
        }
    }

    /// Run `statements` in a fresh block scope.
    fn execute_block(&mut self, statements: &[Stmt]) -> Result<Flow, RuntimeError> {
        self.env.push_scope();
        let result = self.run_statements(statements);
        self.env.pop_scope();
        result
    }

    /// Run statements in the current scope, stopping at the first `return`.
    fn run_statements(&mut self, statements: &[Stmt]) -> Result<Flow, RuntimeError> {
        for stmt in statements {
            match self.execute(stmt)? {
                Flow::Continue => {}
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }
        Ok(Flow::Continue)
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(literal) => Ok(literal_value(literal)),
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Unary { operator, operand } => {
                let operand = self.evaluate(operand)?;
                evaluate_unary(operator, operand)
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                evaluate_binary(operator, left, right)
            }
            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                // Short circuit: the left value itself is the result when
                // it decides the operator.
                let short_circuits = match operator.kind {
                    TokenKind::Or => left.is_truthy(),
                    _ => !left.is_truthy(),
                };
                if short_circuits {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }
            Expr::Variable { name } => self
                .env
                .lookup(&name.lexeme)
                .ok_or_else(|| RuntimeError::undefined_variable(name)),
            Expr::Assign { name, value } => {
                let value = self.evaluate(value)?;
                self.env
                    .assign(&name.lexeme, value.clone())
                    .map_err(|_| RuntimeError::undefined_variable(name))?;
                // Assignment is an expression; it yields the assigned value.
                Ok(value)
            }
            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee = self.evaluate(callee)?;
                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(self.evaluate(argument)?);
                }
                self.call(callee, paren, args)
            }
        }
    }

    fn call(
        &mut self,
        callee: Value,
        paren: &Token,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        let Value::Callable(callable) = callee else {
            return Err(RuntimeError::not_callable(paren));
        };
        if args.len() != callable.arity() {
            return Err(RuntimeError::wrong_arity(paren, callable.arity(), args.len()));
        }
        match callable {
            Callable::Function(decl) => self.call_function(&decl, args),
        }
    }

    fn call_function(
        &mut self,
        decl: &Rc<FunctionDecl>,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        trace!(name = %decl.name.lexeme, args = args.len(), "call");

        // The call scope chains to the global scope, not the defining or
        // calling scope. Function bodies see parameters, their own locals,
        // and globals; there are no closures.
        self.env.push_call_scope();
        for (param, arg) in decl.params.iter().zip(args) {
            self.env.define(&param.lexeme, arg);
        }

        let result = self.run_statements(&decl.body);
        self.env.pop_scope();

        match result? {
            Flow::Return(value) => Ok(value),
            // Falling off the end of a function yields nil.
            Flow::Continue => Ok(Value::Nil),
        }
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Nil => Value::Nil,
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Number(n) => Value::Number(*n),
        Literal::Str(s) => Value::from(s.as_str()),
    }
}
