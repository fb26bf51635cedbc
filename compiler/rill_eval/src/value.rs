//! Runtime values.

use std::fmt;
use std::rc::Rc;

use rill_ir::FunctionDecl;

/// A runtime value.
///
/// Strings are `Rc<str>` so concatenation results and variable copies share
/// storage; values are otherwise cheap to clone.
#[derive(Clone, Debug)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Callable(Callable),
}

/// Invocable runtime values.
///
/// A closed set: the only callable today is a declared function. Dispatch
/// in the interpreter is an exhaustive `match`, so growing this set (native
/// functions, class constructors) is a compile-time-visible change.
#[derive(Clone, Debug)]
pub enum Callable {
    Function(Rc<FunctionDecl>),
}

impl Callable {
    /// Number of arguments the callable requires. Calls are exact-arity.
    pub fn arity(&self) -> usize {
        match self {
            Callable::Function(decl) => decl.params.len(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Callable::Function(decl) => &decl.name.lexeme,
        }
    }
}

impl Value {
    /// Rill truthiness: only `nil` and `false` are falsy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Short name of the value's type, for error messages and tracing.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Callable(_) => "function",
        }
    }
}

/// Value equality for `==` and `!=`.
///
/// Values of different types are unequal, never an error. Numbers follow
/// IEEE semantics, so `NaN != NaN`. Functions are identity-equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Callable(Callable::Function(a)), Value::Callable(Callable::Function(b))) => {
                Rc::ptr_eq(a, b)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            // `{}` on f64 already drops a trailing `.0`, so integral values
            // print without a fractional part.
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Callable(c) => write!(f, "<fn {}>", c.name()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Rc::from(s))
    }
}
