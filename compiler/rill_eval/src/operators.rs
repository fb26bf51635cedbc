//! Unary and binary operator evaluation.
//!
//! Pure value-in, value-out functions dispatched on the operator token's
//! kind. Operands are evaluated by the caller; both sides of a binary
//! operator are always evaluated before the type check (`and`/`or` never
//! reach here, the interpreter short-circuits them).

use rill_ir::{Token, TokenKind};

use crate::error::RuntimeError;
use crate::value::Value;

/// Apply a unary operator.
pub fn evaluate_unary(operator: &Token, operand: Value) -> Result<Value, RuntimeError> {
    match operator.kind {
        TokenKind::Minus => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(RuntimeError::operand_must_be_number(operator)),
        },
        TokenKind::Bang => Ok(Value::Bool(!operand.is_truthy())),
        // Unary `+` is the identity on any value.
        TokenKind::Plus => Ok(operand),
        _ => Err(RuntimeError::invalid_operator(operator)),
    }
}

/// Apply a binary operator to two evaluated operands.
pub fn evaluate_binary(
    operator: &Token,
    left: Value,
    right: Value,
) -> Result<Value, RuntimeError> {
    match operator.kind {
        // `+` is overloaded on operand types: numeric addition or string
        // concatenation, never a mix.
        TokenKind::Plus => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Str(a), Value::Str(b)) => {
                let mut s = String::with_capacity(a.len() + b.len());
                s.push_str(&a);
                s.push_str(&b);
                Ok(Value::from(s))
            }
            _ => Err(RuntimeError::operands_must_be_numbers_or_strings(operator)),
        },

        TokenKind::Minus => numeric(operator, left, right).map(|(a, b)| Value::Number(a - b)),
        TokenKind::Star => numeric(operator, left, right).map(|(a, b)| Value::Number(a * b)),
        // Division follows IEEE 754: dividing by zero yields an infinity
        // or NaN, not an error.
        TokenKind::Slash => numeric(operator, left, right).map(|(a, b)| Value::Number(a / b)),

        TokenKind::Gt => numeric(operator, left, right).map(|(a, b)| Value::Bool(a > b)),
        TokenKind::GtEq => numeric(operator, left, right).map(|(a, b)| Value::Bool(a >= b)),
        TokenKind::Lt => numeric(operator, left, right).map(|(a, b)| Value::Bool(a < b)),
        TokenKind::LtEq => numeric(operator, left, right).map(|(a, b)| Value::Bool(a <= b)),

        // Equality is defined for every type pair; mismatched types are
        // unequal rather than an error.
        TokenKind::EqEq => Ok(Value::Bool(left == right)),
        TokenKind::NotEq => Ok(Value::Bool(left != right)),

        _ => Err(RuntimeError::invalid_operator(operator)),
    }
}

/// Require two numeric operands.
fn numeric(operator: &Token, left: Value, right: Value) -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((a, b)),
        _ => Err(RuntimeError::operand_must_be_number(operator)),
    }
}
