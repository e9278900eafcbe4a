use std::cmp::Ordering;

use crate::ast::{BinOp, UnaryOp};
use crate::value::{repr, RuntimeError, Value};

/// Strict binary operators. `&&` and `||` short-circuit in the evaluator.
pub(super) fn eval_binop(op: BinOp, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match op {
        BinOp::Add => op_add(left, right),
        BinOp::Sub => op_arith(op, left, right, i64::checked_sub, |x, y| x - y),
        BinOp::Mul => op_arith(op, left, right, i64::checked_mul, |x, y| x * y),
        BinOp::Div => op_div(left, right),
        BinOp::Rem => op_rem(left, right),
        BinOp::Eq => Ok(Value::Bool(left == right)),
        BinOp::Neq => Ok(Value::Bool(left != right)),
        BinOp::Lt => op_compare(op, &left, &right, Ordering::is_lt),
        BinOp::Gt => op_compare(op, &left, &right, Ordering::is_gt),
        BinOp::Lte => op_compare(op, &left, &right, Ordering::is_le),
        BinOp::Gte => op_compare(op, &left, &right, Ordering::is_ge),
        BinOp::And | BinOp::Or => unreachable!("logical operators are evaluated lazily"),
    }
}

pub(super) fn eval_unary(op: UnaryOp, v: Value) -> Result<Value, RuntimeError> {
    match (op, v) {
        (UnaryOp::Not, v) => Ok(Value::Bool(!v.is_truthy())),
        (UnaryOp::Neg, Value::Int(i)) => i
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| RuntimeError::Error("Integer overflow in '-'".to_string())),
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Neg, other) => Err(RuntimeError::Error(format!(
            "Operator '-' does not support {}",
            other.type_name()
        ))),
    }
}

fn unsupported(op: BinOp, a: &Value, b: &Value) -> RuntimeError {
    RuntimeError::Error(format!(
        "Operator '{}' does not support {} and {}",
        op.symbol(),
        a.type_name(),
        b.type_name()
    ))
}

fn op_add(a: Value, b: Value) -> Result<Value, RuntimeError> {
    match (&a, &b) {
        (Value::Str(x), _) => Ok(Value::Str(format!("{}{}", x, repr(&b)))),
        (_, Value::Str(y)) => Ok(Value::Str(format!("{}{}", repr(&a), y))),
        _ => op_arith(BinOp::Add, a, b, i64::checked_add, |x, y| x + y),
    }
}

fn op_arith(
    op: BinOp,
    a: Value,
    b: Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, RuntimeError> {
    match (&a, &b) {
        (Value::Int(x), Value::Int(y)) => int_op(*x, *y).map(Value::Int).ok_or_else(|| {
            RuntimeError::Error(format!("Integer overflow in '{}'", op.symbol()))
        }),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => Ok(Value::Float(float_op(x, y))),
            _ => Err(unsupported(op, &a, &b)),
        },
    }
}

fn op_div(a: Value, b: Value) -> Result<Value, RuntimeError> {
    match (&a, &b) {
        (Value::Int(_), Value::Int(0)) => Err(RuntimeError::Error("Division by zero".to_string())),
        (Value::Int(x), Value::Int(y)) if x.checked_rem(*y) == Some(0) => Ok(Value::Int(x / y)),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(_), Some(y)) if y == 0.0 => {
                Err(RuntimeError::Error("Division by zero".to_string()))
            }
            (Some(x), Some(y)) => Ok(Value::Float(x / y)),
            _ => Err(unsupported(BinOp::Div, &a, &b)),
        },
    }
}

fn op_rem(a: Value, b: Value) -> Result<Value, RuntimeError> {
    match (&a, &b) {
        (Value::Int(_), Value::Int(0)) => Err(RuntimeError::Error("Division by zero".to_string())),
        (Value::Int(x), Value::Int(y)) => Ok(Value::Int(x.wrapping_rem(*y))),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => Ok(Value::Float(x % y)),
            _ => Err(unsupported(BinOp::Rem, &a, &b)),
        },
    }
}

fn op_compare(
    op: BinOp,
    a: &Value,
    b: &Value,
    test: fn(Ordering) -> bool,
) -> Result<Value, RuntimeError> {
    let ordering = match (a, b) {
        (Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
        (Value::Str(x), Value::Str(y)) => Some(x.cmp(y)),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y),
            _ => return Err(unsupported(op, a, b)),
        },
    };
    // NaN compares false in every direction.
    Ok(Value::Bool(ordering.map(test).unwrap_or(false)))
}
