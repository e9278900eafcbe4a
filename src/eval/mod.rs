/// Tree-walking evaluator for lambda bodies.
///
/// Identifiers resolve against the parameter bindings first and the host's
/// outer scope second; anything else is `RuntimeError::Unresolved`.
use std::collections::HashMap;

use crate::ast::*;
use crate::host::{Host, Member};
use crate::value::{RuntimeError, Value};

mod ops;

pub type Env = HashMap<String, Value>;

pub struct Evaluator<'a> {
    host: &'a dyn Host,
    env: Env,
}

impl<'a> Evaluator<'a> {
    pub fn new(host: &'a dyn Host, env: Env) -> Self {
        Evaluator { host, env }
    }

    pub fn lookup(&self, name: &str) -> Result<Value, RuntimeError> {
        if let Some(v) = self.env.get(name) {
            return Ok(v.clone());
        }
        self.host
            .global(name)
            .ok_or_else(|| RuntimeError::Unresolved(name.to_string()))
    }

    pub fn eval_expr(&self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(lit) => Ok(eval_literal(lit)),
            Expr::Ident(name) => self.lookup(name),
            Expr::Attr(obj, field) => {
                let obj_val = self.eval_expr(obj)?;
                self.eval_attr(&obj_val, field)
            }
            Expr::MethodCall(obj, method, args) => {
                let obj_val = self.eval_expr(obj)?;
                if matches!(obj_val, Value::Undefined | Value::Null) {
                    return Err(RuntimeError::Error(format!(
                        "Cannot call '{}' on {}",
                        method,
                        obj_val.type_name()
                    )));
                }
                let arg_vals = self.eval_args(args)?;
                self.host.call_method(&obj_val, method, &arg_vals)
            }
            Expr::FnCall(callee, args) => {
                let fn_val = self.eval_expr(callee)?;
                let arg_vals = self.eval_args(args)?;
                match fn_val {
                    Value::Function(f) => f.call(&arg_vals),
                    other => Err(RuntimeError::Error(format!(
                        "Cannot call value of type {}",
                        other.type_name()
                    ))),
                }
            }
            Expr::Index(obj, index) => {
                let obj_val = self.eval_expr(obj)?;
                let idx_val = self.eval_expr(index)?;
                self.eval_index(&obj_val, &idx_val)
            }
            Expr::BinOp(BinOp::And, left, right) => {
                let lv = self.eval_expr(left)?;
                if lv.is_truthy() {
                    self.eval_expr(right)
                } else {
                    Ok(lv)
                }
            }
            Expr::BinOp(BinOp::Or, left, right) => {
                let lv = self.eval_expr(left)?;
                if lv.is_truthy() {
                    Ok(lv)
                } else {
                    self.eval_expr(right)
                }
            }
            Expr::BinOp(op, left, right) => {
                let lv = self.eval_expr(left)?;
                let rv = self.eval_expr(right)?;
                ops::eval_binop(*op, lv, rv)
            }
            Expr::Unary(op, operand) => {
                let v = self.eval_expr(operand)?;
                ops::eval_unary(*op, v)
            }
            Expr::Cond(cond, then, otherwise) => {
                if self.eval_expr(cond)?.is_truthy() {
                    self.eval_expr(then)
                } else {
                    self.eval_expr(otherwise)
                }
            }
            Expr::List(elements) => Ok(Value::list(self.eval_args(elements)?)),
        }
    }

    fn eval_args(&self, args: &[Expr]) -> Result<Vec<Value>, RuntimeError> {
        let mut vals = Vec::with_capacity(args.len());
        for a in args {
            vals.push(self.eval_expr(a)?);
        }
        Ok(vals)
    }

    fn eval_attr(&self, obj: &Value, field: &str) -> Result<Value, RuntimeError> {
        if matches!(obj, Value::Undefined | Value::Null) {
            return Err(RuntimeError::Error(format!(
                "Cannot read '{}' of {}",
                field,
                obj.type_name()
            )));
        }
        match self.host.member(obj, field) {
            Some(Member::Property(v)) => Ok(v),
            Some(Member::Method) => Err(RuntimeError::Error(format!(
                "'{}' is a method of {}; call it as {}()",
                field,
                obj.type_name(),
                field
            ))),
            None => Ok(Value::Undefined),
        }
    }

    fn eval_index(&self, obj: &Value, index: &Value) -> Result<Value, RuntimeError> {
        match (obj, index) {
            (Value::List(items), Value::Int(i)) => Ok(usize::try_from(*i)
                .ok()
                .and_then(|i| items.borrow().get(i).cloned())
                .unwrap_or(Value::Undefined)),
            (Value::Str(s), Value::Int(i)) => Ok(usize::try_from(*i)
                .ok()
                .and_then(|i| s.chars().nth(i))
                .map(|c| Value::Str(c.to_string()))
                .unwrap_or(Value::Undefined)),
            (_, Value::Str(name)) => self.eval_attr(obj, name),
            _ => Err(RuntimeError::Error(format!(
                "Cannot index {} with {}",
                obj.type_name(),
                index.type_name()
            ))),
        }
    }
}

pub fn eval_literal(lit: &Literal) -> Value {
    match lit {
        Literal::Int(i) => Value::Int(*i),
        Literal::Float(f) => Value::Float(*f),
        Literal::Str(s) => Value::Str(s.clone()),
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Null => Value::Null,
        Literal::Undefined => Value::Undefined,
    }
}
