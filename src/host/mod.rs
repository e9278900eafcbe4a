/// Host capability: how the embedding program exposes members and outer-scope
/// names to the invoker and the lambda evaluator.
///
/// The core never inspects a receiver directly. It asks the host whether a
/// member exists, whether it is callable, and asks it to perform the call.
/// `Builtins` is the default host with a small member set for strings,
/// lists, numbers and objects, plus a table of global bindings.
use std::collections::HashMap;

use crate::value::{RuntimeError, Value};

mod list;
mod number;
mod object;
mod string;

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// Callable member; invoke through `Host::call_method`.
    Method,
    /// Plain property and its current value.
    Property(Value),
}

pub trait Host {
    /// Does `receiver` expose a member called `name`, and is it callable?
    fn member(&self, receiver: &Value, name: &str) -> Option<Member>;

    /// Call the method `name` on `receiver`.
    fn call_method(
        &self,
        receiver: &Value,
        name: &str,
        args: &[Value],
    ) -> Result<Value, RuntimeError>;

    /// Outer-scope lookup for identifiers that are not lambda parameters.
    fn global(&self, _name: &str) -> Option<Value> {
        None
    }
}

#[derive(Debug, Clone, Default)]
pub struct Builtins {
    globals: HashMap<String, Value>,
}

impl Builtins {
    pub fn new() -> Self {
        Builtins::default()
    }

    /// Bind `name` in the outer scope seen by lambda bodies.
    pub fn define(&mut self, name: impl Into<String>, value: Value) -> &mut Self {
        self.globals.insert(name.into(), value);
        self
    }

    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.define(name, value);
        self
    }
}

impl Host for Builtins {
    fn member(&self, receiver: &Value, name: &str) -> Option<Member> {
        match receiver {
            Value::Str(s) => string::member(s, name),
            Value::List(items) => list::member(items, name),
            Value::Int(_) | Value::Float(_) => number::member(name),
            Value::Object(_) => object::member(receiver, name),
            _ => None,
        }
    }

    fn call_method(
        &self,
        receiver: &Value,
        name: &str,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        let result = match receiver {
            Value::Str(s) => string::call(s, name, args),
            Value::List(items) => list::call(items, name, args),
            Value::Int(_) | Value::Float(_) => number::call(receiver, name, args),
            Value::Object(_) => object::call(receiver, name, args),
            _ => None,
        };
        result.unwrap_or_else(|| {
            Err(RuntimeError::Error(format!(
                "{} has no method '{}'",
                receiver.type_name(),
                name
            )))
        })
    }

    fn global(&self, name: &str) -> Option<Value> {
        self.globals.get(name).cloned()
    }
}

// ─── Argument helpers ───────────────────────────────────────────────────────

/// Positional argument, `undefined` when missing.
pub(crate) fn arg(args: &[Value], idx: usize) -> Value {
    args.get(idx).cloned().unwrap_or(Value::Undefined)
}

pub(crate) fn int_arg(method: &str, args: &[Value], idx: usize) -> Result<Option<i64>, RuntimeError> {
    match arg(args, idx) {
        Value::Undefined => Ok(None),
        Value::Int(i) => Ok(Some(i)),
        Value::Float(f) if f.fract() == 0.0 => Ok(Some(f as i64)),
        other => Err(RuntimeError::Error(format!(
            "{}: argument {} must be an integer, got {}",
            method,
            idx + 1,
            other.type_name()
        ))),
    }
}

pub(crate) fn str_arg(method: &str, args: &[Value], idx: usize) -> Result<String, RuntimeError> {
    match arg(args, idx) {
        Value::Str(s) => Ok(s),
        other => Err(RuntimeError::Error(format!(
            "{}: argument {} must be a string, got {}",
            method,
            idx + 1,
            other.type_name()
        ))),
    }
}

/// Resolve a possibly negative slice bound against `len`.
pub(crate) fn clamp_index(idx: i64, len: usize) -> usize {
    let len = len as i64;
    let resolved = if idx < 0 { len + idx } else { idx };
    resolved.clamp(0, len) as usize
}
