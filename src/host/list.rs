/// List members. Lists are shared and the mutating methods change them in place.
///
/// Property:
///   length                  → Int
///
/// Methods:
///   pop()                   → T         — removes the last element, undefined when empty
///   push(...items)          → Int       — new length
///   shift()                 → T         — removes the first element
///   unshift(...items)       → Int       — new length
///   join(sep?)              → String    — sep defaults to ","
///   includes(x)             → Bool
///   indexOf(x)              → Int       — -1 when absent
///   slice(from?, to?)       → List<T>   — new list
///   reverse()               → List<T>   — same list, reversed in place
///   concat(...items)        → List<T>   — new list; list arguments are spread
///   toString()              → String
use super::{arg, clamp_index, int_arg, Member};
use crate::value::{repr, ListRef, RuntimeError, Value};

const METHODS: &[&str] = &[
    "pop", "push", "shift", "unshift", "join", "includes", "indexOf", "slice", "reverse",
    "concat", "toString",
];

pub fn member(items: &ListRef, name: &str) -> Option<Member> {
    match name {
        "length" => Some(Member::Property(Value::Int(items.borrow().len() as i64))),
        _ if METHODS.contains(&name) => Some(Member::Method),
        _ => None,
    }
}

/// Returns `Some(result)` when `name` is a list method, `None` otherwise.
pub fn call(items: &ListRef, name: &str, args: &[Value]) -> Option<Result<Value, RuntimeError>> {
    let result = match name {
        "pop" => Ok(items.borrow_mut().pop().unwrap_or(Value::Undefined)),
        "shift" => Ok(shift(items)),
        "push" => {
            let mut list = items.borrow_mut();
            list.extend(args.iter().cloned());
            Ok(Value::Int(list.len() as i64))
        }
        "unshift" => {
            let mut list = items.borrow_mut();
            let rest = std::mem::take(&mut *list);
            list.extend(args.iter().cloned());
            list.extend(rest);
            Ok(Value::Int(list.len() as i64))
        }
        "join" => Ok(join(items, args)),
        "includes" => {
            let needle = arg(args, 0);
            Ok(Value::Bool(items.borrow().iter().any(|v| *v == needle)))
        }
        "indexOf" => {
            let needle = arg(args, 0);
            let idx = items.borrow().iter().position(|v| *v == needle);
            Ok(Value::Int(idx.map(|i| i as i64).unwrap_or(-1)))
        }
        "slice" => slice(items, args),
        "reverse" => {
            items.borrow_mut().reverse();
            Ok(Value::List(items.clone()))
        }
        "concat" => Ok(concat(items, args)),
        "toString" => Ok(join(items, &[])),
        _ => return None,
    };
    Some(result)
}

// ─── Implementations ────────────────────────────────────────────────────────

fn shift(items: &ListRef) -> Value {
    let mut list = items.borrow_mut();
    if list.is_empty() {
        Value::Undefined
    } else {
        list.remove(0)
    }
}

fn join(items: &ListRef, args: &[Value]) -> Value {
    let sep = match arg(args, 0) {
        Value::Undefined => ",".to_string(),
        other => repr(&other),
    };
    let parts: Vec<String> = items.borrow().iter().map(repr).collect();
    Value::Str(parts.join(&sep))
}

fn slice(items: &ListRef, args: &[Value]) -> Result<Value, RuntimeError> {
    let list = items.borrow();
    let from = clamp_index(int_arg("slice", args, 0)?.unwrap_or(0), list.len());
    let to = match int_arg("slice", args, 1)? {
        Some(to) => clamp_index(to, list.len()),
        None => list.len(),
    };
    let out = if from < to { list[from..to].to_vec() } else { Vec::new() };
    Ok(Value::list(out))
}

fn concat(items: &ListRef, args: &[Value]) -> Value {
    let mut out = items.borrow().clone();
    for a in args {
        match a {
            Value::List(more) => out.extend(more.borrow().iter().cloned()),
            other => out.push(other.clone()),
        }
    }
    Value::list(out)
}
